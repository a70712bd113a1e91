//! Run configuration threaded through every pipeline stage

pub mod options;

pub use options::{GeneratorKind, ScaffoldOptions, Variant, TEMPLATE_DIR_ENV};
