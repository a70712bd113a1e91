//! Scaffold options built once by the CLI layer

use crate::product::ProductConfig;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Environment variable overriding where templates are read from
pub const TEMPLATE_DIR_ENV: &str = "RN_SCRIPTS_TEMPLATE_DIR";

/// Template/manifest variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Standard,
    /// Switches the entry file, adds serve/build scripts and selects the
    /// alternate template directory
    ExtendedSupport,
}

impl Variant {
    pub fn from_flag(with_extended_support: bool) -> Self {
        if with_extended_support {
            Variant::ExtendedSupport
        } else {
            Variant::Standard
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, Variant::ExtendedSupport)
    }
}

/// How project generators are invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GeneratorKind {
    /// Spawn the generator CLI as a child process
    #[default]
    Subprocess,
    /// Call the baseline generator directly, then run the platform
    /// sub-generator inside a generator host
    InProcess,
    /// Skip generation entirely
    None,
}

/// Everything a scaffold run needs to know, resolved up front
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Directory being scaffolded; must already contain the manifest
    pub target_dir: PathBuf,
    pub project_name: String,
    pub variant: Variant,
    /// Directory holding the `template*` directories
    pub template_root: PathBuf,
    pub generator: GeneratorKind,
    /// Directory the user invoked the tool from
    pub cwd: PathBuf,
    /// Executable used in place of the detected package manager's default
    pub package_manager: Option<String>,
    /// Echo spawned commands
    pub verbose: bool,
}

impl ScaffoldOptions {
    /// Build options with the product's default template root
    ///
    /// Template root precedence: `template_dir` argument, then
    /// `RN_SCRIPTS_TEMPLATE_DIR`, then `<target>/node_modules/<package>`.
    pub fn new<C: ProductConfig>(
        config: &C,
        target_dir: PathBuf,
        project_name: Option<String>,
        template_dir: Option<PathBuf>,
    ) -> Self {
        let project_name = project_name.unwrap_or_else(|| default_project_name(&target_dir));
        let template_root = template_dir
            .or_else(|| std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| target_dir.join("node_modules").join(config.package_name()));
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            target_dir,
            project_name,
            variant: Variant::Standard,
            template_root,
            generator: GeneratorKind::default(),
            cwd,
            package_manager: None,
            verbose: false,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_generator(mut self, generator: GeneratorKind) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_cwd(mut self, cwd: PathBuf) -> Self {
        self.cwd = cwd;
        self
    }

    pub fn with_package_manager(mut self, program: Option<String>) -> Self {
        self.package_manager = program;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Template directory for the selected variant
    pub fn template_dir<C: ProductConfig>(&self, config: &C) -> PathBuf {
        self.template_root.join(config.template_dir_name(self.variant))
    }

    /// Manifest path inside the target directory
    pub fn manifest_path(&self) -> PathBuf {
        self.target_dir.join("package.json")
    }
}

fn default_project_name(target_dir: &Path) -> String {
    target_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_flag() {
        assert_eq!(Variant::from_flag(false), Variant::Standard);
        assert_eq!(Variant::from_flag(true), Variant::ExtendedSupport);
        assert!(Variant::ExtendedSupport.is_extended());
    }

    #[test]
    fn test_default_project_name_uses_last_component() {
        assert_eq!(default_project_name(Path::new("/tmp/work/MyApp")), "MyApp");
        assert_eq!(default_project_name(Path::new("/")), "app");
    }
}
