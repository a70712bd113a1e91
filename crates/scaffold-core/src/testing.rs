//! Product fixture shared by unit tests

use crate::config::{GeneratorKind, ScaffoldOptions, Variant};
use crate::generators::GeneratorStrategy;
use crate::product::{Instruction, ProductConfig};

#[derive(Clone)]
pub(crate) struct TestProduct;

impl ProductConfig for TestProduct {
    fn name(&self) -> &'static str {
        "test-scripts"
    }

    fn display_name(&self) -> &'static str {
        "Test Scripts"
    }

    fn package_name(&self) -> &'static str {
        "test-scripts"
    }

    fn default_dependencies(&self) -> &'static [(&'static str, &'static str)] {
        &[("react", "16.4.0"), ("react-native", "0.55.4")]
    }

    fn default_dev_dependencies(&self) -> &'static [(&'static str, &'static str)] {
        &[("jest", "23.0.0")]
    }

    fn entry_file(&self, variant: Variant) -> String {
        match variant {
            Variant::Standard => "./entry.js".to_string(),
            Variant::ExtendedSupport => "./entry-web.js".to_string(),
        }
    }

    fn scripts(&self, variant: Variant) -> Vec<(&'static str, &'static str)> {
        let mut scripts = vec![("start", "tool start"), ("test", "jest")];
        if variant.is_extended() {
            scripts.push(("web", "webpack-dev-server"));
            scripts.push(("build", "webpack -p"));
        }
        scripts
    }

    fn test_preset(&self) -> &'static str {
        "test-preset"
    }

    fn template_dir_name(&self, variant: Variant) -> &'static str {
        match variant {
            Variant::Standard => "template",
            Variant::ExtendedSupport => "template-with-web",
        }
    }

    fn superseded_files(&self) -> &'static [&'static str] {
        &["App.js", "App.windows.js"]
    }

    fn generator_strategy(
        &self,
        _kind: GeneratorKind,
        _options: &ScaffoldOptions,
    ) -> GeneratorStrategy {
        GeneratorStrategy::None
    }

    fn instructions(&self, variant: Variant) -> Vec<Instruction> {
        let mut steps = vec![Instruction::new("start", "Starts the development server.")];
        if variant.is_extended() {
            steps.push(Instruction::new("run web", "Serves the web version."));
        }
        steps.push(Instruction::new("test", "Starts the test runner."));
        steps
    }
}
