//! rn-scripts - Project scaffolding for React Native apps

use anyhow::Result;
use clap::{Parser, Subcommand};
use scaffold_core::generators::{
    CommandSubGenerator, LocalCliInit, PlatformGenerator, SubprocessGenerator,
};
use scaffold_core::runtime::ToolCommand;
use scaffold_core::tui::InitArgs;
use scaffold_core::{
    BrokenRelease, GeneratorKind, GeneratorStrategy, Instruction, ProductConfig,
    ScaffoldOptions, Variant,
};
use std::path::PathBuf;
use std::sync::Arc;

// Update dependency versions here
const DEFAULT_DEPENDENCIES: &[(&str, &str)] = &[
    ("react", "16.4.0"),
    ("react-native", "0.55.4"),
    ("react-native-windows", "0.55.0-rc.0"),
];

const DEFAULT_DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@types/jest", "22.2.3"),
    ("@types/react", "16.3.14"),
    ("@types/react-native", "0.55.15"),
    ("@types/react-test-renderer", "16.0.1"),
    ("babel-jest", "23.0.0"),
    ("babel-preset-react-native", "4.0.0"),
    ("jest", "23.0.0"),
    ("react-addons-test-utils", "15.6.2"),
    ("react-native-mock", "0.3.1"),
    ("react-native-typescript-transformer", "1.2.8"),
    ("react-test-renderer", "16.4.0"),
    ("rnpm-plugin-windows", "0.2.8"),
    ("ts-jest", "22.4.6"),
    ("typescript", "2.8.3"),
];

const PLATFORM_NAMESPACE: &str = "windows";

/// React Native product configuration
#[derive(Clone)]
pub struct ReactNativeConfig;

impl ProductConfig for ReactNativeConfig {
    fn name(&self) -> &'static str {
        "rn-scripts"
    }

    fn display_name(&self) -> &'static str {
        "React Native Scripts"
    }

    fn package_name(&self) -> &'static str {
        "react-native-scripts"
    }

    fn default_dependencies(&self) -> &'static [(&'static str, &'static str)] {
        DEFAULT_DEPENDENCIES
    }

    fn default_dev_dependencies(&self) -> &'static [(&'static str, &'static str)] {
        DEFAULT_DEV_DEPENDENCIES
    }

    fn entry_file(&self, variant: Variant) -> String {
        let entry = match variant {
            Variant::Standard => "crna-entry.js",
            Variant::ExtendedSupport => "crna-entry-web.js",
        };
        format!("./node_modules/{}/build/bin/{}", self.package_name(), entry)
    }

    fn scripts(&self, variant: Variant) -> Vec<(&'static str, &'static str)> {
        let mut scripts = vec![
            ("start", "react-native-scripts start"),
            ("eject", "react-native-scripts eject"),
            ("android", "react-native-scripts android"),
            ("ios", "react-native-scripts ios"),
            ("test", "jest"),
        ];
        if variant.is_extended() {
            scripts.push((
                "web",
                "webpack-dev-server -d --config ./webpack.config.js --inline --hot --colors --content-base public/ --history-api-fallback",
            ));
            scripts.push((
                "build",
                "NODE_ENV=production webpack -p --config ./webpack.config.js",
            ));
        }
        scripts
    }

    fn test_preset(&self) -> &'static str {
        "jest-expo"
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

    fn generator_strategy(&self, kind: GeneratorKind, options: &ScaffoldOptions) -> GeneratorStrategy {
        match kind {
            GeneratorKind::Subprocess => GeneratorStrategy::Subprocess(vec![
                SubprocessGenerator::new(
                    "react-native init",
                    ToolCommand::new("react-native").args(["init", options.project_name.as_str()]),
                ),
                SubprocessGenerator::new(
                    "react-native windows",
                    ToolCommand::new("react-native").arg(PLATFORM_NAMESPACE),
                ),
            ]),
            GeneratorKind::InProcess => GeneratorStrategy::InProcess {
                baseline: Arc::new(LocalCliInit::new(
                    "react-native",
                    "node_modules/react-native/cli.js",
                )),
                platform: Some(PlatformGenerator::new(
                    PLATFORM_NAMESPACE,
                    Arc::new(
                        CommandSubGenerator::new(
                            ToolCommand::new("react-native").arg(PLATFORM_NAMESPACE),
                        )
                        .verbose(options.verbose),
                    ),
                )),
            },
            GeneratorKind::None => GeneratorStrategy::None,
        }
    }

    fn broken_npm_release(&self) -> Option<BrokenRelease> {
        Some(BrokenRelease {
            major: 5,
            fixed_minor: 7,
        })
    }

    fn instructions(&self, variant: Variant) -> Vec<Instruction> {
        let mut steps = vec![
            Instruction::new(
                "start",
                "Starts the development server so you can open your app in the Expo\napp on your phone.",
            ),
            Instruction::new(
                "run ios",
                "(Mac only, requires Xcode)\nStarts the development server and loads your app in an iOS simulator.",
            ),
            Instruction::new(
                "run android",
                "(Requires Android build tools)\nStarts the development server and loads your app on a connected Android\ndevice or emulator.",
            ),
        ];
        if variant.is_extended() {
            steps.push(Instruction::new(
                "run web",
                "Starts the Webpack server to serve the web version of the app.",
            ));
        }
        steps.push(Instruction::new("test", "Starts the test runner."));
        steps.push(Instruction::new(
            "run eject",
            "Removes this tool and copies build dependencies, configuration files\nand scripts into the app directory. If you do this, you can't go back!",
        ));
        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "rn-scripts")]
#[command(about = "CLI for scaffolding React Native projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn a freshly created project into a ready-to-run app
    Init(CliInitArgs),
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Project directory (must already contain package.json)
    pub directory: Option<PathBuf>,

    /// Project name (defaults to the directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Switch the entry file, add web serve/build scripts and use the web template
    #[arg(long = "with-extended-support", alias = "with-web-support")]
    pub with_extended_support: bool,

    /// Local directory holding the template directories (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// How project generators are invoked
    #[arg(short, long, value_enum, default_value_t = GeneratorKind::Subprocess)]
    pub generator: GeneratorKind,

    /// Package manager executable to use instead of npm/yarn
    #[arg(long = "package-manager")]
    pub package_manager: Option<String>,

    /// Print each command before running it
    #[arg(short, long)]
    pub verbose: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            directory: args.directory,
            name: args.name,
            with_extended_support: args.with_extended_support,
            template_dir: args.template_dir,
            generator: args.generator,
            package_manager: args.package_manager,
            verbose: args.verbose,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = ReactNativeConfig;

    let init_args = match args.command {
        Some(Command::Init(init_args)) => init_args.into(),
        // No subcommand provided, default to init behavior (interactive mode)
        None => InitArgs::default(),
    };

    let result = scaffold_core::run(&config, init_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    // Failures were already reported by the prompt layer
    if let Err(err) = result {
        std::process::exit(scaffold_core::exit_code_for(&err));
    }

    Ok(())
}
