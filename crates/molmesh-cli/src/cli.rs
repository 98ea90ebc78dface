use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "MolMesh CLI - Turn molecular models into welded, colored triangle meshes.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel mesh synthesis.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a welded scene mesh from a model document.
    Build(BuildArgs),
    /// Print the built-in element table.
    Elements(ElementsArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    // --- Core Arguments ---
    /// Path to the input model document (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output mesh file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional scene configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Output Overrides ---
    /// Output format. Inferred from the output extension when omitted.
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    // --- Scene Overrides ---
    /// Representations to draw, in order (e.g. ribbon,ball-and-stick).
    #[arg(short, long = "representation", value_name = "NAME", value_delimiter = ',')]
    pub representations: Vec<String>,

    /// Colormap used for chain ribbons (viridis, magma, inferno, plasma).
    #[arg(short, long, value_name = "NAME")]
    pub palette: Option<String>,

    /// Keep model coordinates instead of fitting the scene into the bi-unit cube.
    #[arg(long)]
    pub no_normalize: bool,

    /// Replicate the scene with the model's symmetry operators.
    #[arg(long)]
    pub symmetry: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S synthesis.bond-radius=0.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `elements` subcommand.
#[derive(Args, Debug)]
pub struct ElementsArgs {
    /// Only show the listed element symbols.
    #[arg(value_name = "SYMBOL")]
    pub symbols: Vec<String>,
}
