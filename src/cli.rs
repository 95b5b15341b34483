use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "unifile")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Assemble single-file headers from marker-delimited source regions")]
#[command(
    long_about = "Unifile scans an ordered list of source files for named regions \
                       delimited by {name_b}/{name_e} marker lines and concatenates them \
                       into single-file output variants. Run without arguments to build \
                       every configured variant."
)]
#[command(after_help = "EXAMPLES:\n  \
    unifile\n  \
    unifile --config release.toml --output-dir dist\n  \
    unifile --only hex,mini --verbose\n  \
    unifile --dry-run\n\n\
    For more information, visit: https://github.com/user/unifile")]
pub struct Cli {
    /// Manifest file path
    #[arg(short, long, help = "Path to TOML manifest file")]
    pub config: Option<PathBuf>,

    /// Directory to write output variants into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Build only the named regions (comma-separated)
    #[arg(long, value_delimiter = ',', help = "Region names to build (e.g. hex,mini)")]
    pub only: Option<Vec<String>>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be written without executing)
    #[arg(long, help = "Show the variant plan without writing any files")]
    pub dry_run: bool,

    /// Generate sample manifest file
    #[arg(long, help = "Generate a sample manifest file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);

        if let Some(ref regions) = self.only {
            config.select_variants(regions)?;
        }

        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new().with_output_dir(self.output_dir.clone())
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
