pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod ui;

// Public API re-exports
pub use batch::{BatchReport, BatchRunner, VariantOutcome};
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, VariantConfig};
pub use error::{Result, UnifileError, UserFriendlyError};
pub use extract::{extract_region, Amalgamator, RegionMarkers};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;

/// Main library interface for Unifile functionality
pub struct Unifile {
    config: Config,
    output_formatter: OutputFormatter,
}

impl Unifile {
    /// Create a new Unifile instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);

        Self {
            config,
            output_formatter,
        }
    }

    /// Create Unifile instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Run the full configured batch: every variant in table order.
    pub fn run(&self) -> Result<BatchReport> {
        self.output_formatter.start_operation("Amalgamating regions");
        self.output_formatter.info(&format!(
            "{} source files, {} variants",
            self.config.sources.len(),
            self.config.variants.len()
        ));

        let report = BatchRunner::new(&self.config).run()?;

        for outcome in &report.variants {
            if outcome.contributing_sources == 0 {
                self.output_formatter.warning(&format!(
                    "Region {} matched no source file; {} holds only its trailing text",
                    outcome.region, outcome.output
                ));
            }
            self.output_formatter.debug(&format!(
                "{} <- region {} ({} contributing sources)",
                outcome.output, outcome.region, outcome.contributing_sources
            ));
        }

        Ok(report)
    }

    /// Generate sample manifest file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(UnifileError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &UnifileError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to amalgamate one region with minimal setup.
pub fn amalgamate_region<P: Into<std::path::PathBuf>>(
    sources: Vec<P>,
    region: &str,
    strip_comments: bool,
) -> Result<String> {
    Amalgamator::new(sources).amalgamate(region, strip_comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unifile_creation() {
        let config = Config::default();
        let unifile = Unifile::new(config, OutputMode::Plain, 0, true);
        assert_eq!(unifile.config().variants.len(), 5);
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        Unifile::generate_sample_config(&config_path).unwrap();
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("sources"));
        assert!(content.contains("[[variant]]"));
    }

    #[test]
    fn test_run_against_temp_sources() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("lib.h");
        fs::write(&source, "// {hex_b}\nint x;\n// {hex_e}\n").unwrap();

        let config = Config {
            sources: vec![source],
            output: OutputConfig {
                directory: temp_dir.path().to_path_buf(),
            },
            variants: vec![VariantConfig {
                region: "hex".to_string(),
                output: "out.h".into(),
                append: String::new(),
                strip_comments: false,
            }],
        };

        let unifile = Unifile::new(config, OutputMode::Plain, 0, true);
        let report = unifile.run().unwrap();
        assert_eq!(report.variants.len(), 1);

        let written = fs::read_to_string(temp_dir.path().join("out.h")).unwrap();
        assert_eq!(written, "int x;\n");
    }

    #[test]
    fn test_amalgamate_region_helper() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("lib.h");
        fs::write(&source, "// {mini_b}\nbody\n// {mini_e}\n").unwrap();

        let result = amalgamate_region(vec![source], "mini", false).unwrap();
        assert_eq!(result, "body\n");
    }
}
