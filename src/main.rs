use clap::Parser;
use std::process;
use unifile::{Cli, OutputFormatter, OutputMode, Unifile, UnifileError, UserFriendlyError};

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    // Create Unifile instance
    let unifile = match Unifile::from_cli(&cli) {
        Ok(unifile) => unifile,
        Err(e) => {
            print_startup_error(&e);
            return 2;
        }
    };

    // Handle dry run mode
    if cli.dry_run {
        return handle_dry_run(&unifile);
    }

    // Execute the configured batch
    match unifile.run() {
        Ok(report) => {
            unifile.output_formatter().print_batch_report(&report);
            0
        }
        Err(e) => {
            unifile.handle_error(&e);

            // Map error types to appropriate exit codes
            match e {
                UnifileError::Config { .. } => 2,
                UnifileError::MissingSource { .. } => 3,
                UnifileError::UnwritableOutput { .. } => 4,
                _ => 1, // General error
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "unifile.toml".to_string());

    match Unifile::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample manifest file: {}", config_path);
            println!("\nTo use this manifest:");
            println!("  unifile --config {}", config_path);
            println!("\nEdit the file to list your sources and output variants.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate manifest file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(unifile: &Unifile) -> i32 {
    let formatter = unifile.output_formatter();
    let config = unifile.config();

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_header("Variant Plan");

    println!("Sources (in composition order):");
    for source in &config.sources {
        println!("  {}", source.display());
    }
    println!();

    println!("Variants:");
    for variant in &config.variants {
        let mode = if variant.strip_comments {
            "stripping"
        } else {
            "verbatim"
        };
        println!(
            "  {} -> {} ({} mode{})",
            variant.region,
            config.output_path(variant).display(),
            mode,
            if variant.append.is_empty() {
                String::new()
            } else {
                format!(", appends {:?}", variant.append)
            }
        );
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to write the outputs");

    0
}

fn print_startup_error(error: &UnifileError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use unifile::{Config, OutputConfig, VariantConfig};

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli {
            config: Some(config_path.clone()),
            output_dir: None,
            only: None,
            output_format: unifile::cli::OutputFormat::Plain,
            verbose: 0,
            quiet: true,
            dry_run: false,
            generate_config: true,
        };

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[[variant]]"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            sources: vec![temp_dir.path().join("a.h")],
            output: OutputConfig {
                directory: temp_dir.path().to_path_buf(),
            },
            variants: vec![VariantConfig {
                region: "hex".to_string(),
                output: "out.h".into(),
                append: String::new(),
                strip_comments: true,
            }],
        };

        let unifile = Unifile::new(config, OutputMode::Plain, 0, true);
        let exit_code = handle_dry_run(&unifile);
        assert_eq!(exit_code, 0);
        // The source does not even exist; dry run never touches the disk.
        assert!(!temp_dir.path().join("out.h").exists());
    }
}
