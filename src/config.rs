use crate::error::{Result, UnifileError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// The batch manifest: which sources to scan, where outputs go, and the
/// table of variants to produce. The variant table is the single source
/// of truth for the batch; there is one driver routine and no per-variant
/// code paths.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub sources: Vec<PathBuf>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "variant", default)]
    pub variants: Vec<VariantConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

/// One output artifact: a region name, a destination file, optional
/// trailing text, and a comment-handling mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VariantConfig {
    pub region: String,
    pub output: PathBuf,
    /// Literal text appended after the amalgamated body, written with a
    /// trailing newline. Empty means nothing is appended (verbatim mode).
    #[serde(default)]
    pub append: String,
    /// Drop comment-only lines during extraction (stripping mode).
    #[serde(default)]
    pub strip_comments: bool,
}

impl Default for Config {
    fn default() -> Self {
        // The reference batch: single-file big-integer headers assembled
        // from five sources, each variant appending a BigInt type alias.
        let typedef_variant = |region: &str, alias: &str| VariantConfig {
            region: region.to_string(),
            output: PathBuf::from(format!("single_bigint_{}.h", region)),
            append: format!("typedef {} BigInt;", alias),
            strip_comments: true,
        };

        Self {
            sources: vec![
                PathBuf::from("bigint_header.h"),
                PathBuf::from("bigint_base.h"),
                PathBuf::from("bigint_mini.h"),
                PathBuf::from("bigint_dec.h"),
                PathBuf::from("bigint_hex.h"),
            ],
            output: OutputConfig::default(),
            variants: vec![
                typedef_variant("hex", "BigIntHex"),
                // I/O base in 2, 4, 8, 16, 32
                typedef_variant("hexm", "BigIntHex"),
                typedef_variant("dec", "BigIntDec"),
                // I/O base 10 only
                typedef_variant("decm", "BigIntDec"),
                typedef_variant("mini", "BigIntMini"),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(UnifileError::Config {
                message: format!("Manifest file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| UnifileError::Config {
            message: format!("Failed to read manifest {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| UnifileError::Config {
            message: format!("Failed to parse manifest {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["unifile.toml", ".unifile.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                // No manifest on disk: run the built-in reference batch.
                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = output_dir.clone();
        }
    }

    /// Restricts the variant table to the named regions, preserving the
    /// manifest's variant order. A name matching no variant is an error
    /// rather than a silently shorter batch.
    pub fn select_variants(&mut self, regions: &[String]) -> Result<()> {
        let known: HashSet<&str> = self.variants.iter().map(|v| v.region.as_str()).collect();
        for region in regions {
            if !known.contains(region.as_str()) {
                return Err(UnifileError::Config {
                    message: format!("No variant with region name: {}", region),
                });
            }
        }

        let wanted: HashSet<&str> = regions.iter().map(String::as_str).collect();
        self.variants.retain(|v| wanted.contains(v.region.as_str()));
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| UnifileError::Config {
            message: format!("Failed to serialize manifest: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| UnifileError::Config {
            message: format!("Failed to write manifest {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(UnifileError::Config {
                message: "At least one source file must be listed".to_string(),
            });
        }

        if self.variants.is_empty() {
            return Err(UnifileError::Config {
                message: "At least one output variant must be defined".to_string(),
            });
        }

        let mut seen_outputs = HashSet::new();
        for variant in &self.variants {
            if variant.region.is_empty() {
                return Err(UnifileError::Config {
                    message: format!(
                        "Variant writing {} has an empty region name",
                        variant.output.display()
                    ),
                });
            }

            if variant.output.as_os_str().is_empty() {
                return Err(UnifileError::Config {
                    message: format!("Variant {} has an empty output path", variant.region),
                });
            }

            // Variants must be independent; two writing the same path
            // would clobber each other.
            if !seen_outputs.insert(variant.output.clone()) {
                return Err(UnifileError::Config {
                    message: format!(
                        "Multiple variants write the same output path: {}",
                        variant.output.display()
                    ),
                });
            }
        }

        Ok(())
    }

    /// Resolves a variant's output path against the output directory.
    pub fn output_path(&self, variant: &VariantConfig) -> PathBuf {
        if variant.output.is_absolute() {
            variant.output.clone()
        } else {
            self.output.directory.join(&variant.output)
        }
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_reference_batch() {
        let config = Config::default();
        assert_eq!(config.sources.len(), 5);
        assert_eq!(config.variants.len(), 5);

        let regions: Vec<&str> = config.variants.iter().map(|v| v.region.as_str()).collect();
        assert_eq!(regions, ["hex", "hexm", "dec", "decm", "mini"]);

        let hex = &config.variants[0];
        assert_eq!(hex.output, PathBuf::from("single_bigint_hex.h"));
        assert_eq!(hex.append, "typedef BigIntHex BigInt;");
        assert!(hex.strip_comments);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.variants.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_output_paths_rejected() {
        let mut config = Config::default();
        config.variants[1].output = config.variants[0].output.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let config = Config::default();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.sources, loaded_config.sources);
        assert_eq!(config.variants.len(), loaded_config.variants.len());
        assert_eq!(config.variants[2].append, loaded_config.variants[2].append);
    }

    #[test]
    fn test_manifest_parsing_with_defaults() {
        let manifest = r#"
sources = ["a.h", "b.h"]

[[variant]]
region = "mini"
output = "single_mini.h"
"#;
        let config: Config = toml::from_str(manifest).unwrap();
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.variants[0].append, "");
        assert!(!config.variants[0].strip_comments);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new().with_output_dir(Some(PathBuf::from("dist")));
        config.merge_with_cli_args(&overrides);

        assert_eq!(config.output.directory, PathBuf::from("dist"));
    }

    #[test]
    fn test_select_variants() {
        let mut config = Config::default();
        config
            .select_variants(&["mini".to_string(), "dec".to_string()])
            .unwrap();

        let regions: Vec<&str> = config.variants.iter().map(|v| v.region.as_str()).collect();
        assert_eq!(regions, ["dec", "mini"]);
    }

    #[test]
    fn test_select_unknown_variant_is_error() {
        let mut config = Config::default();
        assert!(config.select_variants(&["nope".to_string()]).is_err());
    }

    #[test]
    fn test_output_path_resolution() {
        let mut config = Config::default();
        config.output.directory = PathBuf::from("dist");

        let resolved = config.output_path(&config.variants[0]);
        assert_eq!(resolved, PathBuf::from("dist/single_bigint_hex.h"));
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(!sample.is_empty());
        assert!(sample.contains("sources"));
        assert!(sample.contains("[[variant]]"));
        assert!(sample.contains("strip_comments"));
    }
}
