use crate::config::{Config, VariantConfig};
use crate::error::{Result, UnifileError};
use crate::extract::Amalgamator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Outcome of one full batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub variants: Vec<VariantOutcome>,
    pub total_bytes_written: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantOutcome {
    pub region: String,
    pub output: String,
    pub bytes_written: u64,
    pub contributing_sources: usize,
}

/// Runs the variant table against the configured sources.
///
/// Variants are processed one at a time in table order; each is an
/// independent amalgamation writing a distinct path, so ordering between
/// variants carries no semantics. Any failure aborts the whole batch:
/// an unreadable source and an unwritable destination are both treated
/// as fatal rather than continuing best-effort, so a run either yields
/// the complete set of outputs or none of the remaining ones.
pub struct BatchRunner<'a> {
    config: &'a Config,
}

impl<'a> BatchRunner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<BatchReport> {
        let amalgamator = Amalgamator::new(self.config.sources.iter().cloned());
        let mut outcomes = Vec::with_capacity(self.config.variants.len());

        for variant in &self.config.variants {
            let outcome = self.run_variant(&amalgamator, variant)?;
            outcomes.push(outcome);
        }

        let total_bytes_written = outcomes.iter().map(|o| o.bytes_written).sum();

        Ok(BatchReport {
            generated_at: Utc::now(),
            variants: outcomes,
            total_bytes_written,
        })
    }

    fn run_variant(
        &self,
        amalgamator: &Amalgamator,
        variant: &VariantConfig,
    ) -> Result<VariantOutcome> {
        let region_body =
            amalgamator.amalgamate_with_stats(&variant.region, variant.strip_comments)?;

        let mut content = region_body.body;
        if !variant.append.is_empty() {
            content.push_str(&variant.append);
            content.push('\n');
        }

        let output_path = self.config.output_path(variant);
        write_output(&output_path, &content)?;

        Ok(VariantOutcome {
            region: variant.region.clone(),
            output: output_path.display().to_string(),
            bytes_written: content.len() as u64,
            contributing_sources: region_body.contributing_sources,
        })
    }
}

/// Writes a variant's output, overwriting any existing file. The parent
/// directory is created if missing; every failure maps to
/// `UnwritableOutput` for that path.
fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| UnifileError::UnwritableOutput {
                path: path.display().to_string(),
                source: e,
            })?;
        }
    }

    fs::write(path, content).map_err(|e| UnifileError::UnwritableOutput {
        path: path.display().to_string(),
        source: e,
    })
}
