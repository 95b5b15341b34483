use crate::error::{Result, UnifileError};
use crate::extract::region::{extract_region, RegionMarkers};
use std::fs;
use std::path::{Path, PathBuf};

/// Concatenates one region's per-file extractions in source-list order.
///
/// The source order is the composition order: the amalgamated body for a
/// region is always the per-file extractions joined in the exact order
/// the list was given, never alphabetical or discovery order. Files are
/// read fresh on every call; nothing is cached between regions.
pub struct Amalgamator {
    sources: Vec<PathBuf>,
}

impl Amalgamator {
    pub fn new<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Amalgamates `region` across all sources.
    ///
    /// Non-empty per-file extractions are joined with a single blank
    /// line between contributions; files contributing nothing are
    /// skipped without inserting a separator. Returns the empty string
    /// when no file contributes. An unreadable source aborts the call.
    pub fn amalgamate(&self, region: &str, strip_comments: bool) -> Result<String> {
        let report = self.amalgamate_with_stats(region, strip_comments)?;
        Ok(report.body)
    }

    /// Like [`amalgamate`](Self::amalgamate), also reporting how many
    /// sources contributed.
    pub fn amalgamate_with_stats(
        &self,
        region: &str,
        strip_comments: bool,
    ) -> Result<RegionBody> {
        let markers = RegionMarkers::new(region)?;
        let mut contributions: Vec<String> = Vec::new();

        for path in &self.sources {
            let content = read_source(path)?;
            let extracted = extract_region(&content, &markers, strip_comments);
            if !extracted.is_empty() {
                contributions.push(extracted);
            }
        }

        Ok(RegionBody {
            contributing_sources: contributions.len(),
            body: contributions.join("\n"),
        })
    }
}

/// One region's amalgamated body plus contribution stats.
#[derive(Debug, Clone)]
pub struct RegionBody {
    pub body: String,
    pub contributing_sources: usize,
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| UnifileError::MissingSource {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_contributions_follow_source_order() {
        let dir = TempDir::new().unwrap();
        // Named so that alphabetical order would reverse them.
        let first = write_source(&dir, "z_first.h", "// {hex_b}\nx\n// {hex_e}\n");
        let second = write_source(&dir, "a_second.h", "// {hex_b}\ny\n// {hex_e}\n");

        let amalgamator = Amalgamator::new([first, second]);
        assert_eq!(amalgamator.amalgamate("hex", false).unwrap(), "x\n\ny\n");
    }

    #[test]
    fn test_non_contributing_file_adds_no_separator() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.h", "// {hex_b}\nx\n// {hex_e}\n");
        let b = write_source(&dir, "b.h", "nothing for hex here\n");
        let c = write_source(&dir, "c.h", "// {hex_b}\ny\n// {hex_e}\n");

        let amalgamator = Amalgamator::new([a, b, c]);
        assert_eq!(amalgamator.amalgamate("hex", false).unwrap(), "x\n\ny\n");
    }

    #[test]
    fn test_absent_region_yields_empty_string() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.h", "code\n");
        let b = write_source(&dir, "b.h", "more code\n");

        let amalgamator = Amalgamator::new([a, b]);
        assert_eq!(amalgamator.amalgamate("mini", false).unwrap(), "");
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.h", "// {hex_b}\nx\n// {hex_e}\n");
        let missing = dir.path().join("missing.h");

        let amalgamator = Amalgamator::new([a, missing]);
        let err = amalgamator.amalgamate("hex", false).unwrap_err();
        assert!(matches!(
            err,
            crate::error::UnifileError::MissingSource { .. }
        ));
    }

    #[test]
    fn test_contribution_stats() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.h", "// {dec_b}\nx\n// {dec_e}\n");
        let b = write_source(&dir, "b.h", "unrelated\n");

        let amalgamator = Amalgamator::new([a, b]);
        let body = amalgamator.amalgamate_with_stats("dec", false).unwrap();
        assert_eq!(body.contributing_sources, 1);
        assert_eq!(body.body, "x\n");
    }

    #[test]
    fn test_repeated_calls_are_deterministic() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.h", "// {hex_b}\nx\n// {hex_e}\n");

        let amalgamator = Amalgamator::new([a]);
        let first = amalgamator.amalgamate("hex", true).unwrap();
        let second = amalgamator.amalgamate("hex", true).unwrap();
        assert_eq!(first, second);
    }
}
