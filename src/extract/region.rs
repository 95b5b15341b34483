use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;

// A comment-only line: optional leading spaces, then `//`.
static COMMENT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *//").expect("Failed to compile COMMENT_LINE"));

/// Compiled begin/end matchers for one named region.
///
/// A region named `hex` is delimited by lines containing the literal
/// tokens `{hex_b}` and `{hex_e}`. Matching binds to the full bracketed
/// token, so the matcher for `dec` never fires on a `{decm_b}` line.
#[derive(Debug)]
pub struct RegionMarkers {
    begin: Regex,
    end: Regex,
}

impl RegionMarkers {
    pub fn new(region: &str) -> Result<Self> {
        let name = regex::escape(region);
        let begin = Regex::new(&format!(r"\{{{}_b\}}", name))?;
        let end = Regex::new(&format!(r"\{{{}_e\}}", name))?;
        Ok(Self { begin, end })
    }

    pub fn is_begin(&self, line: &str) -> bool {
        self.begin.is_match(line)
    }

    pub fn is_end(&self, line: &str) -> bool {
        self.end.is_match(line)
    }
}

/// Scan position relative to the region, local to a single extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside,
}

/// Extracts the span of `content` enclosed by `markers`.
///
/// Marker lines toggle the scan state and are never copied; a marker
/// match takes priority over content handling on the same line. A begin
/// marker with no matching end captures through end of file; an end
/// marker with no open span is ignored. A region absent from the file
/// yields an empty string.
///
/// Copied lines have each 4-space indent unit replaced by a single tab.
/// With `strip_comments` set, comment-only lines are dropped.
pub fn extract_region(content: &str, markers: &RegionMarkers, strip_comments: bool) -> String {
    let mut state = ScanState::Outside;
    let mut result = String::new();

    for line in content.lines() {
        if markers.is_begin(line) {
            state = ScanState::Inside;
        } else if markers.is_end(line) {
            state = ScanState::Outside;
        } else if state == ScanState::Inside {
            if strip_comments && COMMENT_LINE.is_match(line) {
                continue;
            }
            result.push_str(&line.replace("    ", "\t"));
            result.push('\n');
        }
    }

    result
}
