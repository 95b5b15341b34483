use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnifileError {
    #[error("Cannot read source file: {path}")]
    MissingSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write output file: {path}")]
    UnwritableOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid region marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for UnifileError {
    fn user_message(&self) -> String {
        match self {
            UnifileError::MissingSource { path, source } => {
                format!("Cannot read source file {}: {}", path, source)
            }
            UnifileError::UnwritableOutput { path, source } => {
                format!("Cannot write output file {}: {}", path, source)
            }
            UnifileError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            UnifileError::Pattern(e) => {
                format!("Invalid region marker pattern: {}", e)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            UnifileError::MissingSource { .. } => Some(
                "Every file in the `sources` list must exist and be readable. Check the paths in your manifest, or run from the directory containing the sources.".to_string()
            ),
            UnifileError::UnwritableOutput { .. } => Some(
                "Ensure the output directory exists and is writable, or point --output-dir at a writable location.".to_string()
            ),
            UnifileError::Config { .. } => Some(
                "Check your manifest syntax. Run with --generate-config to produce a valid sample manifest.".to_string()
            ),
            UnifileError::Pattern(_) => Some(
                "Region names become part of a marker pattern; keep them to plain identifiers like \"hex\" or \"decm\".".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for UnifileError {
    fn from(error: toml::de::Error) -> Self {
        UnifileError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnifileError>;
