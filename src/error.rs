use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Invalid player '{name}': {reason}")]
    InvalidPlayer { name: String, reason: String },

    #[error("Duplicate player name: {0}")]
    DuplicatePlayer(String),

    #[error("Missing column '{0}' in roster file")]
    MissingColumn(String),

    #[error("Invalid lineup: {0}")]
    InvalidLineup(String),

    #[error("Roster is empty")]
    EmptyRoster,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LineupError>;
