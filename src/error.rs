use thiserror::Error;

pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Invalid week date: {0}")]
    InvalidDate(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Template mismatch: cannot diff a view for {left} against a view for {right}")]
    TemplateMismatch { left: String, right: String },
    #[error("Store write error: {0}")]
    StoreWrite(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Template error: {0}")]
    Template(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Pattern error: {0}")]
    Pattern(#[from] glob::PatternError),
}
