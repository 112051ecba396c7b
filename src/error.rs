use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read the element table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse the element table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the element table contains no elements")]
    Empty,

    #[error("atomic number {0} appears more than once")]
    DuplicateNumber(u32),

    #[error("symbol \"{0}\" appears more than once")]
    DuplicateSymbol(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("no element with symbol \"{0}\"")]
    ElementNotFound(String),

    #[error("no quiz has been started")]
    QuizNotStarted,

    #[error("the quiz is already finished")]
    QuizFinished,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number, got \"{value}\"")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be one of {expected}, got \"{value}\"")]
    InvalidChoice {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}
