use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChoiceError>;

#[derive(Debug, Error)]
pub enum ChoiceError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("no closed form: {0}")]
    NoClosedForm(String),
    #[error("expected a numeric value: {0}")]
    NonNumeric(String),
    #[error("chart rendering failed: {0}")]
    Render(String),
}
