use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    #[error("{min} cannot be greater than {max}")]
    InvalidRange { min: &'static str, max: &'static str },
}
