use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid header format: '{value}'. Expected 'Key: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Invalid query format: '{value}'. Expected 'key=value'")]
    InvalidQueryFormat { value: String },
    #[error("Missing URL (set --url or provide it in the config file).")]
    MissingUrl,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Delay must not be empty.")]
    DelayEmpty,
    #[error("Invalid delay '{value}'.")]
    InvalidDelay { value: String },
    #[error("Invalid delay unit '{unit}'. Use ms, s, or m.")]
    InvalidDelayUnit { unit: String },
    #[error("Delay overflow.")]
    DelayOverflow,
}
