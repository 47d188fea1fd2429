use std::fmt;

use num_bigint::BigInt;

pub type ReprResult<T> = Result<T, ReprError>;

/// Represents any failure that can occur while configuring a mode, parsing a
/// numeral, applying an operation, or building an encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReprError {
    InvalidConfiguration(String),
    MalformedNumeral(String),
    InvalidFormat(String),
    DuplicateFieldBoundary { first: String, second: String, bit: u32 },
    FieldNotFound { name: String, bit: u32 },
    EmptyEncoding(String),
    DivisionByZero,
    ShiftOutOfRange(BigInt),
}

impl fmt::Display for ReprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReprError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            ReprError::MalformedNumeral(text) => write!(f, "malformed numeral: {text:?}"),
            ReprError::InvalidFormat(tag) => write!(f, "unrecognized format tag: {tag:?}"),
            ReprError::DuplicateFieldBoundary { first, second, bit } => write!(
                f,
                "fields '{first}' and '{second}' both end at bit {bit}"
            ),
            ReprError::FieldNotFound { name, bit } => {
                write!(f, "no field named '{name}' with high bit {bit}")
            }
            ReprError::EmptyEncoding(name) => {
                write!(f, "encoding '{name}' declares no fields")
            }
            ReprError::DivisionByZero => write!(f, "division by zero"),
            ReprError::ShiftOutOfRange(count) => {
                write!(f, "shift count {count} is negative or out of range")
            }
        }
    }
}

impl std::error::Error for ReprError {}
