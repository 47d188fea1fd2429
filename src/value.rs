//! Rendered results: the decimal/hex/binary/float union produced by every
//! formatting operation.

use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::mode::Format;

/// A value rendered in one of the four output formats.
///
/// Hex and binary carry their `0x`/`0b` prefix in lowercase. `Display`
/// writes the text a caller would print; floats keep their decimal point
/// (`-8.0`, not `-8`).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(BigInt),
    Hex(String),
    Bin(String),
    Float(f64),
}

impl Value {
    pub fn format(&self) -> Format {
        match self {
            Value::Int(_) => Format::Dec,
            Value::Hex(_) => Format::Hex,
            Value::Bin(_) => Format::Bin,
            Value::Float(_) => Format::Float,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(x) => write!(f, "{x}"),
            Value::Hex(text) | Value::Bin(text) => f.write_str(text),
            Value::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// Formats an integer directly in the requested format, with no
/// sign reinterpretation. The two's-complement branch lives in
/// [`crate::mode::Mode::render`]; this is the raw formatting tail.
pub(crate) fn format_raw(value: &BigInt, format: Format) -> Value {
    match format {
        Format::Dec => Value::Int(value.clone()),
        Format::Hex => Value::Hex(format!("{value:#x}")),
        Format::Bin => Value::Bin(format!("{value:#b}")),
        Format::Float => Value::Float(big_to_f64(value)),
    }
}

pub(crate) fn big_to_f64(value: &BigInt) -> f64 {
    value.to_f64().unwrap_or(f64::INFINITY)
}
