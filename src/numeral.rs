//! Polymorphic numeral argument: decimal integer, hex string, binary string,
//! or float, all reducible to one unbounded integer.

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Num};

use crate::error::{ReprError, ReprResult};
use crate::value::Value;

/// A flexible literal accepted by every operation.
///
/// Strings are classified when the `Numeral` is built: after stripping all
/// whitespace, a `0b`/`0B` prefix (optionally behind a minus sign) selects
/// binary; everything else is hexadecimal with an optional `0x`/`0X` prefix.
#[derive(Clone, Debug, PartialEq)]
pub enum Numeral {
    Integer(BigInt),
    HexText(String),
    BinText(String),
    FloatValue(f64),
}

impl Numeral {
    /// Reduces the numeral to the canonical unbounded integer.
    ///
    /// Floats truncate toward zero; NaN and infinities are malformed.
    pub fn normalize(&self) -> ReprResult<BigInt> {
        match self {
            Numeral::Integer(value) => Ok(value.clone()),
            Numeral::HexText(text) => parse_radix(text, 16, ["0x", "0X"]),
            Numeral::BinText(text) => parse_radix(text, 2, ["0b", "0B"]),
            Numeral::FloatValue(value) => BigInt::from_f64(value.trunc())
                .ok_or_else(|| ReprError::MalformedNumeral(value.to_string())),
        }
    }
}

fn parse_radix(text: &str, radix: u32, prefixes: [&str; 2]) -> ReprResult<BigInt> {
    let malformed = || ReprError::MalformedNumeral(text.to_string());
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = body
        .strip_prefix(prefixes[0])
        .or_else(|| body.strip_prefix(prefixes[1]))
        .unwrap_or(body);
    if digits.is_empty() || digits.starts_with('-') || digits.starts_with('+') {
        return Err(malformed());
    }
    let value = BigInt::from_str_radix(digits, radix).map_err(|_| malformed())?;
    Ok(if negative { -value } else { value })
}

impl From<&str> for Numeral {
    fn from(text: &str) -> Self {
        let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let body = stripped.strip_prefix('-').unwrap_or(&stripped);
        if body.starts_with("0b") || body.starts_with("0B") {
            Numeral::BinText(stripped)
        } else {
            Numeral::HexText(stripped)
        }
    }
}

impl From<String> for Numeral {
    fn from(text: String) -> Self {
        Numeral::from(text.as_str())
    }
}

impl From<&String> for Numeral {
    fn from(text: &String) -> Self {
        Numeral::from(text.as_str())
    }
}

impl From<BigInt> for Numeral {
    fn from(value: BigInt) -> Self {
        Numeral::Integer(value)
    }
}

impl From<&BigInt> for Numeral {
    fn from(value: &BigInt) -> Self {
        Numeral::Integer(value.clone())
    }
}

impl From<f64> for Numeral {
    fn from(value: f64) -> Self {
        Numeral::FloatValue(value)
    }
}

impl From<f32> for Numeral {
    fn from(value: f32) -> Self {
        Numeral::FloatValue(value as f64)
    }
}

macro_rules! numeral_from_int {
    ( $( $int:ty ),+ ) => {
        $(
            impl From<$int> for Numeral {
                fn from(value: $int) -> Self {
                    Numeral::Integer(BigInt::from(value))
                }
            }
        )+
    };
}

numeral_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<Value> for Numeral {
    fn from(value: Value) -> Self {
        Numeral::from(&value)
    }
}

impl From<&Value> for Numeral {
    fn from(value: &Value) -> Self {
        match value {
            Value::Int(x) => Numeral::Integer(x.clone()),
            Value::Hex(text) => Numeral::HexText(text.clone()),
            Value::Bin(text) => Numeral::BinText(text.clone()),
            Value::Float(x) => Numeral::FloatValue(*x),
        }
    }
}
