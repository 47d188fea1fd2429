//! The interpretive context for every conversion: signedness, integer width,
//! and the default output format.

use crate::error::{ReprError, ReprResult};

/// Output format for rendered values.
///
/// The textual tags accepted by [`Format::from_tag`] are the single-letter
/// codes `d` (decimal), `h` (hexadecimal), `b` (binary) and `f` (float).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Dec,
    Hex,
    Bin,
    Float,
}

impl Format {
    pub fn from_tag(tag: &str) -> ReprResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "d" => Ok(Format::Dec),
            "h" => Ok(Format::Hex),
            "b" => Ok(Format::Bin),
            "f" => Ok(Format::Float),
            _ => Err(ReprError::InvalidFormat(tag.to_string())),
        }
    }

    pub fn tag(self) -> char {
        match self {
            Format::Dec => 'd',
            Format::Hex => 'h',
            Format::Bin => 'b',
            Format::Float => 'f',
        }
    }
}

/// The (signedness, width, default format) triple governing all conversions.
///
/// Passed explicitly to every operation; snapshotting is a plain copy. The
/// width counts the sign bit and must be greater than zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode {
    signed: bool,
    width: u32,
    format: Format,
}

impl Mode {
    /// Signed, 64 bits wide, hexadecimal output.
    pub const DEFAULT: Mode = Mode {
        signed: true,
        width: 64,
        format: Format::Hex,
    };

    pub fn new(signed: bool, width: u32, format: Format) -> ReprResult<Self> {
        if width == 0 {
            return Err(ReprError::InvalidConfiguration(
                "integer width must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            signed,
            width,
            format,
        })
    }

    /// Updates only the provided parameters, validating the width.
    pub fn set(
        &mut self,
        signed: Option<bool>,
        width: Option<u32>,
        format: Option<Format>,
    ) -> ReprResult<()> {
        if let Some(width) = width {
            if width == 0 {
                return Err(ReprError::InvalidConfiguration(
                    "integer width must be greater than zero".to_string(),
                ));
            }
            self.width = width;
        }
        if let Some(signed) = signed {
            self.signed = signed;
        }
        if let Some(format) = format {
            self.format = format;
        }
        Ok(())
    }

    pub fn get(&self) -> (bool, u32, Format) {
        (self.signed, self.width, self.format)
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::DEFAULT
    }
}
