//! Named bit-field layouts: an `Enc` partitions a fixed-width value into
//! contiguous named fields for decoding and reporting.

mod report;

use std::fmt;

use ahash::{AHashMap, AHashSet};
use num_bigint::BigInt;
use smallvec::SmallVec;

pub use report::ReportOptions;

use crate::error::{ReprError, ReprResult};
use crate::numeral::Numeral;

/// A contiguous, named sub-range of bits within a larger value, together
/// with its accumulated annotations.
///
/// Annotation values are field-relative: they are parsed as unbounded
/// integers and compared against the decoded field value, never against the
/// whole record.
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    low: u32,
    high: u32,
    verbose: AHashMap<BigInt, String>,
    invalid: AHashSet<BigInt>,
    only_true: AHashSet<BigInt>,
}

impl Field {
    fn new(name: &str, low: u32, high: u32) -> Self {
        Self {
            name: name.to_string(),
            low,
            high,
            verbose: AHashMap::new(),
            invalid: AHashSet::new(),
            only_true: AHashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn low_bit(&self) -> u32 {
        self.low
    }

    pub fn high_bit(&self) -> u32 {
        self.high
    }

    pub fn width(&self) -> u32 {
        self.high - self.low + 1
    }

    /// Registers a display label for one decoded value of this field.
    pub fn add_verbose(
        &mut self,
        value: impl Into<Numeral>,
        label: impl Into<String>,
    ) -> ReprResult<()> {
        let value = value.into().normalize()?;
        self.verbose.insert(value, label.into());
        Ok(())
    }

    /// Marks a decoded value as invalid; reports flag it with an error line.
    pub fn add_invalid(&mut self, value: impl Into<Numeral>) -> ReprResult<()> {
        let value = value.into().normalize()?;
        self.invalid.insert(value);
        Ok(())
    }

    /// Adds a value to the only-valid set; once the set is non-empty, any
    /// decoded value outside it is reported as a wrong code.
    pub fn add_only_true(&mut self, value: impl Into<Numeral>) -> ReprResult<()> {
        let value = value.into().normalize()?;
        self.only_true.insert(value);
        Ok(())
    }

    pub(crate) fn verbose_label(&self, value: &BigInt) -> Option<&str> {
        self.verbose.get(value).map(String::as_str)
    }

    pub(crate) fn is_invalid(&self, value: &BigInt) -> bool {
        self.invalid.contains(value)
    }

    pub(crate) fn wrong_code(&self, value: &BigInt) -> bool {
        !self.only_true.is_empty() && !self.only_true.contains(value)
    }

    pub(crate) fn accepted_codes(&self) -> Vec<&BigInt> {
        let mut codes: Vec<&BigInt> = self.only_true.iter().collect();
        codes.sort();
        codes
    }

    /// The boundary annotation for this field's column: the bare bit number
    /// for a one-bit field, otherwise `high---low` stretched toward `length`
    /// with at least one dash.
    pub(crate) fn borders(&self, length: usize) -> String {
        if self.low == self.high {
            return center(&self.low.to_string(), length);
        }
        let high = self.high.to_string();
        let low = self.low.to_string();
        let dashes = length.saturating_sub(high.len() + low.len()).max(1);
        format!("{high}{}{low}", "-".repeat(dashes))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "{}[{}]", self.name, self.low)
        } else {
            write!(f, "{}[{}:{}]", self.name, self.high, self.low)
        }
    }
}

/// Encoding of some entity: a name plus fields that partition `[0, top_bit]`
/// into disjoint contiguous ranges, ordered lowest bits first.
#[derive(Clone, Debug)]
pub struct Enc {
    name: String,
    fields: SmallVec<[Field; 4]>,
}

impl Enc {
    /// Builds an encoding from `(field_name, high_bit)` pairs in any order.
    /// Pairs are sorted by high bit; each field starts right above the
    /// previous one, the first at bit 0.
    pub fn new(name: impl Into<String>, pairs: &[(&str, u32)]) -> ReprResult<Self> {
        let name = name.into();
        if pairs.is_empty() {
            return Err(ReprError::EmptyEncoding(name));
        }
        let mut sorted: SmallVec<[(&str, u32); 4]> = SmallVec::from_slice(pairs);
        sorted.sort_by_key(|entry| entry.1);

        let mut fields: SmallVec<[Field; 4]> = SmallVec::with_capacity(sorted.len());
        let mut low = 0u32;
        for (field_name, high) in sorted {
            if let Some(previous) = fields.last() {
                if previous.high_bit() == high {
                    return Err(ReprError::DuplicateFieldBoundary {
                        first: previous.name().to_string(),
                        second: field_name.to_string(),
                        bit: high,
                    });
                }
            }
            fields.push(Field::new(field_name, low, high));
            low = high + 1;
        }
        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields ordered lowest bits first.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn top_bit(&self) -> u32 {
        self.fields[self.fields.len() - 1].high_bit()
    }

    /// Looks a field up by its exact `(name, high_bit)` pair. A matching
    /// high bit under a different name is an integrity failure, not a match.
    pub fn field_mut(&mut self, name: &str, high_bit: u32) -> ReprResult<&mut Field> {
        match self
            .fields
            .iter_mut()
            .find(|field| field.high_bit() == high_bit)
        {
            Some(field) if field.name() == name => Ok(field),
            _ => Err(ReprError::FieldNotFound {
                name: name.to_string(),
                bit: high_bit,
            }),
        }
    }
}

impl fmt::Display for Enc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (index, field) in self.fields.iter().rev().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

/// Centers `text` in `width` columns, the extra space of an odd leftover
/// going to the right.
pub(crate) fn center(text: &str, width: usize) -> String {
    let length = text.chars().count();
    if length >= width {
        return text.to_string();
    }
    let pad = width - length;
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}
