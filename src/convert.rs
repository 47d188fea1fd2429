//! Two's-complement conversion: truncating numerals to the mode width,
//! reinterpreting the sign, and rendering bit patterns back to text.

use num_bigint::BigInt;
use num_traits::{One, Signed};
use smallvec::SmallVec;

use crate::error::ReprResult;
use crate::mode::{Format, Mode};
use crate::numeral::Numeral;
use crate::value::{Value, big_to_f64, format_raw};

impl Mode {
    /// `2^width`.
    pub(crate) fn modulus(&self) -> BigInt {
        BigInt::one() << self.width() as usize
    }

    /// `2^(width-1)`, the smallest pattern with the sign bit set.
    pub(crate) fn signed_bound(&self) -> BigInt {
        BigInt::one() << (self.width() - 1) as usize
    }

    /// Reduces a raw integer to the mode width. Negative inputs wrap via
    /// two's complement, so the result is always in `[0, 2^width)`.
    pub(crate) fn truncate(&self, raw: &BigInt) -> BigInt {
        raw & &(self.modulus() - 1)
    }

    pub(crate) fn logical_of_pattern(&self, pattern: BigInt) -> BigInt {
        if self.signed() && pattern >= self.signed_bound() {
            pattern - self.modulus()
        } else {
            pattern
        }
    }

    /// Parses a numeral and truncates it to the mode width: the bit pattern.
    pub fn pattern(&self, input: impl Into<Numeral>) -> ReprResult<BigInt> {
        Ok(self.truncate(&input.into().normalize()?))
    }

    /// Parses a numeral and yields the logical value the mode assigns to its
    /// bit pattern: negative when signed and the high bit is set.
    pub fn logical(&self, input: impl Into<Numeral>) -> ReprResult<BigInt> {
        let pattern = self.pattern(input)?;
        Ok(self.logical_of_pattern(pattern))
    }

    /// Renders a non-negative bit pattern.
    ///
    /// Under a signed mode a pattern with its high bit set renders as the
    /// negated two's complement when the format is decimal or float; hex and
    /// binary always show the pattern itself. Unsigned modes never negate.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is negative; patterns are produced by
    /// [`Mode::pattern`] and are non-negative by construction.
    pub fn render(&self, pattern: &BigInt, format: Option<Format>) -> Value {
        assert!(
            !pattern.is_negative(),
            "bit pattern must be non-negative, got {pattern}"
        );
        let format = format.unwrap_or(self.format());
        if self.signed()
            && matches!(format, Format::Dec | Format::Float)
            && *pattern >= self.signed_bound()
        {
            let magnitude = self.modulus() - pattern;
            return match format {
                Format::Dec => Value::Int(-magnitude),
                Format::Float => Value::Float(-big_to_f64(&magnitude)),
                Format::Hex | Format::Bin => unreachable!(),
            };
        }
        format_raw(pattern, format)
    }

    /// Truncate-then-render: the two's-complement representation of any
    /// numeral in the requested (or default) format.
    pub fn repr(&self, input: impl Into<Numeral>, format: Option<Format>) -> ReprResult<Value> {
        let pattern = self.pattern(input)?;
        Ok(self.render(&pattern, format))
    }

    /// Truncates an already-parsed raw integer and renders it. Every
    /// arithmetic result funnels through here so the mode is re-applied on
    /// each operation.
    pub(crate) fn reduce(&self, raw: BigInt, format: Option<Format>) -> Value {
        self.render(&self.truncate(&raw), format)
    }

    /// Splits the bit pattern of `input` into 8-bit groups, most significant
    /// byte first. Without a format each group is eight binary digits;
    /// zero still yields one group.
    pub fn byte_groups(
        &self,
        input: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Vec<String>> {
        let pattern = self.pattern(input)?;
        let count = pattern.bits().div_ceil(8).max(1);
        let byte = BigInt::from(0xff);
        let mut groups = Vec::with_capacity(count as usize);
        for index in (0..count).rev() {
            let chunk = (&pattern >> (index * 8) as usize) & &byte;
            groups.push(match format {
                Some(format) => format_raw(&chunk, format).to_string(),
                None => format!("{chunk:08b}"),
            });
        }
        Ok(groups)
    }

    /// Splits the bit pattern of `input` at the given field boundaries (each
    /// entry is the last bit number of a field, in any order) and returns the
    /// groups most significant field first. Without a format each group is
    /// zero-padded binary at its field width. Bits above the highest boundary
    /// are dropped.
    pub fn field_groups(
        &self,
        input: impl Into<Numeral>,
        ends: &[u32],
        format: Option<Format>,
    ) -> ReprResult<Vec<String>> {
        let pattern = self.pattern(input)?;
        let mut sorted: SmallVec<[u32; 8]> = SmallVec::from_slice(ends);
        sorted.sort_unstable();
        let mut groups = Vec::with_capacity(sorted.len());
        let mut low = 0u32;
        for &end in &sorted {
            let width = (end + 1).saturating_sub(low) as usize;
            let chunk = (&pattern >> low as usize) & ((BigInt::one() << width) - 1);
            groups.push(match format {
                Some(format) => format_raw(&chunk, format).to_string(),
                None => format!("{chunk:0width$b}"),
            });
            low = end + 1;
        }
        groups.reverse();
        Ok(groups)
    }
}
