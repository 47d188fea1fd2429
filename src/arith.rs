//! Arithmetic and bitwise operations, all expressed by composing the
//! converter: operands come in through `logical`, results leave through
//! truncate-then-render, so the mode is re-applied on every operation.

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{ReprError, ReprResult};
use crate::mode::{Format, Mode};
use crate::numeral::Numeral;
use crate::value::{Value, big_to_f64};

/// Selects either a single bit or a contiguous `(low, high)` bit range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bits {
    Single(u32),
    Range(u32, u32),
}

impl From<u32> for Bits {
    fn from(index: u32) -> Self {
        Bits::Single(index)
    }
}

impl From<(u32, u32)> for Bits {
    fn from((low, high): (u32, u32)) -> Self {
        Bits::Range(low, high)
    }
}

impl Mode {
    pub fn add(
        &self,
        a: impl Into<Numeral>,
        b: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        Ok(self.reduce(self.logical(a)? + self.logical(b)?, format))
    }

    pub fn sub(
        &self,
        a: impl Into<Numeral>,
        b: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        Ok(self.reduce(self.logical(a)? - self.logical(b)?, format))
    }

    pub fn mul(
        &self,
        a: impl Into<Numeral>,
        b: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        Ok(self.reduce(self.logical(a)? * self.logical(b)?, format))
    }

    /// Division truncating toward zero.
    pub fn div(
        &self,
        a: impl Into<Numeral>,
        b: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        let divisor = self.logical(b)?;
        if divisor.is_zero() {
            return Err(ReprError::DivisionByZero);
        }
        Ok(self.reduce(self.logical(a)? / divisor, format))
    }

    /// True floating-point quotient of the logical operands; the result is
    /// not truncated back to the mode width.
    pub fn div_float(&self, a: impl Into<Numeral>, b: impl Into<Numeral>) -> ReprResult<f64> {
        let divisor = self.logical(b)?;
        if divisor.is_zero() {
            return Err(ReprError::DivisionByZero);
        }
        Ok(big_to_f64(&self.logical(a)?) / big_to_f64(&divisor))
    }

    /// Remainder of truncating division; takes the dividend's sign.
    pub fn rem(
        &self,
        a: impl Into<Numeral>,
        b: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        let divisor = self.logical(b)?;
        if divisor.is_zero() {
            return Err(ReprError::DivisionByZero);
        }
        Ok(self.reduce(self.logical(a)? % divisor, format))
    }

    pub fn and(
        &self,
        a: impl Into<Numeral>,
        b: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        Ok(self.reduce(self.logical(a)? & self.logical(b)?, format))
    }

    pub fn or(
        &self,
        a: impl Into<Numeral>,
        b: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        Ok(self.reduce(self.logical(a)? | self.logical(b)?, format))
    }

    pub fn xor(
        &self,
        a: impl Into<Numeral>,
        b: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        Ok(self.reduce(self.logical(a)? ^ self.logical(b)?, format))
    }

    /// Bitwise inversion: XOR with -1.
    pub fn not(&self, a: impl Into<Numeral>, format: Option<Format>) -> ReprResult<Value> {
        self.xor(a, -1, format)
    }

    /// Logical left shift. The count itself is mode-converted, so a count at
    /// or past the width shifts every bit out.
    pub fn shl(
        &self,
        a: impl Into<Numeral>,
        count: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        let count = self.shift_amount(count)?;
        Ok(self.reduce(self.logical(a)? << count, format))
    }

    /// Right shift of the logical value; sign-extending under signed mode.
    pub fn shr(
        &self,
        a: impl Into<Numeral>,
        count: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        let count = self.shift_amount(count)?;
        Ok(self.reduce(self.logical(a)? >> count, format))
    }

    // Shift counts go through the same width truncation as values. A count
    // that comes out negative under a signed mode cannot be applied; counts
    // at or past the width clamp to the width, which leaves the truncated
    // result unchanged.
    fn shift_amount(&self, count: impl Into<Numeral>) -> ReprResult<usize> {
        let count = self.logical(count)?;
        if count.is_negative() {
            return Err(ReprError::ShiftOutOfRange(count));
        }
        let width = self.width() as usize;
        Ok(count.to_usize().map_or(width, |n| n.min(width)))
    }

    /// An integer with bits `[low, high]` set, truncated to the mode width.
    /// The bounds are themselves mode-converted before use.
    pub fn mask(
        &self,
        low: impl Into<Numeral>,
        high: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        let pattern = self.mask_pattern(&self.logical(low)?, &self.logical(high)?)?;
        Ok(self.render(&pattern, format))
    }

    // `((-1) << low) & !((-1) << (high + 1))` over unbounded integers, then
    // truncated: bits [low, high] clipped to the width. `high = -1` is an
    // empty mask; bounds below that cannot be shifted by.
    pub(crate) fn mask_pattern(&self, low: &BigInt, high: &BigInt) -> ReprResult<BigInt> {
        if low.is_negative() {
            return Err(ReprError::ShiftOutOfRange(low.clone()));
        }
        let above = high + BigInt::one();
        if above.is_negative() {
            return Err(ReprError::ShiftOutOfRange(high.clone()));
        }
        let width = self.width() as usize;
        let from = low.to_usize().map_or(width, |n| n.min(width));
        let until = above.to_usize().map_or(width, |n| n.min(width));
        if until <= from {
            return Ok(BigInt::zero());
        }
        let ones = |bits: usize| (BigInt::one() << bits) - 1;
        Ok(ones(until) - ones(from))
    }

    // The mask as the arithmetic engine consumes it: the logical value of the
    // truncated mask pattern, negative when it covers the sign bit.
    fn range_mask(&self, low: u32, high: u32) -> ReprResult<BigInt> {
        let pattern = self.mask_pattern(&self.logical(low)?, &self.logical(high)?)?;
        Ok(self.logical_of_pattern(pattern))
    }

    /// Extracts a bit or bit range of `a`, right-aligned.
    pub fn get_bits(
        &self,
        a: impl Into<Numeral>,
        bits: impl Into<Bits>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        let value = self.logical(a)?;
        let raw = match bits.into() {
            Bits::Single(index) => (value & (BigInt::one() << index as usize)) >> index as usize,
            Bits::Range(low, high) => (value & self.range_mask(low, high)?) >> low as usize,
        };
        Ok(self.reduce(raw, format))
    }

    /// Clears the selected bits of `a` and ORs in `value` shifted into
    /// position and masked to the target range.
    pub fn set_bits(
        &self,
        a: impl Into<Numeral>,
        bits: impl Into<Bits>,
        value: impl Into<Numeral>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        let target = self.logical(a)?;
        let value = self.logical(value)?;
        let raw = match bits.into() {
            Bits::Single(index) => {
                let mask = BigInt::one() << index as usize;
                (target & !&mask) | ((value << index as usize) & mask)
            }
            Bits::Range(low, high) => {
                let mask = self.range_mask(low, high)?;
                (target & !&mask) | ((value << low as usize) & mask)
            }
        };
        Ok(self.reduce(raw, format))
    }

    /// Sets the selected bits of `a` to all ones.
    pub fn fill_bits(
        &self,
        a: impl Into<Numeral>,
        bits: impl Into<Bits>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        self.set_bits(a, bits, -1, format)
    }

    /// Sets the selected bits of `a` to zero.
    pub fn clear_bits(
        &self,
        a: impl Into<Numeral>,
        bits: impl Into<Bits>,
        format: Option<Format>,
    ) -> ReprResult<Value> {
        self.set_bits(a, bits, 0, format)
    }

    /// Smallest representable integer under the current mode.
    pub fn int_min(&self, format: Option<Format>) -> Value {
        if self.signed() {
            self.reduce(self.signed_bound(), format)
        } else {
            self.reduce(BigInt::zero(), format)
        }
    }

    /// Largest representable integer under the current mode.
    pub fn int_max(&self, format: Option<Format>) -> Value {
        if self.signed() {
            self.reduce(!self.signed_bound(), format)
        } else {
            self.reduce(BigInt::from(-1), format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(signed: bool, width: u32, format: Format) -> Mode {
        Mode::new(signed, width, format).unwrap()
    }

    #[test]
    fn results_chain_as_operands() {
        let mode = Mode::DEFAULT;
        let inner = mode.add("a", 11, None).unwrap();
        assert_eq!(inner.to_string(), "0x15");
        assert_eq!(mode.sub("0b100000", inner, None).unwrap().to_string(), "0xb");
    }

    #[test]
    fn width_four_signed_arithmetic_wraps() {
        let mode = mode(true, 4, Format::Hex);
        assert_eq!(mode.add(15, 15, None).unwrap().to_string(), "0xe");
        assert_eq!(mode.sub(1, 15, None).unwrap().to_string(), "0x2");
        assert_eq!(
            mode.add(7, 1.0, Some(Format::Bin)).unwrap().to_string(),
            "0b1000"
        );
        assert_eq!(mode.mul("0b1000", "0b111", None).unwrap().to_string(), "0x8");
        assert_eq!(
            mode.mul("0b1000", "0b111", Some(Format::Float)).unwrap(),
            Value::Float(-8.0)
        );
        assert_eq!(
            mode.add(7, 7, Some(Format::Dec)).unwrap(),
            Value::Int(BigInt::from(-2))
        );
        assert_eq!(
            mode.sub(1, 2, Some(Format::Dec)).unwrap(),
            Value::Int(BigInt::from(-1))
        );
    }

    #[test]
    fn width_four_unsigned_arithmetic() {
        let mode = mode(false, 4, Format::Hex);
        assert_eq!(
            mode.add(7, 7, Some(Format::Dec)).unwrap(),
            Value::Int(BigInt::from(14))
        );
        assert_eq!(mode.sub(1, 2, None).unwrap().to_string(), "0xf");
        assert_eq!(
            mode.sub(1, 2, Some(Format::Dec)).unwrap(),
            Value::Int(BigInt::from(15))
        );
        assert_eq!(mode.sub(1, 1000, None).unwrap().to_string(), "0x9");
    }

    #[test]
    fn division_truncates_toward_zero() {
        let mode = mode(true, 8, Format::Dec);
        assert_eq!(mode.div(-7, 2, None).unwrap(), Value::Int(BigInt::from(-3)));
        assert_eq!(mode.div(7, -2, None).unwrap(), Value::Int(BigInt::from(-3)));
        assert_eq!(mode.rem(-7, 2, None).unwrap(), Value::Int(BigInt::from(-1)));
        assert_eq!(mode.rem(7, -2, None).unwrap(), Value::Int(BigInt::from(1)));
        assert!(matches!(
            mode.div(1, 0, None),
            Err(ReprError::DivisionByZero)
        ));
        assert!(matches!(mode.rem(1, 0, None), Err(ReprError::DivisionByZero)));
    }

    #[test]
    fn float_division_keeps_the_fraction() {
        let mode = Mode::DEFAULT;
        assert_eq!(mode.div_float(7, 2).unwrap(), 3.5);
        assert_eq!(mode.div_float(-8, 2).unwrap(), -4.0);
        assert!(matches!(
            mode.div_float(1, 0),
            Err(ReprError::DivisionByZero)
        ));
    }

    #[test]
    fn shift_counts_are_mode_converted() {
        let mode = mode(false, 4, Format::Hex);
        // 17 truncates to 1 under width 4, so this is a shift by one.
        assert_eq!(mode.shl(1, 17, None).unwrap().to_string(), "0x2");
        // -1 reinterprets as 15 under the unsigned mode and shifts all out.
        assert_eq!(mode.shl(1, -1, None).unwrap().to_string(), "0x0");

        let signed = Mode::new(true, 4, Format::Hex).unwrap();
        assert!(matches!(
            signed.shl(1, -1, None),
            Err(ReprError::ShiftOutOfRange(_))
        ));
    }

    #[test]
    fn right_shift_sign_extends_under_signed_mode() {
        let mode = mode(true, 4, Format::Dec);
        assert_eq!(mode.shr(-8, 1, None).unwrap(), Value::Int(BigInt::from(-4)));
        let unsigned = Mode::new(false, 4, Format::Dec).unwrap();
        assert_eq!(unsigned.shr(8, 1, None).unwrap(), Value::Int(BigInt::from(4)));
    }

    #[test]
    fn bitwise_operations() {
        let mode = mode(true, 64, Format::Float);
        assert_eq!(
            mode.and(204, 694, Some(Format::Hex)).unwrap().to_string(),
            "0x84"
        );
        assert_eq!(
            mode.or(204, 694, Some(Format::Hex)).unwrap().to_string(),
            "0x2fe"
        );
        assert_eq!(
            mode.xor(204, 694, Some(Format::Hex)).unwrap().to_string(),
            "0x27a"
        );
        assert_eq!(
            mode.mask(1, 3, Some(Format::Bin)).unwrap().to_string(),
            "0b1110"
        );
    }

    #[test]
    fn mask_bounds_are_mode_converted() {
        let mode = mode(true, 8, Format::Hex);
        assert_eq!(mode.mask(0, 7, None).unwrap().to_string(), "0xff");
        assert_eq!(mode.mask(4, 100, None).unwrap().to_string(), "0xf0");
        // high = -1 selects the range just below bit zero: an empty mask.
        assert_eq!(mode.mask(0, -1, None).unwrap().to_string(), "0x0");
        assert!(matches!(
            mode.mask(-1, 3, None),
            Err(ReprError::ShiftOutOfRange(_))
        ));
    }

    #[test]
    fn inversion_honors_width_and_format() {
        let mode = mode(false, 8, Format::Hex);
        assert_eq!(mode.not(0, None).unwrap().to_string(), "0xff");
        assert_eq!(mode.not(1, None).unwrap().to_string(), "0xfe");
        assert_eq!(mode.not(-2, None).unwrap().to_string(), "0x1");
        assert_eq!(mode.not(0, Some(Format::Bin)).unwrap().to_string(), "0b11111111");
        let signed = Mode::new(true, 8, Format::Hex).unwrap();
        assert_eq!(signed.not(0, None).unwrap().to_string(), "0xff");
    }

    #[test]
    fn bit_extraction_and_assignment() {
        let mode = Mode::DEFAULT;
        assert_eq!(
            mode.get_bits(694, 7, Some(Format::Dec)).unwrap(),
            Value::Int(BigInt::from(1))
        );
        assert_eq!(
            mode.get_bits(694, (3, 7), Some(Format::Bin)).unwrap().to_string(),
            "0b10110"
        );
        assert_eq!(
            mode.set_bits(694, 1, 0, Some(Format::Hex)).unwrap().to_string(),
            "0x2b4"
        );
        assert_eq!(
            mode.fill_bits(694, (2, 7), Some(Format::Hex)).unwrap().to_string(),
            "0x2fe"
        );
        assert_eq!(
            mode.set_bits(694, (2, 7), "0b010101", Some(Format::Bin))
                .unwrap()
                .to_string(),
            "0b1001010110"
        );
        assert_eq!(
            mode.clear_bits("0b10100", 2, Some(Format::Dec)).unwrap(),
            Value::Int(BigInt::from(16))
        );
    }

    #[test]
    fn extremes_follow_the_mode() {
        let mut mode = mode(false, 6, Format::Bin);
        assert_eq!(mode.int_min(None).to_string(), "0b0");
        assert_eq!(mode.int_max(None).to_string(), "0b111111");
        mode.set(Some(true), None, None).unwrap();
        assert_eq!(mode.int_min(None).to_string(), "0b100000");
        assert_eq!(mode.int_max(None).to_string(), "0b11111");
        assert_eq!(
            mode.add(mode.int_min(None), mode.int_max(None), Some(Format::Dec))
                .unwrap(),
            Value::Int(BigInt::from(-1))
        );
        assert_eq!(
            mode.sub(mode.int_min(None), 1, Some(Format::Dec)).unwrap(),
            mode.int_max(Some(Format::Dec))
        );
    }
}
