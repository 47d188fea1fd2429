//! Fixed-width two's-complement integer arithmetic and bit-field decoding.
//!
//! Values arrive as flexible literals (decimal, hex with or without `0x`,
//! `0b` binary, or float), are reduced to an unbounded integer, and are then
//! interpreted under an explicit [`Mode`] — a (signedness, width, format)
//! triple that every conversion re-applies. An [`Enc`] names the bit fields
//! of an instruction word so a raw value can be rendered as an aligned,
//! annotated breakdown.
//!
//! ```
//! use bitrep::{Enc, Mode, ReportOptions};
//!
//! let mode = Mode::DEFAULT; // signed, 64 bits, hex output
//! assert_eq!(mode.add("a", 11, None).unwrap().to_string(), "0x15");
//!
//! let enc = Enc::new(
//!     "sethi",
//!     &[("opc", 31), ("rd", 29), ("opc", 24), ("imm22", 21)],
//! )
//! .unwrap();
//! let report = enc
//!     .report(&mode, "1700040f", ReportOptions { borders: true, ..Default::default() })
//!     .unwrap();
//! assert!(report.contains("21-------------------0"));
//! ```

pub mod arith;
pub mod enc;
pub mod error;
pub mod mode;
pub mod numeral;
pub mod value;

mod convert;

pub use crate::arith::Bits;
pub use crate::enc::{Enc, Field, ReportOptions};
pub use crate::error::{ReprError, ReprResult};
pub use crate::mode::{Format, Mode};
pub use crate::numeral::Numeral;
pub use crate::value::Value;
