//! Report rendering: decodes a value against an `Enc` and assembles the
//! aligned name/value/border rows plus validation paragraphs.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use super::{Enc, Field, center};
use crate::error::ReprResult;
use crate::mode::{Format, Mode};
use crate::numeral::Numeral;
use crate::value::format_raw;

/// Options for [`Enc::report`].
///
/// `format` picks how decoded field values are shown; without one they
/// render as unprefixed binary digits zero-padded to the field width.
/// `borders` adds a third row with each field's bit boundaries.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportOptions {
    pub format: Option<Format>,
    pub borders: bool,
}

struct Column<'a> {
    field: &'a Field,
    decoded: BigInt,
    text: String,
    width: usize,
}

impl Enc {
    /// Decodes `value` and renders the report: field names, decoded values
    /// and optional bit borders as centered columns joined by two spaces,
    /// followed by any error, warning and verbose-label paragraphs.
    ///
    /// Malformed *data* is diagnosed inside the returned text, never as an
    /// error; the inspection itself only fails on a malformed numeral.
    pub fn report(
        &self,
        mode: &Mode,
        value: impl Into<Numeral>,
        options: ReportOptions,
    ) -> ReprResult<String> {
        let pattern = mode.pattern(value)?;
        let shown = options.format.unwrap_or(Format::Bin);

        let mut columns: Vec<Column<'_>> = Vec::with_capacity(self.fields().len());
        for field in self.fields().iter().rev() {
            let width = field.width() as usize;
            let decoded = (&pattern >> field.low_bit() as usize) & ((BigInt::one() << width) - 1);
            let text = match options.format {
                Some(format) => format_raw(&decoded, format).to_string(),
                None => format!("{decoded:0width$b}"),
            };
            let mut column_width = field.name().chars().count().max(text.chars().count());
            if options.borders {
                column_width = column_width.max(field.borders(0).len());
            }
            columns.push(Column {
                field,
                decoded,
                text,
                width: column_width,
            });
        }

        let row = |cells: Vec<String>| cells.join("  ");
        let mut lines = vec![
            row(columns
                .iter()
                .map(|c| center(c.field.name(), c.width))
                .collect()),
            row(columns.iter().map(|c| center(&c.text, c.width)).collect()),
        ];
        if options.borders {
            lines.push(row(columns
                .iter()
                .map(|c| c.field.borders(c.width))
                .collect()));
        }
        let mut out = lines.join("\n");

        for column in &columns {
            if column.field.wrong_code(&column.decoded) {
                out.push_str(&format!(
                    "\n\nError! Wrong code: {} = {}",
                    column.field, column.text
                ));
                let codes: Vec<String> = column
                    .field
                    .accepted_codes()
                    .into_iter()
                    .map(|code| format_raw(code, shown).to_string())
                    .collect();
                out.push_str(&format!("\nValid codes: {}", codes.join(", ")));
            }
        }

        for column in &columns {
            if column.field.is_invalid(&column.decoded) {
                out.push_str(&format!(
                    "\n\nError! Invalid value: {} = {}",
                    column.field, column.text
                ));
            }
        }

        let top_bit = self.top_bit();
        let remainder = &pattern >> (top_bit as usize + 1);
        if !remainder.is_zero() {
            out.push_str(&format!(
                "\n\nWarning! There are significant bits higher than {top_bit}: {}",
                format_raw(&remainder, shown)
            ));
        }

        let mut verbose = String::new();
        for column in &columns {
            if let Some(label) = column.field.verbose_label(&column.decoded) {
                verbose.push_str(&format!("\n{}:   {label}", column.field));
            }
        }
        if !verbose.is_empty() {
            out.push('\n');
            out.push_str(&verbose);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sethi() -> Enc {
        Enc::new(
            "sethi",
            &[("opc", 31), ("rd", 29), ("opc", 24), ("imm22", 21)],
        )
        .unwrap()
    }

    #[test]
    fn default_rendering_is_padded_binary_columns() {
        let report = sethi()
            .report(&Mode::DEFAULT, "17 00 04 0f", ReportOptions::default())
            .unwrap();
        assert_eq!(
            report,
            "opc   rd    opc          imm22         \n\
             00   01011  100  0000000000010000001111"
        );
    }

    #[test]
    fn explicit_format_renders_field_values() {
        let opts = ReportOptions {
            format: Some(Format::Hex),
            ..Default::default()
        };
        let report = sethi().report(&Mode::DEFAULT, "1700040f", opts).unwrap();
        assert_eq!(report, "opc  rd   opc  imm22\n0x0  0xb  0x4  0x40f");

        let opts = ReportOptions {
            format: Some(Format::Dec),
            ..Default::default()
        };
        let report = sethi().report(&Mode::DEFAULT, "1700040f", opts).unwrap();
        assert_eq!(report, "opc  rd  opc  imm22\n 0   11   4   1039 ");
    }

    #[test]
    fn border_row_shows_bit_ranges() {
        let opts = ReportOptions {
            borders: true,
            ..Default::default()
        };
        let report = sethi().report(&Mode::DEFAULT, "1700040f", opts).unwrap();
        assert_eq!(
            report,
            " opc    rd     opc           imm22         \n\
             \u{20}00    01011   100   0000000000010000001111\n\
             31-30  29-25  24-22  21-------------------0"
        );
    }

    #[test]
    fn one_bit_field_border_is_the_bare_index() {
        let enc = Enc::new("bla-bla", &[("long_long_name", 31), ("oth_name", 30)]).unwrap();
        let opts = ReportOptions {
            borders: true,
            ..Default::default()
        };
        let report = enc.report(&Mode::DEFAULT, 151330522, opts).unwrap();
        assert_eq!(
            report,
            "long_long_name             oth_name            \n\
             \u{20}     0         0001001000001010001111011011010\n\
             \u{20}     31        30----------------------------0"
        );
    }

    #[test]
    fn short_names_center_inside_wide_columns() {
        let enc = Enc::new("someth", &[("d", 7), ("ccccc", 4), ("B", 3), ("A", 0)]).unwrap();
        let report = enc
            .report(&Mode::DEFAULT, "a5", ReportOptions::default())
            .unwrap();
        assert_eq!(report, " d   ccccc   B   A\n101    0    010  1");
    }

    #[test]
    fn verbose_labels_append_as_a_trailing_paragraph() {
        let mut enc = sethi();
        enc.field_mut("opc", 24).unwrap().add_verbose("0b100", "four").unwrap();
        enc.field_mut("imm22", 21).unwrap().add_verbose("0b100", "four").unwrap();
        let report = enc
            .report(&Mode::DEFAULT, "1700040f", ReportOptions::default())
            .unwrap();
        assert!(report.ends_with("\n\nopc[24:22]:   four"));
        assert!(
            !report.contains("imm22[21:0]:"),
            "imm22 decodes to 0x40f, not 4, so its label must not fire"
        );
    }

    #[test]
    fn wrong_code_invalid_and_overflow_paragraphs() {
        let mut enc = sethi();
        enc.field_mut("opc", 31).unwrap().add_only_true(0).unwrap();
        enc.field_mut("opc", 31).unwrap().add_invalid(1.0).unwrap();
        enc.field_mut("rd", 29).unwrap().add_invalid(1.0).unwrap();
        enc.field_mut("opc", 24).unwrap().add_verbose("0b100", "four").unwrap();

        let mode = Mode::DEFAULT;
        let spoiled = mode.add("1700040f", 5u64 << 30, None).unwrap();
        let report = enc
            .report(&mode, spoiled, ReportOptions::default())
            .unwrap();
        assert_eq!(
            report,
            "opc   rd    opc          imm22         \n\
             01   01011  100  0000000000010000001111\n\
             \n\
             Error! Wrong code: opc[31:30] = 01\n\
             Valid codes: 0b0\n\
             \n\
             Error! Invalid value: opc[31:30] = 01\n\
             \n\
             Warning! There are significant bits higher than 31: 0b1\n\
             \n\
             opc[24:22]:   four"
        );

        let spoiled = mode.add("1700040f", 7u64 << 31, None).unwrap();
        let report = enc
            .report(&mode, spoiled, ReportOptions::default())
            .unwrap();
        assert!(report.contains("Error! Wrong code: opc[31:30] = 10"));
        assert!(
            !report.contains("Invalid value"),
            "opc decodes to 0b10 here, which is not in the invalid set"
        );
        assert!(report.contains("Warning! There are significant bits higher than 31: 0b11"));
    }

    #[test]
    fn valid_codes_render_in_the_display_format() {
        let mut enc = sethi();
        let opc = enc.field_mut("opc", 31).unwrap();
        opc.add_only_true(2).unwrap();
        opc.add_only_true(0).unwrap();
        let opts = ReportOptions {
            format: Some(Format::Hex),
            ..Default::default()
        };
        let report = enc
            .report(&Mode::DEFAULT, "5700040f", opts)
            .unwrap();
        assert!(report.contains("Error! Wrong code: opc[31:30] = 0x1"));
        assert!(report.contains("Valid codes: 0x0, 0x2"));
    }
}
