//! Color literals and palette merging for theme descriptors.

use crate::diagnostics::INVALID_COLOR_LITERAL;
use crate::{Argb, Diagnostic, PaletteEntry, ThemeColor};

/// Fallback palette, in its fixed ordinal order.
pub const BASE_PALETTE: &[(&str, Argb)] = &[
    ("Background", Argb::new(255, 30, 30, 30)),
    ("Foreground", Argb::new(255, 220, 220, 220)),
    ("Primary", Argb::new(255, 0, 120, 215)),
    ("Secondary", Argb::new(255, 45, 45, 48)),
    ("Accent", Argb::new(255, 0, 153, 204)),
    ("Border", Argb::new(255, 90, 90, 90)),
    ("Error", Argb::new(255, 232, 17, 35)),
    ("Warning", Argb::new(255, 255, 185, 0)),
    ("Success", Argb::new(255, 16, 124, 16)),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected 6 or 8 hex digits, found {0} characters")]
    Length(usize),
    #[error("'{0}' contains non-hex characters")]
    NotHex(String),
}

/// Parse `#RRGGBB` (opaque) or `#AARRGGBB`.
///
/// Surrounding whitespace and double quotes are ignored, as is a single
/// leading `#`.
pub fn parse_color(literal: &str) -> Result<Argb, ColorParseError> {
    let digits = literal.trim().trim_matches('"');
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorParseError::Length(digits.chars().count()));
    }
    if !regex!(r"^[0-9A-Fa-f]+$").is_match(digits) {
        return Err(ColorParseError::NotHex(digits.to_string()));
    }

    // All-ASCII hex from here on, so byte slicing is safe.
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorParseError::NotHex(digits.to_string()));

    if digits.len() == 6 {
        Ok(Argb::new(255, byte(0)?, byte(2)?, byte(4)?))
    } else {
        Ok(Argb::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?))
    }
}

/// Merge declared entries over `fallback`.
///
/// Starts from `fallback` in order, overwrites matching keys in place, then
/// appends new keys in declaration order. An entry whose value does not parse
/// produces one diagnostic and leaves the key at its prior value.
pub fn merge_palette(
    fallback: &[(&str, Argb)],
    entries: &[PaletteEntry],
    report: &mut Vec<Diagnostic>,
) -> Vec<ThemeColor> {
    let mut colors: Vec<ThemeColor> =
        fallback.iter().map(|(key, argb)| ThemeColor { key: (*key).to_string(), argb: *argb }).collect();

    for entry in entries {
        let key = entry.key.trim().trim_matches('"');

        let argb = match parse_color(&entry.value) {
            Ok(argb) => argb,
            Err(err) => {
                log::debug!("palette entry '{key}' rejected: {err}");
                report.push(Diagnostic::new(&INVALID_COLOR_LITERAL, entry.location.clone(), [key, entry.value.trim()]));
                continue;
            }
        };

        match colors.iter_mut().find(|c| c.key == key) {
            Some(existing) => existing.argb = argb,
            None => colors.push(ThemeColor { key: key.to_string(), argb }),
        }
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(key: &str, value: &str) -> PaletteEntry {
        PaletteEntry { key: key.to_string(), value: value.to_string(), location: None }
    }

    #[test]
    fn six_digits_are_opaque_rgb() {
        assert_eq!(parse_color("#112233"), Ok(Argb::new(255, 0x11, 0x22, 0x33)));
    }

    #[test]
    fn eight_digits_are_argb() {
        assert_eq!(parse_color("#8090A0B0"), Ok(Argb::new(0x80, 0x90, 0xA0, 0xB0)));
    }

    #[test]
    fn quotes_and_missing_hash_are_accepted() {
        assert_eq!(parse_color("\"#0000ff\""), Ok(Argb::new(255, 0, 0, 255)));
        assert_eq!(parse_color("0000ff"), Ok(Argb::new(255, 0, 0, 255)));
    }

    #[test]
    fn malformed_literals_fail() {
        assert_eq!(parse_color("notahex"), Err(ColorParseError::Length(7)));
        assert_eq!(parse_color("#12345"), Err(ColorParseError::Length(5)));
        assert_eq!(parse_color("#GG2233"), Err(ColorParseError::NotHex("GG2233".into())));
        assert!(parse_color("#ééé").is_err());
    }

    #[test]
    fn override_keeps_position_and_new_keys_append() {
        let fallback = [("Background", Argb::new(255, 0, 0, 0)), ("Foreground", Argb::new(255, 1, 1, 1))];
        let mut report = Vec::new();
        let colors = merge_palette(&fallback, &[entry("Foreground", "#112233"), entry("Brand", "#445566")], &mut report);

        let keys: Vec<&str> = colors.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["Background", "Foreground", "Brand"]);
        assert_eq!(colors[1].argb, Argb::new(255, 0x11, 0x22, 0x33));
        assert!(report.is_empty());
    }

    #[test]
    fn invalid_entry_reports_once_and_keeps_prior_value() {
        let fallback = [("Background", Argb::new(255, 9, 9, 9))];
        let mut report = Vec::new();
        let colors = merge_palette(
            &fallback,
            &[entry("Background", "notahex"), entry("Brand", "#010203"), entry("Brand", "bad")],
            &mut report,
        );

        assert_eq!(colors[0].argb, Argb::new(255, 9, 9, 9));
        assert_eq!(colors[1].argb, Argb::new(255, 1, 2, 3));
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].code, INVALID_COLOR_LITERAL.code);
        assert_eq!(report[0].args, ["Background", "notahex"]);
    }

    proptest! {
        #[test]
        fn rgb_literals_round_trip(r: u8, g: u8, b: u8) {
            let literal = format!("#{r:02X}{g:02x}{b:02X}");
            prop_assert_eq!(parse_color(&literal), Ok(Argb::new(255, r, g, b)));
        }

        #[test]
        fn wrong_lengths_never_parse(s in "[0-9a-f]{0,12}") {
            prop_assume!(s.len() != 6 && s.len() != 8);
            prop_assert!(parse_color(&s).is_err());
        }
    }
}
