// crates/form-resolver-core/src/runtime/date_format.rs
// ============================================================================
// Module: Date Format Translation
// Description: Format timestamps using `Y-m-d` style pattern letters.
// Purpose: Render bound dates in the format declared on date picker fields.
// Dependencies: time, thiserror
// ============================================================================

//! ## Overview
//! Templates declare date formats with single-letter tokens (`d-m-Y`,
//! `Y-m-d H:i`) shared with the front-end picker. Each token is translated into
//! a `time` format description component. Non-letters are literal, a
//! backslash escapes the following character, and an unescaped ASCII letter
//! without a translation is rejected. Values are rendered as UTC.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use time::Date;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::UtcOffset;
use time::format_description;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Format applied when a date picker declares none.
pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d";
/// Stored date-time layout with a space separator.
const STORED_DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
/// Stored date-time layout with a `T` separator and no offset.
const STORED_ISO_DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
/// Stored calendar date.
const STORED_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Date formatting errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    /// The pattern has no translation or its description was rejected.
    #[error("invalid date format `{pattern}`: {reason}")]
    Invalid {
        /// Pattern as declared.
        pattern: String,
        /// Rejection reason.
        reason: String,
    },
    /// The value could not be rendered with the pattern.
    #[error("cannot format date with `{pattern}`: {reason}")]
    Format {
        /// Pattern as declared.
        pattern: String,
        /// Formatter message.
        reason: String,
    },
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Returns the format description component for a pattern letter.
const fn component(token: char) -> Option<&'static str> {
    let component = match token {
        'd' => "[day]",
        'j' => "[day padding:none]",
        'D' => "[weekday repr:short]",
        'l' => "[weekday]",
        'N' => "[weekday repr:monday]",
        'w' => "[weekday repr:sunday one_indexed:false]",
        'W' => "[week_number repr:iso]",
        'm' => "[month]",
        'n' => "[month padding:none]",
        'M' => "[month repr:short]",
        'F' => "[month repr:long]",
        'Y' => "[year]",
        'y' => "[year repr:last_two]",
        'H' => "[hour]",
        'G' => "[hour padding:none]",
        'h' => "[hour repr:12]",
        'g' => "[hour repr:12 padding:none]",
        'i' => "[minute]",
        's' => "[second]",
        'u' => "[subsecond digits:6]",
        'v' => "[subsecond digits:3]",
        'A' => "[period]",
        'a' => "[period case:lower]",
        'U' => "[unix_timestamp]",
        _ => return None,
    };
    Some(component)
}

/// Translates a `Y-m-d` style pattern into a `time` format description.
///
/// `z` has no description component; it is written as the literal
/// `day_of_year` (zero-based).
///
/// # Errors
///
/// Returns [`DateFormatError::Invalid`] for an unescaped ASCII letter with no
/// translation.
pub fn translate_pattern(pattern: &str, day_of_year: u16) -> Result<String, DateFormatError> {
    let mut description = String::with_capacity(pattern.len() * 8);
    let mut chars = pattern.chars();
    while let Some(token) = chars.next() {
        if token == '\\' {
            if let Some(literal) = chars.next() {
                push_literal(&mut description, literal);
            }
            continue;
        }
        if token == 'z' {
            description.push_str(&day_of_year.to_string());
            continue;
        }
        match component(token) {
            Some(component) => description.push_str(component),
            None if token.is_ascii_alphabetic() => {
                return Err(DateFormatError::Invalid {
                    pattern: pattern.to_string(),
                    reason: format!("unsupported format letter `{token}`"),
                });
            }
            None => push_literal(&mut description, token),
        }
    }
    Ok(description)
}

/// Appends a literal character, escaping the description bracket.
fn push_literal(description: &mut String, literal: char) {
    if literal == '[' {
        description.push_str("[[");
    } else {
        description.push(literal);
    }
}

/// Checks that a pattern translates into a valid description.
///
/// # Errors
///
/// Returns [`DateFormatError::Invalid`] when the pattern is rejected.
pub fn validate_pattern(pattern: &str) -> Result<(), DateFormatError> {
    let description = translate_pattern(pattern, 0)?;
    format_description::parse_borrowed::<1>(&description).map(|_| ()).map_err(|err| {
        DateFormatError::Invalid {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    })
}

/// Formats a timestamp with a `Y-m-d` style pattern.
///
/// # Errors
///
/// Returns [`DateFormatError`] when the pattern is invalid or the value
/// cannot be rendered.
pub fn format_timestamp(value: PrimitiveDateTime, pattern: &str) -> Result<String, DateFormatError> {
    let description = translate_pattern(pattern, value.ordinal().saturating_sub(1))?;
    let items = format_description::parse_borrowed::<1>(&description).map_err(|err| {
        DateFormatError::Invalid {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    })?;
    value.assume_utc().format(items.as_slice()).map_err(|err| DateFormatError::Format {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses a stored ISO date or date-time string.
///
/// Accepts `Y-m-d`, `Y-m-d H:i:s`, `Y-m-dTH:i:s`, and RFC 3339 values; the
/// latter are shifted to UTC. Dates parse as midnight.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<PrimitiveDateTime> {
    if let Ok(value) = OffsetDateTime::parse(text, &Rfc3339) {
        let value = value.to_offset(UtcOffset::UTC);
        return Some(PrimitiveDateTime::new(value.date(), value.time()));
    }
    PrimitiveDateTime::parse(text, STORED_DATE_TIME)
        .or_else(|_| PrimitiveDateTime::parse(text, STORED_ISO_DATE_TIME))
        .ok()
        .or_else(|| Date::parse(text, STORED_DATE).ok().map(Date::midnight))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn translates_tokens_and_literals() -> Result<(), DateFormatError> {
        assert_eq!(translate_pattern("d-m-Y", 0)?, "[day]-[month]-[year]");
        assert_eq!(translate_pattern("\\Y [\\x]", 0)?, "Y [[x]");
        assert_eq!(translate_pattern("z/Y", 64)?, "64/[year]");
        Ok(())
    }

    #[test]
    fn formats_common_patterns() -> Result<(), DateFormatError> {
        let value = datetime!(2024-03-05 14:07:09);
        assert_eq!(format_timestamp(value, DEFAULT_DATE_FORMAT)?, "2024-03-05");
        assert_eq!(format_timestamp(value, "d.m.y H:i")?, "05.03.24 14:07");
        assert_eq!(format_timestamp(value, "j M Y, g:i a")?, "5 Mar 2024, 2:07 pm");
        assert_eq!(format_timestamp(value, "l, F j")?, "Tuesday, March 5");
        Ok(())
    }

    #[test]
    fn formats_epoch_week_and_day_of_year_tokens() -> Result<(), DateFormatError> {
        let value = datetime!(2024-03-05 14:07:09.25);
        assert_eq!(format_timestamp(value, "U")?, "1709647629");
        assert_eq!(format_timestamp(value, "\\WW")?, "W10");
        assert_eq!(format_timestamp(value, "z")?, "64");
        assert_eq!(format_timestamp(datetime!(2024-01-01 00:00), "z")?, "0");
        assert_eq!(format_timestamp(value, "s.u")?, "09.250000");
        assert_eq!(format_timestamp(value, "s.v")?, "09.250");
        Ok(())
    }

    #[test]
    fn unsupported_letters_are_rejected() {
        let value = datetime!(2024-03-05 14:07:09);
        for pattern in ["jS F Y", "T", "Y-m-d e", "L", "t"] {
            assert!(
                matches!(format_timestamp(value, pattern), Err(DateFormatError::Invalid { .. })),
                "{pattern} should be rejected"
            );
            assert!(validate_pattern(pattern).is_err(), "{pattern} should fail validation");
        }
        assert_eq!(format_timestamp(value, "j\\S F Y"), Ok("5S March 2024".to_string()));
    }

    #[test]
    fn parses_stored_dates() {
        assert_eq!(parse_timestamp("2024-03-05"), Some(datetime!(2024-03-05 00:00)));
        assert_eq!(parse_timestamp("2024-03-05 14:07:09"), Some(datetime!(2024-03-05 14:07:09)));
        assert_eq!(parse_timestamp("2024-03-05T14:07:09"), Some(datetime!(2024-03-05 14:07:09)));
        assert_eq!(
            parse_timestamp("2024-03-05T23:30:00+02:00"),
            Some(datetime!(2024-03-05 21:30))
        );
        assert_eq!(parse_timestamp("05-03-2024"), None);
        assert_eq!(parse_timestamp("2024-02-30"), None);
        assert_eq!(parse_timestamp("tomorrow"), None);
    }

    #[test]
    fn validates_patterns() {
        assert!(validate_pattern("Y-m-d H:i:s").is_ok());
        assert!(validate_pattern("U").is_ok());
        assert!(validate_pattern("").is_ok());
    }
}
