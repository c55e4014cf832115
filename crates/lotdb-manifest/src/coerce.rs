//! Parse-or-default coercion for the loosely-typed cell values found in
//! vendor manifests.
//!
//! Malformed data never aborts a run: every failure degrades to a declared
//! default. Each result carries a `defaulted` flag so the normalizer can log
//! which fields were degraded without treating expected bad input as an
//! error path.

/// A coerced value plus whether the default was substituted for a present,
/// non-blank cell that could not be interpreted. Absent or blank cells take
/// the default silently (`defaulted == false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coerced<T> {
    pub value: T,
    pub defaulted: bool,
}

/// Parse a cell as a float, falling back to `default`.
#[must_use]
pub fn parse_f64_or(raw: Option<&str>, default: f64) -> Coerced<f64> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Coerced {
            value: default,
            defaulted: false,
        };
    };
    match text.parse::<f64>() {
        Ok(value) => Coerced {
            value,
            defaulted: false,
        },
        Err(_) => Coerced {
            value: default,
            defaulted: true,
        },
    }
}

/// Parse a cell as a quantity: float first (vendor exports store counts as
/// `4.0`), truncated to an integer and clamped at zero. Falls back to
/// `default` on any parse failure.
#[must_use]
pub fn parse_quantity_or(raw: Option<&str>, default: i32) -> Coerced<i32> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Coerced {
            value: default,
            defaulted: false,
        };
    };
    match text.parse::<f64>() {
        Ok(value) => {
            #[allow(clippy::cast_possible_truncation)]
            let truncated = (value.trunc().max(0.0)).min(f64::from(i32::MAX)) as i32;
            Coerced {
                value: truncated,
                defaulted: false,
            }
        }
        Err(_) => Coerced {
            value: default,
            defaulted: true,
        },
    }
}

/// Clean a raw UPC cell into a digit string.
///
/// Trims, strips a trailing `.0` left by numeric-to-text conversion, then
/// strips every non-digit character. A non-empty digit remainder becomes the
/// UPC regardless of length; when no digits remain the de-`.0`d trimmed text
/// is kept as-is. Idempotent: cleaning a cleaned UPC is a no-op.
#[must_use]
pub fn clean_upc(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_artifact = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    let digits: String = without_artifact.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        without_artifact.to_string()
    } else {
        digits
    }
}

#[cfg(test)]
#[path = "coerce_test.rs"]
mod tests;
