use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Public report tracking number: `CR-<year>-<6+ digit sequence>`
    /// - Valid: "CR-2026-000001", "CR-2031-1234567"
    /// - Invalid: "cr-2026-000001" (callers upper-case first), "CR-26-000001", "CR-2026-12"
    pub static ref TRACKING_NUMBER_REGEX: Regex =
        Regex::new(r"^CR-[0-9]{4}-[0-9]{6,}$").unwrap();
}

/// Normalize user input into the canonical tracking number form.
///
/// Returns `None` when the input cannot be a tracking number, so lookups can
/// short-circuit to "not found" without touching the database.
pub fn normalize_tracking_number(input: &str) -> Option<String> {
    let candidate = input.trim().to_ascii_uppercase();
    TRACKING_NUMBER_REGEX
        .is_match(&candidate)
        .then_some(candidate)
}

/// Latitude and longitude must be given together and be within WGS84 range.
pub fn validate_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<(f64, f64)>, String> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                return Err("latitude must be between -90 and 90".to_string());
            }
            if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
                return Err("longitude must be between -180 and 180".to_string());
            }
            Ok(Some((lat, lon)))
        }
        _ => Err("latitude and longitude must be provided together".to_string()),
    }
}

/// Rejects strings that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_number_regex_valid() {
        assert!(TRACKING_NUMBER_REGEX.is_match("CR-2026-000001"));
        assert!(TRACKING_NUMBER_REGEX.is_match("CR-2031-1234567"));
    }

    #[test]
    fn test_tracking_number_regex_invalid() {
        assert!(!TRACKING_NUMBER_REGEX.is_match("cr-2026-000001"));
        assert!(!TRACKING_NUMBER_REGEX.is_match("CR-26-000001"));
        assert!(!TRACKING_NUMBER_REGEX.is_match("CR-2026-12"));
        assert!(!TRACKING_NUMBER_REGEX.is_match("CR-2026-000001; DROP"));
        assert!(!TRACKING_NUMBER_REGEX.is_match(""));
    }

    #[test]
    fn test_normalize_tracking_number() {
        assert_eq!(
            normalize_tracking_number("  cr-2026-000042 "),
            Some("CR-2026-000042".to_string())
        );
        assert_eq!(normalize_tracking_number("not-a-number"), None);
    }

    #[test]
    fn test_validate_coordinates() {
        assert_eq!(validate_coordinates(None, None), Ok(None));
        assert_eq!(
            validate_coordinates(Some(-6.2), Some(106.8)),
            Ok(Some((-6.2, 106.8)))
        );
        assert!(validate_coordinates(Some(91.0), Some(0.0)).is_err());
        assert!(validate_coordinates(Some(0.0), Some(-181.0)).is_err());
        assert!(validate_coordinates(Some(f64::NAN), Some(0.0)).is_err());
        assert!(validate_coordinates(Some(1.0), None).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Budi").is_ok());
        assert!(validate_not_blank("  a  ").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \n\t ").is_err());
    }
}
