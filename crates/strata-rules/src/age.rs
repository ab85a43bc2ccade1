//! Age value helpers shared by the demographic rules.
//!
//! Age dimensions come in two shapes: single-year values (`"27"`) and
//! ten-year bands (`"20-30"`). Rules accept either and treat anything
//! else as a no-op signal.

/// The age value one step older, or `None` for a malformed value.
///
/// Single years advance by one (`"27"` → `"28"`); a band advances to
/// the next ten-year band starting at its high end (`"20-30"` →
/// `"30-40"`).
pub fn advance(age: &str) -> Option<String> {
    if let Ok(years) = age.parse::<u32>() {
        return Some((years + 1).to_string());
    }
    let (_, high) = age.split_once('-')?;
    let high: u32 = high.parse().ok()?;
    Some(format!("{high}-{}", high + 10))
}

/// The ten-year band containing `age`.
///
/// Single years map into their decade (`"27"` → `"20-30"`); anything
/// else is returned unchanged and resolved against rate tables as-is.
pub fn band_of(age: &str) -> String {
    match age.parse::<u32>() {
        Ok(years) => {
            let low = years - years % 10;
            format!("{low}-{}", low + 10)
        }
        Err(_) => age.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_single_years() {
        assert_eq!(advance("0"), Some("1".to_string()));
        assert_eq!(advance("89"), Some("90".to_string()));
    }

    #[test]
    fn advances_bands_by_a_decade() {
        assert_eq!(advance("0-10"), Some("10-20".to_string()));
        assert_eq!(advance("80-90"), Some("90-100".to_string()));
    }

    #[test]
    fn malformed_age_is_none() {
        assert_eq!(advance("elderly"), None);
        assert_eq!(advance("80-"), None);
    }

    #[test]
    fn bands_pass_through() {
        assert_eq!(band_of("20-30"), "20-30");
        assert_eq!(band_of("90+"), "90+");
    }

    #[test]
    fn years_map_into_their_decade() {
        assert_eq!(band_of("0"), "0-10");
        assert_eq!(band_of("27"), "20-30");
        assert_eq!(band_of("90"), "90-100");
    }
}
