//! Calculation method ("school") the provider should use for each country.
//!
//! The table is static; countries not listed fall back to the Muslim World
//! League method.

/// Muslim World League
pub const DEFAULT_SCHOOL: u8 = 3;

/// ISO 3166-1 alpha-2 country code to provider school id.
const SCHOOLS: &[(&str, u8)] = &[
    ("BD", 1),
    ("IN", 1),
    ("PK", 1),
    ("AF", 1),
    ("CA", 2),
    ("US", 2),
    ("SA", 4),
    ("YE", 4),
    ("EG", 5),
    ("SD", 5),
    ("LY", 5),
    ("SY", 5),
    ("IQ", 5),
    ("LB", 5),
    ("IR", 7),
    ("AE", 8),
    ("OM", 8),
    ("BH", 8),
    ("KW", 9),
    ("QA", 10),
    ("SG", 11),
    ("MY", 11),
    ("ID", 11),
    ("BN", 11),
    ("FR", 12),
    ("TR", 13),
];

/// School id for a country code, case-insensitive.
pub fn school_for_country(country_code: &str) -> u8 {
    SCHOOLS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country_code))
        .map(|(_, school)| *school)
        .unwrap_or(DEFAULT_SCHOOL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_country() {
        assert_eq!(school_for_country("ID"), 11);
        assert_eq!(school_for_country("id"), 11);
    }

    #[test]
    fn test_unknown_country_falls_back() {
        assert_eq!(school_for_country("ZZ"), DEFAULT_SCHOOL);
        assert_eq!(school_for_country(""), DEFAULT_SCHOOL);
    }
}
