//! Client id generation.
//!
//! Ids are semantic: `[2-letter city][YYYYMMDD][initials]`, e.g.
//! `CH20250114JD` for a Chicago client named John Doe created on
//! 2025-01-14. Missing inputs fall back to `X` placeholders so the format
//! stays fixed-width.

use chrono::{NaiveDate, Utc};

/// Generate a client id for the given creation date.
#[must_use]
pub fn generate_client_id_on(city: &str, first_name: &str, last_name: &str, date: NaiveDate) -> String {
    let city_code: String = {
        let letters: String = city
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .take(2)
            .collect();
        if letters.len() < 2 {
            "XX".to_string()
        } else {
            letters.to_ascii_uppercase()
        }
    };

    let date_code = date.format("%Y%m%d").to_string();

    let initial = |name: &str| {
        name.chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('X')
    };

    format!(
        "{}{}{}{}",
        city_code,
        date_code,
        initial(first_name),
        initial(last_name)
    )
}

/// Generate a client id dated today (UTC).
#[must_use]
pub fn generate_client_id(city: &str, first_name: &str, last_name: &str) -> String {
    generate_client_id_on(city, first_name, last_name, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()
    }

    #[test]
    fn test_id_format() {
        let id = generate_client_id_on("Chicago", "John", "Doe", date());
        assert_eq!(id, "CH20250114JD");
    }

    #[test]
    fn test_missing_inputs_use_placeholders() {
        let id = generate_client_id_on("", "", "", date());
        assert_eq!(id, "XX20250114XX");
    }

    #[test]
    fn test_lowercase_and_punctuation_normalized() {
        let id = generate_client_id_on("st. louis", "  ana", "o'neil", date());
        assert_eq!(id, "ST20250114AO");
    }
}
