//! Field validation rules.
//!
//! Each field has an ordered list of rules; the first one that fails is the
//! field's error. "Required" means "not the empty string": whitespace-only
//! input counts as present.
//!
//! The website pattern is anchored at the start only. Anything after a
//! matched `label.tld` prefix is accepted (`example.com<garbage>` passes).
//! Existing submissions rely on that, so it is kept as is.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FieldError;

/// Minimum length of the `about` field, in characters.
pub const ABOUT_MIN_CHARS: usize = 20;

/// Loose URL check: optional scheme, optional `www.`, a label, then one or
/// more `.tld` parts of at least two letters.
pub const WEBSITE_PATTERN: &str = r"^(https?://)?(www\.)?[a-zA-Z0-9-]+(\.[a-zA-Z]{2,})+";

/// 10 to 15 ASCII digits and nothing else.
pub const CONTACT_NUMBER_PATTERN: &str = r"^[0-9]{10,15}$";

#[allow(clippy::expect_used)]
static WEBSITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WEBSITE_PATTERN).expect("website pattern is a valid regex"));

#[allow(clippy::expect_used)]
static CONTACT_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(CONTACT_NUMBER_PATTERN).expect("contact number pattern is a valid regex")
});

/// Validate the listing name.
///
/// # Errors
///
/// [`FieldError::NameRequired`] when empty.
pub fn name(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::NameRequired);
    }
    Ok(())
}

/// Validate the website URL.
///
/// # Errors
///
/// [`FieldError::WebsiteRequired`] when empty, [`FieldError::WebsiteInvalid`]
/// when the loose URL pattern does not match.
pub fn website(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::WebsiteRequired);
    }
    if !WEBSITE_RE.is_match(value) {
        return Err(FieldError::WebsiteInvalid);
    }
    Ok(())
}

/// Validate the description.
///
/// # Errors
///
/// [`FieldError::AboutRequired`] when empty, [`FieldError::AboutTooShort`]
/// below [`ABOUT_MIN_CHARS`] characters.
pub fn about(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::AboutRequired);
    }
    if value.chars().count() < ABOUT_MIN_CHARS {
        return Err(FieldError::AboutTooShort);
    }
    Ok(())
}

/// Validate the contact number.
///
/// # Errors
///
/// [`FieldError::ContactNumberRequired`] when empty,
/// [`FieldError::ContactNumberInvalid`] unless it is 10–15 ASCII digits.
pub fn contact_number(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::ContactNumberRequired);
    }
    if !CONTACT_NUMBER_RE.is_match(value) {
        return Err(FieldError::ContactNumberInvalid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_required() {
        assert_eq!(name(""), Err(FieldError::NameRequired));
        assert_eq!(name("Acme"), Ok(()));
    }

    #[test]
    fn whitespace_counts_as_present() {
        assert_eq!(name("   "), Ok(()));
    }

    #[test]
    fn website_accepts_common_forms() {
        for url in [
            "https://example.com",
            "http://example.com",
            "example.co",
            "www.example.io",
            "https://www.my-site.co.uk",
            "sub.domain.example.org",
        ] {
            assert_eq!(website(url), Ok(()), "{url} should be accepted");
        }
    }

    #[test]
    fn website_rejects_missing_tld() {
        for url in [
            "example",
            "example.c",
            "https://",
            "http://localhost",
            "example.123",
        ] {
            assert_eq!(
                website(url),
                Err(FieldError::WebsiteInvalid),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn website_empty_is_required_error() {
        assert_eq!(website(""), Err(FieldError::WebsiteRequired));
    }

    #[test]
    fn website_allows_trailing_content() {
        assert_eq!(website("example.com/some path?x=<y>"), Ok(()));
        assert_eq!(website("example.com!!!"), Ok(()));
    }

    #[test]
    fn website_must_match_from_start() {
        assert_eq!(website(" example.com"), Err(FieldError::WebsiteInvalid));
        assert_eq!(website("ftp://example.com"), Err(FieldError::WebsiteInvalid));
    }

    #[test]
    fn about_length_boundary() {
        let nineteen = "a".repeat(19);
        let twenty = "a".repeat(20);
        assert_eq!(about(&nineteen), Err(FieldError::AboutTooShort));
        assert_eq!(about(&twenty), Ok(()));
        assert_eq!(about(""), Err(FieldError::AboutRequired));
    }

    #[test]
    fn about_counts_characters_not_bytes() {
        // 19 two-byte characters: 38 bytes, still too short.
        let accented = "é".repeat(19);
        assert_eq!(about(&accented), Err(FieldError::AboutTooShort));
        assert_eq!(about(&"é".repeat(20)), Ok(()));
    }

    #[test]
    fn contact_number_length_bounds() {
        assert_eq!(
            contact_number(&"1".repeat(9)),
            Err(FieldError::ContactNumberInvalid)
        );
        assert_eq!(contact_number(&"1".repeat(10)), Ok(()));
        assert_eq!(contact_number(&"1".repeat(15)), Ok(()));
        assert_eq!(
            contact_number(&"1".repeat(16)),
            Err(FieldError::ContactNumberInvalid)
        );
        assert_eq!(contact_number(""), Err(FieldError::ContactNumberRequired));
    }

    #[test]
    fn contact_number_rejects_non_digits() {
        for value in [
            "+15551234567",
            "555-123-4567",
            "555 123 4567",
            "55512345a7",
            "5551234567\n",
            "١٢٣٤٥٦٧٨٩٠",
        ] {
            assert_eq!(
                contact_number(value),
                Err(FieldError::ContactNumberInvalid),
                "{value:?} should be rejected"
            );
        }
    }
}
