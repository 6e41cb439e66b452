//! The listing a visitor is filling in, and its per-field errors.

use std::collections::BTreeMap;

use listpad_storage::ListingRecord;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::validate;

/// One of the four form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Website,
    About,
    ContactNumber,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Website, Self::About, Self::ContactNumber];

    /// The form input name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Website => "website",
            Self::About => "about",
            Self::ContactNumber => "contactNumber",
        }
    }

    /// The human label shown above the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Website => "Website URL",
            Self::About => "About Your Product/Service",
            Self::ContactNumber => "Contact Number",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four values of the listing form, as typed.
///
/// Deserializes from the form's wire names (`contactNumber` in camel case);
/// missing fields default to empty so they fail validation rather than
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingSubmission {
    pub name: String,
    pub website: String,
    pub about: String,
    pub contact_number: String,
}

impl ListingSubmission {
    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Website => &self.website,
            Field::About => &self.about,
            Field::ContactNumber => &self.contact_number,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Website => &mut self.website,
            Field::About => &mut self.about,
            Field::ContactNumber => &mut self.contact_number,
        };
        *slot = value.into();
    }

    /// Check every field. All failures are reported together.
    ///
    /// # Errors
    ///
    /// Returns the per-field errors when at least one field fails.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let results = [
            validate::name(&self.name),
            validate::website(&self.website),
            validate::about(&self.about),
            validate::contact_number(&self.contact_number),
        ];

        let errors: FieldErrors = results.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Map to the storage row shape.
    #[must_use]
    pub fn to_record(&self) -> ListingRecord {
        ListingRecord {
            name: self.name.clone(),
            website: self.website.clone(),
            about: self.about.clone(),
            contact_number: self.contact_number.clone(),
        }
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

/// Per-field validation errors, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    /// The error for `field`, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Record an error. The first error recorded for a field wins.
    pub fn insert(&mut self, error: FieldError) {
        self.errors.entry(error.field()).or_insert(error);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Errors in field display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let mut errors = Self::default();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> ListingSubmission {
        ListingSubmission {
            name: "Acme Rockets".to_owned(),
            website: "https://acme.example.com".to_owned(),
            about: "Rockets, anvils, and portable holes.".to_owned(),
            contact_number: "5551234567".to_owned(),
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn each_empty_field_reports_its_own_error() {
        let cases = [
            (Field::Name, FieldError::NameRequired),
            (Field::Website, FieldError::WebsiteRequired),
            (Field::About, FieldError::AboutRequired),
            (Field::ContactNumber, FieldError::ContactNumberRequired),
        ];
        for (field, expected) in cases {
            let mut submission = valid();
            submission.set(field, "");
            let errors = submission.validate().unwrap_err();
            assert_eq!(errors.len(), 1, "only {field} should fail");
            assert_eq!(errors.get(field), Some(expected));
        }
    }

    #[test]
    fn all_failures_reported_together() {
        let errors = ListingSubmission::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        let fields: Vec<_> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn mixed_failures_use_rule_specific_messages() {
        let submission = ListingSubmission {
            name: "Acme".to_owned(),
            website: "not a url".to_owned(),
            about: "too short".to_owned(),
            contact_number: "12345".to_owned(),
        };
        let errors = submission.validate().unwrap_err();
        assert_eq!(errors.get(Field::Name), None);
        assert_eq!(errors.get(Field::Website), Some(FieldError::WebsiteInvalid));
        assert_eq!(errors.get(Field::About), Some(FieldError::AboutTooShort));
        assert_eq!(
            errors.get(Field::ContactNumber),
            Some(FieldError::ContactNumberInvalid)
        );
    }

    #[test]
    fn first_error_per_field_wins() {
        let both = [FieldError::WebsiteRequired, FieldError::WebsiteInvalid];
        let errors: FieldErrors = both.into_iter().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Website), Some(FieldError::WebsiteRequired));
    }

    #[test]
    fn record_uses_snake_case_contact_number() {
        let record = valid().to_record();
        assert_eq!(record.contact_number, "5551234567");
        assert_eq!(record.name, "Acme Rockets");
    }

    #[test]
    fn deserializes_form_wire_names() {
        let json = r#"{"name":"A","website":"a.io","about":"x","contactNumber":"123"}"#;
        let submission: ListingSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.contact_number, "123");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let submission: ListingSubmission = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(submission.website, "");
        assert!(submission.validate().is_err());
    }

    #[test]
    fn clear_empties_every_field() {
        let mut submission = valid();
        assert!(!submission.is_empty());
        submission.clear();
        assert!(submission.is_empty());
    }
}
