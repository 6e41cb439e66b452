//! Error types for `listpad-core`.
//!
//! Two tiers: [`FieldError`] is a per-field validation failure detected
//! before any network activity; [`SubmitError::Persistence`] wraps whatever
//! the store reported. The `Display` text of a `FieldError` is the exact
//! message shown next to the field.

use listpad_storage::StoreError;

use crate::listing::{Field, FieldErrors};

/// A single field failed its constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,

    #[error("Website URL is required")]
    WebsiteRequired,

    #[error("Please enter a valid URL")]
    WebsiteInvalid,

    #[error("Description is required")]
    AboutRequired,

    #[error("Please provide at least 20 characters")]
    AboutTooShort,

    #[error("Contact number is required")]
    ContactNumberRequired,

    #[error("Please enter a valid phone number")]
    ContactNumberInvalid,
}

impl FieldError {
    /// The field this error belongs to.
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::NameRequired => Field::Name,
            Self::WebsiteRequired | Self::WebsiteInvalid => Field::Website,
            Self::AboutRequired | Self::AboutTooShort => Field::About,
            Self::ContactNumberRequired | Self::ContactNumberInvalid => Field::ContactNumber,
        }
    }
}

/// Why a submit attempt did not navigate forward.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// One or more fields failed validation. Nothing was sent to the store.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),

    /// A submission is already in flight (or has completed) for this view.
    #[error("a submission is already in progress")]
    Busy,

    /// The store reported a failure. The form is editable again.
    #[error("listing could not be saved: {0}")]
    Persistence(#[from] StoreError),
}
