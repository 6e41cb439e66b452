//! Core library for Listpad.
//!
//! Everything here is independent of HTTP. A [`form::SubmissionForm`] is the
//! state of one page view of the listing form: the entered values, per-field
//! errors, the two flow flags, the confirmation overlay, and any transient
//! notifications. The server crate owns one form per page view and renders
//! it; this crate decides what happens on submit.
//!
//! ```text
//! submit(fields)
//!   ├── validate (all four fields, independently)   -> FieldErrors
//!   ├── flow.begin() + mount ProgressSequence
//!   ├── ListingStore::insert(record)                -> SubmitError::Persistence
//!   ├── sleep(success delay)
//!   └── clear fields, route = /thank-you
//! ```

pub mod confirmation;
pub mod error;
pub mod flow;
pub mod form;
pub mod listing;
pub mod notify;
pub mod progress;
pub mod route;
pub mod validate;

pub use listpad_storage::{ListingRecord, ListingStore, StoreError};
