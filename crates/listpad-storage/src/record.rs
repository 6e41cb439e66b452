//! The persisted row shape.

use serde::{Deserialize, Serialize};

/// Name of the remote collection every backend writes to.
pub const LISTINGS_TABLE: &str = "listings";

/// One row of the `listings` table.
///
/// Field names are the storage column names: note `contact_number` is
/// snake case here while the form field is `contactNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub name: String,
    pub website: String,
    pub about: String,
    pub contact_number: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_storage_column_names() {
        let record = ListingRecord {
            name: "Acme".to_owned(),
            website: "acme.io".to_owned(),
            about: "We build rockets for coyotes.".to_owned(),
            contact_number: "5551234567".to_owned(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["contact_number"], "5551234567");
        assert!(json.get("contactNumber").is_none());
    }
}
