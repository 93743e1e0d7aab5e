use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Database Models ============

/// A persisted contact record.
///
/// Wire names follow the public API contract: the identifier serializes as
/// `_id`, the zip code as `zipCode`, the personal number as
/// `personalnumber`. Coordinates are populated in memory on the
/// fetch-by-id path only and are omitted from JSON until then; they are
/// never written back to the store.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Contact {
    /// Store-assigned identifier, immutable once created.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Email address.
    pub email: String,
    /// Personal identifier string (`NNNNNN-NNNN`).
    #[serde(rename = "personalnumber")]
    pub personal_number: String,
    /// Street address.
    pub address: String,
    /// Zip code (`NNNNN`, optionally `-NNNN` or ` NNNN`).
    #[serde(rename = "zipCode")]
    pub zip_code: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Latitude, present only after read-time enrichment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude, present only after read-time enrichment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Contact {
    /// Free-text address line handed to the geocoder:
    /// `"<address>, <city>, <country>"`.
    pub fn address_line(&self) -> String {
        format!("{}, {}, {}", self.address, self.city, self.country)
    }
}

// ============ API Request Models ============

/// Creation payload for `POST /contact`: the eight required fields.
///
/// Coordinates are deliberately absent; they cannot be supplied at
/// creation time.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Email address.
    pub email: String,
    /// Personal identifier string.
    #[serde(rename = "personalnumber")]
    pub personal_number: String,
    /// Street address.
    pub address: String,
    /// Zip code.
    #[serde(rename = "zipCode")]
    pub zip_code: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
}
