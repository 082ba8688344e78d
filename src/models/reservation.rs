//! Reservation request/response models
//!
//! Types exchanged between the reservation handlers, the validator,
//! the repository and the views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::entities::reservations;

/// Reservation status values. Any status may be set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Seated,
    Canceled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Seated,
        ReservationStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    /// Exact, case-sensitive match on the stored value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "seated" => Ok(ReservationStatus::Seated),
            "canceled" => Ok(ReservationStatus::Canceled),
            _ => Err(format!("Unknown reservation status: {}", s)),
        }
    }
}

/// One submitted field value, trimmed.
///
/// Urlencoded forms only ever produce `Text`. JSON bodies keep their type so
/// the validator can tell `"12345"` from `12345`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Other(Value),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Value as shown back in a form input
    pub fn display(&self) -> String {
        match self {
            Scalar::Text(text) => text.clone(),
            Scalar::Number(number) => number.to_string(),
            Scalar::Other(value) => value.to_string(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Scalar::Text(text.to_string())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Scalar::Text(text)
    }
}

/// Submitted reservation fields, before validation.
///
/// Accepts both urlencoded forms and JSON bodies. Every text field is
/// trimmed and an empty value is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationInput {
    #[serde(default, deserialize_with = "trimmed_scalar")]
    pub customer_name: Option<Scalar>,
    #[serde(default, deserialize_with = "trimmed_scalar")]
    pub phone: Option<Scalar>,
    #[serde(default, deserialize_with = "trimmed_scalar")]
    pub party_size: Option<Scalar>,
    #[serde(default, deserialize_with = "trimmed_scalar")]
    pub reserved_at: Option<Scalar>,
    #[serde(default, deserialize_with = "trimmed_scalar")]
    pub status: Option<Scalar>,
    /// HTML form method override (`PUT`, `PATCH` or `DELETE`)
    #[serde(rename = "_method", default, skip_serializing, deserialize_with = "trimmed_text")]
    pub method: Option<String>,
}

impl ReservationInput {
    /// Blank form for the create page
    pub fn blank() -> Self {
        Self {
            status: Some(ReservationStatus::Pending.to_string().into()),
            ..Default::default()
        }
    }
}

impl From<&reservations::Model> for ReservationInput {
    fn from(model: &reservations::Model) -> Self {
        Self {
            customer_name: Some(model.customer_name.clone().into()),
            phone: Some(model.phone.clone().into()),
            party_size: Some(model.party_size.to_string().into()),
            reserved_at: Some(model.reserved_at.format("%Y-%m-%dT%H:%M").to_string().into()),
            status: Some(model.status.clone().into()),
            method: None,
        }
    }
}

fn trimmed_scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Scalar::Text(trimmed.to_string()))
            }
        }
        Some(Value::Number(number)) => Some(Scalar::Number(number)),
        Some(other) => Some(Scalar::Other(other)),
    })
}

/// Query-string and override fields: always text, non-strings kept as their JSON text
fn trimmed_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(trimmed_scalar(deserializer)?.map(|scalar| scalar.display()))
}

/// A reservation that passed every field rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReservation {
    pub customer_name: String,
    pub phone: String,
    pub party_size: i32,
    pub reserved_at: DateTime<Utc>,
    pub status: ReservationStatus,
}

/// Query parameters for GET /reservations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationListQuery {
    #[serde(default, deserialize_with = "trimmed_text")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "trimmed_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "trimmed_text")]
    pub page: Option<String>,
}

impl ReservationListQuery {
    pub fn filter(&self) -> ReservationFilter {
        ReservationFilter {
            search: self.search.clone(),
            status: self.status.clone(),
        }
    }

    /// Requested page; anything missing, non-numeric or below 1 means 1
    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}

/// Search text and status applied to the list. Echoed back to the view,
/// so absent values are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Reservation as exposed to the views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationResource {
    pub id: i32,
    pub customer_name: String,
    pub phone: String,
    pub party_size: i32,
    pub reserved_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<reservations::Model> for ReservationResource {
    fn from(model: reservations::Model) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            phone: model.phone,
            party_size: model.party_size,
            reserved_at: model.reserved_at,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
