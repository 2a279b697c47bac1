use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::email::EmailAddress;
use crate::error::ValidationError;

/// Status assigned to every intake when it is first recorded.
pub const STATUS_PENDING: &str = "pending";

/// A consultation request as submitted by the patient-facing form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntakeCreate {
    pub category: String,
    pub symptoms: String,
    pub duration: String,
    #[serde(default)]
    #[ts(optional)]
    pub history: Option<String>,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub phone: String,
    #[ts(type = "string")]
    pub email: EmailAddress,
    pub city: String,
    pub consent: bool,
}

/// A recorded intake, stored in the `intakes` collection.
///
/// `created_at` is kept as the RFC 3339 text written at creation and is
/// returned untouched on listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntakeRecord {
    pub id: String,
    pub category: String,
    pub symptoms: String,
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub history: String,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub consent: bool,
    pub status: String,
    pub created_at: String,
}

impl IntakeRecord {
    /// Validate a submission and stamp it with a fresh id and creation time.
    pub fn new(input: IntakeCreate) -> Result<Self, ValidationError> {
        Self::with_identity(input, Uuid::new_v4().to_string(), jiff::Timestamp::now())
    }

    pub fn with_identity(
        input: IntakeCreate,
        id: String,
        created_at: jiff::Timestamp,
    ) -> Result<Self, ValidationError> {
        if !input.consent {
            return Err(ValidationError::ConsentRequired);
        }

        Ok(Self {
            id,
            category: input.category,
            symptoms: input.symptoms,
            duration: input.duration,
            history: input.history.unwrap_or_default(),
            name: input.name,
            age: input.age,
            gender: input.gender,
            phone: input.phone,
            email: input.email.into(),
            city: input.city,
            consent: input.consent,
            status: STATUS_PENDING.to_string(),
            created_at: created_at.to_string(),
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
