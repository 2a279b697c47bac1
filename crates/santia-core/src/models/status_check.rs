use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;

/// A client "I'm alive" ping, stored in the `status_checks` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub timestamp: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheck {
    /// Build a new status check with a fresh id and the current time.
    pub fn new(input: StatusCheckCreate) -> Result<Self, ValidationError> {
        Self::with_identity(input, Uuid::new_v4().to_string(), jiff::Timestamp::now())
    }

    pub fn with_identity(
        input: StatusCheckCreate,
        id: String,
        timestamp: jiff::Timestamp,
    ) -> Result<Self, ValidationError> {
        if input.client_name.trim().is_empty() {
            return Err(ValidationError::MissingField("client_name"));
        }

        Ok(Self {
            id,
            client_name: input.client_name,
            timestamp,
        })
    }
}
