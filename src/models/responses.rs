use crate::models::domain::{Gender, Profile};
use serde::{Deserialize, Serialize};

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Authenticated user, as exposed to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Envelope for auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: SessionUser,
}

/// The submitted profile echoed back with its derived birth year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputProfileEcho {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub profession: Option<String>,
    pub height: String,
    #[serde(rename = "birthYear")]
    pub birth_year: i32,
}

/// Response for the matchmaking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "inputProfile")]
    pub input_profile: InputProfileEcho,
    #[serde(rename = "matchedProfile")]
    pub matched_profile: Profile,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: i32,
}

/// Database health probe result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealthResponse {
    pub status: String,
    #[serde(rename = "storageType")]
    pub storage_type: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
