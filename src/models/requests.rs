use crate::models::Gender;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Admin login credentials
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Profile submitted to the matchmaking endpoint (never persisted)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub age: i32,
    pub gender: Gender,
    #[serde(default)]
    pub profession: Option<String>,
    #[validate(length(min = 1))]
    pub height: String,
}

impl MatchRequest {
    /// A male input profile must carry a profession.
    pub fn missing_required_profession(&self) -> bool {
        self.gender == Gender::Male
            && self.profession.as_deref().map_or(true, |p| p.is_empty())
    }
}

/// Query-string filters for profile search; absent filters are ignored
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileSearchQuery {
    pub gender: Option<Gender>,
    pub profession: Option<String>,
    #[serde(alias = "birth_year", rename = "birthYear")]
    pub birth_year: Option<i32>,
    pub height: Option<String>,
    pub age: Option<i32>,
    /// Calendar date the profile was created on (YYYY-MM-DD).
    pub date: Option<chrono::NaiveDate>,
}

/// New admin email
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEmailRequest {
    #[validate(length(min = 1))]
    pub email: String,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[serde(default, alias = "current_password", rename = "currentPassword")]
    pub current_password: Option<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "new_password", rename = "newPassword")]
    pub new_password: String,
}

/// New dropdown option for a profile form field
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomOptionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "field_type", rename = "fieldType")]
    pub field_type: String,
    #[validate(length(min = 1))]
    pub value: String,
}
