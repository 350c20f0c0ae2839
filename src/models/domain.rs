use serde::{Deserialize, Serialize};

/// Profile gender, stored as a PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The gender a match is sought from.
    pub fn opposite(self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// A stored candidate profile
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub profession: Option<String>,
    pub qualification: Option<String>,
    #[serde(rename = "maritalStatus")]
    pub marital_status: Option<String>,
    pub religion: Option<String>,
    pub height: String,
    #[serde(rename = "birthYear")]
    pub birth_year: i32,
    #[serde(rename = "profilePicture")]
    pub profile_picture: Option<String>,
    #[serde(rename = "profilePictureOriginal")]
    pub profile_picture_original: Option<String>,
    pub document: Option<String>,
    #[serde(rename = "documentOriginal")]
    pub document_original: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Field values for creating or replacing a profile row
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub profession: Option<String>,
    pub qualification: Option<String>,
    pub marital_status: Option<String>,
    pub religion: Option<String>,
    pub height: String,
    pub birth_year: i32,
    pub profile_picture: Option<String>,
    pub profile_picture_original: Option<String>,
    pub document: Option<String>,
    pub document_original: Option<String>,
}

/// Admin user row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Admin-defined dropdown option for a profile form field
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomOption {
    pub id: i32,
    #[serde(rename = "fieldType")]
    pub field_type: String,
    pub value: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Aggregate profile counts for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileStats {
    pub total: i64,
    pub male: i64,
    pub female: i64,
    /// Profiles created within the last 30 days.
    pub recent: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_opposite() {
        assert_eq!(Gender::Male.opposite(), Gender::Female);
        assert_eq!(Gender::Female.opposite(), Gender::Male);
    }

    #[test]
    fn test_gender_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"Male\"");
        assert_eq!(
            serde_json::from_str::<Gender>("\"Female\"").unwrap(),
            Gender::Female
        );
    }
}
