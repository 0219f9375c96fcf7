use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::StoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Recruiter => "recruiter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "recruiter" => Ok(Role::Recruiter),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Profile sub-document stored alongside the user record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_original_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(req: RegisterUserRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            fullname: req.fullname.trim().to_string(),
            email: normalize_email(&req.email),
            phone_number: req.phone_number.trim().to_string(),
            role: req.role.unwrap_or_default(),
            profile: Profile::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the provided fields of a profile update. Absent fields keep
    /// their stored value.
    pub fn apply_profile_update(&mut self, update: &ProfileUpdate, resume_key: Option<String>) {
        if let Some(fullname) = &update.fullname {
            self.fullname = fullname.clone();
        }
        if let Some(email) = &update.email {
            self.email = normalize_email(email);
        }
        if let Some(phone_number) = &update.phone_number {
            self.phone_number = phone_number.clone();
        }
        if let Some(bio) = &update.bio {
            self.profile.bio = bio.clone();
        }
        if let Some(skills) = &update.skills {
            self.profile.skills = skills.clone();
        }
        if let Some(key) = resume_key {
            self.profile.resume = Some(key);
            self.profile.resume_original_name =
                update.resume.as_ref().map(|r| r.file_name.clone());
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub profile: Json<Profile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            fullname: row.fullname,
            email: row.email,
            phone_number: row.phone_number,
            role: row.role.parse().map_err(StoreError::Corrupt)?,
            profile: row.profile.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub fullname: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// An uploaded resume file taken from the `file` multipart field.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeUpload {
    /// The declared content type decides; the file extension is only
    /// consulted when the part carries no type.
    pub fn is_pdf(&self) -> bool {
        match self.content_type.as_deref() {
            Some(declared) => declared
                .split(';')
                .next()
                .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/pdf")),
            None => self.file_name.to_ascii_lowercase().ends_with(".pdf"),
        }
    }
}

/// Decoded profile-update form. `None` means the field was absent or blank.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub resume: Option<ResumeUpload>,
}

/// Splits a comma-separated skills string, trimming each item and dropping
/// blanks.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
