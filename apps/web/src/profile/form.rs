use crate::models::User;
use crate::skills::{join_skills, parse_skills};

use super::encode::{ProfileUpdateRequest, ResumeFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Fullname,
    Email,
    PhoneNumber,
    Bio,
    Skills,
}

/// Editable profile fields. Skills are held as the comma-separated text the
/// user types; the resume is only set when a new file has been picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub bio: String,
    pub skills: String,
    pub resume: Option<ResumeFile>,
}

impl ProfileForm {
    pub fn from_user(user: Option<&User>) -> Self {
        match user {
            Some(user) => Self {
                fullname: user.fullname.clone(),
                email: user.email.clone(),
                phone_number: user.phone_number.clone(),
                bio: user.profile.bio.clone(),
                skills: join_skills(&user.profile.skills),
                resume: None,
            },
            None => Self::default(),
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::Fullname => self.fullname = value,
            ProfileField::Email => self.email = value,
            ProfileField::PhoneNumber => self.phone_number = value,
            ProfileField::Bio => self.bio = value,
            ProfileField::Skills => self.skills = value,
        }
    }

    pub fn attach_resume(&mut self, resume: ResumeFile) {
        self.resume = Some(resume);
    }

    pub fn to_request(&self) -> ProfileUpdateRequest {
        ProfileUpdateRequest {
            fullname: self.fullname.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            bio: self.bio.clone(),
            skills: parse_skills(&self.skills),
            resume: self.resume.clone(),
        }
    }
}
