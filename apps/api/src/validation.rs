//! Explicit write-time validation. Every create/update path runs one of these
//! before touching the store and turns a failure into `AppError::Validation`.

use std::fmt;

use serde::Serialize;

use crate::models::company::{RegisterCompanyRequest, UpdateCompanyRequest};
use crate::models::job::{PostJobRequest, UpdateJobRequest};
use crate::models::user::{ProfileUpdate, RegisterUserRequest};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    #[cfg(test)]
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

/// Minimal structural check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= 7
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
}

pub fn validate_registration(req: &RegisterUserRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.require("fullname", &req.fullname);
    if !is_valid_email(&req.email) {
        errors.push("email", "must be a valid email address");
    }
    if !req.phone_number.trim().is_empty() && !is_valid_phone(&req.phone_number) {
        errors.push("phoneNumber", "must be a valid phone number");
    }
    errors.finish()
}

pub fn validate_profile_update(
    update: &ProfileUpdate,
    max_resume_bytes: usize,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Some(email) = &update.email {
        if !is_valid_email(email) {
            errors.push("email", "must be a valid email address");
        }
    }
    if let Some(phone) = &update.phone_number {
        if !is_valid_phone(phone) {
            errors.push("phoneNumber", "must be a valid phone number");
        }
    }
    if let Some(resume) = &update.resume {
        if !resume.is_pdf() {
            errors.push("file", "resume must be a PDF");
        }
        if resume.bytes.len() > max_resume_bytes {
            errors.push(
                "file",
                format!("resume must not exceed {max_resume_bytes} bytes"),
            );
        }
    }
    errors.finish()
}

pub fn validate_company(req: &RegisterCompanyRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.require("name", &req.name);
    errors.finish()
}

pub fn validate_company_update(req: &UpdateCompanyRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Some(name) = &req.name {
        errors.require("name", name);
    }
    errors.finish()
}

fn check_job_numbers(
    errors: &mut ValidationErrors,
    salary: Option<f64>,
    positions: Option<i32>,
    experience_level: Option<i32>,
) {
    if let Some(salary) = salary {
        if !salary.is_finite() || salary < 0.0 {
            errors.push("salary", "must be a non-negative number");
        }
    }
    if let Some(positions) = positions {
        if positions < 1 {
            errors.push("positions", "must be at least 1");
        }
    }
    if let Some(level) = experience_level {
        if level < 0 {
            errors.push("experienceLevel", "must not be negative");
        }
    }
}

pub fn validate_job_posting(req: &PostJobRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.require("title", &req.title);
    errors.require("description", &req.description);
    errors.require("location", &req.location);
    errors.require("jobType", &req.job_type);
    check_job_numbers(
        &mut errors,
        Some(req.salary),
        Some(req.positions),
        Some(req.experience_level),
    );
    errors.finish()
}

pub fn validate_job_update(req: &UpdateJobRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for (field, value) in [
        ("title", &req.title),
        ("description", &req.description),
        ("location", &req.location),
        ("jobType", &req.job_type),
    ] {
        if let Some(value) = value {
            errors.require(field, value);
        }
    }
    check_job_numbers(
        &mut errors,
        req.salary,
        req.positions,
        req.experience_level,
    );
    errors.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::sample_post;
    use crate::models::user::ResumeUpload;
    use bytes::Bytes;
    use uuid::Uuid;

    #[test]
    fn test_email_accepts_plain_address() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.org"));
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("ada lovelace@example.com"));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(is_valid_phone("(555) 010-0100"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me"));
    }

    #[test]
    fn test_registration_collects_all_errors() {
        let req = RegisterUserRequest {
            fullname: "  ".to_string(),
            email: "nope".to_string(),
            phone_number: "x".to_string(),
            role: None,
        };
        let err = validate_registration(&req).unwrap_err();
        assert_eq!(err.fields(), vec!["fullname", "email", "phoneNumber"]);
        assert!(err.to_string().contains("fullname: is required"));
    }

    #[test]
    fn test_registration_phone_optional() {
        let req = RegisterUserRequest {
            fullname: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: String::new(),
            role: None,
        };
        assert!(validate_registration(&req).is_ok());
    }

    #[test]
    fn test_profile_update_empty_is_valid() {
        assert!(validate_profile_update(&ProfileUpdate::default(), 10).is_ok());
    }

    #[test]
    fn test_profile_update_rejects_non_pdf_and_oversize() {
        let update = ProfileUpdate {
            resume: Some(ResumeUpload {
                file_name: "cv.docx".to_string(),
                content_type: Some("application/msword".to_string()),
                bytes: Bytes::from(vec![0u8; 32]),
            }),
            ..Default::default()
        };
        let err = validate_profile_update(&update, 16).unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_job_posting_rules() {
        assert!(validate_job_posting(&sample_post(Uuid::new_v4())).is_ok());

        let mut bad = sample_post(Uuid::new_v4());
        bad.positions = 0;
        bad.salary = -1.0;
        bad.title = String::new();
        let err = validate_job_posting(&bad).unwrap_err();
        assert_eq!(err.fields(), vec!["title", "salary", "positions"]);
    }

    #[test]
    fn test_job_update_checks_only_present_fields() {
        assert!(validate_job_update(&UpdateJobRequest::default()).is_ok());
        let req = UpdateJobRequest {
            title: Some(" ".to_string()),
            positions: Some(-2),
            ..Default::default()
        };
        assert_eq!(
            validate_job_update(&req).unwrap_err().fields(),
            vec!["title", "positions"]
        );
    }

    #[test]
    fn test_company_name_required() {
        let req = RegisterCompanyRequest {
            name: "".to_string(),
            description: None,
            website: None,
            location: None,
            logo: None,
        };
        assert!(validate_company(&req).is_err());
        assert!(validate_company_update(&UpdateCompanyRequest::default()).is_ok());
    }
}
