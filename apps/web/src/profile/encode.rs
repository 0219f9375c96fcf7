use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use crate::error::ClientError;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A resume picked from disk, held in memory until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn pdf(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: PDF_CONTENT_TYPE.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk. Only `.pdf` names are tagged as PDF; the
    /// server rejects anything else.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::RequestSetup(format!("{}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        let content_type = if is_pdf {
            PDF_CONTENT_TYPE
        } else {
            "application/octet-stream"
        };

        Ok(Self {
            file_name,
            content_type: content_type.to_string(),
            bytes: Bytes::from(bytes),
        })
    }
}

/// Everything the profile endpoint accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdateRequest {
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub resume: Option<ResumeFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(ResumeFile),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: &'static str,
    pub value: FormValue,
}

impl FormPart {
    fn text(name: &'static str, value: &str) -> Self {
        Self {
            name,
            value: FormValue::Text(value.to_string()),
        }
    }
}

impl ProfileUpdateRequest {
    /// Field layout of the multipart body. Each skill is its own `skills`
    /// part so the list survives encoding.
    pub fn parts(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("fullname", &self.fullname),
            FormPart::text("email", &self.email),
            FormPart::text("phoneNumber", &self.phone_number),
            FormPart::text("bio", &self.bio),
        ];
        parts.extend(self.skills.iter().map(|s| FormPart::text("skills", s)));
        if let Some(resume) = &self.resume {
            parts.push(FormPart {
                name: "file",
                value: FormValue::File(resume.clone()),
            });
        }
        parts
    }

    pub fn to_multipart(&self) -> Result<Form, ClientError> {
        self.parts()
            .into_iter()
            .try_fold(Form::new(), |form, part| match part.value {
                FormValue::Text(text) => Ok(form.text(part.name, text)),
                FormValue::File(file) => {
                    let body = Part::bytes(file.bytes.to_vec())
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)
                        .map_err(|e| ClientError::RequestSetup(e.to_string()))?;
                    Ok(form.part(part.name, body))
                }
            })
    }
}
