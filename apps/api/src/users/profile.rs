use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::models::user::{parse_skills, ProfileUpdate, ResumeUpload};

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Decodes the profile-update multipart body.
///
/// Fields: `fullname`, `email`, `phoneNumber`, `bio`, `skills`, `file`.
/// `skills` may be repeated (one skill per field) or a single comma-separated
/// value; both forms are split, trimmed and concatenated in order. Blank text
/// fields and an empty file part count as absent.
pub async fn read_profile_update(mut multipart: Multipart) -> Result<ProfileUpdate, AppError> {
    let mut update = ProfileUpdate::default();
    let mut skills: Vec<String> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "fullname" => update.fullname = non_blank(field.text().await?),
            "email" => update.email = non_blank(field.text().await?),
            "phoneNumber" => update.phone_number = non_blank(field.text().await?),
            "bio" => update.bio = non_blank(field.text().await?),
            "skills" => skills.extend(parse_skills(&field.text().await?)),
            "file" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    update.resume = Some(ResumeUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            other => debug!("Ignoring unknown profile field '{other}'"),
        }
    }

    if !skills.is_empty() {
        update.skills = Some(skills);
    }
    Ok(update)
}
