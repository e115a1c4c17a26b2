//! Multipart parsing for new applications.

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

use crate::documents::DocumentKind;
use crate::errors::AppError;

pub const MISSING_FILES_MESSAGE: &str = "Please upload all required files";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Raw form as received. Every field is optional until [`ApplicationForm::validate`].
#[derive(Debug, Default)]
pub struct ApplicationForm {
    pub job_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub resume: Option<UploadedFile>,
    pub cover_letter: Option<UploadedFile>,
    pub portfolio: Option<UploadedFile>,
}

/// A form with every required field present.
#[derive(Debug, Clone)]
pub struct ValidatedApplication {
    pub job_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub documents: [(DocumentKind, UploadedFile); 3],
}

/// Drains the multipart stream into an [`ApplicationForm`].
/// Unknown fields are skipped; empty file parts count as missing.
pub async fn read_application_form(mut multipart: Multipart) -> Result<ApplicationForm, AppError> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        let kind = match name.as_str() {
            "resume" => Some(DocumentKind::Resume),
            "cover_letter" => Some(DocumentKind::CoverLetter),
            "portfolio" => Some(DocumentKind::Portfolio),
            _ => None,
        };

        if let Some(kind) = kind {
            let file_name = field.file_name().unwrap_or(&name).to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
            if bytes.is_empty() {
                continue;
            }
            let upload = Some(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
            match kind {
                DocumentKind::Resume => form.resume = upload,
                DocumentKind::CoverLetter => form.cover_letter = upload,
                DocumentKind::Portfolio => form.portfolio = upload,
            }
            continue;
        }

        let slot = match name.as_str() {
            "job_id" => &mut form.job_id,
            "first_name" => &mut form.first_name,
            "last_name" => &mut form.last_name,
            "email" => &mut form.email,
            "phone_number" => &mut form.phone_number,
            other => {
                debug!("Ignoring unexpected multipart field '{other}'");
                continue;
            }
        };
        let text = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
        let text = text.trim();
        *slot = (!text.is_empty()).then(|| text.to_string());
    }

    Ok(form)
}

impl ApplicationForm {
    /// Checks documents first, then identifiers, then contact details.
    pub fn validate(self) -> Result<ValidatedApplication, AppError> {
        let (Some(resume), Some(cover_letter), Some(portfolio)) =
            (self.resume, self.cover_letter, self.portfolio)
        else {
            return Err(AppError::Validation(MISSING_FILES_MESSAGE.to_string()));
        };

        let job_id = self
            .job_id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or_else(|| AppError::Validation("job_id must be a valid UUID".to_string()))?;

        Ok(ValidatedApplication {
            job_id,
            first_name: required(self.first_name, "first_name")?,
            last_name: required(self.last_name, "last_name")?,
            email: required(self.email, "email")?,
            phone_number: self.phone_number,
            documents: [
                (DocumentKind::Resume, resume),
                (DocumentKind::CoverLetter, cover_letter),
                (DocumentKind::Portfolio, portfolio),
            ],
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{field} is required")))
}
