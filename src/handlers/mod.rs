//! HTTP handlers, grouped the way the routers are: public site, auth, and the admin
//! dashboard (one module per entity family).

use axum::extract::Multipart;

use crate::{AppState, client::{ApiClient, ForwardedCookies, Upload}, error::AppError};

pub mod auth;
pub mod branches;
pub mod contact;
pub mod dashboard;
pub mod fund_prices;
pub mod fund_reports;
pub mod funds;
pub mod news;
pub mod public;
pub mod team;

/// Largest upload accepted on the multipart routes (fund reports, images).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

impl AppState {
    /// Backend client carrying the caller's cookies. Used by every dashboard handler so
    /// the backend can authorize the session the guard only checked for presence.
    pub fn backend(&self, cookies: &ForwardedCookies) -> ApiClient {
        self.api.with_credentials(cookies)
    }
}

/// MultipartForm
///
/// Text fields and the single file part of a browser upload form.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub file: Option<Upload>,
}

impl MultipartForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.trim().is_empty())
    }

    /// The uploaded file, or a 400 when the form carried none or an empty one.
    pub fn require_file(&mut self) -> Result<Upload, AppError> {
        match self.file.take() {
            Some(upload) if !upload.bytes.is_empty() => Ok(upload),
            Some(_) => Err(AppError::BadRequest("uploaded file is empty".to_string())),
            None => Err(AppError::BadRequest("missing file".to_string())),
        }
    }
}

/// Drains a multipart body. The part named `file_field` becomes the upload; every
/// other part is read as text.
pub async fn read_multipart(mut multipart: Multipart, file_field: &str) -> Result<MultipartForm, AppError> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == file_field {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| AppError::BadRequest(format!("failed to read file: {err}")))?;
            form.file = Some(Upload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|err| AppError::BadRequest(format!("failed to read field {name}: {err}")))?;
            form.fields.push((name, value));
        }
    }

    Ok(form)
}

/// Accepts PDFs by MIME type. The `.pdf` extension only counts when the browser sent
/// no useful type (`application/octet-stream`); a declared non-PDF type is rejected.
pub fn ensure_pdf(upload: &Upload) -> Result<(), AppError> {
    let content_type = upload.content_type.trim();
    let by_type = content_type.eq_ignore_ascii_case("application/pdf");
    let untyped = content_type.is_empty()
        || content_type.eq_ignore_ascii_case("application/octet-stream");
    let by_name = untyped && upload.file_name.to_ascii_lowercase().ends_with(".pdf");
    if by_type || by_name {
        Ok(())
    } else {
        Err(AppError::BadRequest("report must be a PDF document".to_string()))
    }
}

pub fn ensure_image(upload: &Upload) -> Result<(), AppError> {
    if upload.content_type.to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        Err(AppError::BadRequest("file must be an image".to_string()))
    }
}
