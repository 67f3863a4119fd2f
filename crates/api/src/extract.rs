//! Multipart form intake
//!
//! Text parts are collected into a field map keyed by wire name; file parts
//! are stored through the media boundary as they stream in. Storage happens
//! before validation, so a later intake failure does not unwind an already
//! stored file.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use medlink_core::MediaStore;
use medlink_domain::constants::{MAX_PATIENT_DOCUMENTS, MAX_UPLOAD_BYTES};

use crate::error::ApiFailure;

/// File part name on doctor registration and update forms
const DOCTOR_PHOTO_FIELD: &str = "profilePhoto";
/// File part names on the patient registration form
const PATIENT_PHOTO_FIELD: &str = "profileImage";
const PATIENT_DOCUMENTS_FIELD: &str = "documents";

/// Media store categories, which become URL path segments
const DOCTOR_MEDIA: &str = "doctors";
const PATIENT_MEDIA: &str = "patients";
const DOCUMENT_MEDIA: &str = "patient_docs";

/// Everything one multipart request carried: text fields plus the public
/// URLs of any uploads already written to the media store.
#[derive(Debug, Default)]
pub struct FormIntake {
    pub fields: BTreeMap<String, String>,
    pub profile_photo: Option<String>,
    pub documents: Vec<String>,
}

/// Collect a doctor registration or update form
pub async fn doctor_form(
    context: &'static str,
    media: &Arc<dyn MediaStore>,
    multipart: Multipart,
) -> Result<FormIntake, ApiFailure> {
    collect(context, media, multipart, DOCTOR_PHOTO_FIELD, DOCTOR_MEDIA, false).await
}

/// Collect a patient registration form, including its document uploads
pub async fn patient_form(
    context: &'static str,
    media: &Arc<dyn MediaStore>,
    multipart: Multipart,
) -> Result<FormIntake, ApiFailure> {
    collect(context, media, multipart, PATIENT_PHOTO_FIELD, PATIENT_MEDIA, true).await
}

async fn collect(
    context: &'static str,
    media: &Arc<dyn MediaStore>,
    mut multipart: Multipart,
    photo_field: &str,
    photo_category: &str,
    accept_documents: bool,
) -> Result<FormIntake, ApiFailure> {
    let mut intake = FormIntake::default();

    while let Some(field) =
        multipart.next_field().await.map_err(|err| ApiFailure::upload(err.to_string()))?
    {
        // Unnamed parts carry nothing routable.
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == photo_field {
            intake.profile_photo = Some(store_file(context, media, photo_category, field).await?);
        } else if accept_documents && name == PATIENT_DOCUMENTS_FIELD {
            if intake.documents.len() >= MAX_PATIENT_DOCUMENTS {
                return Err(ApiFailure::upload(format!(
                    "more than {MAX_PATIENT_DOCUMENTS} document uploads"
                )));
            }
            intake.documents.push(store_file(context, media, DOCUMENT_MEDIA, field).await?);
        } else {
            let value =
                field.text().await.map_err(|err| ApiFailure::upload(err.to_string()))?;
            intake.fields.insert(name, value);
        }
    }

    Ok(intake)
}

async fn store_file(
    context: &'static str,
    media: &Arc<dyn MediaStore>,
    category: &str,
    field: Field<'_>,
) -> Result<String, ApiFailure> {
    let filename = field.file_name().unwrap_or("upload").to_string();
    let bytes = field.bytes().await.map_err(|err| ApiFailure::upload(err.to_string()))?;
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiFailure::upload(format!(
            "{filename} exceeds the {MAX_UPLOAD_BYTES} byte limit"
        )));
    }

    media
        .store(category, &filename, bytes.to_vec())
        .await
        .map_err(ApiFailure::wrap(context))
}
