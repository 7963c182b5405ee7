//! DTOs for attachments.

use serde::Deserialize;
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::ArchivoOwner;
use crate::error::AppError;

/// The owner of an attachment, as query parameters or multipart fields.
/// Exactly one must be set.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct OwnerParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub documentacion_id: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub recurso_documentacion_id: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub entidad_documentacion_id: Option<i64>,
}

impl OwnerParams {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] unless exactly one owner id is set.
    pub fn owner(&self) -> Result<ArchivoOwner, AppError> {
        ArchivoOwner::from_ids(
            self.documentacion_id,
            self.recurso_documentacion_id,
            self.entidad_documentacion_id,
        )
        .ok_or_else(|| {
            AppError::bad_request(
                "Exactly one of documentacion_id, recurso_documentacion_id or entidad_documentacion_id is required",
                json!({
                    "documentacion_id": self.documentacion_id,
                    "recurso_documentacion_id": self.recurso_documentacion_id,
                    "entidad_documentacion_id": self.entidad_documentacion_id,
                }),
            )
        })
    }
}
