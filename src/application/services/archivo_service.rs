//! Attachment upload, download and removal.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::domain::entities::{ArchivoOwner, DocumentoArchivo, NewDocumentoArchivo};
use crate::domain::repositories::ArchivoRepository;
use crate::error::AppError;
use crate::infrastructure::storage::{FileStorage, StoredFile};

/// Accepted content types and the extension stored files get.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("application/pdf", "pdf"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("application/msword", "doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
    ),
    ("application/vnd.ms-excel", "xls"),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xlsx",
    ),
];

const MAX_NOMBRE_ORIGINAL: usize = 255;

/// An uploaded file before it is stored.
#[derive(Debug, Clone)]
pub struct NuevoArchivo {
    pub nombre_original: String,
    pub mime_type: String,
    pub contenido: Vec<u8>,
    pub descripcion: Option<String>,
    pub owner: ArchivoOwner,
}

/// Extension for an accepted content type. Parameters such as
/// `; charset=...` are ignored.
pub fn extension_for(mime_type: &str) -> Option<&'static str> {
    let base = mime_type.split(';').next().unwrap_or_default().trim();

    ALLOWED_TYPES
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(base))
        .map(|(_, ext)| *ext)
}

/// Keeps only the final path component of a client-supplied file name.
fn clean_nombre(nombre: &str) -> String {
    let base = nombre
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let base = if base.is_empty() { "archivo" } else { base };
    base.chars().take(MAX_NOMBRE_ORIGINAL).collect()
}

/// `{yyyymmddHHMMSS}_{16 random chars}.{ext}`
fn generate_nombre_almacenado(ext: &str) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    const SUFFIX_LEN: usize = 16;

    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect();

    format!("{}_{suffix}.{ext}", Utc::now().format("%Y%m%d%H%M%S"))
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub struct ArchivoService {
    archivos: Arc<dyn ArchivoRepository>,
    storage: Arc<dyn FileStorage>,
    max_bytes: usize,
}

impl ArchivoService {
    pub fn new(
        archivos: Arc<dyn ArchivoRepository>,
        storage: Arc<dyn FileStorage>,
        max_bytes: usize,
    ) -> Self {
        Self {
            archivos,
            storage,
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Stores an attachment and records its metadata.
    ///
    /// # Errors
    ///
    /// - [`AppError::PayloadTooLarge`] above the configured size limit
    /// - [`AppError::Validation`] for an empty file or a type not accepted
    /// - [`AppError::NotFound`] if the owner does not exist
    pub async fn upload(
        &self,
        archivo: NuevoArchivo,
        subido_por: Option<i64>,
    ) -> Result<DocumentoArchivo, AppError> {
        let tamano = archivo.contenido.len();

        if tamano > self.max_bytes {
            return Err(AppError::payload_too_large(
                "File exceeds the maximum upload size",
                json!({ "size": tamano, "max_bytes": self.max_bytes }),
            ));
        }
        if tamano == 0 {
            return Err(AppError::bad_request(
                "File is empty",
                json!({ "field": "archivo" }),
            ));
        }

        let ext = extension_for(&archivo.mime_type).ok_or_else(|| {
            AppError::bad_request(
                "File type not allowed",
                json!({ "field": "archivo", "mime_type": archivo.mime_type }),
            )
        })?;

        if !self.archivos.owner_exists(archivo.owner).await? {
            let (documentacion_id, recurso_documentacion_id, entidad_documentacion_id) =
                archivo.owner.ids();
            return Err(AppError::not_found(
                "Attachment owner not found",
                json!({
                    "documentacion_id": documentacion_id,
                    "recurso_documentacion_id": recurso_documentacion_id,
                    "entidad_documentacion_id": entidad_documentacion_id,
                }),
            ));
        }

        let nombre_almacenado = generate_nombre_almacenado(ext);
        self.storage
            .save(&nombre_almacenado, &archivo.contenido)
            .await?;

        let nuevo = NewDocumentoArchivo {
            nombre_original: clean_nombre(&archivo.nombre_original),
            nombre_almacenado: nombre_almacenado.clone(),
            mime_type: archivo.mime_type,
            tamano: tamano as i64,
            sha256: sha256_hex(&archivo.contenido),
            descripcion: archivo.descripcion,
            owner: archivo.owner,
            subido_por,
        };

        match self.archivos.create(nuevo).await {
            Ok(registro) => {
                info!(
                    id = registro.id,
                    nombre = %registro.nombre_original,
                    tamano = registro.tamano,
                    "Attachment uploaded"
                );
                Ok(registro)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&nombre_almacenado).await {
                    warn!(file = %nombre_almacenado, error = %cleanup, "Failed to remove orphaned file");
                }
                Err(e)
            }
        }
    }

    pub async fn list(&self, owner: ArchivoOwner) -> Result<Vec<DocumentoArchivo>, AppError> {
        self.archivos.list_by_owner(owner).await
    }

    pub async fn get(&self, id: i64) -> Result<DocumentoArchivo, AppError> {
        self.archivos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Archivo not found", json!({ "id": id })))
    }

    /// Metadata of an attachment and a reader over its stored bytes.
    pub async fn download(&self, id: i64) -> Result<(DocumentoArchivo, StoredFile), AppError> {
        let archivo = self.get(id).await?;
        let file = self.storage.open(&archivo.nombre_almacenado).await?;
        Ok((archivo, file))
    }

    /// Removes the metadata row, then the stored file. A file that cannot be
    /// removed is logged and left behind.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let archivo = self.get(id).await?;

        if !self.archivos.delete(id).await? {
            return Err(AppError::not_found("Archivo not found", json!({ "id": id })));
        }

        if let Err(e) = self.storage.delete(&archivo.nombre_almacenado).await {
            warn!(id, file = %archivo.nombre_almacenado, error = %e, "Failed to remove stored file");
        }

        info!(id, "Attachment deleted");
        Ok(())
    }
}
