//! Handlers for document attachments.

use axum::{
    Extension, Json,
    body::Body,
    extract::{Multipart, Path, Query, State, multipart::MultipartError},
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use serde_json::json;
use tokio_util::io::ReaderStream;

use crate::api::dto::archivo::OwnerParams;
use crate::application::services::archivo_service::NuevoArchivo;
use crate::domain::entities::{CurrentUser, DocumentoArchivo};
use crate::error::AppError;
use crate::state::AppState;

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("File exceeds the maximum upload size", json!({}))
    } else {
        AppError::bad_request("Invalid multipart body", json!({ "reason": e.body_text() }))
    }
}

fn parse_id(field: &str, value: &str) -> Result<i64, AppError> {
    value.trim().parse().map_err(|_| {
        AppError::bad_request("Invalid id", json!({ "field": field, "value": value }))
    })
}

/// Uploads an attachment.
///
/// Multipart fields: `archivo` (the file, with its content type), one of
/// `documentacion_id`, `recurso_documentacion_id` or
/// `entidad_documentacion_id`, and an optional `descripcion`.
///
/// # Endpoint
///
/// `POST /api/archivos`
///
/// # Errors
///
/// - 400 for a missing file, a type not accepted, or zero or several owners
/// - 404 for an unknown owner
/// - 413 above `MAX_UPLOAD_BYTES`
pub async fn upload_archivo_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentoArchivo>), AppError> {
    let mut owner = OwnerParams::default();
    let mut descripcion = None;
    let mut archivo = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "archivo" => {
                let nombre = field.file_name().unwrap_or("archivo").to_string();
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                archivo = Some((nombre, mime, bytes.to_vec()));
            }
            "descripcion" => {
                let text = field.text().await.map_err(multipart_error)?;
                descripcion = Some(text).filter(|t| !t.trim().is_empty());
            }
            "documentacion_id" => {
                let text = field.text().await.map_err(multipart_error)?;
                owner.documentacion_id = Some(parse_id(&name, &text)?);
            }
            "recurso_documentacion_id" => {
                let text = field.text().await.map_err(multipart_error)?;
                owner.recurso_documentacion_id = Some(parse_id(&name, &text)?);
            }
            "entidad_documentacion_id" => {
                let text = field.text().await.map_err(multipart_error)?;
                owner.entidad_documentacion_id = Some(parse_id(&name, &text)?);
            }
            _ => {}
        }
    }

    let (nombre_original, mime_type, contenido) = archivo.ok_or_else(|| {
        AppError::bad_request("Missing file part", json!({ "field": "archivo" }))
    })?;

    let nuevo = NuevoArchivo {
        nombre_original,
        mime_type,
        contenido,
        descripcion,
        owner: owner.owner()?,
    };

    let registro = state.archivo_service.upload(nuevo, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(registro)))
}

/// # Endpoint
///
/// `GET /api/archivos?recurso_documentacion_id=5`
pub async fn archivo_list_handler(
    State(state): State<AppState>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<Vec<DocumentoArchivo>>, AppError> {
    Ok(Json(state.archivo_service.list(params.owner()?).await?))
}

/// # Endpoint
///
/// `GET /api/archivos/{id}`
pub async fn get_archivo_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DocumentoArchivo>, AppError> {
    Ok(Json(state.archivo_service.get(id).await?))
}

/// Streams the stored bytes as an attachment.
///
/// # Endpoint
///
/// `GET /api/archivos/{id}/descarga`
pub async fn download_archivo_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let (archivo, file) = state.archivo_service.download(id).await?;

    let content_type = HeaderValue::from_str(&archivo.mime_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&content_disposition(&archivo.nombre_original))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    let mut response = Response::new(Body::from_stream(ReaderStream::new(file)));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    Ok(response)
}

/// # Endpoint
///
/// `DELETE /api/archivos/{id}`
pub async fn delete_archivo_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.archivo_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `attachment; filename="<ascii>"; filename*=UTF-8''<percent-encoded>`
fn content_disposition(nombre: &str) -> String {
    let ascii: String = nombre
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        urlencoding::encode(nombre)
    )
}
