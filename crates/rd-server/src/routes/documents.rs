//! Document upload, listing, removal and file serving.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use axum::routing::{delete, get};
use axum::{Json, Router};
use rd_core::entities::ResearchDocument;
use rd_core::responses::SuccessResponse;
use rd_db::repos::document::NewDocument;

use crate::error::ApiError;
use crate::state::AppState;

pub fn configure_document_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/projects/:id/documents",
            get(list_documents).post(upload_document),
        )
        .route(
            "/api/projects/:id/documents/:document_id",
            delete(delete_document),
        )
        .route("/api/documents/:id/view", get(view_document))
        .route("/api/documents/:id/download", get(download_document))
}

async fn list_documents(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<ResearchDocument>>, ApiError> {
    state.service().get_project(&project_id).await?;
    Ok(Json(state.service().list_documents(&project_id).await?))
}

#[derive(Debug, Default)]
struct UploadForm {
    name: Option<String>,
    description: String,
    file: Option<(String, String, Vec<u8>)>,
}

async fn read_upload(mut multipart: Multipart, limit: u64) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => form.name = Some(field.text().await?),
            Some("description") => form.description = field.text().await?,
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string).unwrap_or_else(|| {
                    mime_guess::from_path(&file_name)
                        .first_or_octet_stream()
                        .to_string()
                });
                let bytes = field.bytes().await?;
                if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > limit {
                    return Err(ApiError::PayloadTooLarge { limit });
                }
                form.file = Some((file_name, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Multipart fields: `name`, optional `description`, and `file`.
async fn upload_document(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ResearchDocument>), ApiError> {
    state.service().get_project(&project_id).await?;
    let form = read_upload(multipart, state.documents.max_upload_bytes()).await?;

    let mut errors = Vec::new();
    let name = form.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        errors.push("Name is required".to_string());
    }
    if form.file.is_none() {
        errors.push("File is required".to_string());
    }
    let Some((file_name, content_type, bytes)) = form.file.filter(|_| errors.is_empty()) else {
        return Err(ApiError::Validation(errors));
    };

    let file_path = state.documents.save(&file_name, &bytes).await?;
    let record = NewDocument {
        name: name.to_string(),
        file_path: file_path.clone(),
        file_name,
        content_type,
        size_bytes: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
        description: form.description.trim().to_string(),
    };

    match state.service().add_document(&project_id, &record).await {
        Ok(document) => {
            tracing::info!(id = %document.id, project = %project_id, size = document.size_bytes, "document uploaded");
            Ok((StatusCode::CREATED, Json(document)))
        }
        Err(e) => {
            if let Err(remove_err) = state.documents.remove(&file_path).await {
                tracing::warn!(path = %file_path, error = %remove_err, "could not remove orphaned upload");
            }
            Err(e.into())
        }
    }
}

async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path((project_id, document_id)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let document = state
        .service()
        .delete_document(&project_id, &document_id)
        .await?;
    if let Err(e) = state.documents.remove(&document.file_path).await {
        tracing::warn!(path = %document.file_path, error = %e, "could not remove document file");
    }
    Ok(Json(SuccessResponse::with_message("Document deleted")))
}

#[derive(Debug, Clone, Copy)]
enum Disposition {
    Inline,
    Attachment,
}

impl Disposition {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Attachment => "attachment",
        }
    }

    /// `Content-Disposition` naming the file. A name that cannot go in a
    /// header is dropped, never the disposition itself.
    fn header_value(self, file_name: &str) -> HeaderValue {
        let kind = self.as_str();
        let file_name = file_name.replace(['"', '\\'], "_");
        HeaderValue::from_str(&format!("{kind}; filename=\"{file_name}\""))
            .unwrap_or_else(|_| HeaderValue::from_static(kind))
    }
}

async fn serve_document(
    state: &AppState,
    id: &str,
    disposition: Disposition,
) -> Result<Response, ApiError> {
    let document = state.service().get_document(id).await?;
    let bytes = state
        .documents
        .read(&document.file_path)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ApiError::NotFound("Document file not found".into()),
            _ => ApiError::Storage(e),
        })?;

    let content_type = match disposition {
        Disposition::Inline => mime_guess::from_path(&document.file_name)
            .first_or_octet_stream()
            .to_string(),
        Disposition::Attachment => document.content_type.clone(),
    };
    let disposition_value = disposition.header_value(&document.file_name);

    let mut response = Response::new(Body::from(bytes));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(header::CONTENT_DISPOSITION, disposition_value);
    Ok(response)
}

async fn view_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    serve_document(&state, &id, Disposition::Inline).await
}

async fn download_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    serve_document(&state, &id, Disposition::Attachment).await
}
