use anyhow::Context;
use rd_db::repos::document::NewDocument;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocumentCommands;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash document`.
pub async fn handle(action: &DocumentCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DocumentCommands::Add {
            project_id,
            file,
            name,
            description,
        } => {
            let bytes = tokio::fs::read(file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let store = ctx.documents();
            let size_bytes = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
            if size_bytes > store.max_upload_bytes() {
                anyhow::bail!(
                    "{} is {size_bytes} bytes; the upload limit is {} bytes",
                    file.display(),
                    store.max_upload_bytes()
                );
            }

            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .context("document path has no file name")?
                .to_string();
            let display_name = name.clone().unwrap_or_else(|| file_name.clone());
            let content_type = mime_guess::from_path(file)
                .first_or_octet_stream()
                .essence_str()
                .to_string();

            let file_path = store.save(&file_name, &bytes).await?;
            let record = NewDocument {
                name: display_name,
                file_path: file_path.clone(),
                file_name,
                content_type,
                size_bytes,
                description: description.trim().to_string(),
            };
            match ctx.service.add_document(project_id, &record).await {
                Ok(document) => output(&document, flags.format),
                Err(error) => {
                    if let Err(remove_err) = store.remove(&file_path).await {
                        tracing::warn!(path = %file_path, error = %remove_err, "could not remove orphaned upload");
                    }
                    Err(error.into())
                }
            }
        }
        DocumentCommands::List { project_id } => {
            let documents = ctx.service.list_documents(project_id).await?;
            output(&apply_limit(documents, flags.limit), flags.format)
        }
        DocumentCommands::Delete {
            project_id,
            document_id,
        } => {
            let document = ctx.service.delete_document(project_id, document_id).await?;
            ctx.documents()
                .remove(&document.file_path)
                .await
                .with_context(|| format!("failed to remove {}", document.file_path))?;
            output(&json!({ "deleted": document.id }), flags.format)
        }
    }
}
