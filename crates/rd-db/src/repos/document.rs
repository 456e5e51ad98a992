//! Research document records.
//!
//! Only metadata lives here; the HTTP layer owns the stored bytes and uses
//! `file_path` (relative to the media root) to find them.

use chrono::Utc;

use rd_core::entities::ResearchDocument;
use rd_core::ids::PREFIX_DOCUMENT;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::DashboardService;

const SELECT_COLS: &str = "id, project_id, name, file_path, file_name, content_type, \
     size_bytes, description, uploaded_at";

fn row_to_document(row: &libsql::Row) -> Result<ResearchDocument, DatabaseError> {
    let size = row.get::<i64>(6)?;
    Ok(ResearchDocument {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        file_path: row.get(3)?,
        file_name: row.get(4)?,
        content_type: row.get(5)?,
        size_bytes: u64::try_from(size)
            .map_err(|_| DatabaseError::InvalidState(format!("negative document size {size}")))?,
        description: row.get(7)?,
        uploaded_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Metadata for a file already written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub name: String,
    pub file_path: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub description: String,
}

impl DashboardService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown project, or
    /// `DatabaseError::Validation` when the name is blank.
    pub async fn add_document(
        &self,
        project_id: &str,
        doc: &NewDocument,
    ) -> Result<ResearchDocument, DatabaseError> {
        if doc.name.trim().is_empty() {
            return Err(DatabaseError::Validation(vec!["Name is required".into()]));
        }
        self.ensure_exists("research_projects", "project", project_id)
            .await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_DOCUMENT).await?;
        let size = i64::try_from(doc.size_bytes)
            .map_err(|_| DatabaseError::InvalidState("document too large".into()))?;

        self.execute(
            &format!(
                "INSERT INTO research_documents ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            libsql::params_from_iter(vec![
                libsql::Value::from(id.as_str()),
                project_id.into(),
                doc.name.trim().into(),
                doc.file_path.as_str().into(),
                doc.file_name.as_str().into(),
                doc.content_type.as_str().into(),
                size.into(),
                doc.description.as_str().into(),
                now.to_rfc3339().into(),
            ]),
        )
        .await?;

        tracing::info!(project_id, document_id = %id, size = doc.size_bytes, "document stored");
        self.get_document(&id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no document has this ID.
    pub async fn get_document(&self, id: &str) -> Result<ResearchDocument, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM research_documents WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("document", id))?;
        row_to_document(&row)
    }

    /// Documents of a project, newest upload first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_documents(
        &self,
        project_id: &str,
    ) -> Result<Vec<ResearchDocument>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM research_documents WHERE project_id = ?1 \
                     ORDER BY uploaded_at DESC, rowid DESC"
                ),
                [project_id],
            )
            .await?;

        let mut docs = Vec::new();
        while let Some(row) = rows.next().await? {
            docs.push(row_to_document(&row)?);
        }
        Ok(docs)
    }

    /// Remove the record and return it so the caller can delete the file.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the document does not belong to the project.
    pub async fn delete_document(
        &self,
        project_id: &str,
        document_id: &str,
    ) -> Result<ResearchDocument, DatabaseError> {
        let doc = self.get_document(document_id).await?;
        if doc.project_id != project_id {
            return Err(DatabaseError::not_found("document", document_id));
        }
        self.execute("DELETE FROM research_documents WHERE id = ?1", [document_id])
            .await?;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_project, test_service};

    fn new_doc(name: &str) -> NewDocument {
        NewDocument {
            name: name.into(),
            file_path: format!("research_documents/abc-{name}.pdf"),
            file_name: format!("{name}.pdf"),
            content_type: "application/pdf".into(),
            size_bytes: 2048,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn add_get_delete_document() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;

        let doc = svc.add_document(&project.id, &new_doc("protocol")).await.unwrap();
        assert!(doc.id.starts_with("doc-"));
        assert_eq!(doc.size_bytes, 2048);
        assert_eq!(svc.list_documents(&project.id).await.unwrap(), vec![doc.clone()]);

        let removed = svc.delete_document(&project.id, &doc.id).await.unwrap();
        assert_eq!(removed.file_path, "research_documents/abc-protocol.pdf");
        assert!(svc.get_document(&doc.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn delete_from_wrong_project_is_not_found() {
        let svc = test_service().await;
        let a = create_test_project(&svc, "A").await;
        let b = create_test_project(&svc, "B").await;
        let doc = svc.add_document(&a.id, &new_doc("consent")).await.unwrap();
        assert!(svc.delete_document(&b.id, &doc.id).await.unwrap_err().is_not_found());
        assert!(svc.get_document(&doc.id).await.is_ok());
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let err = svc.add_document(&project.id, &new_doc(" ")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }
}
