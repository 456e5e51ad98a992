//! Evaluator repository, including the evaluator ↔ project assignment.
//!
//! The evaluator row and its project links are written in one transaction.

use rd_core::entities::Evaluator;
use rd_core::ids::PREFIX_EVALUATOR;
use rd_core::validation::EvaluatorFields;

use crate::error::DatabaseError;
use crate::service::DashboardService;

const SELECT_COLS: &str = "id, name, phone, email";

fn row_to_evaluator(row: &libsql::Row) -> Result<Evaluator, DatabaseError> {
    Ok(Evaluator {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        project_ids: Vec::new(),
    })
}

fn dedup_ids(ids: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        let id = id.trim();
        if !id.is_empty() && !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    out
}

async fn write_links(
    conn: &libsql::Connection,
    evaluator_id: &str,
    project_ids: &[String],
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM evaluator_projects WHERE evaluator_id = ?1",
        [evaluator_id],
    )
    .await?;
    for project_id in project_ids {
        conn.execute(
            "INSERT INTO evaluator_projects (evaluator_id, project_id) VALUES (?1, ?2)",
            [evaluator_id, project_id.as_str()],
        )
        .await?;
    }
    Ok(())
}

impl DashboardService {
    async fn ensure_projects_exist(&self, project_ids: &[String]) -> Result<(), DatabaseError> {
        for project_id in project_ids {
            self.ensure_exists("research_projects", "project", project_id)
                .await?;
        }
        Ok(())
    }

    async fn project_ids_for_evaluator(&self, evaluator_id: &str) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT project_id FROM evaluator_projects WHERE evaluator_id = ?1 ORDER BY project_id",
                [evaluator_id],
            )
            .await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        Ok(ids)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for invalid fields, or
    /// `DatabaseError::NotFound` if an assigned project does not exist.
    pub async fn create_evaluator(&self, fields: &EvaluatorFields) -> Result<Evaluator, DatabaseError> {
        fields.validate()?;
        let project_ids = dedup_ids(&fields.project_ids);
        self.ensure_projects_exist(&project_ids).await?;

        let id = self.db().generate_id(PREFIX_EVALUATOR).await?;

        let guard = self.lock_transaction().await;
        let tx = self.db().conn().transaction().await?;
        let result: Result<(), DatabaseError> = async {
            tx.execute(
                &format!("INSERT INTO evaluators ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
                [
                    id.as_str(),
                    fields.name.trim(),
                    fields.phone.trim(),
                    fields.email.trim(),
                ],
            )
            .await?;
            write_links(&tx, &id, &project_ids).await
        }
        .await;
        Self::finish_transaction(tx, result).await?;
        drop(guard);

        tracing::info!(evaluator_id = %id, projects = project_ids.len(), "evaluator created");
        self.get_evaluator(&id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no evaluator has this ID.
    pub async fn get_evaluator(&self, id: &str) -> Result<Evaluator, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM evaluators WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("evaluator", id))?;
        let mut evaluator = row_to_evaluator(&row)?;
        evaluator.project_ids = self.project_ids_for_evaluator(id).await?;
        Ok(evaluator)
    }

    /// All evaluators ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn list_evaluators(&self) -> Result<Vec<Evaluator>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM evaluators ORDER BY name COLLATE NOCASE, id"),
                (),
            )
            .await?;
        let mut evaluators = Vec::new();
        while let Some(row) = rows.next().await? {
            evaluators.push(row_to_evaluator(&row)?);
        }
        for evaluator in &mut evaluators {
            evaluator.project_ids = self.project_ids_for_evaluator(&evaluator.id).await?;
        }
        Ok(evaluators)
    }

    /// Replace an evaluator's fields and project assignment.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown evaluator or project,
    /// or `DatabaseError::Validation` for invalid fields.
    pub async fn update_evaluator(
        &self,
        id: &str,
        fields: &EvaluatorFields,
    ) -> Result<Evaluator, DatabaseError> {
        fields.validate()?;
        self.ensure_exists("evaluators", "evaluator", id).await?;
        let project_ids = dedup_ids(&fields.project_ids);
        self.ensure_projects_exist(&project_ids).await?;

        let guard = self.lock_transaction().await;
        let tx = self.db().conn().transaction().await?;
        let result: Result<(), DatabaseError> = async {
            tx.execute(
                "UPDATE evaluators SET name = ?1, phone = ?2, email = ?3 WHERE id = ?4",
                [fields.name.trim(), fields.phone.trim(), fields.email.trim(), id],
            )
            .await?;
            write_links(&tx, id, &project_ids).await
        }
        .await;
        Self::finish_transaction(tx, result).await?;
        drop(guard);

        self.get_evaluator(id).await
    }

    /// Delete an evaluator; project links go with it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no evaluator has this ID.
    pub async fn delete_evaluator(&self, id: &str) -> Result<(), DatabaseError> {
        let changed = self.execute("DELETE FROM evaluators WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("evaluator", id));
        }
        tracing::info!(evaluator_id = id, "evaluator deleted");
        Ok(())
    }

    /// Names of evaluators assigned to a project, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn evaluator_names_for_project(
        &self,
        project_id: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT e.name FROM evaluators e \
                 JOIN evaluator_projects ep ON ep.evaluator_id = e.id \
                 WHERE ep.project_id = ?1 ORDER BY e.name COLLATE NOCASE",
                [project_id],
            )
            .await?;
        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>(0)?);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_project, test_service};
    use pretty_assertions::assert_eq;

    fn fields(name: &str, project_ids: Vec<String>) -> EvaluatorFields {
        EvaluatorFields {
            name: name.into(),
            phone: "+254700000001".into(),
            email: format!("{}@example.org", name.to_lowercase()),
            project_ids,
        }
    }

    #[tokio::test]
    async fn create_with_projects() {
        let svc = test_service().await;
        let a = create_test_project(&svc, "A").await;
        let b = create_test_project(&svc, "B").await;

        let evaluator = svc
            .create_evaluator(&fields("Otieno", vec![a.id.clone(), b.id.clone(), a.id.clone()]))
            .await
            .unwrap();
        assert!(evaluator.id.starts_with("evr-"));
        let mut expected = vec![a.id.clone(), b.id.clone()];
        expected.sort();
        assert_eq!(evaluator.project_ids, expected);

        assert_eq!(svc.evaluator_names_for_project(&a.id).await.unwrap(), vec!["Otieno"]);
    }

    #[tokio::test]
    async fn unknown_project_writes_nothing() {
        let svc = test_service().await;
        let err = svc
            .create_evaluator(&fields("Njeri", vec!["prj-00000000".into()]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(svc.list_evaluators().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_assignment() {
        let svc = test_service().await;
        let a = create_test_project(&svc, "A").await;
        let b = create_test_project(&svc, "B").await;
        let evaluator = svc
            .create_evaluator(&fields("Achieng", vec![a.id.clone()]))
            .await
            .unwrap();

        let mut changed = fields("Achieng O.", vec![b.id.clone()]);
        changed.phone = String::new();
        let updated = svc.update_evaluator(&evaluator.id, &changed).await.unwrap();
        assert_eq!(updated.name, "Achieng O.");
        assert_eq!(updated.project_ids, vec![b.id.clone()]);
        assert!(svc.evaluator_names_for_project(&a.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_email_rejected() {
        let svc = test_service().await;
        let mut bad = fields("Kamau", vec![]);
        bad.email = "kamau-at-example".into();
        let err = svc.create_evaluator(&bad).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_evaluator_removes_links() {
        let svc = test_service().await;
        let a = create_test_project(&svc, "A").await;
        let evaluator = svc
            .create_evaluator(&fields("Mwangi", vec![a.id.clone()]))
            .await
            .unwrap();
        svc.delete_evaluator(&evaluator.id).await.unwrap();
        assert!(svc.evaluator_names_for_project(&a.id).await.unwrap().is_empty());
        assert!(svc.delete_evaluator(&evaluator.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_is_alphabetical() {
        let svc = test_service().await;
        svc.create_evaluator(&fields("zawadi", vec![])).await.unwrap();
        svc.create_evaluator(&fields("Amani", vec![])).await.unwrap();
        let names: Vec<String> = svc
            .list_evaluators()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Amani", "zawadi"]);
    }
}
