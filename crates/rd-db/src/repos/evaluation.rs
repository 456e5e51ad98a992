//! Evaluation repository.

use chrono::Utc;

use rd_core::entities::Evaluation;
use rd_core::ids::PREFIX_EVALUATION;
use rd_core::validation::EvaluationFields;

use crate::error::DatabaseError;
use crate::helpers::{date_param, get_opt_date, get_score, parse_date, parse_datetime, parse_enum};
use crate::service::DashboardService;

const SELECT_COLS: &str = "id, project_id, phase, start_date, end_date, objectives, \
     patient_outcomes, compliance, safety, efficacy, notes, created_at, updated_at";

fn row_to_evaluation(row: &libsql::Row) -> Result<Evaluation, DatabaseError> {
    let efficacy = match row.get::<Option<i64>>(9)? {
        None => None,
        Some(_) => Some(get_score(row, 9)?),
    };
    Ok(Evaluation {
        id: row.get(0)?,
        project_id: row.get(1)?,
        phase: parse_enum(&row.get::<String>(2)?)?,
        start_date: parse_date(&row.get::<String>(3)?)?,
        end_date: get_opt_date(row, 4)?,
        objectives: row.get(5)?,
        patient_outcomes: get_score(row, 6)?,
        compliance: get_score(row, 7)?,
        safety: get_score(row, 8)?,
        efficacy,
        notes: row.get(10)?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

impl DashboardService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` listing every invalid field, or
    /// `DatabaseError::NotFound` for an unknown project.
    pub async fn create_evaluation(
        &self,
        fields: &EvaluationFields,
    ) -> Result<Evaluation, DatabaseError> {
        let scores = fields.validate()?;
        self.ensure_exists("research_projects", "project", &fields.project_id)
            .await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_EVALUATION).await?;
        self.execute(
            &format!(
                "INSERT INTO evaluations ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
            ),
            libsql::params_from_iter(vec![
                libsql::Value::from(id.as_str()),
                fields.project_id.as_str().into(),
                fields.phase.as_str().into(),
                fields.start_date.to_string().into(),
                date_param(fields.end_date),
                fields.objectives.trim().into(),
                i64::from(scores.patient_outcomes).into(),
                i64::from(scores.compliance).into(),
                i64::from(scores.safety).into(),
                scores
                    .efficacy
                    .map_or(libsql::Value::Null, |v| i64::from(v).into()),
                fields.notes.as_str().into(),
                now.to_rfc3339().into(),
                now.to_rfc3339().into(),
            ]),
        )
        .await?;

        tracing::info!(evaluation_id = %id, project_id = %fields.project_id, "evaluation created");
        self.get_evaluation(&id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no evaluation has this ID.
    pub async fn get_evaluation(&self, id: &str) -> Result<Evaluation, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM evaluations WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("evaluation", id))?;
        row_to_evaluation(&row)
    }

    /// Evaluations newest first, optionally for one project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_evaluations(
        &self,
        project_id: Option<&str>,
    ) -> Result<Vec<Evaluation>, DatabaseError> {
        let mut rows = match project_id {
            Some(project_id) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM evaluations WHERE project_id = ?1 \
                             ORDER BY created_at DESC, rowid DESC"
                        ),
                        [project_id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM evaluations ORDER BY created_at DESC, rowid DESC"
                        ),
                        (),
                    )
                    .await?
            }
        };

        let mut evaluations = Vec::new();
        while let Some(row) = rows.next().await? {
            evaluations.push(row_to_evaluation(&row)?);
        }
        Ok(evaluations)
    }

    /// Replace every editable field of an evaluation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown evaluation or project,
    /// or `DatabaseError::Validation` listing every invalid field.
    pub async fn update_evaluation(
        &self,
        id: &str,
        fields: &EvaluationFields,
    ) -> Result<Evaluation, DatabaseError> {
        let scores = fields.validate()?;
        self.ensure_exists("evaluations", "evaluation", id).await?;
        self.ensure_exists("research_projects", "project", &fields.project_id)
            .await?;

        self.execute(
            "UPDATE evaluations SET project_id = ?1, phase = ?2, start_date = ?3, end_date = ?4,
                 objectives = ?5, patient_outcomes = ?6, compliance = ?7, safety = ?8,
                 efficacy = ?9, notes = ?10, updated_at = ?11
             WHERE id = ?12",
            libsql::params_from_iter(vec![
                libsql::Value::from(fields.project_id.as_str()),
                fields.phase.as_str().into(),
                fields.start_date.to_string().into(),
                date_param(fields.end_date),
                fields.objectives.trim().into(),
                i64::from(scores.patient_outcomes).into(),
                i64::from(scores.compliance).into(),
                i64::from(scores.safety).into(),
                scores
                    .efficacy
                    .map_or(libsql::Value::Null, |v| i64::from(v).into()),
                fields.notes.as_str().into(),
                Utc::now().to_rfc3339().into(),
                id.into(),
            ]),
        )
        .await?;
        self.get_evaluation(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no evaluation has this ID.
    pub async fn delete_evaluation(&self, id: &str) -> Result<(), DatabaseError> {
        let changed = self.execute("DELETE FROM evaluations WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("evaluation", id));
        }
        Ok(())
    }
}
