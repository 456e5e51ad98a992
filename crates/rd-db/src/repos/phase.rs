//! Evaluation phase repository.

use rd_core::entities::EvaluationPhase;
use rd_core::ids::PREFIX_PHASE;
use rd_core::validation::PhaseFields;

use crate::error::DatabaseError;
use crate::helpers::{date_param, get_opt_date, parse_enum};
use crate::service::DashboardService;

pub(crate) const SELECT_COLS: &str =
    "id, project_id, phase_type, start_date, end_date, completed, notes, sort_order";

pub(crate) fn row_to_phase(row: &libsql::Row) -> Result<EvaluationPhase, DatabaseError> {
    Ok(EvaluationPhase {
        id: row.get(0)?,
        project_id: row.get(1)?,
        phase_type: parse_enum(&row.get::<String>(2)?)?,
        start_date: get_opt_date(row, 3)?,
        end_date: get_opt_date(row, 4)?,
        completed: row.get::<i64>(5)? != 0,
        notes: row.get(6)?,
        sort_order: row.get(7)?,
    })
}

impl DashboardService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown project, or
    /// `DatabaseError::Validation` for invalid fields.
    pub async fn create_phase(
        &self,
        project_id: &str,
        fields: &PhaseFields,
    ) -> Result<EvaluationPhase, DatabaseError> {
        fields.validate()?;
        self.ensure_exists("research_projects", "project", project_id)
            .await?;

        let id = self.db().generate_id(PREFIX_PHASE).await?;
        self.execute(
            &format!(
                "INSERT INTO evaluation_phases ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0)"
            ),
            libsql::params_from_iter(vec![
                libsql::Value::from(id.as_str()),
                project_id.into(),
                fields.phase_type.as_str().into(),
                date_param(fields.start_date),
                date_param(fields.end_date),
                i64::from(fields.completed).into(),
                fields.notes.as_str().into(),
            ]),
        )
        .await?;

        tracing::debug!(project_id, phase_id = %id, "phase created");
        self.get_phase(&id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no phase has this ID.
    pub async fn get_phase(&self, id: &str) -> Result<EvaluationPhase, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM evaluation_phases WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("phase", id))?;
        row_to_phase(&row)
    }

    /// Phases of a project in timeline order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_phases(&self, project_id: &str) -> Result<Vec<EvaluationPhase>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM evaluation_phases WHERE project_id = ?1 \
                     ORDER BY sort_order, start_date IS NULL, start_date, rowid"
                ),
                [project_id],
            )
            .await?;

        let mut phases = Vec::new();
        while let Some(row) = rows.next().await? {
            phases.push(row_to_phase(&row)?);
        }
        Ok(phases)
    }

    /// Replace the editable fields of a phase belonging to `project_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the phase does not belong to the
    /// project, or `DatabaseError::Validation` for invalid fields.
    pub async fn update_phase(
        &self,
        project_id: &str,
        phase_id: &str,
        fields: &PhaseFields,
    ) -> Result<EvaluationPhase, DatabaseError> {
        fields.validate()?;

        let changed = self.execute(
            "UPDATE evaluation_phases
             SET phase_type = ?1, start_date = ?2, end_date = ?3, completed = ?4, notes = ?5
             WHERE id = ?6 AND project_id = ?7",
            libsql::params_from_iter(vec![
                libsql::Value::from(fields.phase_type.as_str()),
                date_param(fields.start_date),
                date_param(fields.end_date),
                i64::from(fields.completed).into(),
                fields.notes.as_str().into(),
                phase_id.into(),
                project_id.into(),
            ]),
        )
        .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("phase", phase_id));
        }
        self.get_phase(phase_id).await
    }

    /// Set or clear the completed flag.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no phase has this ID.
    pub async fn set_phase_completed(
        &self,
        phase_id: &str,
        completed: bool,
    ) -> Result<EvaluationPhase, DatabaseError> {
        let changed = self.execute(
            "UPDATE evaluation_phases SET completed = ?1 WHERE id = ?2",
            libsql::params![i64::from(completed), phase_id],
        )
        .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("phase", phase_id));
        }
        tracing::debug!(phase_id, completed, "phase status changed");
        self.get_phase(phase_id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the phase does not belong to the project.
    pub async fn delete_phase(&self, project_id: &str, phase_id: &str) -> Result<(), DatabaseError> {
        let changed = self.execute(
            "DELETE FROM evaluation_phases WHERE id = ?1 AND project_id = ?2",
            [phase_id, project_id],
        )
        .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("phase", phase_id));
        }
        Ok(())
    }
}
