//! Milestone repository.
//!
//! Every write goes through [`normalize_milestone`] so the stored status and
//! completion date always satisfy the save invariant.

use rd_core::entities::ProjectMilestone;
use rd_core::enums::MilestoneStatus;
use rd_core::ids::PREFIX_MILESTONE;
use rd_core::milestone::{StatusPatch, apply_status_patch, normalize_milestone};
use rd_core::validation::MilestoneFields;

use crate::error::DatabaseError;
use crate::helpers::{date_param, get_opt_date, parse_enum};
use crate::service::DashboardService;
use crate::updates::milestone::MilestoneUpdate;

pub(crate) const SELECT_COLS: &str =
    "id, project_id, name, description, due_date, status, completed_date, sort_order";

pub(crate) fn row_to_milestone(row: &libsql::Row) -> Result<ProjectMilestone, DatabaseError> {
    Ok(ProjectMilestone {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        due_date: get_opt_date(row, 4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        completed_date: get_opt_date(row, 6)?,
        sort_order: row.get(7)?,
    })
}

impl DashboardService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown project, or
    /// `DatabaseError::Validation` for invalid fields.
    pub async fn create_milestone(
        &self,
        project_id: &str,
        fields: &MilestoneFields,
    ) -> Result<ProjectMilestone, DatabaseError> {
        fields.validate()?;
        self.ensure_exists("research_projects", "project", project_id)
            .await?;

        let state = normalize_milestone(
            fields.status,
            fields.completed_date,
            fields.due_date,
            self.today(),
        );
        let id = self.db().generate_id(PREFIX_MILESTONE).await?;
        self.execute(
            &format!(
                "INSERT INTO project_milestones ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0)"
            ),
            libsql::params_from_iter(vec![
                libsql::Value::from(id.as_str()),
                project_id.into(),
                fields.name.trim().into(),
                fields.description.as_str().into(),
                date_param(fields.due_date),
                state.status.as_str().into(),
                date_param(state.completed_date),
            ]),
        )
        .await?;

        tracing::debug!(project_id, milestone_id = %id, status = %state.status, "milestone created");
        self.get_milestone(&id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no milestone has this ID.
    pub async fn get_milestone(&self, id: &str) -> Result<ProjectMilestone, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM project_milestones WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("milestone", id))?;
        row_to_milestone(&row)
    }

    /// Milestones of a project in timeline order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_milestones(
        &self,
        project_id: &str,
    ) -> Result<Vec<ProjectMilestone>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM project_milestones WHERE project_id = ?1 \
                     ORDER BY sort_order, due_date IS NULL, due_date, rowid"
                ),
                [project_id],
            )
            .await?;

        let mut milestones = Vec::new();
        while let Some(row) = rows.next().await? {
            milestones.push(row_to_milestone(&row)?);
        }
        Ok(milestones)
    }

    /// Update a milestone belonging to `project_id`, then re-apply the
    /// save invariant.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the milestone does not belong to
    /// the project, or `DatabaseError::Validation` for invalid fields.
    pub async fn update_milestone(
        &self,
        project_id: &str,
        milestone_id: &str,
        update: &MilestoneUpdate,
    ) -> Result<ProjectMilestone, DatabaseError> {
        let current = self.get_milestone(milestone_id).await?;
        if current.project_id != project_id {
            return Err(DatabaseError::not_found("milestone", milestone_id));
        }

        let fields = update.merged_with(&current);
        fields.validate()?;
        let state = normalize_milestone(
            fields.status,
            fields.completed_date,
            fields.due_date,
            self.today(),
        );

        self.execute(
            "UPDATE project_milestones
             SET name = ?1, description = ?2, due_date = ?3, status = ?4, completed_date = ?5
             WHERE id = ?6",
            libsql::params_from_iter(vec![
                libsql::Value::from(fields.name.trim()),
                fields.description.as_str().into(),
                date_param(fields.due_date),
                state.status.as_str().into(),
                date_param(state.completed_date),
                milestone_id.into(),
            ]),
        )
        .await?;
        self.get_milestone(milestone_id).await
    }

    /// Partial status update: absent fields keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no milestone has this ID.
    pub async fn patch_milestone_status(
        &self,
        milestone_id: &str,
        patch: StatusPatch,
    ) -> Result<ProjectMilestone, DatabaseError> {
        let current = self.get_milestone(milestone_id).await?;
        let state = apply_status_patch(
            current.status,
            current.completed_date,
            current.due_date,
            patch,
            self.today(),
        );

        self.execute(
            "UPDATE project_milestones SET status = ?1, completed_date = ?2 WHERE id = ?3",
            libsql::params_from_iter(vec![
                libsql::Value::from(state.status.as_str()),
                date_param(state.completed_date),
                milestone_id.into(),
            ]),
        )
        .await?;

        tracing::debug!(
            milestone_id,
            from = %current.status,
            to = %state.status,
            "milestone status changed"
        );
        Ok(ProjectMilestone {
            status: state.status,
            completed_date: state.completed_date,
            ..current
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the milestone does not belong to the project.
    pub async fn delete_milestone(
        &self,
        project_id: &str,
        milestone_id: &str,
    ) -> Result<(), DatabaseError> {
        let changed = self.execute(
            "DELETE FROM project_milestones WHERE id = ?1 AND project_id = ?2",
            [milestone_id, project_id],
        )
        .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("milestone", milestone_id));
        }
        Ok(())
    }

    /// Re-apply the save invariant to every non-completed milestone.
    ///
    /// Returns how many rows changed status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn refresh_milestone_statuses(&self) -> Result<u32, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM project_milestones WHERE status != ?1"
                ),
                [MilestoneStatus::Completed.as_str()],
            )
            .await?;
        let mut pending = Vec::new();
        while let Some(row) = rows.next().await? {
            pending.push(row_to_milestone(&row)?);
        }

        let today = self.today();
        let mut changed = 0u32;
        for milestone in pending {
            let state = normalize_milestone(
                milestone.status,
                milestone.completed_date,
                milestone.due_date,
                today,
            );
            if state.status != milestone.status {
                self.execute(
                    "UPDATE project_milestones SET status = ?1 WHERE id = ?2",
                    [state.status.as_str(), milestone.id.as_str()],
                )
                .await?;
                changed += 1;
            }
        }

        tracing::info!(changed, "milestone statuses refreshed");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_project, d, test_service, today};
    use crate::updates::milestone::MilestoneUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn fields(name: &str, due: Option<chrono::NaiveDate>, status: MilestoneStatus) -> MilestoneFields {
        MilestoneFields {
            name: name.into(),
            description: String::new(),
            due_date: due,
            status,
            completed_date: None,
        }
    }

    #[tokio::test]
    async fn completed_without_date_gets_today() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let m = svc
            .create_milestone(
                &project.id,
                &fields("Report", Some(d(2024, 7, 1)), MilestoneStatus::Completed),
            )
            .await
            .unwrap();
        assert_eq!(m.status, MilestoneStatus::Completed);
        assert_eq!(m.completed_date, Some(today()));
    }

    #[tokio::test]
    async fn past_due_is_saved_as_overdue() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let m = svc
            .create_milestone(
                &project.id,
                &fields("Protocol", Some(d(2024, 1, 1)), MilestoneStatus::Pending),
            )
            .await
            .unwrap();
        assert_eq!(m.status, MilestoneStatus::Overdue);
        assert_eq!(svc.get_milestone(&m.id).await.unwrap().status, MilestoneStatus::Overdue);
    }

    #[tokio::test]
    async fn moving_due_date_out_reverts_overdue() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let m = svc
            .create_milestone(
                &project.id,
                &fields("Ethics", Some(d(2024, 1, 1)), MilestoneStatus::Pending),
            )
            .await
            .unwrap();

        let update = MilestoneUpdateBuilder::new()
            .due_date(Some(d(2024, 12, 1)))
            .build();
        let updated = svc.update_milestone(&project.id, &m.id, &update).await.unwrap();
        assert_eq!(updated.status, MilestoneStatus::Pending);
    }

    #[tokio::test]
    async fn patch_status_round_trip() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let m = svc
            .create_milestone(
                &project.id,
                &fields("Inception", Some(d(2024, 8, 1)), MilestoneStatus::Pending),
            )
            .await
            .unwrap();

        let done = svc
            .patch_milestone_status(
                &m.id,
                StatusPatch {
                    status: Some(MilestoneStatus::Completed),
                    completed_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(done.completed_date, Some(today()));

        let reverted = svc
            .patch_milestone_status(
                &m.id,
                StatusPatch {
                    status: Some(MilestoneStatus::Pending),
                    completed_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(reverted.status, MilestoneStatus::Pending);
        assert_eq!(reverted.completed_date, None);
        assert_eq!(svc.get_milestone(&m.id).await.unwrap(), reverted);
    }

    #[tokio::test]
    async fn patch_with_only_date_keeps_status() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let mut f = fields("Data", Some(d(2024, 8, 1)), MilestoneStatus::Completed);
        f.completed_date = Some(d(2024, 6, 1));
        let m = svc.create_milestone(&project.id, &f).await.unwrap();

        let patched = svc
            .patch_milestone_status(
                &m.id,
                StatusPatch {
                    status: None,
                    completed_date: Some(d(2024, 6, 10)),
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.status, MilestoneStatus::Completed);
        assert_eq!(patched.completed_date, Some(d(2024, 6, 10)));
    }

    #[tokio::test]
    async fn update_from_other_project_is_not_found() {
        let svc = test_service().await;
        let a = create_test_project(&svc, "A").await;
        let b = create_test_project(&svc, "B").await;
        let m = svc
            .create_milestone(&a.id, &fields("M", None, MilestoneStatus::Pending))
            .await
            .unwrap();
        let update = MilestoneUpdateBuilder::new().name("Renamed").build();
        assert!(
            svc.update_milestone(&b.id, &m.id, &update)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn refresh_flags_newly_overdue_rows() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let m = svc
            .create_milestone(
                &project.id,
                &fields("Later", Some(d(2024, 7, 1)), MilestoneStatus::Pending),
            )
            .await
            .unwrap();
        assert_eq!(m.status, MilestoneStatus::Pending);

        // Same database, a month later.
        let svc = svc.with_today(d(2024, 7, 15));
        assert_eq!(svc.refresh_milestone_statuses().await.unwrap(), 1);
        assert_eq!(svc.get_milestone(&m.id).await.unwrap().status, MilestoneStatus::Overdue);
        assert_eq!(svc.refresh_milestone_statuses().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let err = svc
            .create_milestone(&project.id, &fields("  ", None, MilestoneStatus::Pending))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }
}
