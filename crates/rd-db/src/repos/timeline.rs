//! Project timeline view and drag-and-drop reordering.

use chrono::NaiveDate;
use rd_core::enums::TimelineKind;
use rd_core::milestone::normalize_milestone;
use rd_core::responses::ProjectTimeline;
use rd_core::timeline::{TimelineOrderItem, build_timeline};

use crate::error::DatabaseError;
use crate::helpers::date_param;
use crate::repos::milestone::{SELECT_COLS, row_to_milestone};
use crate::service::DashboardService;

impl DashboardService {
    /// Project with its phases, milestones and the merged Gantt task list.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this ID.
    pub async fn project_timeline(&self, project_id: &str) -> Result<ProjectTimeline, DatabaseError> {
        let project = self.get_project(project_id).await?;
        let phases = self.list_phases(project_id).await?;
        let milestones = self.list_milestones(project_id).await?;
        let tasks = build_timeline(&phases, &milestones, self.today());
        Ok(ProjectTimeline {
            project,
            phases,
            milestones,
            tasks,
        })
    }

    /// Set `sort_order` on every referenced phase or milestone.
    ///
    /// All rows are updated in one transaction; an unknown ID rolls back the
    /// whole request. Milestones are re-saved, so a reorder also refreshes
    /// their overdue status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` naming the first unknown item.
    pub async fn reorder_timeline(&self, items: &[TimelineOrderItem]) -> Result<u32, DatabaseError> {
        let today = self.today();
        let guard = self.lock_transaction().await;
        let tx = self.db().conn().transaction().await?;

        let result: Result<u32, DatabaseError> = async {
            let mut count = 0u32;
            for item in items {
                let id = item.entity_id();
                let changed = match item.kind {
                    TimelineKind::Phase => {
                        tx.execute(
                            "UPDATE evaluation_phases SET sort_order = ?1 WHERE id = ?2",
                            libsql::params![item.order, id],
                        )
                        .await?
                    }
                    TimelineKind::Milestone => reorder_milestone(&tx, id, item.order, today).await?,
                };
                if changed == 0 {
                    return Err(DatabaseError::not_found(item.kind.as_str(), id));
                }
                count += 1;
            }
            Ok(count)
        }
        .await;

        let count = Self::finish_transaction(tx, result).await?;
        drop(guard);
        tracing::debug!(count, "timeline reordered");
        Ok(count)
    }
}

/// Write a milestone's new position together with its re-normalized status.
async fn reorder_milestone(
    conn: &libsql::Connection,
    id: &str,
    order: i64,
    today: NaiveDate,
) -> Result<u64, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM project_milestones WHERE id = ?1"),
            [id],
        )
        .await?;
    let Some(row) = rows.next().await? else {
        return Ok(0);
    };
    let current = row_to_milestone(&row)?;
    drop(rows);
    let state = normalize_milestone(current.status, current.completed_date, current.due_date, today);

    Ok(conn
        .execute(
            "UPDATE project_milestones SET sort_order = ?1, status = ?2, completed_date = ?3 WHERE id = ?4",
            libsql::params_from_iter(vec![
                libsql::Value::from(order),
                state.status.as_str().into(),
                date_param(state.completed_date),
                id.into(),
            ]),
        )
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_project, d, project_fields, test_service};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use rd_core::enums::{MilestoneStatus, PhaseType, TaskState};
    use rd_core::validation::{MilestoneFields, PhaseFields};

    fn phase(start: Option<chrono::NaiveDate>, end: Option<chrono::NaiveDate>) -> PhaseFields {
        PhaseFields {
            phase_type: PhaseType::Baseline,
            start_date: start,
            end_date: end,
            completed: false,
            notes: String::new(),
        }
    }

    fn milestone(name: &str, due: Option<chrono::NaiveDate>) -> MilestoneFields {
        MilestoneFields {
            name: name.into(),
            description: String::new(),
            due_date: due,
            status: MilestoneStatus::Pending,
            completed_date: None,
        }
    }

    #[tokio::test]
    async fn timeline_merges_and_excludes_undated() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let p = svc
            .create_phase(&project.id, &phase(Some(d(2024, 5, 1)), Some(d(2024, 7, 1))))
            .await
            .unwrap();
        svc.create_phase(&project.id, &phase(Some(d(2024, 5, 1)), None))
            .await
            .unwrap();
        let m = svc
            .create_milestone(&project.id, &milestone("Report", Some(d(2024, 6, 1))))
            .await
            .unwrap();
        svc.create_milestone(&project.id, &milestone("Someday", None))
            .await
            .unwrap();

        let timeline = svc.project_timeline(&project.id).await.unwrap();
        assert_eq!(timeline.phases.len(), 2);
        assert_eq!(timeline.milestones.len(), 2);
        let ids: Vec<String> = timeline.tasks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec![format!("phase-{}", p.id), format!("milestone-{}", m.id)]);
        // Due 2024-06-01, today 2024-06-15: saved as overdue.
        assert_eq!(timeline.tasks[1].state, TaskState::Overdue);
    }

    #[tokio::test]
    async fn reorder_updates_sort_order() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let p = svc
            .create_phase(&project.id, &phase(None, None))
            .await
            .unwrap();
        let m = svc
            .create_milestone(&project.id, &milestone("M", None))
            .await
            .unwrap();

        let count = svc
            .reorder_timeline(&[
                TimelineOrderItem {
                    kind: TimelineKind::Phase,
                    id: format!("phase-{}", p.id),
                    order: 2,
                },
                TimelineOrderItem {
                    kind: TimelineKind::Milestone,
                    id: m.id.clone(),
                    order: 1,
                },
            ])
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(svc.get_phase(&p.id).await.unwrap().sort_order, 2);
        assert_eq!(svc.get_milestone(&m.id).await.unwrap().sort_order, 1);
    }

    #[tokio::test]
    async fn reorder_with_unknown_id_writes_nothing() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let p = svc
            .create_phase(&project.id, &phase(None, None))
            .await
            .unwrap();

        let err = svc
            .reorder_timeline(&[
                TimelineOrderItem {
                    kind: TimelineKind::Phase,
                    id: p.id.clone(),
                    order: 7,
                },
                TimelineOrderItem {
                    kind: TimelineKind::Milestone,
                    id: "mst-00000000".into(),
                    order: 1,
                },
            ])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(svc.get_phase(&p.id).await.unwrap().sort_order, 0);

        // The connection is usable again after the rollback.
        svc.reorder_timeline(&[TimelineOrderItem {
            kind: TimelineKind::Phase,
            id: p.id.clone(),
            order: 3,
        }])
        .await
        .unwrap();
        assert_eq!(svc.get_phase(&p.id).await.unwrap().sort_order, 3);
    }

    #[tokio::test]
    async fn reorder_resaves_milestone_status() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let m = svc
            .create_milestone(&project.id, &milestone("Report", Some(d(2024, 7, 1))))
            .await
            .unwrap();
        assert_eq!(m.status, MilestoneStatus::Pending);

        // Due date slips into the past without going through the repository.
        svc.db()
            .conn()
            .execute(
                "UPDATE project_milestones SET due_date = '2024-06-01' WHERE id = ?1",
                [m.id.as_str()],
            )
            .await
            .unwrap();

        svc.reorder_timeline(&[TimelineOrderItem {
            kind: TimelineKind::Milestone,
            id: format!("milestone-{}", m.id),
            order: 2,
        }])
        .await
        .unwrap();

        let stored = svc.get_milestone(&m.id).await.unwrap();
        assert_eq!(stored.sort_order, 2);
        assert_eq!(stored.status, MilestoneStatus::Overdue);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn failed_reorder_keeps_concurrent_writes() {
        let svc = Arc::new(test_service().await);
        let project = create_test_project(&svc, "Anchor").await;
        let p = svc
            .create_phase(&project.id, &phase(None, None))
            .await
            .unwrap();

        let writer = {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move {
                let mut created = 0usize;
                for i in 0..200 {
                    if svc
                        .create_project(&project_fields(&format!("Concurrent {i}")), None)
                        .await
                        .is_ok()
                    {
                        created += 1;
                    }
                    tokio::task::yield_now().await;
                }
                created
            })
        };

        let mut items: Vec<TimelineOrderItem> = (0..5000)
            .map(|order| TimelineOrderItem {
                kind: TimelineKind::Phase,
                id: p.id.clone(),
                order,
            })
            .collect();
        items.push(TimelineOrderItem {
            kind: TimelineKind::Phase,
            id: "phs-missing".into(),
            order: 0,
        });
        let err = svc.reorder_timeline(&items).await.unwrap_err();
        assert!(err.is_not_found());

        let created = writer.await.unwrap();
        assert_eq!(created, 200);

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM research_projects", ())
            .await
            .unwrap();
        let stored: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(stored, 201);
        assert_eq!(svc.get_phase(&p.id).await.unwrap().sort_order, 0);
    }
}
