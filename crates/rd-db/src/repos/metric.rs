//! Progress metric repository.

use rd_core::entities::ProgressMetric;
use rd_core::ids::PREFIX_METRIC;
use rd_core::validation::MetricFields;

use crate::error::DatabaseError;
use crate::helpers::parse_date;
use crate::service::DashboardService;

const SELECT_COLS: &str = "id, project_id, name, value, target, date_recorded, notes";

fn row_to_metric(row: &libsql::Row) -> Result<ProgressMetric, DatabaseError> {
    Ok(ProgressMetric {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        value: row.get(3)?,
        target: row.get::<Option<f64>>(4)?,
        date_recorded: parse_date(&row.get::<String>(5)?)?,
        notes: row.get(6)?,
    })
}

impl DashboardService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown project, or
    /// `DatabaseError::Validation` for invalid fields.
    pub async fn record_metric(
        &self,
        project_id: &str,
        fields: &MetricFields,
    ) -> Result<ProgressMetric, DatabaseError> {
        fields.validate()?;
        self.ensure_exists("research_projects", "project", project_id)
            .await?;

        let id = self.db().generate_id(PREFIX_METRIC).await?;
        self.execute(
            &format!("INSERT INTO progress_metrics ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            libsql::params_from_iter(vec![
                libsql::Value::from(id.as_str()),
                project_id.into(),
                fields.name.trim().into(),
                fields.value.into(),
                fields.target.map_or(libsql::Value::Null, Into::into),
                fields.date_recorded.to_string().into(),
                fields.notes.as_str().into(),
            ]),
        )
        .await?;

        Ok(ProgressMetric {
            id,
            project_id: project_id.to_string(),
            name: fields.name.trim().to_string(),
            value: fields.value,
            target: fields.target,
            date_recorded: fields.date_recorded,
            notes: fields.notes.clone(),
        })
    }

    /// Metrics of a project, most recently recorded first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_metrics(&self, project_id: &str) -> Result<Vec<ProgressMetric>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM progress_metrics WHERE project_id = ?1 \
                     ORDER BY date_recorded DESC, rowid DESC"
                ),
                [project_id],
            )
            .await?;

        let mut metrics = Vec::new();
        while let Some(row) = rows.next().await? {
            metrics.push(row_to_metric(&row)?);
        }
        Ok(metrics)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the metric does not belong to the project.
    pub async fn delete_metric(&self, project_id: &str, metric_id: &str) -> Result<(), DatabaseError> {
        let changed = self.execute(
            "DELETE FROM progress_metrics WHERE id = ?1 AND project_id = ?2",
            [metric_id, project_id],
        )
        .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("metric", metric_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_project, d, test_service};

    fn fields(name: &str, value: f64, day: u32) -> MetricFields {
        MetricFields {
            name: name.into(),
            value,
            target: Some(120.0),
            date_recorded: d(2024, 3, day),
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn record_and_list_newest_first() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;

        svc.record_metric(&project.id, &fields("Facilities surveyed", 30.0, 1))
            .await
            .unwrap();
        let latest = svc
            .record_metric(&project.id, &fields("Facilities surveyed", 64.5, 20))
            .await
            .unwrap();

        let metrics = svc.list_metrics(&project.id).await.unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0], latest);
        assert_eq!(metrics[0].target, Some(120.0));
    }

    #[tokio::test]
    async fn non_finite_value_rejected() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "P").await;
        let err = svc
            .record_metric(&project.id, &fields("Bad", f64::NAN, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_scoped_to_project() {
        let svc = test_service().await;
        let a = create_test_project(&svc, "A").await;
        let b = create_test_project(&svc, "B").await;
        let metric = svc.record_metric(&a.id, &fields("M", 1.0, 2)).await.unwrap();

        assert!(svc.delete_metric(&b.id, &metric.id).await.unwrap_err().is_not_found());
        svc.delete_metric(&a.id, &metric.id).await.unwrap();
        assert!(svc.list_metrics(&a.id).await.unwrap().is_empty());
    }
}
