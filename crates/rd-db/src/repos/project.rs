//! Project repository: CRUD with cascading delete.

use chrono::Utc;

use rd_core::entities::ResearchProject;
use rd_core::enums::ProjectStatus;
use rd_core::ids::PREFIX_PROJECT;
use rd_core::validation::ProjectFields;

use crate::error::DatabaseError;
use crate::helpers::{date_param, get_opt_date, get_opt_string, opt_text_param, parse_datetime, parse_enum};
use crate::service::DashboardService;
use crate::updates::project::ProjectUpdate;

pub(crate) const SELECT_COLS: &str = "id, title, description, status, start_date, end_date, \
     lead_researcher, dashboard_url, created_at, updated_at";

pub(crate) fn row_to_project(row: &libsql::Row) -> Result<ResearchProject, DatabaseError> {
    Ok(ResearchProject {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        start_date: get_opt_date(row, 4)?,
        end_date: get_opt_date(row, 5)?,
        lead_researcher: get_opt_string(row, 6)?,
        dashboard_url: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

impl DashboardService {
    /// Create a project owned by `lead_researcher`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for invalid fields.
    pub async fn create_project(
        &self,
        fields: &ProjectFields,
        lead_researcher: Option<&str>,
    ) -> Result<ResearchProject, DatabaseError> {
        fields.validate()?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PROJECT).await?;

        self.execute(
            &format!(
                "INSERT INTO research_projects ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ),
            libsql::params_from_iter(vec![
                libsql::Value::from(id.as_str()),
                fields.title.trim().into(),
                fields.description.as_str().into(),
                fields.status.as_str().into(),
                date_param(fields.start_date),
                date_param(fields.end_date),
                opt_text_param(lead_researcher),
                opt_text_param(fields.dashboard_url.as_deref()),
                now.to_rfc3339().into(),
                now.to_rfc3339().into(),
            ]),
        )
        .await?;

        tracing::info!(project_id = %id, "project created");
        self.get_project(&id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this ID.
    pub async fn get_project(&self, id: &str) -> Result<ResearchProject, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM research_projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("project", id))?;
        row_to_project(&row)
    }

    /// All projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_projects(&self) -> Result<Vec<ResearchProject>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM research_projects ORDER BY created_at DESC, rowid DESC"
                ),
                (),
            )
            .await?;

        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Apply a partial update. The merged result is validated before writing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Validation`.
    pub async fn update_project(
        &self,
        id: &str,
        update: &ProjectUpdate,
    ) -> Result<ResearchProject, DatabaseError> {
        let current = self.get_project(id).await?;
        if update.is_empty() {
            return Ok(current);
        }
        update.merged_with(&current).validate()?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.trim().into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.as_str().into());
            idx += 1;
        }
        if let Some(status) = update.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(start_date) = update.start_date {
            sets.push(format!("start_date = ?{idx}"));
            params.push(date_param(start_date));
            idx += 1;
        }
        if let Some(end_date) = update.end_date {
            sets.push(format!("end_date = ?{idx}"));
            params.push(date_param(end_date));
            idx += 1;
        }
        if let Some(ref dashboard_url) = update.dashboard_url {
            sets.push(format!("dashboard_url = ?{idx}"));
            params.push(opt_text_param(dashboard_url.as_deref()));
            idx += 1;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(Utc::now().to_rfc3339().into());
        idx += 1;

        params.push(id.into());
        let sql = format!(
            "UPDATE research_projects SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );
        self.execute(&sql, libsql::params_from_iter(params))
            .await?;

        tracing::debug!(project_id = id, "project updated");
        self.get_project(id).await
    }

    /// Delete a project and everything it owns.
    ///
    /// Returns the stored paths of the project's documents so the caller can
    /// remove the files.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this ID.
    pub async fn delete_project(&self, id: &str) -> Result<Vec<String>, DatabaseError> {
        self.ensure_exists("research_projects", "project", id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT file_path FROM research_documents WHERE project_id = ?1",
                [id],
            )
            .await?;
        let mut file_paths = Vec::new();
        while let Some(row) = rows.next().await? {
            file_paths.push(row.get::<String>(0)?);
        }

        self.execute("DELETE FROM research_projects WHERE id = ?1", [id])
            .await?;

        tracing::info!(project_id = id, documents = file_paths.len(), "project deleted");
        Ok(file_paths)
    }

    /// Project counts per status over all projects, every status included.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_projects_by_status(
        &self,
    ) -> Result<Vec<(ProjectStatus, u32)>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT status, COUNT(*) FROM research_projects GROUP BY status",
                (),
            )
            .await?;

        let mut counts: Vec<(ProjectStatus, u32)> =
            ProjectStatus::ALL.iter().map(|s| (*s, 0)).collect();
        while let Some(row) = rows.next().await? {
            let status: ProjectStatus = parse_enum(&row.get::<String>(0)?)?;
            let count = crate::helpers::get_count(&row, 1)?;
            if let Some(entry) = counts.iter_mut().find(|(s, _)| *s == status) {
                entry.1 = count;
            }
        }
        Ok(counts)
    }
}
