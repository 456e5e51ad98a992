//! Dashboard aggregation: filtered, paginated project summaries plus
//! unfiltered status counts.

use rd_core::enums::ProjectStatus;
use rd_core::progress::{MilestoneTally, completion_percent};
use rd_core::responses::{
    DashboardFilter, DashboardResponse, PageInfo, ProjectOverview, ProjectSummary, StatusCount,
};

use crate::error::DatabaseError;
use crate::helpers::get_count;
use crate::repos::project::{SELECT_COLS, row_to_project};
use crate::service::DashboardService;

/// Project columns followed by the three per-project counts at indexes 10..=12.
fn summary_select() -> String {
    format!(
        "SELECT {SELECT_COLS}, \
         (SELECT COUNT(*) FROM evaluation_phases ph WHERE ph.project_id = p.id AND ph.completed = 0), \
         (SELECT COUNT(*) FROM project_milestones m WHERE m.project_id = p.id AND m.status = 'completed'), \
         (SELECT COUNT(*) FROM project_milestones m WHERE m.project_id = p.id) \
         FROM research_projects p"
    )
}

/// Resolve the requested page number the way the dashboard paginator does.
///
/// Missing or non-numeric input selects page 1; any other number outside
/// `1..=num_pages` selects the last page.
#[must_use]
pub fn resolve_page(requested: Option<&str>, num_pages: u32) -> u32 {
    let num_pages = num_pages.max(1);
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        None => 1,
        Some(raw) => match raw.parse::<i64>() {
            Err(_) => 1,
            Ok(n) if (1..=i64::from(num_pages)).contains(&n) => u32::try_from(n).unwrap_or(1),
            Ok(_) => num_pages,
        },
    }
}

/// Blank text filters count as absent.
fn normalize(filter: &DashboardFilter) -> DashboardFilter {
    DashboardFilter {
        project_name: filter
            .project_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
        ..filter.clone()
    }
}

fn where_clause(filter: &DashboardFilter) -> (String, Vec<libsql::Value>) {
    let mut clauses = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(status) = filter.status {
        params.push(status.as_str().into());
        clauses.push(format!("p.status = ?{}", params.len()));
    }
    if let Some(from) = filter.date_from {
        params.push(from.to_string().into());
        clauses.push(format!("p.start_date >= ?{}", params.len()));
    }
    if let Some(to) = filter.date_to {
        params.push(to.to_string().into());
        clauses.push(format!("p.end_date <= ?{}", params.len()));
    }
    if let Some(ref name) = filter.project_name {
        params.push(name.as_str().into());
        clauses.push(format!("instr(lower(p.title), lower(?{})) > 0", params.len()));
    }

    if clauses.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), params)
    }
}

impl DashboardService {
    fn row_to_summary(&self, row: &libsql::Row) -> Result<ProjectSummary, DatabaseError> {
        let project = row_to_project(row)?;
        let tally = MilestoneTally {
            completed: get_count(row, 11)?,
            total: get_count(row, 12)?,
        };
        let completion = completion_percent(project.start_date, project.end_date, self.today(), tally);
        Ok(ProjectSummary {
            active_phases: get_count(row, 10)?,
            completed_milestones: tally.completed,
            total_milestones: tally.total,
            completion_percent: completion,
            project,
        })
    }

    /// Summary (counts + completion) for one project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this ID.
    pub async fn project_summary(&self, id: &str) -> Result<ProjectSummary, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("{} WHERE p.id = ?1", summary_select()), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("project", id))?;
        self.row_to_summary(&row)
    }

    /// Summary plus the documents, metrics and evaluators shown on the
    /// project detail page.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this ID.
    pub async fn project_overview(&self, id: &str) -> Result<ProjectOverview, DatabaseError> {
        let summary = self.project_summary(id).await?;
        Ok(ProjectOverview {
            summary,
            documents: self.list_documents(id).await?,
            metrics: self.list_metrics(id).await?,
            evaluator_names: self.evaluator_names_for_project(id).await?,
        })
    }

    /// Build the dashboard for the given filters and requested page.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn dashboard(
        &self,
        filter: &DashboardFilter,
        requested_page: Option<&str>,
    ) -> Result<DashboardResponse, DatabaseError> {
        let filter = normalize(filter);
        let (where_sql, params) = where_clause(&filter);

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM research_projects p{where_sql}"),
                libsql::params_from_iter(params.clone()),
            )
            .await?;
        let total_items = match rows.next().await? {
            Some(row) => get_count(&row, 0)?,
            None => 0,
        };

        let page_size = self.page_size();
        let num_pages = total_items.div_ceil(page_size).max(1);
        let number = resolve_page(requested_page, num_pages);
        let offset = (number - 1) * page_size;

        let mut page_params = params;
        page_params.push(i64::from(page_size).into());
        let limit_idx = page_params.len();
        page_params.push(i64::from(offset).into());
        let offset_idx = page_params.len();

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "{}{where_sql} ORDER BY p.created_at DESC, p.rowid DESC \
                     LIMIT ?{limit_idx} OFFSET ?{offset_idx}",
                    summary_select()
                ),
                libsql::params_from_iter(page_params),
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(self.row_to_summary(&row)?);
        }

        let status_counts: Vec<StatusCount> = self
            .count_projects_by_status()
            .await?
            .into_iter()
            .map(|(status, count)| StatusCount {
                status,
                label: status.label().to_string(),
                count,
            })
            .collect();
        let total_projects = status_counts.iter().map(|c| c.count).sum();

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT DISTINCT title FROM research_projects ORDER BY title",
                (),
            )
            .await?;
        let mut project_names = Vec::new();
        while let Some(row) = rows.next().await? {
            project_names.push(row.get::<String>(0)?);
        }

        tracing::debug!(
            total_items,
            page = number,
            num_pages,
            "dashboard built"
        );

        Ok(DashboardResponse {
            projects,
            page: PageInfo {
                number,
                num_pages,
                page_size,
                total_items,
                has_previous: number > 1,
                has_next: number < num_pages,
            },
            status_counts,
            total_projects,
            project_names,
            filter,
        })
    }
}

/// Count of projects with `status` in a dashboard response.
#[must_use]
pub fn status_count(response: &DashboardResponse, status: ProjectStatus) -> u32 {
    response
        .status_counts
        .iter()
        .find(|c| c.status == status)
        .map_or(0, |c| c.count)
}
