//! Shared test utilities for rd-db unit tests.

pub(crate) mod helpers {
    use chrono::NaiveDate;
    use rd_core::entities::ResearchProject;
    use rd_core::enums::ProjectStatus;
    use rd_core::validation::ProjectFields;

    use crate::DashDb;
    use crate::service::DashboardService;

    pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Fixed "today" used by every test service.
    pub fn today() -> NaiveDate {
        d(2024, 6, 15)
    }

    /// In-memory service pinned to [`today`].
    pub async fn test_service() -> DashboardService {
        let db = DashDb::open_local(":memory:").await.unwrap();
        DashboardService::from_db(db).with_today(today())
    }

    pub fn project_fields(title: &str) -> ProjectFields {
        ProjectFields {
            title: title.into(),
            description: format!("{title} description"),
            status: ProjectStatus::Active,
            start_date: None,
            end_date: None,
            dashboard_url: None,
        }
    }

    pub async fn create_test_project(svc: &DashboardService, title: &str) -> ResearchProject {
        svc.create_project(&project_fields(title), Some("tester"))
            .await
            .unwrap()
    }
}
