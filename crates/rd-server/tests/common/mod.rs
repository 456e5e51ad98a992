//! Shared harness for router tests: an in-memory service, a temp media
//! directory, and small fixture files for the survey endpoints.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use rd_config::{DashConfig, StaffToken};
use rd_db::service::DashboardService;
use rd_server::{AppState, api_router};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const SURVEY_CSV: &str = "\
,facility_mfl,facility_name,county,level,ownership,outpatient_jan,hiv_jan,htn_jan
0,12001,Kitui Referral,Kitui,Level 5,Ministry of Health,1200,240,120
1,12002,Mwingi HC,Kitui,Level 3,Ministry of Health,600,120,60
2,13001,Mbagathi,Nairobi,Level 4,Ministry of Health,2400,480,240
3,13002,Westlands Medical,Nairobi,Level 3,Private Practice,360,,12
";

pub const COUNTIES_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {"ADM1_EN": "Nairobi", "ADM1_PCODE": "KE047"},
     "geometry": {"type": "Point", "coordinates": [36.82, -1.29]}},
    {"type": "Feature", "properties": {"ADM1_EN": "Mombasa", "ADM1_PCODE": "KE001"},
     "geometry": {"type": "Point", "coordinates": [39.66, -4.04]}},
    {"type": "Feature", "properties": {"ADM1_EN": "Kitui", "ADM1_PCODE": "KE015"},
     "geometry": {"type": "Point", "coordinates": [38.01, -1.37]}}
  ]
}"#;

pub const TODAY: (i32, u32, u32) = (2024, 6, 15);

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub dir: TempDir,
}

pub fn config_in(dir: &TempDir) -> DashConfig {
    let mut config = DashConfig::default();
    config.storage.media_dir = dir.path().join("media").display().to_string();
    config.survey.csv_path = dir.path().join("survey.csv").display().to_string();
    config.survey.geojson_path = dir.path().join("counties.geojson").display().to_string();
    config
}

pub async fn spawn_with(dir: TempDir, config: &DashConfig) -> TestApp {
    let today = NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap();
    let service = DashboardService::new_local(":memory:", config.server.page_size)
        .await
        .unwrap()
        .with_today(today);
    let state = Arc::new(AppState::new(config, Arc::new(service)));
    TestApp {
        router: api_router(Arc::clone(&state)),
        state,
        dir,
    }
}

/// Open API with the survey fixtures on disk.
pub async fn spawn() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("survey.csv"), SURVEY_CSV).unwrap();
    std::fs::write(dir.path().join("counties.geojson"), COUNTIES_GEOJSON).unwrap();
    let config = config_in(&dir);
    spawn_with(dir, &config).await
}

/// API requiring the bearer token `secret-token` for user `wanjiru`.
pub async fn spawn_with_auth() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(&dir);
    config.auth.staff = vec![StaffToken {
        username: "wanjiru".into(),
        token: "secret-token".into(),
    }];
    spawn_with(dir, &config).await
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Reply {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        Reply {
            status,
            headers,
            body,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Reply {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> Reply {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Reply {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Reply {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> Reply {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Reply {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a project and return its ID.
    pub async fn create_project(&self, title: &str) -> String {
        let reply = self
            .post(
                "/api/projects",
                serde_json::json!({"title": title, "status": "active"}),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", String::from_utf8_lossy(&reply.body));
        reply.json()["id"].as_str().unwrap().to_string()
    }
}

pub const BOUNDARY: &str = "rdash-test-boundary";

/// Build a multipart body from `(field, filename, content)` parts.
pub fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: text/plain\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
