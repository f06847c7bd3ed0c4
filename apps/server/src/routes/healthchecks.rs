use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use vigil::{CreateMonitor, MonitorService};

#[derive(Debug, Deserialize)]
pub struct CreateCheckRequest {
    url: Option<String>,
    name: Option<String>,
    /// Poll interval in milliseconds.
    interval: Option<u64>,
}

/// Ids arrive as raw path strings; anything that is not a UUID simply names
/// no health check.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::UnknownId)
}

/// List all health checks with their latest status
#[get("/healthchecks")]
pub async fn list_checks(service: web::Data<MonitorService>) -> HttpResponse {
    let checks = service.list_monitors().await;
    HttpResponse::Ok().json(json!({ "checks": checks }))
}

/// One health check with its full result history
#[get("/healthchecks/{id}")]
pub async fn get_check(
    service: web::Data<MonitorService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    let detail = service.get_monitor(id).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Register a new health check and start polling it
#[post("/healthchecks")]
pub async fn create_check(
    service: web::Data<MonitorService>,
    body: web::Json<CreateCheckRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let url = request.url.filter(|url| !url.is_empty()).ok_or(ApiError::MissingUrl)?;

    let monitor = service
        .create_monitor(CreateMonitor { url, name: request.name, interval_ms: request.interval })
        .await?;

    Ok(HttpResponse::Created().json(monitor))
}

/// Remove a health check and its history
#[delete("/healthchecks/{id}")]
pub async fn delete_check(
    service: web::Data<MonitorService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    service.delete_monitor(id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Health check deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use std::time::Duration;
    use tempfile::TempDir;
    use vigil::persistence::SnapshotFile;

    const DEAD_URL: &str = "http://127.0.0.1:1/";

    fn test_service(dir: &TempDir) -> web::Data<MonitorService> {
        let service = MonitorService::new(
            SnapshotFile::new(dir.path().join("state.json")),
            Duration::from_secs(2),
            false,
        )
        .unwrap();
        web::Data::new(service)
    }

    #[actix_web::test]
    async fn test_create_requires_url() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);
        let app = test::init_service(
            App::new().app_data(service).configure(crate::routes::routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/healthchecks")
                .set_json(json!({ "name": "no url" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "URL is required");
    }

    #[actix_web::test]
    async fn test_create_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);
        let app = test::init_service(
            App::new().app_data(service).configure(crate::routes::routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/healthchecks")
                .set_json(json!({ "url": "not a url" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/healthchecks")
                .set_json(json!({ "url": DEAD_URL, "interval": 100 }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Interval"));
    }

    #[actix_web::test]
    async fn test_crud_round_trip() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);
        let app = test::init_service(
            App::new().app_data(service.clone()).configure(crate::routes::routes),
        )
        .await;

        // Create
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/healthchecks")
                .set_json(json!({ "url": DEAD_URL, "name": "dead", "interval": 3_600_000 }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);

        let created: serde_json::Value = test::read_body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["name"], "dead");
        assert_eq!(created["intervalMs"], 3_600_000);

        // List contains it
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/healthchecks").to_request())
                .await;
        assert!(resp.status().is_success());
        let listed: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(listed["checks"].as_array().unwrap().len(), 1);

        // Get it
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri(&format!("/healthchecks/{id}")).to_request(),
        )
        .await;
        assert!(resp.status().is_success());
        let detail: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(detail["url"], DEAD_URL);
        assert!(detail["results"].is_array());

        // Delete it
        let resp = test::call_service(
            &app,
            test::TestRequest::delete().uri(&format!("/healthchecks/{id}")).to_request(),
        )
        .await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Health check deleted");

        // Gone now
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri(&format!("/healthchecks/{id}")).to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);

        service.shutdown().await;
    }

    #[actix_web::test]
    async fn test_unknown_and_malformed_ids_are_404() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);
        let app = test::init_service(
            App::new().app_data(service).configure(crate::routes::routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/healthchecks/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);

        let resp = test::call_service(
            &app,
            test::TestRequest::delete().uri("/healthchecks/not-a-uuid").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
    }
}
