use actix_web::{HttpResponse, Responder, get};
use chrono::Utc;
use serde_json::json;

/// Liveness route
/// Always answers 200; also a convenient polling target for the monitor
/// itself.
#[get("/ping")]
pub async fn ping_route() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok", "timestamp": Utc::now() }))
}
