use actix_web::web;

pub mod healthchecks;
pub mod ping;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(ping::ping_route)
        .service(healthchecks::list_checks)
        .service(healthchecks::create_check)
        .service(healthchecks::get_check)
        .service(healthchecks::delete_check);
}
