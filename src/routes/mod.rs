// HTTP surface
pub mod errors;
pub mod matches;

use actix_web::web;

pub use errors::{handle_json_payload_error, handle_path_error, JsonError};
pub use matches::AppState;

/// Mount every endpoint under `/api/v1`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure),
    );
}
