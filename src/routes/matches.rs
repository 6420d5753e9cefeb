use actix_web::{http::header, web, HttpResponse, Responder};
use std::time::SystemTime;
use uuid::Uuid;
use validator::Validate;

use crate::core::catalogue::catalogue;
use crate::core::{MatchError, Matcher, Table};
use crate::models::{CatalogueTopic, ErrorResponse, HealthResponse, MatchConfig, MatchRequest, MatchResponse};
use crate::services::{export_csv, ResultStore};

pub const EXPORT_FILENAME: &str = "mentor_matches.csv";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub results: ResultStore,
    pub defaults: MatchConfig,
    pub max_population: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches", web::post().to(create_matches))
        .route("/matches/{token}/export", web::get().to(export_matches))
        .route("/catalogue", web::get().to(list_catalogue));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn match_error_response(err: &MatchError) -> HttpResponse {
    error_response(actix_web::http::StatusCode::BAD_REQUEST, err.kind(), err.to_string())
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Pair two populations
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "mentors": {"csv": "Mentor Name,..."},
///   "mentees": {"rows": [{"UG_Full_Name": "..."}]},
///   "threshold": 80,
///   "priorities": ["industry", "role", "interest", "keyword"],
///   "strategy": "optimal|greedy",
///   "policy": "category_catalogue|priority_weighted"
/// }
/// ```
async fn create_matches(state: web::Data<AppState>, req: web::Json<MatchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "validation_failed",
            errors.to_string(),
        );
    }

    let config = match req.to_config(&state.defaults) {
        Ok(config) => config,
        Err(e) => return match_error_response(&e),
    };

    let (mentors, mentees) = match (req.mentors.to_table(), req.mentees.to_table()) {
        (Ok(mentors), Ok(mentees)) => (mentors, mentees),
        (Err(e), _) | (_, Err(e)) => return match_error_response(&e),
    };

    if let Some(response) = check_population(&mentors, &mentees, state.max_population) {
        return response;
    }

    tracing::info!(
        "Matching {} mentor rows against {} mentee rows ({} strategy, {} policy)",
        mentors.len(),
        mentees.len(),
        config.strategy().as_str(),
        config.policy().as_str()
    );

    // Scoring is CPU bound, keep it off the async workers
    let outcome = match web::block(move || Matcher::new(config).match_tables(&mentors, &mentees)).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            tracing::info!("Rejected match request: {}", e);
            return match_error_response(&e);
        }
        Err(e) => {
            tracing::error!("Matching task failed: {}", e);
            return error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "matching_failed",
                e.to_string(),
            );
        }
    };

    let token = state.results.insert(outcome.clone()).await;
    HttpResponse::Ok().json(MatchResponse::new(token, config, &outcome))
}

fn check_population(mentors: &Table, mentees: &Table, max: usize) -> Option<HttpResponse> {
    let largest = mentors.len().max(mentees.len());
    if largest <= max {
        return None;
    }

    tracing::warn!("Rejected population of {} rows (limit {})", largest, max);
    Some(error_response(
        actix_web::http::StatusCode::PAYLOAD_TOO_LARGE,
        "population_too_large",
        format!("At most {} rows per dataset are accepted, got {}", max, largest),
    ))
}

/// Download a previous result as CSV
///
/// GET /api/v1/matches/{token}/export
async fn export_matches(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let token = path.into_inner();

    let Some(stored) = state.results.get(&token).await else {
        return error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "result_not_found",
            format!("No match result for token {}", token),
        );
    };

    let mut body = Vec::new();
    if let Err(e) = export_csv(&stored.outcome, &mut body) {
        tracing::error!("Failed to export result {}: {}", token, e);
        return error_response(
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            "export_failed",
            e.to_string(),
        );
    }

    tracing::debug!("Exported {} pairs for {}", stored.outcome.records.len(), token);

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", EXPORT_FILENAME),
        ))
        .insert_header(header::LastModified(SystemTime::from(stored.created_at).into()))
        .body(body)
}

/// List the keyword catalogue
///
/// GET /api/v1/catalogue
async fn list_catalogue() -> impl Responder {
    let topics: Vec<CatalogueTopic> = catalogue().patterns().map(CatalogueTopic::from).collect();
    HttpResponse::Ok().json(topics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    fn app_state(max_population: usize) -> AppState {
        AppState {
            results: ResultStore::new(16, 60),
            defaults: MatchConfig::default(),
            max_population,
        }
    }

    fn request_body() -> Value {
        json!({
            "mentors": {"rows": [{
                "Mentor Name": "Alice",
                "Mentor Company Category": "Finance",
                "Areas of Industry Experience": "Banking",
                "Mentor Job Role Category": "Analyst",
                "Mentor Area of Interests Keywords": "Travel",
                "Mentor Combined Keywords-Cleaned": "data"
            }]},
            "mentees": {"rows": [{
                "UG_Full_Name": "Tom",
                "Mentee 1st Choice of Industry": "Finance",
                "Mentee 2nd Choice of Industry": "Tech",
                "Mentee 3rd Choice of Industry": "Health",
                "Mentee Job Role Category": "Analyst",
                "Mentee Area of Personal Interest": "travel",
                "Mentee Keywords": "data"
            }]}
        })
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(crate::routes::configure_routes)).await;
        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_match_then_export() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(100)))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/matches")
            .set_json(request_body())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        // industry 10 * 4, role 3, interest 2, keyword 1 * 1
        assert_eq!(body["totalScore"].as_f64(), Some(46.0));
        assert_eq!(body["matches"][0]["mentee"], "Tom");
        assert_eq!(body["matches"][0]["mentor"], "Alice");
        assert_eq!(body["policy"], "priority_weighted");

        let token = body["exportToken"].as_str().unwrap();
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/matches/{}/export", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=mentor_matches.csv"
        );
        assert!(resp.headers().contains_key(header::LAST_MODIFIED));

        let csv = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("Mentee,Mentor,Score"));
        assert!(lines.next().unwrap().starts_with("Tom,Alice,46.0"));
    }

    #[actix_web::test]
    async fn test_missing_column_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(100)))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let mut body = request_body();
        body["mentees"]["rows"][0]
            .as_object_mut()
            .unwrap()
            .remove("Mentee Keywords");

        let req = test::TestRequest::post().uri("/api/v1/matches").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "missing_field");
    }

    #[actix_web::test]
    async fn test_nameless_row_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(100)))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let mut body = request_body();
        body["mentees"]["rows"][0]["UG_Full_Name"] = json!("");

        let req = test::TestRequest::post().uri("/api/v1/matches").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "missing_name");
    }

    #[actix_web::test]
    async fn test_population_limit() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(0)))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/matches")
            .set_json(request_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 413);
    }

    #[actix_web::test]
    async fn test_malformed_export_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(100)))
                .app_data(web::PathConfig::default().error_handler(crate::routes::handle_path_error))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/matches/not-a-uuid/export")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "invalid_path");
    }

    #[actix_web::test]
    async fn test_unknown_export_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(100)))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/matches/{}/export", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn test_catalogue_listing() {
        let app = test::init_service(App::new().configure(crate::routes::configure_routes)).await;
        let req = test::TestRequest::get().uri("/api/v1/catalogue").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let topics = body.as_array().unwrap();
        assert_eq!(topics.len(), catalogue().len());
        assert!(topics.iter().any(|t| t["id"] == "aerospace" && t["wholeWord"] == true));
    }
}
