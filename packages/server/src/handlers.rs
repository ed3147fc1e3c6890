//! HTTP handler functions for the justice graph API.

use actix_web::{HttpResponse, web};
use justice_graph_backlog_models::BacklogQuery;
use justice_graph_server_models::{ApiError, ApiHealth, ApiStatus};

use crate::AppState;

/// `GET /`
pub async fn home(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiStatus {
        status: "healthy".to_string(),
        service: "JusticeGraph backlog API. Endpoints: /predict/district-backlog".to_string(),
        records: state.estimator.index().len(),
    })
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.estimator.index().len(),
    })
}

/// `POST /predict/district-backlog`
///
/// Estimates pending-case duration for a state, district, and case type.
/// Unknown jurisdictions are a normal 200 response with a no-data estimate.
pub async fn district_backlog(
    state: web::Data<AppState>,
    body: web::Json<BacklogQuery>,
) -> HttpResponse {
    let query = body.into_inner();

    let blank = query.blank_fields();
    if !blank.is_empty() {
        return HttpResponse::UnprocessableEntity().json(ApiError::new(format!(
            "Fields must not be empty: {}",
            blank.join(", ")
        )));
    }

    let estimate = state.estimator.estimate(&query);
    log::debug!(
        "Estimated {}/{} ({}): {} days, {} confidence",
        query.state.trim(),
        query.district.trim(),
        query.case_type.trim(),
        estimate.estimated_duration_days,
        estimate.confidence
    );

    HttpResponse::Ok().json(estimate)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use justice_graph_backlog::DatasetIndex;
    use justice_graph_backlog_models::{
        BacklogEstimate, BucketCounts, Confidence, JurisdictionRecord,
    };
    use justice_graph_server_models::{ApiError, ApiHealth, ApiStatus};
    use serde_json::json;

    use crate::AppState;

    fn sample_index() -> DatasetIndex {
        DatasetIndex::from_records(vec![
            JurisdictionRecord::new(
                "Kerala",
                "Ernakulam",
                "Civil",
                BucketCounts::new([50, 50, 0, 0, 0, 0, 0]),
            ),
            JurisdictionRecord::new("Goa", "North Goa", "Civil", BucketCounts::default()),
        ])
    }

    #[actix_web::test]
    async fn estimates_known_jurisdiction() {
        let app = test::init_service(
            App::new()
                .app_data(AppState::shared(sample_index()))
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predict/district-backlog")
            .set_json(json!({
                "state": " kerala ",
                "district": "ERNAKULAM",
                "case_type": "civil"
            }))
            .to_request();
        let estimate: BacklogEstimate = test::call_and_read_body_json(&app, req).await;

        assert!((estimate.estimated_duration_days - 455.0).abs() < 1e-9);
        assert!((estimate.estimated_duration_years - 1.2).abs() < 1e-9);
        assert_eq!(estimate.confidence, Confidence::Medium);
    }

    #[actix_web::test]
    async fn unknown_jurisdiction_is_ok_with_no_data() {
        let app = test::init_service(
            App::new()
                .app_data(AppState::shared(sample_index()))
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predict/district-backlog")
            .set_json(json!({
                "state": "Keralam",
                "district": "Ernakulam",
                "case_type": "Civil"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let estimate: BacklogEstimate = test::read_body_json(resp).await;
        assert!(estimate.estimated_duration_days.abs() < 1e-9);
        assert_eq!(estimate.confidence, Confidence::Low);
        assert!(estimate.explanation.contains("keralam"));
    }

    #[actix_web::test]
    async fn zero_weight_jurisdiction_uses_fallback() {
        let app = test::init_service(
            App::new()
                .app_data(AppState::shared(sample_index()))
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predict/district-backlog")
            .set_json(json!({
                "state": "Goa",
                "district": "North Goa",
                "case_type": "Civil"
            }))
            .to_request();
        let estimate: BacklogEstimate = test::call_and_read_body_json(&app, req).await;
        assert!((estimate.estimated_duration_days - 180.0).abs() < 1e-9);
        assert!((estimate.estimated_duration_years - 0.5).abs() < 1e-9);
    }

    #[actix_web::test]
    async fn blank_fields_are_unprocessable() {
        let app = test::init_service(
            App::new()
                .app_data(AppState::shared(sample_index()))
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predict/district-backlog")
            .set_json(json!({
                "state": "Kerala",
                "district": "  ",
                "case_type": "Civil"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: ApiError = test::read_body_json(resp).await;
        assert!(body.error.contains("district"));
    }

    #[actix_web::test]
    async fn missing_fields_are_bad_requests() {
        let app = test::init_service(
            App::new()
                .app_data(AppState::shared(sample_index()))
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predict/district-backlog")
            .set_json(json!({ "state": "Kerala" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ApiError = test::read_body_json(resp).await;
        assert!(body.error.starts_with("Invalid request body"));
    }

    #[actix_web::test]
    async fn status_endpoints_report_record_count() {
        let app = test::init_service(
            App::new()
                .app_data(AppState::shared(sample_index()))
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let status: ApiStatus = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status.status, "healthy");
        assert_eq!(status.records, 2);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(health.healthy);
        assert_eq!(health.records, 2);
    }

    #[actix_web::test]
    async fn empty_index_still_serves() {
        let app = test::init_service(
            App::new()
                .app_data(AppState::shared(DatasetIndex::empty()))
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predict/district-backlog")
            .set_json(json!({
                "state": "Kerala",
                "district": "Ernakulam",
                "case_type": "Civil"
            }))
            .to_request();
        let estimate: BacklogEstimate = test::call_and_read_body_json(&app, req).await;
        assert_eq!(estimate.confidence, Confidence::Low);
        assert!(estimate.explanation.starts_with("No data found"));
    }
}
