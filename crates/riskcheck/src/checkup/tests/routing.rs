use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::checkup::domain::ModuleId;
use crate::checkup::router::AdminAccess;
use crate::checkup::service::CheckupService;

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("payload encodes")))
        .expect("request builds")
}

#[tokio::test]
async fn questions_route_lists_the_catalog() {
    let (service, _, _) = build_service();
    let router = router_with(service, AdminAccess::open());

    let response = router
        .oneshot(get("/api/v1/checkup/questions"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload.get("version"), Some(&json!("v1")));
    let modules = payload
        .get("modules")
        .and_then(Value::as_array)
        .expect("modules array");
    assert_eq!(modules.len(), 6);
    assert_eq!(
        modules[0].get("id").and_then(Value::as_str),
        Some("contracts")
    );
}

#[tokio::test]
async fn module_route_returns_one_module_or_404() {
    let (service, _, _) = build_service();
    let router = router_with(service, AdminAccess::open());

    let response = router
        .clone()
        .oneshot(get("/api/v1/checkup/questions/ownership"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("name").and_then(Value::as_str),
        Some("Ownership & Governance")
    );

    let response = router
        .oneshot(get("/api/v1/checkup/questions/astrology"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assessment_roundtrip_through_the_router() {
    let (service, _, _) = build_service();
    let router = router_with(service, AdminAccess::open());
    let catalog = catalog();
    let modules = all_module_ids(&catalog);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/checkup/assessments",
            &json!({ "modules": modules }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    let assessment_id = payload
        .get("id")
        .and_then(Value::as_str)
        .expect("assessment id")
        .to_string();

    let answers = answers_with_reds(&catalog, &modules, 3);
    let submit = json!({ "assessment_id": assessment_id, "answers": answers });
    let response = router
        .clone()
        .oneshot(post_json("/api/v1/checkup/assessments/submit", &submit))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("risk_level"), Some(&json!("yellow")));
    assert_eq!(payload.get("total_score"), Some(&json!(66)));
    assert_eq!(payload.get("max_possible_score"), Some(&json!(72)));
    assert_eq!(
        payload
            .get("trigger_flags")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(3)
    );
    assert!(payload
        .get("action_plan")
        .and_then(Value::as_array)
        .is_some_and(|plan| !plan.is_empty()));

    // The conditional update turns the second submit into a conflict.
    let response = router
        .clone()
        .oneshot(post_json("/api/v1/checkup/assessments/submit", &submit))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = router
        .oneshot(get(&format!("/api/v1/checkup/assessments/{assessment_id}")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("completed"), Some(&json!(true)));
}

#[tokio::test]
async fn progress_route_saves_partial_answers() {
    let (service, _, _) = build_service();
    let router = router_with(service, AdminAccess::open());
    let catalog = catalog();
    let modules = all_module_ids(&catalog);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/checkup/assessments",
            &json!({ "modules": modules }),
        ))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    let assessment_id = payload
        .get("id")
        .and_then(Value::as_str)
        .expect("assessment id")
        .to_string();

    let partial = answers_with_value(&catalog, &modules[..1], "green");
    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/checkup/assessments/{assessment_id}/progress"),
            &json!({ "answers": partial, "progress_index": 4 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(get(&format!("/api/v1/checkup/assessments/{assessment_id}")))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("progress_index"), Some(&json!(4)));
    assert_eq!(
        payload
            .get("answers")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(4)
    );
}

#[tokio::test]
async fn submit_validation_maps_to_unprocessable() {
    let (service, _, _) = build_service();
    let router = router_with(service, AdminAccess::open());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/checkup/assessments",
            &json!({ "modules": ["contracts"] }),
        ))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    let assessment_id = payload.get("id").and_then(Value::as_str).expect("id");

    let submit = json!({
        "assessment_id": assessment_id,
        "answers": [
            { "question_id": "q5", "answer_value": "red", "points": 1, "trigger_flag": true }
        ]
    });
    let response = router
        .oneshot(post_json("/api/v1/checkup/assessments/submit", &submit))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn lead_route_creates_and_validates() {
    let (service, _, leads) = build_service();
    let router = router_with(service, AdminAccess::open());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/checkup/leads",
            &serde_json::to_value(lead_request(None)).expect("request encodes"),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("success"), Some(&json!(true)));
    assert!(payload.get("lead_id").and_then(Value::as_str).is_some());
    assert_eq!(leads.stored().len(), 1);

    let mut bad = lead_request(None);
    bad.email = "nope".to_string();
    let response = router
        .oneshot(post_json(
            "/api/v1/checkup/leads",
            &serde_json::to_value(bad).expect("request encodes"),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn admin_routes_require_the_configured_key() {
    let (service, _, _) = build_service();
    let router = router_with(service, AdminAccess::new(Some("sekrit".to_string())));

    let response = router
        .clone()
        .oneshot(get("/api/v1/checkup/admin/leads"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/checkup/admin/leads")
                .header("x-admin-key", "sekrit")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(get("/api/v1/checkup/admin/leads?admin_key=sekrit"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(get("/api/v1/checkup/admin/leads?admin_key=wrong"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn export_route_returns_a_csv_attachment() {
    let (service, _, _) = build_service();
    service.create_lead(lead_request(None)).expect("lead created");
    let router = router_with(service, AdminAccess::open());

    let response = router
        .oneshot(get("/api/v1/checkup/admin/leads/export"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/csv")
    );
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok()),
        Some("attachment; filename=checkup_leads.csv")
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let text = String::from_utf8(body.to_vec()).expect("utf8 csv");
    assert!(text.starts_with("name,email,phone"));
    assert!(text.contains("Dana Whitfield"));
}

#[tokio::test]
async fn export_route_reports_when_no_leads_exist() {
    let (service, _, _) = build_service();
    let router = router_with(service, AdminAccess::open());

    let response = router
        .oneshot(get("/api/v1/checkup/admin/leads/export"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    assert_eq!(&body[..], b"No leads found");
}

#[tokio::test]
async fn unavailable_storage_maps_to_service_unavailable() {
    let service = Arc::new(CheckupService::new(
        catalog(),
        Arc::new(UnavailableAssessments),
        Arc::new(UnavailableLeads),
    ));
    let router = crate::checkup::router::checkup_router(service, AdminAccess::open());

    let response = router
        .oneshot(post_json(
            "/api/v1/checkup/assessments",
            &json!({ "modules": [ModuleId::new("contracts")] }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
