mod common;

use axum::http::{header, StatusCode};
use common::{body_text, parse_body, AuthHeaders, TestApp};
use serde_json::json;

async fn seed_party(app: &TestApp) -> AuthHeaders {
    let auth = app.register_and_login("ana").await;
    let event = app.create_event(&auth, "festa", &["field-nome", "field-restricao", "field-acompanhantes"]).await;
    let event_id = event["id"].as_str().unwrap();

    for (name, restricao, acompanhantes) in [("Ana", "Vegano", 2), ("Bia", "Nenhuma", 1), ("Caio", "Vegano", 3)] {
        let res = app.confirm_guest(event_id, json!([
            { "id": "field-nome", "value": name },
            { "id": "field-restricao", "value": restricao },
            { "id": "field-acompanhantes", "value": acompanhantes },
        ])).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
    auth
}

#[tokio::test]
async fn test_grouping_counts_option_values() {
    let app = TestApp::new().await;
    let auth = seed_party(&app).await;

    let res = app.send("GET", "/api/v1/events/by-link/festa/grouping?field_id=field-restricao", Some(&auth), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["field"], "Restrição alimentar");
    assert_eq!(body["field_id"], "field-restricao");
    assert_eq!(body["values"], json!([["Vegano", 2.0], ["Nenhuma", 1.0]]));
    assert_eq!(body["total"], 3.0);
}

#[tokio::test]
async fn test_grouping_sums_number_values() {
    let app = TestApp::new().await;
    let auth = seed_party(&app).await;

    let res = app.send("GET", "/api/v1/events/by-link/festa/grouping?field_id=field-acompanhantes", Some(&auth), None).await;
    let body = parse_body(res).await;

    assert_eq!(body["values"], json!([["3", 3.0], ["1", 1.0], ["2", 2.0]]));
    assert_eq!(body["total"], 6.0);
}

#[tokio::test]
async fn test_grouping_total_is_null_when_a_number_does_not_parse() {
    let app = TestApp::new().await;
    let auth = seed_party(&app).await;

    let event = parse_body(app.send("GET", "/api/v1/public/events/festa", None, None).await).await;
    app.confirm_guest(event["id"].as_str().unwrap(), json!([
        { "id": "field-nome", "value": "Davi" },
        { "id": "field-acompanhantes", "value": "muitos" },
    ])).await;

    let res = app.send("GET", "/api/v1/events/by-link/festa/grouping?field_id=field-acompanhantes", Some(&auth), None).await;
    let body = parse_body(res).await;

    assert_eq!(body["values"][0], json!(["muitos", null]));
    assert!(body["total"].is_null());

    let csv = app.send("GET", "/api/v1/events/by-link/festa/grouping/export?field_id=field-acompanhantes", Some(&auth), None).await;
    let text = body_text(csv).await;
    assert!(text.starts_with("Acompanhantes;Soma\nmuitos;NaN\n"), "got {}", text);
    assert!(text.ends_with("\nTotal;NaN"), "got {}", text);
}

#[tokio::test]
async fn test_grouping_rejects_text_and_foreign_fields() {
    let app = TestApp::new().await;
    let auth = seed_party(&app).await;
    let bia = app.register_and_login("bia").await;

    let text = app.send("GET", "/api/v1/events/by-link/festa/grouping?field_id=field-nome", Some(&auth), None).await;
    assert_eq!(text.status(), StatusCode::BAD_REQUEST);

    let foreign = app.send("GET", "/api/v1/events/by-link/festa/grouping?field_id=field-idade", Some(&auth), None).await;
    assert_eq!(foreign.status(), StatusCode::BAD_REQUEST);

    let missing_param = app.send("GET", "/api/v1/events/by-link/festa/grouping", Some(&auth), None).await;
    assert_eq!(missing_param.status(), StatusCode::BAD_REQUEST);

    let not_owner = app.send("GET", "/api/v1/events/by-link/festa/grouping?field_id=field-restricao", Some(&bia), None).await;
    assert_eq!(not_owner.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_grouping_csv() {
    let app = TestApp::new().await;
    let auth = seed_party(&app).await;

    let res = app.send("GET", "/api/v1/events/by-link/festa/grouping/export?field_id=field-restricao", Some(&auth), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert_eq!(
        res.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"festa_convidados-agrupados_restricao-alimentar.csv\""
    );

    let text = body_text(res).await;
    assert_eq!(text, "Restrição alimentar;Soma\nVegano;2\nNenhuma;1\nTotal;3");
}

#[tokio::test]
async fn test_export_guest_list_csv() {
    let app = TestApp::new().await;
    let auth = seed_party(&app).await;

    let res = app.send("GET", "/api/v1/events/by-link/festa/guests/export", Some(&auth), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"convidados-festa.csv\""
    );

    let text = body_text(res).await;
    assert_eq!(
        text,
        "Nome;Restrição alimentar;Acompanhantes\nCaio;Vegano;3\nBia;Nenhuma;1\nAna;Vegano;2"
    );

    let bia = app.register_and_login("bia").await;
    let not_owner = app.send("GET", "/api/v1/events/by-link/festa/guests/export", Some(&bia), None).await;
    assert_eq!(not_owner.status(), StatusCode::NOT_FOUND);
}
