mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};

fn find<'a>(fields: &'a Value, id: &str) -> Option<&'a Value> {
    fields.as_array().unwrap().iter().find(|f| f["id"] == id)
}

#[tokio::test]
async fn test_default_fields_are_listed_with_ordered_options() {
    let app = TestApp::new().await;
    let auth = app.register_and_login("ana").await;

    let res = app.send("GET", "/api/v1/fields", Some(&auth), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let fields = parse_body(res).await;

    for id in ["field-nome", "field-idade", "field-email", "field-restricao", "field-acompanhantes"] {
        assert!(find(&fields, id).is_some(), "missing default field {}", id);
    }

    let idade = find(&fields, "field-idade").unwrap();
    assert_eq!(idade["type"], "NUMBER");
    assert_eq!(idade["category"], "AGE");
    assert_eq!(idade["visibility"], "PUBLIC");

    let restricao = find(&fields, "field-restricao").unwrap();
    assert_eq!(restricao["type"], "OPTION");
    let labels: Vec<&str> = restricao["options"].as_array().unwrap()
        .iter()
        .map(|o| o["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Nenhuma", "Vegetariano", "Vegano", "Sem glúten"]);
}

#[tokio::test]
async fn test_private_fields_are_only_visible_to_their_owner() {
    let app = TestApp::new().await;
    let ana = app.register_and_login("ana").await;
    let bia = app.register_and_login("bia").await;

    let res = app.send(
        "POST",
        "/api/v1/fields",
        Some(&ana),
        Some(json!({
            "name": "Camiseta",
            "type": "OPTION",
            "options": [{ "label": "P" }, { "label": "M" }, { "label": "G", "value": "grande" }]
        })),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = parse_body(res).await;
    assert_eq!(created["visibility"], "PRIVATE");
    let options = created["options"].as_array().unwrap();
    assert_eq!(options.len(), 3);
    assert_eq!(options[2]["value"], "grande");
    assert_eq!(options[0]["value"], "P");
    let id = created["id"].as_str().unwrap().to_string();

    let ana_fields = parse_body(app.send("GET", "/api/v1/fields", Some(&ana), None).await).await;
    let listed = find(&ana_fields, &id).expect("owner sees private field");
    assert_eq!(listed["options"].as_array().unwrap().len(), 3);

    let bia_fields = parse_body(app.send("GET", "/api/v1/fields", Some(&bia), None).await).await;
    assert!(find(&bia_fields, &id).is_none());
}

#[tokio::test]
async fn test_field_creation_validation() {
    let app = TestApp::new().await;
    let auth = app.register_and_login("ana").await;

    let option_without_options = app.send(
        "POST",
        "/api/v1/fields",
        Some(&auth),
        Some(json!({ "name": "Bebida", "type": "OPTION", "options": [] })),
    ).await;
    assert_eq!(option_without_options.status(), StatusCode::BAD_REQUEST);

    let text_with_options = app.send(
        "POST",
        "/api/v1/fields",
        Some(&auth),
        Some(json!({ "name": "Apelido", "type": "TEXT", "options": [{ "label": "x" }] })),
    ).await;
    assert_eq!(text_with_options.status(), StatusCode::BAD_REQUEST);

    let blank_name = app.send(
        "POST",
        "/api/v1/fields",
        Some(&auth),
        Some(json!({ "name": "  ", "type": "TEXT" })),
    ).await;
    assert_eq!(blank_name.status(), StatusCode::BAD_REQUEST);

    let number = app.send(
        "POST",
        "/api/v1/fields",
        Some(&auth),
        Some(json!({ "name": "Crianças", "type": "NUMBER", "category": "AGE" })),
    ).await;
    assert_eq!(number.status(), StatusCode::CREATED);
    let number = parse_body(number).await;
    assert_eq!(number["category"], "AGE");
    assert_eq!(number["options"], json!([]));
}
