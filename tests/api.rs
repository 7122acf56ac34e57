//! Router-level tests for the JSON API.
//!
//! Each test writes a small set of CSV sources into a temporary directory,
//! loads them through `DataStore::load` and drives the router with `oneshot`.
//!
//! Run with: cargo test --test api
use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use medlookup::config::AppConfig;
use medlookup::data::DataStore;
use medlookup::selector::{PresenceVector, RandomSelector, Selector};
use medlookup::{create_router, AppState};

const DESCRIPTION_CSV: &str = "\
Disease,Description
Fungal infection,Fungal infection is a common skin condition caused by fungi.
Allergy,Allergy is an immune system reaction to a substance in the environment.
GERD,GERD (Gastroesophageal Reflux Disease) is a digestive disorder.
";

const PRECAUTIONS_CSV: &str = "\
,Disease,Precaution_1,Precaution_2,Precaution_3,Precaution_4
0,Fungal infection,bath twice,use detol or neem in bathing water,keep infected area dry,use clean cloths
1,Allergy,apply calamine,cover area with bandage,,use ice to compress itching
2,GERD,avoid fatty spicy food,  ,,
";

const MEDICATIONS_CSV: &str = "\
Disease,Medication_1,Medication_2,Medication_3
Fungal infection,Antifungal Cream,Fluconazole,Terbinafine
Allergy,Antihistamines,,Epinephrine
";

const DIETS_CSV: &str = "\
Disease,Diet_1,Diet_2
Fungal infection,Antifungal Diet,Probiotics
GERD,Low-Acid Diet,
";

const WORKOUT_CSV: &str = "\
,disease,Workout_1,Workout_2
0,Fungal infection,Avoid sugary foods,Consume probiotics
";

const SYMPTOMS_CSV: &str = "\
Symptom
itching
skin_rash
nodal_skin_eruptions
continuous_sneezing
";

const SEVERITY_CSV: &str = "\
Symptom,weight
itching,1
skin_rash,3
continuous_sneezing,4
";

fn write_sources(dir: &Path, sources: &[(&str, &str)]) {
    for (file, contents) in sources {
        fs::write(dir.join(file), contents).unwrap();
    }
}

fn full_sources() -> Vec<(&'static str, &'static str)> {
    vec![
        ("description.csv", DESCRIPTION_CSV),
        ("precautions_df.csv", PRECAUTIONS_CSV),
        ("medications.csv", MEDICATIONS_CSV),
        ("diets.csv", DIETS_CSV),
        ("workout_df.csv", WORKOUT_CSV),
        ("symtoms_df.csv", SYMPTOMS_CSV),
        ("Symptom-severity.csv", SEVERITY_CSV),
    ]
}

fn load_store(sources: &[(&str, &str)]) -> DataStore {
    let dir = tempfile::tempdir().unwrap();
    write_sources(dir.path(), sources);
    DataStore::load(dir.path())
}

fn app_with_selector(store: DataStore, selector: Arc<dyn Selector>) -> Router {
    create_router(AppState::new(AppConfig::default(), store, selector))
}

fn app(sources: &[(&str, &str)]) -> Router {
    let store = load_store(sources);
    let selector = Arc::new(RandomSelector::from_store(&store));
    app_with_selector(store, selector)
}

fn predict_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Always answers with one fixed label.
struct FixedSelector(&'static str);

impl Selector for FixedSelector {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn select(&self, _presence: &PresenceVector) -> Option<String> {
        Some(self.0.to_string())
    }
}

struct PanickingSelector;

impl Selector for PanickingSelector {
    fn name(&self) -> &'static str {
        "panicking"
    }

    fn select(&self, _presence: &PresenceVector) -> Option<String> {
        panic!("selector exploded");
    }
}

#[tokio::test]
async fn test_predict_known_symptoms() {
    let response = app(&full_sources())
        .oneshot(predict_request(r#"{"input": "itching,skin_rash"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
    assert!(response.headers().contains_key("x-request-id"));

    let body = json_body(response).await;
    assert_eq!(body["status"], "success");

    let result = &body["result"];
    let disease = result["disease"].as_str().unwrap();
    assert!(["Fungal infection", "Allergy", "GERD"].contains(&disease));
    assert!(!result["description"].as_str().unwrap().is_empty());

    let precautions = result["precautions"].as_array().unwrap();
    assert!(precautions.len() <= 4);
    assert!(precautions
        .iter()
        .all(|p| !p.as_str().unwrap().trim().is_empty()));
}

#[tokio::test]
async fn test_predict_joined_result_for_fixed_label() {
    let store = load_store(&full_sources());
    let app = app_with_selector(store, Arc::new(FixedSelector("Fungal infection")));

    let response = app
        .oneshot(predict_request(r#"{"input": "itching, skin_rash"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "status": "success",
            "result": {
                "disease": "Fungal infection",
                "description": "Fungal infection is a common skin condition caused by fungi.",
                "precautions": [
                    "bath twice",
                    "use detol or neem in bathing water",
                    "keep infected area dry",
                    "use clean cloths"
                ],
                "medications": ["Antifungal Cream", "Fluconazole", "Terbinafine"],
                "diet": ["Antifungal Diet", "Probiotics"],
                "workouts": ["Avoid sugary foods", "Consume probiotics"]
            }
        })
    );
}

#[tokio::test]
async fn test_predict_absent_attributes_are_empty_lists() {
    let store = load_store(&full_sources());
    let app = app_with_selector(store, Arc::new(FixedSelector("GERD")));

    let response = app
        .oneshot(predict_request(r#"{"input": "itching"}"#))
        .await
        .unwrap();
    let body = json_body(response).await;

    assert_eq!(body["result"]["precautions"], json!(["avoid fatty spicy food"]));
    assert_eq!(body["result"]["medications"], json!([]));
    assert_eq!(body["result"]["diet"], json!(["Low-Acid Diet"]));
    assert_eq!(body["result"]["workouts"], json!([]));
}

#[tokio::test]
async fn test_predict_empty_input_still_succeeds() {
    let response = app(&full_sources())
        .oneshot(predict_request(r#"{"input": ""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert!(!body["result"]["disease"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_predict_missing_input_field_is_empty_input() {
    let response = app(&full_sources())
        .oneshot(predict_request("{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_predict_malformed_json_is_bad_request() {
    let response = app(&full_sources())
        .oneshot(predict_request("{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_predict_without_content_type_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/predict")
        .body(Body::from(r#"{"input": "itching"}"#))
        .unwrap();
    let response = app(&full_sources()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["status"], "error");
}

#[tokio::test]
async fn test_predict_without_symptom_table_is_unavailable() {
    let response = app(&[("description.csv", DESCRIPTION_CSV)])
        .oneshot(predict_request(r#"{"input": "itching"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({
            "status": "error",
            "error": "Could not predict disease from given symptoms"
        })
    );
}

#[tokio::test]
async fn test_predict_unknown_label_is_not_found() {
    let store = load_store(&full_sources());
    let app = app_with_selector(store, Arc::new(FixedSelector("Common Cold")));

    let response = app
        .oneshot(predict_request(r#"{"input": "itching"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "Could not find information for predicted disease: Common Cold"
    );
}

#[tokio::test]
async fn test_predict_panic_is_internal_error() {
    let store = load_store(&full_sources());
    let app = app_with_selector(store, Arc::new(PanickingSelector));

    let response = app
        .oneshot(predict_request(r#"{"input": "itching"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "Internal error: selector exploded");
}

#[tokio::test]
async fn test_data_info_reports_loaded_tables_only() {
    let response = app(&full_sources())
        .oneshot(get_request("/api/data_info"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=300"
    );

    let body = json_body(response).await;
    assert_eq!(body["status"], "success");

    let info = body["data_info"].as_object().unwrap();
    assert_eq!(info.len(), 7);
    assert!(!info.contains_key("training"));
    assert!(!info.contains_key("medical_data"));

    assert_eq!(info["description"]["rows"], 3);
    assert_eq!(info["precautions"]["rows"], 3);
    assert_eq!(info["medications"]["rows"], 2);
    assert_eq!(info["workout"]["rows"], 1);
    assert_eq!(info["symptoms"]["rows"], 4);
    assert_eq!(
        info["precautions"]["columns"],
        json!([
            "Unnamed: 0",
            "Disease",
            "Precaution_1",
            "Precaution_2",
            "Precaution_3",
            "Precaution_4"
        ])
    );
}

#[tokio::test]
async fn test_data_info_with_no_sources() {
    let response = app(&[]).oneshot(get_request("/api/data_info")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"status": "success", "data_info": {}})
    );
}

#[tokio::test]
async fn test_symptoms_lists_vocabulary_with_weights() {
    let response = app(&full_sources())
        .oneshot(get_request("/api/symptoms"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["symptoms"],
        json!([
            {"name": "itching", "weight": 1},
            {"name": "skin_rash", "weight": 3},
            {"name": "nodal_skin_eruptions", "weight": null},
            {"name": "continuous_sneezing", "weight": 4}
        ])
    );
}

#[tokio::test]
async fn test_health() {
    let response = app(&[]).oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let response = app(&[]).oneshot(get_request("/api/unknown")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"status": "error", "error": "Not found"})
    );
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin_by_default() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/predict")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app(&full_sources()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_restricted_origin() {
    let mut config = AppConfig::default();
    config.cors.allowed_origins = vec!["http://localhost:3000".to_string()];
    let store = load_store(&full_sources());
    let selector = Arc::new(RandomSelector::from_store(&store));
    let app = create_router(AppState::new(config, store, selector));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/data_info")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/data_info")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
