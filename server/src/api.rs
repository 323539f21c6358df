//! HTTP surface.
//!
//! | Method | Path                   | Body / result                          |
//! |--------|------------------------|----------------------------------------|
//! | GET    | `/`                    | HTML landing page                      |
//! | GET    | `/health`              | liveness and classifier status         |
//! | GET    | `/symptoms`            | `{"symptoms": [...]}` in index order   |
//! | GET    | `/diseases`            | `{"diseases": [...]}` in listing order |
//! | POST   | `/predict`             | `{"symptoms": [...]}` → diagnosis      |
//! | GET    | `/disease-info/:name`  | metadata for one disease               |

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderValue, Method},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, info_span};

use dxlookup_contracts::{
    disease::{Diagnosis, DiseaseInfo, PredictionId},
    error::{DxError, DxResult},
};
use dxlookup_model::ModelStatus;

use crate::{config::CorsConfig, error::ApiError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_disease: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub medications: Vec<String>,
    pub diet: Vec<String>,
    pub workout: Vec<String>,
}

impl From<Diagnosis> for PredictResponse {
    fn from(d: Diagnosis) -> Self {
        Self {
            predicted_disease: d.prediction.disease,
            description: d.info.description,
            precautions: d.info.precautions,
            medications: d.info.medications,
            diet: d.info.diet,
            workout: d.info.workout,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiseaseInfoResponse {
    pub disease: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub medications: Vec<String>,
    pub diet: Vec<String>,
    pub workout: Vec<String>,
}

impl DiseaseInfoResponse {
    pub fn new(disease: String, info: DiseaseInfo) -> Self {
        Self {
            disease,
            description: info.description,
            precautions: info.precautions,
            medications: info.medications,
            diet: info.diet,
            workout: info.workout,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiseasesResponse {
    pub diseases: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub model: ModelStatus,
    pub symptoms: usize,
    pub diseases: usize,
    pub started_at: DateTime<Utc>,
}

/// Build the CORS layer for the configured origins.
///
/// # Errors
///
/// `DxError::ConfigError` when an origin is not a valid header value.
pub fn cors_layer(config: &CorsConfig) -> DxResult<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>().map_err(|e| DxError::ConfigError {
                reason: format!("invalid CORS origin '{}': {}", o, e),
            })
        })
        .collect::<DxResult<Vec<_>>>()?;
    Ok(layer.allow_origin(origins))
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/symptoms", get(symptoms))
        .route("/diseases", get(diseases))
        .route("/predict", post(predict))
        .route("/disease-info/:name", get(disease_info))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>dxlookup</title></head>
<body>
<h1>dxlookup</h1>
<p>Symptom-to-disease lookup. Not a medical device; always consult a clinician.</p>
<ul>
<li><code>GET /symptoms</code> lists accepted symptom names</li>
<li><code>GET /diseases</code> lists diseases the classifier can predict</li>
<li><code>POST /predict</code> with <code>{"symptoms": ["itching", "skin_rash"]}</code></li>
<li><code>GET /disease-info/{name}</code> returns description, precautions, medications, diet and workout</li>
<li><code>GET /health</code> reports service and classifier status</li>
</ul>
</body>
</html>
"#;

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let predictor = state.service.predictor();
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: predictor.is_ready(),
        model: (*state.model).clone(),
        symptoms: predictor.symptoms().len(),
        diseases: predictor.diseases().len(),
        started_at: state.started_at,
    })
}

async fn symptoms(State(state): State<AppState>) -> Json<SymptomsResponse> {
    let symptoms = state
        .service
        .predictor()
        .symptoms()
        .names()
        .map(str::to_string)
        .collect();
    Json(SymptomsResponse { symptoms })
}

async fn diseases(State(state): State<AppState>) -> Json<DiseasesResponse> {
    let diseases = state
        .service
        .predictor()
        .diseases()
        .names()
        .map(str::to_string)
        .collect();
    Json(DiseasesResponse { diseases })
}

async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(req) = body?;
    let request_id = PredictionId::new();
    let span = info_span!("predict", %request_id, symptoms = req.symptoms.len());
    let diagnosis = span.in_scope(|| {
        let diagnosis = state.service.diagnose(&req.symptoms)?;
        info!(disease = %diagnosis.prediction.disease, "prediction served");
        Ok::<_, DxError>(diagnosis)
    })?;
    Ok(Json(diagnosis.into()))
}

async fn disease_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DiseaseInfoResponse>, ApiError> {
    let info = state.service.disease_info(&name)?;
    Ok(Json(DiseaseInfoResponse::new(name, info)))
}
