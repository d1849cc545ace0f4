use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    Json,
    Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    api::{payload::Payload, response::ProductionPlan, validation::ValidationErrors},
    core::{cost_model::CostModel, error::AllocationError, request::LoadRequest},
    prelude::*,
    service,
};

pub async fn serve(bind_address: &str, cost_model: CostModel) -> Result {
    let listener =
        TcpListener::bind(bind_address).await.context("failed to bind to the address")?;
    info!(bind_address, "serving…");
    axum::serve(listener, router(cost_model)).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

pub fn router(cost_model: CostModel) -> Router {
    Router::new()
        .route("/productionplan", post(post_production_plan))
        .route("/health", get(get_health))
        .with_state(Arc::new(AppState { cost_model }))
        .layer((TraceLayer::new_for_http(), TimeoutLayer::new(Duration::from_secs(10))))
}

/// Per <https://github.com/tokio-rs/axum/blob/main/examples/graceful-shutdown/src/main.rs>.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

struct AppState {
    cost_model: CostModel,
}

async fn get_health() -> &'static str {
    "ok"
}

#[instrument(skip_all)]
async fn post_production_plan(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    payload: Result<Json<Payload>, JsonRejection>,
) -> Result<Json<ProductionPlan>, Problem> {
    let instance = uri.path().to_owned();
    let Json(payload) = payload.map_err(|rejection| {
        warn!("rejected the body: {rejection}");
        Problem::bad_request(rejection.body_text(), instance.clone())
    })?;
    let request = LoadRequest::try_from(payload).map_err(|errors| {
        warn!("{errors}");
        Problem::validation_failed(&errors, instance.clone())
    })?;
    let allocation = service::plan(&request, state.cost_model)
        .map_err(|error| Problem::allocation_failed(&error, instance))?;
    Ok(Json(ProductionPlan::from(&allocation)))
}

/// Problem details body as per RFC 9457.
#[derive(Debug, Deserialize, Serialize)]
pub struct Problem {
    pub status: u16,
    pub title: String,
    pub detail: String,
    pub instance: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl Problem {
    fn new(status: StatusCode, title: &str, detail: String, instance: String) -> Self {
        Self { status: status.as_u16(), title: title.to_owned(), detail, instance, errors: BTreeMap::new() }
    }

    fn bad_request(detail: String, instance: String) -> Self {
        let mut problem = Self::new(StatusCode::BAD_REQUEST, "Validation Failed", detail.clone(), instance);
        problem.errors.insert("body".to_owned(), vec![detail]);
        problem
    }

    fn validation_failed(errors: &ValidationErrors, instance: String) -> Self {
        Self {
            errors: errors.by_field(),
            ..Self::new(
                StatusCode::BAD_REQUEST,
                "Validation Failed",
                "one or more validation errors occurred".to_owned(),
                instance,
            )
        }
    }

    fn allocation_failed(error: &AllocationError, instance: String) -> Self {
        if error.is_internal() {
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", error.to_string(), instance)
        } else {
            Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Allocation Failed", error.to_string(), instance)
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(CONTENT_TYPE, "application/problem+json")], Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};

    use super::*;
    use crate::api::{payload::tests::PAYLOAD_1, response::PlantOutput};

    async fn post(payload: Payload) -> Response {
        let state = Arc::new(AppState { cost_model: CostModel::default() });
        post_production_plan(State(state), Uri::from_static("/productionplan"), Ok(Json(payload)))
            .await
            .into_response()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        serde_json::from_slice(&to_bytes(body, usize::MAX).await.unwrap()).unwrap()
    }

    fn payload() -> Payload {
        serde_json::from_str(PAYLOAD_1).unwrap()
    }

    #[tokio::test]
    async fn production_plan() {
        let response = post(payload()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let ProductionPlan(outputs) = read_body(response.into_body()).await;
        assert_eq!(outputs.len(), 6);
        assert_eq!(
            outputs[4],
            PlantOutput { name: "windpark1".to_owned(), p: 90.into() },
        );
    }

    #[tokio::test]
    async fn validation_failed() {
        let mut payload = payload();
        payload.powerplants[2].pmax = 0.into();
        let response = post(payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/problem+json");
        let problem: Problem = read_body(response.into_body()).await;
        assert_eq!(problem.title, "Validation Failed");
        assert_eq!(problem.instance, "/productionplan");
        assert!(problem.errors.contains_key("powerplants[2].pmax"));
    }

    #[tokio::test]
    async fn load_exceeds_capacity() {
        let mut payload = payload();
        payload.load = 5000.into();
        let response = post(payload).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let problem: Problem = read_body(response.into_body()).await;
        assert_eq!(problem.status, 422);
        assert!(problem.errors.is_empty());
    }

    #[tokio::test]
    async fn unreachable_load_is_unprocessable() {
        let payload: Payload = serde_json::from_str(
            r#"{
                "load": 100.03,
                "fuels": {"gas(euro/MWh)": 15, "kerosine(euro/MWh)": 50, "co2(euro/ton)": 20, "wind(%)": 0},
                "powerplants": [
                    {"name": "a", "type": "gasfired", "efficiency": 0.8, "pmin": 50, "pmax": 100},
                    {"name": "b", "type": "gasfired", "efficiency": 0.5, "pmin": 60, "pmax": 100}
                ]
            }"#,
        )
        .unwrap();
        let response = post(payload).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let problem: Problem = read_body(response.into_body()).await;
        assert_eq!(problem.title, "Allocation Failed");
    }

    #[tokio::test]
    async fn health() {
        assert_eq!(get_health().await, "ok");
    }
}
