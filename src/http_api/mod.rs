use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    BuildSummary, CalendarDay, DaySequence, HeatmapConfig, RescheduleReport, Simulation,
    SimulationError, SimulationParams, YearCounts, category_counts, render_year_svg, simulate,
    write_sequence_csv,
};

#[derive(Clone)]
pub struct AppState {
    params: Arc<RwLock<SimulationParams>>,
    heatmap: Arc<HeatmapConfig>,
}

impl AppState {
    pub fn new(params: SimulationParams, heatmap: HeatmapConfig) -> Self {
        Self {
            params: Arc::new(RwLock::new(params)),
            heatmap: Arc::new(heatmap),
        }
    }

    fn params(&self) -> SimulationParams {
        *self.params.read()
    }

    /// Full recomputation from the current parameters.
    fn simulate(&self) -> Result<Simulation, ApiError> {
        simulate(&self.params()).map_err(ApiError::from)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<SimulationError> for ApiError {
    fn from(value: SimulationError) -> Self {
        match value {
            SimulationError::InputRange(err) => ApiError::Invalid(err.to_string()),
            SimulationError::Reschedule(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Which {
    Original,
    Rescheduled,
}

impl Which {
    fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw {
            "original" => Ok(Which::Original),
            "rescheduled" => Ok(Which::Rescheduled),
            other => Err(ApiError::not_found(format!(
                "unknown calendar '{other}' (expected original or rescheduled)"
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryBody {
    pub params: SimulationParams,
    pub strike_days: usize,
    pub reschedule_count: usize,
    pub changed_days: usize,
    pub report: RescheduleReport,
    pub build: BuildSummary,
    pub original_counts: Vec<YearCounts>,
    pub rescheduled_counts: Vec<YearCounts>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/params", get(get_params).put(update_params))
        .route("/summary", get(summary))
        .route("/calendar/:which", get(calendar_json))
        .route("/calendar/:which/csv", get(calendar_csv))
        .route("/heatmap/:which/:year", get(heatmap_svg))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_params(State(state): State<AppState>) -> Json<SimulationParams> {
    Json(state.params())
}

async fn update_params(
    State(state): State<AppState>,
    Json(params): Json<SimulationParams>,
) -> Result<Json<SimulationParams>, ApiError> {
    params
        .validate()
        .map_err(|err| ApiError::Invalid(err.to_string()))?;
    *state.params.write() = params;
    Ok(Json(params))
}

async fn summary(State(state): State<AppState>) -> Result<Json<SummaryBody>, ApiError> {
    let simulation = state.simulate()?;
    Ok(Json(SummaryBody {
        params: simulation.params,
        strike_days: simulation.strike_days(),
        reschedule_count: simulation.reschedule_count,
        changed_days: simulation.changed_days(),
        report: simulation.report,
        original_counts: category_counts(&simulation.original),
        rescheduled_counts: category_counts(&simulation.rescheduled),
        build: simulation.build,
    }))
}

fn pick(simulation: Simulation, which: Which) -> DaySequence {
    match which {
        Which::Original => simulation.original,
        Which::Rescheduled => simulation.rescheduled,
    }
}

async fn calendar_json(
    State(state): State<AppState>,
    Path(which): Path<String>,
) -> Result<Json<Vec<CalendarDay>>, ApiError> {
    let which = Which::parse(&which)?;
    let sequence = pick(state.simulate()?, which);
    Ok(Json(sequence.days().collect()))
}

async fn calendar_csv(
    State(state): State<AppState>,
    Path(which): Path<String>,
) -> Result<Response, ApiError> {
    let which = Which::parse(&which)?;
    let sequence = pick(state.simulate()?, which);
    let mut body = Vec::new();
    write_sequence_csv(&sequence, &mut body)
        .map_err(|err| ApiError::internal(err.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], body).into_response())
}

async fn heatmap_svg(
    State(state): State<AppState>,
    Path((which, year)): Path<(String, i32)>,
) -> Result<Response, ApiError> {
    let which = Which::parse(&which)?;
    let sequence = pick(state.simulate()?, which);
    if !sequence.years().contains(&year) {
        return Err(ApiError::not_found(format!("year {year} is not in the calendar")));
    }
    let title = match which {
        Which::Original => &state.heatmap.original_title,
        Which::Rescheduled => &state.heatmap.rescheduled_title,
    };
    let svg = render_year_svg(&sequence, year, title, &state.heatmap);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}
