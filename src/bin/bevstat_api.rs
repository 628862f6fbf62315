use std::net::SocketAddr;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use bevstat::error::BevError;
use bevstat::io::register_csv::load_register;
use bevstat::io::sources::SourceRegistry;
use bevstat::model::record::RawRecord;
use bevstat::pipeline::{list_territories, map_view, territory_view};
use bevstat::stats::aggregate::Granularity;

#[derive(Clone)]
struct AppState {
    registry: SourceRegistry,
}

#[derive(Debug, Deserialize)]
struct TerritoryRequest {
    year: u16,
    territorial_unit: String,
}

#[derive(Debug, Deserialize)]
struct MapQuery {
    year: u16,
    granularity: String,
}

#[derive(Debug, Deserialize)]
struct TerritoriesQuery {
    year: u16,
    granularity: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let data_dir = std::env::var("BEVSTAT_DATA_DIR").unwrap_or_else(|_| "./data/raw".to_string());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);

    let registry = match SourceRegistry::scan(&data_dir) {
        Ok(r) => r,
        Err(e) => {
            log::error!("failed to scan data dir {}: {:#}", data_dir, e);
            std::process::exit(1);
        }
    };
    log::info!("serving {} register extracts from {}", registry.years().len(), data_dir);

    let state = AppState { registry };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/years", get(years))
        .route("/territories", get(territories))
        .route("/territory_view", post(territory))
        .route("/map_view", get(map))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse().expect("invalid HOST/PORT");
    log::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind failed");
    axum::serve(listener, app).await.expect("server failed");
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

async fn years(State(st): State<AppState>) -> impl IntoResponse {
    Json(st.registry.years())
}

async fn territory(State(st): State<AppState>, Json(req): Json<TerritoryRequest>) -> impl IntoResponse {
    // File load + pipeline work is blocking; keep it off the runtime threads.
    let join = tokio::task::spawn_blocking(move || {
        let records = load_year(&st.registry, req.year)?;
        territory_view(&records, &req.territorial_unit)
            .map_err(error_response)
            .map(|view| json!(view))
    });
    respond(join.await)
}

async fn map(State(st): State<AppState>, Query(q): Query<MapQuery>) -> impl IntoResponse {
    let join = tokio::task::spawn_blocking(move || {
        let granularity = parse_granularity(&q.granularity)?;
        let records = load_year(&st.registry, q.year)?;
        map_view(&records, granularity)
            .map_err(error_response)
            .map(|units| json!(units))
    });
    respond(join.await)
}

async fn territories(State(st): State<AppState>, Query(q): Query<TerritoriesQuery>) -> impl IntoResponse {
    let join = tokio::task::spawn_blocking(move || {
        let granularity = match &q.granularity {
            Some(g) => Some(parse_granularity(g)?),
            None => None,
        };
        let records = load_year(&st.registry, q.year)?;
        Ok(json!(list_territories(&records, granularity)))
    });
    respond(join.await)
}

type Reply = Result<serde_json::Value, (StatusCode, serde_json::Value)>;

fn respond(joined: Result<Reply, tokio::task::JoinError>) -> axum::response::Response {
    match joined {
        Ok(Ok(v)) => (StatusCode::OK, Json(v)).into_response(),
        Ok(Err((code, body))) => (code, Json(body)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("join error: {e}")})),
        )
            .into_response(),
    }
}

fn load_year(registry: &SourceRegistry, year: u16) -> Result<Vec<RawRecord>, (StatusCode, serde_json::Value)> {
    let path = registry.path_for(year).map_err(error_response)?;
    let path = path.to_string_lossy().into_owned();
    let outcome = load_register(&path).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": format!("failed to load register extract: {e:#}")}),
        )
    })?;
    Ok(outcome.records)
}

fn parse_granularity(raw: &str) -> Result<Granularity, (StatusCode, serde_json::Value)> {
    match raw {
        "Stadtteil" => Ok(Granularity::Stadtteil),
        "Ortsteil" => Ok(Granularity::Ortsteil),
        "Stadtbezirk" => Ok(Granularity::Stadtbezirk),
        other => Err((
            StatusCode::BAD_REQUEST,
            json!({"error": format!("unknown granularity '{other}'")}),
        )),
    }
}

fn error_response(e: BevError) -> (StatusCode, serde_json::Value) {
    let code = match e {
        BevError::UnknownTerritory(_) | BevError::UnknownYear(_) => StatusCode::NOT_FOUND,
        BevError::MalformedRecord { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (code, json!({"error": e.to_string()}))
}
