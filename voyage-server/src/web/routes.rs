//! HTTP route handlers.

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::domain::PortName;
use crate::planner::{Planner, DEFAULT_ENUMERATION_DEPTH};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/plan/cheapest", get(plan_cheapest))
        .route("/plan/cheapest-bidirectional", get(plan_cheapest_bidirectional))
        .route("/plan/shortest", get(plan_shortest))
        .route("/plan/multi-leg", get(plan_multi_leg))
        .route("/paths", get(enumerate_paths))
        .route("/legs/connecting", get(connecting_legs))
        .route("/ports/{port}/queue", get(queue_snapshot).post(dock_ship))
        .route("/ports/{port}/queue/front", delete(release_ship))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Cheapest voyage between two ports.
async fn plan_cheapest(
    State(state): State<AppState>,
    Query(req): Query<PlanRequest>,
) -> Result<Json<PathResultDto>, AppError> {
    let (origin, destination, date) = req.endpoints()?;
    let preferences = req.preferences();

    let network = state.network.read().await;
    let planner = Planner::new(&network);
    let result = planner.find_cheapest(&origin, &destination, date, preferences.as_ref());

    Ok(Json(PathResultDto::from_result(&result)))
}

/// Cheapest voyage, searched from both ends.
async fn plan_cheapest_bidirectional(
    State(state): State<AppState>,
    Query(req): Query<PlanRequest>,
) -> Result<Json<PathResultDto>, AppError> {
    let (origin, destination, date) = req.endpoints()?;

    let network = state.network.read().await;
    let planner = Planner::new(&network);
    let result = planner.find_cheapest_bidirectional(&origin, &destination, date);

    Ok(Json(PathResultDto::from_result(&result)))
}

/// Voyage with the fewest legs.
async fn plan_shortest(
    State(state): State<AppState>,
    Query(req): Query<PlanRequest>,
) -> Result<Json<PathResultDto>, AppError> {
    let (origin, destination, date) = req.endpoints()?;
    let preferences = req.preferences();

    let network = state.network.read().await;
    let planner = Planner::new(&network);
    let result = planner.find_shortest(&origin, &destination, date, preferences.as_ref());

    Ok(Json(PathResultDto::from_result(&result)))
}

/// Voyage through an ordered list of intermediate ports.
async fn plan_multi_leg(
    State(state): State<AppState>,
    Query(req): Query<MultiLegRequest>,
) -> Result<Json<PathResultDto>, AppError> {
    let (origin, intermediates, destination, date) = req.parts()?;

    let network = state.network.read().await;
    let planner = Planner::new(&network);
    let result = planner.find_multi_leg(&origin, &intermediates, &destination, date);

    Ok(Json(PathResultDto::from_result(&result)))
}

/// Every simple path between two ports on the query date.
async fn enumerate_paths(
    State(state): State<AppState>,
    Query(req): Query<EnumerateRequest>,
) -> Result<Json<PathListDto>, AppError> {
    let (origin, destination, date) = req.endpoints()?;
    let depth = req.depth.unwrap_or(DEFAULT_ENUMERATION_DEPTH);

    let network = state.network.read().await;
    let planner = Planner::new(&network);
    let paths = planner.enumerate_all_paths(&origin, &destination, date, depth);

    Ok(Json(PathListDto {
        paths: paths
            .into_iter()
            .map(|path| path.iter().map(PortName::to_string).collect())
            .collect(),
    }))
}

/// Every leg that could participate in some feasible voyage.
async fn connecting_legs(
    State(state): State<AppState>,
    Query(req): Query<PlanRequest>,
) -> Result<Json<LegListDto>, AppError> {
    let (origin, destination, date) = req.endpoints()?;
    let preferences = req.preferences();

    let network = state.network.read().await;
    let planner = Planner::new(&network);
    let legs = planner.connecting_legs(&origin, &destination, date, preferences.as_ref());

    Ok(Json(LegListDto {
        legs: legs.iter().map(LegDto::from_leg).collect(),
    }))
}

/// Current docking queue at a port, front first.
async fn queue_snapshot(
    State(state): State<AppState>,
    Path(port): Path<String>,
) -> Result<Json<QueueDto>, AppError> {
    let port = parse_known_port(&state, &port).await?;

    let network = state.network.read().await;
    Ok(Json(QueueDto {
        ships: network.queue_snapshot(&port),
        port: port.to_string(),
    }))
}

/// Enqueue a ship at a port.
async fn dock_ship(
    State(state): State<AppState>,
    Path(port): Path<String>,
    Json(req): Json<DockRequest>,
) -> Result<Json<QueueDto>, AppError> {
    let port = parse_known_port(&state, &port).await?;

    let mut network = state.network.write().await;
    network.dock_ship(&port, req.ship);

    Ok(Json(QueueDto {
        ships: network.queue_snapshot(&port),
        port: port.to_string(),
    }))
}

/// Release the ship at the front of a port's queue.
async fn release_ship(
    State(state): State<AppState>,
    Path(port): Path<String>,
) -> Result<Json<ReleasedDto>, AppError> {
    let port = parse_known_port(&state, &port).await?;

    let mut network = state.network.write().await;
    let ship = network.release_ship(&port);

    Ok(Json(ReleasedDto {
        port: port.to_string(),
        ship,
    }))
}

/// Parse a path parameter as a port that must exist on the network.
async fn parse_known_port(state: &AppState, raw: &str) -> Result<PortName, AppError> {
    let port = PortName::parse(raw).map_err(|_| AppError::BadRequest {
        message: format!("invalid port name: {raw}"),
    })?;

    let network = state.network.read().await;
    if !network.has_port(&port) {
        return Err(AppError::NotFound {
            message: format!("unknown port: {port}"),
        });
    }

    Ok(port)
}
