//! Data transfer objects for web requests and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::{Leg, PortName, VoyageDate};
use crate::planner::{Layover, PathResult, PreferenceFilter};

/// Error response for bad or unroutable requests.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request itself was malformed
    #[error("{message}")]
    BadRequest { message: String },

    /// The addressed resource does not exist
    #[error("{message}")]
    NotFound { message: String },
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Request for a point-to-point voyage plan.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Origin port name
    pub origin: String,

    /// Destination port name
    pub destination: String,

    /// Earliest departure date, DD/MM/YYYY
    pub date: String,

    /// Comma-separated carrier whitelist
    pub carriers: Option<String>,

    /// Comma-separated ports the voyage must call at
    pub require: Option<String>,

    /// Comma-separated ports the voyage must avoid
    pub exclude: Option<String>,

    /// Maximum voyage duration in hours; unparsable input means no
    /// limit
    pub max_hours: Option<String>,
}

impl PlanRequest {
    /// Parse the origin, destination, and date fields.
    pub fn endpoints(&self) -> Result<(PortName, PortName, VoyageDate), AppError> {
        let origin = parse_port(&self.origin)?;
        let destination = parse_port(&self.destination)?;
        let date = parse_date(&self.date)?;
        Ok((origin, destination, date))
    }

    /// Build the preference filter, if any preference field is set.
    ///
    /// Port lists drop unparsable entries; a malformed `max_hours`
    /// degrades to no limit.
    pub fn preferences(&self) -> Option<PreferenceFilter> {
        if self.carriers.is_none()
            && self.require.is_none()
            && self.exclude.is_none()
            && self.max_hours.is_none()
        {
            return None;
        }

        Some(PreferenceFilter {
            carriers: self.carriers.as_deref().map(split_names),
            required_ports: self
                .require
                .as_deref()
                .map(split_ports)
                .unwrap_or_default(),
            excluded_ports: self
                .exclude
                .as_deref()
                .map(split_ports)
                .unwrap_or_default(),
            max_voyage_hours: self
                .max_hours
                .as_deref()
                .and_then(|s| s.trim().parse::<i64>().ok()),
        })
    }
}

/// Request for a multi-leg voyage through intermediate ports.
#[derive(Debug, Deserialize)]
pub struct MultiLegRequest {
    /// Origin port name
    pub origin: String,

    /// Comma-separated intermediate ports, in calling order
    pub via: String,

    /// Destination port name
    pub destination: String,

    /// Earliest departure date, DD/MM/YYYY
    pub date: String,
}

impl MultiLegRequest {
    /// Parse every field; intermediate port names must all be valid.
    pub fn parts(&self) -> Result<(PortName, Vec<PortName>, PortName, VoyageDate), AppError> {
        let origin = parse_port(&self.origin)?;
        let destination = parse_port(&self.destination)?;
        let date = parse_date(&self.date)?;

        let mut intermediates = Vec::new();
        for token in self.via.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            intermediates.push(parse_port(token)?);
        }

        Ok((origin, intermediates, destination, date))
    }
}

/// Request to enumerate simple paths.
#[derive(Debug, Deserialize)]
pub struct EnumerateRequest {
    /// Origin port name
    pub origin: String,

    /// Destination port name
    pub destination: String,

    /// Date whose sailings the walk may use, DD/MM/YYYY
    pub date: String,

    /// Depth cap in ports (defaults to the engine's cap of 10)
    pub depth: Option<usize>,
}

impl EnumerateRequest {
    /// Parse the origin, destination, and date fields.
    pub fn endpoints(&self) -> Result<(PortName, PortName, VoyageDate), AppError> {
        let origin = parse_port(&self.origin)?;
        let destination = parse_port(&self.destination)?;
        let date = parse_date(&self.date)?;
        Ok((origin, destination, date))
    }
}

/// Request to dock a ship at a port.
#[derive(Debug, Deserialize)]
pub struct DockRequest {
    /// The ship to enqueue
    pub ship: String,
}

/// A leg in a response.
#[derive(Debug, Serialize)]
pub struct LegDto {
    /// Origin port name
    pub origin: String,

    /// Destination port name
    pub destination: String,

    /// Departure date, DD/MM/YYYY
    pub date: String,

    /// Departure time, HH:MM
    pub departure: String,

    /// Arrival time, HH:MM
    pub arrival: String,

    /// Fare in whole dollars
    pub fare: u32,

    /// Carrier name
    pub carrier: String,
}

impl LegDto {
    /// Convert a domain leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            origin: leg.origin().to_string(),
            destination: leg.destination().to_string(),
            date: leg.date().to_string(),
            departure: leg.departure().to_string(),
            arrival: leg.arrival().to_string(),
            fare: leg.fare(),
            carrier: leg.carrier().to_string(),
        }
    }
}

/// A layover in a response.
#[derive(Debug, Serialize)]
pub struct LayoverDto {
    /// The port the vessel waits at
    pub port: String,

    /// Hours docked
    pub hours: i64,

    /// Port charge for the wait
    pub charge: u64,

    /// Arrival date at the port
    pub arrival_date: String,

    /// Arrival time
    pub arrival_time: String,

    /// Departure date from the port
    pub departure_date: String,

    /// Departure time
    pub departure_time: String,
}

impl LayoverDto {
    /// Convert a domain layover.
    pub fn from_layover(layover: &Layover) -> Self {
        Self {
            port: layover.port.to_string(),
            hours: layover.hours,
            charge: layover.charge,
            arrival_date: layover.arrival_date.to_string(),
            arrival_time: layover.arrival_time.to_string(),
            departure_date: layover.departure_date.to_string(),
            departure_time: layover.departure_time.to_string(),
        }
    }
}

/// A voyage plan in a response.
#[derive(Debug, Serialize)]
pub struct PathResultDto {
    /// Whether a voyage was found
    pub found: bool,

    /// Ports visited, in order
    pub path: Vec<String>,

    /// Legs sailed, in order
    pub legs: Vec<LegDto>,

    /// Layovers between consecutive legs
    pub layovers: Vec<LayoverDto>,

    /// Total fares plus port charges
    pub total_cost: u64,

    /// Total voyage duration in hours
    pub total_hours: i64,

    /// Diagnostic when the query could not run
    pub error: Option<String>,

    /// Soft-constraint violations on the returned voyage
    pub warnings: Vec<String>,
}

impl PathResultDto {
    /// Convert a planner result.
    pub fn from_result(result: &PathResult) -> Self {
        Self {
            found: result.found,
            path: result.path.iter().map(PortName::to_string).collect(),
            legs: result.legs.iter().map(LegDto::from_leg).collect(),
            layovers: result
                .layovers
                .iter()
                .map(LayoverDto::from_layover)
                .collect(),
            total_cost: result.total_cost,
            total_hours: result.total_hours,
            error: result.error.as_ref().map(ToString::to_string),
            warnings: result.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Enumerated paths in a response.
#[derive(Debug, Serialize)]
pub struct PathListDto {
    /// Each path as an ordered list of port names
    pub paths: Vec<Vec<String>>,
}

/// A list of legs in a response.
#[derive(Debug, Serialize)]
pub struct LegListDto {
    /// The matching legs
    pub legs: Vec<LegDto>,
}

/// A port's docking queue in a response.
#[derive(Debug, Serialize)]
pub struct QueueDto {
    /// The port name
    pub port: String,

    /// Queued ships, front first
    pub ships: Vec<String>,
}

/// The ship released from the front of a queue.
#[derive(Debug, Serialize)]
pub struct ReleasedDto {
    /// The port name
    pub port: String,

    /// The released ship, if the queue was non-empty
    pub ship: Option<String>,
}

fn parse_port(s: &str) -> Result<PortName, AppError> {
    PortName::parse(s).map_err(|_| AppError::BadRequest {
        message: format!("invalid port name: {s}"),
    })
}

fn parse_date(s: &str) -> Result<VoyageDate, AppError> {
    VoyageDate::parse(s).map_err(|_| AppError::BadRequest {
        message: format!("invalid date: {s} (expected DD/MM/YYYY)"),
    })
}

fn split_names(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_ports(s: &str) -> Vec<PortName> {
    s.split(',')
        .filter_map(|t| PortName::parse(t.trim()).ok())
        .collect()
}
