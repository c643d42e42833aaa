use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::ephemeris::EphemerisError;

/// Which chart within a request a computation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartRole {
    Natal,
    NatalA,
    NatalB,
    Composite,
    Progressed,
}

impl ChartRole {
    pub fn id(self) -> &'static str {
        match self {
            ChartRole::Natal => "natal",
            ChartRole::NatalA => "natal_a",
            ChartRole::NatalB => "natal_b",
            ChartRole::Composite => "composite",
            ChartRole::Progressed => "progressed",
        }
    }
}

impl fmt::Display for ChartRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Taxonomy class of a [`ChartError`], independent of role context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputValidation,
    Ephemeris,
    DomainComputation,
}

/// Errors surfaced by the chart pipelines. None are retried by the core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid {field}: {message}")]
    InputValidation { field: String, message: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("Cannot classify {point} at {longitude:.6}°: {message}")]
    DomainComputation {
        point: String,
        longitude: f64,
        message: String,
    },
    #[error("{role} chart: {source}")]
    InChart {
        role: ChartRole,
        #[source]
        source: Box<ChartError>,
    },
}

impl ChartError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ChartError::InputValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn domain(point: impl Into<String>, longitude: f64, message: impl Into<String>) -> Self {
        ChartError::DomainComputation {
            point: point.into(),
            longitude,
            message: message.into(),
        }
    }

    /// Attach the chart role. An error that already carries a role keeps it.
    pub fn in_role(self, role: ChartRole) -> Self {
        match self {
            ChartError::InChart { .. } => self,
            other => ChartError::InChart {
                role,
                source: Box::new(other),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::InputValidation { .. } => ErrorKind::InputValidation,
            ChartError::Ephemeris(_) => ErrorKind::Ephemeris,
            ChartError::DomainComputation { .. } => ErrorKind::DomainComputation,
            ChartError::InChart { source, .. } => source.kind(),
        }
    }

    pub fn role(&self) -> Option<ChartRole> {
        match self {
            ChartError::InChart { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Offending input field, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ChartError::InputValidation { field, .. } => Some(field.as_str()),
            ChartError::InChart { source, .. } => source.field(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
