//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_utils::ibus::IbusSendError;
use tracing::{error, warn};

use crate::circuit::CircuitType;
use crate::collections::{AdjacencyId, AreaId, CircuitId};
use crate::packet::SystemId;

// SRv6 errors.
#[derive(Debug)]
pub enum Error {
    // Inter-task communication
    AreaIdNotFound(AreaId),
    CircuitIdNotFound(CircuitId),
    AdjacencyIdNotFound(AdjacencyId),
    IbusSendError(IbusSendError),
    // SID management
    NodeSidAllocError(SidAllocError),
    AdjSidAllocError(SystemId, SidAllocError),
    AdjacencyMissingAddr(SystemId),
    // Configuration inconsistency
    AreaNameExists(String),
    CircuitNameExists(String),
    UnknownCircuitType(String, CircuitType),
}

// SID allocation errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SidAllocError {
    NoLocatorChunks,
    InvalidIndex(u16),
    IndexCollision(u16),
    Exhausted,
}

// ===== impl Error =====

impl Error {
    pub(crate) fn log(&self) {
        match self {
            Error::AreaIdNotFound(area_id) => {
                warn!(?area_id, "{}", self);
            }
            Error::AreaNameExists(name) => {
                warn!(%name, "{}", self);
            }
            Error::CircuitNameExists(name) => {
                warn!(%name, "{}", self);
            }
            Error::CircuitIdNotFound(circuit_id) => {
                warn!(?circuit_id, "{}", self);
            }
            Error::AdjacencyIdNotFound(adj_id) => {
                warn!(?adj_id, "{}", self);
            }
            Error::IbusSendError(error) => {
                warn!(error = %with_source(error), "{}", self);
            }
            Error::NodeSidAllocError(error) => {
                warn!(%error, "{}", self);
            }
            Error::AdjSidAllocError(system_id, error) => {
                warn!(%system_id, %error, "{}", self);
            }
            Error::AdjacencyMissingAddr(system_id) => {
                warn!(%system_id, "{}", self);
            }
            Error::UnknownCircuitType(circuit, circuit_type) => {
                error!(%circuit, %circuit_type, "{}", self);
            }
        }
    }

    // Returns whether the error leaves the protocol engine in an undefined
    // state, in which case processing must not continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::UnknownCircuitType(..))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::AreaIdNotFound(..) => {
                write!(f, "area ID not found")
            }
            Error::AreaNameExists(..) => {
                write!(f, "area name already exists")
            }
            Error::CircuitNameExists(..) => {
                write!(f, "circuit name already exists")
            }
            Error::CircuitIdNotFound(..) => {
                write!(f, "circuit ID not found")
            }
            Error::AdjacencyIdNotFound(..) => {
                write!(f, "adjacency ID not found")
            }
            Error::IbusSendError(..) => {
                write!(f, "failed to send message to the SRv6 manager")
            }
            Error::NodeSidAllocError(..) => {
                write!(f, "failed to allocate node SID")
            }
            Error::AdjSidAllocError(..) => {
                write!(f, "failed to allocate adjacency SID")
            }
            Error::AdjacencyMissingAddr(..) => {
                write!(f, "adjacency has no IPv6 next-hop address")
            }
            Error::UnknownCircuitType(..) => {
                write!(f, "unsupported circuit type")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IbusSendError(error) => Some(error),
            Error::NodeSidAllocError(error)
            | Error::AdjSidAllocError(_, error) => Some(error),
            _ => None,
        }
    }
}

impl From<IbusSendError> for Error {
    fn from(error: IbusSendError) -> Error {
        Error::IbusSendError(error)
    }
}

// ===== impl SidAllocError =====

impl std::fmt::Display for SidAllocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SidAllocError::NoLocatorChunks => {
                write!(f, "no locator chunk available")
            }
            SidAllocError::InvalidIndex(index) => {
                write!(f, "function index {} outside locator prefix", index)
            }
            SidAllocError::IndexCollision(index) => {
                write!(f, "function index {} already in use", index)
            }
            SidAllocError::Exhausted => {
                write!(f, "SID space exhausted")
            }
        }
    }
}

impl std::error::Error for SidAllocError {}

// ===== helper functions =====

fn with_source<E: std::error::Error>(error: E) -> String {
    if let Some(source) = error.source() {
        format!("{} ({})", error, with_source(source))
    } else {
        error.to_string()
    }
}
