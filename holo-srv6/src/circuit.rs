//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

use crate::collections::{CircuitId, CircuitIndex};
use crate::packet::consts::NeighborStlvType;
use crate::packet::subtlvs::ExtIsReachStlvs;

#[derive(Debug)]
pub struct Circuit {
    pub index: CircuitIndex,
    pub id: CircuitId,
    pub name: String,
    pub circuit_type: CircuitType,
    // Extended IS reachability sub-TLVs advertised for this circuit.
    pub ext_stlvs: ExtIsReachStlvs,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum CircuitType {
    Unknown,
    Broadcast,
    PointToPoint,
    Loopback,
}

// ===== impl Circuit =====

impl Circuit {
    pub(crate) fn new(
        index: CircuitIndex,
        id: CircuitId,
        name: String,
        circuit_type: CircuitType,
    ) -> Circuit {
        Circuit {
            index,
            id,
            name,
            circuit_type,
            ext_stlvs: Default::default(),
        }
    }
}

// ===== impl CircuitType =====

impl CircuitType {
    // Returns the type of the Adj-SID sub-TLV advertised for adjacencies
    // formed over this circuit type, if any.
    pub fn adj_sid_stlv_type(&self) -> Option<NeighborStlvType> {
        match self {
            CircuitType::PointToPoint => Some(NeighborStlvType::Srv6EndXSid),
            CircuitType::Broadcast => Some(NeighborStlvType::Srv6LanEndXSid),
            CircuitType::Unknown | CircuitType::Loopback => None,
        }
    }
}

impl std::fmt::Display for CircuitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitType::Unknown => write!(f, "unknown"),
            CircuitType::Broadcast => write!(f, "broadcast"),
            CircuitType::PointToPoint => write!(f, "point-to-point"),
            CircuitType::Loopback => write!(f, "loopback"),
        }
    }
}
