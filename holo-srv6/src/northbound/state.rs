//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv6Addr;

use serde::Serialize;

use crate::adjacency::{Adjacency, AdjacencyState};
use crate::area::Area;
use crate::instance::Instance;
use crate::locator::{Locator, LocatorChunk};

// Operational state of an SRv6 instance.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstanceState {
    pub locator_address: Option<Ipv6Addr>,
    pub node_sid: Option<Ipv6Addr>,
    pub chunks: Vec<LocatorChunk>,
    pub sids: Vec<Ipv6Addr>,
    pub areas: Vec<AreaState>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AreaState {
    pub name: String,
    pub enabled: bool,
    pub locators: Vec<Locator>,
    pub adjacencies: Vec<AdjacencyInfo>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdjacencyInfo {
    pub system_id: String,
    pub circuit: Option<String>,
    pub state: AdjacencyState,
    pub ipv6_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<Ipv6Addr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nexthop: Option<Ipv6Addr>,
}

// ===== impl InstanceState =====

impl InstanceState {
    pub(crate) fn new(instance: &Instance) -> InstanceState {
        InstanceState {
            locator_address: instance.state.locator_addr,
            node_sid: instance
                .state
                .node_segment
                .map(|node_segment| node_segment.sid),
            chunks: instance.state.chunks.iter().cloned().collect(),
            sids: instance.state.sids.iter().copied().collect(),
            areas: instance.areas.iter().map(AreaState::new).collect(),
        }
    }
}

// ===== impl AreaState =====

impl AreaState {
    fn new(area: &Area) -> AreaState {
        AreaState {
            name: area.name.clone(),
            enabled: area.srv6.enabled,
            locators: area.srv6.locators.iter().cloned().collect(),
            adjacencies: area
                .adjacencies
                .iter()
                .map(|adj| AdjacencyInfo::new(area, adj))
                .collect(),
        }
    }
}

// ===== impl AdjacencyInfo =====

impl AdjacencyInfo {
    fn new(area: &Area, adj: &Adjacency) -> AdjacencyInfo {
        AdjacencyInfo {
            system_id: adj.system_id.to_string(),
            circuit: area
                .circuits
                .get_by_id(adj.circuit_id)
                .ok()
                .map(|circuit| circuit.name.clone()),
            state: adj.state,
            ipv6_enabled: adj.ipv6_enabled,
            sid: adj.srv6_sid.as_ref().map(|adj_sid| adj_sid.sid),
            nexthop: adj.srv6_sid.as_ref().map(|adj_sid| adj_sid.nexthop),
        }
    }
}
