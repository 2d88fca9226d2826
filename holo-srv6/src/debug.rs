//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv6Addr;

use holo_utils::ibus::IbusMsg;
use tracing::{debug, debug_span};

use crate::adjacency::{Adjacency, AdjacencySid};
use crate::hooks::{HookMsg, Hooks};
use crate::locator::{Locator, LocatorChunk};
use crate::packet::LevelType;

// SRv6 debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    // Instances
    InstanceInit,
    InstanceTerm,
    HooksRegister(Hooks),
    HooksUnregister(Hooks),
    // Areas
    AreaCreate(&'a str),
    AreaDelete(&'a str),
    AreaSrv6Start(&'a str),
    AreaSrv6Stop(&'a str),
    LspRegenSchedule(&'a str, LevelType),
    // Adjacencies
    AdjacencyCreate(&'a Adjacency),
    AdjacencyDelete(&'a Adjacency),
    // Locators
    LocatorAdd(&'a str, &'a Locator),
    LocatorChunkRequest(&'a str, u32),
    LocatorChunkRx(&'a LocatorChunk),
    LocatorChunkRelease(&'a str),
    // SIDs
    NodeSidSet(&'a Ipv6Addr),
    NodeSidUnset(&'a Ipv6Addr),
    AdjSidAdd(&'a Adjacency, &'a AdjacencySid),
    AdjSidDel(&'a Adjacency, &'a AdjacencySid),
    SidRelease(&'a Ipv6Addr),
    // Protocol engine hooks
    HookRx(&'a HookMsg),
    HookIgnored(&'a HookMsg),
    // Internal bus
    IbusRx(&'a IbusMsg),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::InstanceInit | Debug::InstanceTerm => {
                // Parent span(s): srv6-instance
                debug!("{}", self);
            }
            Debug::HooksRegister(hooks) | Debug::HooksUnregister(hooks) => {
                // Parent span(s): srv6-instance
                debug!(?hooks, "{}", self);
            }
            Debug::AreaCreate(name)
            | Debug::AreaDelete(name)
            | Debug::AreaSrv6Start(name)
            | Debug::AreaSrv6Stop(name) => {
                // Parent span(s): srv6-instance
                debug_span!("area", %name).in_scope(|| {
                    debug!("{}", self);
                })
            }
            Debug::LspRegenSchedule(name, level_type) => {
                // Parent span(s): srv6-instance
                debug_span!("area", %name).in_scope(|| {
                    debug!(%level_type, "{}", self);
                })
            }
            Debug::AdjacencyCreate(adj) | Debug::AdjacencyDelete(adj) => {
                // Parent span(s): srv6-instance
                debug_span!("adjacency", system_id = %adj.system_id)
                    .in_scope(|| {
                        debug!("{}", self);
                    })
            }
            Debug::LocatorAdd(area, locator) => {
                // Parent span(s): srv6-instance
                debug_span!("area", name = %area).in_scope(|| {
                    debug!(locator = %locator.name, "{}", self);
                })
            }
            Debug::LocatorChunkRequest(locator, request_id) => {
                // Parent span(s): srv6-instance
                debug_span!("southbound").in_scope(|| {
                    debug!(%locator, %request_id, "{}", self);
                })
            }
            Debug::LocatorChunkRx(chunk) => {
                // Parent span(s): srv6-instance
                debug_span!("southbound").in_scope(|| {
                    debug!(locator = %chunk.locator, prefix = %chunk.prefix, "{}", self);
                })
            }
            Debug::LocatorChunkRelease(locator) => {
                // Parent span(s): srv6-instance
                debug_span!("southbound").in_scope(|| {
                    debug!(%locator, "{}", self);
                })
            }
            Debug::NodeSidSet(sid)
            | Debug::NodeSidUnset(sid)
            | Debug::SidRelease(sid) => {
                // Parent span(s): srv6-instance
                debug!(%sid, "{}", self);
            }
            Debug::AdjSidAdd(adj, adj_sid) | Debug::AdjSidDel(adj, adj_sid) => {
                // Parent span(s): srv6-instance
                debug_span!("adjacency", system_id = %adj.system_id)
                    .in_scope(|| {
                        debug!(sid = %adj_sid.sid, nexthop = %adj_sid.nexthop, "{}", self);
                    })
            }
            Debug::HookRx(msg) | Debug::HookIgnored(msg) => {
                // Parent span(s): srv6-instance
                debug_span!("hooks").in_scope(|| {
                    debug!(area_id = %msg.area_id(), ?msg, "{}", self);
                })
            }
            Debug::IbusRx(msg) => {
                // Parent span(s): srv6-instance
                debug_span!("internal-bus").in_scope(|| {
                    debug_span!("input").in_scope(|| {
                        debug!(?msg, "{}", self);
                    })
                })
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::InstanceInit => {
                write!(f, "initializing SRv6")
            }
            Debug::InstanceTerm => {
                write!(f, "terminating SRv6")
            }
            Debug::HooksRegister(..) => {
                write!(f, "registering hooks")
            }
            Debug::HooksUnregister(..) => {
                write!(f, "unregistering hooks")
            }
            Debug::AreaCreate(..) => {
                write!(f, "area created")
            }
            Debug::AreaDelete(..) => {
                write!(f, "area deleted")
            }
            Debug::AreaSrv6Start(..) => {
                write!(f, "starting SRv6")
            }
            Debug::AreaSrv6Stop(..) => {
                write!(f, "stopping SRv6")
            }
            Debug::LspRegenSchedule(..) => {
                write!(f, "scheduling LSP regeneration")
            }
            Debug::AdjacencyCreate(..) => {
                write!(f, "adjacency created")
            }
            Debug::AdjacencyDelete(..) => {
                write!(f, "adjacency deleted")
            }
            Debug::LocatorAdd(..) => {
                write!(f, "locator added")
            }
            Debug::LocatorChunkRequest(..) => {
                write!(f, "requesting locator chunk")
            }
            Debug::LocatorChunkRx(..) => {
                write!(f, "locator chunk received")
            }
            Debug::LocatorChunkRelease(..) => {
                write!(f, "releasing locator chunk")
            }
            Debug::NodeSidSet(..) => {
                write!(f, "node SID set")
            }
            Debug::NodeSidUnset(..) => {
                write!(f, "node SID unset")
            }
            Debug::AdjSidAdd(..) => {
                write!(f, "adjacency SID added")
            }
            Debug::AdjSidDel(..) => {
                write!(f, "adjacency SID deleted")
            }
            Debug::SidRelease(..) => {
                write!(f, "SID released")
            }
            Debug::HookRx(..) => {
                write!(f, "notification")
            }
            Debug::HookIgnored(..) => {
                write!(f, "ignoring notification from unregistered hook")
            }
            Debug::IbusRx(..) => {
                write!(f, "message")
            }
        }
    }
}
