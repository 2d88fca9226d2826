//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;
use std::net::Ipv6Addr;

use derive_new::new;
use holo_utils::ip::Ipv6AddrExt;
use holo_utils::srv6::{Srv6Behavior, Srv6Function};
use serde::{Deserialize, Serialize};

use crate::collections::{AdjacencyId, CircuitId};
use crate::debug::Debug;
use crate::packet::SystemId;
use crate::packet::subtlvs::{
    EndXSidFlags, Srv6EndXSidStlv, Srv6LanEndXSidStlv,
};

#[derive(Debug)]
pub struct Adjacency {
    pub id: AdjacencyId,
    pub circuit_id: CircuitId,
    pub system_id: SystemId,
    pub state: AdjacencyState,
    // Whether the protocol engine reported IPv6 as enabled.
    pub ipv6_enabled: bool,
    pub ipv6_addrs: BTreeSet<Ipv6Addr>,
    pub srv6_sid: Option<AdjacencySid>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum AdjacencyState {
    Down,
    Initializing,
    Up,
}

// SRv6 End.X SID bound to an adjacency.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct AdjacencySid {
    pub sid: Ipv6Addr,
    pub nexthop: Ipv6Addr,
    // Set for adjacencies formed over broadcast circuits.
    pub nbr_system_id: Option<SystemId>,
}

// ===== impl Adjacency =====

impl Adjacency {
    // Creates new adjacency.
    pub(crate) fn new(
        id: AdjacencyId,
        circuit_id: CircuitId,
        system_id: SystemId,
    ) -> Adjacency {
        let adj = Adjacency {
            id,
            circuit_id,
            system_id,
            state: AdjacencyState::Down,
            ipv6_enabled: false,
            ipv6_addrs: Default::default(),
            srv6_sid: None,
        };
        Debug::AdjacencyCreate(&adj).log();
        adj
    }

    // Returns the IPv6 address used as the End.X next-hop: the first global
    // address if any, otherwise the first known address.
    pub fn nexthop6(&self) -> Option<Ipv6Addr> {
        self.ipv6_addrs
            .iter()
            .find(|addr| addr.is_global_unicast())
            .or_else(|| self.ipv6_addrs.first())
            .copied()
    }

    pub fn is_ipv6_enabled(&self) -> bool {
        self.ipv6_enabled
    }
}

impl Drop for Adjacency {
    fn drop(&mut self) {
        Debug::AdjacencyDelete(self).log();
    }
}

// ===== impl AdjacencyState =====

impl std::fmt::Display for AdjacencyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjacencyState::Down => write!(f, "down"),
            AdjacencyState::Initializing => write!(f, "init"),
            AdjacencyState::Up => write!(f, "up"),
        }
    }
}

// ===== impl AdjacencySid =====

impl AdjacencySid {
    pub(crate) fn function(&self) -> Srv6Function {
        Srv6Function::new(self.sid, Srv6Behavior::EndX)
    }

    pub(crate) fn to_stlv(&self) -> Srv6EndXSidStlv {
        Srv6EndXSidStlv::new(
            EndXSidFlags::empty(),
            0,
            0,
            Srv6Behavior::EndX,
            self.sid,
        )
    }

    pub(crate) fn to_lan_stlv(
        &self,
        nbr_system_id: SystemId,
    ) -> Srv6LanEndXSidStlv {
        Srv6LanEndXSidStlv::new(
            nbr_system_id,
            EndXSidFlags::empty(),
            0,
            0,
            Srv6Behavior::EndX,
            self.sid,
        )
    }
}
