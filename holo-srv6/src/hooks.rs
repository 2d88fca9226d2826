//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bitflags::bitflags;
use holo_utils::ip::AddressFamily;
use serde::{Deserialize, Serialize};

use crate::adjacency::AdjacencyState;
use crate::collections::{AdjacencyId, AreaId};

// Protocol engine hooks the SRv6 core listens to.
bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct Hooks: u8 {
        const ADJ_STATE_CHANGE = 0x01;
        const ADJ_IP_ENABLED = 0x02;
        const ADJ_IP_DISABLED = 0x04;
    }
}

// Notification delivered by the protocol engine through one of its hooks.
#[derive(Clone, Debug)]
#[derive(Deserialize, Serialize)]
pub enum HookMsg {
    AdjStateChange {
        area_id: AreaId,
        adj_id: AdjacencyId,
        new_state: AdjacencyState,
    },
    AdjIpEnabled {
        area_id: AreaId,
        adj_id: AdjacencyId,
        af: AddressFamily,
    },
    AdjIpDisabled {
        area_id: AreaId,
        adj_id: AdjacencyId,
        af: AddressFamily,
    },
}

// ===== impl HookMsg =====

impl HookMsg {
    // Returns the hook this notification is delivered through.
    pub fn hook(&self) -> Hooks {
        match self {
            HookMsg::AdjStateChange { .. } => Hooks::ADJ_STATE_CHANGE,
            HookMsg::AdjIpEnabled { .. } => Hooks::ADJ_IP_ENABLED,
            HookMsg::AdjIpDisabled { .. } => Hooks::ADJ_IP_DISABLED,
        }
    }

    pub fn area_id(&self) -> AreaId {
        match self {
            HookMsg::AdjStateChange { area_id, .. }
            | HookMsg::AdjIpEnabled { area_id, .. }
            | HookMsg::AdjIpDisabled { area_id, .. } => *area_id,
        }
    }
}
