//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv6Addr;

use bitflags::bitflags;
use derive_new::new;
use holo_utils::srv6::Srv6Behavior;
use serde::{Deserialize, Serialize};

use crate::packet::SystemId;
use crate::packet::consts::NeighborStlvType;

// SRv6 End.X SID flags (RFC 9352 section 8.1).
bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct EndXSidFlags: u8 {
        const B = 0x80;
        const S = 0x40;
        const P = 0x20;
    }
}

// SRv6 End.X SID Sub-TLV.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct Srv6EndXSidStlv {
    pub flags: EndXSidFlags,
    pub algo: u8,
    pub weight: u8,
    pub behavior: Srv6Behavior,
    pub sid: Ipv6Addr,
}

// SRv6 LAN End.X SID Sub-TLV.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct Srv6LanEndXSidStlv {
    pub nbr_system_id: SystemId,
    pub flags: EndXSidFlags,
    pub algo: u8,
    pub weight: u8,
    pub behavior: Srv6Behavior,
    pub sid: Ipv6Addr,
}

// Extended IS reachability sub-TLVs originated for a circuit.
//
// Only the SRv6 sub-TLVs are kept here; their encoding is performed by the
// TLV serialization layer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct ExtIsReachStlvs {
    pub srv6_endx_sids: Vec<Srv6EndXSidStlv>,
    pub srv6_lan_endx_sids: Vec<Srv6LanEndXSidStlv>,
}

// ===== impl ExtIsReachStlvs =====

impl ExtIsReachStlvs {
    // Returns whether a sub-TLV of the given type exists. LAN End.X SIDs are
    // additionally matched against the neighbor System ID, when provided.
    pub fn contains(
        &self,
        stlv_type: NeighborStlvType,
        nbr_system_id: Option<SystemId>,
    ) -> bool {
        match stlv_type {
            NeighborStlvType::Srv6EndXSid => !self.srv6_endx_sids.is_empty(),
            NeighborStlvType::Srv6LanEndXSid => match nbr_system_id {
                Some(system_id) => self
                    .srv6_lan_endx_sids
                    .iter()
                    .any(|stlv| stlv.nbr_system_id == system_id),
                None => !self.srv6_lan_endx_sids.is_empty(),
            },
        }
    }

    pub fn endx_sid_add(&mut self, stlv: Srv6EndXSidStlv) {
        self.srv6_endx_sids.push(stlv);
    }

    pub fn lan_endx_sid_add(&mut self, stlv: Srv6LanEndXSidStlv) {
        self.srv6_lan_endx_sids.push(stlv);
    }

    // Removes the End.X SID sub-TLV(s) carrying the given SID. Returns
    // whether anything was removed.
    pub fn endx_sid_del(&mut self, sid: &Ipv6Addr) -> bool {
        let len = self.srv6_endx_sids.len();
        self.srv6_endx_sids.retain(|stlv| stlv.sid != *sid);
        self.srv6_endx_sids.len() != len
    }

    // Removes the LAN End.X SID sub-TLV(s) of the given neighbor. Returns
    // whether anything was removed.
    pub fn lan_endx_sid_del(&mut self, nbr_system_id: &SystemId) -> bool {
        let len = self.srv6_lan_endx_sids.len();
        self.srv6_lan_endx_sids
            .retain(|stlv| stlv.nbr_system_id != *nbr_system_id);
        self.srv6_lan_endx_sids.len() != len
    }

    pub fn is_empty(&self) -> bool {
        self.srv6_endx_sids.is_empty() && self.srv6_lan_endx_sids.is_empty()
    }
}
