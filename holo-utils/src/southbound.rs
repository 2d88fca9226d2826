//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv6Addr;

use derive_new::new;
use ipnetwork::Ipv6Network;
use serde::{Deserialize, Serialize};

use crate::ip::AddressFamily;
use crate::protocol::Protocol;
use crate::srv6::Srv6Behavior;

// Locator address block delegated by the data-plane manager.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct LocatorChunkMsg {
    pub locator: String,
    pub prefix: Ipv6Network,
}

// Request to program (or unprogram) a local SID.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LocalSidMsg {
    pub protocol: Protocol,
    pub sid: Ipv6Addr,
    pub af: AddressFamily,
    pub behavior: Srv6Behavior,
    pub context: LocalSidContext,
}

// Additional parameters attached to a local SID.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LocalSidContext {
    pub nexthop6: Option<Ipv6Addr>,
}

// ===== impl LocalSidMsg =====

impl LocalSidMsg {
    // Creates a request to install an End SID.
    pub fn end(protocol: Protocol, sid: Ipv6Addr) -> LocalSidMsg {
        LocalSidMsg {
            protocol,
            sid,
            af: AddressFamily::Ipv6,
            behavior: Srv6Behavior::End,
            context: LocalSidContext::default(),
        }
    }

    // Creates a request to install an End.X SID pointing to the given
    // next-hop.
    pub fn end_x(
        protocol: Protocol,
        sid: Ipv6Addr,
        nexthop: Ipv6Addr,
    ) -> LocalSidMsg {
        LocalSidMsg {
            protocol,
            sid,
            af: AddressFamily::Ipv6,
            behavior: Srv6Behavior::EndX,
            context: LocalSidContext {
                nexthop6: Some(nexthop),
            },
        }
    }

    // Creates a request to remove a previously installed SID.
    pub fn remove(protocol: Protocol, sid: Ipv6Addr) -> LocalSidMsg {
        LocalSidMsg {
            protocol,
            sid,
            af: AddressFamily::Ipv6,
            behavior: Srv6Behavior::Unspec,
            context: LocalSidContext::default(),
        }
    }
}
