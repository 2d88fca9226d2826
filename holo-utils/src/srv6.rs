//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv6Addr;

use derive_new::new;
use serde::{Deserialize, Serialize};

// SRv6 Endpoint Behaviors.
//
// IANA registry:
// https://www.iana.org/assignments/segment-routing/segment-routing.xhtml#srv6-endpoint-behaviors
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum Srv6Behavior {
    // Reserved codepoint, used to request the removal of a local SID.
    Unspec = 0,
    End = 1,
    EndX = 5,
}

// SRv6 function instantiated out of a locator.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct Srv6Function {
    pub sid: Ipv6Addr,
    pub behavior: Srv6Behavior,
}

// ===== impl Srv6Behavior =====

impl std::fmt::Display for Srv6Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Srv6Behavior::Unspec => write!(f, "unspec"),
            Srv6Behavior::End => write!(f, "End"),
            Srv6Behavior::EndX => write!(f, "End.X"),
        }
    }
}
