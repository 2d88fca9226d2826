//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod consts;
pub mod subtlvs;

use serde::{Deserialize, Serialize};

// Represent an IS-IS level, or a combination of both of them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum LevelType {
    L1,
    L2,
    All,
}

// Represents an IS-IS System ID.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct SystemId([u8; 6]);

// ===== impl LevelType =====

impl std::fmt::Display for LevelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelType::L1 => write!(f, "level-1"),
            LevelType::L2 => write!(f, "level-2"),
            LevelType::All => write!(f, "level-all"),
        }
    }
}

// ===== impl SystemId =====

impl From<[u8; 6]> for SystemId {
    fn from(bytes: [u8; 6]) -> SystemId {
        SystemId(bytes)
    }
}

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02x}{:02x}.{:02x}{:02x}.{:02x}{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}
