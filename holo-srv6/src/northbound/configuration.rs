//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::packet::LevelType;
use crate::sid::SRV6_MAX_SIDS;

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InstanceCfg {
    // Capacity of the SID registry.
    pub max_sids: usize,
    // What happens to a SID once it's revoked.
    pub sid_release: SidReleasePolicy,
    // Locators whose chunks are requested when the instance is initialized.
    pub locators: BTreeSet<String>,
    // Delay attached to LSP regeneration requests, in milliseconds.
    pub lsp_regen_delay: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidReleasePolicy {
    // Revoked SIDs stay registered and are never handed out again.
    Retain,
    // Revoked SIDs return to the registry and may be reused.
    Reclaim,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AreaCfg {
    pub level_type: LevelType,
    pub srv6: AreaSrv6Cfg,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AreaSrv6Cfg {
    pub enabled: bool,
}

// ===== impl InstanceCfg =====

impl InstanceCfg {
    // Parses the configuration from its JSON representation.
    pub fn from_json(data: &str) -> Result<InstanceCfg, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub(crate) fn lsp_regen_delay(&self) -> Duration {
        Duration::from_millis(self.lsp_regen_delay)
    }
}

impl Default for InstanceCfg {
    fn default() -> InstanceCfg {
        InstanceCfg {
            max_sids: SRV6_MAX_SIDS,
            sid_release: SidReleasePolicy::Retain,
            locators: Default::default(),
            lsp_regen_delay: 0,
        }
    }
}

// ===== impl AreaCfg =====

impl AreaCfg {
    // Parses the configuration from its JSON representation.
    pub fn from_json(data: &str) -> Result<AreaCfg, serde_json::Error> {
        serde_json::from_str(data)
    }
}

impl Default for AreaCfg {
    fn default() -> AreaCfg {
        AreaCfg {
            level_type: LevelType::All,
            srv6: Default::default(),
        }
    }
}

// ===== impl AreaSrv6Cfg =====

impl Default for AreaSrv6Cfg {
    fn default() -> AreaSrv6Cfg {
        // SRv6 isn't available in limited-capability builds.
        AreaSrv6Cfg {
            enabled: cfg!(not(feature = "limited")),
        }
    }
}
