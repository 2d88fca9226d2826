//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::time::Duration;

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::collections::AreaId;
use crate::debug::Debug;
use crate::instance::InstanceChannelsTx;
use crate::packet::LevelType;

// Request to regenerate the LSPs of an area.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct LspRegenMsg {
    pub area_id: AreaId,
    pub level_type: LevelType,
    pub delay: Duration,
}

// ===== global functions =====

// Asks the protocol engine to regenerate the LSPs of all levels of the
// given area.
pub(crate) fn schedule_regeneration(
    tx: &InstanceChannelsTx,
    area: &Area,
    delay: Duration,
) {
    let level_type = area.config.level_type;
    Debug::LspRegenSchedule(&area.name, level_type).log();

    let msg = LspRegenMsg::new(area.id, level_type, delay);
    let _ = tx.lsp_regen.send(msg);
}
