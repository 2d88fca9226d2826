//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_utils::ip::AddressFamily;

use crate::adjacency::AdjacencyState;
use crate::area::Area;
use crate::collections::AdjacencyId;
use crate::error::Error;
use crate::instance::InstanceView;
use crate::lsdb;

// ===== Adjacency state change =====

pub(crate) fn process_adj_state_change(
    instance: &mut InstanceView<'_>,
    area: &mut Area,
    adj_id: AdjacencyId,
    new_state: AdjacencyState,
) -> Result<(), Error> {
    let adj = area.adjacencies.get_mut_by_id(adj_id)?;
    let old_state = adj.state;
    if old_state == new_state {
        return Ok(());
    }
    adj.state = new_state;

    if new_state == AdjacencyState::Up {
        if area.srv6.enabled && adj.is_ipv6_enabled() {
            adj_sid_update(instance, area, adj_id, true)?;
        }
    } else if old_state == AdjacencyState::Up {
        adj_sid_update(instance, area, adj_id, false)?;
    }

    Ok(())
}

// ===== Adjacency IP enabled =====

pub(crate) fn process_adj_ip_enabled(
    instance: &mut InstanceView<'_>,
    area: &mut Area,
    adj_id: AdjacencyId,
    af: AddressFamily,
) -> Result<(), Error> {
    if af != AddressFamily::Ipv6 {
        return Ok(());
    }

    let adj = area.adjacencies.get_mut_by_id(adj_id)?;
    adj.ipv6_enabled = true;

    // SIDs are only bound to operational adjacencies.
    if !area.srv6.enabled || adj.state != AdjacencyState::Up {
        return Ok(());
    }

    adj_sid_update(instance, area, adj_id, true)
}

// ===== Adjacency IP disabled =====

pub(crate) fn process_adj_ip_disabled(
    instance: &mut InstanceView<'_>,
    area: &mut Area,
    adj_id: AdjacencyId,
    af: AddressFamily,
) -> Result<(), Error> {
    if af != AddressFamily::Ipv6 {
        return Ok(());
    }

    let adj = area.adjacencies.get_mut_by_id(adj_id)?;
    adj.ipv6_enabled = false;

    adj_sid_update(instance, area, adj_id, false)
}

// ===== helper functions =====

// Runs the add or remove path for a single adjacency, scheduling LSP
// regeneration if its SID changed.
fn adj_sid_update(
    instance: &mut InstanceView<'_>,
    area: &mut Area,
    adj_id: AdjacencyId,
    add: bool,
) -> Result<(), Error> {
    let had_sid = area.adjacencies.get_by_id(adj_id)?.srv6_sid.is_some();
    let result = if add {
        area.adj_sid_add(instance, adj_id)
    } else {
        area.adj_sid_del(instance, adj_id)
    };

    let has_sid = area.adjacencies.get_by_id(adj_id)?.srv6_sid.is_some();
    if had_sid != has_sid {
        let delay = instance.config.lsp_regen_delay();
        lsdb::schedule_regeneration(instance.tx, area, delay);
    }

    result
}
