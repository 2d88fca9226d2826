//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_utils::southbound::LocatorChunkMsg;

use crate::debug::Debug;
use crate::error::Error;
use crate::instance::Instance;
use crate::locator::LocatorChunk;
use crate::{lsdb, srv6};

// ===== global functions =====

pub(crate) fn process_locator_chunk(
    instance: &mut Instance,
    msg: LocatorChunkMsg,
) -> Result<(), Error> {
    let chunk = LocatorChunk::new(&msg.locator, msg.prefix);
    Debug::LocatorChunkRx(&chunk).log();

    let (mut instance, areas) = instance.as_view();

    // A repeated notification still retries the pending allocations below.
    if instance.state.chunks.push(chunk.clone()) {
        instance.state.locator_addr = Some(chunk.prefix.network());

        // Bind the chunk prefix to the locators of the same name.
        let delay = instance.config.lsp_regen_delay();
        for area in areas.iter_mut() {
            let Some(locator) = area.srv6.locators.get_mut(&chunk.locator)
            else {
                continue;
            };
            if locator.prefix_bind(chunk.prefix) {
                lsdb::schedule_regeneration(instance.tx, area, delay);
            }
        }
    }

    // Bootstrap the node segment.
    if let Err(error) = srv6::node_segment_set(&mut instance, areas) {
        error.log();
    }

    // Retry adjacencies left without a SID.
    let area_idxs = areas.indexes().collect::<Vec<_>>();
    for area_idx in area_idxs {
        areas[area_idx].srv6_resync(&mut instance)?;
    }

    Ok(())
}
