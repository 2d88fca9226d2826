//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv6Addr;

use holo_utils::protocol::Protocol;
use holo_utils::southbound::LocalSidMsg;
use holo_utils::srv6::Srv6Function;

use crate::adjacency::{Adjacency, AdjacencySid};
use crate::circuit::{Circuit, CircuitType};
use crate::collections::Areas;
use crate::debug::Debug;
use crate::error::Error;
use crate::instance::{InstanceView, NodeSegment};
use crate::locator::Locators;
use crate::northbound::configuration::SidReleasePolicy;
use crate::packet::consts::NeighborStlvType;
use crate::southbound;

// ===== global functions =====

// Allocates an End.X SID for the given adjacency, programs it in the data
// plane and adds the corresponding sub-TLV to the circuit.
//
// Calling this function when the adjacency already has a SID, or when the
// circuit already carries the relevant sub-TLV, is a no-op.
pub(crate) fn adj_sid_add(
    instance: &mut InstanceView<'_>,
    locators: &mut Locators,
    circuit: &mut Circuit,
    adj: &mut Adjacency,
) -> Result<(), Error> {
    let stlv_type = circuit_stlv_type(circuit)?;

    // Include neighbor System ID if the circuit is broadcast.
    let nbr_system_id = (circuit.circuit_type == CircuitType::Broadcast)
        .then_some(adj.system_id);

    if adj.srv6_sid.is_some()
        || circuit.ext_stlvs.contains(stlv_type, nbr_system_id)
    {
        return Ok(());
    }

    let Some(nexthop) = adj.nexthop6() else {
        return Err(Error::AdjacencyMissingAddr(adj.system_id));
    };

    // Allocate a SID out of the available locator chunks.
    let sid = instance
        .state
        .sids
        .allocate(instance.state.chunks.as_slice(), 0)
        .map_err(|error| Error::AdjSidAllocError(adj.system_id, error))?;

    // Install the End.X SID.
    let msg = LocalSidMsg::end_x(Protocol::ISIS, sid, nexthop);
    if let Err(error) =
        southbound::tx::local_sid_install(&instance.tx.ibus, msg)
    {
        instance.state.sids.release(&sid);
        return Err(error);
    }

    let adj_sid = AdjacencySid::new(sid, nexthop, nbr_system_id);
    match nbr_system_id {
        Some(nbr_system_id) => circuit
            .ext_stlvs
            .lan_endx_sid_add(adj_sid.to_lan_stlv(nbr_system_id)),
        None => circuit.ext_stlvs.endx_sid_add(adj_sid.to_stlv()),
    }
    function_add(instance, locators, adj_sid.function());
    Debug::AdjSidAdd(adj, &adj_sid).log();
    adj.srv6_sid = Some(adj_sid);

    Ok(())
}

// Removes the End.X SID of the given adjacency from the circuit and from
// the data plane.
//
// Calling this function when the adjacency has no SID is a no-op.
pub(crate) fn adj_sid_del(
    instance: &mut InstanceView<'_>,
    locators: &mut Locators,
    circuit: &mut Circuit,
    adj: &mut Adjacency,
) -> Result<(), Error> {
    let stlv_type = circuit_stlv_type(circuit)?;

    let Some(adj_sid) = adj.srv6_sid.take() else {
        return Ok(());
    };
    Debug::AdjSidDel(adj, &adj_sid).log();

    // Remove the sub-TLV.
    match stlv_type {
        NeighborStlvType::Srv6EndXSid => {
            circuit.ext_stlvs.endx_sid_del(&adj_sid.sid);
        }
        NeighborStlvType::Srv6LanEndXSid => {
            let nbr_system_id = adj_sid.nbr_system_id.unwrap_or(adj.system_id);
            circuit.ext_stlvs.lan_endx_sid_del(&nbr_system_id);
        }
    }
    locators
        .iter_mut()
        .for_each(|locator| locator.function_del(&adj_sid.sid));

    // Nothing was ever programmed for an unspecified SID.
    if adj_sid.sid.is_unspecified() {
        return Ok(());
    }
    sid_release(instance, &adj_sid.sid);

    // Uninstall the End.X SID.
    let msg = LocalSidMsg::remove(Protocol::ISIS, adj_sid.sid);
    southbound::tx::local_sid_uninstall(&instance.tx.ibus, msg)
}

// Allocates and programs the node End SID, unless one exists already.
pub(crate) fn node_segment_set(
    instance: &mut InstanceView<'_>,
    areas: &mut Areas,
) -> Result<(), Error> {
    if instance.state.node_segment.is_some() {
        return Ok(());
    }

    let sid = instance
        .state
        .sids
        .allocate(instance.state.chunks.as_slice(), 0)
        .map_err(Error::NodeSidAllocError)?;

    // Install the End SID.
    let msg = LocalSidMsg::end(Protocol::ISIS, sid);
    if let Err(error) =
        southbound::tx::local_sid_install(&instance.tx.ibus, msg)
    {
        instance.state.sids.release(&sid);
        return Err(error);
    }

    Debug::NodeSidSet(&sid).log();
    let node_segment = NodeSegment { sid };
    instance.state.node_segment = Some(node_segment);
    let function = node_segment.function();
    for area in areas.iter_mut() {
        function_add(instance, &mut area.srv6.locators, function);
    }

    Ok(())
}

// Uninstalls the node End SID, if any.
pub(crate) fn node_segment_unset(
    instance: &mut InstanceView<'_>,
    areas: &mut Areas,
) -> Result<(), Error> {
    let Some(node_segment) = instance.state.node_segment.take() else {
        return Ok(());
    };
    Debug::NodeSidUnset(&node_segment.sid).log();

    for area in areas.iter_mut() {
        area.srv6
            .locators
            .iter_mut()
            .for_each(|locator| locator.function_del(&node_segment.sid));
    }
    sid_release(instance, &node_segment.sid);

    // Uninstall the End SID.
    let msg = LocalSidMsg::remove(Protocol::ISIS, node_segment.sid);
    southbound::tx::local_sid_uninstall(&instance.tx.ibus, msg)
}

// ===== helper functions =====

fn circuit_stlv_type(circuit: &Circuit) -> Result<NeighborStlvType, Error> {
    circuit.circuit_type.adj_sid_stlv_type().ok_or_else(|| {
        Error::UnknownCircuitType(circuit.name.clone(), circuit.circuit_type)
    })
}

// Records the function in the locator whose chunk the SID was carved out
// of.
fn function_add(
    instance: &InstanceView<'_>,
    locators: &mut Locators,
    function: Srv6Function,
) {
    let Some(chunk) = instance.state.chunks.get_by_sid(&function.sid) else {
        return;
    };
    if let Some(locator) = locators.get_mut(&chunk.locator) {
        locator.function_add(function);
    }
}

// Returns a revoked SID to the registry, depending on the configured
// release policy.
fn sid_release(instance: &mut InstanceView<'_>, sid: &Ipv6Addr) {
    match instance.config.sid_release {
        SidReleasePolicy::Retain => (),
        SidReleasePolicy::Reclaim => {
            if instance.state.sids.release(sid) {
                Debug::SidRelease(sid).log();
            }
        }
    }
}
