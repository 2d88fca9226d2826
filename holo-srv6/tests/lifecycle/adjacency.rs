//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use const_addrs::{ip6, net6};
use holo_srv6::adjacency::AdjacencyState;
use holo_srv6::circuit::CircuitType;
use holo_srv6::collections::{AdjacencyId, AreaId, CircuitId};
use holo_srv6::error::Error;
use holo_srv6::hooks::HookMsg;
use holo_srv6::northbound::configuration::{InstanceCfg, SidReleasePolicy};
use holo_srv6::packet::SystemId;
use holo_utils::ip::AddressFamily;
use holo_utils::srv6::Srv6Behavior;

use super::{TestInstance, local_sid_adds, local_sid_dels};

struct Setup {
    test: TestInstance,
    area_id: AreaId,
    circuit_id: CircuitId,
    adj_id: AdjacencyId,
}

//
// Helper functions.
//

// Single point-to-point adjacency in an SRv6-enabled area, with a locator
// chunk already received (the node SID takes 2001:db8::1).
fn setup(config: InstanceCfg, circuit_type: CircuitType) -> Setup {
    let mut test = TestInstance::new(config);
    let area_id = test.area_add("area1", true);
    let circuit_id = test.circuit_add(area_id, "eth0", circuit_type);
    let adj_id = test.adj_add(
        area_id,
        circuit_id,
        2,
        &[ip6!("fe80::2"), ip6!("2001:db8:ff::2")],
    );
    test.chunk_rx("loc1", net6!("2001:db8::/64"));
    test.ibus_msgs();
    test.lsp_regen_msgs();

    Setup {
        test,
        area_id,
        circuit_id,
        adj_id,
    }
}

//
// Tests.
//

#[test]
fn test_p2p_add() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);

    let adj_sid = test.adj(area_id, adj_id).srv6_sid.clone().unwrap();
    assert_eq!(adj_sid.sid, ip6!("2001:db8::2"));
    assert_eq!(adj_sid.nexthop, ip6!("2001:db8:ff::2"));
    assert_eq!(adj_sid.nbr_system_id, None);

    let stlvs = &test.circuit(area_id, circuit_id).ext_stlvs;
    assert_eq!(stlvs.srv6_endx_sids.len(), 1);
    assert_eq!(stlvs.srv6_endx_sids[0].sid, ip6!("2001:db8::2"));
    assert_eq!(stlvs.srv6_endx_sids[0].behavior, Srv6Behavior::EndX);
    assert!(stlvs.srv6_lan_endx_sids.is_empty());

    let msgs = test.ibus_msgs();
    let adds = local_sid_adds(&msgs);
    assert_eq!(adds.len(), 1);
    assert_eq!(adds[0].sid, ip6!("2001:db8::2"));
    assert_eq!(adds[0].behavior, Srv6Behavior::EndX);
    assert_eq!(adds[0].af, AddressFamily::Ipv6);
    assert_eq!(adds[0].context.nexthop6, Some(ip6!("2001:db8:ff::2")));

    assert_eq!(test.lsp_regen_msgs().len(), 1);
}

#[test]
fn test_add_idempotent() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.adj_ip_enabled(area_id, adj_id);
    test.adj_ip_enabled(area_id, adj_id);

    let stlvs = &test.circuit(area_id, circuit_id).ext_stlvs;
    assert_eq!(stlvs.srv6_endx_sids.len(), 1);
    let msgs = test.ibus_msgs();
    assert_eq!(local_sid_adds(&msgs).len(), 1);
    assert_eq!(test.instance.state.sids.len(), 2);
}

#[test]
fn test_ip_enabled_requires_up() {
    let Setup {
        mut test,
        area_id,
        adj_id,
        ..
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Initializing);
    test.adj_ip_enabled(area_id, adj_id);
    assert_eq!(test.adj_sid(area_id, adj_id), None);
    assert!(test.ibus_msgs().is_empty());
}

#[test]
fn test_down_removes() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.ibus_msgs();
    test.lsp_regen_msgs();

    test.adj_state(area_id, adj_id, AdjacencyState::Down);
    assert_eq!(test.adj_sid(area_id, adj_id), None);
    assert!(test.circuit(area_id, circuit_id).ext_stlvs.is_empty());

    let msgs = test.ibus_msgs();
    let dels = local_sid_dels(&msgs);
    assert_eq!(dels.len(), 1);
    assert_eq!(dels[0].sid, ip6!("2001:db8::2"));
    assert_eq!(dels[0].behavior, Srv6Behavior::Unspec);
    assert_eq!(dels[0].context.nexthop6, None);
    assert_eq!(test.lsp_regen_msgs().len(), 1);

    // Repeated disable signals are no-ops.
    test.adj_ip_disabled(area_id, adj_id);
    test.adj_state(area_id, adj_id, AdjacencyState::Initializing);
    assert!(test.ibus_msgs().is_empty());
    assert!(test.lsp_regen_msgs().is_empty());
}

#[test]
fn test_ip_disabled_removes() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.ibus_msgs();

    test.adj_ip_disabled(area_id, adj_id);
    assert_eq!(test.adj_sid(area_id, adj_id), None);
    assert!(test.circuit(area_id, circuit_id).ext_stlvs.is_empty());
    let msgs = test.ibus_msgs();
    assert_eq!(local_sid_dels(&msgs).len(), 1);

    // Revoked SIDs are retained by default, so a new one is allocated.
    test.adj_ip_enabled(area_id, adj_id);
    assert_eq!(test.adj_sid(area_id, adj_id), Some(ip6!("2001:db8::3")));
    assert!(test.instance.state.sids.exists(&ip6!("2001:db8::2")));
}

#[test]
fn test_release_reclaim() {
    let config = InstanceCfg {
        sid_release: SidReleasePolicy::Reclaim,
        ..Default::default()
    };
    let Setup {
        mut test,
        area_id,
        adj_id,
        ..
    } = setup(config, CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    assert_eq!(test.adj_sid(area_id, adj_id), Some(ip6!("2001:db8::2")));

    test.adj_state(area_id, adj_id, AdjacencyState::Down);
    assert!(!test.instance.state.sids.exists(&ip6!("2001:db8::2")));

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    assert_eq!(test.adj_sid(area_id, adj_id), Some(ip6!("2001:db8::2")));
}

#[test]
fn test_lan_add_del() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(InstanceCfg::default(), CircuitType::Broadcast);
    let adj_id2 =
        test.adj_add(area_id, circuit_id, 3, &[ip6!("2001:db8:ff::3")]);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.adj_state(area_id, adj_id2, AdjacencyState::Up);

    let nbr2 = SystemId::from([0, 0, 0, 0, 0, 2]);
    let nbr3 = SystemId::from([0, 0, 0, 0, 0, 3]);
    let adj_sid = test.adj(area_id, adj_id).srv6_sid.clone().unwrap();
    assert_eq!(adj_sid.nbr_system_id, Some(nbr2));

    let stlvs = &test.circuit(area_id, circuit_id).ext_stlvs;
    assert!(stlvs.srv6_endx_sids.is_empty());
    assert_eq!(stlvs.srv6_lan_endx_sids.len(), 2);
    assert_eq!(stlvs.srv6_lan_endx_sids[0].nbr_system_id, nbr2);
    assert_eq!(stlvs.srv6_lan_endx_sids[0].sid, ip6!("2001:db8::2"));
    assert_eq!(stlvs.srv6_lan_endx_sids[1].nbr_system_id, nbr3);
    assert_eq!(stlvs.srv6_lan_endx_sids[1].sid, ip6!("2001:db8::3"));

    // Removing one neighbor leaves the other one's sub-TLV in place.
    test.adj_state(area_id, adj_id, AdjacencyState::Down);
    let stlvs = &test.circuit(area_id, circuit_id).ext_stlvs;
    assert_eq!(stlvs.srv6_lan_endx_sids.len(), 1);
    assert_eq!(stlvs.srv6_lan_endx_sids[0].nbr_system_id, nbr3);
    assert_eq!(test.adj_sid(area_id, adj_id2), Some(ip6!("2001:db8::3")));
}

#[test]
fn test_nexthop_link_local() {
    let mut test = TestInstance::new(InstanceCfg::default());
    let area_id = test.area_add("area1", true);
    let circuit_id =
        test.circuit_add(area_id, "eth0", CircuitType::PointToPoint);
    let adj_id = test.adj_add(area_id, circuit_id, 2, &[ip6!("fe80::2")]);
    test.chunk_rx("loc1", net6!("2001:db8::/64"));

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    let adj_sid = test.adj(area_id, adj_id).srv6_sid.clone().unwrap();
    assert_eq!(adj_sid.nexthop, ip6!("fe80::2"));
}

#[test]
fn test_missing_addr() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        ..
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);
    let adj_id = test.adj_add(area_id, circuit_id, 3, &[]);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.adj_ip_enabled(area_id, adj_id);
    assert_eq!(test.adj_sid(area_id, adj_id), None);
    assert!(test.ibus_msgs().is_empty());
    assert_eq!(test.instance.state.sids.len(), 1);
}

#[test]
fn test_ipv4_ignored() {
    let Setup {
        mut test,
        area_id,
        adj_id,
        ..
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.ibus_msgs();

    let msg = HookMsg::AdjIpDisabled {
        area_id,
        adj_id,
        af: AddressFamily::Ipv4,
    };
    test.hook(msg).unwrap();
    assert_eq!(test.adj_sid(area_id, adj_id), Some(ip6!("2001:db8::2")));
    assert!(test.ibus_msgs().is_empty());
}

#[test]
fn test_area_disabled() {
    let mut test = TestInstance::new(InstanceCfg::default());
    let area_id = test.area_add("area1", false);
    let circuit_id =
        test.circuit_add(area_id, "eth0", CircuitType::PointToPoint);
    let adj_id = test.adj_add(area_id, circuit_id, 2, &[ip6!("fe80::2")]);
    test.chunk_rx("loc1", net6!("2001:db8::/64"));

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.adj_ip_enabled(area_id, adj_id);
    assert_eq!(test.adj_sid(area_id, adj_id), None);
}

#[test]
fn test_no_chunk_retry() {
    let mut test = TestInstance::new(InstanceCfg::default());
    let area_id = test.area_add("area1", true);
    let circuit_id =
        test.circuit_add(area_id, "eth0", CircuitType::PointToPoint);
    let adj_id = test.adj_add(area_id, circuit_id, 2, &[ip6!("fe80::2")]);

    // No locator chunk yet: the allocation fails and the adjacency stays
    // without a SID.
    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    assert_eq!(test.adj_sid(area_id, adj_id), None);
    assert!(test.ibus_msgs().is_empty());

    // The chunk arrival unblocks it.
    test.chunk_rx("loc1", net6!("2001:db8::/64"));
    assert_eq!(test.adj_sid(area_id, adj_id), Some(ip6!("2001:db8::2")));

    let msgs = test.ibus_msgs();
    let adds = local_sid_adds(&msgs);
    assert_eq!(adds.len(), 2);
    assert_eq!(adds[0].behavior, Srv6Behavior::End);
    assert_eq!(adds[1].behavior, Srv6Behavior::EndX);
    assert!(!test.lsp_regen_msgs().is_empty());
}

#[test]
fn test_registry_exhausted() {
    let config = InstanceCfg {
        max_sids: 2,
        ..Default::default()
    };
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(config, CircuitType::Broadcast);
    let adj_id2 =
        test.adj_add(area_id, circuit_id, 3, &[ip6!("2001:db8:ff::3")]);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.adj_state(area_id, adj_id2, AdjacencyState::Up);
    assert_eq!(test.adj_sid(area_id, adj_id), Some(ip6!("2001:db8::2")));
    assert_eq!(test.adj_sid(area_id, adj_id2), None);

    let stlvs = &test.circuit(area_id, circuit_id).ext_stlvs;
    assert_eq!(stlvs.srv6_lan_endx_sids.len(), 1);
}

#[test]
fn test_unknown_circuit_fatal() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(InstanceCfg::default(), CircuitType::Loopback);

    let error = test
        .hook(HookMsg::AdjStateChange {
            area_id,
            adj_id,
            new_state: AdjacencyState::Up,
        })
        .unwrap_err();
    assert!(error.is_fatal());
    let Error::UnknownCircuitType(name, circuit_type) = &error else {
        panic!("unexpected error: {error}");
    };
    assert_eq!(name, "eth0");
    assert_eq!(*circuit_type, CircuitType::Loopback);

    // Nothing was allocated or programmed.
    assert_eq!(test.adj_sid(area_id, adj_id), None);
    assert!(test.circuit(area_id, circuit_id).ext_stlvs.is_empty());
    assert_eq!(test.instance.state.sids.len(), 1);
    assert!(test.ibus_msgs().is_empty());

    // The remove path is rejected too.
    let error = test
        .hook(HookMsg::AdjIpDisabled {
            area_id,
            adj_id,
            af: AddressFamily::Ipv6,
        })
        .unwrap_err();
    assert!(error.is_fatal());
}

#[test]
fn test_ip_disabled_chunk_rx() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.adj_ip_disabled(area_id, adj_id);
    assert!(!test.adj(area_id, adj_id).ipv6_enabled);
    test.ibus_msgs();

    // A chunk arrival doesn't rebind an adjacency whose IPv6 is disabled.
    test.chunk_rx("loc2", net6!("2001:db8:1::/64"));
    assert_eq!(test.adj_sid(area_id, adj_id), None);
    assert!(test.circuit(area_id, circuit_id).ext_stlvs.is_empty());
    let msgs = test.ibus_msgs();
    assert!(local_sid_adds(&msgs).is_empty());

    test.adj_ip_enabled(area_id, adj_id);
    assert_eq!(test.adj_sid(area_id, adj_id), Some(ip6!("2001:db8::3")));
}

#[test]
fn test_ip_disabled_restart() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.adj_ip_disabled(area_id, adj_id);
    test.ibus_msgs();

    test.instance.area_srv6_stop(area_id).unwrap();
    test.instance.area_srv6_start(area_id).unwrap();
    assert_eq!(test.adj_sid(area_id, adj_id), None);

    test.adj_state(area_id, adj_id, AdjacencyState::Down);
    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    assert_eq!(test.adj_sid(area_id, adj_id), None);

    assert!(test.circuit(area_id, circuit_id).ext_stlvs.is_empty());
    let msgs = test.ibus_msgs();
    assert!(local_sid_adds(&msgs).is_empty());
}

#[test]
fn test_adj_delete() {
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(InstanceCfg::default(), CircuitType::PointToPoint);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.ibus_msgs();
    test.lsp_regen_msgs();

    test.instance.adj_delete(area_id, adj_id).unwrap();
    let area = test.instance.areas.get_by_id(area_id).unwrap();
    assert!(area.adjacencies.get_by_id(adj_id).is_err());
    assert!(test.circuit(area_id, circuit_id).ext_stlvs.is_empty());
    let msgs = test.ibus_msgs();
    let dels = local_sid_dels(&msgs);
    assert_eq!(dels.len(), 1);
    assert_eq!(dels[0].sid, ip6!("2001:db8::2"));
    assert_eq!(test.lsp_regen_msgs().len(), 1);

    // A new adjacency over the same circuit gets its own SID.
    let adj_id2 =
        test.adj_add(area_id, circuit_id, 3, &[ip6!("2001:db8:ff::3")]);
    test.adj_state(area_id, adj_id2, AdjacencyState::Up);
    assert_eq!(test.adj_sid(area_id, adj_id2), Some(ip6!("2001:db8::3")));
    let stlvs = &test.circuit(area_id, circuit_id).ext_stlvs;
    assert_eq!(stlvs.srv6_endx_sids.len(), 1);
    assert_eq!(stlvs.srv6_endx_sids[0].sid, ip6!("2001:db8::3"));

    assert!(test.instance.adj_delete(area_id, adj_id).is_err());
}

#[test]
fn test_repeated_chunk_retry() {
    let config = InstanceCfg {
        max_sids: 2,
        sid_release: SidReleasePolicy::Reclaim,
        ..Default::default()
    };
    let Setup {
        mut test,
        area_id,
        circuit_id,
        adj_id,
    } = setup(config, CircuitType::Broadcast);
    let adj_id2 =
        test.adj_add(area_id, circuit_id, 3, &[ip6!("2001:db8:ff::3")]);

    test.adj_state(area_id, adj_id, AdjacencyState::Up);
    test.adj_state(area_id, adj_id2, AdjacencyState::Up);
    assert_eq!(test.adj_sid(area_id, adj_id2), None);

    // Freeing a SID alone doesn't retry the pending allocation.
    test.adj_state(area_id, adj_id, AdjacencyState::Down);
    assert_eq!(test.adj_sid(area_id, adj_id2), None);
    test.ibus_msgs();

    // The same chunk announced again does.
    test.chunk_rx("loc1", net6!("2001:db8::/64"));
    assert_eq!(test.instance.state.chunks.as_slice().len(), 1);
    assert_eq!(test.adj_sid(area_id, adj_id2), Some(ip6!("2001:db8::2")));
    let msgs = test.ibus_msgs();
    assert_eq!(local_sid_adds(&msgs).len(), 1);
}
