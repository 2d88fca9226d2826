//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv6Addr;

use holo_utils::ibus::{IbusChannelsTx, IbusMsg};
use holo_utils::srv6::{Srv6Behavior, Srv6Function};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug_span;

use crate::collections::{AdjacencyId, AreaId, Areas};
use crate::debug::Debug;
use crate::error::Error;
use crate::hooks::{HookMsg, Hooks};
use crate::locator::{Locator, LocatorChunks};
use crate::lsdb::LspRegenMsg;
use crate::northbound::configuration::{AreaCfg, InstanceCfg};
use crate::northbound::state;
use crate::sid::SidRegistry;
use crate::{events, lsdb, southbound, srv6};

// Top-level SRv6 context.
#[derive(Debug)]
pub struct Instance {
    // Instance name.
    pub name: String,
    // Instance configuration data.
    pub config: InstanceCfg,
    // Instance state data.
    pub state: InstanceState,
    // Instance areas.
    pub areas: Areas,
    // Instance Tx channels.
    pub tx: InstanceChannelsTx,
    // Protocol engine hooks currently registered.
    pub hooks: Hooks,
}

#[derive(Debug)]
pub struct InstanceState {
    // Allocated SIDs.
    pub sids: SidRegistry,
    // Locator chunks delegated by the SRv6 manager.
    pub chunks: LocatorChunks,
    // Address of the most recently received locator chunk.
    pub locator_addr: Option<Ipv6Addr>,
    // Node End SID.
    pub node_segment: Option<NodeSegment>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeSegment {
    pub sid: Ipv6Addr,
}

#[derive(Clone, Debug)]
pub struct InstanceChannelsTx {
    // Channels to the SRv6 manager.
    pub ibus: IbusChannelsTx,
    // LSP regeneration requests to the protocol engine.
    pub lsp_regen: UnboundedSender<LspRegenMsg>,
}

pub struct InstanceView<'a> {
    pub config: &'a InstanceCfg,
    pub state: &'a mut InstanceState,
    pub tx: &'a InstanceChannelsTx,
}

// ===== impl Instance =====

impl Instance {
    pub fn new(
        name: &str,
        config: InstanceCfg,
        tx: InstanceChannelsTx,
    ) -> Instance {
        let state = InstanceState::new(&config);
        Instance {
            name: name.to_owned(),
            config,
            state,
            areas: Default::default(),
            tx,
            hooks: Hooks::empty(),
        }
    }

    // Registers the adjacency hooks and requests a chunk for each
    // configured locator.
    pub fn init(&mut self) -> Result<(), Error> {
        let span = debug_span!("srv6-instance", name = %self.name);
        let _span_guard = span.enter();
        Debug::InstanceInit.log();

        let hooks = Hooks::all();
        Debug::HooksRegister(hooks).log();
        self.hooks = hooks;

        let locators = self.config.locators.clone();
        for locator in locators {
            self.get_locator_chunk(&locator)?;
        }

        Ok(())
    }

    // Tears down every area, gives the locator chunks back to the SRv6
    // manager and unregisters the adjacency hooks.
    pub fn term(&mut self) -> Result<(), Error> {
        let span = debug_span!("srv6-instance", name = %self.name);
        let _span_guard = span.enter();
        Debug::InstanceTerm.log();

        let (mut instance, areas) = self.as_view();
        for area in areas.iter_mut() {
            area.srv6_term(&mut instance)?;
        }

        if let Err(error) = srv6::node_segment_unset(&mut instance, areas) {
            error.log();
        }

        for locator in instance.state.chunks.locator_names() {
            if let Err(error) = southbound::tx::locator_chunk_release(
                &instance.tx.ibus,
                &locator,
            ) {
                error.log();
            }
        }
        instance.state.chunks.clear();
        instance.state.locator_addr = None;
        instance.tx.ibus.disconnect();

        Debug::HooksUnregister(self.hooks).log();
        self.hooks = Hooks::empty();

        Ok(())
    }

    // Creates a new area and initializes its SRv6 state.
    pub fn area_create(
        &mut self,
        name: &str,
        config: AreaCfg,
    ) -> Result<AreaId, Error> {
        let area = self.areas.insert(name, config)?;
        area.srv6_init();
        Ok(area.id)
    }

    // Tears down the SRv6 state of an area and deletes it.
    pub fn area_delete(&mut self, area_id: AreaId) -> Result<(), Error> {
        let (mut instance, areas) = self.as_view();
        let area = areas.get_mut_by_id(area_id)?;
        let area_idx = area.index;
        area.srv6_term(&mut instance)?;
        areas.delete(area_idx);
        Ok(())
    }

    // Revokes the SID of an adjacency and deletes it.
    pub fn adj_delete(
        &mut self,
        area_id: AreaId,
        adj_id: AdjacencyId,
    ) -> Result<(), Error> {
        let (mut instance, areas) = self.as_view();
        let area = areas.get_mut_by_id(area_id)?;
        area.adj_delete(&mut instance, adj_id)
    }

    // Enables SRv6 in the given area.
    pub fn area_srv6_start(&mut self, area_id: AreaId) -> Result<(), Error> {
        let (mut instance, areas) = self.as_view();
        let area = areas.get_mut_by_id(area_id)?;
        area.srv6_start(&mut instance)
    }

    // Disables SRv6 in the given area.
    pub fn area_srv6_stop(&mut self, area_id: AreaId) -> Result<(), Error> {
        let (mut instance, areas) = self.as_view();
        let area = areas.get_mut_by_id(area_id)?;
        area.srv6_stop(&mut instance)
    }

    // Starts or stops SRv6 in the given area according to its configuration.
    pub fn area_srv6_update(&mut self, area_id: AreaId) -> Result<(), Error> {
        let (mut instance, areas) = self.as_view();
        let area = areas.get_mut_by_id(area_id)?;
        area.srv6_update(&mut instance)
    }

    // Adds a locator to the given area.
    //
    // If the SRv6 manager already delegated a chunk for this locator, the
    // locator takes its prefix and the area LSPs are regenerated.
    pub fn locator_add(
        &mut self,
        area_id: AreaId,
        mut locator: Locator,
    ) -> Result<(), Error> {
        let (instance, areas) = self.as_view();
        let area = areas.get_mut_by_id(area_id)?;
        Debug::LocatorAdd(&area.name, &locator).log();

        let bound = match instance.state.chunks.get_by_locator(&locator.name) {
            Some(chunk) => {
                locator.prefix_bind(chunk.prefix);
                true
            }
            None => false,
        };
        if bound {
            // Track the SIDs already carved out of this locator's chunks.
            let functions = instance
                .state
                .node_segment
                .map(|node_segment| node_segment.function())
                .into_iter()
                .chain(area.adjacencies.iter().filter_map(|adj| {
                    adj.srv6_sid.as_ref().map(|adj_sid| adj_sid.function())
                }));
            for function in functions {
                let owner = instance.state.chunks.get_by_sid(&function.sid);
                if owner.is_some_and(|chunk| chunk.locator == locator.name) {
                    locator.function_add(function);
                }
            }
        }
        area.srv6.locators.insert(locator);

        if bound {
            let delay = instance.config.lsp_regen_delay();
            lsdb::schedule_regeneration(instance.tx, area, delay);
        }

        Ok(())
    }

    // Looks up a locator of the given area by its name.
    pub fn locator_lookup(
        &self,
        area_id: AreaId,
        name: &str,
    ) -> Option<&Locator> {
        self.areas
            .get_by_id(area_id)
            .ok()
            .and_then(|area| area.locator_lookup(name))
    }

    // Requests a chunk of the given locator from the SRv6 manager. The
    // chunk arrives later as an `IbusMsg::Srv6LocatorChunkUpd` message.
    pub fn get_locator_chunk(&mut self, locator: &str) -> Result<u32, Error> {
        let request_id = self.state.chunks.request_add(locator);
        Debug::LocatorChunkRequest(locator, request_id).log();
        southbound::tx::locator_chunk_request(
            &self.tx.ibus,
            locator,
            request_id,
        )?;
        Ok(request_id)
    }

    // Processes a notification from the protocol engine.
    //
    // Only fatal errors are returned. Other errors are logged.
    pub fn process_hook_msg(&mut self, msg: HookMsg) -> Result<(), Error> {
        let span = debug_span!("srv6-instance", name = %self.name);
        let _span_guard = span.enter();

        if !self.hooks.contains(msg.hook()) {
            Debug::HookIgnored(&msg).log();
            return Ok(());
        }
        Debug::HookRx(&msg).log();

        let (mut instance, areas) = self.as_view();
        let result = match msg {
            HookMsg::AdjStateChange {
                area_id,
                adj_id,
                new_state,
            } => areas.get_mut_by_id(area_id).and_then(|area| {
                events::process_adj_state_change(
                    &mut instance,
                    area,
                    adj_id,
                    new_state,
                )
            }),
            HookMsg::AdjIpEnabled {
                area_id,
                adj_id,
                af,
            } => areas.get_mut_by_id(area_id).and_then(|area| {
                events::process_adj_ip_enabled(&mut instance, area, adj_id, af)
            }),
            HookMsg::AdjIpDisabled {
                area_id,
                adj_id,
                af,
            } => areas.get_mut_by_id(area_id).and_then(|area| {
                events::process_adj_ip_disabled(
                    &mut instance,
                    area,
                    adj_id,
                    af,
                )
            }),
        };
        log_unless_fatal(result)
    }

    // Processes a message from the SRv6 manager.
    //
    // Only fatal errors are returned. Other errors are logged.
    pub fn process_ibus_msg(&mut self, msg: IbusMsg) -> Result<(), Error> {
        let span = debug_span!("srv6-instance", name = %self.name);
        let _span_guard = span.enter();
        Debug::IbusRx(&msg).log();

        let result = match msg {
            IbusMsg::Srv6LocatorChunkUpd(msg) => {
                southbound::rx::process_locator_chunk(self, msg)
            }
            // Ignore other events.
            _ => Ok(()),
        };
        log_unless_fatal(result)
    }

    // Returns the operational state of the instance.
    pub fn state(&self) -> state::InstanceState {
        state::InstanceState::new(self)
    }

    // Returns the operational state of the instance rendered as JSON.
    pub fn state_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.state())
    }

    // Splits the instance into a view of its shared state and its areas.
    pub(crate) fn as_view(&mut self) -> (InstanceView<'_>, &mut Areas) {
        let instance = InstanceView {
            config: &self.config,
            state: &mut self.state,
            tx: &self.tx,
        };
        (instance, &mut self.areas)
    }
}

// ===== impl InstanceState =====

impl InstanceState {
    fn new(config: &InstanceCfg) -> InstanceState {
        InstanceState {
            sids: SidRegistry::new(config.max_sids),
            chunks: Default::default(),
            locator_addr: None,
            node_segment: None,
        }
    }
}

// ===== impl NodeSegment =====

impl NodeSegment {
    pub(crate) fn function(&self) -> Srv6Function {
        Srv6Function::new(self.sid, Srv6Behavior::End)
    }
}

// ===== helper functions =====

// Logs non-fatal errors and swallows them. Fatal errors are logged and
// returned to the caller.
fn log_unless_fatal(result: Result<(), Error>) -> Result<(), Error> {
    match result {
        Err(error) if error.is_fatal() => {
            error.log();
            Err(error)
        }
        Err(error) => {
            error.log();
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}
