//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::adjacency::AdjacencyState;
use crate::collections::{
    Adjacencies, AdjacencyId, AreaId, AreaIndex, Circuits,
};
use crate::debug::Debug;
use crate::error::Error;
use crate::instance::InstanceView;
use crate::locator::{Locator, Locators};
use crate::northbound::configuration::AreaCfg;
use crate::{lsdb, srv6};

#[derive(Debug)]
pub struct Area {
    pub index: AreaIndex,
    pub id: AreaId,
    pub name: String,
    pub config: AreaCfg,
    pub srv6: AreaSrv6,
    pub circuits: Circuits,
    pub adjacencies: Adjacencies,
}

#[derive(Debug, Default)]
pub struct AreaSrv6 {
    pub enabled: bool,
    pub locators: Locators,
}

// ===== impl Area =====

impl Area {
    pub(crate) fn new(
        index: AreaIndex,
        id: AreaId,
        name: String,
        config: AreaCfg,
    ) -> Area {
        Debug::AreaCreate(&name).log();

        Area {
            index,
            id,
            name,
            config,
            srv6: Default::default(),
            circuits: Default::default(),
            adjacencies: Default::default(),
        }
    }

    // Resets the SRv6 state of the area, seeding the enabled flag from the
    // configuration.
    pub(crate) fn srv6_init(&mut self) {
        self.srv6 = AreaSrv6 {
            enabled: self.config.srv6.enabled,
            locators: Default::default(),
        };
    }

    // Tears down the SRv6 state of the area, stopping SRv6 first if it's
    // still enabled.
    pub(crate) fn srv6_term(
        &mut self,
        instance: &mut InstanceView<'_>,
    ) -> Result<(), Error> {
        if self.srv6.enabled {
            self.srv6_stop(instance)?;
        }
        self.srv6.locators.clear();
        Ok(())
    }

    // Binds a SID to every eligible adjacency, then marks SRv6 as enabled.
    pub(crate) fn srv6_start(
        &mut self,
        instance: &mut InstanceView<'_>,
    ) -> Result<(), Error> {
        Debug::AreaSrv6Start(&self.name).log();

        self.adj_sids_add(instance)?;
        self.srv6.enabled = true;

        let delay = instance.config.lsp_regen_delay();
        lsdb::schedule_regeneration(instance.tx, self, delay);
        Ok(())
    }

    // Revokes the SIDs of all adjacencies, then marks SRv6 as disabled.
    pub(crate) fn srv6_stop(
        &mut self,
        instance: &mut InstanceView<'_>,
    ) -> Result<(), Error> {
        Debug::AreaSrv6Stop(&self.name).log();

        for adj_id in self.adjacencies.ids() {
            let result = self.adj_sid_del(instance, adj_id);
            log_unless_fatal(result)?;
        }
        self.srv6.enabled = false;

        let delay = instance.config.lsp_regen_delay();
        lsdb::schedule_regeneration(instance.tx, self, delay);
        Ok(())
    }

    // Starts or stops SRv6 according to the area configuration.
    pub(crate) fn srv6_update(
        &mut self,
        instance: &mut InstanceView<'_>,
    ) -> Result<(), Error> {
        match (self.config.srv6.enabled, self.srv6.enabled) {
            (true, false) => self.srv6_start(instance),
            (false, true) => self.srv6_stop(instance),
            _ => Ok(()),
        }
    }

    // Re-runs the add path over all eligible adjacencies, provided SRv6 is
    // enabled.
    pub(crate) fn srv6_resync(
        &mut self,
        instance: &mut InstanceView<'_>,
    ) -> Result<(), Error> {
        if !self.srv6.enabled {
            return Ok(());
        }

        let sid_count = self.adj_sid_count();
        self.adj_sids_add(instance)?;
        if self.adj_sid_count() != sid_count {
            let delay = instance.config.lsp_regen_delay();
            lsdb::schedule_regeneration(instance.tx, self, delay);
        }
        Ok(())
    }

    pub fn locator_lookup(&self, name: &str) -> Option<&Locator> {
        self.srv6.locators.get(name)
    }

    pub(crate) fn adj_sid_add(
        &mut self,
        instance: &mut InstanceView<'_>,
        adj_id: AdjacencyId,
    ) -> Result<(), Error> {
        let adj = self.adjacencies.get_mut_by_id(adj_id)?;
        let circuit = self.circuits.get_mut_by_id(adj.circuit_id)?;
        srv6::adj_sid_add(instance, &mut self.srv6.locators, circuit, adj)
    }

    pub(crate) fn adj_sid_del(
        &mut self,
        instance: &mut InstanceView<'_>,
        adj_id: AdjacencyId,
    ) -> Result<(), Error> {
        let adj = self.adjacencies.get_mut_by_id(adj_id)?;
        let circuit = self.circuits.get_mut_by_id(adj.circuit_id)?;
        srv6::adj_sid_del(instance, &mut self.srv6.locators, circuit, adj)
    }

    // Runs the remove path for the adjacency before deleting it, so that its
    // SID doesn't outlive it.
    pub(crate) fn adj_delete(
        &mut self,
        instance: &mut InstanceView<'_>,
        adj_id: AdjacencyId,
    ) -> Result<(), Error> {
        let had_sid = self.adjacencies.get_by_id(adj_id)?.srv6_sid.is_some();
        let result = self.adj_sid_del(instance, adj_id);
        log_unless_fatal(result)?;
        self.adjacencies.delete(adj_id)?;

        if had_sid {
            let delay = instance.config.lsp_regen_delay();
            lsdb::schedule_regeneration(instance.tx, self, delay);
        }
        Ok(())
    }

    fn adj_sid_count(&self) -> usize {
        self.adjacencies
            .iter()
            .filter(|adj| adj.srv6_sid.is_some())
            .count()
    }

    fn adj_sids_add(
        &mut self,
        instance: &mut InstanceView<'_>,
    ) -> Result<(), Error> {
        let adj_ids = self
            .adjacencies
            .iter()
            .filter(|adj| adj.state == AdjacencyState::Up)
            .filter(|adj| adj.is_ipv6_enabled())
            .map(|adj| adj.id)
            .collect::<Vec<_>>();
        for adj_id in adj_ids {
            let result = self.adj_sid_add(instance, adj_id);
            log_unless_fatal(result)?;
        }
        Ok(())
    }
}

impl Drop for Area {
    fn drop(&mut self) {
        Debug::AreaDelete(&self.name).log();
    }
}

// ===== helper functions =====

// Bulk operations carry on past non-fatal errors.
fn log_unless_fatal(result: Result<(), Error>) -> Result<(), Error> {
    match result {
        Err(error) if !error.is_fatal() => {
            error.log();
            Ok(())
        }
        result => result,
    }
}
