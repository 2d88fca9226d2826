//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, HashMap};

use generational_arena::Index;

use crate::adjacency::Adjacency;
use crate::area::Area;
use crate::circuit::{Circuit, CircuitType};
use crate::error::Error;
use crate::northbound::configuration::AreaCfg;
use crate::packet::SystemId;

pub type ObjectId = u32;

pub type AreaId = ObjectId;
pub type AreaIndex = Index;
pub type CircuitId = ObjectId;
pub type CircuitIndex = Index;
pub type AdjacencyId = ObjectId;
pub type AdjacencyIndex = Index;

#[derive(Debug)]
pub struct Arena<T>(generational_arena::Arena<T>);

#[derive(Debug, Default)]
pub struct Areas {
    arena: Arena<Area>,
    id_tree: HashMap<AreaId, AreaIndex>,
    name_tree: BTreeMap<String, AreaIndex>,
    next_id: AreaId,
}

#[derive(Debug, Default)]
pub struct Circuits {
    arena: Arena<Circuit>,
    id_tree: HashMap<CircuitId, CircuitIndex>,
    name_tree: BTreeMap<String, CircuitIndex>,
    next_id: CircuitId,
}

#[derive(Debug, Default)]
pub struct Adjacencies {
    arena: Arena<Adjacency>,
    id_tree: BTreeMap<AdjacencyId, AdjacencyIndex>,
    next_id: AdjacencyId,
}

// ===== impl Arena =====

impl<T> Default for Arena<T> {
    fn default() -> Arena<T> {
        Arena(Default::default())
    }
}

impl<T> std::ops::Index<Index> for Arena<T> {
    type Output = T;

    fn index(&self, index: Index) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> std::ops::IndexMut<Index> for Arena<T> {
    fn index_mut(&mut self, index: Index) -> &mut Self::Output {
        &mut self.0[index]
    }
}

// ===== impl Areas =====

impl Areas {
    pub(crate) fn insert(
        &mut self,
        name: &str,
        config: AreaCfg,
    ) -> Result<&mut Area, Error> {
        if self.name_tree.contains_key(name) {
            return Err(Error::AreaNameExists(name.to_owned()));
        }

        // Create and insert area into the arena.
        self.next_id += 1;
        let id = self.next_id;
        let area_idx = self
            .arena
            .0
            .insert_with(|index| Area::new(index, id, name.to_owned(), config));

        // Link area to different collections.
        let area = &mut self.arena[area_idx];
        self.id_tree.insert(area.id, area_idx);
        self.name_tree.insert(area.name.clone(), area_idx);

        Ok(area)
    }

    pub(crate) fn delete(&mut self, area_idx: AreaIndex) -> Option<Area> {
        let area = &self.arena[area_idx];

        // Unlink area from different collections.
        self.id_tree.remove(&area.id);
        self.name_tree.remove(&area.name);

        // Remove area from the arena.
        self.arena.0.remove(area_idx)
    }

    // Returns a reference to the area corresponding to the given ID.
    pub fn get_by_id(&self, id: AreaId) -> Result<&Area, Error> {
        self.id_tree
            .get(&id)
            .copied()
            .map(|area_idx| &self.arena[area_idx])
            .filter(|area| area.id == id)
            .ok_or(Error::AreaIdNotFound(id))
    }

    // Returns a mutable reference to the area corresponding to the given ID.
    pub fn get_mut_by_id(&mut self, id: AreaId) -> Result<&mut Area, Error> {
        self.id_tree
            .get(&id)
            .copied()
            .map(move |area_idx| &mut self.arena[area_idx])
            .filter(|area| area.id == id)
            .ok_or(Error::AreaIdNotFound(id))
    }

    // Returns an iterator visiting all areas.
    //
    // Areas are ordered by their names.
    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.name_tree
            .values()
            .map(|area_idx| &self.arena[*area_idx])
    }

    // Returns an iterator visiting all areas with mutable references.
    //
    // Order of iteration is not defined.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Area> {
        self.arena.0.iter_mut().map(|(_, area)| area)
    }

    // Returns an iterator over all area indexes.
    //
    // Areas are ordered by their names.
    pub(crate) fn indexes(&self) -> impl Iterator<Item = AreaIndex> + '_ {
        self.name_tree.values().copied()
    }
}

impl std::ops::Index<AreaIndex> for Areas {
    type Output = Area;

    fn index(&self, index: AreaIndex) -> &Self::Output {
        &self.arena[index]
    }
}

impl std::ops::IndexMut<AreaIndex> for Areas {
    fn index_mut(&mut self, index: AreaIndex) -> &mut Self::Output {
        &mut self.arena[index]
    }
}

// ===== impl Circuits =====

impl Circuits {
    pub fn insert(
        &mut self,
        name: &str,
        circuit_type: CircuitType,
    ) -> Result<&mut Circuit, Error> {
        if self.name_tree.contains_key(name) {
            return Err(Error::CircuitNameExists(name.to_owned()));
        }

        // Create and insert circuit into the arena.
        self.next_id += 1;
        let id = self.next_id;
        let circuit_idx = self.arena.0.insert_with(|index| {
            Circuit::new(index, id, name.to_owned(), circuit_type)
        });

        // Link circuit to different collections.
        let circuit = &mut self.arena[circuit_idx];
        self.id_tree.insert(circuit.id, circuit_idx);
        self.name_tree.insert(circuit.name.clone(), circuit_idx);

        Ok(circuit)
    }

    // Returns a reference to the circuit corresponding to the given ID.
    pub fn get_by_id(&self, id: CircuitId) -> Result<&Circuit, Error> {
        self.id_tree
            .get(&id)
            .copied()
            .map(|circuit_idx| &self.arena[circuit_idx])
            .filter(|circuit| circuit.id == id)
            .ok_or(Error::CircuitIdNotFound(id))
    }

    // Returns a mutable reference to the circuit corresponding to the given
    // ID.
    pub fn get_mut_by_id(
        &mut self,
        id: CircuitId,
    ) -> Result<&mut Circuit, Error> {
        self.id_tree
            .get(&id)
            .copied()
            .map(move |circuit_idx| &mut self.arena[circuit_idx])
            .filter(|circuit| circuit.id == id)
            .ok_or(Error::CircuitIdNotFound(id))
    }

    // Returns an iterator visiting all circuits.
    //
    // Circuits are ordered by their names.
    pub fn iter(&self) -> impl Iterator<Item = &Circuit> {
        self.name_tree
            .values()
            .map(|circuit_idx| &self.arena[*circuit_idx])
    }
}

impl std::ops::Index<CircuitIndex> for Circuits {
    type Output = Circuit;

    fn index(&self, index: CircuitIndex) -> &Self::Output {
        &self.arena[index]
    }
}

impl std::ops::IndexMut<CircuitIndex> for Circuits {
    fn index_mut(&mut self, index: CircuitIndex) -> &mut Self::Output {
        &mut self.arena[index]
    }
}

// ===== impl Adjacencies =====

impl Adjacencies {
    pub fn insert(
        &mut self,
        circuit_id: CircuitId,
        system_id: SystemId,
    ) -> &mut Adjacency {
        // Create and insert adjacency into the arena.
        self.next_id += 1;
        let adj = Adjacency::new(self.next_id, circuit_id, system_id);
        let adj_idx = self.arena.0.insert(adj);

        // Link adjacency to different collections.
        let adj = &mut self.arena[adj_idx];
        self.id_tree.insert(adj.id, adj_idx);

        adj
    }

    pub(crate) fn delete(
        &mut self,
        adj_id: AdjacencyId,
    ) -> Result<Adjacency, Error> {
        let adj_idx = self
            .id_tree
            .remove(&adj_id)
            .ok_or(Error::AdjacencyIdNotFound(adj_id))?;
        self.arena
            .0
            .remove(adj_idx)
            .ok_or(Error::AdjacencyIdNotFound(adj_id))
    }

    // Returns a reference to the adjacency corresponding to the given ID.
    pub fn get_by_id(&self, id: AdjacencyId) -> Result<&Adjacency, Error> {
        self.id_tree
            .get(&id)
            .copied()
            .map(|adj_idx| &self.arena[adj_idx])
            .filter(|adj| adj.id == id)
            .ok_or(Error::AdjacencyIdNotFound(id))
    }

    // Returns a mutable reference to the adjacency corresponding to the given
    // ID.
    pub fn get_mut_by_id(
        &mut self,
        id: AdjacencyId,
    ) -> Result<&mut Adjacency, Error> {
        self.id_tree
            .get(&id)
            .copied()
            .map(move |adj_idx| &mut self.arena[adj_idx])
            .filter(|adj| adj.id == id)
            .ok_or(Error::AdjacencyIdNotFound(id))
    }

    // Returns an iterator visiting all adjacencies.
    //
    // Adjacencies are ordered by their IDs.
    pub fn iter(&self) -> impl Iterator<Item = &Adjacency> {
        self.id_tree.values().map(|adj_idx| &self.arena[*adj_idx])
    }

    // Returns the IDs of all adjacencies, in ascending order.
    pub(crate) fn ids(&self) -> Vec<AdjacencyId> {
        self.id_tree.keys().copied().collect()
    }
}
