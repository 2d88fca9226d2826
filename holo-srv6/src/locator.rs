//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv6Addr;

use holo_utils::ip::Ipv6NetworkExt;
use holo_utils::srv6::Srv6Function;
use ipnetwork::Ipv6Network;
use serde::{Deserialize, Serialize};

use crate::sid;

// Maximum length of a locator name, in bytes.
pub const LOCATOR_NAME_MAX_LEN: usize = 255;

// Width of the function field packed into the low-order bytes of a SID.
pub const FUNCTION_BITS_MAX: u8 = 16;

// Block of address space delegated by the data-plane manager for SID
// allocation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LocatorChunk {
    pub locator: String,
    pub prefix: Ipv6Network,
}

// Locator chunks received so far, in arrival order.
#[derive(Debug, Default)]
pub struct LocatorChunks {
    chunks: Vec<LocatorChunk>,
    // Outstanding chunk requests, keyed by locator name.
    requests: BTreeMap<String, u32>,
    next_request_id: u32,
}

// Named collection of SRv6 functions associated with an area.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Locator {
    pub name: String,
    pub prefix: Option<Ipv6Network>,
    pub function_bits_length: u8,
    pub functions: Vec<Srv6Function>,
}

// Set of locators of an area.
#[derive(Debug, Default)]
pub struct Locators(Vec<Locator>);

// ===== impl LocatorChunk =====

impl LocatorChunk {
    pub fn new(locator: &str, prefix: Ipv6Network) -> LocatorChunk {
        LocatorChunk {
            locator: locator_name_truncate(locator).to_owned(),
            prefix: prefix.apply_mask(),
        }
    }

    // Returns the SID for the given function value, provided it falls within
    // the chunk prefix.
    pub fn sid(&self, function: u16) -> Option<Ipv6Addr> {
        let sid = sid::sid_from_prefix(&self.prefix.network(), function);
        self.prefix.contains(sid).then_some(sid)
    }
}

// ===== impl LocatorChunks =====

impl LocatorChunks {
    // Appends a chunk to the list. Returns `false` if an identical chunk was
    // already known.
    pub(crate) fn push(&mut self, chunk: LocatorChunk) -> bool {
        self.requests.remove(&chunk.locator);
        if self.chunks.contains(&chunk) {
            return false;
        }
        self.chunks.push(chunk);
        true
    }

    // Records a new chunk request for the given locator and returns its ID.
    pub(crate) fn request_add(&mut self, locator: &str) -> u32 {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.requests
            .insert(locator_name_truncate(locator).to_owned(), request_id);
        request_id
    }

    // Returns the ID of the outstanding chunk request for the given locator.
    pub fn request_pending(&self, locator: &str) -> Option<u32> {
        self.requests.get(locator_name_truncate(locator)).copied()
    }

    // Returns the first chunk of the given locator.
    pub fn get_by_locator(&self, locator: &str) -> Option<&LocatorChunk> {
        let locator = locator_name_truncate(locator);
        self.chunks.iter().find(|chunk| chunk.locator == locator)
    }

    // Returns the chunk the given SID was carved out of.
    pub fn get_by_sid(&self, sid: &Ipv6Addr) -> Option<&LocatorChunk> {
        self.chunks.iter().find(|chunk| chunk.prefix.contains(*sid))
    }

    // Returns the names of all locators with at least one chunk.
    pub(crate) fn locator_names(&self) -> BTreeSet<String> {
        self.chunks
            .iter()
            .map(|chunk| chunk.locator.clone())
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.chunks.clear();
        self.requests.clear();
    }

    pub fn as_slice(&self) -> &[LocatorChunk] {
        &self.chunks
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocatorChunk> {
        self.chunks.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

// ===== impl Locator =====

impl Locator {
    // Creates a new locator with an empty function list. Overlong names are
    // truncated.
    pub fn new(name: &str) -> Locator {
        Locator {
            name: locator_name_truncate(name).to_owned(),
            prefix: None,
            function_bits_length: 0,
            functions: Default::default(),
        }
    }

    // Binds the locator to the prefix delegated by the data-plane manager.
    //
    // Returns whether the locator changed.
    pub(crate) fn prefix_bind(&mut self, prefix: Ipv6Network) -> bool {
        let function_bits_length = prefix.host_bits().min(FUNCTION_BITS_MAX);
        if self.prefix == Some(prefix)
            && self.function_bits_length == function_bits_length
        {
            return false;
        }
        self.prefix = Some(prefix);
        self.function_bits_length = function_bits_length;
        true
    }

    pub(crate) fn function_add(&mut self, function: Srv6Function) {
        if !self.functions.contains(&function) {
            self.functions.push(function);
        }
    }

    pub(crate) fn function_del(&mut self, sid: &Ipv6Addr) {
        self.functions.retain(|function| function.sid != *sid);
    }
}

// ===== impl Locators =====

impl Locators {
    // Inserts a locator into the set, replacing any locator with the same
    // name.
    pub(crate) fn insert(&mut self, locator: Locator) {
        match self.0.iter_mut().find(|l| l.name == locator.name) {
            Some(existing) => *existing = locator,
            None => self.0.push(locator),
        }
    }

    // Looks up a locator by its name.
    pub fn get(&self, name: &str) -> Option<&Locator> {
        let name = locator_name_truncate(name);
        self.0.iter().find(|locator| locator.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Locator> {
        let name = locator_name_truncate(name);
        self.0.iter_mut().find(|locator| locator.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locator> {
        self.0.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Locator> {
        self.0.iter_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ===== global functions =====

// Truncates a locator name to at most `LOCATOR_NAME_MAX_LEN` bytes, on a
// character boundary.
pub fn locator_name_truncate(name: &str) -> &str {
    if name.len() <= LOCATOR_NAME_MAX_LEN {
        return name;
    }
    let mut end = LOCATOR_NAME_MAX_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
