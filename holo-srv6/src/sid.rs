//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv6Addr;

use holo_utils::ip::Ipv6AddrExt;

use crate::error::SidAllocError;
use crate::locator::LocatorChunk;

// Default capacity of the SID registry.
pub const SRV6_MAX_SIDS: usize = 16;

// Range of function values tried when auto-assigning SIDs.
pub const FUNCTION_AUTO_RANGE: std::ops::RangeInclusive<u16> = 1..=254;

// Process-wide table of allocated SRv6 SIDs.
//
// Free slots hold the unspecified address. Non-free slots are unique.
#[derive(Debug)]
pub struct SidRegistry {
    entries: Vec<Ipv6Addr>,
}

// ===== impl SidRegistry =====

impl SidRegistry {
    pub fn new(capacity: usize) -> SidRegistry {
        SidRegistry {
            entries: vec![Ipv6Addr::UNSPECIFIED; capacity],
        }
    }

    // Returns whether the given SID is registered.
    pub fn exists(&self, sid: &Ipv6Addr) -> bool {
        !sid.is_unspecified() && self.entries.contains(sid)
    }

    // Inserts the given SID into the first free slot.
    //
    // Returns whether the SID is registered once the call returns: `false`
    // means the table is full or the SID is the unspecified address.
    pub fn register(&mut self, sid: Ipv6Addr) -> bool {
        if sid.is_unspecified() {
            return false;
        }
        if self.exists(&sid) {
            return true;
        }
        match self.entries.iter_mut().find(|entry| entry.is_unspecified()) {
            Some(entry) => {
                *entry = sid;
                true
            }
            None => false,
        }
    }

    // Frees the slot holding the given SID. Returns whether the SID was
    // registered.
    pub fn release(&mut self, sid: &Ipv6Addr) -> bool {
        if sid.is_unspecified() {
            return false;
        }
        match self.entries.iter_mut().find(|entry| *entry == sid) {
            Some(entry) => {
                *entry = Ipv6Addr::UNSPECIFIED;
                true
            }
            None => false,
        }
    }

    // Allocates a new SID out of the given locator chunks and registers it.
    //
    // A non-zero `index` requests that specific function value from the
    // first chunk, failing if it's already taken. A zero `index` picks the
    // lowest free function value, trying each chunk in arrival order.
    pub fn allocate(
        &mut self,
        chunks: &[LocatorChunk],
        index: u16,
    ) -> Result<Ipv6Addr, SidAllocError> {
        let Some(first) = chunks.first() else {
            return Err(SidAllocError::NoLocatorChunks);
        };

        let sid = if index != 0 {
            let sid = first
                .sid(index)
                .ok_or(SidAllocError::InvalidIndex(index))?;
            if self.exists(&sid) {
                return Err(SidAllocError::IndexCollision(index));
            }
            sid
        } else {
            chunks
                .iter()
                .find_map(|chunk| {
                    FUNCTION_AUTO_RANGE
                        .clone()
                        .filter_map(|function| chunk.sid(function))
                        .find(|sid| !self.exists(sid))
                })
                .ok_or(SidAllocError::Exhausted)?
        };

        // Candidate selection and registration happen under the same
        // exclusive borrow.
        if !self.register(sid) {
            return Err(SidAllocError::Exhausted);
        }

        Ok(sid)
    }

    // Returns an iterator visiting all registered SIDs, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Ipv6Addr> {
        self.entries.iter().filter(|entry| !entry.is_unspecified())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}

impl Default for SidRegistry {
    fn default() -> SidRegistry {
        SidRegistry::new(SRV6_MAX_SIDS)
    }
}

// ===== global functions =====

// Builds the SID identified by the given function value within a locator
// prefix, packing the function into the two low-order bytes.
pub(crate) fn sid_from_prefix(prefix: &Ipv6Addr, function: u16) -> Ipv6Addr {
    prefix.with_low_u16(function)
}
