//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod adjacency;
pub mod area;
pub mod circuit;
pub mod collections;
pub mod debug;
pub mod error;
pub mod events;
pub mod hooks;
pub mod instance;
pub mod locator;
pub mod lsdb;
pub mod northbound;
pub mod packet;
pub mod sid;
pub mod southbound;
pub mod srv6;
