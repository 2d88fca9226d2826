//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use const_addrs::{ip6, net6};
use holo_srv6::locator::{
    LOCATOR_NAME_MAX_LEN, Locator, LocatorChunk, locator_name_truncate,
};

#[test]
fn test_name_truncate() {
    assert_eq!(locator_name_truncate("loc1"), "loc1");

    let name = "x".repeat(LOCATOR_NAME_MAX_LEN + 45);
    assert_eq!(locator_name_truncate(&name).len(), LOCATOR_NAME_MAX_LEN);

    // Never cut a character in half.
    let name = "é".repeat(200);
    let truncated = locator_name_truncate(&name);
    assert_eq!(truncated.len(), LOCATOR_NAME_MAX_LEN - 1);
    assert!(truncated.chars().all(|c| c == 'é'));
}

#[test]
fn test_locator_new() {
    let locator = Locator::new("loc1");
    assert_eq!(locator.name, "loc1");
    assert_eq!(locator.prefix, None);
    assert_eq!(locator.function_bits_length, 0);
    assert!(locator.functions.is_empty());

    let name = "y".repeat(LOCATOR_NAME_MAX_LEN * 2);
    let locator = Locator::new(&name);
    assert_eq!(locator.name.len(), LOCATOR_NAME_MAX_LEN);
}

#[test]
fn test_chunk_new() {
    let chunk = LocatorChunk::new("loc1", net6!("2001:db8::1234/64"));
    assert_eq!(chunk.prefix, net6!("2001:db8::/64"));
    assert_eq!(chunk.locator, "loc1");
}

#[test]
fn test_chunk_sid() {
    let chunk = LocatorChunk::new("loc1", net6!("2001:db8:0:1::/64"));
    assert_eq!(chunk.sid(1), Some(ip6!("2001:db8:0:1::1")));
    assert_eq!(chunk.sid(0x1ff), Some(ip6!("2001:db8:0:1::1ff")));

    let chunk = LocatorChunk::new("loc1", net6!("2001:db8::/120"));
    assert_eq!(chunk.sid(0xff), Some(ip6!("2001:db8::ff")));
    assert_eq!(chunk.sid(0x100), None);
}
