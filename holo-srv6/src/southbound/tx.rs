//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_utils::ibus::IbusChannelsTx;
use holo_utils::southbound::LocalSidMsg;

use crate::debug::Debug;
use crate::error::Error;

// ===== global functions =====

pub(crate) fn locator_chunk_request(
    ibus_tx: &IbusChannelsTx,
    locator: &str,
    request_id: u32,
) -> Result<(), Error> {
    ibus_tx.srv6_locator_chunk_request(locator.to_owned(), request_id)?;
    Ok(())
}

pub(crate) fn locator_chunk_release(
    ibus_tx: &IbusChannelsTx,
    locator: &str,
) -> Result<(), Error> {
    Debug::LocatorChunkRelease(locator).log();
    ibus_tx.srv6_locator_chunk_release(locator.to_owned())?;
    Ok(())
}

pub(crate) fn local_sid_install(
    ibus_tx: &IbusChannelsTx,
    msg: LocalSidMsg,
) -> Result<(), Error> {
    ibus_tx.srv6_local_sid_add(msg)?;
    Ok(())
}

pub(crate) fn local_sid_uninstall(
    ibus_tx: &IbusChannelsTx,
    msg: LocalSidMsg,
) -> Result<(), Error> {
    ibus_tx.srv6_local_sid_del(msg)?;
    Ok(())
}
