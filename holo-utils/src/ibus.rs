//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::southbound::{LocalSidMsg, LocatorChunkMsg};

// Useful type definition(s).
pub type IbusReceiver = UnboundedReceiver<IbusMsg>;
pub type IbusSender = UnboundedSender<IbusMsg>;
pub type IbusSendError = SendError<IbusMsg>;

/// Transmit channels for sending [`IbusMsg`] messages to the routing
/// component, which fronts the data-plane manager.
#[derive(Clone, Debug)]
pub struct IbusChannelsTx {
    routing: IbusSender,
}

/// Receive channels for receiving [`IbusMsg`] messages.
#[derive(Debug)]
pub struct IbusChannelsRx {
    pub routing: IbusReceiver,
}

/// Ibus message for communication among the different Holo components.
#[derive(Clone, Debug)]
#[derive(Deserialize, Serialize)]
pub enum IbusMsg {
    /// Request a locator chunk from the SRv6 manager.
    ///
    /// The chunk is delivered asynchronously through
    /// [`IbusMsg::Srv6LocatorChunkUpd`].
    Srv6LocatorChunkRequest {
        locator: String,
        request_id: u32,
    },
    /// Release a previously obtained locator chunk.
    Srv6LocatorChunkRelease { locator: String },
    /// Locator chunk notification.
    Srv6LocatorChunkUpd(LocatorChunkMsg),
    /// Request to program a local SID.
    Srv6LocalSidAdd(LocalSidMsg),
    /// Request to unprogram a local SID.
    Srv6LocalSidDel(LocalSidMsg),
    /// Cancel all previously requested locator chunks and local SIDs.
    Disconnect,
}

// ===== impl IbusChannelsTx =====

impl IbusChannelsTx {
    /// Sends an [`IbusMsg::Srv6LocatorChunkRequest`] message to
    /// `holo-routing`.
    pub fn srv6_locator_chunk_request(
        &self,
        locator: String,
        request_id: u32,
    ) -> Result<(), IbusSendError> {
        let msg = IbusMsg::Srv6LocatorChunkRequest {
            locator,
            request_id,
        };
        self.routing.send(msg)
    }

    /// Sends an [`IbusMsg::Srv6LocatorChunkRelease`] message to
    /// `holo-routing`.
    pub fn srv6_locator_chunk_release(
        &self,
        locator: String,
    ) -> Result<(), IbusSendError> {
        let msg = IbusMsg::Srv6LocatorChunkRelease { locator };
        self.routing.send(msg)
    }

    /// Sends an [`IbusMsg::Srv6LocalSidAdd`] message to `holo-routing`.
    pub fn srv6_local_sid_add(
        &self,
        msg: LocalSidMsg,
    ) -> Result<(), IbusSendError> {
        self.routing.send(IbusMsg::Srv6LocalSidAdd(msg))
    }

    /// Sends an [`IbusMsg::Srv6LocalSidDel`] message to `holo-routing`.
    pub fn srv6_local_sid_del(
        &self,
        msg: LocalSidMsg,
    ) -> Result<(), IbusSendError> {
        self.routing.send(IbusMsg::Srv6LocalSidDel(msg))
    }

    /// Sends an [`IbusMsg::Disconnect`] message to `holo-routing`.
    pub fn disconnect(&self) {
        let _ = self.routing.send(IbusMsg::Disconnect);
    }
}

// ===== global functions =====

/// Creates the Ibus communication channels used to reach the routing
/// component.
pub fn ibus_channels() -> (IbusChannelsTx, IbusChannelsRx) {
    let (routing_tx, routing_rx) = mpsc::unbounded_channel();
    let tx = IbusChannelsTx {
        routing: routing_tx,
    };
    let rx = IbusChannelsRx {
        routing: routing_rx,
    };
    (tx, rx)
}
