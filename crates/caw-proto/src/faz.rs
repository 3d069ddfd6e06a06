//! Faz service records: hook registration, the generic event envelope,
//! and the call frame that carries them over a connection.

use prost::Message;
use prost_types::Any;

use crate::error::ProtoError;
use crate::event::EventType;

/// Binds an event type to a named handler on the Faz side.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct HookRequest {
    /// Event type wire value.
    #[prost(int32, tag = "1")]
    pub event_type: i32,
    /// Handler name known to the service.
    #[prost(string, tag = "2")]
    pub event_function: String,
}

impl HookRequest {
    /// Build a hook request.
    #[must_use]
    pub fn new(event: EventType, handler: impl Into<String>) -> Self {
        Self {
            event_type: event.as_i32(),
            event_function: handler.into(),
        }
    }
}

/// Acknowledges a hook.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct HookReply {}

/// Removes the handler bound to an event type.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct UnhookRequest {
    /// Event type wire value.
    #[prost(int32, tag = "1")]
    pub event_type: i32,
}

impl UnhookRequest {
    /// Build an unhook request.
    #[must_use]
    pub const fn new(event: EventType) -> Self {
        Self {
            event_type: event.as_i32(),
        }
    }
}

/// Acknowledges an unhook.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct UnhookReply {}

/// Generic event envelope: an event type plus a self-describing payload.
#[derive(Clone, PartialEq, Message)]
pub struct EventRequest {
    /// Event type wire value.
    #[prost(int32, tag = "1")]
    pub event_type: i32,
    /// Packed operation request.
    #[prost(message, optional, tag = "2")]
    pub payload: Option<Any>,
}

impl EventRequest {
    /// Build an envelope carrying `payload`.
    #[must_use]
    pub const fn new(event: EventType, payload: Any) -> Self {
        Self {
            event_type: event.as_i32(),
            payload: Some(payload),
        }
    }
}

/// Generic reply envelope.
#[derive(Clone, PartialEq, Message)]
pub struct EventReply {
    /// Packed operation reply, absent for acknowledgment-only handlers.
    #[prost(message, optional, tag = "1")]
    pub payload: Option<Any>,
}

/// Current call frame version.
pub const WIRE_VERSION: u32 = 1;

/// Status value of a successful call.
pub const STATUS_OK: i32 = 0;

/// Method discriminators for [`FazFrame::method`].
pub mod methods {
    /// `hook(HookRequest) -> HookReply`.
    pub const HOOK: u32 = 1;
    /// `unhook(UnhookRequest) -> UnhookReply`.
    pub const UNHOOK: u32 = 2;
    /// `event(EventRequest) -> EventReply`.
    pub const EVENT: u32 = 3;
}

/// One call or one reply on a Faz connection.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct FazFrame {
    /// Method discriminator, see [`methods`].
    #[prost(uint32, tag = "1")]
    pub method: u32,
    /// Correlates a reply with its call.
    #[prost(uint64, tag = "2")]
    pub call_id: u64,
    /// Encoded request or reply record.
    #[prost(bytes = "vec", tag = "3")]
    pub body: Vec<u8>,
    /// RPC status code of a reply, [`STATUS_OK`] on success.
    #[prost(int32, tag = "4")]
    pub status: i32,
    /// Error detail of a failed reply.
    #[prost(string, tag = "5")]
    pub message: String,
    /// Frame version.
    #[prost(uint32, tag = "6")]
    pub version: u32,
}

impl FazFrame {
    /// Frame a call.
    #[must_use]
    pub fn call<M: Message>(method: u32, call_id: u64, request: &M) -> Self {
        Self {
            method,
            call_id,
            body: request.encode_to_vec(),
            status: STATUS_OK,
            message: String::new(),
            version: WIRE_VERSION,
        }
    }

    /// Frame a successful reply to `call`.
    #[must_use]
    pub fn reply<M: Message>(call: &Self, reply: &M) -> Self {
        Self {
            method: call.method,
            call_id: call.call_id,
            body: reply.encode_to_vec(),
            status: STATUS_OK,
            message: String::new(),
            version: WIRE_VERSION,
        }
    }

    /// Frame a failed reply to `call`.
    #[must_use]
    pub fn failure(call: &Self, status: i32, message: impl Into<String>) -> Self {
        Self {
            method: call.method,
            call_id: call.call_id,
            body: Vec::new(),
            status,
            message: message.into(),
            version: WIRE_VERSION,
        }
    }

    /// Returns true if this reply reports success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Encode for the wire.
    #[must_use]
    pub fn encode_wire(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Decode from the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a frame or the frame version
    /// is newer than [`WIRE_VERSION`].
    pub fn decode_wire(bytes: &[u8]) -> Result<Self, ProtoError> {
        let frame = Self::decode(bytes)?;
        if frame.version > WIRE_VERSION {
            return Err(ProtoError::UnsupportedVersion {
                found: frame.version,
                supported: WIRE_VERSION,
            });
        }
        Ok(frame)
    }

    /// Decode the body as `M`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a valid `M`.
    pub fn body_as<M: Message + Default>(&self) -> Result<M, ProtoError> {
        Ok(M::decode(self.body.as_slice())?)
    }
}
