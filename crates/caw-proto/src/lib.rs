//! # caw-proto
//!
//! Wire records for driving the Caw platform through the Faz event service.
//!
//! - [`faz`]: hook/unhook records, the generic event envelope and the call frame.
//! - [`caw`]: per-operation request and reply schemas.
//! - [`payload`]: packing schemas into a tagged [`prost_types::Any`] and back.
//! - [`event`]: operation identifiers and their compile-time schema binding.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod caw;
pub mod error;
pub mod event;
pub mod faz;
pub mod payload;

pub use error::ProtoError;
pub use event::{EventType, Operation};
pub use faz::{EventReply, EventRequest, FazFrame, HookReply, HookRequest, UnhookReply, UnhookRequest};
pub use payload::Payload;
pub use prost_types::Any;
