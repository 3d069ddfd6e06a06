//! Self-describing payloads.
//!
//! A [`Payload`] packs into a [`prost_types::Any`] whose type URL names the
//! schema, and unpacks only when that URL names the schema the caller
//! expects. The envelope never needs to know concrete schema types.

use prost::{Message, Name};
use prost_types::Any;

use crate::error::ProtoError;

/// Prefix used for type URLs written by this crate.
pub const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

/// Largest encoded payload accepted for sending.
pub const MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Encode to opaque bytes with a type tag, and decode them back expecting a tag.
pub trait Payload: Message + Name + Default + Sized {
    /// Type URL carried by packed instances of this schema.
    fn payload_type_url() -> String {
        format!("{TYPE_URL_PREFIX}{}", Self::full_name())
    }

    /// Pack into an [`Any`].
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::Encoding`] if the encoded message exceeds
    /// [`MAX_PAYLOAD_BYTES`].
    fn pack(&self) -> Result<Any, ProtoError> {
        let len = self.encoded_len();
        if len > MAX_PAYLOAD_BYTES {
            return Err(ProtoError::Encoding(format!(
                "{} is {len} bytes, limit is {MAX_PAYLOAD_BYTES}",
                Self::full_name()
            )));
        }
        let mut value = Vec::with_capacity(len);
        self.encode(&mut value)?;
        Ok(Any {
            type_url: Self::payload_type_url(),
            value,
        })
    }

    /// Unpack from an [`Any`], verifying its type tag first.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::TypeMismatch`] if the tag names another schema
    /// and [`ProtoError::Decoding`] if the bytes are corrupt.
    fn unpack(any: &Any) -> Result<Self, ProtoError> {
        let expected = Self::full_name();
        if type_name(&any.type_url) != Some(expected.as_str()) {
            return Err(ProtoError::TypeMismatch {
                expected,
                actual: any.type_url.clone(),
            });
        }
        Ok(Self::decode(any.value.as_slice())?)
    }
}

impl<T> Payload for T where T: Message + Name + Default {}

/// Full schema name of a type URL: everything after the last `/`.
///
/// A URL without a `/` is malformed and has no name.
#[must_use]
pub fn type_name(type_url: &str) -> Option<&str> {
    type_url.rsplit_once('/').map(|(_, name)| name)
}
