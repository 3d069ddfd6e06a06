//! Operation identifiers and their schema bindings.

use std::fmt;

use prost::Name;

use crate::caw::{
    CawReply, CawRequest, FollowReply, FollowRequest, ProfileReply, ProfileRequest, ReadReply,
    ReadRequest, RegisteruserReply, RegisteruserRequest,
};
use crate::error::ProtoError;
use crate::payload::Payload;

/// Event types the Caw platform dispatches through Faz.
///
/// The numeric values are part of the wire contract: the same value is
/// used when hooking a handler and when sending an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum EventType {
    /// Register a user.
    RegisterUser = 0,
    /// Follow another user.
    Follow = 1,
    /// Fetch following and follower lists.
    Profile = 2,
    /// Post a caw.
    Post = 3,
    /// Read a caw thread.
    Read = 4,
}

impl EventType {
    /// Every event type, in wire order.
    pub const ALL: [Self; 5] = [
        Self::RegisterUser,
        Self::Follow,
        Self::Profile,
        Self::Post,
        Self::Read,
    ];

    /// Wire value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Full name of the request schema bound to this event type.
    #[must_use]
    pub fn request_schema(self) -> String {
        match self {
            Self::RegisterUser => request_schema::<RegisterUser>(),
            Self::Follow => request_schema::<Follow>(),
            Self::Profile => request_schema::<Profile>(),
            Self::Post => request_schema::<Post>(),
            Self::Read => request_schema::<Read>(),
        }
    }

    /// Full name of the reply schema bound to this event type.
    #[must_use]
    pub fn reply_schema(self) -> String {
        match self {
            Self::RegisterUser => reply_schema::<RegisterUser>(),
            Self::Follow => reply_schema::<Follow>(),
            Self::Profile => reply_schema::<Profile>(),
            Self::Post => reply_schema::<Post>(),
            Self::Read => reply_schema::<Read>(),
        }
    }
}

fn request_schema<O: Operation>() -> String {
    <O::Request as Name>::full_name()
}

fn reply_schema<O: Operation>() -> String {
    <O::Reply as Name>::full_name()
}

impl TryFrom<i32> for EventType {
    type Error = ProtoError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_i32() == value)
            .ok_or(ProtoError::UnknownEventType(value))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RegisterUser => "register_user",
            Self::Follow => "follow",
            Self::Profile => "profile",
            Self::Post => "post",
            Self::Read => "read",
        };
        f.write_str(name)
    }
}

/// Binds an event type to its request and reply schemas at compile time.
pub trait Operation {
    /// Event type sent in the envelope.
    const EVENT: EventType;
    /// Schema packed into the request payload.
    type Request: Payload;
    /// Schema expected in the reply payload.
    type Reply: Payload;
}

/// Register a user.
#[derive(Debug, Clone, Copy)]
pub struct RegisterUser;

/// Follow another user.
#[derive(Debug, Clone, Copy)]
pub struct Follow;

/// Fetch a profile.
#[derive(Debug, Clone, Copy)]
pub struct Profile;

/// Post a caw.
#[derive(Debug, Clone, Copy)]
pub struct Post;

/// Read a thread.
#[derive(Debug, Clone, Copy)]
pub struct Read;

impl Operation for RegisterUser {
    const EVENT: EventType = EventType::RegisterUser;
    type Request = RegisteruserRequest;
    type Reply = RegisteruserReply;
}

impl Operation for Follow {
    const EVENT: EventType = EventType::Follow;
    type Request = FollowRequest;
    type Reply = FollowReply;
}

impl Operation for Profile {
    const EVENT: EventType = EventType::Profile;
    type Request = ProfileRequest;
    type Reply = ProfileReply;
}

impl Operation for Post {
    const EVENT: EventType = EventType::Post;
    type Request = CawRequest;
    type Reply = CawReply;
}

impl Operation for Read {
    const EVENT: EventType = EventType::Read;
    type Request = ReadRequest;
    type Reply = ReadReply;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, EventType::RegisterUser)]
    #[test_case(1, EventType::Follow)]
    #[test_case(2, EventType::Profile)]
    #[test_case(3, EventType::Post)]
    #[test_case(4, EventType::Read)]
    fn wire_values_are_stable(value: i32, event: EventType) {
        assert_eq!(event.as_i32(), value);
        assert_eq!(EventType::try_from(value), Ok(event));
    }

    #[test]
    fn unknown_value_is_rejected() {
        assert_eq!(EventType::try_from(5), Err(ProtoError::UnknownEventType(5)));
        assert_eq!(EventType::try_from(-1), Err(ProtoError::UnknownEventType(-1)));
    }

    #[test]
    fn every_event_has_distinct_schemas() {
        let mut requests: Vec<String> = EventType::ALL.iter().map(|e| e.request_schema()).collect();
        requests.sort();
        requests.dedup();
        assert_eq!(requests.len(), EventType::ALL.len());
    }

    #[test]
    fn marker_events_match_identifiers() {
        assert_eq!(RegisterUser::EVENT, EventType::RegisterUser);
        assert_eq!(Follow::EVENT, EventType::Follow);
        assert_eq!(Profile::EVENT, EventType::Profile);
        assert_eq!(Post::EVENT, EventType::Post);
        assert_eq!(Read::EVENT, EventType::Read);
    }

    #[test]
    fn post_binds_caw_schemas() {
        assert_eq!(EventType::Post.request_schema(), "caw.CawRequest");
        assert_eq!(EventType::Post.reply_schema(), "caw.CawReply");
    }
}
