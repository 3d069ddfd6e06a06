//! Request and reply schemas for the Caw operations.
//!
//! Each schema is a prost message in the `caw` package. The Faz service
//! never looks inside them; they travel packed in the event envelope's
//! payload slot and are identified by their type URL.

use prost::{Message, Name};

/// Protobuf package shared by all Caw schemas.
pub const PACKAGE: &str = "caw";

macro_rules! caw_name {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Name for $ty {
                const NAME: &'static str = stringify!($ty);
                const PACKAGE: &'static str = PACKAGE;
            }
        )+
    };
}

/// Time a caw was posted.
#[derive(Clone, Copy, PartialEq, Eq, Message)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch.
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    /// Microseconds since the Unix epoch.
    #[prost(int64, tag = "2")]
    pub useconds: i64,
}

impl Timestamp {
    /// Build a timestamp from microseconds since the Unix epoch.
    #[must_use]
    pub const fn from_micros(useconds: i64) -> Self {
        Self {
            seconds: useconds / 1_000_000,
            useconds,
        }
    }
}

/// A single post on the platform.
#[derive(Clone, PartialEq, Message)]
pub struct Caw {
    /// Author.
    #[prost(string, tag = "1")]
    pub username: String,
    /// Body text.
    #[prost(string, tag = "2")]
    pub text: String,
    /// Identifier assigned by the service.
    #[prost(bytes = "vec", tag = "3")]
    pub id: Vec<u8>,
    /// Caw this one replies to. `None` means a top-level caw.
    #[prost(bytes = "vec", optional, tag = "4")]
    pub parent_id: Option<Vec<u8>>,
    /// Posting time.
    #[prost(message, optional, tag = "5")]
    pub timestamp: Option<Timestamp>,
}

impl Caw {
    /// Returns true when this caw is a reply.
    #[must_use]
    pub const fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Registers a new user.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct RegisteruserRequest {
    /// Name to register.
    #[prost(string, tag = "1")]
    pub username: String,
}

/// Acknowledges a registration.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct RegisteruserReply {}

/// Makes `username` follow `to_follow`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct FollowRequest {
    /// Acting user.
    #[prost(string, tag = "1")]
    pub username: String,
    /// User to follow.
    #[prost(string, tag = "2")]
    pub to_follow: String,
}

/// Acknowledges a follow.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct FollowReply {}

/// Asks for a user's following and follower lists.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct ProfileRequest {
    /// User whose profile is requested.
    #[prost(string, tag = "1")]
    pub username: String,
}

/// A user's following and follower lists, in service order.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct ProfileReply {
    /// Users this user follows.
    #[prost(string, repeated, tag = "1")]
    pub following: Vec<String>,
    /// Users following this user.
    #[prost(string, repeated, tag = "2")]
    pub followers: Vec<String>,
}

/// Posts a new caw, optionally as a reply.
#[derive(Clone, PartialEq, Message)]
pub struct CawRequest {
    /// Acting user.
    #[prost(string, tag = "1")]
    pub username: String,
    /// Body text.
    #[prost(string, tag = "2")]
    pub text: String,
    /// Caw being replied to, if any.
    #[prost(bytes = "vec", optional, tag = "3")]
    pub parent_id: Option<Vec<u8>>,
}

impl CawRequest {
    /// Build a request, treating an empty parent as "no parent".
    #[must_use]
    pub fn new(username: impl Into<String>, text: impl Into<String>, parent_id: &str) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
            parent_id: (!parent_id.is_empty()).then(|| parent_id.as_bytes().to_vec()),
        }
    }
}

/// The caw that was posted.
#[derive(Clone, PartialEq, Message)]
pub struct CawReply {
    /// Posted caw.
    #[prost(message, optional, tag = "1")]
    pub caw: Option<Caw>,
}

/// Reads the thread rooted at `caw_id`.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct ReadRequest {
    /// Root of the thread.
    #[prost(bytes = "vec", tag = "1")]
    pub caw_id: Vec<u8>,
}

/// Caws of a thread in the order the service returned them.
#[derive(Clone, PartialEq, Message)]
pub struct ReadReply {
    /// Thread contents.
    #[prost(message, repeated, tag = "1")]
    pub caws: Vec<Caw>,
}

caw_name!(
    Timestamp,
    Caw,
    RegisteruserRequest,
    RegisteruserReply,
    FollowRequest,
    FollowReply,
    ProfileRequest,
    ProfileReply,
    CawRequest,
    CawReply,
    ReadRequest,
    ReadReply,
);
