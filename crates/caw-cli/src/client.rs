//! Event dispatcher for the Caw platform.
//!
//! [`CawClient`] turns each Caw operation into a generic Faz event: the
//! operation's request schema is packed into the envelope payload, the
//! call runs under a fixed deadline, and the reply payload is unpacked as
//! the schema bound to that same operation. Failures are logged once and
//! surface as `false` or `None`.
//!
//! # Example
//!
//! ```rust,no_run
//! use caw_cli::client::CawClient;
//! use caw_cli::transport::FazConnection;
//!
//! # async fn example() -> Result<(), caw_cli::CliError> {
//! let connection = FazConnection::connect("ws://localhost:50000").await?;
//! let mut client = CawClient::new(connection);
//! client.hook_all().await;
//! client.register_user("alice").await;
//! client.into_inner().close().await?;
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use caw_proto::caw::{
    Caw, CawRequest, FollowRequest, ProfileReply, ProfileRequest, ReadRequest,
    RegisteruserRequest,
};
use caw_proto::event::{Follow, Post, Profile, Read, RegisterUser};
use caw_proto::{EventRequest, EventType, HookRequest, Operation, Payload, UnhookRequest};
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

use crate::error::CliError;
use crate::registry::OperationRegistry;
use crate::transport::FazService;

/// Default per-call deadline.
pub const DEFAULT_CALL_DEADLINE: Duration = Duration::from_secs(10);

/// Result of hooking or unhooking one registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutcome {
    /// Event type of the entry.
    pub event: EventType,
    /// Handler name of the entry.
    pub handler: &'static str,
    /// Failure reason, `None` on success.
    pub error: Option<String>,
}

impl HookOutcome {
    /// Returns true if the call succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Dispatches Caw operations through a [`FazService`].
#[derive(Debug)]
pub struct CawClient<S> {
    service: S,
    registry: OperationRegistry,
    deadline: Duration,
}

impl<S: FazService> CawClient<S> {
    /// Create a client with the default deadline.
    #[must_use]
    pub const fn new(service: S) -> Self {
        Self::with_deadline(service, DEFAULT_CALL_DEADLINE)
    }

    /// Create a client with a custom per-call deadline.
    #[must_use]
    pub const fn with_deadline(service: S, deadline: Duration) -> Self {
        Self {
            service,
            registry: OperationRegistry::new(),
            deadline,
        }
    }

    /// Per-call deadline.
    #[must_use]
    pub const fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Registry driving hook and unhook.
    #[must_use]
    pub const fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Give back the underlying service, e.g. to close it.
    pub fn into_inner(self) -> S {
        self.service
    }

    // ========================================================================
    // Hook lifecycle
    // ========================================================================

    /// Hook every registry entry, returning one outcome per entry.
    ///
    /// A failed entry does not stop the remaining ones.
    pub async fn hook_all_report(&mut self) -> Vec<HookOutcome> {
        let mut outcomes = Vec::with_capacity(self.registry.len());
        for &(event, handler) in self.registry.entries() {
            let request = HookRequest::new(event, handler);
            let result = within(self.deadline, "hook", self.service.hook(request)).await;
            match &result {
                Ok(_) => info!(%event, handler, "Hooked handler"),
                Err(e) => warn!(%event, handler, error = %e, "Failed to hook handler"),
            }
            outcomes.push(HookOutcome {
                event,
                handler,
                error: result.err().map(|e| e.to_string()),
            });
        }
        outcomes
    }

    /// Unhook every registry entry, returning one outcome per entry.
    ///
    /// A failed entry does not stop the remaining ones.
    pub async fn unhook_all_report(&mut self) -> Vec<HookOutcome> {
        let mut outcomes = Vec::with_capacity(self.registry.len());
        for &(event, handler) in self.registry.entries() {
            let request = UnhookRequest::new(event);
            let result = within(self.deadline, "unhook", self.service.unhook(request)).await;
            match &result {
                Ok(_) => info!(%event, handler, "Unhooked handler"),
                Err(e) => warn!(%event, handler, error = %e, "Failed to unhook handler"),
            }
            outcomes.push(HookOutcome {
                event,
                handler,
                error: result.err().map(|e| e.to_string()),
            });
        }
        outcomes
    }

    /// Hook every registry entry. True only if all of them succeeded.
    pub async fn hook_all(&mut self) -> bool {
        self.hook_all_report().await.iter().all(HookOutcome::is_ok)
    }

    /// Unhook every registry entry. True only if all of them succeeded.
    pub async fn unhook_all(&mut self) -> bool {
        self.unhook_all_report().await.iter().all(HookOutcome::is_ok)
    }

    // ========================================================================
    // Generic dispatch
    // ========================================================================

    /// Send one operation through the event envelope.
    ///
    /// Returns `Ok(None)` when the reply carries no payload.
    ///
    /// # Errors
    ///
    /// - [`CliError::Encode`] if the request cannot be packed; nothing is sent.
    /// - [`CliError::Timeout`] if the deadline elapses.
    /// - Any transport or remote error from the service.
    /// - [`CliError::Decode`] if the reply payload is not `O::Reply`.
    pub async fn invoke<O: Operation>(
        &mut self,
        request: &O::Request,
    ) -> Result<Option<O::Reply>, CliError> {
        let payload = request.pack().map_err(CliError::Encode)?;
        let envelope = EventRequest::new(O::EVENT, payload);

        trace!(event = %O::EVENT, "Sending event");
        let reply = within(self.deadline, O::EVENT, self.service.event(envelope)).await?;

        let Some(payload) = reply.payload else {
            debug!(event = %O::EVENT, "Reply carried no payload");
            return Ok(None);
        };
        <O::Reply as Payload>::unpack(&payload)
            .map(Some)
            .map_err(CliError::Decode)
    }

    /// Invoke an acknowledgment-only operation.
    async fn acknowledge<O: Operation>(&mut self, request: &O::Request) -> bool {
        match self.invoke::<O>(request).await {
            Ok(_) => true,
            Err(e) => {
                report(O::EVENT, &e);
                false
            }
        }
    }

    /// Invoke an operation whose reply must carry a payload.
    async fn fetch<O: Operation>(&mut self, request: &O::Request) -> Option<O::Reply> {
        match self.invoke::<O>(request).await {
            Ok(Some(reply)) => Some(reply),
            Ok(None) => {
                warn!(event = %O::EVENT, "Reply carried no payload");
                None
            }
            Err(e) => {
                report(O::EVENT, &e);
                None
            }
        }
    }

    // ========================================================================
    // Caw operations
    // ========================================================================

    /// Register `username`. Returns true on success.
    pub async fn register_user(&mut self, username: &str) -> bool {
        let request = RegisteruserRequest {
            username: username.to_owned(),
        };
        let ok = self.acknowledge::<RegisterUser>(&request).await;
        if ok {
            info!(username, "Registered user");
        }
        ok
    }

    /// Make `username` follow `to_follow`. Returns true on success.
    pub async fn follow(&mut self, username: &str, to_follow: &str) -> bool {
        let request = FollowRequest {
            username: username.to_owned(),
            to_follow: to_follow.to_owned(),
        };
        let ok = self.acknowledge::<Follow>(&request).await;
        if ok {
            info!(username, to_follow, "Followed user");
        }
        ok
    }

    /// Fetch the following and follower lists of `username`.
    pub async fn profile(&mut self, username: &str) -> Option<ProfileReply> {
        let request = ProfileRequest {
            username: username.to_owned(),
        };
        self.fetch::<Profile>(&request).await
    }

    /// Post a caw as `username`. An empty `parent_id` posts a top-level caw.
    ///
    /// Returns the caw as stored by the service.
    pub async fn caw(&mut self, username: &str, text: &str, parent_id: &str) -> Option<Caw> {
        let request = CawRequest::new(username, text, parent_id);
        let reply = self.fetch::<Post>(&request).await?;
        if reply.caw.is_none() {
            warn!(event = %EventType::Post, "Reply carried no caw");
        }
        reply.caw
    }

    /// Read the thread rooted at `caw_id`, in service order.
    pub async fn read(&mut self, caw_id: &str) -> Option<Vec<Caw>> {
        let request = ReadRequest {
            caw_id: caw_id.as_bytes().to_vec(),
        };
        self.fetch::<Read>(&request).await.map(|reply| reply.caws)
    }
}

/// Run `call` under `deadline`.
async fn within<T, F>(deadline: Duration, what: impl Display, call: F) -> Result<T, CliError>
where
    F: Future<Output = Result<T, CliError>>,
{
    timeout(deadline, call)
        .await
        .map_err(|_| CliError::Timeout(format!("{what} exceeded {}ms", deadline.as_millis())))?
}

fn report(event: EventType, err: &CliError) {
    warn!(%event, error = %err, "Event failed");
}
