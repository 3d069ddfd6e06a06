//! Scripted Faz service for tests.

use std::collections::{HashMap, VecDeque};

use caw_proto::{
    Any, EventReply, EventRequest, EventType, HookReply, HookRequest, UnhookReply, UnhookRequest,
};

use crate::error::CliError;
use crate::transport::FazService;

/// Scripted answer for one event call.
pub(crate) enum Script {
    Reply(Option<Any>),
    Fail(CliError),
    Hang,
}

/// Records every call. Events are answered from the script queue first,
/// then from the fixed per-event replies.
#[derive(Default)]
pub(crate) struct FakeFaz {
    pub replies: HashMap<i32, Any>,
    pub scripts: VecDeque<Script>,
    pub failing: Vec<i32>,
    pub hooked: Vec<(i32, String)>,
    pub unhooked: Vec<i32>,
    pub events: Vec<EventRequest>,
}

impl FakeFaz {
    pub fn replying(script: Script) -> Self {
        Self::default().then(script)
    }

    pub fn then(mut self, script: Script) -> Self {
        self.scripts.push_back(script);
        self
    }

    pub fn with_reply(mut self, event: EventType, payload: Any) -> Self {
        self.replies.insert(event.as_i32(), payload);
        self
    }

    /// Fail every hook, unhook and event call for `event`.
    pub fn failing(mut self, event: EventType) -> Self {
        self.failing.push(event.as_i32());
        self
    }

    fn check(&self, event_type: i32) -> Result<(), CliError> {
        if self.failing.contains(&event_type) {
            return Err(CliError::Remote {
                code: 14,
                message: "unavailable".into(),
            });
        }
        Ok(())
    }
}

impl FazService for FakeFaz {
    async fn hook(&mut self, request: HookRequest) -> Result<HookReply, CliError> {
        self.hooked.push((request.event_type, request.event_function));
        self.check(request.event_type)?;
        Ok(HookReply {})
    }

    async fn unhook(&mut self, request: UnhookRequest) -> Result<UnhookReply, CliError> {
        self.unhooked.push(request.event_type);
        self.check(request.event_type)?;
        Ok(UnhookReply {})
    }

    async fn event(&mut self, request: EventRequest) -> Result<EventReply, CliError> {
        let event_type = request.event_type;
        self.events.push(request);
        self.check(event_type)?;
        match self.scripts.pop_front() {
            Some(Script::Reply(payload)) => Ok(EventReply { payload }),
            Some(Script::Fail(err)) => Err(err),
            Some(Script::Hang) => std::future::pending().await,
            None => Ok(EventReply {
                payload: self.replies.get(&event_type).cloned(),
            }),
        }
    }
}
