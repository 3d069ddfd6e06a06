//! Posting and reading caws.

use std::io::Write;

use crate::client::CawClient;
use crate::error::CliError;
use crate::output::{CawView, OutputFormat, ThreadView};
use crate::transport::FazService;

/// Post command executor.
#[derive(Debug, Clone)]
pub struct PostCommand {
    user: String,
    text: String,
    reply_to: Option<String>,
}

impl PostCommand {
    /// Create a post command acting as `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is empty.
    pub fn new(
        user: impl Into<String>,
        text: impl Into<String>,
        reply_to: Option<String>,
    ) -> Result<Self, CliError> {
        let text = text.into();
        if text.is_empty() {
            let what = if reply_to.is_some() { "a reply" } else { "a caw" };
            return Err(CliError::InvalidArgument(format!(
                "you need to give the content to post {what}"
            )));
        }
        Ok(Self {
            user: user.into(),
            text,
            reply_to,
        })
    }

    /// Execute the post command.
    ///
    /// # Errors
    ///
    /// Returns an error if posting fails or output fails.
    pub async fn execute<S: FazService, W: Write>(
        &self,
        client: &mut CawClient<S>,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        let parent = self.reply_to.as_deref().unwrap_or_default();
        let caw = client
            .caw(&self.user, &self.text, parent)
            .await
            .ok_or_else(|| CliError::Command("failed to post the caw".into()))?;
        format.write(writer, &CawView::from(&caw))
    }
}

/// Read command executor.
#[derive(Debug, Clone)]
pub struct ReadCommand {
    caw_id: String,
}

impl ReadCommand {
    /// Create a read command for the thread rooted at `caw_id`.
    #[must_use]
    pub fn new(caw_id: impl Into<String>) -> Self {
        Self {
            caw_id: caw_id.into(),
        }
    }

    /// Execute the read command.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be read or output fails.
    pub async fn execute<S: FazService, W: Write>(
        &self,
        client: &mut CawClient<S>,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        let caws = client
            .read(&self.caw_id)
            .await
            .ok_or_else(|| CliError::Command(format!("failed to read caw {}", self.caw_id)))?;
        format.write(writer, &ThreadView::new(self.caw_id.as_str(), &caws))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use crate::commands::fake::FakeFaz;
    use caw_proto::caw::{Caw, CawReply, CawRequest, ReadReply, Timestamp};
    use caw_proto::{EventType, Payload};

    fn caw(id: &str, parent: Option<&str>) -> Caw {
        Caw {
            username: "alice".into(),
            text: format!("caw {id}"),
            id: id.as_bytes().to_vec(),
            parent_id: parent.map(|p| p.as_bytes().to_vec()),
            timestamp: Some(Timestamp::from_micros(1_700_000_000_000_000)),
        }
    }

    #[test]
    fn empty_reply_text_rejected() {
        let err = PostCommand::new("alice", "", Some("p1".into())).unwrap_err();
        assert!(err.to_string().contains("post a reply"));
    }

    #[tokio::test]
    async fn post_prints_stored_caw() {
        let reply = CawReply {
            caw: Some(caw("p2", Some("p1"))),
        };
        let faz = FakeFaz::default().with_reply(EventType::Post, reply.pack().expect("pack"));
        let mut client = CawClient::new(faz);
        let mut buf = Vec::new();

        PostCommand::new("alice", "caw p2", Some("p1".into()))
            .expect("valid")
            .execute(&mut client, &mut buf, &OutputFormat::default())
            .await
            .expect("should execute");

        let output = String::from_utf8(buf).expect("utf8");
        assert!(output.contains("Caw p2 by alice"));
        assert!(output.contains("reply to: p1"));

        let faz = client.into_inner();
        let sent = CawRequest::unpack(faz.events[0].payload.as_ref().expect("payload"))
            .expect("unpack");
        assert_eq!(sent.parent_id.as_deref(), Some(&b"p1"[..]));
    }

    #[tokio::test]
    async fn top_level_post_sends_no_parent() {
        let mut client = CawClient::new(FakeFaz::default());
        let mut buf = Vec::new();
        let result = PostCommand::new("alice", "hello", None)
            .expect("valid")
            .execute(&mut client, &mut buf, &OutputFormat::default())
            .await;
        assert!(result.is_err());

        let faz = client.into_inner();
        let sent = CawRequest::unpack(faz.events[0].payload.as_ref().expect("payload"))
            .expect("unpack");
        assert_eq!(sent.parent_id, None);
    }

    #[tokio::test]
    async fn read_prints_thread_in_order() {
        let reply = ReadReply {
            caws: vec![caw("p1", None), caw("p2", Some("p1"))],
        };
        let faz = FakeFaz::default().with_reply(EventType::Read, reply.pack().expect("pack"));
        let mut client = CawClient::new(faz);
        let mut buf = Vec::new();

        ReadCommand::new("p1")
            .execute(&mut client, &mut buf, &OutputFormat::new(Format::Json))
            .await
            .expect("should execute");

        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["root"], "p1");
        assert_eq!(value["caws"][0]["id"], "p1");
        assert!(value["caws"][0].get("parent_id").is_none());
        assert_eq!(value["caws"][1]["id"], "p2");
        assert_eq!(value["caws"][1]["parent_id"], "p1");
    }

    #[tokio::test]
    async fn read_failure_writes_nothing() {
        let mut client = CawClient::new(FakeFaz::default().failing(EventType::Read));
        let mut buf = Vec::new();
        let result = ReadCommand::new("p1")
            .execute(&mut client, &mut buf, &OutputFormat::default())
            .await;
        assert!(matches!(result, Err(CliError::Command(_))));
        assert!(buf.is_empty());
    }
}
