//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use caw_proto::caw::{Caw, ProfileReply, Timestamp};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::Format;
use crate::client::HookOutcome;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Per-entry result of hook-all or unhook-all.
#[derive(Debug, Clone, Serialize)]
pub struct HookReport {
    /// "hook" or "unhook".
    pub action: &'static str,
    /// One row per registry entry.
    pub entries: Vec<HookEntry>,
}

/// One row of a [`HookReport`].
#[derive(Debug, Clone, Serialize)]
pub struct HookEntry {
    /// Event type wire value.
    pub event_type: i32,
    /// Event type name.
    pub event: String,
    /// Handler name.
    pub handler: &'static str,
    /// Whether the call succeeded.
    pub ok: bool,
    /// Failure reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HookReport {
    /// Build a report from dispatcher outcomes.
    #[must_use]
    pub fn new(action: &'static str, outcomes: &[HookOutcome]) -> Self {
        let entries = outcomes
            .iter()
            .map(|o| HookEntry {
                event_type: o.event.as_i32(),
                event: o.event.to_string(),
                handler: o.handler,
                ok: o.is_ok(),
                error: o.error.clone(),
            })
            .collect();
        Self { action, entries }
    }

    /// Number of failed entries.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| !e.ok).count()
    }
}

impl TableDisplay for HookReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{:<6} {:<15} {:<14} STATUS", "TYPE", "EVENT", "HANDLER")?;
        for entry in &self.entries {
            let status = entry.error.as_deref().map_or_else(
                || format!("{}ed", self.action),
                |e| format!("failed: {e}"),
            );
            writeln!(
                writer,
                "{:<6} {:<15} {:<14} {}",
                entry.event_type, entry.event, entry.handler, status
            )?;
        }
        Ok(())
    }
}

/// A user's following and follower lists.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    /// Profile owner.
    pub username: String,
    /// Users followed.
    pub following: Vec<String>,
    /// Followers.
    pub followers: Vec<String>,
}

impl ProfileView {
    /// Build from a profile reply.
    #[must_use]
    pub fn new(username: impl Into<String>, reply: ProfileReply) -> Self {
        Self {
            username: username.into(),
            following: reply.following,
            followers: reply.followers,
        }
    }
}

impl TableDisplay for ProfileView {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Profile of {}", self.username)?;
        writeln!(
            writer,
            "  following (size={}): {}",
            self.following.len(),
            self.following.join(", ")
        )?;
        writeln!(
            writer,
            "  followers (size={}): {}",
            self.followers.len(),
            self.followers.join(", ")
        )?;
        Ok(())
    }
}

/// A caw rendered for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CawView {
    /// Caw id.
    pub id: String,
    /// Author.
    pub username: String,
    /// Body text.
    pub text: String,
    /// Parent caw id, absent for top-level caws.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Posting time in RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
}

impl From<&Caw> for CawView {
    fn from(caw: &Caw) -> Self {
        Self {
            id: String::from_utf8_lossy(&caw.id).into_owned(),
            username: caw.username.clone(),
            text: caw.text.clone(),
            parent_id: caw
                .parent_id
                .as_deref()
                .map(|p| String::from_utf8_lossy(p).into_owned()),
            posted_at: caw.timestamp.as_ref().and_then(posted_at),
        }
    }
}

impl TableDisplay for CawView {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Caw {} by {}", self.id, self.username)?;
        if let Some(posted_at) = &self.posted_at {
            writeln!(writer, "  posted:   {posted_at}")?;
        }
        if let Some(parent) = &self.parent_id {
            writeln!(writer, "  reply to: {parent}")?;
        }
        writeln!(writer, "  {}", self.text)?;
        Ok(())
    }
}

/// A thread of caws in service order.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadView {
    /// Id the thread was read from.
    pub root: String,
    /// Caws of the thread.
    pub caws: Vec<CawView>,
}

impl ThreadView {
    /// Build from the caws returned by a read.
    #[must_use]
    pub fn new(root: impl Into<String>, caws: &[Caw]) -> Self {
        Self {
            root: root.into(),
            caws: caws.iter().map(CawView::from).collect(),
        }
    }
}

impl TableDisplay for ThreadView {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Thread {} ({} caws)", self.root, self.caws.len())?;
        writeln!(writer, "══════════════════════════════════")?;
        for caw in &self.caws {
            caw.write_table(writer)?;
        }
        Ok(())
    }
}

/// Simple message output.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Message text.
    pub message: String,
    /// Whether this is a success message.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
}

impl Message {
    /// Create a success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create an informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl TableDisplay for Message {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.success {
            writeln!(writer, "✓ {}", self.message)?;
        } else {
            writeln!(writer, "{}", self.message)?;
        }
        Ok(())
    }
}

/// RFC 3339 posting time. Prefers the microsecond field.
fn posted_at(ts: &Timestamp) -> Option<String> {
    let time = if ts.useconds != 0 {
        let secs = ts.useconds.div_euclid(1_000_000);
        let nanos = (ts.useconds.rem_euclid(1_000_000) * 1_000) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    } else {
        DateTime::<Utc>::from_timestamp(ts.seconds, 0)
    };
    time.map(|t| t.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caw_proto::EventType;

    fn sample_caw(parent: Option<&str>) -> Caw {
        Caw {
            username: "alice".into(),
            text: "hello".into(),
            id: b"p2".to_vec(),
            parent_id: parent.map(|p| p.as_bytes().to_vec()),
            timestamp: Some(Timestamp::from_micros(1_700_000_000_500_000)),
        }
    }

    #[test]
    fn caw_view_renders_ids_as_text() {
        let view = CawView::from(&sample_caw(Some("p1")));
        assert_eq!(view.id, "p2");
        assert_eq!(view.parent_id.as_deref(), Some("p1"));
        assert_eq!(
            view.posted_at.as_deref(),
            Some("2023-11-14T22:13:20.500+00:00")
        );
    }

    #[test]
    fn caw_view_without_parent_omits_field_in_json() {
        let view = CawView::from(&sample_caw(None));
        let json = OutputFormat::new(Format::Json).to_string(&view).expect("json");
        assert!(!json.contains("parent_id"));
        assert!(json.contains("\"id\": \"p2\""));
    }

    #[test]
    fn posted_at_falls_back_to_seconds() {
        let ts = Timestamp {
            seconds: 1_700_000_000,
            useconds: 0,
        };
        assert_eq!(posted_at(&ts).as_deref(), Some("2023-11-14T22:13:20+00:00"));
    }

    #[test]
    fn profile_table_lists_sizes() {
        let reply = ProfileReply {
            following: vec!["bob".into(), "carol".into()],
            followers: vec![],
        };
        let view = ProfileView::new("alice", reply);
        let text = OutputFormat::default().to_string(&view).expect("table");
        assert!(text.contains("Profile of alice"));
        assert!(text.contains("following (size=2): bob, carol"));
        assert!(text.contains("followers (size=0)"));
    }

    #[test]
    fn hook_report_counts_failures() {
        let outcomes = vec![
            HookOutcome {
                event: EventType::RegisterUser,
                handler: "RegisterUser",
                error: None,
            },
            HookOutcome {
                event: EventType::Follow,
                handler: "Follow",
                error: Some("timeout".into()),
            },
        ];
        let report = HookReport::new("hook", &outcomes);
        assert_eq!(report.failures(), 1);

        let text = OutputFormat::default().to_string(&report).expect("table");
        assert!(text.contains("hooked"));
        assert!(text.contains("failed: timeout"));
    }

    #[test]
    fn thread_table_keeps_order() {
        let caws = vec![sample_caw(None), sample_caw(Some("p1"))];
        let view = ThreadView::new("p1", &caws);
        let text = OutputFormat::default().to_string(&view).expect("table");
        assert!(text.contains("Thread p1 (2 caws)"));
        assert!(text.contains("reply to: p1"));
    }

    #[test]
    fn message_json_hides_false_success() {
        let json = OutputFormat::new(Format::Json)
            .to_string(&Message::info("nothing to do"))
            .expect("json");
        assert!(!json.contains("success"));
    }
}
