//! Hook and unhook every Caw handler on the Faz layer.

use std::io::Write;

use tracing::info;

use crate::client::CawClient;
use crate::error::CliError;
use crate::output::{HookReport, OutputFormat};
use crate::transport::FazService;

/// Which direction to drive the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    /// Bind every event type to its handler.
    Hook,
    /// Remove every binding.
    Unhook,
}

impl HookAction {
    const fn verb(self) -> &'static str {
        match self {
            Self::Hook => "hook",
            Self::Unhook => "unhook",
        }
    }
}

/// Hook-all / unhook-all command executor.
#[derive(Debug, Clone, Copy)]
pub struct HookCommand {
    action: HookAction,
}

impl HookCommand {
    /// Create a new hook command.
    #[must_use]
    pub const fn new(action: HookAction) -> Self {
        Self { action }
    }

    /// Execute the command.
    ///
    /// Every entry is attempted; the report is written before failures
    /// are turned into an error.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry failed or output fails.
    pub async fn execute<S, W>(
        &self,
        client: &mut CawClient<S>,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError>
    where
        S: FazService,
        W: Write,
    {
        let verb = self.action.verb();
        info!(action = verb, "Driving all Caw handlers on the Faz layer");

        let outcomes = match self.action {
            HookAction::Hook => client.hook_all_report().await,
            HookAction::Unhook => client.unhook_all_report().await,
        };
        let report = HookReport::new(verb, &outcomes);
        format.write(writer, &report)?;

        match report.failures() {
            0 => Ok(()),
            n => Err(CliError::Command(format!(
                "failed to {verb} {n} of {} handlers",
                report.entries.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use crate::commands::fake::FakeFaz;
    use caw_proto::EventType;

    #[tokio::test]
    async fn hook_all_writes_one_row_per_handler() {
        let mut client = CawClient::new(FakeFaz::default());
        let mut buf = Vec::new();

        HookCommand::new(HookAction::Hook)
            .execute(&mut client, &mut buf, &OutputFormat::default())
            .await
            .expect("should execute");

        let output = String::from_utf8(buf).expect("valid utf8");
        for handler in ["RegisterUser", "Follow", "Profile", "Caw", "Read"] {
            assert!(output.contains(handler), "missing {handler}");
        }
        assert_eq!(client.into_inner().hooked.len(), 5);
    }

    #[tokio::test]
    async fn unhook_failure_still_reports_all_entries() {
        let faz = FakeFaz::default().failing(EventType::Profile);
        let mut client = CawClient::new(faz);
        let mut buf = Vec::new();

        let result = HookCommand::new(HookAction::Unhook)
            .execute(&mut client, &mut buf, &OutputFormat::new(Format::Json))
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to unhook 1 of 5 handlers"));
        let output = String::from_utf8(buf).expect("valid utf8");
        assert_eq!(output.matches("\"handler\"").count(), 5);
        assert_eq!(client.into_inner().unhooked.len(), 5);
    }
}
