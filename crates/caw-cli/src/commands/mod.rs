//! CLI command implementations.
//!
//! Each submodule implements a group of commands:
//! - [`hooks`] - Hook and unhook every handler
//! - [`account`] - Register, follow, profile
//! - [`caws`] - Post and read caws
//!
//! [`Action`] turns parsed arguments into a runnable command, checking
//! preconditions before any connection is opened.

pub mod account;
pub mod caws;
pub mod hooks;

#[cfg(test)]
pub(crate) mod fake;

use std::io::Write;

pub use account::{FollowCommand, ProfileCommand, RegisterCommand};
pub use caws::{PostCommand, ReadCommand};
pub use hooks::{HookAction, HookCommand};

use crate::cli::Commands;
use crate::client::CawClient;
use crate::error::CliError;
use crate::output::OutputFormat;
use crate::transport::FazService;

/// A validated command, ready to run against a connected client.
#[derive(Debug, Clone)]
pub enum Action {
    /// Hook or unhook every handler.
    Hooks(HookCommand),
    /// Register a user.
    Register(RegisterCommand),
    /// Follow a user.
    Follow(FollowCommand),
    /// Show a profile.
    Profile(ProfileCommand),
    /// Post a caw.
    Post(PostCommand),
    /// Read a thread.
    Read(ReadCommand),
}

impl Action {
    /// Plan the action for `command`, acting as `user` when given.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NotLoggedIn`] when the command needs a user and
    /// none was given, or [`CliError::InvalidArgument`] for an empty
    /// username, caw id or caw text.
    pub fn plan(command: &Commands, user: Option<&str>) -> Result<Self, CliError> {
        let user = user.filter(|u| !u.is_empty());
        let action = match command {
            Commands::HookAll => Self::Hooks(HookCommand::new(HookAction::Hook)),
            Commands::UnhookAll => Self::Hooks(HookCommand::new(HookAction::Unhook)),
            Commands::Register { username } => {
                if username.is_empty() {
                    return Err(CliError::InvalidArgument("username cannot be empty".into()));
                }
                Self::Register(RegisterCommand::new(username))
            }
            Commands::Follow { username } => {
                let user = user.ok_or(CliError::NotLoggedIn("follow a user"))?;
                Self::Follow(FollowCommand::new(user, username))
            }
            Commands::Profile => {
                let user = user.ok_or(CliError::NotLoggedIn("get the user's profile"))?;
                Self::Profile(ProfileCommand::new(user))
            }
            Commands::Caw { text, reply } => {
                let user = user.ok_or(CliError::NotLoggedIn("post a caw"))?;
                Self::Post(PostCommand::new(user, text, reply.clone())?)
            }
            Commands::Read { id } => {
                if id.is_empty() {
                    return Err(CliError::InvalidArgument("caw id cannot be empty".into()));
                }
                Self::Read(ReadCommand::new(id))
            }
        };
        Ok(action)
    }

    /// Run the action.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying command.
    pub async fn execute<S: FazService, W: Write>(
        &self,
        client: &mut CawClient<S>,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        match self {
            Self::Hooks(cmd) => cmd.execute(client, writer, format).await,
            Self::Register(cmd) => cmd.execute(client, writer, format).await,
            Self::Follow(cmd) => cmd.execute(client, writer, format).await,
            Self::Profile(cmd) => cmd.execute(client, writer, format).await,
            Self::Post(cmd) => cmd.execute(client, writer, format).await,
            Self::Read(cmd) => cmd.execute(client, writer, format).await,
        }
    }
}
