//! User account commands: register, follow, profile.

use std::io::Write;

use crate::client::CawClient;
use crate::error::CliError;
use crate::output::{Message, OutputFormat, ProfileView};
use crate::transport::FazService;

/// Register command executor.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    username: String,
}

impl RegisterCommand {
    /// Create a new register command.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Execute the register command.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails or output fails.
    pub async fn execute<S: FazService, W: Write>(
        &self,
        client: &mut CawClient<S>,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        if !client.register_user(&self.username).await {
            return Err(CliError::Command(format!("failed to register user {}", self.username)));
        }
        let msg = Message::success(format!("Registered user {}", self.username));
        format.write(writer, &msg)
    }
}

/// Follow command executor.
#[derive(Debug, Clone)]
pub struct FollowCommand {
    user: String,
    to_follow: String,
}

impl FollowCommand {
    /// Create a follow command acting as `user`.
    #[must_use]
    pub fn new(user: impl Into<String>, to_follow: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            to_follow: to_follow.into(),
        }
    }

    /// Execute the follow command.
    ///
    /// # Errors
    ///
    /// Returns an error if the follow fails or output fails.
    pub async fn execute<S: FazService, W: Write>(
        &self,
        client: &mut CawClient<S>,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        if !client.follow(&self.user, &self.to_follow).await {
            return Err(CliError::Command(format!("failed to follow {}", self.to_follow)));
        }
        let msg = Message::success(format!("{} now follows {}", self.user, self.to_follow));
        format.write(writer, &msg)
    }
}

/// Profile command executor.
#[derive(Debug, Clone)]
pub struct ProfileCommand {
    user: String,
}

impl ProfileCommand {
    /// Create a profile command for `user`.
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    /// Execute the profile command.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be fetched or output fails.
    pub async fn execute<S: FazService, W: Write>(
        &self,
        client: &mut CawClient<S>,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        let reply = client.profile(&self.user).await.ok_or_else(|| {
            CliError::Command(format!("failed to fetch the profile of {}", self.user))
        })?;
        format.write(writer, &ProfileView::new(self.user.as_str(), reply))
    }
}
