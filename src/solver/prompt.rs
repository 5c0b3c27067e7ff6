// Where login text comes from.
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::CredentialsConfig;
use crate::errors::{MowerError, MowerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Username,
    Password,
}

impl CredentialField {
    pub fn referent(self) -> &'static str {
        match self {
            CredentialField::Username => "Enter username: ",
            CredentialField::Password => "Enter password: ",
        }
    }
}

#[async_trait]
pub trait TextPrompt: Send {
    async fn ask(&mut self, field: CredentialField) -> MowerResult<String>;
}

/// Asks on the terminal.
#[derive(Debug, Default)]
pub struct StdinPrompt;

#[async_trait]
impl TextPrompt for StdinPrompt {
    async fn ask(&mut self, field: CredentialField) -> MowerResult<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(field.referent().as_bytes()).await?;
        stdout.flush().await?;

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        if read == 0 {
            return Err(MowerError::Config(format!(
                "stdin closed while waiting for {field:?}"
            )));
        }
        Ok(line.trim().to_string())
    }
}

/// Answers from configured credentials, asking on the terminal for anything
/// missing.
pub struct CredentialPrompt {
    credentials: CredentialsConfig,
    fallback: StdinPrompt,
}

impl CredentialPrompt {
    pub fn new(credentials: CredentialsConfig) -> Self {
        Self {
            credentials,
            fallback: StdinPrompt,
        }
    }
}

#[async_trait]
impl TextPrompt for CredentialPrompt {
    async fn ask(&mut self, field: CredentialField) -> MowerResult<String> {
        let configured = match field {
            CredentialField::Username => self.credentials.username.clone(),
            CredentialField::Password => self.credentials.password.clone(),
        };
        match configured {
            Some(value) => Ok(value),
            None => self.fallback.ask(field).await,
        }
    }
}
