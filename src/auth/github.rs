//! GitHub token lookup

use crate::error::{Error, Result};
use std::fmt;

/// GitHub authentication configuration
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Personal access or workflow token
    pub token: String,
    /// Environment variable the token came from
    pub source_var: String,
}

impl fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source_var", &self.source_var)
            .finish()
    }
}

/// Read the GitHub token from `env_var`
pub fn get_github_auth(env_var: &str) -> Result<GitHubAuthConfig> {
    github_auth_from_value(env_var, std::env::var(env_var).ok())
}

/// Build auth config from an already-read variable value
///
/// Missing and blank values are both rejected.
pub fn github_auth_from_value(env_var: &str, value: Option<String>) -> Result<GitHubAuthConfig> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(GitHubAuthConfig {
            token: token.trim().to_string(),
            source_var: env_var.to_string(),
        }),
        _ => Err(Error::Auth(format!(
            "no GitHub token found; set the {env_var} environment variable"
        ))),
    }
}
