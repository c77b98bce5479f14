//! Authentication for GitHub
//!
//! The token is read from an environment variable so the job can run
//! unattended from CI.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, github_auth_from_value};
