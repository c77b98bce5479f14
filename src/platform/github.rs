//! GitHub repository service implementation

use crate::error::{Error, Result};
use crate::platform::RepositoryService;
use crate::types::{DirEntry, FileChange, PullRequest, RemoteFile, RepoConfig};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use octocrab::Octocrab;
use octocrab::params::repos::Reference;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: RepoConfig,
    /// Token for raw HTTP requests (git ref lookups)
    token: String,
    /// HTTP client for raw requests (git ref lookups)
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service bound to `repo`
    ///
    /// `api_base` is the REST root, e.g. `https://ghe.example.com/api/v3`;
    /// `None` means api.github.com.
    pub fn new(token: &str, repo: RepoConfig, api_base: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_base = if let Some(base) = api_base {
            let base = base.trim_end_matches('/');
            builder = builder
                .base_uri(base)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
            base.to_string()
        } else {
            DEFAULT_API_BASE.to_string()
        };

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("version-bump")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: repo,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// Look up `refs/heads/<branch>`, returning `None` on 404
    async fn head_ref_sha(&self, branch: &str) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct GitRef {
            object: GitObject,
        }

        #[derive(Deserialize)]
        struct GitObject {
            sha: String,
        }

        let url = format!(
            "{}/repos/{}/{}/git/ref/heads/{}",
            self.api_base, self.config.owner, self.config.repo, branch
        );

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch ref heads/{branch}: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(branch, "ref not found");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Fetching ref heads/{branch} returned {}",
                response.status()
            )));
        }

        let git_ref: GitRef = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse ref heads/{branch}: {e}")))?;

        Ok(Some(git_ref.object.sha))
    }
}

/// Decode a base64 `content` field from the contents API
///
/// GitHub wraps the payload at 60 columns, so whitespace is stripped first.
pub fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| Error::GitHubApi(format!("Invalid base64 file content: {e}")))?;
    String::from_utf8(bytes).map_err(|e| Error::GitHubApi(format!("File is not UTF-8: {e}")))
}

/// Helper to convert octocrab content to our `RemoteFile` type
fn file_from_octocrab(item: &octocrab::models::repos::Content) -> Result<RemoteFile> {
    let encoded = item
        .content
        .as_deref()
        .ok_or_else(|| Error::GitHubApi(format!("No inline content for {}", item.path)))?;

    Ok(RemoteFile {
        path: item.path.clone(),
        sha: item.sha.clone(),
        content: decode_content(encoded)?,
    })
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
    }
}

#[async_trait]
impl RepositoryService for GitHubService {
    async fn get_file(&self, path: &str, git_ref: Option<&str>) -> Result<RemoteFile> {
        debug!(repo = %self.config, path, git_ref, "reading file");
        let repos = self.client.repos(&self.config.owner, &self.config.repo);
        let mut builder = repos.get_content().path(path);
        if let Some(r) = git_ref {
            builder = builder.r#ref(r);
        }

        let contents = builder.send().await?;
        let item = contents
            .items
            .first()
            .ok_or_else(|| Error::GitHubApi(format!("{path} not found in {}", self.config)))?;

        if item.r#type != "file" {
            return Err(Error::GitHubApi(format!("{path} is not a file")));
        }

        let file = file_from_octocrab(item)?;
        debug!(path, sha = %file.sha, bytes = file.content.len(), "read file");
        Ok(file)
    }

    async fn get_readme(&self, git_ref: Option<&str>) -> Result<RemoteFile> {
        debug!(repo = %self.config, git_ref, "reading README");
        let repos = self.client.repos(&self.config.owner, &self.config.repo);
        let mut builder = repos.get_readme();
        if let Some(r) = git_ref {
            builder = builder.r#ref(r);
        }

        let readme = builder.send().await?;
        let file = file_from_octocrab(&readme)?;
        debug!(path = %file.path, "read README");
        Ok(file)
    }

    async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>> {
        debug!(repo = %self.config, path, "listing directory");
        let contents = self
            .client
            .repos(&self.config.owner, &self.config.repo)
            .get_content()
            .path(path)
            .send()
            .await?;

        let entries: Vec<DirEntry> = contents
            .items
            .into_iter()
            .map(|item| DirEntry {
                name: item.name,
                path: item.path,
            })
            .collect();
        debug!(path, count = entries.len(), "listed directory");
        Ok(entries)
    }

    async fn branch_exists(&self, branch: &str) -> Result<bool> {
        debug!(repo = %self.config, branch, "checking branch");
        Ok(self.head_ref_sha(branch).await?.is_some())
    }

    async fn get_branch_sha(&self, branch: &str) -> Result<String> {
        debug!(repo = %self.config, branch, "resolving branch tip");
        self.head_ref_sha(branch)
            .await?
            .ok_or_else(|| Error::GitHubApi(format!("Branch {branch} not found in {}", self.config)))
    }

    async fn create_branch(&self, branch: &str, sha: &str) -> Result<()> {
        debug!(repo = %self.config, branch, sha, "creating branch");
        self.client
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&Reference::Branch(branch.to_string()), sha)
            .await?;
        debug!(branch, "created branch");
        Ok(())
    }

    async fn update_file(&self, change: &FileChange, sha: &str, branch: &str) -> Result<()> {
        debug!(repo = %self.config, path = %change.path, branch, "updating file");
        self.client
            .repos(&self.config.owner, &self.config.repo)
            .update_file(&change.path, &change.message, &change.content, sha)
            .branch(branch)
            .send()
            .await?;
        debug!(path = %change.path, "updated file");
        Ok(())
    }

    async fn create_file(&self, change: &FileChange, branch: &str) -> Result<()> {
        debug!(repo = %self.config, path = %change.path, branch, "creating file");
        self.client
            .repos(&self.config.owner, &self.config.repo)
            .create_file(&change.path, &change.message, &change.content)
            .branch(branch)
            .send()
            .await?;
        debug!(path = %change.path, "created file");
        Ok(())
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        debug!(repo = %self.config, head, base, "creating PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .create(title, head, base)
            .body(body)
            .maintainer_can_modify(true)
            .send()
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    fn config(&self) -> &RepoConfig {
        &self.config
    }
}
