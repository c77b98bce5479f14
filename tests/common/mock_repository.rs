//! Mock repository service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use version_bump::error::{Error, Result};
use version_bump::platform::RepositoryService;
use version_bump::types::{DirEntry, FileChange, PullRequest, RemoteFile, RepoConfig};

/// Call record for `create_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchCall {
    pub branch: String,
    pub sha: String,
}

/// Call record for `update_file` and `create_file`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFileCall {
    pub path: String,
    pub branch: String,
    pub message: String,
    pub content: String,
    /// Blob SHA passed to `update_file` (None for `create_file`)
    pub sha: Option<String>,
}

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Simple in-memory repository
///
/// Files live on every branch at once: a branch created from the default
/// branch sees the same files. Features:
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockRepositoryService {
    config: RepoConfig,
    readme_path: String,
    next_pr_number: AtomicU64,
    files: Mutex<BTreeMap<String, RemoteFile>>,
    branches: Mutex<HashMap<String, String>>,
    // Call tracking
    get_file_calls: Mutex<Vec<(String, Option<String>)>>,
    branch_exists_calls: Mutex<Vec<String>>,
    create_branch_calls: Mutex<Vec<CreateBranchCall>>,
    update_file_calls: Mutex<Vec<WriteFileCall>>,
    create_file_calls: Mutex<Vec<WriteFileCall>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    // Error injection
    error_on_get_file: Mutex<Option<String>>,
    error_on_update_file: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
}

impl MockRepositoryService {
    /// Create an empty repository with a `main` branch
    pub fn new(owner: &str, repo: &str) -> Self {
        let mut branches = HashMap::new();
        branches.insert("main".to_string(), "main_tip_sha".to_string());
        Self {
            config: RepoConfig::new(owner, repo),
            readme_path: "README.md".to_string(),
            next_pr_number: AtomicU64::new(1),
            files: Mutex::new(BTreeMap::new()),
            branches: Mutex::new(branches),
            get_file_calls: Mutex::new(Vec::new()),
            branch_exists_calls: Mutex::new(Vec::new()),
            create_branch_calls: Mutex::new(Vec::new()),
            update_file_calls: Mutex::new(Vec::new()),
            create_file_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_get_file: Mutex::new(None),
            error_on_update_file: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
        }
    }

    /// Add or replace a file
    pub fn put_file(&self, path: &str, content: &str) {
        let sha = format!("sha_{}", path.replace('/', "_"));
        self.files.lock().unwrap().insert(
            path.to_string(),
            RemoteFile {
                path: path.to_string(),
                sha,
                content: content.to_string(),
            },
        );
    }

    /// Add an existing branch
    pub fn put_branch(&self, branch: &str, sha: &str) {
        self.branches
            .lock()
            .unwrap()
            .insert(branch.to_string(), sha.to_string());
    }

    /// Current content of a file
    pub fn file_content(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).map(|f| f.content.clone())
    }

    // === Error injection methods ===

    /// Make `get_file` fail for one path
    pub fn fail_get_file(&self, path: &str) {
        *self.error_on_get_file.lock().unwrap() = Some(path.to_string());
    }

    /// Make `update_file` fail for one path
    pub fn fail_update_file(&self, path: &str) {
        *self.error_on_update_file.lock().unwrap() = Some(path.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// All `get_file` calls as (path, ref)
    pub fn get_file_calls(&self) -> Vec<(String, Option<String>)> {
        self.get_file_calls.lock().unwrap().clone()
    }

    /// All branches `branch_exists` was asked about
    pub fn branch_exists_calls(&self) -> Vec<String> {
        self.branch_exists_calls.lock().unwrap().clone()
    }

    /// All `create_branch` calls
    pub fn create_branch_calls(&self) -> Vec<CreateBranchCall> {
        self.create_branch_calls.lock().unwrap().clone()
    }

    /// All `update_file` calls
    pub fn update_file_calls(&self) -> Vec<WriteFileCall> {
        self.update_file_calls.lock().unwrap().clone()
    }

    /// All `create_file` calls
    pub fn create_file_calls(&self) -> Vec<WriteFileCall> {
        self.create_file_calls.lock().unwrap().clone()
    }

    /// All `create_pr` calls
    pub fn create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Number of remote writes of any kind
    pub fn write_count(&self) -> usize {
        self.create_branch_calls.lock().unwrap().len()
            + self.update_file_calls.lock().unwrap().len()
            + self.create_file_calls.lock().unwrap().len()
            + self.create_pr_calls.lock().unwrap().len()
    }

    /// Assert nothing was written
    pub fn assert_no_writes(&self) {
        assert_eq!(
            self.write_count(),
            0,
            "Expected no writes but got branches {:?}, updates {:?}, creates {:?}, PRs {:?}",
            self.create_branch_calls(),
            self.update_file_calls(),
            self.create_file_calls(),
            self.create_pr_calls()
        );
    }

    /// The single `update_file` call for `path`
    pub fn updated(&self, path: &str) -> WriteFileCall {
        let calls = self.update_file_calls();
        calls
            .iter()
            .find(|c| c.path == path)
            .cloned()
            .unwrap_or_else(|| panic!("Expected update_file({path}) but got: {calls:?}"))
    }

    fn lookup(&self, path: &str) -> Result<RemoteFile> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("404 Not Found: {path}")))
    }
}

#[async_trait]
impl RepositoryService for MockRepositoryService {
    async fn get_file(&self, path: &str, git_ref: Option<&str>) -> Result<RemoteFile> {
        self.get_file_calls
            .lock()
            .unwrap()
            .push((path.to_string(), git_ref.map(ToString::to_string)));

        if self.error_on_get_file.lock().unwrap().as_deref() == Some(path) {
            return Err(Error::Platform(format!("401 Unauthorized: {path}")));
        }

        if let Some(branch) = git_ref
            && !self.branches.lock().unwrap().contains_key(branch)
        {
            return Err(Error::Platform(format!("No commit found for the ref {branch}")));
        }

        self.lookup(path)
    }

    async fn get_readme(&self, git_ref: Option<&str>) -> Result<RemoteFile> {
        let path = self.readme_path.clone();
        self.get_file(&path, git_ref).await
    }

    async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let files = self.files.lock().unwrap();
        let entries: Vec<DirEntry> = files
            .keys()
            .filter_map(|p| {
                let rest = p.strip_prefix(&prefix)?;
                (!rest.contains('/')).then(|| DirEntry {
                    name: rest.to_string(),
                    path: p.clone(),
                })
            })
            .collect();

        if entries.is_empty() {
            return Err(Error::Platform(format!("404 Not Found: {path}")));
        }
        Ok(entries)
    }

    async fn branch_exists(&self, branch: &str) -> Result<bool> {
        self.branch_exists_calls
            .lock()
            .unwrap()
            .push(branch.to_string());
        Ok(self.branches.lock().unwrap().contains_key(branch))
    }

    async fn get_branch_sha(&self, branch: &str) -> Result<String> {
        self.branches
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("Branch {branch} not found")))
    }

    async fn create_branch(&self, branch: &str, sha: &str) -> Result<()> {
        self.create_branch_calls
            .lock()
            .unwrap()
            .push(CreateBranchCall {
                branch: branch.to_string(),
                sha: sha.to_string(),
            });

        let mut branches = self.branches.lock().unwrap();
        if branches.contains_key(branch) {
            return Err(Error::Platform(format!("Reference already exists: {branch}")));
        }
        branches.insert(branch.to_string(), sha.to_string());
        Ok(())
    }

    async fn update_file(&self, change: &FileChange, sha: &str, branch: &str) -> Result<()> {
        self.update_file_calls.lock().unwrap().push(WriteFileCall {
            path: change.path.clone(),
            branch: branch.to_string(),
            message: change.message.clone(),
            content: change.content.clone(),
            sha: Some(sha.to_string()),
        });

        if self.error_on_update_file.lock().unwrap().as_deref() == Some(change.path.as_str()) {
            return Err(Error::Platform(format!("409 Conflict: {}", change.path)));
        }

        let current = self.lookup(&change.path)?;
        if current.sha != sha {
            return Err(Error::Platform(format!("409 sha mismatch: {}", change.path)));
        }
        self.put_file(&change.path, &change.content);
        Ok(())
    }

    async fn create_file(&self, change: &FileChange, branch: &str) -> Result<()> {
        self.create_file_calls.lock().unwrap().push(WriteFileCall {
            path: change.path.clone(),
            branch: branch.to_string(),
            message: change.message.clone(),
            content: change.content.clone(),
            sha: None,
        });

        if self.files.lock().unwrap().contains_key(&change.path) {
            return Err(Error::Platform(format!("422 sha wasn't supplied: {}", change.path)));
        }
        self.put_file(&change.path, &change.content);
        Ok(())
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!(
                "https://github.com/{}/{}/pull/{number}",
                self.config.owner, self.config.repo
            ),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        })
    }

    fn config(&self) -> &RepoConfig {
        &self.config
    }
}
