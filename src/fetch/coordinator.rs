//! Fetch coordinator - run orchestration logic
//!
//! This module owns one invocation of the tool:
//! - Rejecting links that are not absolute http(s) URLs
//! - Spawning one independent task per accepted link
//! - Waiting for every task to settle, whatever its outcome
//! - Abandoning unsettled tasks once the run deadline passes

use crate::config::{RunConfig, RunOptions};
use crate::fetch::fetcher::{Fetcher, Transport};
use crate::fetch::metadata::extract_metadata;
use crate::output::{Reporter, RunSummary};
use crate::state::TaskState;
use crate::storage::{PageStore, StorageError, StorageResult};
use crate::url::validate_link;
use crate::{ConfigError, KeeperError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::{Id, JoinSet};
use tokio::time::{timeout_at, Instant};
use url::Url;

/// One link to fetch, as handed to its task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The link exactly as given on the command line
    pub link: String,

    /// The parsed URL that is requested
    pub url: Url,

    /// Whether the success line carries metadata
    pub metadata: bool,
}

/// Orchestrates fetching a list of links
pub struct FetchCommand<T> {
    links: Vec<String>,
    config: RunConfig,
    fetcher: Arc<Fetcher<T>>,
    store: Arc<dyn PageStore>,
    reporter: Arc<dyn Reporter>,
}

impl<T: Transport + 'static> FetchCommand<T> {
    /// Creates a command for `links`
    ///
    /// The options are validated here, before any request is made.
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidTimeout` - timeout outside (0, 10] minutes
    /// * `ConfigError::TooManyLinks` - more than 5 links without the override
    pub fn new(
        links: Vec<String>,
        options: &RunOptions,
        fetcher: Fetcher<T>,
        store: Arc<dyn PageStore>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, ConfigError> {
        let config = RunConfig::from_options(options, links.len())?;

        Ok(Self {
            links,
            config,
            fetcher: Arc::new(fetcher),
            store,
            reporter,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Runs every link to completion or until the deadline passes
    ///
    /// Each link yields exactly one reported line. Per-link failures are
    /// reported and counted, never returned.
    ///
    /// # Errors
    ///
    /// * `KeeperError::DeadlineExceeded` - the run budget ran out; tasks still
    ///   in flight were aborted without reporting
    pub async fn execute(&self) -> Result<RunSummary, KeeperError> {
        let deadline = Instant::now() + self.config.timeout();
        let mut summary = RunSummary::new(self.links.len());
        let mut tasks = JoinSet::new();
        let mut links_by_task = HashMap::new();

        for link in &self.links {
            let url = match validate_link(link) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Rejected link {}: {}", link, e);
                    self.reporter.error(&format!(
                        "Invalid link: '{}'. Please use the protocol of either 'http' or 'https'",
                        link
                    ));
                    summary.invalid += 1;
                    continue;
                }
            };

            let task = FetchTask {
                request: FetchRequest {
                    link: link.clone(),
                    url,
                    metadata: self.config.metadata_enabled,
                },
                fetcher: Arc::clone(&self.fetcher),
                store: Arc::clone(&self.store),
                reporter: Arc::clone(&self.reporter),
            };
            let handle = tasks.spawn(task.run());
            links_by_task.insert(handle.id(), link.clone());
        }

        tracing::debug!(
            "Spawned {} fetch task(s), deadline in {:?}",
            tasks.len(),
            self.config.timeout()
        );

        let settled = settle_all(
            &mut tasks,
            &links_by_task,
            self.reporter.as_ref(),
            &mut summary,
        );
        if timeout_at(deadline, settled).await.is_err() {
            tasks.abort_all();
            self.reporter.error("Maximum CLI timeout reached. Exiting...");
            return Err(KeeperError::DeadlineExceeded {
                minutes: self.config.timeout_minutes,
            });
        }

        Ok(summary)
    }
}

/// Waits for every task, folding each result into the summary
///
/// A task that ends without reporting its link (panic or bad transition)
/// gets a fetch failure line here instead.
async fn settle_all(
    tasks: &mut JoinSet<Result<TaskState, KeeperError>>,
    links_by_task: &HashMap<Id, String>,
    reporter: &dyn Reporter,
    summary: &mut RunSummary,
) {
    while let Some(joined) = tasks.join_next_with_id().await {
        let unreported = match joined {
            Ok((_, Ok(TaskState::Succeeded))) => {
                summary.succeeded += 1;
                continue;
            }
            Ok((_, Ok(_))) => {
                summary.failed += 1;
                continue;
            }
            Ok((id, Err(e))) => {
                tracing::error!("Fetch task ended in an invalid state: {}", e);
                id
            }
            Err(e) => {
                tracing::error!("Fetch task did not complete: {}", e);
                e.id()
            }
        };

        summary.failed += 1;
        if let Some(link) = links_by_task.get(&unreported) {
            reporter.error(&format!("Failed to fetch content for {}", link));
        }
    }
}

/// A single link handled end to end: fetch, extract, store, report
///
/// The state is advanced before the line is reported, so an `Err` from
/// [`FetchTask::run`] means nothing was reported for the link.
struct FetchTask<T> {
    request: FetchRequest,
    fetcher: Arc<Fetcher<T>>,
    store: Arc<dyn PageStore>,
    reporter: Arc<dyn Reporter>,
}

impl<T: Transport> FetchTask<T> {
    async fn run(self) -> Result<TaskState, KeeperError> {
        let FetchRequest {
            link,
            url,
            metadata,
        } = &self.request;
        let mut state = TaskState::Pending;

        state.advance(TaskState::Fetching)?;
        let outcome = self.fetcher.fetch(url.as_str()).await;

        if !outcome.is_valid() {
            tracing::debug!("Fetch of {} failed with status {:?}", link, outcome.status());
            state.advance(TaskState::Failed)?;
            self.reporter
                .error(&format!("Failed to fetch content for {}", link));
            return Ok(state);
        }

        let html = outcome.into_body().unwrap_or_default();
        let message = if *metadata {
            extract_metadata(&html).summary_for(link)
        } else {
            format!("Success for {}", link)
        };

        match self.save(html).await {
            Ok(path) => {
                state.advance(TaskState::Succeeded)?;
                self.reporter.info(&format!(
                    "{} HTML content stored as {}",
                    message,
                    path.display()
                ));
            }
            Err(e) => {
                state.advance(TaskState::Failed)?;
                self.reporter
                    .error(&format!("Failed to store HTML content for {}: {}", link, e));
            }
        }

        Ok(state)
    }

    /// Writes the page on the blocking pool so the run deadline can still fire
    async fn save(&self, html: String) -> StorageResult<PathBuf> {
        let store = Arc::clone(&self.store);
        let url = self.request.url.clone();

        tokio::task::spawn_blocking(move || store.save(&url, &html))
            .await
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))?
    }
}
