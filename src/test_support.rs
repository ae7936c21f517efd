//! Test doubles shared by unit tests

use crate::fetch::{RawResponse, Transport, TransportError};
use crate::output::{Reporter, Severity};
use crate::storage::{PageStore, StorageError, StorageResult};
use crate::url::domain_file_name;
use std::collections::{HashMap, HashSet, VecDeque};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// One scripted reply of a [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    /// Respond with a status and body
    Respond(u16, String),
    /// Fail at the transport level
    Fail,
    /// Never answer within any test's lifetime
    Stall,
    /// Panic inside the request future
    Panic,
}

impl Scripted {
    pub(crate) fn ok(body: &str) -> Self {
        Self::Respond(200, body.to_string())
    }

    pub(crate) fn status(status: u16, body: &str) -> Self {
        Self::Respond(status, body.to_string())
    }
}

fn key(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

/// Transport replaying scripted replies per URL and counting attempts
///
/// Once a script runs out its last step repeats. Unscripted URLs fail.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    attempts: Mutex<HashMap<String, usize>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(&self, url: &str, steps: Vec<Scripted>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(key(url), steps.into_iter().collect());
    }

    pub(crate) fn attempts(&self, url: &str) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .get(&key(url))
            .copied()
            .unwrap_or(0)
    }

    fn next_step(&self, url: &str) -> Scripted {
        let key = key(url);
        *self.attempts.lock().unwrap().entry(key.clone()).or_insert(0) += 1;

        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(&key) {
            Some(steps) if steps.len() > 1 => steps.pop_front().unwrap_or(Scripted::Fail),
            Some(steps) => steps.front().cloned().unwrap_or(Scripted::Fail),
            None => Scripted::Fail,
        }
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        let step = self.next_step(url);

        async move {
            match step {
                Scripted::Respond(status, body) => Ok(RawResponse { status, body }),
                Scripted::Fail => Err(TransportError::Connect("connection refused".to_string())),
                Scripted::Stall => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(TransportError::Timeout("stalled".to_string()))
                }
                Scripted::Panic => panic!("scripted transport panic"),
            }
        }
    }
}

/// Store keeping pages in memory, keyed by file name
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pages: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
    failing: HashSet<String>,
    write_delay: Option<Duration>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A store whose writes fail for the given file names
    pub(crate) fn failing_for(file_names: &[&str]) -> Self {
        Self {
            failing: file_names.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// A store whose writes block the calling thread for `delay`
    pub(crate) fn with_write_delay(delay: Duration) -> Self {
        Self {
            write_delay: Some(delay),
            ..Self::default()
        }
    }

    pub(crate) fn page(&self, file_name: &str) -> Option<String> {
        self.pages.lock().unwrap().get(file_name).cloned()
    }

    pub(crate) fn file_count(&self) -> usize {
        self.pages.lock().unwrap().len()
    }

    pub(crate) fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl PageStore for MemoryStore {
    fn save(&self, url: &Url, html: &str) -> StorageResult<PathBuf> {
        let file_name =
            domain_file_name(url).ok_or_else(|| StorageError::MissingDomain(url.to_string()))?;

        if let Some(delay) = self.write_delay {
            std::thread::sleep(delay);
        }

        if self.failing.contains(&file_name) {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )));
        }

        *self.writes.lock().unwrap() += 1;
        self.pages
            .lock()
            .unwrap()
            .insert(file_name.clone(), html.to_string());
        Ok(PathBuf::from("/memory").join(file_name))
    }
}

/// Reporter recording every line it receives
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    lines: Mutex<Vec<(Severity, String)>>,
}

impl RecordingReporter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn with_severity(&self, severity: Severity) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, line)| line)
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}
