use page_keeper::fetch::{Fetcher, ReqwestTransport, RetryPolicy};
use page_keeper::output::{Reporter, Severity};
use reqwest::Client;
use std::sync::Mutex;
use std::time::Duration;
use wiremock::MockServer;

/// Reporter recording every line it receives
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<(Severity, String)>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<String> {
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

/// Creates a fetcher whose client resolves every host in `hosts` to the mock server
pub fn fetcher_for(server: &MockServer, hosts: &[&str]) -> Fetcher<ReqwestTransport> {
    let mut builder = Client::builder().timeout(Duration::from_secs(5));
    for host in hosts {
        builder = builder.resolve(host, *server.address());
    }
    let client = builder.build().expect("Failed to build test client");

    Fetcher::new(
        ReqwestTransport::new(client),
        RetryPolicy {
            max_retries: 5,
            base_delay: Duration::from_millis(1),
        },
    )
}

/// Link to `path` on `host`, served by the mock server's port
pub fn link(server: &MockServer, host: &str, path: &str) -> String {
    format!("http://{}:{}{}", host, server.address().port(), path)
}
