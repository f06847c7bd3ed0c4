use anyhow::Result;
use std::time::{Duration, Instant};

use super::types::CheckResult;

/// HTTP reachability checker
///
/// Issues a single GET per check against one shared client. Every outcome is
/// captured as a [`CheckResult`]; a failed request is data, not an error.
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }

    /// Perform one check and return the outcome record.
    ///
    /// Latency covers the whole request, success or failure. Redirects are
    /// followed by the client, so the status code seen is the final one.
    pub async fn check(&self, url: &str) -> CheckResult {
        let start = Instant::now();

        match self.client.get(url).send().await {
            Ok(response) => {
                let latency = start.elapsed().as_millis() as u64;
                let status = response.status();

                CheckResult::completed(status.as_u16(), status.is_success(), latency)
            }
            Err(e) => {
                let latency = start.elapsed().as_millis() as u64;

                CheckResult::failed(format!("HTTP request failed: {e}"), latency)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::types::MonitorStatus;

    #[tokio::test]
    async fn test_unreachable_target_is_offline_data() {
        let checker = HttpChecker::new(Duration::from_secs(2)).unwrap();

        // Port 1 on loopback is not listening; the connect fails immediately.
        let result = checker.check("http://127.0.0.1:1/").await;

        assert_eq!(result.status, MonitorStatus::Offline);
        assert_eq!(result.status_code, None);
        assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
    }
}
