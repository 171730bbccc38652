//! Best-effort last-used tracking

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::credential::{CredentialId, CredentialRepository};
use crate::infrastructure::observability::record_usage_failure;

/// Records credential usage off the request path
///
/// Every call spawns a detached task that stamps `last_used_at` with the current
/// time. Failures are logged and counted; the caller never sees them.
#[derive(Clone)]
pub struct UsageRecorder {
    credentials: Arc<dyn CredentialRepository>,
}

impl UsageRecorder {
    pub fn new(credentials: Arc<dyn CredentialRepository>) -> Self {
        Self { credentials }
    }

    /// Spawn the update and return immediately
    ///
    /// The handle may be dropped; it exists so callers that need to wait (tests,
    /// graceful shutdown) can.
    pub fn record(&self, credential_id: CredentialId) -> JoinHandle<()> {
        let credentials = Arc::clone(&self.credentials);

        tokio::spawn(async move {
            let now = Utc::now();

            match credentials.mark_used(&credential_id, now).await {
                Ok(()) => debug!(credential_id = %credential_id, "Recorded credential usage"),
                Err(e) => {
                    record_usage_failure();
                    warn!(
                        credential_id = %credential_id,
                        error = %e,
                        "Failed to record credential usage"
                    );
                }
            }
        })
    }
}

impl std::fmt::Debug for UsageRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageRecorder").finish_non_exhaustive()
    }
}
