use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Per-stage write serialization.
///
/// The row store offers no transactions, so the join workflow's
/// check-then-append and count-then-decide sequences must not
/// interleave for the same stage. Everyone writing registrations for a
/// stage holds that stage's lock for the whole read-decide-write span.
#[derive(Default)]
pub struct StageLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl StageLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn for_stage(&self, stage_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(stage_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
