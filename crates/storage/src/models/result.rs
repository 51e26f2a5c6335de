use serde::{Deserialize, Serialize};

/// Per-stage result for one participant. Populated externally by the
/// organizers; read-only for this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    pub stage_id: String,
    pub user_id: i64,
    pub best_time: String,
    pub position: String,
    pub points: String,
}
