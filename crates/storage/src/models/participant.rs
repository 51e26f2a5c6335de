use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub nick: String,
    /// Denormalized reference to `Team` by name. A participant with no
    /// team is invalid once registration has completed.
    pub team_name: String,
    pub created_at: String,
}
