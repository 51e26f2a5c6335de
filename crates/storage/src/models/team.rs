use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Slug derived from the name at creation time.
    pub team_id: String,
    pub team_name: String,
    pub created_at: String,
}

/// Derive a team id from its display name: lowercase, keep ascii
/// alphanumerics, map separators to hyphens, trim. Falls back to
/// `"team"` when nothing survives the stripping.
pub(crate) fn slug(name: &str) -> String {
    let mut out = String::new();
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if c == ' ' || c == '-' || c == '_' {
            out.push('-');
        }
    }
    let out = out.trim_matches('-').to_string();
    if out.is_empty() { "team".to_string() } else { out }
}
