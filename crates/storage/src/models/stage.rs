use serde::{Deserialize, Serialize};

/// Localized boolean tokens the backing sheet uses for `reg_open`. The
/// column is free text maintained partly by hand, so reads normalize a
/// handful of spellings and writes emit the canonical pair.
pub const REG_OPEN_TRUE: &str = "да";
pub const REG_OPEN_FALSE: &str = "нет";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Admin-chosen identifier, e.g. `st1`.
    pub stage_id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub place: String,
    pub address: String,
    /// Stored as a localized token, not a native boolean.
    pub reg_open: String,
    /// Price as entered by the admin; blank means free.
    pub price: String,
}

impl Stage {
    pub fn is_reg_open(&self) -> bool {
        parse_flag(&self.reg_open)
    }

    /// Price with the blank-means-zero default applied.
    pub fn price_or_zero(&self) -> String {
        let p = self.price.trim();
        if p.is_empty() { "0".to_string() } else { p.to_string() }
    }
}

pub fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "да" | "yes" | "true" | "1" | "y"
    )
}

pub fn flag_token(open: bool) -> &'static str {
    if open { REG_OPEN_TRUE } else { REG_OPEN_FALSE }
}
