use serde::{Deserialize, Serialize};

/// Competitive role assigned at join time. Capacity-limited: at most
/// three mains per team per stage; the decision is never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Main,
    Reserve,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Main => "main",
            Role::Reserve => "reserve",
        }
    }

    /// Lenient: only an exact `main` counts toward team capacity, so
    /// any other stored value reads as reserve.
    pub fn parse(s: &str) -> Role {
        if s.trim() == "main" { Role::Main } else { Role::Reserve }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayStatus {
    Unpaid,
    Paid,
    Cancelled,
}

impl PayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PayStatus::Unpaid => "unpaid",
            PayStatus::Paid => "paid",
            PayStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> PayStatus {
        match s.trim() {
            "paid" => PayStatus::Paid,
            "cancelled" => PayStatus::Cancelled,
            _ => PayStatus::Unpaid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub stage_id: String,
    pub user_id: i64,
    /// Team name snapshot taken at join time.
    pub team_name: String,
    pub role: Role,
    pub pay_status: PayStatus,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_exact_for_main() {
        assert_eq!(Role::parse("main"), Role::Main);
        assert_eq!(Role::parse("Main"), Role::Reserve);
        assert_eq!(Role::parse("reserve"), Role::Reserve);
        assert_eq!(Role::parse(""), Role::Reserve);
    }

    #[test]
    fn pay_status_parse_defaults_to_unpaid() {
        assert_eq!(PayStatus::parse("paid"), PayStatus::Paid);
        assert_eq!(PayStatus::parse("cancelled"), PayStatus::Cancelled);
        assert_eq!(PayStatus::parse("garbage"), PayStatus::Unpaid);
    }
}
