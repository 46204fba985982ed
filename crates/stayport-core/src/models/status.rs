use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Canonical review status. Exactly one canonical value is active per hotel;
/// all display, filter, and transition-eligibility logic operates on this
/// enum, never on the raw wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    Offline,
}

impl ReviewStatus {
    /// Normalize any wire representation of review status: canonical
    /// strings, the legacy `online` spelling of approved, numeric codes
    /// (1=pending, 2=approved, 3=rejected, 4=offline), or stringified
    /// numerics. Unrecognized and missing values fall back to `Pending` so
    /// an unknown status is never treated as publicly visible.
    pub fn normalize(raw: Option<&JsonValue>) -> Self {
        let Some(raw) = raw else {
            return ReviewStatus::Pending;
        };
        match raw {
            JsonValue::String(s) => Self::from_wire(s),
            JsonValue::Number(n) => n.as_i64().map_or(ReviewStatus::Pending, Self::from_code),
            _ => ReviewStatus::Pending,
        }
    }

    fn from_wire(s: &str) -> Self {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        match s {
            "approved" | "online" => ReviewStatus::Approved,
            "rejected" => ReviewStatus::Rejected,
            "offline" => ReviewStatus::Offline,
            _ => ReviewStatus::Pending,
        }
    }

    fn from_code(code: i64) -> Self {
        match code {
            2 => ReviewStatus::Approved,
            3 => ReviewStatus::Rejected,
            4 => ReviewStatus::Offline,
            _ => ReviewStatus::Pending,
        }
    }

    /// Already-approved hotels cannot be approved again.
    pub fn can_approve(self) -> bool {
        self != ReviewStatus::Approved
    }

    /// Rejected hotels are not eligible for another rejection.
    pub fn can_reject(self) -> bool {
        self != ReviewStatus::Rejected
    }

    /// The offline toggle flips approved <-> offline; rejected hotels are
    /// not eligible.
    pub fn can_toggle_offline(self) -> bool {
        self != ReviewStatus::Rejected
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::Rejected => write!(f, "rejected"),
            ReviewStatus::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            "offline" => Ok(ReviewStatus::Offline),
            _ => Err(anyhow::anyhow!("Invalid review status: {}", s)),
        }
    }
}
