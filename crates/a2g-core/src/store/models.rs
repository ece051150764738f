use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Draft,
    /// Seeking a label.
    Shopping,
    Accepted,
    Released,
}

impl ReleaseStatus {
    pub const ALL: [ReleaseStatus; 4] = [
        ReleaseStatus::Draft,
        ReleaseStatus::Shopping,
        ReleaseStatus::Accepted,
        ReleaseStatus::Released,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseStatus::Draft => "draft",
            ReleaseStatus::Shopping => "shopping",
            ReleaseStatus::Accepted => "accepted",
            ReleaseStatus::Released => "released",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

/// A release row. Only `status` is interpreted; other columns pass through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReleaseRecord {
    pub fn status(&self) -> Option<ReleaseStatus> {
        self.status.as_deref().and_then(ReleaseStatus::parse)
    }
}

/// Per-status release counts. Rows with a missing or unknown status count
/// toward `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasesSummary {
    pub total: u64,
    pub draft: u64,
    pub shopping: u64,
    pub accepted: u64,
    pub released: u64,
}

impl ReleasesSummary {
    pub fn tally<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ReleaseRecord>,
    {
        let mut summary = Self::default();
        for record in records {
            summary.total += 1;
            match record.status() {
                Some(ReleaseStatus::Draft) => summary.draft += 1,
                Some(ReleaseStatus::Shopping) => summary.shopping += 1,
                Some(ReleaseStatus::Accepted) => summary.accepted += 1,
                Some(ReleaseStatus::Released) => summary.released += 1,
                None => {}
            }
        }
        summary
    }

    pub fn bucketed(&self) -> u64 {
        self.draft + self.shopping + self.accepted + self.released
    }
}

/// One observability sync. Append-only; ordered by `synced_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilitySnapshot {
    pub synced_at: DateTime<Utc>,
    #[serde(default)]
    pub services: Value,
    #[serde(default)]
    pub uptime: Value,
    #[serde(default)]
    pub costs: Value,
    #[serde(default)]
    pub stats: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// History projection of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityPoint {
    pub synced_at: DateTime<Utc>,
    #[serde(default)]
    pub services: Value,
    #[serde(default)]
    pub uptime: Value,
    #[serde(default)]
    pub costs: Value,
    #[serde(default)]
    pub stats: Value,
}

impl ObservabilityPoint {
    pub const COLUMNS: [&'static str; 5] = ["synced_at", "services", "uptime", "costs", "stats"];
}

impl From<ObservabilitySnapshot> for ObservabilityPoint {
    fn from(s: ObservabilitySnapshot) -> Self {
        Self {
            synced_at: s.synced_at,
            services: s.services,
            uptime: s.uptime,
            costs: s.costs,
            stats: s.stats,
        }
    }
}
