use crate::errors::StatsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sub-group of the statistics a caller can ask for.
///
/// This is caller vocabulary only: several groups may be served by the same
/// document on the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticGroup {
    /// Server-wide counters (queries, requests, nsstat, zonestat, rcodes).
    Server,
    /// Per-view resolver, cache and zone statistics.
    View,
    /// Task manager and thread model.
    Tasks,
}

impl StatisticGroup {
    pub const ALL: [StatisticGroup; 3] = [
        StatisticGroup::Server,
        StatisticGroup::View,
        StatisticGroup::Tasks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatisticGroup::Server => "server",
            StatisticGroup::View => "view",
            StatisticGroup::Tasks => "tasks",
        }
    }
}

impl fmt::Display for StatisticGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatisticGroup {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(StatisticGroup::Server),
            "view" => Ok(StatisticGroup::View),
            "tasks" => Ok(StatisticGroup::Tasks),
            _ => Err(StatsError::UnknownGroup(s.to_string())),
        }
    }
}
