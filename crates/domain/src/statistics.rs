use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Common prefix of the resolver query round-trip histogram counters
/// (`QryRTT10`, `QryRTT100`, ..., `QryRTT1600+`).
pub const QRY_RTT: &str = "QryRTT";

/// Normalized snapshot of one poll against the statistics channel.
///
/// Every field defaults to its zero value: groups that were not requested
/// (or were requested but reported nothing) leave empty sequences behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub server: Server,
    pub views: Vec<View>,
    pub zone_views: Vec<ZoneView>,
    pub task_manager: TaskManager,
}

impl Statistics {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Server-wide counters.
///
/// Counter names are not guaranteed unique by the server, so each family is
/// kept as an ordered sequence rather than a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Server {
    pub boot_time: DateTime<Utc>,
    pub config_time: DateTime<Utc>,
    pub incoming_queries: Vec<Counter>,
    pub incoming_requests: Vec<Counter>,
    pub name_server_stats: Vec<Counter>,
    pub zone_statistics: Vec<Counter>,
    pub server_rcodes: Vec<Counter>,
}

/// Resolver statistics for a single configured view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct View {
    pub name: String,
    pub cache: Vec<Gauge>,
    pub resolver_stats: Vec<Counter>,
    pub resolver_queries: Vec<Counter>,
}

impl View {
    /// Round-trip time buckets from the resolver stats, in document order.
    pub fn query_rtt(&self) -> impl Iterator<Item = &Counter> {
        self.resolver_stats
            .iter()
            .filter(|c| c.name.starts_with(QRY_RTT))
    }
}

/// Zone statistics grouped by the view that serves them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZoneView {
    pub name: String,
    pub zone_data: Vec<ZoneCounter>,
}

/// Counters of a single zone instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZoneCounter {
    pub name: String,
    /// Kept as text: serials may not fit the expected integer width and the
    /// server reports `-` for zones that failed to load.
    pub serial: String,
    pub zone_rcode: Vec<Counter>,
    pub zone_qtype: Vec<Counter>,
}

/// Task manager state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskManager {
    pub tasks: Vec<Task>,
    pub thread_model: ThreadModel,
}

/// `<task>` element of the task manager listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Signed: the server uses negative values as sentinels.
    pub quantum: i64,
    pub references: u64,
    /// Free-form state token (`idle`, `running`, ...).
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "kebab-case"))]
pub struct ThreadModel {
    #[serde(rename(deserialize = "type"))]
    pub model_type: String,
    pub worker_threads: u64,
    pub default_quantum: u64,
    pub tasks_running: u64,
}

/// Monotonic counter, e.g. `<counter name="QUERY">42</counter>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename(deserialize = "@name"), default)]
    pub name: String,
    #[serde(rename(deserialize = "$text"), default)]
    pub value: u64,
}

impl Counter {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Value that moves both ways between polls, e.g. a cache rrset count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauge {
    #[serde(default)]
    pub name: String,
    #[serde(rename(deserialize = "counter"), default)]
    pub value: u64,
}

impl Gauge {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
