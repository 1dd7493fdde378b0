//! Raw BIND XML v3 statistics documents.
//!
//! These mirror the server's wire schema closely and are only used as decode
//! targets. Every field defaults, so documents from servers with fewer
//! features enabled (or newer servers with extra elements) still decode.

use bindstats_domain::{
    Counter, Gauge, Server, Task, TaskManager, ThreadModel, View, ZoneCounter, ZoneView,
};
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};

use crate::ports::XmlDocument;

/// Counter families tagged by `<counters type="...">`.
const OPCODE: &str = "opcode";
const QTYPE: &str = "qtype";
const NSSTAT: &str = "nsstat";
const ZONESTAT: &str = "zonestat";
const RCODE: &str = "rcode";
const RESQTYPE: &str = "resqtype";
const RESSTATS: &str = "resstats";

/// Only Internet-class zones are reported.
const ZONE_CLASS_IN: &str = "IN";

/// `/xml/v3/server`: server counters and per-view resolver statistics.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerDocument {
    server: RawServer,
    views: RawViewList,
}

/// `/xml/v3/zones`: per-zone counters grouped by view.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZonesDocument {
    views: RawZoneViewList,
}

/// `/xml/v3/tasks`: task manager state.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TasksDocument {
    taskmgr: RawTaskManager,
}

impl XmlDocument for ServerDocument {
    const PATH: &'static str = "/xml/v3/server";
}

impl XmlDocument for ZonesDocument {
    const PATH: &'static str = "/xml/v3/zones";
}

impl XmlDocument for TasksDocument {
    const PATH: &'static str = "/xml/v3/tasks";
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CounterSet {
    #[serde(rename = "@type")]
    counter_type: String,
    #[serde(rename = "counter")]
    counters: Vec<Counter>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct RawServer {
    #[serde(deserialize_with = "deserialize_timestamp")]
    boot_time: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    config_time: Option<DateTime<Utc>>,
    counters: Vec<CounterSet>,
}

/// RFC 3339 timestamp; an empty element counts as absent.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    DateTime::parse_from_rfc3339(text)
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(de::Error::custom)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawViewList {
    #[serde(rename = "view")]
    views: Vec<RawView>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawView {
    #[serde(rename = "@name")]
    name: String,
    cache: RawCache,
    counters: Vec<CounterSet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCache {
    #[serde(rename = "rrset")]
    rrsets: Vec<Gauge>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawZoneViewList {
    #[serde(rename = "view")]
    views: Vec<RawZoneView>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawZoneView {
    #[serde(rename = "@name")]
    name: String,
    zones: RawZoneList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawZoneList {
    #[serde(rename = "zone")]
    zones: Vec<RawZone>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawZone {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@rdataclass")]
    rdataclass: String,
    serial: String,
    counters: Vec<CounterSet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct RawTaskManager {
    thread_model: ThreadModel,
    tasks: RawTaskList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTaskList {
    #[serde(rename = "task")]
    tasks: Vec<Task>,
}

impl ServerDocument {
    /// Split into the server counters and the per-view resolver statistics.
    pub fn into_parts(self) -> (Server, Vec<View>) {
        let server = self.server.into_server();
        let views = self.views.views.into_iter().map(RawView::into_view).collect();
        (server, views)
    }
}

impl ZonesDocument {
    pub fn into_zone_views(self) -> Vec<ZoneView> {
        self.views
            .views
            .into_iter()
            .map(RawZoneView::into_zone_view)
            .collect()
    }
}

impl TasksDocument {
    pub fn into_task_manager(self) -> TaskManager {
        TaskManager {
            tasks: self.taskmgr.tasks.tasks,
            thread_model: self.taskmgr.thread_model,
        }
    }
}

impl RawServer {
    fn into_server(self) -> Server {
        let mut server = Server {
            boot_time: self.boot_time.unwrap_or_default(),
            config_time: self.config_time.unwrap_or_default(),
            ..Default::default()
        };

        for set in self.counters {
            let target = match set.counter_type.as_str() {
                OPCODE => &mut server.incoming_requests,
                QTYPE => &mut server.incoming_queries,
                NSSTAT => &mut server.name_server_stats,
                ZONESTAT => &mut server.zone_statistics,
                RCODE => &mut server.server_rcodes,
                _ => continue,
            };
            target.extend(set.counters);
        }

        server
    }
}

impl RawView {
    fn into_view(self) -> View {
        let mut view = View {
            name: self.name,
            cache: self.cache.rrsets,
            ..Default::default()
        };

        for set in self.counters {
            match set.counter_type.as_str() {
                RESSTATS => view.resolver_stats.extend(set.counters),
                RESQTYPE => view.resolver_queries.extend(set.counters),
                _ => {}
            }
        }

        view
    }
}

impl RawZoneView {
    fn into_zone_view(self) -> ZoneView {
        let zone_data = self
            .zones
            .zones
            .into_iter()
            .filter(|zone| zone.rdataclass == ZONE_CLASS_IN)
            .map(RawZone::into_zone_counter)
            .collect();

        ZoneView {
            name: self.name,
            zone_data,
        }
    }
}

impl RawZone {
    fn into_zone_counter(self) -> ZoneCounter {
        let mut zone = ZoneCounter {
            name: self.name,
            serial: self.serial,
            ..Default::default()
        };

        for set in self.counters {
            match set.counter_type.as_str() {
                RCODE => zone.zone_rcode.extend(set.counters),
                QTYPE => zone.zone_qtype.extend(set.counters),
                _ => {}
            }
        }

        zone
    }
}
