use async_trait::async_trait;
use bindstats_domain::{ClientConfig, StatisticGroup, Statistics, StatsError};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::documents::{ServerDocument, TasksDocument, ZonesDocument};
use crate::ports::{StatsClient, StatsTransport, XmlDocument};

/// Use case for collecting one statistics snapshot.
///
/// Each call fetches the documents backing the requested groups concurrently
/// and projects them into a fresh [`Statistics`]. The first failing fetch
/// aborts the others and fails the whole call.
pub struct GetStatisticsUseCase<T> {
    transport: Arc<T>,
    default_groups: Vec<StatisticGroup>,
}

/// Which parts of the snapshot a call populates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Selection {
    server: bool,
    view: bool,
    tasks: bool,
}

impl Selection {
    fn from_groups(groups: &[StatisticGroup]) -> Self {
        let mut selection = Self::default();
        for group in groups {
            match group {
                StatisticGroup::Server => selection.server = true,
                StatisticGroup::View => selection.view = true,
                StatisticGroup::Tasks => selection.tasks = true,
            }
        }
        selection
    }
}

impl<T: StatsTransport> GetStatisticsUseCase<T> {
    /// Creates the use case with every group as the default set.
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            default_groups: StatisticGroup::ALL.to_vec(),
        }
    }

    pub fn from_config(transport: Arc<T>, config: &ClientConfig) -> Self {
        Self::new(transport).with_default_groups(config.default_groups.clone())
    }

    /// Overrides the groups fetched when a caller asks for none. An empty
    /// list keeps the current defaults.
    pub fn with_default_groups(mut self, groups: Vec<StatisticGroup>) -> Self {
        if !groups.is_empty() {
            self.default_groups = groups;
        }
        self
    }

    pub fn default_groups(&self) -> &[StatisticGroup] {
        &self.default_groups
    }

    /// Fetches and normalizes the requested groups.
    ///
    /// An empty `groups` slice means [`Self::default_groups`]. Groups that are
    /// not requested stay at their zero value, which callers cannot tell apart
    /// from a group that was requested but reported nothing.
    ///
    /// Documents fetched:
    /// - `server`: `/xml/v3/server`
    /// - `view`: `/xml/v3/server` and `/xml/v3/zones`
    /// - `tasks`: `/xml/v3/tasks`
    #[instrument(skip(self))]
    pub async fn execute(&self, groups: &[StatisticGroup]) -> Result<Statistics, StatsError> {
        let groups = if groups.is_empty() {
            self.default_groups.as_slice()
        } else {
            groups
        };
        let selection = Selection::from_groups(groups);

        let (server_doc, zones_doc, tasks_doc) = tokio::try_join!(
            self.fetch_if::<ServerDocument>(selection.server || selection.view),
            self.fetch_if::<ZonesDocument>(selection.view),
            self.fetch_if::<TasksDocument>(selection.tasks),
        )?;

        let mut stats = Statistics::default();

        if let Some(doc) = server_doc {
            let (server, views) = doc.into_parts();
            if selection.server {
                stats.server = server;
            }
            if selection.view {
                stats.views = views;
            }
        }

        if let Some(doc) = zones_doc {
            stats.zone_views = doc.into_zone_views();
        }

        if let Some(doc) = tasks_doc {
            stats.task_manager = doc.into_task_manager();
        }

        debug!(
            views = stats.views.len(),
            zone_views = stats.zone_views.len(),
            tasks = stats.task_manager.tasks.len(),
            "Statistics collected"
        );

        Ok(stats)
    }

    async fn fetch_if<D: XmlDocument>(&self, needed: bool) -> Result<Option<D>, StatsError> {
        if !needed {
            return Ok(None);
        }

        debug!(path = D::PATH, "Fetching statistics document");

        match self.transport.get::<D>(D::PATH).await {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                warn!(path = D::PATH, error = %e, "Failed to fetch statistics document");
                Err(StatsError::fetch(D::PATH, e))
            }
        }
    }
}

#[async_trait]
impl<T: StatsTransport + 'static> StatsClient for GetStatisticsUseCase<T> {
    async fn stats(&self, groups: &[StatisticGroup]) -> Result<Statistics, StatsError> {
        self.execute(groups).await
    }
}
