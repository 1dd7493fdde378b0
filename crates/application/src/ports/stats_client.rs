use async_trait::async_trait;
use bindstats_domain::{StatisticGroup, Statistics, StatsError};

/// Queries the statistics channel and returns the normalized snapshot.
#[async_trait]
pub trait StatsClient: Send + Sync {
    /// Fetch the requested groups. An empty slice means the client's default
    /// group set. On error no partial snapshot is returned.
    async fn stats(&self, groups: &[StatisticGroup]) -> Result<Statistics, StatsError>;
}
