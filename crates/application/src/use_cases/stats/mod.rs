pub mod documents;
pub mod get_statistics;

pub use documents::{ServerDocument, TasksDocument, ZonesDocument};
pub use get_statistics::GetStatisticsUseCase;
