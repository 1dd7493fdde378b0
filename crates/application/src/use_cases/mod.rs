pub mod stats;

pub use stats::GetStatisticsUseCase;
