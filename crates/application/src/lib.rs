//! BIND statistics application layer
pub mod ports;
pub mod use_cases;

pub use use_cases::GetStatisticsUseCase;
