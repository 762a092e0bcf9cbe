pub mod repository;
pub mod service;

mod errors;
pub mod models;

pub use errors::StatsError;
pub use models::*;
pub use repository::{KeyValueStatsRepository, StatsRepository};
pub use service::StatsService;
