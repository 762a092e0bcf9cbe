pub mod catalog;
pub mod repository;
pub mod rules;
pub mod service;

mod errors;
pub mod models;

pub use catalog::{
    AchievementCategory, AchievementDefinition, AchievementId, AchievementRarity, ACHIEVEMENTS,
};
pub use errors::AchievementError;
pub use models::{Achievement, AchievementProgress, AchievementState, AchievementStates};
pub use repository::{AchievementRepository, KeyValueAchievementRepository};
pub use rules::{AchievementRuleEngine, RuleError};
pub use service::AchievementService;
