//! Build-time achievement catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum AchievementId {
    FirstGame,
    TriviaMaster,
    Games25,
    Games50,
    Games100,
    TriviaOnlyMaster,
    PartyMaster,
    DaresOnlyMaster,
    MixedMaster,
    Streak5,
    Streak10,
    Streak25,
    PerfectGame,
    Perfectionist,
    SpeedDemon,
    LightningRound,
    DareEnthusiast,
    DareMaster,
    DareLegend,
    QuickDare,
    PackCollector,
    PackEnthusiast,
    PackLibrary,
    PackExplorer,
    PackCompletionist,
    Completionist,
}

impl AchievementId {
    /// Stable identifier used in persisted records
    pub const fn as_str(self) -> &'static str {
        match self {
            AchievementId::FirstGame => "first_game",
            AchievementId::TriviaMaster => "trivia_master",
            AchievementId::Games25 => "games_25",
            AchievementId::Games50 => "games_50",
            AchievementId::Games100 => "games_100",
            AchievementId::TriviaOnlyMaster => "trivia_only_master",
            AchievementId::PartyMaster => "party_master",
            AchievementId::DaresOnlyMaster => "dares_only_master",
            AchievementId::MixedMaster => "mixed_master",
            AchievementId::Streak5 => "streak_5",
            AchievementId::Streak10 => "streak_10",
            AchievementId::Streak25 => "streak_25",
            AchievementId::PerfectGame => "perfect_game",
            AchievementId::Perfectionist => "perfectionist",
            AchievementId::SpeedDemon => "speed_demon",
            AchievementId::LightningRound => "lightning_round",
            AchievementId::DareEnthusiast => "dare_enthusiast",
            AchievementId::DareMaster => "dare_master",
            AchievementId::DareLegend => "dare_legend",
            AchievementId::QuickDare => "quick_dare",
            AchievementId::PackCollector => "pack_collector",
            AchievementId::PackEnthusiast => "pack_enthusiast",
            AchievementId::PackLibrary => "pack_library",
            AchievementId::PackExplorer => "pack_explorer",
            AchievementId::PackCompletionist => "pack_completionist",
            AchievementId::Completionist => "completionist",
        }
    }

    pub fn definition(self) -> &'static AchievementDefinition {
        // ACHIEVEMENTS is declared in enum order
        &ACHIEVEMENTS[self as usize]
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AchievementId {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        AchievementId::iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Games,
    Streaks,
    Speed,
    Dares,
    Packs,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementDefinition {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub rarity: AchievementRarity,
}

const fn entry(
    id: AchievementId,
    title: &'static str,
    description: &'static str,
    category: AchievementCategory,
    rarity: AchievementRarity,
) -> AchievementDefinition {
    AchievementDefinition {
        id,
        title,
        description,
        category,
        rarity,
    }
}

/// Every achievement, in `AchievementId` declaration order.
pub static ACHIEVEMENTS: [AchievementDefinition; 26] = [
    entry(
        AchievementId::FirstGame,
        "First Steps",
        "Complete your first game",
        AchievementCategory::Games,
        AchievementRarity::Common,
    ),
    entry(
        AchievementId::TriviaMaster,
        "Trivia Master",
        "Complete 10 games",
        AchievementCategory::Games,
        AchievementRarity::Uncommon,
    ),
    entry(
        AchievementId::Games25,
        "Regular",
        "Complete 25 games",
        AchievementCategory::Games,
        AchievementRarity::Rare,
    ),
    entry(
        AchievementId::Games50,
        "Devotee",
        "Complete 50 games",
        AchievementCategory::Games,
        AchievementRarity::Epic,
    ),
    entry(
        AchievementId::Games100,
        "Centurion",
        "Complete 100 games",
        AchievementCategory::Games,
        AchievementRarity::Legendary,
    ),
    entry(
        AchievementId::TriviaOnlyMaster,
        "Pure Scholar",
        "Complete 10 TriviaONLY games",
        AchievementCategory::Games,
        AchievementRarity::Uncommon,
    ),
    entry(
        AchievementId::PartyMaster,
        "Life of the Party",
        "Complete 10 TriviaDare games",
        AchievementCategory::Games,
        AchievementRarity::Uncommon,
    ),
    entry(
        AchievementId::DaresOnlyMaster,
        "Daredevil",
        "Complete 10 DaresONLY games",
        AchievementCategory::Games,
        AchievementRarity::Uncommon,
    ),
    entry(
        AchievementId::MixedMaster,
        "Jack of All Trades",
        "Complete 5 games in every mode",
        AchievementCategory::Games,
        AchievementRarity::Rare,
    ),
    entry(
        AchievementId::Streak5,
        "On a Roll",
        "Answer 5 questions in a row correctly",
        AchievementCategory::Streaks,
        AchievementRarity::Common,
    ),
    entry(
        AchievementId::Streak10,
        "Unstoppable",
        "Answer 10 questions in a row correctly",
        AchievementCategory::Streaks,
        AchievementRarity::Rare,
    ),
    entry(
        AchievementId::Streak25,
        "Walking Encyclopedia",
        "Answer 25 questions in a row correctly",
        AchievementCategory::Streaks,
        AchievementRarity::Legendary,
    ),
    entry(
        AchievementId::PerfectGame,
        "Flawless",
        "Finish a game without a wrong answer",
        AchievementCategory::Streaks,
        AchievementRarity::Uncommon,
    ),
    entry(
        AchievementId::Perfectionist,
        "Perfectionist",
        "Finish 5 games without a wrong answer",
        AchievementCategory::Streaks,
        AchievementRarity::Epic,
    ),
    entry(
        AchievementId::SpeedDemon,
        "Speed Demon",
        "Answer correctly in under 3 seconds",
        AchievementCategory::Speed,
        AchievementRarity::Common,
    ),
    entry(
        AchievementId::LightningRound,
        "Lightning Round",
        "Answer correctly in under 2 seconds",
        AchievementCategory::Speed,
        AchievementRarity::Uncommon,
    ),
    entry(
        AchievementId::DareEnthusiast,
        "Dare Enthusiast",
        "Complete 10 dares",
        AchievementCategory::Dares,
        AchievementRarity::Common,
    ),
    entry(
        AchievementId::DareMaster,
        "Dare Master",
        "Complete 25 dares",
        AchievementCategory::Dares,
        AchievementRarity::Rare,
    ),
    entry(
        AchievementId::DareLegend,
        "Dare Legend",
        "Complete 50 dares",
        AchievementCategory::Dares,
        AchievementRarity::Epic,
    ),
    entry(
        AchievementId::QuickDare,
        "No Hesitation",
        "Complete a dare in under 10 seconds",
        AchievementCategory::Dares,
        AchievementRarity::Uncommon,
    ),
    entry(
        AchievementId::PackCollector,
        "Collector",
        "Purchase your first pack",
        AchievementCategory::Packs,
        AchievementRarity::Common,
    ),
    entry(
        AchievementId::PackEnthusiast,
        "Pack Enthusiast",
        "Purchase 3 packs",
        AchievementCategory::Packs,
        AchievementRarity::Uncommon,
    ),
    entry(
        AchievementId::PackLibrary,
        "Librarian",
        "Purchase 5 packs",
        AchievementCategory::Packs,
        AchievementRarity::Rare,
    ),
    entry(
        AchievementId::PackExplorer,
        "Explorer",
        "Play with 3 different packs",
        AchievementCategory::Packs,
        AchievementRarity::Uncommon,
    ),
    entry(
        AchievementId::PackCompletionist,
        "Full Shelf",
        "Own every available pack",
        AchievementCategory::Packs,
        AchievementRarity::Epic,
    ),
    entry(
        AchievementId::Completionist,
        "Completionist",
        "Unlock every other achievement",
        AchievementCategory::Special,
        AchievementRarity::Legendary,
    ),
];
