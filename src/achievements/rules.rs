use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, warn};

use super::{catalog::AchievementId, models::AchievementStates};
use crate::stats::GameStatistics;

const SPEED_DEMON_MS: u64 = 3000;
const QUICK_DARE_MS: u64 = 10_000;

#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("Rule misconfigured: {0}")]
    Misconfigured(String),
}

/// Settings a predicate may need beyond the statistics themselves
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    pub total_packs_available: usize,
}

type Predicate = fn(&GameStatistics, &RuleContext) -> Result<bool, RuleError>;

/// One row of the unlock table
pub struct AchievementRule {
    pub id: AchievementId,
    predicate: Predicate,
}

impl AchievementRule {
    pub fn is_satisfied(
        &self,
        stats: &GameStatistics,
        context: &RuleContext,
    ) -> Result<bool, RuleError> {
        (self.predicate)(stats, context)
    }
}

macro_rules! rule {
    ($id:ident, |$stats:ident| $body:expr) => {
        AchievementRule {
            id: AchievementId::$id,
            predicate: |$stats, _| Ok($body),
        }
    };
}

/// Predicate table for every catalog entry except `Completionist`, which
/// depends on the other unlocks and is handled by the engine itself.
pub fn default_rules() -> Vec<AchievementRule> {
    vec![
        rule!(FirstGame, |s| s.games_played >= 1),
        rule!(TriviaMaster, |s| s.games_played >= 10),
        rule!(Games25, |s| s.games_played >= 25),
        rule!(Games50, |s| s.games_played >= 50),
        rule!(Games100, |s| s.games_played >= 100),
        rule!(TriviaOnlyMaster, |s| s.trivia_only_games_completed >= 10),
        rule!(PartyMaster, |s| s.trivia_dare_games_completed >= 10),
        rule!(DaresOnlyMaster, |s| s.dares_only_games_completed >= 10),
        rule!(MixedMaster, |s| s.trivia_dare_games_completed >= 5
            && s.trivia_only_games_completed >= 5
            && s.dares_only_games_completed >= 5),
        rule!(Streak5, |s| s.max_correct_streak >= 5),
        rule!(Streak10, |s| s.max_correct_streak >= 10),
        rule!(Streak25, |s| s.max_correct_streak >= 25),
        rule!(PerfectGame, |s| s.perfect_games >= 1),
        rule!(Perfectionist, |s| s.perfect_games >= 5),
        rule!(SpeedDemon, |s| s
            .fastest_answer_time_ms
            .is_some_and(|ms| ms < SPEED_DEMON_MS)),
        rule!(LightningRound, |s| s.lightning_answer_achieved),
        rule!(DareEnthusiast, |s| s.dares_completed >= 10),
        rule!(DareMaster, |s| s.dares_completed >= 25),
        rule!(DareLegend, |s| s.dares_completed >= 50),
        rule!(QuickDare, |s| s
            .quickest_dare_time_ms
            .is_some_and(|ms| ms < QUICK_DARE_MS)),
        rule!(PackCollector, |s| !s.purchased_packs.is_empty()),
        rule!(PackEnthusiast, |s| s.purchased_packs.len() >= 3),
        rule!(PackLibrary, |s| s.purchased_packs.len() >= 5),
        rule!(PackExplorer, |s| s.used_packs.len() >= 3),
        AchievementRule {
            id: AchievementId::PackCompletionist,
            predicate: |stats, context| {
                if context.total_packs_available == 0 {
                    return Err(RuleError::Misconfigured(
                        "total_packs_available is zero".to_string(),
                    ));
                }
                Ok(stats.purchased_packs.len() >= context.total_packs_available)
            },
        },
    ]
}

/// Derives newly earned achievements from a statistics snapshot
pub struct AchievementRuleEngine {
    rules: Vec<AchievementRule>,
    context: RuleContext,
}

impl AchievementRuleEngine {
    pub fn new(total_packs_available: usize) -> Self {
        Self {
            rules: default_rules(),
            context: RuleContext {
                total_packs_available,
            },
        }
    }

    /// Ids whose predicate holds but which are not unlocked in `states`.
    ///
    /// Pure: `states` is not modified. `Completionist` is decided last, counting
    /// both stored unlocks and the ones found earlier in this pass. A rule that
    /// errors is skipped and the rest still run.
    pub fn evaluate(
        &self,
        stats: &GameStatistics,
        states: &AchievementStates,
    ) -> Vec<AchievementId> {
        let is_unlocked =
            |id: &AchievementId| states.get(id).is_some_and(|state| state.unlocked);

        let mut newly_unlocked: Vec<AchievementId> = Vec::new();

        for rule in &self.rules {
            if is_unlocked(&rule.id) {
                continue;
            }
            match rule.is_satisfied(stats, &self.context) {
                Ok(true) => newly_unlocked.push(rule.id),
                Ok(false) => {}
                Err(err) => {
                    warn!(achievement_id = %rule.id, %err, "Skipping achievement rule");
                }
            }
        }

        let completionist = AchievementId::Completionist;
        if !is_unlocked(&completionist) {
            let all_others_unlocked = AchievementId::iter()
                .filter(|id| *id != completionist)
                .all(|id| is_unlocked(&id) || newly_unlocked.contains(&id));
            if all_others_unlocked {
                newly_unlocked.push(completionist);
            }
        }

        debug!(
            newly_unlocked = newly_unlocked.len(),
            "Achievement rules evaluated"
        );
        newly_unlocked
    }
}
