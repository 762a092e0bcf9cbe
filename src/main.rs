use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triviadare::{
    config::EngineConfig,
    event::EventBus,
    game::{AnswerChoice, GamePhase, GameRoundCoordinator, GameSettings, QuestionRecord},
    shared::EngineContext,
    stats::GameMode,
    storage::InMemoryKeyValueStore,
};

const DEMO_PACK: &str = "demo";
const PLAYER_COUNT: usize = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triviadare=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let event_bus = EventBus::new(config.event_capacity);
    let mut notifications = event_bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = notifications.recv().await {
            info!(
                event_type = event.event_type(),
                achievement_id = event.achievement_id(),
                "Notification"
            );
        }
    });

    let context = EngineContext::initialize(
        config.clone(),
        Arc::new(InMemoryKeyValueStore::new()),
        Arc::new(event_bus),
    )
    .await;

    let players: Vec<String> = (0..PLAYER_COUNT)
        .map(|_| petname::Petnames::default().generate_one(2, "-"))
        .collect();
    info!(?players, "Starting simulated TriviaDare game");

    let settings = GameSettings {
        players,
        mode: GameMode::TriviaDare,
        timer: config.default_timer,
        pack_name: DEMO_PACK.to_string(),
        question_count: 6,
    };

    let mut game = match context.new_game(settings, demo_questions(6)) {
        Ok(game) => game,
        Err(err) => {
            error!(error = %err, "Could not set up the game");
            std::process::exit(1);
        }
    };

    if let Err(err) = play(&mut game).await {
        error!(error = %err, "Simulation aborted");
        std::process::exit(1);
    }

    let summary = game.summary();
    for standing in &summary.standings {
        info!(player = %standing.player, score = standing.score, "Final score");
    }
    match &summary.winner {
        Some(winner) => info!(%winner, "Winner"),
        None => info!("Game ended in a tie"),
    }

    let progress = context.achievements.progress().await;
    info!(
        unlocked = progress.unlocked,
        total = progress.total,
        "Achievement progress"
    );
}

/// Plays the game with random answers and dare outcomes
async fn play(game: &mut GameRoundCoordinator) -> Result<(), triviadare::game::RoundError> {
    let limit = f64::from(game.settings().timer.time_limit_seconds);
    let mut phase = game.start().await?;

    loop {
        phase = match phase {
            GamePhase::AwaitingAnswer { .. } => {
                let choice = if rand::random_bool(0.15) {
                    None
                } else {
                    Some(if rand::random_bool(0.6) {
                        AnswerChoice::A
                    } else {
                        AnswerChoice::C
                    })
                };
                let seconds_remaining = rand::random_range(0.0..limit);
                let answer_time_ms = ((limit - seconds_remaining) * 1000.0) as u64;

                let result = match choice {
                    Some(choice) => {
                        game.submit_answer(Some(choice), seconds_remaining, answer_time_ms)
                            .await?
                    }
                    None => game.time_expired().await?,
                };
                result.next_phase
            }
            GamePhase::AwaitingDare { .. } => {
                let preview = game.dare_preview()?;
                info!(
                    worth = preview.final_dare_points,
                    player = game.current_player().unwrap_or_default(),
                    "Dare offered"
                );

                let result = if rand::random_bool(0.7) {
                    let time_ms = rand::random_range(3_000..30_000);
                    game.resolve_dare(true, Some(time_ms)).await?
                } else {
                    game.skip_dare().await?
                };
                result.next_phase
            }
            GamePhase::Completed => break,
            GamePhase::NotStarted => {
                warn!("Game fell back to not started");
                break;
            }
        };
    }

    Ok(())
}

fn demo_questions(count: usize) -> Vec<QuestionRecord> {
    (1..=count)
        .map(|n| QuestionRecord {
            question_id: format!("demo-{n}"),
            question_text: format!("What is {n} + {n}?"),
            option_a: (n * 2).to_string(),
            option_b: (n * 2 + 1).to_string(),
            option_c: (n * 3).to_string(),
            option_d: (n * 2 - 1).to_string(),
            correct_answer: "A".to_string(),
            difficulty: "Easy".to_string(),
        })
        .collect()
}
