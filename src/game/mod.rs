// Public API
pub use coordinator::GameRoundCoordinator;
pub use models::{
    AnswerResult, DareResult, GamePhase, GameSettings, GameSummary, RoundError, Standing,
};
pub use multiplayer::{
    GameStatus, MultiplayerError, MultiplayerSession, ScoreUpdate, SharedGameState,
    SharedStateChannel, TurnApplication, TurnInput, TurnKind, TurnResult,
};
pub use question_source::{
    AnswerChoice, InMemoryQuestionSource, QuestionRecord, QuestionSource, QuestionSourceError,
};

// Internal modules
mod coordinator;
mod models;
mod multiplayer;
mod question_source;
