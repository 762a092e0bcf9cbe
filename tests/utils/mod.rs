pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use mocks::{FlakyKeyValueStore, RecordingChannel, RecordingSink};
#[allow(unused_imports)]
pub use setup::{question_pack, TestSetup, TestSetupBuilder};
