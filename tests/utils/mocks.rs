use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use triviadare::{
    event::{EngineEvent, EventError, NotificationSink},
    game::{MultiplayerError, ScoreUpdate, SharedStateChannel},
    storage::{InMemoryKeyValueStore, KeyValueStore, StorageError},
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// In-memory store whose writes can be made to fail, counting every write
#[derive(Clone, Default)]
pub struct FlakyKeyValueStore {
    inner: InMemoryKeyValueStore,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FlakyKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.raw(key).await
    }
}

#[async_trait]
impl KeyValueStore for FlakyKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed {
                key: key.to_string(),
                reason: "storage unavailable".to_string(),
            });
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }
}

/// Notification sink that remembers everything it was handed
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<RwLock<Vec<EngineEvent>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<EngineEvent> {
        self.events.read().await.clone()
    }

    pub async fn unlocked_ids(&self) -> Vec<String> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| matches!(e, EngineEvent::AchievementUnlocked { .. }))
            .map(|e| e.achievement_id().to_string())
            .collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, event: EngineEvent) -> Result<(), EventError> {
        self.events.write().await.push(event);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RecordingSink"
    }
}

/// Shared-state channel that records published score updates
#[derive(Clone, Default)]
pub struct RecordingChannel {
    published: Arc<RwLock<Vec<ScoreUpdate>>>,
    offline: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn published(&self) -> Vec<ScoreUpdate> {
        self.published.read().await.clone()
    }
}

#[async_trait]
impl SharedStateChannel for RecordingChannel {
    async fn publish_score(&self, update: &ScoreUpdate) -> Result<(), MultiplayerError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(MultiplayerError::Channel("connection lost".to_string()));
        }
        self.published.write().await.push(update.clone());
        Ok(())
    }
}
