//! High score leaderboard and score submission
//!
//! Scores are handed to a [`ScoreStore`] on a background thread so a slow or
//! failing store never stalls the frame loop. The default store keeps a local
//! top-10 leaderboard in a JSON file.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A submitted score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player tag (1-4 uppercase letters)
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl ScoreRecord {
    /// Record stamped with the current wall-clock time
    pub fn now(name: &str, score: u64) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0);
        Self {
            name: name.to_string(),
            score,
            timestamp,
        }
    }
}

/// Errors from a score store
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}

/// Destination for finished runs
pub trait ScoreStore: Send {
    fn submit(&mut self, record: &ScoreRecord) -> Result<(), ScoreStoreError>;
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HighScores {
    pub entries: Vec<ScoreRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a record to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add(&mut self, record: ScoreRecord) -> Option<usize> {
        if !self.qualifies(record.score) {
            return None;
        }

        // Sorted descending by score; ties keep the earlier run first
        let pos = self.entries.iter().position(|e| record.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Load a leaderboard file. A missing file is an empty board.
    pub fn load(path: &Path) -> Result<Self, ScoreStoreError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let scores: HighScores = serde_json::from_str(&json)?;
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ScoreStoreError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Local top-10 leaderboard file
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for LeaderboardStore {
    fn submit(&mut self, record: &ScoreRecord) -> Result<(), ScoreStoreError> {
        let mut scores = HighScores::load(&self.path)?;
        match scores.add(record.clone()) {
            Some(rank) => {
                log::info!("{} placed #{} with {}", record.name, rank, record.score);
                scores.save(&self.path)
            }
            None => {
                log::info!("{} did not place ({})", record.name, record.score);
                Ok(())
            }
        }
    }
}

/// Store that only logs (no path configured)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogStore;

impl ScoreStore for LogStore {
    fn submit(&mut self, record: &ScoreRecord) -> Result<(), ScoreStoreError> {
        log::info!("Score: {} {}", record.name, record.score);
        Ok(())
    }
}

/// Store that keeps records in memory (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything submitted so far
    pub fn records(&self) -> Vec<ScoreRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl ScoreStore for MemoryStore {
    fn submit(&mut self, record: &ScoreRecord) -> Result<(), ScoreStoreError> {
        self.records
            .lock()
            .map_err(|_| ScoreStoreError::Unavailable("record list poisoned".to_string()))?
            .push(record.clone());
        Ok(())
    }
}

/// Hands records to a store on a worker thread
pub struct ScoreSubmitter {
    sender: Option<mpsc::Sender<ScoreRecord>>,
    worker: Option<JoinHandle<()>>,
}

impl ScoreSubmitter {
    /// Start the worker. If the thread can't be started, submissions are
    /// logged and dropped.
    pub fn spawn(mut store: Box<dyn ScoreStore>) -> Self {
        let (tx, rx) = mpsc::channel::<ScoreRecord>();
        let worker = std::thread::Builder::new()
            .name("score-submitter".to_string())
            .spawn(move || {
                // Ends once every sender is dropped
                for record in rx {
                    match store.submit(&record) {
                        Ok(()) => log::info!("Submitted score {} for {}", record.score, record.name),
                        Err(e) => log::error!("Score submission failed: {}", e),
                    }
                }
            });

        match worker {
            Ok(handle) => Self {
                sender: Some(tx),
                worker: Some(handle),
            },
            Err(e) => {
                log::error!("Could not start score submitter: {}", e);
                Self {
                    sender: None,
                    worker: None,
                }
            }
        }
    }

    /// Queue a record. Never blocks.
    pub fn submit(&self, record: ScoreRecord) {
        let Some(sender) = &self.sender else {
            log::error!("Score submitter not running; dropping {:?}", record);
            return;
        };
        if sender.send(record).is_err() {
            log::error!("Score submitter stopped; score dropped");
        }
    }

    /// Flush pending submissions and stop the worker
    pub fn shutdown(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Score submitter thread panicked");
            }
        }
    }
}

impl Drop for ScoreSubmitter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, score: u64) -> ScoreRecord {
        ScoreRecord {
            name: name.to_string(),
            score,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_leaderboard_ordering() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add(record("AAA", 50)), Some(1));
        assert_eq!(scores.add(record("BBB", 80)), Some(1));
        assert_eq!(scores.add(record("CCC", 60)), Some(2));
        // Ties go after the existing entry
        assert_eq!(scores.add(record("DDD", 60)), Some(3));
        let order: Vec<_> = scores.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, ["BBB", "CCC", "DDD", "AAA"]);
        assert_eq!(scores.entries[0].score, 80);
    }

    #[test]
    fn test_leaderboard_keeps_top_ten() {
        let mut scores = HighScores::new();
        for s in 1..=10 {
            scores.add(record("AAA", s * 10));
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add(record("NEW", 55)), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn test_leaderboard_store_persists() {
        let path = std::env::temp_dir().join(format!(
            "neon_runner_scores_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = LeaderboardStore::new(&path);
        store.submit(&record("AAA", 12)).unwrap();
        store.submit(&record("BBB", 30)).unwrap();

        let scores = HighScores::load(&path).unwrap();
        assert_eq!(scores.entries.len(), 2);
        assert_eq!(scores.entries[0].name, "BBB");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "neon_runner_bad_scores_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "[not json").unwrap();
        assert!(matches!(
            HighScores::load(&path),
            Err(ScoreStoreError::Format(_))
        ));
        let _ = std::fs::remove_file(&path);
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn submit(&mut self, _record: &ScoreRecord) -> Result<(), ScoreStoreError> {
            Err(ScoreStoreError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_submitter_delivers_in_order() {
        let store = MemoryStore::new();
        let mut submitter = ScoreSubmitter::spawn(Box::new(store.clone()));
        submitter.submit(record("AAA", 1));
        submitter.submit(record("BBB", 2));
        submitter.shutdown();
        let names: Vec<_> = store.records().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["AAA", "BBB"]);
    }

    #[test]
    fn test_submitter_swallows_store_errors() {
        let mut submitter = ScoreSubmitter::spawn(Box::new(FailingStore));
        submitter.submit(record("AAA", 1));
        submitter.shutdown();
        // Submitting after shutdown is logged, not a panic
        submitter.submit(record("BBB", 2));
    }
}
