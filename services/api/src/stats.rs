//! Daily usage statistics.
//!
//! One JSON file per day under the configured statistics directory. The
//! store is the only state shared across interviews, so every update runs as
//! a read-modify-write under an internal lock. Statistics are best-effort:
//! IO problems are logged and swallowed, they never fail an interview.

use chrono::{DateTime, NaiveDate, Utc};
use coach_core::catalog::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::warn;

/// Counters for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub total_interviews: u64,
    pub completed_interviews: u64,
    pub position_distribution: BTreeMap<String, u64>,
    pub success_count: u64,
    pub last_updated: DateTime<Utc>,
}

impl DailyStats {
    fn empty() -> Self {
        let mut position_distribution = BTreeMap::new();
        for position in Position::ALL {
            position_distribution.insert(position.as_str().to_string(), 0);
        }
        Self {
            total_interviews: 0,
            completed_interviews: 0,
            position_distribution,
            success_count: 0,
            last_updated: Utc::now(),
        }
    }

    pub fn completion_rate(&self) -> f64 {
        if self.total_interviews == 0 {
            return 0.0;
        }
        self.completed_interviews as f64 / self.total_interviews as f64 * 100.0
    }

    pub fn success_rate(&self) -> f64 {
        if self.completed_interviews == 0 {
            return 0.0;
        }
        self.success_count as f64 / self.completed_interviews as f64 * 100.0
    }
}

/// File-backed store for [`DailyStats`].
pub struct StatsStore {
    dir: PathBuf,
    guard: Mutex<()>,
}

impl StatsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            guard: Mutex::new(()),
        }
    }

    fn path_for(&self, day: NaiveDate) -> PathBuf {
        self.dir.join(format!("stats_{day}.json"))
    }

    fn load(&self, day: NaiveDate) -> DailyStats {
        let path = self.path_for(day);
        if !path.exists() {
            return DailyStats::empty();
        }
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(stats) => stats,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "statistics file is corrupt, starting fresh");
                    DailyStats::empty()
                }
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read statistics file");
                DailyStats::empty()
            }
        }
    }

    fn save(&self, day: NaiveDate, mut stats: DailyStats) {
        stats.last_updated = Utc::now();
        let path = self.path_for(day);
        if let Err(err) = self.try_save(&path, &stats) {
            warn!(path = %path.display(), error = %err, "failed to write statistics file");
        }
    }

    fn try_save(&self, path: &Path, stats: &DailyStats) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Counts a newly started interview for a position.
    pub async fn record_started(&self, position: Position) {
        let _guard = self.guard.lock().await;
        let day = Utc::now().date_naive();
        let mut stats = self.load(day);
        stats.total_interviews += 1;
        *stats
            .position_distribution
            .entry(position.as_str().to_string())
            .or_insert(0) += 1;
        self.save(day, stats);
    }

    /// Counts a completed interview, and a successful one when the mean
    /// completion score reached the bar.
    pub async fn record_completed(&self, success: bool) {
        let _guard = self.guard.lock().await;
        let day = Utc::now().date_naive();
        let mut stats = self.load(day);
        stats.completed_interviews += 1;
        if success {
            stats.success_count += 1;
        }
        self.save(day, stats);
    }

    /// Today's counters.
    pub async fn today(&self) -> DailyStats {
        let _guard = self.guard.lock().await;
        self.load(Utc::now().date_naive())
    }

    /// Deletes statistics files older than `days_to_keep` days. Returns how
    /// many files were removed.
    pub async fn cleanup_old(&self, days_to_keep: i64) -> usize {
        let _guard = self.guard.lock().await;
        let today = Utc::now().date_naive();
        let mut removed = 0;

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(day) = parse_stats_file_date(&path) else {
                continue;
            };
            if (today - day).num_days() > days_to_keep {
                match fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "failed to remove old statistics file");
                    }
                }
            }
        }
        removed
    }
}

fn parse_stats_file_date(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    let date = stem.strip_prefix("stats_")?;
    date.parse().ok()
}
