//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources: the in-memory interview registry, the interview
//! engine, and the statistics store.

use crate::config::Config;
use crate::stats::StatsStore;
use coach_core::{interviewer::Interviewer, session::InterviewSession};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// The shared application state, created once at startup and passed to all
/// handlers.
///
/// Each interview lives behind its own mutex: the interview protocol is
/// strictly turn-based, so a session's handler holds the lock for the whole
/// operation, serializing model calls per session while leaving other
/// sessions untouched.
pub struct AppState {
    pub sessions: RwLock<HashMap<Uuid, Arc<Mutex<InterviewSession>>>>,
    pub interviewer: Arc<Interviewer>,
    pub stats: Arc<StatsStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(interviewer: Arc<Interviewer>, stats: Arc<StatsStore>, config: Arc<Config>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            interviewer,
            stats,
            config,
        }
    }
}
