//! Interview Coach API Library Crate
//!
//! This library contains all the logic for the interview-coach web service:
//! the application state, API handlers, routing, configuration, and the
//! statistics store. The `api` binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod stats;
