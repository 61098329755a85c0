//! Observer API server for the Biome simulation.
//!
//! This crate provides an Axum HTTP server that serves a finished run:
//!
//! - **Render feed** (`/api/simulation`) for the animation page
//! - **Final state** (`/api/state`) as YAML, optionally as a download
//! - **Health** (`/api/health`) with the published run id
//!
//! # Architecture
//!
//! The engine runs the simulation to completion, writes its outputs and
//! then publishes a [`PublishedRun`] into the shared [`AppState`]. The
//! handlers only ever read that published copy.
//!
//! [`PublishedRun`]: state::PublishedRun

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, PublishedRun};
