//! Infrastructure layer for filesystem and environment interactions.
//!
//! The Zellij plugin sandbox mounts the host filesystem under `/host`; the
//! helpers here translate user-facing paths (seed and theme files, the trace
//! output directory) into sandbox paths.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
