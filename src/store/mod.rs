//! In-memory state for the review session.
//!
//! Nothing here is persisted: actions are seeded once at startup and reset
//! when the plugin reloads.
//!
//! # Modules
//!
//! - `actions`: The canonical action collection and its status primitive
//! - `history`: Undo stack of status-change snapshots
//! - `seed`: Seed data sources (embedded demo list, JSON file)

pub mod actions;
pub mod history;
pub mod seed;

pub use actions::ActionStore;
pub use history::{HistoryEntry, UndoHistory};
pub use seed::{parse_seed, EmbeddedSeed, JsonFileSeed, SeedRecord, SeedSource};
