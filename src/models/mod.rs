//! Domain models for PlantHub.
//!
//! # Core Concepts
//!
//! - [`Plant`]: A cataloged specimen in the user's collection. Created by
//!   explicit user action, mutated by care actions and edits, never deleted
//!   automatically.
//! - [`Task`]: A scheduled or completed care action owned by a plant. The
//!   owning plant may have been removed since; such orphaned tasks are kept
//!   and rendered with a placeholder label.
//! - [`JournalEntry`]: A diary record, optionally scoped to a plant. The
//!   journal is kept newest-first.
//! - [`RoomLayout`]: Spatial placement of plants in the visual room, plus the
//!   room's cosmetic settings.
//! - [`Settings`]: Global user preferences, a singleton merged partially.
//! - [`Stats`]: Derived counters. A cache over the other collections, never
//!   independently authored.

mod journal;
mod plant;
mod room;
mod settings;
mod stats;
mod task;

pub use journal::*;
pub use plant::*;
pub use room::*;
pub use settings::*;
pub use stats::*;
pub use task::*;
