//! Encounter Engine - Turn order for TTRPG encounters
//!
//! Pure state transitions for initiative tracking: who acts next, how rounds
//! advance, surprise rounds, grouped turns, minion swarms, and the stat
//! column layout of the encounter screen.

pub mod config;
pub mod core;


pub use crate::core::encounter::{Encounter, EncounterError, Participant, TurnUpdate};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
