//! A small virtual pet: four stats that slowly decay, four ways to look
//! after them, and a terminal front end that shows how the pet is doing.

pub mod activity;
pub mod app;
pub mod config;
mod input;
pub mod logging;
pub mod mood;
pub mod pet;
mod render;

pub use activity::{ActivityLog, LogEntry};
pub use pet::{Action, Activity, Outcome, PetState, Stat, Stats};
