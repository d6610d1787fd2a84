//! Core types for calpick.
//!
//! This crate holds everything the picker needs apart from drawing it:
//! - `reducer` and `state` for the range-selection state machine
//! - `calendar_math`, `locale` and `grid` for laying out a month
//! - `picker` and `pointer` for the host-side controller
//! - `store` for persisted calendar events

pub mod action;
pub mod calendar_math;
pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod grid;
pub mod locale;
pub mod picker;
pub mod pointer;
pub mod reducer;
pub mod state;
pub mod store;

// Re-export the state machine at crate root for convenience
pub use action::CalendarAction;
pub use date_range::DateRange;
pub use reducer::calendar_reducer;
pub use state::{CalendarState, PickerOptions, SelectionPhase};
