//! Pure layout logic for HabLayout.
//!
//! This crate contains the habitat geometry and zone rule engine, independent
//! of any UI or runtime. Functions take plain data and return results, making
//! them unit-testable and safe to call after every edit: there is no hidden
//! state, so identical inputs always produce identical output.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Zone names, minimum-area rule table, ceiling height |
//! | [`error`] | `LayoutError` taxonomy and `Result` alias |
//! | [`export`] | One-shot JSON export document |
//! | [`layout`] | Editable layout model, zone edits, whole-layout validation |
//! | [`rules`] | Zone/mission types and the rule evaluator |
//! | [`shape`] | Shell presets, volume and floor-area formulas |

pub mod constants;
pub mod error;
pub mod export;
pub mod layout;
pub mod rules;
pub mod shape;

pub use error::{LayoutError, Result};
