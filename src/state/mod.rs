//! Transient UI state for the annotator.
//!
//! This module contains the non-persisted state values:
//! - `Mode` - edit vs. explore
//! - `Interaction` - which pin popup is open and whether it is being edited
//! - `CategoryDialog` - the "Adicionar Legenda" dialog and its fields

mod dialog;
mod interaction;

pub use dialog::*;
pub use interaction::*;
