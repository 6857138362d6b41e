//! Pin annotations over a factory floor plan.
//!
//! - `annotator` - the state machine that owns pins, categories and UI state
//! - `pins`, `legends`, `icons` - the persisted data model
//! - `state` - transient UI state values
//! - `storage` - key-value snapshot persistence
//! - `map` - floor-plan bounds and the pan/zoom viewport
//! - `config` - TOML application settings

pub mod annotator;
pub mod config;
pub mod error;
pub mod icons;
pub mod legends;
pub mod map;
pub mod pins;
pub mod state;
pub mod storage;

pub use annotator::{Annotator, Ignored, Outcome};
pub use error::{ConfigError, StorageError, UnknownIcon};
pub use icons::Icon;
pub use legends::{Category, CategoryMap};
pub use pins::{DEFAULT_DESCRIPTION, LatLng, Pin, PinId, PinSet};
