//! Callback handlers for the map annotator.
//!
//! This module wires every UI callback to the annotator, organized by functionality:
//! - `mode` - the global "M" key
//! - `map` - surface clicks, pan, zoom, marker clicks and drags
//! - `pins` - popup actions and "Limpar Pinos"
//! - `legends` - legend panel and the category dialog

pub mod legends;
pub mod map;
pub mod mode;
pub mod pins;

use crate::AppWindow;
use crate::assets::Assets;
use crate::render;
use factory_map::Annotator;
use factory_map::map::Viewport;
use factory_map::storage::KeyValueStore;
use std::cell::RefCell;
use std::rc::Rc;

pub type AppAnnotator = Annotator<Box<dyn KeyValueStore>>;

/// Everything the callbacks mutate: the annotator and the map viewport.
pub struct MapSession {
    pub annotator: AppAnnotator,
    pub viewport: Viewport,
}

pub type SharedSession = Rc<RefCell<MapSession>>;

/// Sets up all callbacks on the UI.
pub fn setup_all(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    mode::setup_mode_callbacks(ui, session.clone(), assets.clone());
    map::setup_map_callbacks(ui, session.clone(), assets.clone());
    pins::setup_pin_callbacks(ui, session.clone(), assets.clone());
    legends::setup_legend_callbacks(ui, session, assets);
}

/// Re-renders after a state change, if the window still exists.
pub(crate) fn refresh(ui_weak: &slint::Weak<AppWindow>, session: &MapSession, assets: &Assets) {
    if let Some(ui) = ui_weak.upgrade() {
        render::sync(&ui, session, assets);
    }
}

/// Gives keyboard focus back to the window so the mode key keeps working
/// after a text field disappears.
pub(crate) fn refocus(ui_weak: &slint::Weak<AppWindow>) {
    if let Some(ui) = ui_weak.upgrade() {
        ui.invoke_focus_keys();
    }
}
