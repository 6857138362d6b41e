//! Global key handling.
//!
//! Handles: key_typed

use super::{SharedSession, refresh};
use crate::AppWindow;
use crate::assets::Assets;
use slint::ComponentHandle;
use std::rc::Rc;

pub fn setup_mode_callbacks(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    setup_key_typed(ui, session, assets);
}

fn setup_key_typed(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_key_typed(move |text| {
        let mut state = session.borrow_mut();
        let consumed = state.annotator.handle_key(&text);
        if consumed {
            tracing::info!("{}", state.annotator.mode().label());
            refresh(&ui_weak, &state, &assets);
        }
        consumed
    });
}
