//! Pin popup callbacks.
//!
//! Handles: popup_edit, popup_delete, popup_close, popup_save,
//! popup_draft_edited, clear_pins_requested

use super::{SharedSession, refocus, refresh};
use crate::AppWindow;
use crate::assets::Assets;
use slint::ComponentHandle;
use std::rc::Rc;

pub fn setup_pin_callbacks(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    setup_popup_edit(ui, session.clone(), assets.clone());
    setup_popup_delete(ui, session.clone(), assets.clone());
    setup_popup_close(ui, session.clone(), assets.clone());
    setup_popup_save(ui, session.clone(), assets.clone());
    setup_popup_draft_edited(ui, session.clone());
    setup_clear_pins(ui, session, assets);
}

fn setup_popup_edit(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_popup_edit(move || {
        let mut state = session.borrow_mut();
        let Some(id) = state.annotator.interaction().open_pin() else {
            return;
        };
        if state.annotator.begin_edit(id).is_applied() {
            refresh(&ui_weak, &state, &assets);
        }
    });
}

fn setup_popup_delete(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_popup_delete(move || {
        let mut state = session.borrow_mut();
        let Some(id) = state.annotator.interaction().open_pin() else {
            return;
        };
        if state.annotator.delete_pin(id).is_applied() {
            refresh(&ui_weak, &state, &assets);
        }
    });
}

fn setup_popup_close(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_popup_close(move || {
        let mut state = session.borrow_mut();
        if state.annotator.close_popup().is_applied() {
            refresh(&ui_weak, &state, &assets);
        }
    });
}

fn setup_popup_save(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_popup_save(move || {
        let mut state = session.borrow_mut();
        if state.annotator.save_edit().is_applied() {
            refresh(&ui_weak, &state, &assets);
            refocus(&ui_weak);
        }
    });
}

// The draft lives in the text field while typing; no re-render, or the field
// would be rebuilt under the cursor.
fn setup_popup_draft_edited(ui: &AppWindow, session: SharedSession) {
    ui.on_popup_draft_edited(move |text| {
        session.borrow_mut().annotator.set_draft(&text);
    });
}

fn setup_clear_pins(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_clear_pins_requested(move || {
        let mut state = session.borrow_mut();
        state.annotator.clear_pins();
        refresh(&ui_weak, &state, &assets);
        refocus(&ui_weak);
    });
}
