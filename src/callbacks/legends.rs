//! Legend panel and category dialog callbacks.
//!
//! Handles: legend_selected, legend_deleted, add_legend_requested,
//! dialog_name_edited, dialog_icon_chosen, dialog_saved, dialog_cancelled

use super::{SharedSession, refocus, refresh};
use crate::AppWindow;
use crate::assets::Assets;
use factory_map::Icon;
use slint::ComponentHandle;
use std::rc::Rc;

pub fn setup_legend_callbacks(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    setup_legend_selected(ui, session.clone(), assets.clone());
    setup_legend_deleted(ui, session.clone(), assets.clone());
    setup_add_legend(ui, session.clone(), assets.clone());
    setup_dialog_name_edited(ui, session.clone());
    setup_dialog_icon_chosen(ui, session.clone(), assets.clone());
    setup_dialog_saved(ui, session.clone(), assets.clone());
    setup_dialog_cancelled(ui, session, assets);
}

fn setup_legend_selected(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_legend_selected(move |name| {
        let mut state = session.borrow_mut();
        if state.annotator.select_category(&name).is_applied() {
            refresh(&ui_weak, &state, &assets);
        }
    });
}

fn setup_legend_deleted(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_legend_deleted(move |name| {
        let mut state = session.borrow_mut();
        if state.annotator.delete_category(&name).is_applied() {
            refresh(&ui_weak, &state, &assets);
        }
    });
}

fn setup_add_legend(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_add_legend_requested(move || {
        let mut state = session.borrow_mut();
        state.annotator.open_category_dialog();
        refresh(&ui_weak, &state, &assets);
    });
}

fn setup_dialog_name_edited(ui: &AppWindow, session: SharedSession) {
    ui.on_dialog_name_edited(move |text| {
        session.borrow_mut().annotator.set_dialog_name(&text);
    });
}

fn setup_dialog_icon_chosen(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_dialog_icon_chosen(move |name| {
        let icon: Icon = match name.parse() {
            Ok(icon) => icon,
            Err(e) => {
                tracing::warn!("{e}");
                return;
            }
        };
        let mut state = session.borrow_mut();
        if state.annotator.choose_dialog_icon(icon).is_applied() {
            refresh(&ui_weak, &state, &assets);
        }
    });
}

fn setup_dialog_saved(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_dialog_saved(move || {
        let mut state = session.borrow_mut();
        if state.annotator.save_category_dialog().is_applied() {
            refresh(&ui_weak, &state, &assets);
            refocus(&ui_weak);
        }
    });
}

fn setup_dialog_cancelled(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_dialog_cancelled(move || {
        let mut state = session.borrow_mut();
        state.annotator.cancel_category_dialog();
        refresh(&ui_weak, &state, &assets);
        refocus(&ui_weak);
    });
}
