//! Map surface callbacks.
//!
//! Handles: map_resized, map_clicked, map_panned, map_zoomed, marker_clicked,
//! marker_dragged
//!
//! The surface reports its size when laid out and on every change. Pointer
//! events carry it too, so the viewport never works from a stale size.

use super::{MapSession, SharedSession, refresh};
use crate::AppWindow;
use crate::assets::Assets;
use crate::render;
use factory_map::PinId;
use slint::ComponentHandle;
use std::rc::Rc;

pub fn setup_map_callbacks(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    setup_map_resized(ui, session.clone());
    setup_map_clicked(ui, session.clone(), assets.clone());
    setup_map_panned(ui, session.clone());
    setup_map_zoomed(ui, session.clone());
    setup_marker_clicked(ui, session.clone(), assets.clone());
    setup_marker_dragged(ui, session, assets);
}

fn resize(state: &mut MapSession, width: f32, height: f32) {
    state.viewport.resize(width as f64, height as f64);
}

fn parse_pin_id(raw: &str) -> Option<PinId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("bad marker id '{raw}': {e}");
            None
        }
    }
}

fn setup_map_resized(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_map_resized(move |width, height| {
        let mut state = session.borrow_mut();
        resize(&mut state, width, height);
        if let Some(ui) = ui_weak.upgrade() {
            render::sync_viewport(&ui, &state.viewport);
        }
    });
}

fn setup_map_clicked(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_map_clicked(move |x, y, width, height| {
        let mut state = session.borrow_mut();
        resize(&mut state, width, height);
        let at = state.viewport.unproject(x as f64, y as f64);
        if state.annotator.map_click(at).is_applied() {
            refresh(&ui_weak, &state, &assets);
        }
    });
}

fn setup_map_panned(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_map_panned(move |dx, dy, width, height| {
        let mut state = session.borrow_mut();
        resize(&mut state, width, height);
        state.viewport.pan_by(dx as f64, dy as f64);
        if let Some(ui) = ui_weak.upgrade() {
            render::sync_viewport(&ui, &state.viewport);
        }
    });
}

fn setup_map_zoomed(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_map_zoomed(move |x, y, delta, width, height| {
        if delta == 0.0 {
            return;
        }
        let mut state = session.borrow_mut();
        resize(&mut state, width, height);
        state.viewport.zoom_at(x as f64, y as f64, delta.signum() as f64);
        tracing::trace!(zoom = state.viewport.zoom(), "zoomed");
        if let Some(ui) = ui_weak.upgrade() {
            render::sync_viewport(&ui, &state.viewport);
        }
    });
}

fn setup_marker_clicked(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_marker_clicked(move |id| {
        let Some(id) = parse_pin_id(&id) else { return };
        let mut state = session.borrow_mut();
        if state.annotator.open_popup(id).is_applied() {
            refresh(&ui_weak, &state, &assets);
        }
    });
}

fn setup_marker_dragged(ui: &AppWindow, session: SharedSession, assets: Rc<Assets>) {
    let ui_weak = ui.as_weak();
    ui.on_marker_dragged(move |id, dx, dy| {
        let Some(id) = parse_pin_id(&id) else { return };
        let mut state = session.borrow_mut();
        let Some(from) = state.annotator.pin(id).map(|p| p.position) else {
            return;
        };
        let to = state.viewport.offset_by_pixels(from, dx as f64, dy as f64);
        state.annotator.move_pin(id, to);
        // Re-render either way so a refused drag snaps back.
        refresh(&ui_weak, &state, &assets);
    });
}
