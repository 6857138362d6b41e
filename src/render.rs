//! Pushes annotator state into the Slint window.

use crate::assets::Assets;
use crate::callbacks::MapSession;
use crate::{AppWindow, IconChoice, LegendRow, MarkerData};
use factory_map::Icon;
use factory_map::map::{MarkerGeometry, Viewport};
use slint::{ModelRc, SharedString, VecModel};

/// Full re-sync after any state change.
pub fn sync(ui: &AppWindow, session: &MapSession, assets: &Assets) {
    let annotator = &session.annotator;
    let mode = annotator.mode();
    ui.set_edit_mode(mode.is_edit());
    ui.set_mode_label(mode.label().into());

    let selected = annotator.selected_category();
    let legends: Vec<LegendRow> = annotator
        .categories()
        .iter()
        .map(|c| LegendRow {
            name: c.name.as_str().into(),
            icon: assets.icon(Some(c.icon)),
            selected: selected == Some(c.name.as_str()),
        })
        .collect();
    ui.set_legends(ModelRc::new(VecModel::from(legends)));

    let markers: Vec<MarkerData> = annotator
        .pins()
        .iter()
        .map(|pin| MarkerData {
            id: pin.id.to_string().into(),
            lat: pin.position.lat as f32,
            lng: pin.position.lng as f32,
            icon: assets.icon(annotator.pin_icon(pin)),
            draggable: mode.is_edit(),
        })
        .collect();
    ui.set_markers(ModelRc::new(VecModel::from(markers)));

    sync_marker_geometry(ui, &MarkerGeometry::DEFAULT);
    sync_popup(ui, session);
    sync_dialog(ui, session, assets);
    sync_viewport(ui, &session.viewport);

    let status: SharedString = match annotator.storage_warning() {
        Some(warning) => format!("Alterações não salvas ({warning})").into(),
        None => SharedString::default(),
    };
    ui.set_status_text(status);
}

fn sync_marker_geometry(ui: &AppWindow, marker: &MarkerGeometry) {
    ui.set_marker_width(marker.size.0 as f32);
    ui.set_marker_height(marker.size.1 as f32);
    ui.set_marker_anchor_x(marker.anchor.0 as f32);
    ui.set_marker_anchor_y(marker.anchor.1 as f32);
    ui.set_popup_anchor_x(marker.popup_anchor.0 as f32);
    ui.set_popup_anchor_y(marker.popup_anchor.1 as f32);
}

fn sync_popup(ui: &AppWindow, session: &MapSession) {
    let annotator = &session.annotator;
    let interaction = annotator.interaction();
    let Some(pin) = interaction.open_pin().and_then(|id| annotator.pin(id)) else {
        ui.set_popup_visible(false);
        return;
    };
    ui.set_popup_visible(true);
    ui.set_popup_lat(pin.position.lat as f32);
    ui.set_popup_lng(pin.position.lng as f32);
    ui.set_popup_description(pin.description.as_str().into());
    ui.set_popup_editing(interaction.editing_pin().is_some());
    ui.set_popup_draft(interaction.draft().unwrap_or_default().into());
    ui.set_popup_show_actions(annotator.mode().is_edit());
}

fn sync_dialog(ui: &AppWindow, session: &MapSession, assets: &Assets) {
    let dialog = session.annotator.dialog();
    ui.set_dialog_open(dialog.is_open());
    ui.set_dialog_name(dialog.name().into());

    let choices: Vec<IconChoice> = Icon::ALL
        .into_iter()
        .map(|icon| IconChoice {
            name: icon.name().into(),
            icon: assets.icon(Some(icon)),
            chosen: dialog.icon() == Some(icon),
        })
        .collect();
    let (top, bottom) = choices.split_at(choices.len() / 2);
    ui.set_icon_choices_top(ModelRc::new(VecModel::from(top.to_vec())));
    ui.set_icon_choices_bottom(ModelRc::new(VecModel::from(bottom.to_vec())));
}

/// Cheap update used while panning and zooming.
pub fn sync_viewport(ui: &AppWindow, viewport: &Viewport) {
    let center = viewport.center();
    let bounds = viewport.bounds();
    ui.set_center_lat(center.lat as f32);
    ui.set_center_lng(center.lng as f32);
    ui.set_map_scale(viewport.scale() as f32);
    ui.set_bounds_north(bounds.north as f32);
    ui.set_bounds_south(bounds.south as f32);
    ui.set_bounds_east(bounds.east as f32);
    ui.set_bounds_west(bounds.west as f32);
}
