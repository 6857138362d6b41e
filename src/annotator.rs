//! The annotator state machine.
//!
//! [`Annotator`] owns the pins, the categories and every piece of transient UI
//! state. Each operation runs to completion, leaves the state consistent, and
//! mirrors the touched collection into the key-value store as a full snapshot.
//!
//! Invalid actions never fail: they return [`Outcome::Ignored`] with the
//! reason and leave the state untouched. Storage failures never fail either:
//! the in-memory state keeps the change and [`Annotator::storage_warning`]
//! reports that the session is no longer being saved. The warning is tracked
//! per key and only goes away once every failed key has been written again.

use crate::error::StorageError;
use crate::icons::Icon;
use crate::legends::CategoryMap;
use crate::pins::{LatLng, Pin, PinId, PinSet};
use crate::state::{CategoryDialog, Interaction, Mode, is_mode_key};
use crate::storage::{CATEGORIES_KEY, KeyValueStore, PINS_KEY, load_snapshot, save_snapshot};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(Ignored),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Why an action had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    ExploreMode,
    NoCategorySelected,
    PopupOpen,
    EditInProgress,
    NotEditing,
    UnknownPin,
    UnknownCategory,
    EmptyName,
    NoIconChosen,
    DialogClosed,
    Unchanged,
}

pub struct Annotator<S: KeyValueStore> {
    store: S,
    pins: PinSet,
    categories: CategoryMap,
    mode: Mode,
    interaction: Interaction,
    dialog: CategoryDialog,
    selected: Option<String>,
    /// Last write error per key that is currently out of sync with memory.
    unsaved: BTreeMap<&'static str, String>,
}

impl<S: KeyValueStore> Annotator<S> {
    /// Loads both snapshots from `store`. Missing or malformed records start empty.
    pub fn load(store: S) -> Self {
        let pins: PinSet = load_snapshot(&store, PINS_KEY);
        let categories: CategoryMap = load_snapshot(&store, CATEGORIES_KEY);
        tracing::info!(
            pins = pins.len(),
            categories = categories.len(),
            "loaded annotator state"
        );
        Self {
            store,
            pins,
            categories,
            mode: Mode::default(),
            interaction: Interaction::default(),
            dialog: CategoryDialog::default(),
            selected: None,
            unsaved: BTreeMap::new(),
        }
    }

    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    pub fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.get(id)
    }

    pub fn categories(&self) -> &CategoryMap {
        &self.categories
    }

    /// Icon of the category a pin belongs to.
    pub fn pin_icon(&self, pin: &Pin) -> Option<Icon> {
        self.categories.icon(&pin.category)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn dialog(&self) -> &CategoryDialog {
        &self.dialog
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Set while the last write to storage failed; the session then lives in
    /// memory only until a later write succeeds.
    pub fn storage_warning(&self) -> Option<&str> {
        self.unsaved.values().next().map(String::as_str)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ---------------------------------------------------------------------
    // Mode
    // ---------------------------------------------------------------------

    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        tracing::debug!(mode = ?self.mode, "mode toggled");
        self.mode
    }

    /// Global key handler. Returns true when the key was consumed.
    pub fn handle_key(&mut self, text: &str) -> bool {
        if is_mode_key(text) {
            self.toggle_mode();
            true
        } else {
            false
        }
    }

    // ---------------------------------------------------------------------
    // Pins
    // ---------------------------------------------------------------------

    /// A click on the map surface at a logical coordinate.
    pub fn map_click(&mut self, at: LatLng) -> Outcome {
        match self.interaction {
            Interaction::Viewing { .. } => {
                self.interaction = Interaction::Idle;
                Outcome::Applied
            }
            _ => self.place_pin(at),
        }
    }

    /// Creates a pin of the selected category at `at`.
    pub fn place_pin(&mut self, at: LatLng) -> Outcome {
        if !self.mode.is_edit() {
            return ignored(Ignored::ExploreMode);
        }
        if !self.interaction.allows_placement() {
            return ignored(Ignored::PopupOpen);
        }
        let Some(category) = self.selected.clone() else {
            return ignored(Ignored::NoCategorySelected);
        };
        if !self.categories.contains(&category) {
            return ignored(Ignored::UnknownCategory);
        }

        let id = self.pins.create(at, &category);
        tracing::debug!(%id, lat = at.lat, lng = at.lng, %category, "pin placed");
        self.persist_pins();
        Outcome::Applied
    }

    /// Marker drag ended at `to`.
    pub fn move_pin(&mut self, id: PinId, to: LatLng) -> Outcome {
        if !self.mode.is_edit() {
            return ignored(Ignored::ExploreMode);
        }
        let Some(pin) = self.pins.get_mut(id) else {
            return ignored(Ignored::UnknownPin);
        };
        pin.position = to;
        tracing::debug!(%id, lat = to.lat, lng = to.lng, "pin moved");
        self.persist_pins();
        Outcome::Applied
    }

    /// Marker clicked: show its read view.
    pub fn open_popup(&mut self, id: PinId) -> Outcome {
        if !self.pins.contains(id) {
            return ignored(Ignored::UnknownPin);
        }
        if self.interaction.editing_pin().is_some() {
            return ignored(Ignored::EditInProgress);
        }
        self.interaction = Interaction::Viewing { pin: id };
        Outcome::Applied
    }

    pub fn close_popup(&mut self) -> Outcome {
        match self.interaction {
            Interaction::Idle => ignored(Ignored::Unchanged),
            Interaction::Viewing { .. } => {
                self.interaction = Interaction::Idle;
                Outcome::Applied
            }
            Interaction::Editing { .. } => ignored(Ignored::EditInProgress),
        }
    }

    /// "Editar": switch a pin's popup to the edit view, preloaded with its
    /// description. Placement stays blocked until the edit is saved.
    pub fn begin_edit(&mut self, id: PinId) -> Outcome {
        if !self.mode.is_edit() {
            return ignored(Ignored::ExploreMode);
        }
        if let Some(editing) = self.interaction.editing_pin() {
            if editing != id {
                return ignored(Ignored::EditInProgress);
            }
        }
        let Some(pin) = self.pins.get(id) else {
            return ignored(Ignored::UnknownPin);
        };
        self.interaction = Interaction::Editing {
            pin: id,
            draft: pin.description.clone(),
        };
        Outcome::Applied
    }

    pub fn set_draft(&mut self, text: &str) -> Outcome {
        match &mut self.interaction {
            Interaction::Editing { draft, .. } => {
                *draft = text.to_string();
                Outcome::Applied
            }
            _ => ignored(Ignored::NotEditing),
        }
    }

    /// "Salvar": commit the draft description and close the popup.
    pub fn save_edit(&mut self) -> Outcome {
        let (pin, draft) = match std::mem::take(&mut self.interaction) {
            Interaction::Editing { pin, draft } => (pin, draft),
            other => {
                self.interaction = other;
                return ignored(Ignored::NotEditing);
            }
        };
        match self.pins.get_mut(pin) {
            Some(record) => {
                record.description = draft;
                tracing::debug!(id = %pin, "pin description saved");
                self.persist_pins();
                Outcome::Applied
            }
            None => ignored(Ignored::UnknownPin),
        }
    }

    /// "Excluir" in a pin popup. No confirmation.
    pub fn delete_pin(&mut self, id: PinId) -> Outcome {
        if !self.mode.is_edit() {
            return ignored(Ignored::ExploreMode);
        }
        if self.pins.remove(id).is_none() {
            return ignored(Ignored::UnknownPin);
        }
        if self.interaction.involves(id) {
            self.interaction = Interaction::Idle;
        }
        tracing::debug!(%id, "pin deleted");
        self.persist_pins();
        Outcome::Applied
    }

    /// "Limpar Pinos": drop every pin and the persisted record.
    pub fn clear_pins(&mut self) -> Outcome {
        self.pins.clear();
        self.interaction = Interaction::Idle;
        tracing::info!("all pins cleared");
        let result = self.store.remove(PINS_KEY);
        self.record_write(PINS_KEY, result);
        Outcome::Applied
    }

    // ---------------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------------

    pub fn select_category(&mut self, name: &str) -> Outcome {
        if !self.categories.contains(name) {
            return ignored(Ignored::UnknownCategory);
        }
        self.selected = Some(name.to_string());
        Outcome::Applied
    }

    pub fn add_category(&mut self, name: &str, icon: Icon) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return ignored(Ignored::EmptyName);
        }
        if let Some(previous) = self.categories.insert(name, icon) {
            tracing::debug!(%name, %previous, %icon, "category icon replaced");
        } else {
            tracing::debug!(%name, %icon, "category added");
        }
        self.persist_categories();
        Outcome::Applied
    }

    /// Removes a category and every pin in it.
    pub fn delete_category(&mut self, name: &str) -> Outcome {
        if self.categories.remove(name).is_none() {
            return ignored(Ignored::UnknownCategory);
        }
        let removed = self.pins.remove_category(name);
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        if let Some(open) = self.interaction.open_pin() {
            if !self.pins.contains(open) {
                self.interaction = Interaction::Idle;
            }
        }
        tracing::info!(%name, pins_removed = removed, "category deleted");
        self.persist_categories();
        self.persist_pins();
        Outcome::Applied
    }

    /// Renames a category, keeping its icon. Pins in the old category move
    /// to the new name. Renaming onto an existing name replaces it.
    pub fn rename_category(&mut self, from: &str, to: &str) -> Outcome {
        let to = to.trim();
        if to.is_empty() {
            return ignored(Ignored::EmptyName);
        }
        if !self.categories.contains(from) {
            return ignored(Ignored::UnknownCategory);
        }
        if from == to {
            return ignored(Ignored::Unchanged);
        }
        self.categories.rename(from, to);
        let moved = self.pins.recategorize(from, to);
        if self.selected.as_deref() == Some(from) {
            self.selected = Some(to.to_string());
        }
        tracing::info!(%from, %to, pins_moved = moved, "category renamed");
        self.persist_categories();
        self.persist_pins();
        Outcome::Applied
    }

    // ---------------------------------------------------------------------
    // Category dialog
    // ---------------------------------------------------------------------

    pub fn open_category_dialog(&mut self) {
        self.dialog = CategoryDialog::open();
    }

    pub fn set_dialog_name(&mut self, text: &str) -> Outcome {
        if !self.dialog.is_open() {
            return ignored(Ignored::DialogClosed);
        }
        self.dialog.set_name(text);
        Outcome::Applied
    }

    pub fn choose_dialog_icon(&mut self, icon: Icon) -> Outcome {
        if !self.dialog.is_open() {
            return ignored(Ignored::DialogClosed);
        }
        self.dialog.choose(icon);
        Outcome::Applied
    }

    /// Closes the dialog and forgets its fields.
    pub fn cancel_category_dialog(&mut self) {
        self.dialog = CategoryDialog::Closed;
    }

    /// "Salvar" in the dialog. Requires a non-blank name and an icon.
    pub fn save_category_dialog(&mut self) -> Outcome {
        if !self.dialog.is_open() {
            return ignored(Ignored::DialogClosed);
        }
        let Some((name, icon)) = self.dialog.submission() else {
            let reason = if self.dialog.name().trim().is_empty() {
                Ignored::EmptyName
            } else {
                Ignored::NoIconChosen
            };
            return ignored(reason);
        };
        let outcome = self.add_category(&name, icon);
        self.dialog = CategoryDialog::Closed;
        outcome
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    fn persist_pins(&mut self) {
        let result = save_snapshot(&mut self.store, PINS_KEY, &self.pins);
        self.record_write(PINS_KEY, result);
    }

    fn persist_categories(&mut self) {
        let result = save_snapshot(&mut self.store, CATEGORIES_KEY, &self.categories);
        self.record_write(CATEGORIES_KEY, result);
    }

    fn record_write(&mut self, key: &'static str, result: Result<(), StorageError>) {
        match result {
            Ok(()) => {
                if self.unsaved.remove(key).is_some() && self.unsaved.is_empty() {
                    tracing::info!("storage writes recovered");
                }
            }
            Err(e) => {
                tracing::warn!("{e}; continuing in memory only");
                self.unsaved.insert(key, e.to_string());
            }
        }
    }
}

fn ignored(reason: Ignored) -> Outcome {
    tracing::debug!(?reason, "action ignored");
    Outcome::Ignored(reason)
}
