// Shared builders for the annotator integration tests.
#![allow(dead_code)]

use factory_map::storage::{KeyValueStore, MemoryStore};
use factory_map::{Annotator, Icon, LatLng, PinId};

/// Fresh annotator over an empty in-memory store. The returned store shares
/// its data with the annotator's copy.
pub fn fresh() -> (Annotator<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    (Annotator::load(store.clone()), store)
}

/// A second session over the same storage, as after a page reload.
pub fn reload(store: &MemoryStore) -> Annotator<MemoryStore> {
    Annotator::load(store.clone())
}

/// Edit mode with one category selected.
pub fn ready_to_place<S: KeyValueStore>(annotator: &mut Annotator<S>, name: &str, icon: Icon) {
    assert!(annotator.add_category(name, icon).is_applied());
    assert!(annotator.select_category(name).is_applied());
    if !annotator.mode().is_edit() {
        annotator.toggle_mode();
    }
}

/// Places a pin and returns its id.
pub fn place<S: KeyValueStore>(annotator: &mut Annotator<S>, lat: f64, lng: f64) -> PinId {
    let before: Vec<PinId> = annotator.pins().iter().map(|p| p.id).collect();
    assert!(annotator.place_pin(LatLng::new(lat, lng)).is_applied());
    annotator
        .pins()
        .iter()
        .map(|p| p.id)
        .find(|id| !before.contains(id))
        .expect("a new pin")
}

/// (category, description) of every pin, sorted for order-free comparison.
pub fn summary<S: KeyValueStore>(annotator: &Annotator<S>) -> Vec<(String, String)> {
    let mut rows: Vec<_> = annotator
        .pins()
        .iter()
        .map(|p| (p.category.clone(), p.description.clone()))
        .collect();
    rows.sort();
    rows
}
