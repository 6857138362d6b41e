// End-to-end sessions against the annotator: placing, editing, cascading
// deletes and reloading from storage.

mod common;

use common::{fresh, place, ready_to_place, reload, summary};
use factory_map::state::{Interaction, Mode};
use factory_map::storage::{CATEGORIES_KEY, FileStore, PINS_KEY};
use factory_map::{Annotator, DEFAULT_DESCRIPTION, Icon, Ignored, LatLng, Outcome};

#[test]
fn annotate_a_leak_and_reload() {
    let (mut annotator, store) = fresh();
    let icon: Icon = "icon1".parse().unwrap();
    annotator.add_category("Box", icon);
    annotator.select_category("Box");
    annotator.toggle_mode();

    let id = place(&mut annotator, 10.0, 20.0);
    assert_eq!(annotator.pins().len(), 1);
    assert_eq!(annotator.pin(id).unwrap().description, DEFAULT_DESCRIPTION);

    assert!(annotator.open_popup(id).is_applied());
    assert!(annotator.begin_edit(id).is_applied());
    annotator.set_draft("Leak detected");
    assert!(annotator.save_edit().is_applied());
    assert_eq!(annotator.interaction(), &Interaction::Idle);

    let reloaded = reload(&store);
    assert_eq!(reloaded.mode(), Mode::Explore);
    assert_eq!(reloaded.selected_category(), None);
    let pin = reloaded.pin(id).unwrap();
    assert_eq!(pin.position, LatLng::new(10.0, 20.0));
    assert_eq!(pin.description, "Leak detected");
    assert_eq!(pin.category, "Box");
    assert_eq!(reloaded.pin_icon(pin), Some(Icon::Box));

    let raw = store.raw(CATEGORIES_KEY).unwrap();
    assert_eq!(raw, r#"{"Box":"Box"}"#);

    assert!(annotator.delete_category("Box").is_applied());
    let reloaded = reload(&store);
    assert!(reloaded.pins().is_empty());
    assert!(reloaded.categories().is_empty());
}

#[test]
fn explore_mode_clicks_place_nothing() {
    let (mut annotator, _store) = fresh();
    ready_to_place(&mut annotator, "Box", Icon::Box);
    annotator.toggle_mode();
    assert_eq!(annotator.mode(), Mode::Explore);

    let outcome = annotator.map_click(LatLng::new(0.0, 0.0));
    assert_eq!(outcome, Outcome::Ignored(Ignored::ExploreMode));
    assert!(annotator.pins().is_empty());
}

#[test]
fn loading_twice_gives_the_same_state() {
    let (mut annotator, store) = fresh();
    ready_to_place(&mut annotator, "Warning", Icon::Warning);
    place(&mut annotator, 1.0, 1.0);
    place(&mut annotator, -5.0, 30.0);

    let first = reload(&store);
    let second = reload(&store);
    assert_eq!(first.pins(), second.pins());
    assert_eq!(first.categories(), second.categories());
    assert_eq!(first.pins(), annotator.pins());
}

#[test]
fn deleting_a_category_takes_its_pins_everywhere() {
    let (mut annotator, store) = fresh();
    ready_to_place(&mut annotator, "Flask", Icon::Flask);
    place(&mut annotator, 0.0, 0.0);
    ready_to_place(&mut annotator, "Mechanic", Icon::Mechanic);
    let kept = place(&mut annotator, 2.0, 2.0);

    assert!(annotator.delete_category("Flask").is_applied());
    assert!(annotator.pins().iter().all(|p| p.category != "Flask"));

    let reloaded = reload(&store);
    assert_eq!(reloaded.pins().len(), 1);
    assert!(reloaded.pin(kept).is_some());
    assert!(!reloaded.categories().contains("Flask"));
}

#[test]
fn every_pin_belongs_to_a_known_category() {
    let (mut annotator, _store) = fresh();
    ready_to_place(&mut annotator, "Eco", Icon::EcoFriendly);
    place(&mut annotator, 3.0, 3.0);
    annotator.rename_category("Eco", "Green");
    ready_to_place(&mut annotator, "Crisis", Icon::Crisis);
    place(&mut annotator, 4.0, 4.0);
    annotator.delete_category("Crisis");

    for pin in annotator.pins() {
        assert!(annotator.categories().contains(&pin.category), "{pin:?}");
    }
}

#[test]
fn placement_is_gated_on_mode_selection_and_popups() {
    let (mut annotator, _store) = fresh();
    annotator.add_category("Box", Icon::Box);
    annotator.select_category("Box");

    let at = LatLng::new(1.0, 1.0);
    assert_eq!(annotator.place_pin(at), Outcome::Ignored(Ignored::ExploreMode));

    annotator.toggle_mode();
    let id = place(&mut annotator, 1.0, 1.0);

    annotator.open_popup(id);
    annotator.begin_edit(id);
    assert_eq!(annotator.place_pin(at), Outcome::Ignored(Ignored::PopupOpen));
    assert_eq!(annotator.map_click(at), Outcome::Ignored(Ignored::PopupOpen));
    assert_eq!(annotator.pins().len(), 1);

    annotator.save_edit();
    assert!(annotator.map_click(at).is_applied());
    assert_eq!(annotator.pins().len(), 2);
}

#[test]
fn placing_without_a_selected_category_does_nothing() {
    let (mut annotator, store) = fresh();
    annotator.add_category("Box", Icon::Box);
    annotator.toggle_mode();

    let outcome = annotator.place_pin(LatLng::new(0.0, 0.0));
    assert_eq!(outcome, Outcome::Ignored(Ignored::NoCategorySelected));
    assert!(annotator.pins().is_empty());
    assert_eq!(store.raw(PINS_KEY), None);
}

#[test]
fn mode_toggles_back_and_forth_on_the_m_key() {
    let (mut annotator, _store) = fresh();
    assert!(annotator.handle_key("m"));
    assert_eq!(annotator.mode(), Mode::Edit);
    assert!(annotator.handle_key("M"));
    assert_eq!(annotator.mode(), Mode::Explore);
    assert!(!annotator.handle_key("n"));
    assert_eq!(annotator.mode(), Mode::Explore);
}

#[test]
fn explore_mode_is_read_only_for_pins() {
    let (mut annotator, store) = fresh();
    ready_to_place(&mut annotator, "Box", Icon::Box);
    let id = place(&mut annotator, 5.0, 5.0);
    annotator.toggle_mode();
    let persisted = store.raw(PINS_KEY);

    assert!(annotator.open_popup(id).is_applied());
    assert_eq!(annotator.begin_edit(id), Outcome::Ignored(Ignored::ExploreMode));
    assert_eq!(annotator.delete_pin(id), Outcome::Ignored(Ignored::ExploreMode));
    assert_eq!(
        annotator.move_pin(id, LatLng::new(9.0, 9.0)),
        Outcome::Ignored(Ignored::ExploreMode)
    );
    assert_eq!(store.raw(PINS_KEY), persisted);
}

#[test]
fn a_moved_pin_stays_moved_after_reload() {
    let (mut annotator, store) = fresh();
    ready_to_place(&mut annotator, "Project", Icon::Project);
    let id = place(&mut annotator, 0.0, 0.0);
    assert!(annotator.move_pin(id, LatLng::new(-12.5, 40.25)).is_applied());

    let reloaded = reload(&store);
    assert_eq!(reloaded.pin(id).unwrap().position, LatLng::new(-12.5, 40.25));
}

#[test]
fn renaming_a_category_carries_its_pins_along() {
    let (mut annotator, store) = fresh();
    ready_to_place(&mut annotator, "Flash", Icon::Flash);
    place(&mut annotator, 1.0, 2.0);
    place(&mut annotator, 3.0, 4.0);

    assert!(annotator.rename_category("Flash", "Electrical").is_applied());
    assert_eq!(annotator.selected_category(), Some("Electrical"));

    let reloaded = reload(&store);
    assert_eq!(
        summary(&reloaded),
        vec![
            ("Electrical".to_string(), DEFAULT_DESCRIPTION.to_string()),
            ("Electrical".to_string(), DEFAULT_DESCRIPTION.to_string()),
        ]
    );
    assert_eq!(reloaded.categories().icon("Electrical"), Some(Icon::Flash));
}

#[test]
fn clearing_pins_keeps_categories() {
    let (mut annotator, store) = fresh();
    ready_to_place(&mut annotator, "Open Box", Icon::OpenBox);
    place(&mut annotator, 1.0, 1.0);
    annotator.clear_pins();

    assert_eq!(store.raw(PINS_KEY), None);
    let reloaded = reload(&store);
    assert!(reloaded.pins().is_empty());
    assert_eq!(reloaded.categories().len(), 1);
}

#[test]
fn wiped_storage_starts_empty() {
    let (mut annotator, store) = fresh();
    ready_to_place(&mut annotator, "Box", Icon::Box);
    place(&mut annotator, 1.0, 1.0);
    store.clear();

    let reloaded = reload(&store);
    assert!(reloaded.pins().is_empty());
    assert!(reloaded.categories().is_empty());
}

#[test]
fn dialog_adds_a_category_only_with_name_and_icon() {
    let (mut annotator, _store) = fresh();
    annotator.open_category_dialog();
    annotator.set_dialog_name("  Valves ");
    assert_eq!(
        annotator.save_category_dialog(),
        Outcome::Ignored(Ignored::NoIconChosen)
    );
    assert!(annotator.dialog().is_open());

    annotator.choose_dialog_icon(Icon::Brickwall);
    assert!(annotator.save_category_dialog().is_applied());
    assert!(!annotator.dialog().is_open());
    assert_eq!(annotator.categories().icon("Valves"), Some(Icon::Brickwall));

    annotator.open_category_dialog();
    assert_eq!(annotator.dialog().name(), "");
    assert_eq!(annotator.dialog().icon(), None);
}

#[test]
fn failed_writes_leave_the_session_in_memory() {
    let (mut annotator, store) = fresh();
    ready_to_place(&mut annotator, "Box", Icon::Box);
    store.set_read_only(true);

    let id = place(&mut annotator, 1.0, 1.0);
    assert!(annotator.pin(id).is_some());
    assert!(annotator.storage_warning().is_some());
    assert_eq!(store.raw(PINS_KEY), None);

    store.set_read_only(false);
    annotator.move_pin(id, LatLng::new(2.0, 2.0));
    assert_eq!(annotator.storage_warning(), None);
    assert_eq!(reload(&store).pins().len(), 1);
}

#[test]
fn one_unwritable_key_keeps_the_warning_up() {
    let (mut annotator, store) = fresh();
    ready_to_place(&mut annotator, "Box", Icon::Box);
    ready_to_place(&mut annotator, "Flask", Icon::Flask);
    place(&mut annotator, 1.0, 1.0);
    store.set_failing(CATEGORIES_KEY, true);

    // Writes both keys; only pins lands.
    assert!(annotator.delete_category("Flask").is_applied());
    assert!(annotator.storage_warning().is_some());
    assert_eq!(reload(&store).pins().len(), 0);
    assert!(reload(&store).categories().contains("Flask"));

    store.set_failing(CATEGORIES_KEY, false);
    annotator.select_category("Box");
    place(&mut annotator, 2.0, 2.0);
    assert!(annotator.storage_warning().is_some());

    annotator.add_category("Flash", Icon::Flash);
    assert_eq!(annotator.storage_warning(), None);
    assert!(!reload(&store).categories().contains("Flask"));
}

#[test]
fn file_store_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let mut annotator = Annotator::load(FileStore::new(dir.path()));
        ready_to_place(&mut annotator, "Warning", Icon::Warning);
        let id = place(&mut annotator, 7.0, -8.0);
        annotator.begin_edit(id);
        annotator.set_draft("Check valve");
        annotator.save_edit();
        id
    };

    assert!(dir.path().join("pins.json").exists());
    let annotator = Annotator::load(FileStore::new(dir.path()));
    let pin = annotator.pin(id).unwrap();
    assert_eq!(pin.description, "Check valve");
    assert_eq!(annotator.pin_icon(pin), Some(Icon::Warning));
}
