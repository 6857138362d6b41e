slint::include_modules!();

mod assets;
mod callbacks;
mod render;
mod telemetry;

use assets::Assets;
use callbacks::MapSession;
use factory_map::Annotator;
use factory_map::config::{self, AppConfig, StorageConfig};
use factory_map::map::{FLOOR_PLAN_BOUNDS, Viewport};
use factory_map::storage::{FileStore, KeyValueStore, MemoryStore};
use std::cell::RefCell;
use std::rc::Rc;

fn main() -> anyhow::Result<()> {
    let loaded = config::load_config();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    telemetry::init(&config.logging.filter);
    match loaded {
        Ok(_) => write_default_config(&config),
        Err(e) => tracing::warn!("{e}. Using defaults."),
    }

    let ui = AppWindow::new()?;
    let assets = Rc::new(Assets::load(&config));
    ui.set_floor_plan(assets.floor_plan());

    let session = Rc::new(RefCell::new(MapSession {
        annotator: Annotator::load(open_store(&config.storage)),
        viewport: Viewport::new(
            FLOOR_PLAN_BOUNDS,
            config.map.min_zoom,
            config.map.max_zoom,
            config.map.initial_zoom,
        )
        .with_zoom_step(config.map.zoom_step),
    }));

    callbacks::setup_all(&ui, session.clone(), assets.clone());
    render::sync(&ui, &session.borrow(), &assets);

    ui.run()?;
    Ok(())
}

/// Storage for the snapshots: the configured directory, else the platform
/// data directory, else memory only.
fn open_store(storage: &StorageConfig) -> Box<dyn KeyValueStore> {
    let store = storage
        .data_dir
        .clone()
        .map(FileStore::new)
        .or_else(FileStore::in_data_dir);
    match store {
        Some(store) => {
            tracing::info!("saving pins under {}", store.dir().display());
            Box::new(store)
        }
        None => {
            tracing::warn!("no data directory available; pins will only live in memory");
            Box::new(MemoryStore::new())
        }
    }
}

/// First run: leave an editable config file behind.
fn write_default_config(config: &AppConfig) {
    let Some(path) = config::config_path() else {
        return;
    };
    if path.exists() {
        return;
    }
    match config::save_config(config) {
        Ok(path) => tracing::info!("wrote default config to {}", path.display()),
        Err(e) => tracing::warn!("{e}"),
    }
}
