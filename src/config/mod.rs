//! Persisted dock documents: `settings.json` and `buttons.json`.

pub mod app;
pub mod buttons;
pub mod settings;
pub mod store;

pub use app::ConfigPaths;
pub use buttons::{ButtonDescriptor, ButtonsDocument};
pub use settings::{DockSettings, Rgb};
pub use store::{ConfigStore, LoadOrigin, Loaded};
