//! Core of an auto-hiding, screen-edge launcher dock.
//!
//! The crate knows where the dock belongs, when it should slide away and
//! back, which buttons it carries and how to launch them. Drawing is left to
//! the host; it feeds pointer and clock events in through [`Dock`] and draws
//! whatever [`Dock::current_rect`] reports.

pub mod action;
pub mod autohide;
pub mod buttons;
pub mod config;
pub mod dock;
pub mod error;
pub mod geometry;
pub mod screen;

pub use action::{ActionDispatcher, LaunchRoute, Launcher, SystemLauncher};
pub use autohide::{AutoHideController, AutoHideState};
pub use buttons::ButtonOrderingModel;
pub use config::{ButtonDescriptor, ConfigPaths, ConfigStore, DockSettings, Rgb};
pub use dock::{ButtonOp, Dock, Mutation};
pub use error::DockError;
pub use geometry::{DockRect, Edge, Placement, ScreenRect};
pub use screen::ScreenInfo;
