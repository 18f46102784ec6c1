//! The dock as a whole: settings, buttons, auto-hide and launching behind
//! one collaborator-facing interface.

use std::time::Instant;

use tracing::{info, warn};

use crate::action::{ActionDispatcher, LaunchRoute, Launcher, SystemLauncher};
use crate::autohide::{AutoHideController, AutoHideState};
use crate::buttons::ButtonOrderingModel;
use crate::config::{ButtonDescriptor, ConfigStore, DockSettings};
use crate::error::DockError;
use crate::geometry::{DockRect, Placement, ScreenRect};

/// Edits a presentation layer can make to the button list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonOp {
    AppendPlaceholder,
    Update {
        index: usize,
        descriptor: ButtonDescriptor,
    },
    MoveUp(usize),
    MoveDown(usize),
    /// The caller must have confirmed the removal with the user.
    Remove(usize),
}

/// Outcome of a successful [`Dock::mutate_button`].
#[derive(Debug)]
pub struct Mutation {
    /// Index of the affected entry afterwards, if it still exists.
    pub index: Option<usize>,
    /// Set when the edit was applied in memory but could not be saved.
    pub warning: Option<DockError>,
}

#[derive(Debug, Clone)]
pub struct Dock<L = SystemLauncher> {
    store: ConfigStore,
    settings: DockSettings,
    buttons: ButtonOrderingModel,
    controller: AutoHideController,
    dispatcher: ActionDispatcher<L>,
    screen: ScreenRect,
}

impl Dock<SystemLauncher> {
    /// Loads both documents and places the dock visible on `screen`.
    /// Recovered load problems are returned alongside the dock.
    pub fn open(store: ConfigStore, screen: ScreenRect) -> (Self, Vec<DockError>) {
        Self::with_launcher(store, screen, SystemLauncher)
    }
}

impl<L: Launcher> Dock<L> {
    pub fn with_launcher(store: ConfigStore, screen: ScreenRect, launcher: L) -> (Self, Vec<DockError>) {
        let settings = store.load_settings();
        let buttons = store.load_buttons();
        let mut warnings = settings.warnings;
        warnings.extend(buttons.warnings);

        let settings = settings.value;
        let buttons = ButtonOrderingModel::new(buttons.value);
        let placement = placement_for(&settings, buttons.named_len(), screen);
        info!(
            edge = %settings.edge,
            buttons = buttons.len(),
            rect = ?placement.visible_rect(),
            "dock opened"
        );

        let dock = Self {
            store,
            settings,
            buttons,
            controller: AutoHideController::new(placement),
            dispatcher: ActionDispatcher::new(launcher),
            screen,
        };
        (dock, warnings)
    }

    pub fn settings(&self) -> &DockSettings {
        &self.settings
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn dispatcher(&self) -> &ActionDispatcher<L> {
        &self.dispatcher
    }

    pub fn get_visible_rect(&self) -> DockRect {
        self.controller.visible_rect()
    }

    pub fn get_hidden_rect(&self) -> DockRect {
        self.controller.hidden_rect()
    }

    /// Where the presentation layer should draw the dock right now.
    pub fn current_rect(&self) -> DockRect {
        self.controller.current_rect()
    }

    pub fn current_state(&self) -> AutoHideState {
        self.controller.state()
    }

    pub fn needs_tick(&self) -> bool {
        self.controller.needs_tick()
    }

    pub fn tick(&mut self, now: Instant) -> DockRect {
        self.controller.tick(now)
    }

    pub fn notify_pointer_enter(&mut self, now: Instant) {
        self.controller.pointer_entered(now);
    }

    pub fn notify_pointer_leave(&mut self, now: Instant) {
        self.controller.pointer_left(now);
    }

    pub fn notify_dialog_open(&mut self, open: bool, now: Instant) {
        self.controller.set_dialog_open(open, now);
    }

    /// Moves the dock to another screen rectangle.
    pub fn set_screen(&mut self, screen: ScreenRect) {
        self.screen = screen;
        self.relayout();
    }

    /// Replaces the settings wholesale and persists them. On a write failure
    /// the new settings stay in effect and the error is returned.
    pub fn apply_settings(&mut self, settings: DockSettings) -> Result<(), DockError> {
        self.settings = settings.sanitized();
        self.relayout();
        info!(edge = %self.settings.edge, "settings applied");
        self.store.save_settings(&self.settings).inspect_err(|err| {
            warn!(error = %err, "settings not saved");
        })
    }

    pub fn list_buttons(&self) -> &[ButtonDescriptor] {
        self.buttons.buttons()
    }

    /// Applies an edit. Everything except appending a placeholder is saved
    /// right away.
    pub fn mutate_button(&mut self, op: ButtonOp) -> Result<Mutation, DockError> {
        let persist = !matches!(op, ButtonOp::AppendPlaceholder);
        let index = match op {
            ButtonOp::AppendPlaceholder => Some(self.buttons.append_placeholder()),
            ButtonOp::Update { index, descriptor } => {
                self.buttons.update(index, descriptor)?;
                Some(index)
            }
            ButtonOp::MoveUp(index) => Some(self.buttons.move_up(index)?),
            ButtonOp::MoveDown(index) => Some(self.buttons.move_down(index)?),
            ButtonOp::Remove(index) => {
                self.buttons.remove(index)?;
                None
            }
        };
        self.relayout();

        let warning = if persist {
            self.buttons.compact_and_persist(&self.store).err()
        } else {
            None
        };
        if let Some(err) = &warning {
            warn!(error = %err, "button list not saved");
        }
        Ok(Mutation { index, warning })
    }

    pub fn dispatch_action(&self, action: &str) -> Result<LaunchRoute, DockError> {
        self.dispatcher.execute(action)
    }

    /// Runs the action of the button at `index`.
    pub fn launch_button(&self, index: usize) -> Result<LaunchRoute, DockError> {
        let button = self.buttons.get(index).ok_or(DockError::IndexOutOfRange {
            index,
            len: self.buttons.len(),
        })?;
        self.dispatch_action(&button.action)
    }

    fn relayout(&mut self) {
        let placement = placement_for(&self.settings, self.buttons.named_len(), self.screen);
        self.controller.relayout(placement);
    }
}

/// Sizes the panel for the buttons that are drawn; placeholders take no room.
fn placement_for(settings: &DockSettings, button_count: usize, screen: ScreenRect) -> Placement {
    let (width, height) = settings.panel_size(button_count);
    Placement {
        edge: settings.edge,
        offset: i32::try_from(settings.offset).unwrap_or(i32::MAX),
        width,
        height,
        screen,
    }
}
