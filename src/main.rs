use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{Column, Row, button, container, text};
use iced::{
    Background, Border, Color, Element, Event, Length, Point, Size, Subscription, Task, event,
    mouse, window,
};
use tracing::{info, warn};

use edge_dock::{ButtonDescriptor, ConfigPaths, ConfigStore, Dock, DockRect, ScreenInfo};

#[derive(Parser, Debug)]
#[command(
    name = "edge-dock",
    version,
    about = "Auto-hiding launcher dock attached to a screen edge"
)]
struct CliArgs {
    /// Settings document (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Button document (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    buttons: Option<PathBuf>,
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

pub fn main() -> iced::Result {
    let args = CliArgs::parse();
    setup_tracing(args.verbose);

    let store = ConfigStore::new(ConfigPaths::resolve(args.settings, args.buttons));
    let screen = ScreenInfo::detect();
    let (dock, warnings) = Dock::open(store, screen.rect());
    for warning in &warnings {
        if warning.is_recovered() {
            info!(%warning, "recovered from unusable configuration");
        } else {
            warn!(%warning, "configuration problem");
        }
    }

    let rect = dock.current_rect();
    info!(?rect, "placing dock window");

    iced::application(move || App::new(dock.clone()), App::update, App::view)
        .subscription(App::subscription)
        .window(window::Settings {
            size: Size::new(rect.width as f32, rect.height as f32),
            position: window::Position::Specific(Point::new(rect.x as f32, rect.y as f32)),
            resizable: false,
            decorations: false,
            transparent: true,
            level: window::Level::AlwaysOnTop,
            ..Default::default()
        })
        .run()
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("edge_dock=debug,info")
        } else {
            EnvFilter::new("edge_dock=info,warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

struct App {
    dock: Dock,
    /// Learned from the first window event; needed to move the window.
    window: Option<window::Id>,
    /// Rect last pushed to the window.
    shown: DockRect,
}

#[derive(Debug, Clone)]
enum Message {
    PointerEntered(window::Id),
    PointerLeft(window::Id),
    Tick(Instant),
    Launch(usize),
    OpenSettings,
}

impl App {
    fn new(dock: Dock) -> Self {
        let shown = dock.current_rect();
        Self {
            dock,
            window: None,
            shown,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PointerEntered(id) => {
                self.window = Some(id);
                self.dock.notify_pointer_enter(Instant::now());
                self.sync_window()
            }
            Message::PointerLeft(id) => {
                self.window = Some(id);
                self.dock.notify_pointer_leave(Instant::now());
                Task::none()
            }
            Message::Tick(now) => {
                self.dock.tick(now);
                self.sync_window()
            }
            Message::Launch(index) => {
                if let Err(err) = self.dock.launch_button(index) {
                    warn!(error = %err, index, "button action failed");
                }
                Task::none()
            }
            Message::OpenSettings => {
                let path = self.dock.store().paths().settings.display().to_string();
                if let Err(err) = self.dock.dispatch_action(&path) {
                    warn!(error = %err, "could not open settings");
                }
                Task::none()
            }
        }
    }

    /// Pushes the controller's rect to the real window if it changed.
    fn sync_window(&mut self) -> Task<Message> {
        let rect = self.dock.current_rect();
        let Some(id) = self.window else {
            return Task::none();
        };
        if rect == self.shown {
            return Task::none();
        }
        let previous = std::mem::replace(&mut self.shown, rect);

        let mut tasks = vec![window::move_to(
            id,
            Point::new(rect.x as f32, rect.y as f32),
        )];
        if (previous.width, previous.height) != (rect.width, rect.height) {
            tasks.push(window::resize(
                id,
                Size::new(rect.width as f32, rect.height as f32),
            ));
        }
        Task::batch(tasks)
    }

    fn subscription(&self) -> Subscription<Message> {
        let pointer = event::listen_with(|event, _status, id| match event {
            Event::Mouse(mouse::Event::CursorEntered) => Some(Message::PointerEntered(id)),
            Event::Mouse(mouse::Event::CursorLeft) => Some(Message::PointerLeft(id)),
            _ => None,
        });

        if self.dock.needs_tick() {
            Subscription::batch([pointer, window::frames().map(Message::Tick)])
        } else {
            pointer
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let settings = self.dock.settings();
        let icon = settings.icon_size as f32;
        let spacing = settings.layout_spacing as f32;

        let launchers = self
            .dock
            .list_buttons()
            .iter()
            .enumerate()
            .filter(|(_, descriptor)| !descriptor.is_placeholder())
            .map(|(index, descriptor)| launcher_button(descriptor, index, icon));
        let gear = button(text("⚙"))
            .on_press(Message::OpenSettings)
            .width(icon)
            .height(icon);

        let content: Element<'_, Message> = if settings.edge.is_horizontal() {
            Row::with_children(launchers).push(gear).spacing(spacing).into()
        } else {
            Column::with_children(launchers).push(gear).spacing(spacing).into()
        };

        let alpha = f32::from(settings.background_alpha()) / 255.0;
        let background = Color::from_rgba8(settings.color.r, settings.color.g, settings.color.b, alpha);
        let border = Border {
            color: Color::from_rgb8(
                settings.border_color.r,
                settings.border_color.g,
                settings.border_color.b,
            ),
            width: settings.border_width,
            radius: (settings.corner_radius as f32).into(),
        };

        container(content)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(Background::Color(background)),
                border,
                ..container::Style::default()
            })
            .into()
    }
}

fn launcher_button(descriptor: &ButtonDescriptor, index: usize, size: f32) -> Element<'_, Message> {
    button(text(descriptor.name.as_str()))
        .on_press(Message::Launch(index))
        .width(size)
        .height(size)
        .into()
}
