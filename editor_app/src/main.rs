//! Scene editor application
//!
//! Opens a window, forwards its events to the editor session and renders each
//! frame through the headless backend. The scene is loaded from the configured
//! snapshot at startup and written back when the window closes.

use glfw::{Action, Key, WindowEvent};
use pixel_engine::config::{Config, EditorConfig};
use pixel_engine::editor::EditorContext;
use pixel_engine::foundation::logging;
use pixel_engine::foundation::time::Timer;
use pixel_engine::input::{KeyCode, MouseButton};
use pixel_engine::render::{HeadlessBackend, RenderBackend, RenderError};
use pixel_engine::scene::SceneError;

/// Config file read when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "editor.toml";

/// Application errors
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("Window initialization failed: {0}")]
    Window(String),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

struct EditorApp {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    editor: EditorContext,
    backend: HeadlessBackend,
    timer: Timer,
    viewport_offset: (f64, f64),
}

impl EditorApp {
    fn new(config: EditorConfig) -> Result<Self, AppError> {
        let mut glfw = glfw::init(glfw::fail_on_errors).map_err(|e| AppError::Window(e.to_string()))?;
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(
                config.window.width,
                config.window.height,
                &config.window.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| AppError::Window("could not create window".to_string()))?;

        window.set_key_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_cursor_enter_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);
        window.set_focus_polling(true);
        window.set_size_polling(true);
        log::info!("Created {}x{} window", config.window.width, config.window.height);

        let [x, y] = config.picking.viewport_offset;
        Ok(Self {
            glfw,
            window,
            events,
            editor: EditorContext::open(config),
            backend: HeadlessBackend::new(),
            timer: Timer::new(),
            viewport_offset: (f64::from(x), f64::from(y)),
        })
    }

    fn run(&mut self) -> Result<(), AppError> {
        log::info!("Editor running");

        while !self.window.should_close() {
            self.glfw.poll_events();
            let events: Vec<_> = glfw::flush_messages(&self.events).map(|(_, event)| event).collect();
            for event in events {
                self.handle_event(event)?;
            }

            let delta_time = self.timer.tick();
            self.editor.update(delta_time)?;
            self.backend.render_frame(&self.editor.build_frame())?;
        }

        log::info!("Editor closed after {} frames", self.backend.frames());
        self.editor.shutdown()?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn handle_event(&mut self, event: WindowEvent) -> Result<(), AppError> {
        match event {
            WindowEvent::Key(Key::Escape, _, Action::Press, _) => self.window.set_should_close(true),
            WindowEvent::Key(key, _, action, _) => {
                if let (Some(key), Some(pressed)) = (map_key(key), map_action(action)) {
                    self.editor.on_key(key, pressed)?;
                }
            }
            WindowEvent::CursorPos(x, y) => {
                self.editor.set_hovered(self.in_viewport(x, y));
                self.editor.on_cursor_moved(x as f32, y as f32);
            }
            WindowEvent::CursorEnter(false) => self.editor.set_hovered(false),
            WindowEvent::MouseButton(button, action, _) => {
                if let (Some(button), Some(pressed)) = (map_mouse_button(button), map_action(action)) {
                    self.editor.on_mouse_button(button, pressed);
                }
            }
            WindowEvent::Scroll(_, y_offset) => self.editor.on_scroll(y_offset as f32),
            WindowEvent::Focus(false) => self.editor.on_focus_lost(),
            WindowEvent::Size(width, height) => {
                self.editor.on_resize(width.max(0) as u32, height.max(0) as u32);
            }
            _ => {}
        }
        Ok(())
    }

    fn in_viewport(&self, x: f64, y: f64) -> bool {
        let (width, height) = self.window.get_size();
        x >= self.viewport_offset.0 && y >= self.viewport_offset.1 && x < f64::from(width) && y < f64::from(height)
    }
}

fn map_key(key: Key) -> Option<KeyCode> {
    match key {
        Key::W => Some(KeyCode::W),
        Key::A => Some(KeyCode::A),
        Key::S => Some(KeyCode::S),
        Key::D => Some(KeyCode::D),
        Key::Delete => Some(KeyCode::Delete),
        Key::F1 => Some(KeyCode::F1),
        Key::F2 => Some(KeyCode::F2),
        Key::F3 => Some(KeyCode::F3),
        Key::F4 => Some(KeyCode::F4),
        Key::F5 => Some(KeyCode::F5),
        _ => None,
    }
}

fn map_mouse_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Pressed/released; key repeats carry no new state
fn map_action(action: Action) -> Option<bool> {
    match action {
        Action::Press => Some(true),
        Action::Release => Some(false),
        Action::Repeat => None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = EditorConfig::load_or_default(&config_path);
    log::info!("Starting editor with scene file {}", config.scene_path.display());

    let mut app = EditorApp::new(config)?;
    app.run()?;
    Ok(())
}
