//! Editor session state and event handling

use super::{DisplayFlags, EditorCommand};
use crate::config::EditorConfig;
use crate::foundation::time::FrameStats;
use crate::input::{InputManager, KeyCode, MouseButton};
use crate::physics::debug_draw::proxy_wireframes;
use crate::picking::{PickOutcome, PickingCoordinator, Selection};
use crate::render::grid::build_grid;
use crate::render::{Camera, CameraMovement, DirectionalLight, DrawItem, LineBatch, RenderFrameData};
use crate::scene::{self, load_scene, save_scene, Scene};

/// Viewport background
const CLEAR_COLOR: [f32; 4] = [0.274, 0.227, 0.227, 1.0];

/// Fly keys
const MOVEMENT_KEYS: [(KeyCode, CameraMovement); 4] = [
    (KeyCode::W, CameraMovement::Forward),
    (KeyCode::S, CameraMovement::Backward),
    (KeyCode::A, CameraMovement::Left),
    (KeyCode::D, CameraMovement::Right),
];

/// Overlay toggle keys
const TOGGLE_KEYS: [(KeyCode, DisplayFlags); 5] = [
    (KeyCode::F1, DisplayFlags::SHOW_GRID),
    (KeyCode::F2, DisplayFlags::SHOW_FPS),
    (KeyCode::F3, DisplayFlags::SHOW_CAMERA_POSITION),
    (KeyCode::F4, DisplayFlags::SHOW_DIAGNOSTICS),
    (KeyCode::F5, DisplayFlags::SHOW_DEBUG_DRAW),
];

/// A running editor session
pub struct EditorContext {
    config: EditorConfig,
    camera: Camera,
    scene: Scene,
    picking: PickingCoordinator,
    selection: Option<Selection>,
    selection_edited: bool,
    display: DisplayFlags,
    input: InputManager,
    stats: FrameStats,
    light: DirectionalLight,
    grid: LineBatch,
}

impl EditorContext {
    /// Create a session with an empty scene
    pub fn new(config: EditorConfig) -> Self {
        let picking = config.picking.coordinator();
        let (width, height) = panel_size(&picking, config.window.width, config.window.height);
        let camera = Camera::new(&config.camera, width, height);
        let grid_size = config.display.grid_size;

        Self {
            camera,
            scene: Scene::new(),
            picking,
            selection: None,
            selection_edited: false,
            display: DisplayFlags::from(&config.display),
            input: InputManager::new(),
            stats: FrameStats::new(),
            light: DirectionalLight::default(),
            grid: build_grid(grid_size, grid_size),
            config,
        }
    }

    /// Create a session and load the configured scene file
    ///
    /// A missing or unreadable file leaves the scene empty.
    pub fn open(config: EditorConfig) -> Self {
        let mut editor = Self::new(config);
        if editor.config.scene_path.exists() {
            if let Err(e) = editor.load() {
                log::warn!("Could not load {}: {}", editor.config.scene_path.display(), e);
            }
        } else {
            log::info!("No scene at {}, starting empty", editor.config.scene_path.display());
        }
        editor
    }

    /// Per-frame update
    ///
    /// Flies the camera while the viewport is hovered, pushes pending
    /// selection edits into the scene and refreshes every other entity.
    pub fn update(&mut self, delta_time: f32) -> scene::Result<()> {
        self.stats.record(delta_time);

        if self.input.mouse().hovered {
            for (key, movement) in MOVEMENT_KEYS {
                if self.input.is_key_pressed(key) {
                    self.camera.process_keyboard(movement, delta_time);
                }
            }
        }

        self.push_selection_edits()?;
        self.scene.refresh_transforms(self.selection.as_ref().map(|s| s.entity))
    }

    fn push_selection_edits(&mut self) -> scene::Result<()> {
        if !std::mem::take(&mut self.selection_edited) {
            return Ok(());
        }
        let Some(selection) = &self.selection else {
            return Ok(());
        };
        self.scene
            .set_pose(selection.entity, selection.position, selection.rotation, selection.scale)?;
        self.scene.set_color(selection.entity, selection.color)
    }

    /// Run one editor command
    pub fn apply(&mut self, command: EditorCommand) -> scene::Result<()> {
        log::debug!("Editor command {:?}", command);
        match command {
            EditorCommand::Select(name) => {
                let selection = self
                    .scene
                    .find_by_name(&name)
                    .and_then(|entity| Selection::capture(&self.scene, entity));
                if selection.is_none() {
                    log::warn!("No entity named '{}'", name);
                }
                self.select(selection);
            }
            EditorCommand::Deselect => self.select(None),
            EditorCommand::Create(model) => {
                self.scene.spawn(model);
            }
            EditorCommand::DestroySelected => {
                if let Some(selection) = self.selection.take() {
                    self.scene.destroy_entity(selection.entity)?;
                }
            }
            EditorCommand::Rename(name) => {
                if let Some(selection) = self.selection.as_mut() {
                    self.scene.rename(selection.entity, name.as_str())?;
                    selection.name = name;
                }
            }
            EditorCommand::SetPosition(position) => self.edit_selection(|s| s.position = position),
            EditorCommand::SetRotation(rotation) => self.edit_selection(|s| s.rotation = rotation),
            EditorCommand::SetScale(scale) => self.edit_selection(|s| s.scale = scale),
            EditorCommand::SetColor(color) => self.edit_selection(|s| s.color = color),
            EditorCommand::Toggle(flags) => self.display.toggle(flags),
            EditorCommand::Save => self.save()?,
            EditorCommand::Load => self.load()?,
            EditorCommand::ClearScene => {
                self.select(None);
                self.scene.clear();
            }
        }
        Ok(())
    }

    fn select(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        self.selection_edited = false;
    }

    fn edit_selection(&mut self, edit: impl FnOnce(&mut Selection)) {
        match self.selection.as_mut() {
            Some(selection) => {
                edit(selection);
                self.selection_edited = true;
            }
            None => log::debug!("Edit ignored, nothing selected"),
        }
    }

    /// Cursor moved to window position `(x, y)`
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        if let Some((dx, dy)) = self.input.mouse_mut().handle_move(x, y) {
            self.camera.process_mouse_movement(dx, dy);
        }
    }

    /// Mouse button transition; a left press picks
    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.input.mouse_mut().handle_button(button, pressed);
        if button != MouseButton::Left || !pressed {
            return;
        }

        match self.picking.pick_at_cursor(self.input.mouse(), &self.camera, &self.scene) {
            PickOutcome::Hit(selection) => self.select(Some(selection)),
            PickOutcome::Miss => self.select(None),
            PickOutcome::Ignored => {}
        }
    }

    /// Scroll wheel; zooms while the viewport is hovered
    pub fn on_scroll(&mut self, y_offset: f32) {
        if self.input.mouse().hovered {
            self.camera.zoom(y_offset);
        }
    }

    /// Key transition
    pub fn on_key(&mut self, key: KeyCode, pressed: bool) -> scene::Result<()> {
        self.input.handle_key_input(key, pressed);
        if !pressed {
            return Ok(());
        }

        if key == KeyCode::Delete {
            return self.apply(EditorCommand::DestroySelected);
        }
        if let Some((_, flags)) = TOGGLE_KEYS.iter().find(|(toggle, _)| *toggle == key) {
            self.display.toggle(*flags);
        }
        Ok(())
    }

    /// Window resized, in the same screen units as cursor positions
    ///
    /// The camera viewport becomes the window minus the viewport offset. An
    /// empty viewport (minimized window) is ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let (width, height) = panel_size(&self.picking, width, height);
        if width > 0 && height > 0 {
            self.camera.set_viewport(width, height);
        }
    }

    /// Window lost focus
    pub fn on_focus_lost(&mut self) {
        self.input.release_all();
    }

    /// Whether the cursor is over the scene viewport
    pub fn set_hovered(&mut self, hovered: bool) {
        self.input.mouse_mut().hovered = hovered;
    }

    /// Everything the renderer needs for this frame
    pub fn build_frame(&self) -> RenderFrameData {
        let selected = self.selection.as_ref().map(|s| s.entity);
        let draws = self
            .scene
            .entities()
            .into_iter()
            .filter_map(|entity| {
                let renderable = self.scene.renderable(entity)?;
                let transform = self.scene.transform(entity)?;
                renderable.should_render().then(|| DrawItem {
                    entity,
                    model: renderable.model,
                    shader: renderable.shader,
                    model_matrix: *transform.world_matrix(),
                    color: renderable.color,
                    selected: selected == Some(entity),
                })
            })
            .collect();

        RenderFrameData {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            camera_position: self.camera.position(),
            clear_color: CLEAR_COLOR,
            light: self.light.clone(),
            draws,
            grid: self.display.contains(DisplayFlags::SHOW_GRID).then(|| self.grid.clone()),
            debug_lines: self
                .display
                .contains(DisplayFlags::SHOW_DEBUG_DRAW)
                .then(|| proxy_wireframes(self.scene.proxies())),
            overlay: self.overlay_lines(),
        }
    }

    fn overlay_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.display.contains(DisplayFlags::SHOW_FPS) {
            lines.push(self.stats.overlay_text());
        }
        if self.display.contains(DisplayFlags::SHOW_CAMERA_POSITION) {
            let p = self.camera.position();
            lines.push(format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z));
        }
        if self.display.contains(DisplayFlags::SHOW_DIAGNOSTICS) {
            lines.push(format!(
                "{} entities, {} proxies",
                self.scene.len(),
                self.scene.proxies().len()
            ));
            if let Some(selection) = &self.selection {
                lines.push(format!("Selected: {}", selection.name));
            }
        }
        lines
    }

    /// Write the scene snapshot to the configured path
    pub fn save(&self) -> scene::Result<()> {
        save_scene(&self.config.scene_path, &self.scene, &self.camera)
    }

    /// Replace the scene and camera with the configured snapshot
    pub fn load(&mut self) -> scene::Result<()> {
        load_scene(&self.config.scene_path, &mut self.scene, &mut self.camera, &self.config.camera)?;
        self.select(None);
        Ok(())
    }

    /// End of session: flush the scene to disk
    pub fn shutdown(&self) -> scene::Result<()> {
        log::info!("Shutting down editor");
        self.save()
    }

    /// Editor camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable editor camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The scene being edited
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Current selection
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Editable selection; changes reach the entity on the next [`update`](Self::update)
    pub fn selection_mut(&mut self) -> Option<&mut Selection> {
        if self.selection.is_some() {
            self.selection_edited = true;
        }
        self.selection.as_mut()
    }

    /// Overlay flags
    pub fn display(&self) -> DisplayFlags {
        self.display
    }

    /// Session configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Frame timing
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}

/// Size of the scene viewport inside a `width` x `height` window
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn panel_size(picking: &PickingCoordinator, width: u32, height: u32) -> (u32, u32) {
    let (x, y) = picking.viewport_offset;
    (
        width.saturating_sub(x.max(0.0) as u32),
        height.saturating_sub(y.max(0.0) as u32),
    )
}
