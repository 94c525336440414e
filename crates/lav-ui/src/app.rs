use rustc_hash::FxHashMap;

use lav_engine::coords::{Color, Vec2};
use lav_engine::core::{App as EngineApp, AppControl, FrameCtx, InputCtx, WindowCtx};
use lav_engine::device::GpuInit;
use lav_engine::input::InputEvent;
use lav_engine::logging::{init_logging, LoggingConfig};
use lav_engine::render::WgpuBinder;
use lav_engine::window::{LoopMode, Runtime, RuntimeConfig, WindowId};

use crate::window::{UiWindow, WindowRequest};

// ── Application ───────────────────────────────────────────────────────────

/// Top-level application builder.
///
/// Configure the first window, then hand [`run`](Self::run) a closure that
/// fills its tree:
///
/// ```rust,ignore
/// Application::new()
///     .title("Lav Studio")
///     .size(1280.0, 720.0)
///     .run(|window| {
///         let root = window.root();
///         let pane = window.tree_mut().create(Pane::new());
///         window.tree_mut().add(root, pane);
///     })?;
/// ```
pub struct Application {
    config: RuntimeConfig,
    gpu: GpuInit,
    mode: LoopMode,
    logging: LoggingConfig,
    clear_color: Color,
}

impl Application {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            gpu: GpuInit::default(),
            mode: LoopMode::Wait,
            logging: LoggingConfig::default(),
            clear_color: Color::from_hex(0x1e1f22ff),
        }
    }

    /// Set the title of the first window.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Set the first window's size in logical pixels.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.config.initial_size = Vec2::new(width, height);
        self
    }

    /// `true` blocks between OS events; `false` redraws continuously.
    pub fn wait_events(mut self, wait: bool) -> Self {
        self.mode = if wait { LoopMode::Wait } else { LoopMode::Poll };
        self
    }

    pub fn gpu(mut self, gpu: GpuInit) -> Self {
        self.gpu = gpu;
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Background colour of every window.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Installs logging, opens the first window, calls `build` on it, then
    /// blocks until the last window closes.
    ///
    /// Windows spawned later start empty.
    pub fn run<F>(self, build: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut UiWindow) + 'static,
    {
        init_logging(self.logging);
        log::info!("starting '{}' ({:?})", self.config.title, self.mode);

        let app = UiApp {
            build: Some(build),
            clear_color: self.clear_color,
            windows: FxHashMap::default(),
        };
        Runtime::run(self.config, self.gpu, self.mode, app)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiApp ─────────────────────────────────────────────────────────────────

struct WindowSlot {
    ui: UiWindow,
    /// Created on the first frame, once the window's GPU context exists.
    binder: Option<WgpuBinder>,
}

/// Engine-facing side of [`Application`]: one [`UiWindow`] per OS window.
struct UiApp<F> {
    build: Option<F>,
    clear_color: Color,
    windows: FxHashMap<WindowId, WindowSlot>,
}

impl<F> EngineApp for UiApp<F>
where
    F: FnOnce(&mut UiWindow) + 'static,
{
    fn on_window_created(&mut self, window: &WindowCtx<'_>, config: &RuntimeConfig) {
        let mut ui = UiWindow::new(config.title.clone(), window.logical_size());
        ui.set_clear_color(self.clear_color);
        if let Some(build) = self.build.take() {
            build(&mut ui);
        }
        log::debug!("window '{}' opened with {} nodes", config.title, ui.tree().len());
        self.windows.insert(window.id, WindowSlot { ui, binder: None });
    }

    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        let id = ctx.window.id;
        let Some(slot) = self.windows.get_mut(&id) else {
            return AppControl::Continue;
        };
        match slot.ui.handle_input(event) {
            Some(WindowRequest::Close) => ctx.runtime.close_window(id),
            Some(WindowRequest::SpawnWindow { title, size }) => {
                ctx.runtime.create_window(RuntimeConfig { title, initial_size: size });
            }
            None => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(slot) = self.windows.get_mut(&ctx.window.id) else {
            return AppControl::Continue;
        };
        let gpu = &*ctx.gpu;
        let binder = slot
            .binder
            .get_or_insert_with(|| WgpuBinder::new(gpu.device(), gpu.queue(), gpu.surface_format()));

        let outcome = slot.ui.run(binder);
        if let Some(cursor) = outcome.cursor {
            ctx.window.set_cursor(cursor);
        }

        ctx.render(slot.ui.clear_color(), |rctx, target| binder.flush(rctx, target))
    }

    fn on_window_closed(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_some() {
            log::debug!("window {id:?} closed, {} left", self.windows.len());
        }
    }
}
