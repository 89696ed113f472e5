use crate::dom;
use glam::Vec2;
use instant::Instant;
use plane_core::{FrameHost, FrameLoop, FrameOutcome, LoopState, Sketch, ViewportPixelSize};
use plane_gpu::GpuState;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the frame loop drives on the page.
pub struct WebHost {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    /// Element whose layout box the plane matches.
    pub tracked: web::Element,
    pub sketch: Sketch,
    pub gpu: Option<GpuState>,
    pub listeners: dom::Listeners,
    pub last_instant: Instant,
    /// Last pointer position while an orbit drag is active.
    pub drag_from: Option<Vec2>,
}

pub struct WebApp {
    pub frame_loop: FrameLoop,
    pub host: WebHost,
}

impl WebHost {
    fn sync_backing_size(&mut self) {
        let ratio = self
            .sketch
            .config()
            .pixel_ratio(self.window.device_pixel_ratio());
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas, ratio);
        if let Some(g) = &mut self.gpu {
            g.resize(w, h);
        }
    }
}

impl FrameHost for WebHost {
    fn apply_resize(&mut self, viewport: ViewportPixelSize) {
        self.sync_backing_size();
        // bounds are read after the canvas settles so they reflect this layout
        let bounds = dom::element_bounds(&self.tracked);
        self.sketch.resize(viewport, bounds);
    }

    fn refresh_bounds(&mut self) {
        // the tracked element may be the canvas itself
        self.sync_backing_size();
        let bounds = dom::element_bounds(&self.tracked);
        if bounds != self.sketch.mapper().bounds() {
            self.sketch.set_element_bounds(bounds);
        }
    }

    fn render_frame(&mut self) -> FrameOutcome {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        self.sketch.advance(dt.as_secs_f32());

        let Some(g) = &mut self.gpu else {
            return FrameOutcome::Skipped;
        };
        match g.render(&self.sketch) {
            Ok(()) => FrameOutcome::Rendered,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                g.reconfigure();
                FrameOutcome::Skipped
            }
            Err(wgpu::SurfaceError::OutOfMemory) => FrameOutcome::Fatal,
            Err(e) => {
                log::warn!("render error: {:?}", e);
                FrameOutcome::Skipped
            }
        }
    }

    fn teardown(&mut self) {
        self.listeners.detach_all();
        self.gpu = None;
        self.drag_from = None;
        log::info!("[web] torn down");
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Drive the frame loop from requestAnimationFrame until it stops.
///
/// The callback holds only a weak handle: once the app is released it
/// does nothing and is not re-armed.
pub fn start_loop(app: Weak<RefCell<WebApp>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(app) = app.upgrade() else {
            return;
        };
        let state = {
            let mut guard = app.borrow_mut();
            let WebApp { frame_loop, host } = &mut *guard;
            frame_loop.step(host)
        };
        drop(app);
        match state {
            LoopState::Running => request_frame(&tick_clone),
            LoopState::Stopped => crate::release_app(),
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
