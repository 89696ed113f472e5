#![cfg(target_arch = "wasm32")]
use instant::Instant;
use plane_core::{FrameLoop, Sketch, SketchConfig};
use plane_gpu::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;

use constants::{CANVAS_SELECTOR, MEDIA_SELECTOR};
use frame::{WebApp, WebHost};

thread_local! {
    // Sole strong owner of the running app; closures hold weak handles.
    static APP: RefCell<Option<Rc<RefCell<WebApp>>>> = const { RefCell::new(None) };
}

pub(crate) fn release_app() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    if app.is_some() {
        log::info!("[web] released");
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("media-plane-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the render loop. Listeners and GPU resources are released on the
/// next animation frame.
#[wasm_bindgen]
pub fn stop() {
    APP.with(|slot| {
        if let Some(app) = slot.borrow().as_ref() {
            match app.try_borrow_mut() {
                Ok(mut a) => a.frame_loop.stop(),
                Err(_) => log::warn!("[web] stop requested while busy"),
            }
        }
    });
}

/// Page-driven overrides: `data-cube` on the canvas adds the cube, `data-src`
/// on the media element picks the image.
fn config_from_page(canvas: &web::HtmlCanvasElement, media: Option<&web::Element>) -> SketchConfig {
    let mut config = SketchConfig {
        with_cube: canvas.has_attribute("data-cube"),
        ..SketchConfig::default()
    };
    if let Some(src) = media.and_then(|m| m.get_attribute("data-src")) {
        config.image_src = src;
    }
    config
}

async fn init() -> anyhow::Result<()> {
    if APP.with(|slot| slot.borrow().is_some()) {
        log::warn!("[web] already running");
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .query_selector(CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", CANVAS_SELECTOR))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let media = document.query_selector(MEDIA_SELECTOR).ok().flatten();
    let config = config_from_page(&canvas, media.as_ref());
    let tracked: web::Element = media.unwrap_or_else(|| canvas.clone().into());

    let ratio = config.pixel_ratio(window.device_pixel_ratio());
    let (bw, bh) = dom::sync_canvas_backing_size(&canvas, ratio);
    let viewport = dom::viewport_size(&window);
    let bounds = dom::element_bounds(&tracked);

    let mut sketch = Sketch::new(config, viewport, bounds)?;
    sketch.on_scale(|s| log::info!("[web] mesh scale ({:.3}, {:.3})", s.x, s.y));
    sketch.on_uv(|uv| log::debug!("[web] uv ({:.3}, {:.3})", uv.x, uv.y));

    let instance = wgpu::Instance::default();
    let gpu = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
        Ok(surface) => match GpuState::new(&instance, surface, bw, bh, &sketch).await {
            Ok(g) => Some(g),
            Err(e) => {
                log::error!("[web] WebGPU init failed: {:?}", e);
                None
            }
        },
        Err(e) => {
            log::error!("[web] no surface: {:?}", e);
            None
        }
    };

    let image_src = sketch.config().image_src.clone();
    let app = Rc::new(RefCell::new(WebApp {
        frame_loop: FrameLoop::new(),
        host: WebHost {
            window,
            canvas,
            tracked,
            sketch,
            gpu,
            listeners: dom::Listeners::default(),
            last_instant: Instant::now(),
            drag_from: None,
        },
    }));
    let listeners = events::wire(&app);
    app.borrow_mut().host.listeners = listeners;

    let weak = Rc::downgrade(&app);
    APP.with(|slot| *slot.borrow_mut() = Some(app));

    spawn_local(loader::load_media(image_src, weak.clone()));
    frame::start_loop(weak);
    Ok(())
}
