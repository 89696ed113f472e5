use crate::input;
use plane_core::{ElementBounds, ViewportPixelSize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window inner size in CSS pixels, the space pointer events report in.
pub fn viewport_size(window: &web::Window) -> ViewportPixelSize {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    ViewportPixelSize::new(w as f32, h as f32)
}

/// Live layout box of an element. Detached elements report zero.
pub fn element_bounds(el: &web::Element) -> ElementBounds {
    let rect = el.get_bounding_client_rect();
    ElementBounds::new(rect.width() as f32, rect.height() as f32)
}

/// Match the canvas backing store to its CSS size times `pixel_ratio`.
/// Returns the new backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, pixel_ratio: f64) -> (u32, u32) {
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = input::backing_size(rect.width(), rect.height(), pixel_ratio);
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
    (w, h)
}

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

struct Observer {
    observer: web::ResizeObserver,
    _closure: Closure<dyn FnMut(js_sys::Array)>,
}

/// Event listeners and resize observers registered by the app, kept so
/// teardown can remove them.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Listener>,
    observers: Vec<Observer>,
}

impl Listeners {
    /// Register `handler` for `kind` events on `target`, downcasting the
    /// event to `E`. Events of another type are dropped.
    pub fn add<E>(&mut self, target: &web::EventTarget, kind: &'static str, mut handler: impl FnMut(E) + 'static)
    where
        E: JsCast + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => self.entries.push(Listener {
                target: target.clone(),
                kind,
                closure,
            }),
            Err(e) => log::warn!("[dom] could not listen for {}: {:?}", kind, e),
        }
    }

    /// Call `handler` whenever `target`'s layout box changes size.
    pub fn observe_resize(&mut self, target: &web::Element, mut handler: impl FnMut() + 'static) {
        let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| handler())
            as Box<dyn FnMut(js_sys::Array)>);
        match web::ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(target);
                self.observers.push(Observer {
                    observer,
                    _closure: closure,
                });
            }
            Err(e) => log::warn!("[dom] ResizeObserver unavailable: {:?}", e),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len() + self.observers.len()
    }

    pub fn detach_all(&mut self) {
        let n = self.len();
        for l in self.entries.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
        for o in self.observers.drain(..) {
            o.observer.disconnect();
        }
        if n > 0 {
            log::info!("[dom] detached {} listeners", n);
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.detach_all();
    }
}
