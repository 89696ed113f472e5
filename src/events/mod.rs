use crate::dom::Listeners;
use crate::frame::WebApp;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

mod keyboard;
mod pointer;

/// Run `f` against the app if it is still alive and not already borrowed.
fn with_app(app: &Weak<RefCell<WebApp>>, f: impl FnOnce(&mut WebApp)) {
    let Some(app) = app.upgrade() else {
        return;
    };
    let Ok(mut guard) = app.try_borrow_mut() else {
        log::debug!("[events] app busy, event dropped");
        return;
    };
    f(&mut guard);
}

/// Register every page listener the app reacts to.
pub fn wire(app: &Rc<RefCell<WebApp>>) -> Listeners {
    let mut listeners = Listeners::default();
    let (window, canvas, tracked) = {
        let a = app.borrow();
        (a.host.window.clone(), a.host.canvas.clone(), a.host.tracked.clone())
    };
    let weak = Rc::downgrade(app);

    let w = weak.clone();
    let win = window.clone();
    listeners.add::<web_sys::Event>(&window, "resize", move |_| {
        let viewport = crate::dom::viewport_size(&win);
        with_app(&w, |a| a.frame_loop.request_resize(viewport));
    });

    // layout or CSS can resize the tracked element without a window resize
    let w = weak.clone();
    listeners.observe_resize(&tracked, move || {
        with_app(&w, |a| a.frame_loop.request_bounds_refresh());
    });

    pointer::wire(&mut listeners, &window, &canvas, &weak);
    keyboard::wire(&mut listeners, &window, &weak);
    log::info!("[events] wired {} listeners", listeners.len());
    listeners
}
