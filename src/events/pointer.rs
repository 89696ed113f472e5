use super::with_app;
use crate::constants::ORBIT_BUTTON;
use crate::dom::Listeners;
use crate::frame::WebApp;
use crate::input;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Weak;
use web_sys as web;

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

pub fn wire(
    listeners: &mut Listeners,
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    app: &Weak<RefCell<WebApp>>,
) {
    wire_pointermove(listeners, window, app);
    wire_pointerdown(listeners, canvas, app);
    wire_pointerup(listeners, window, app);
    wire_wheel(listeners, canvas, app);
}

// Pointer events report client coordinates, the same space as the window
// inner size the mapper works in.
fn wire_pointermove(listeners: &mut Listeners, window: &web::Window, app: &Weak<RefCell<WebApp>>) {
    let app = app.clone();
    listeners.add::<web::PointerEvent>(window, "pointermove", move |ev| {
        let pos = client_pos(&ev);
        with_app(&app, |a| {
            let host = &mut a.host;
            if let Some(prev) = host.drag_from {
                let [dx, dy] = input::drag_delta(Some(prev.to_array()), pos.to_array());
                host.sketch.orbit_drag(dx, dy);
                host.drag_from = Some(pos);
            }
            host.sketch.pointer_move(pos);
        });
    });
}

fn wire_pointerdown(listeners: &mut Listeners, canvas: &web::HtmlCanvasElement, app: &Weak<RefCell<WebApp>>) {
    let app = app.clone();
    let capture = canvas.clone();
    listeners.add::<web::PointerEvent>(canvas, "pointerdown", move |ev| {
        if ev.button() != ORBIT_BUTTON {
            return;
        }
        _ = capture.set_pointer_capture(ev.pointer_id());
        let pos = client_pos(&ev);
        with_app(&app, |a| a.host.drag_from = Some(pos));
    });
}

fn wire_pointerup(listeners: &mut Listeners, window: &web::Window, app: &Weak<RefCell<WebApp>>) {
    let app = app.clone();
    listeners.add::<web::PointerEvent>(window, "pointerup", move |_| {
        with_app(&app, |a| a.host.drag_from = None);
    });
}

fn wire_wheel(listeners: &mut Listeners, canvas: &web::HtmlCanvasElement, app: &Weak<RefCell<WebApp>>) {
    let app = app.clone();
    listeners.add::<web::WheelEvent>(canvas, "wheel", move |ev| {
        ev.prevent_default();
        let dy = ev.delta_y() as f32;
        if dy == 0.0 {
            return;
        }
        // browsers report scroll-down as positive; that zooms out
        with_app(&app, |a| a.host.sketch.dolly(dy));
    });
}
