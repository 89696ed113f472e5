use super::with_app;
use crate::dom::Listeners;
use crate::frame::WebApp;
use crate::input::{self, KeyAction};
use std::cell::RefCell;
use std::rc::Weak;
use web_sys as web;

pub fn wire(listeners: &mut Listeners, window: &web::Window, app: &Weak<RefCell<WebApp>>) {
    let app = app.clone();
    listeners.add::<web::KeyboardEvent>(window, "keydown", move |ev| {
        if ev.repeat() {
            return;
        }
        let Some(action) = input::key_action(&ev.key()) else {
            return;
        };
        with_app(&app, |a| match action {
            KeyAction::ResetView => a.host.sketch.reset_view(),
            // teardown runs on the next animation frame, outside this callback
            KeyAction::Teardown => a.frame_loop.stop(),
        });
    });
}
