use crate::frame::WebApp;
use plane_core::TextureData;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

async fn fetch_bytes(src: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(src)).await.map_err(js_err)?;
    let resp: web::Response = resp.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("{} returned {}", src, resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch and decode the media image, then hand it to the app if it is
/// still running. The placeholder stays up on any failure.
pub async fn load_media(src: String, app: Weak<RefCell<WebApp>>) {
    let tex = match fetch_bytes(&src).await {
        Ok(bytes) => match TextureData::decode(&bytes) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[loader] could not decode {}: {}", src, e);
                return;
            }
        },
        Err(e) => {
            log::warn!("[loader] could not fetch {}: {}", src, e);
            return;
        }
    };
    let Some(app) = app.upgrade() else {
        return;
    };
    let Ok(mut a) = app.try_borrow_mut() else {
        log::warn!("[loader] app busy, dropping {}", src);
        return;
    };
    if !a.frame_loop.is_running() {
        return;
    }
    log::info!("[loader] {} decoded at {}x{}", src, tex.width, tex.height);
    a.host.sketch.set_image_resolution(tex.width, tex.height);
    if let Some(g) = &mut a.host.gpu {
        g.set_media_texture(&tex);
    }
}
