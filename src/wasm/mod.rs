use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::{App, SiteConfig};

mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let canvas = document
        .get_element_by_id("c")
        .ok_or("canvas not found")?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    // A malformed catalog stops the site here rather than misbehaving later.
    let config = SiteConfig::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let app = Rc::new(RefCell::new(App::new(config)));

    let overlay = overlay::Overlay::mount(&document, &app.borrow())?;
    render::start(canvas, app, overlay)?;
    log::info!("portfolio started");
    Ok(())
}
