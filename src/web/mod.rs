//! Browser bindings for the media controllers. Only built for `wasm32`.
//!
//! Optional browser APIs (media session, picture-in-picture, fullscreen) are
//! reached through `js_sys::Reflect` so they can be feature-probed at runtime
//! instead of assumed by the bindings.

pub mod element;
pub mod keyboard;
pub mod logger;
pub mod overlay;
pub mod page;
pub mod session;
pub mod timer;

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::components::media_controls::{Capabilities, Completion};
use crate::error::ControlError;

pub use page::{attach_page_controllers, PageControllers};

/// Probe the optional browser features once.
pub fn probe_capabilities() -> Capabilities {
    let Some(window) = web_sys::window() else {
        return Capabilities::none();
    };

    let session = Reflect::get(&window.navigator(), &"mediaSession".into())
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null());
    let position_state = session
        .as_ref()
        .map(|session| has_property(session, "setPositionState"))
        .unwrap_or(false);

    let document = window.document();
    let fullscreen = document
        .as_ref()
        .map(|doc| has_property(doc, "exitFullscreen"))
        .unwrap_or(false);
    let picture_in_picture = document
        .as_ref()
        .and_then(|doc| Reflect::get(doc, &"pictureInPictureEnabled".into()).ok())
        .and_then(|value| value.as_bool())
        .unwrap_or(false);

    let capabilities = Capabilities {
        media_session: session.is_some(),
        position_state,
        fullscreen,
        picture_in_picture,
    };
    log::debug!("Browser capabilities: {capabilities:?}");
    capabilities
}

pub(crate) fn has_property(target: &JsValue, name: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

/// Look up and invoke `target[name](...args)`.
pub(crate) fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, JsValue> {
    let function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into::<Function>()?;
    Reflect::apply(&function, target, args)
}

pub(crate) fn describe_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            Reflect::get(value, &"message".into())
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) fn js_error(operation: &'static str) -> impl Fn(JsValue) -> ControlError {
    move |err| ControlError::rejected(operation, describe_js_error(&err))
}

/// Report the outcome of a browser call to `done`, waiting on the returned
/// promise when there is one.
pub(crate) fn settle(
    operation: &'static str,
    outcome: Result<JsValue, JsValue>,
    done: Completion,
) {
    let value = match outcome {
        Ok(value) => value,
        Err(err) => {
            done(Err(js_error(operation)(err)));
            return;
        }
    };
    match value.dyn_into::<Promise>() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(js_error(operation));
            done(result);
        }),
        Err(_) => done(Ok(())),
    }
}
