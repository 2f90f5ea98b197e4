// `navigator.mediaSession` behind `MediaSessionHost`.
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use crate::components::media_controls::host::ActionHandler;
use crate::components::media_controls::session::PositionState;
use crate::components::media_controls::{
    ActionDetails, MediaSessionHost, SessionAction, SessionMetadata, SessionPlaybackState,
};
use crate::error::ControlError;

use super::{call_method, js_error};

pub struct WebMediaSession {
    session: JsValue,
}

impl WebMediaSession {
    /// `None` when the browser has no `navigator.mediaSession`.
    pub fn probe() -> Option<Self> {
        let navigator = web_sys::window()?.navigator();
        let session = Reflect::get(&navigator, &"mediaSession".into()).ok()?;
        if session.is_undefined() || session.is_null() {
            return None;
        }
        Some(Self { session })
    }
}

fn set_field(target: &JsValue, key: &str, value: &JsValue) -> Result<(), ControlError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error("mediaSession"))
}

fn number_field(details: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(details, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_f64())
}

fn action_details(details: &JsValue) -> ActionDetails {
    if details.is_undefined() || details.is_null() {
        return ActionDetails::default();
    }
    ActionDetails {
        seek_offset: number_field(details, "seekOffset"),
        seek_time: number_field(details, "seekTime"),
    }
}

impl MediaSessionHost for WebMediaSession {
    fn set_metadata(&self, metadata: &SessionMetadata) -> Result<(), ControlError> {
        let init = Object::new();
        set_field(&init, "title", &JsValue::from_str(&metadata.title))?;
        set_field(&init, "artist", &JsValue::from_str(&metadata.artist))?;
        set_field(&init, "album", &JsValue::from_str(&metadata.album))?;

        let artwork = Array::new();
        for image in &metadata.artwork {
            let entry = Object::new();
            set_field(&entry, "src", &JsValue::from_str(&image.src))?;
            set_field(&entry, "sizes", &JsValue::from_str(&image.sizes))?;
            set_field(&entry, "type", &JsValue::from_str(&image.mime_type))?;
            artwork.push(&entry);
        }
        set_field(&init, "artwork", &artwork)?;

        let constructor = Reflect::get(&js_sys::global(), &"MediaMetadata".into())
            .map_err(js_error("MediaMetadata"))?
            .dyn_into::<Function>()
            .map_err(js_error("MediaMetadata"))?;
        let value = Reflect::construct(&constructor, &Array::of1(&init))
            .map_err(js_error("MediaMetadata"))?;
        set_field(&self.session, "metadata", &value)
    }

    fn set_action_handler(
        &self,
        action: SessionAction,
        handler: ActionHandler,
    ) -> Result<(), ControlError> {
        let callback = Closure::wrap(Box::new(move |details: JsValue| {
            handler(action_details(&details));
        }) as Box<dyn FnMut(JsValue)>);
        call_method(
            &self.session,
            "setActionHandler",
            &Array::of2(&JsValue::from_str(action.as_str()), callback.as_ref()),
        )
        .map_err(js_error("setActionHandler"))?;
        // The session keeps the handler for the life of the page.
        callback.forget();
        Ok(())
    }

    fn set_playback_state(&self, state: SessionPlaybackState) -> Result<(), ControlError> {
        set_field(
            &self.session,
            "playbackState",
            &JsValue::from_str(state.as_str()),
        )
    }

    fn set_position_state(&self, state: PositionState) -> Result<(), ControlError> {
        let init = Object::new();
        set_field(&init, "duration", &JsValue::from_f64(state.duration))?;
        set_field(&init, "playbackRate", &JsValue::from_f64(state.playback_rate))?;
        set_field(&init, "position", &JsValue::from_f64(state.position))?;
        call_method(&self.session, "setPositionState", &Array::of1(&init))
            .map(|_| ())
            .map_err(js_error("setPositionState"))
    }
}
