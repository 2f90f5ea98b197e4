// `HtmlMediaElement` behind the controller capability traits.
use js_sys::{Array, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlMediaElement};

use crate::components::media_controls::{
    Completion, FullscreenHost, MediaElement, PictureInPictureHost,
};
use crate::error::ControlError;

use super::{call_method, describe_js_error, js_error, settle};

/// A page-owned `<audio>` or `<video>` element.
pub struct WebMedia {
    element: HtmlMediaElement,
}

impl WebMedia {
    pub fn new(element: HtmlMediaElement) -> Self {
        Self { element }
    }

    pub fn find(document: &Document, id: &str) -> Option<Self> {
        document
            .get_element_by_id(id)?
            .dyn_into::<HtmlMediaElement>()
            .ok()
            .map(Self::new)
    }

    pub fn html(&self) -> &HtmlMediaElement {
        &self.element
    }

    pub fn error_code(&self) -> Option<u16> {
        self.element.error().map(|error| error.code())
    }

    fn document(&self) -> Option<Document> {
        self.element.owner_document()
    }
}

impl MediaElement for WebMedia {
    fn paused(&self) -> bool {
        self.element.paused()
    }

    fn play(&self) -> Result<(), ControlError> {
        let promise = self.element.play().map_err(js_error("play"))?;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("Playback did not start: {}", describe_js_error(&err));
            }
        });
        Ok(())
    }

    fn pause(&self) -> Result<(), ControlError> {
        self.element.pause().map_err(js_error("pause"))
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&self, secs: f64) {
        self.element.set_current_time(secs);
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn set_volume(&self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn muted(&self) -> bool {
        self.element.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn playback_rate(&self) -> f64 {
        self.element.playback_rate()
    }

    fn set_playback_rate(&self, rate: f64) {
        self.element.set_playback_rate(rate);
    }
}

impl FullscreenHost for WebMedia {
    fn is_fullscreen(&self) -> bool {
        self.document()
            .and_then(|doc| doc.fullscreen_element())
            .is_some()
    }

    fn request_fullscreen(&self, done: Completion) {
        let outcome = call_method(&self.element, "requestFullscreen", &Array::new());
        settle("requestFullscreen", outcome, done);
    }

    fn exit_fullscreen(&self, done: Completion) {
        let Some(document) = self.document() else {
            done(Err(ControlError::MissingElement("document".to_string())));
            return;
        };
        let outcome = call_method(&document, "exitFullscreen", &Array::new());
        settle("exitFullscreen", outcome, done);
    }
}

impl PictureInPictureHost for WebMedia {
    fn picture_in_picture_active(&self) -> bool {
        self.document()
            .and_then(|doc| Reflect::get(&doc, &"pictureInPictureElement".into()).ok())
            .map(|element| !element.is_null() && !element.is_undefined())
            .unwrap_or(false)
    }

    fn request_picture_in_picture(&self, done: Completion) {
        let outcome = call_method(&self.element, "requestPictureInPicture", &Array::new());
        settle("requestPictureInPicture", outcome, done);
    }

    fn exit_picture_in_picture(&self, done: Completion) {
        let Some(document) = self.document() else {
            done(Err(ControlError::MissingElement("document".to_string())));
            return;
        };
        let outcome = call_method(&document, "exitPictureInPicture", &Array::new());
        settle("exitPictureInPicture", outcome, done);
    }
}
