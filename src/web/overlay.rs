// Fixed-position feedback nodes appended to the page body.
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::components::media_controls::OverlaySurface;
use crate::error::ControlError;

use super::js_error;

pub const SPEED_INDICATOR_ID: &str = "playback-speed-indicator";
pub const MESSAGE_OVERLAY_ID: &str = "player-message-overlay";

const SPEED_INDICATOR_STYLE: &str = "position: fixed; top: 80px; right: 20px; \
    padding: 8px 12px; background: rgba(0, 0, 0, 0.8); color: white; \
    border-radius: 6px; font-size: 0.9rem; z-index: 1000; display: none; \
    backdrop-filter: blur(10px);";

const MESSAGE_OVERLAY_STYLE: &str = "position: fixed; top: 50%; left: 50%; \
    transform: translate(-50%, -50%); padding: 16px 24px; \
    background: rgba(0, 0, 0, 0.9); color: white; border-radius: 8px; \
    font-size: 1.2rem; font-weight: 500; z-index: 9999; display: none; \
    backdrop-filter: blur(10px); pointer-events: none;";

pub struct WebOverlay {
    element: HtmlElement,
}

impl WebOverlay {
    pub fn speed_indicator(document: &Document) -> Result<Self, ControlError> {
        Self::get_or_create(document, SPEED_INDICATOR_ID, SPEED_INDICATOR_STYLE)
    }

    pub fn message(document: &Document) -> Result<Self, ControlError> {
        Self::get_or_create(document, MESSAGE_OVERLAY_ID, MESSAGE_OVERLAY_STYLE)
    }

    fn get_or_create(document: &Document, id: &str, style: &str) -> Result<Self, ControlError> {
        if let Some(existing) = document.get_element_by_id(id) {
            if let Ok(element) = existing.dyn_into::<HtmlElement>() {
                return Ok(Self { element });
            }
        }

        let body = document
            .body()
            .ok_or_else(|| ControlError::MissingElement("body".to_string()))?;
        let element: HtmlElement = document
            .create_element("div")
            .map_err(js_error("createElement"))?
            .dyn_into()
            .map_err(|_| ControlError::MissingElement(id.to_string()))?;
        element.set_id(id);
        element
            .set_attribute("style", style)
            .map_err(js_error("setAttribute"))?;
        body.append_child(&element)
            .map_err(js_error("appendChild"))?;
        Ok(Self { element })
    }

    fn set_display(&self, value: &str) {
        if let Err(err) = self.element.style().set_property("display", value) {
            log::warn!("Overlay display update failed: {err:?}");
        }
    }
}

impl OverlaySurface for WebOverlay {
    fn show(&self, text: &str) {
        self.element.set_text_content(Some(text));
        self.set_display("block");
    }

    fn hide(&self) {
        self.set_display("none");
    }
}
