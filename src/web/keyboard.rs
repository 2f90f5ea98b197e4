use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use crate::components::media_controls::KeyInput;

/// Walk up from the event target looking for something the user types into.
fn is_editable_shortcut_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<web_sys::Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element.has_attribute("contenteditable")
            && element
                .get_attribute("contenteditable")
                .map(|v| v.to_ascii_lowercase() != "false")
                .unwrap_or(true)
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}

pub fn key_input(event: &KeyboardEvent) -> KeyInput {
    KeyInput {
        key: event.key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
        editable_target: is_editable_shortcut_target(event),
        composing: event.is_composing(),
    }
}
