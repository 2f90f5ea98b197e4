// Host page: renders the title chip and one media element, then owns the
// controllers attached to it.
use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use media_controls::web::{self, PageControllers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaKind {
    Audio,
    Video,
}

/// `?kind=audio|video&src=...&title=...`
#[derive(Debug, Clone, PartialEq)]
struct PageParams {
    kind: MediaKind,
    src: String,
    title: String,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            kind: MediaKind::Video,
            src: String::new(),
            title: "Untitled".to_string(),
        }
    }
}

fn parse_query(search: &str) -> PageParams {
    let mut params = PageParams::default();
    for pair in search.trim_start_matches('?').split('&') {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(&raw.replace('+', " "))
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        match key {
            "kind" if value.eq_ignore_ascii_case("audio") => params.kind = MediaKind::Audio,
            "kind" => params.kind = MediaKind::Video,
            "src" => params.src = value,
            "title" if !value.trim().is_empty() => params.title = value,
            _ => {}
        }
    }
    params
}

fn page_params() -> PageParams {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    parse_query(&search)
}

const SHORTCUT_HELP: &str = "Space/K play · ←/→ seek · ↑/↓ volume · M mute · \
    F fullscreen · P picture-in-picture · ,/. speed · 0 restart · End near end";

#[component]
pub fn App() -> Element {
    let params = use_hook(page_params);
    let controllers = use_hook(|| Rc::new(RefCell::new(None::<PageControllers>)));

    use_effect(move || {
        if controllers.borrow().is_some() {
            return;
        }
        match web::attach_page_controllers() {
            Ok(attached) => *controllers.borrow_mut() = Some(attached),
            Err(err) => log::error!("Media controls failed to start: {err}"),
        }
    });

    rsx! {
        div { class: "player-page",
            div { class: "title-chip",
                "Now playing: "
                strong { "{params.title}" }
            }
            if params.kind == MediaKind::Audio {
                audio {
                    id: "main-audio",
                    src: "{params.src}",
                    controls: true,
                    preload: "metadata",
                }
            } else {
                video {
                    id: "main-video",
                    src: "{params.src}",
                    controls: true,
                    preload: "metadata",
                }
            }
            p { class: "shortcut-help", "{SHORTCUT_HELP}" }
        }
    }
}
