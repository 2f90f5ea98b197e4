// Page bootstrap: find the media elements, build their controllers, and wire
// browser events into them.
use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlMediaElement, KeyboardEvent};

use crate::components::media_controls::{
    AudioController, KeyInput, MediaEvent, MediaSessionHost, VideoController, VideoOverlays,
};
use crate::error::ControlError;
use crate::settings::PlayerSettings;
use crate::utils;

use super::element::WebMedia;
use super::keyboard::key_input;
use super::overlay::WebOverlay;
use super::session::WebMediaSession;
use super::timer::GlooScheduler;
use super::{js_error, probe_capabilities};

pub const AUDIO_ELEMENT_ID: &str = "main-audio";
pub const VIDEO_ELEMENT_ID: &str = "main-video";
pub const TITLE_SELECTOR: &str = ".title-chip";
const SETTINGS_KEY: &str = "media-controls.settings";

pub type WebAudioController = AudioController<WebMedia>;
pub type WebVideoController = VideoController<WebMedia, WebOverlay, GlooScheduler>;

/// Controllers attached to the current page. The host application keeps this
/// value for as long as the page is alive.
#[derive(Clone, Default)]
pub struct PageControllers {
    pub audio: Option<Rc<WebAudioController>>,
    pub video: Option<Rc<WebVideoController>>,
}

/// Read stored settings, falling back to defaults when absent or invalid.
pub fn load_settings() -> PlayerSettings {
    let raw = match LocalStorage::raw().get_item(SETTINGS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return PlayerSettings::default(),
        Err(err) => {
            log::warn!("Settings storage unavailable: {err:?}");
            return PlayerSettings::default();
        }
    };
    PlayerSettings::from_json(&raw).unwrap_or_else(|err| {
        log::warn!("{err}; using default player settings");
        PlayerSettings::default()
    })
}

fn page_title(document: &Document) -> Option<String> {
    document
        .query_selector(TITLE_SELECTOR)
        .ok()
        .flatten()
        .and_then(|chip| chip.text_content())
        .and_then(|text| utils::clean_title(&text))
}

fn probe_session() -> Option<Rc<dyn MediaSessionHost>> {
    WebMediaSession::probe().map(|session| Rc::new(session) as Rc<dyn MediaSessionHost>)
}

fn bind_keys<F>(document: &Document, handler: F) -> Result<(), ControlError>
where
    F: Fn(&KeyInput) -> bool + 'static,
{
    let key_cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.default_prevented() {
            return;
        }
        if handler(&key_input(&event)) {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document
        .add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref())
        .map_err(js_error("addEventListener"))?;
    key_cb.forget();
    Ok(())
}

fn bind_media_events<F>(media: &Rc<WebMedia>, handler: F) -> Result<(), ControlError>
where
    F: Fn(MediaEvent) + 'static,
{
    let handler: Rc<dyn Fn(MediaEvent)> = Rc::new(handler);
    let element: &HtmlMediaElement = media.html();

    for name in ["play", "pause", "ended", "timeupdate", "error"] {
        let handler = Rc::clone(&handler);
        let media = Rc::clone(media);
        let callback = Closure::wrap(Box::new(move || {
            let event = match name {
                "play" => MediaEvent::Play,
                "pause" => MediaEvent::Pause,
                "ended" => MediaEvent::Ended,
                "timeupdate" => MediaEvent::TimeUpdate,
                _ => MediaEvent::Error(media.error_code()),
            };
            handler(event);
        }) as Box<dyn FnMut()>);
        element
            .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
            .map_err(js_error("addEventListener"))?;
        callback.forget();
    }
    Ok(())
}

fn attach_audio(
    document: &Document,
    audio: WebMedia,
    settings: PlayerSettings,
    title: Option<String>,
) -> Result<Rc<WebAudioController>, ControlError> {
    let audio = Rc::new(audio);
    let controller = AudioController::new(Rc::clone(&audio), settings, probe_capabilities());

    let keys = Rc::clone(&controller);
    bind_keys(document, move |input| keys.handle_key(input))?;
    let events = Rc::clone(&controller);
    bind_media_events(&audio, move |event| events.handle_media_event(event))?;

    controller.init_media_session(probe_session(), title);
    Ok(controller)
}

fn attach_video(
    document: &Document,
    video: WebMedia,
    settings: PlayerSettings,
    title: Option<String>,
) -> Result<Rc<WebVideoController>, ControlError> {
    let video = Rc::new(video);
    let overlays = VideoOverlays {
        message: Rc::new(WebOverlay::message(document)?),
        speed_indicator: Rc::new(WebOverlay::speed_indicator(document)?),
    };
    let controller = VideoController::new(
        Rc::clone(&video),
        overlays,
        Rc::new(GlooScheduler),
        settings,
        probe_capabilities(),
    );

    let keys = Rc::clone(&controller);
    bind_keys(document, move |input| keys.handle_key(input))?;
    let events = Rc::clone(&controller);
    bind_media_events(&video, move |event| events.handle_media_event(event))?;

    // Session handlers are registered on the finished controller.
    controller.init_media_session(probe_session(), title);
    Ok(controller)
}

/// Attach a controller to `#main-audio` and `#main-video` when present.
pub fn attach_page_controllers() -> Result<PageControllers, ControlError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ControlError::MissingElement("document".to_string()))?;
    let settings = load_settings();
    let title = page_title(&document);

    let mut controllers = PageControllers::default();

    if let Some(audio) = WebMedia::find(&document, AUDIO_ELEMENT_ID) {
        match attach_audio(&document, audio, settings.clone(), title.clone()) {
            Ok(controller) => controllers.audio = Some(controller),
            Err(err) => log::error!("Audio controls unavailable: {err}"),
        }
    }

    if let Some(video) = WebMedia::find(&document, VIDEO_ELEMENT_ID) {
        match attach_video(&document, video, settings, title) {
            Ok(controller) => controllers.video = Some(controller),
            Err(err) => log::error!("Video controls unavailable: {err}"),
        }
    }

    if controllers.audio.is_none() && controllers.video.is_none() {
        log::debug!("No media element found on this page");
    }
    Ok(controllers)
}
