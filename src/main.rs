#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
fn main() {
    media_controls::web::logger::init(log::LevelFilter::Info);
    dioxus::launch(app::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("media-controls runs in the browser; build it for wasm32-unknown-unknown");
}
