mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use app::App;

#[cfg(feature = "desktop")]
fn main() {
    let mut desktop_config = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Campus Admin"));
    match config::default_webview_data_dir() {
        Ok(dir) => desktop_config = desktop_config.with_data_directory(dir),
        Err(err) => eprintln!("using default webview data directory: {err:#}"),
    }

    dioxus::LaunchBuilder::desktop().with_cfg(desktop_config).launch(App);
}

#[cfg(not(feature = "desktop"))]
fn main() {
    dioxus::launch(App);
}
