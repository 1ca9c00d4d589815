mod app_config;
mod app_core;
mod catalog_loader;
mod local_store;
mod stylesheet;
mod yew_app;

fn main() {
    yew::Renderer::<yew_app::App>::new().render();
}
