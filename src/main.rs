mod app_router;
mod content_client;
mod input;
mod site_config;
mod site_core;
mod timers;
mod yew_app;

fn main() {
    console_error_panic_hook::set_once();
    yew_app::run();
}
