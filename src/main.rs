use learnease::app::App;
use learnease::config;
use log::info;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting LearnEase");
    yew::Renderer::<App>::new().render();
}
