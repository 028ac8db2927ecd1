use learnease::{config, service_worker};
use log::error;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    if let Err(e) = service_worker::register() {
        error!("Service worker failed to start: {}", e);
    }
}
