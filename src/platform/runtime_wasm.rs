use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

/// Route `log` records to the browser console. The logger is installed once;
/// later calls only adjust the level.
pub fn init_logging(level: log::Level) {
    LOGGER_INIT.call_once(|| {
        wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    });
    log::set_max_level(level.to_level_filter());
}

pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}
