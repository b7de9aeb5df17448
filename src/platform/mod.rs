//! Platform runtime services (logging, panic hook).

cfg_if::cfg_if! {
    if #[cfg(feature = "dom-web")] {
        mod runtime_wasm;
        pub use runtime_wasm::{init_logging, install_panic_hook};
    } else if #[cfg(not(target_arch = "wasm32"))] {
        mod runtime_native;
        pub use runtime_native::{init_logging, install_panic_hook};
    } else {
        pub fn init_logging(_level: log::Level) {}
        pub fn install_panic_hook() {}
    }
}
