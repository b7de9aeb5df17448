#![cfg_attr(target_arch = "wasm32", no_main)]

// Browser entry point for the Stud site script.
//
// Page side:
//   <script type="module">
//     import init from "./stud-web-dom.js";
//     init();
//   </script>

use wasm_bindgen::prelude::*;

/// Runs once when the wasm module is instantiated.
#[wasm_bindgen(start)]
pub fn wasm_start() {
    studsite::web::boot();
}

// Native builds: just provide a stub main so `cargo build --all-features` doesn't explode.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("stud-web-dom is only supported on wasm32 (browser) target.");
}
