//! Stud site script
//!
//! Client-side behaviors for the Stud marketing pages, compiled to WebAssembly:
//!
//! - **theme**: light/dark toggle persisted in `localStorage`
//! - **reveal**: GSAP entrance and scroll animations with a visibility fallback
//! - **nav**: active-link marking and the mobile drawer (backdrop, focus trap)
//! - **color_swap**: product color swatches
//! - **size_guide**: men/women measurement tables
//!
//! Each feature is a DOM-free component driven through a small surface trait,
//! so the logic builds and tests natively. The `web` module (feature
//! `dom-web`) implements those traits with web-sys.
//!
//! ## Usage
//!
//! ```bash
//! cargo test
//! cargo build --target wasm32-unknown-unknown --features dom-web --bin stud-web-dom
//! ```

pub mod color_swap;
pub mod config;
pub mod nav;
pub mod reveal;
pub mod size_guide;
pub mod store;
pub mod theme;

// Platform abstraction layer (logging, panic hook)
pub mod platform;

// Browser bindings (wasm32 + dom-web)
#[cfg(feature = "dom-web")]
pub mod web;

pub use config::SiteConfig;
pub use store::{KvStore, MemoryStore};
