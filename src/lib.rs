//! # folio
//!
//! Rust + WASM behaviors for a static portfolio page. The page ships plain
//! HTML and CSS; this crate attaches the interactive parts: navbar
//! hide-on-scroll, mobile menu, smooth anchors, contact form submission,
//! reveal-on-scroll, slideshows, project filtering and pagination, the
//! persisted like counters, and the theme toggle.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`state`] | Pure state machines: daily counter, carousel, toggle registry, paginator, scroll |
//! | [`store`] | Key-value storage adapter (in-memory and `localStorage` backends) |
//! | [`render`] | Render-target traits plus the in-memory page and the DOM binding |
//! | [`timer`] | Cancel-on-drop timer handles (virtual clock and `gloo-timers`) |
//! | [`runtime`] | Widget discovery, event dispatch, and timer ownership |
//! | [`config`] | Selectors, thresholds, and carousel definitions |
//! | [`net`] | Contact form submission |
//! | [`util`] | Theme and date helpers |
//!
//! Everything outside `render::dom`, `store::local`, and the browser entry
//! point builds and tests on the host without a browser.

pub mod config;
pub mod error;
pub mod net;
pub mod render;
pub mod runtime;
pub mod state;
pub mod store;
pub mod timer;
pub mod util;

#[cfg(feature = "hydrate")]
mod browser;

pub use config::SiteConfig;
pub use error::FolioError;
pub use runtime::Runtime;
