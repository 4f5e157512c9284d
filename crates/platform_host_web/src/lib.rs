//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! On other targets every adapter degrades to a no-op so host-side tests and tooling can link
//! against the same wiring.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod navigation;
pub mod storage;

pub use navigation::WebLocationNavigation;
pub use storage::WebPrefsStore;
