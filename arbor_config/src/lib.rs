// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_config --heading-base-level=0

//! Arbor Config: the host-side collaborators of an arbor UI.
//!
//! - [`settings`]: plain startup values (colors, sizes, close policies) read
//!   from JSON, tolerant of values with the wrong shape.
//! - [`resource`]: a locator-keyed fetch boundary with scheme routing and
//!   pending handles that the UI thread polls.
//! - [`registry`]: process-wide lookup maps rebuilt by swapping in a fresh map.
//!
//! None of these touch the tree directly. Results are brought back to the UI
//! thread and applied there.
//!
//! ```
//! use arbor_config::Settings;
//! use arbor_tree::CloseOperation;
//!
//! let settings = Settings::from_json_str(
//!     r#"{ "window": { "close_operation": "Dispose", "background": [] } }"#,
//! )
//! .unwrap();
//! assert_eq!(settings.window.close_operation, CloseOperation::Dispose);
//! // The malformed background was skipped.
//! assert_eq!(settings.window.background, arbor_tree::Window::DEFAULT_BACKGROUND);
//! ```

pub mod registry;
pub mod resource;
pub mod settings;

pub use registry::Registry;
pub use resource::{Completer, Fetch, FetchError, Locator, Pending, Response, SchemeRouter};
pub use settings::Settings;

/// Errors reading a settings document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON.
    #[error("malformed settings document: {0}")]
    Json(#[from] serde_json::Error),
    /// The document is valid JSON but not an object.
    #[error("settings document must be an object, found {0}")]
    NotAnObject(&'static str),
}
