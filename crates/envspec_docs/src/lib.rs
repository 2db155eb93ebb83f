//! # envspec_docs
//!
//! Markdown documentation for the variables declared in an
//! [`envspec_core::Registry`].
//!
//! The document lists every variable with its description, the values it
//! accepts, its default and any related variables. Rendering only reads the
//! declarations, so it never resolves or seals a variable.
//!
//! ## Example
//!
//! ```rust,no_run
//! use envspec_core::Registry;
//! use envspec_docs::MarkdownRenderer;
//!
//! let registry = Registry::global();
//! let markdown = MarkdownRenderer::new(&registry)
//!     .with_app_name("my-service")
//!     .render();
//! println!("{}", markdown);
//! ```

pub mod error;
pub mod markdown;

pub use error::{DocsError, DocsResult};
pub use markdown::MarkdownRenderer;
