//! Source format converters into the markup tree
//!
//! Each converter lives in its own submodule and produces a [`Document`].
//!
//! | Format | Module | Function |
//! |--------|--------|----------|
//! | HTML | [`html`] | [`parse_document()`] |
//!
//! The converter only needs to produce a valid `Document`; the tag
//! converters in [`crate::families`] handle the rest.
//!
//! [`Document`]: crate::node::Document

// =============================================================================
// HTML converter
// =============================================================================

pub mod html;

pub use self::html::parse_document;
