//! Document model for LMMP pattern files
//!
//! An `.mmp` file is an XML tree of containers, `<pattern>` elements and the
//! `<note>` elements they hold. This crate loads that tree into typed
//! [`Node`]s so the converters working on it never deal with raw XML.
//!
//! # Examples
//!
//! ```
//! use lmmp_core::SongDocument;
//!
//! let doc = SongDocument::parse(
//!     r#"<song><head bpm="120"/><pattern name="A" pos="0" len="192">
//!          <note key="C4" pos="0" len="48" vol="100"/>
//!        </pattern></song>"#,
//! ).unwrap();
//!
//! assert_eq!(doc.bpm(), Some(120));
//! ```

pub mod document;
pub mod error;
pub mod node;

pub use document::SongDocument;
pub use error::{DocumentError, Result};
pub use node::{Attributes, Node, Note, Pattern};
