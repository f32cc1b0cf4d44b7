//! LMMP pattern to scene importer
//!
//! Turns the patterns of an LMMP song (`.mmp`) into animated custom
//! properties in a 3D scene. Every pattern that holds notes becomes an empty
//! object, and every note becomes a four-key envelope on that object's
//! `note:<key>` property, placed in time by the song tempo and the scene's
//! frame rate.
//!
//! # Examples
//!
//! ```
//! use lmmp_core::SongDocument;
//! use lmmp_to_scene::{import_document, MemoryScene, Scene};
//!
//! let doc = SongDocument::parse(
//!     r#"<song><head bpm="120"/><pattern name="A" pos="0" len="192">
//!          <note key="C4" pos="0" len="48" vol="100"/>
//!        </pattern></song>"#,
//! ).unwrap();
//!
//! let mut scene = MemoryScene::new(24.0, 1.0);
//! let summary = import_document(&mut scene, "demo", &doc, 1.0, 192.0).unwrap();
//!
//! assert_eq!(summary.keyframes, 4);
//! assert_eq!(scene.current_frame(), 1.0);
//! ```
//!
//! # Main Components
//!
//! - [`Scene`]: the host scene graph, with [`MemoryScene`] as a standalone host
//! - [`TimeScale`] / [`ImportContext`]: tick to frame mapping for one import
//! - [`PatternWalker`]: expands the song tree into tracks and envelopes
//! - [`import_mmp`]: load a file and import it
//! - [`ImportOperator`]: the user-facing command with its parameters

pub mod envelope;
pub mod error;
pub mod factory;
pub mod import;
pub mod operator;
pub mod scene;
pub mod time;
pub mod walker;

pub use envelope::{emit_note_envelope, envelope, note_property};
pub use error::{ImportError, Result};
pub use factory::make_empty;
pub use import::{import_document, import_mmp, song_name, ImportSummary};
pub use operator::{ImportOperator, OperatorStatus};
pub use scene::{EmptyDisplay, Keyframe, MemoryScene, ObjectId, Property, Scene, SceneObject};
pub use time::{ImportContext, TimeScale, DEFAULT_BPM};
pub use walker::{PatternWalker, WalkStats};
