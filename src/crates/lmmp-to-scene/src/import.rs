use std::path::Path;

use lmmp_core::SongDocument;

use crate::error::Result;
use crate::factory::make_empty;
use crate::scene::{ObjectId, Scene};
use crate::time::{ImportContext, TimeScale, DEFAULT_BPM};
use crate::walker::PatternWalker;

pub const MMP_EXTENSION: &str = ".mmp";

/// Keyframes written per note
pub const KEYS_PER_NOTE: usize = 4;

/// Outcome of a successful import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub song: String,
    /// Carrier object all track objects are parented to
    pub root: ObjectId,
    pub bpm: i64,
    pub frames_per_tick: f64,
    pub tracks: usize,
    pub notes: usize,
    pub keyframes: usize,
}

/// Song name of a selected file: the file name without its `.mmp` suffix
pub fn song_name(file_name: &str) -> &str {
    file_name.strip_suffix(MMP_EXTENSION).unwrap_or(file_name)
}

/// Load `directory/<song>.mmp` and import it into `scene`.
///
/// `offset` pads every note envelope by that many frames on each side;
/// `ticks_per_tact` sets how many ticks make up one tact.
pub fn import_mmp<S: Scene + ?Sized>(
    scene: &mut S,
    file_name: &str,
    directory: &Path,
    offset: f64,
    ticks_per_tact: f64,
) -> Result<ImportSummary> {
    let song = song_name(file_name);
    let path = directory.join(format!("{}{}", song, MMP_EXTENSION));
    log::info!("Importing {}", path.display());

    let document = SongDocument::from_file(&path)?;
    import_document(scene, song, &document, offset, ticks_per_tact)
}

/// Import an already loaded song into `scene`, under a root object named `song`.
///
/// The scene's current frame is where tick 0 lands, and it is put back there
/// once all keys are in.
pub fn import_document<S: Scene + ?Sized>(
    scene: &mut S,
    song: &str,
    document: &SongDocument,
    offset: f64,
    ticks_per_tact: f64,
) -> Result<ImportSummary> {
    let bpm = document.bpm().unwrap_or(DEFAULT_BPM);
    let scale = TimeScale::new(bpm, ticks_per_tact, scene.fps())?;
    let start_frame = scene.current_frame();
    let ctx = ImportContext::new(scale, offset, start_frame);
    log::debug!(
        "{} bpm, {} ticks per tact at {} fps: {} frames per tick, start frame {}",
        bpm,
        ticks_per_tact,
        scene.fps(),
        scale.frames_per_tick(),
        start_frame
    );

    let root = make_empty(scene, song, None);

    let mut walker = PatternWalker::new(&mut *scene, &ctx);
    walker.walk(Some(root), document.root());
    let stats = walker.stats();

    scene.set_current_frame(start_frame);

    log::info!(
        "Imported '{}': {} track(s), {} note(s)",
        song,
        stats.tracks,
        stats.notes
    );

    Ok(ImportSummary {
        song: song.to_string(),
        root,
        bpm,
        frames_per_tick: scale.frames_per_tick(),
        tracks: stats.tracks,
        notes: stats.notes,
        keyframes: stats.notes * KEYS_PER_NOTE,
    })
}
