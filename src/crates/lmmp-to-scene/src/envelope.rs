use crate::scene::{Keyframe, ObjectId, Scene};
use crate::time::ImportContext;

pub const NOTE_PROPERTY_PREFIX: &str = "note:";

/// Name of the custom property animating a note key
pub fn note_property(key: &str) -> String {
    format!("{}{}", NOTE_PROPERTY_PREFIX, key)
}

/// The four keys of a note: silent `offset` frames before the onset, `vol`
/// from onset to release, silent again `offset` frames after the release.
///
/// A negative `len` is passed through and yields a reversed envelope.
pub fn envelope(pos: f64, len: f64, vol: f64, offset: f64) -> [Keyframe; 4] {
    [
        Keyframe::new(pos - offset, 0.0),
        Keyframe::new(pos, vol),
        Keyframe::new(pos + len, vol),
        Keyframe::new(pos + len + offset, 0.0),
    ]
}

/// Key the envelope of one note onto `track`. `pos` is an absolute frame,
/// `len` a length in frames.
pub fn emit_note_envelope<S: Scene + ?Sized>(
    scene: &mut S,
    ctx: &ImportContext,
    track: ObjectId,
    key: &str,
    pos: f64,
    len: f64,
    vol: f64,
) {
    let property = note_property(key);
    for keyframe in envelope(pos, len, vol, ctx.offset) {
        scene.insert_keyframe(track, &property, keyframe.frame, keyframe.value);
    }
}
