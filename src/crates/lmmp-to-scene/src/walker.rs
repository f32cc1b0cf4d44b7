use lmmp_core::{Node, Pattern};

use crate::envelope::emit_note_envelope;
use crate::factory::make_empty;
use crate::scene::{ObjectId, Scene};
use crate::time::ImportContext;

/// What a walk put into the scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub tracks: usize,
    pub notes: usize,
}

/// Expands a song tree into track objects and note envelopes
pub struct PatternWalker<'a, S: Scene + ?Sized> {
    scene: &'a mut S,
    ctx: &'a ImportContext,
    stats: WalkStats,
}

impl<'a, S: Scene + ?Sized> PatternWalker<'a, S> {
    pub fn new(scene: &'a mut S, ctx: &'a ImportContext) -> Self {
        Self {
            scene,
            ctx,
            stats: WalkStats::default(),
        }
    }

    /// Walk `node`, parenting every track object to `parent`.
    ///
    /// Returns `false` when `node` was a pattern holding notes (its children
    /// are not descended into), `true` when its children were walked.
    pub fn walk(&mut self, parent: Option<ObjectId>, node: &Node) -> bool {
        if let Some(pattern) = node.as_pattern().filter(|p| p.is_leaf()) {
            self.expand(parent, pattern);
            return false;
        }

        for child in node.children() {
            self.walk(parent, child);
        }
        true
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    fn expand(&mut self, parent: Option<ObjectId>, pattern: &Pattern) {
        let track = make_empty(&mut *self.scene, &pattern.name, parent);
        self.stats.tracks += 1;

        let mut notes = 0;
        for note in pattern.notes() {
            let pos = self.ctx.frame_at(pattern.pos as f64 + note.pos as f64);
            let len = self.ctx.scale.ticks_to_frames(note.len);
            emit_note_envelope(
                &mut *self.scene,
                self.ctx,
                track,
                &note.key,
                pos,
                len,
                note.vol as f64,
            );
            notes += 1;
        }
        self.stats.notes += notes;

        let dropped = pattern.children.len() - notes;
        if dropped > 0 {
            log::warn!(
                "Pattern '{}' holds notes, ignoring its {} other child element(s)",
                pattern.name,
                dropped
            );
        }
        log::debug!(
            "Pattern '{}' at tick {}: {} note(s)",
            pattern.name,
            pattern.pos,
            notes
        );
    }
}
