use crate::error::{ImportError, Result};

/// Tempo used when no `<head>` carries a `bpm` attribute
pub const DEFAULT_BPM: i64 = 120;

/// Linear mapping from musical ticks to host frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    frames_per_tick: f64,
}

impl TimeScale {
    /// `60 / bpm / (ticks_per_tact / 4) * fps`
    pub fn new(bpm: i64, ticks_per_tact: f64, fps: f64) -> Result<Self> {
        if bpm == 0 {
            return Err(ImportError::ZeroTempo);
        }
        let frames_per_tick = 60.0 / bpm as f64 / (ticks_per_tact / 4.0) * fps;
        Ok(TimeScale { frames_per_tick })
    }

    pub fn frames_per_tick(&self) -> f64 {
        self.frames_per_tick
    }

    pub fn ticks_to_frames(&self, ticks: i64) -> f64 {
        ticks as f64 * self.frames_per_tick
    }
}

/// Everything a single import needs to place keyframes. Built once and never
/// modified while the song is walked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportContext {
    pub scale: TimeScale,
    /// Padding frames before a note's onset and after its release
    pub offset: f64,
    /// Host frame at which tick 0 lands
    pub start_frame: f64,
}

impl ImportContext {
    pub fn new(scale: TimeScale, offset: f64, start_frame: f64) -> Self {
        ImportContext {
            scale,
            offset,
            start_frame,
        }
    }

    /// Absolute frame of a song position given in ticks. Positions are summed
    /// in `f64` by callers, so any pair of integer attributes fits.
    pub fn frame_at(&self, ticks: f64) -> f64 {
        self.start_frame + ticks * self.scale.frames_per_tick()
    }
}
