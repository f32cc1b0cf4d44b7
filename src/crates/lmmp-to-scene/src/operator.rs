use std::path::Path;

use crate::error::Result;
use crate::import::{import_mmp, ImportSummary, MMP_EXTENSION};
use crate::scene::Scene;

pub const DEFAULT_OFFSET: f64 = 1.0;
pub const MIN_OFFSET: f64 = 0.0;
pub const DEFAULT_TICKS_PER_TACT: f64 = 192.0;
pub const MIN_TICKS_PER_TACT: f64 = 16.0;

/// Result of running the import command
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorStatus {
    Finished(ImportSummary),
    /// Nothing was imported; `report` is shown to the user
    Cancelled { report: String },
}

/// The user-facing "LMMP Pattern to Scene" command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOperator {
    offset: f64,
    ticks_per_tact: f64,
}

impl Default for ImportOperator {
    fn default() -> Self {
        Self::new(DEFAULT_OFFSET, DEFAULT_TICKS_PER_TACT)
    }
}

impl ImportOperator {
    /// Values below a parameter's minimum are raised to it.
    pub fn new(offset: f64, ticks_per_tact: f64) -> Self {
        Self {
            offset: offset.max(MIN_OFFSET),
            ticks_per_tact: ticks_per_tact.max(MIN_TICKS_PER_TACT),
        }
    }

    /// Frames of silence keyed before and after every note
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn ticks_per_tact(&self) -> f64 {
        self.ticks_per_tact
    }

    /// Import the selected `directory/file_name` into `scene`.
    ///
    /// A file that is not an `.mmp` is rejected before anything is read.
    pub fn execute<S: Scene + ?Sized>(
        &self,
        scene: &mut S,
        file_name: &str,
        directory: &Path,
    ) -> Result<OperatorStatus> {
        if !file_name.ends_with(MMP_EXTENSION) {
            log::error!("Rejected '{}': not an {} file", file_name, MMP_EXTENSION);
            return Ok(OperatorStatus::Cancelled {
                report: format!("Selected file wasn't valid, try {}", MMP_EXTENSION),
            });
        }

        let summary = import_mmp(scene, file_name, directory, self.offset, self.ticks_per_tact)?;
        Ok(OperatorStatus::Finished(summary))
    }
}
