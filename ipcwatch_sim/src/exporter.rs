//! JSON exporter for offline inspection of a run.
//!
//! Records one stats frame per refresh interval and writes the whole
//! run as pretty JSON at the end.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

use ipcwatch_core::DashboardStats;

/// One recorded refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatFrame {
    /// Seconds since session start
    pub uptime_secs: u64,

    pub stats: DashboardStats,
}

/// Complete run export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Seed used
    pub seed: u64,

    /// Duration in seconds
    pub duration_secs: u64,

    /// All recorded frames
    pub frames: Vec<StatFrame>,

    /// Stats at the end of the run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_stats: Option<DashboardStats>,
}

impl SimExport {
    /// Creates a new export container.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            duration_secs: 0,
            frames: Vec::new(),
            final_stats: None,
        }
    }

    /// Adds a frame.
    pub fn add_frame(&mut self, uptime_secs: u64, stats: DashboardStats) {
        self.duration_secs = uptime_secs;
        self.frames.push(StatFrame { uptime_secs, stats });
    }

    /// Finalizes the export with the closing stats.
    pub fn finalize(&mut self, stats: DashboardStats) {
        self.final_stats = Some(stats);
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
