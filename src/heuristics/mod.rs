pub mod adjacent_merge;
pub mod crumbs;
pub mod fillers;
pub mod linguistic;
pub mod majority_vote;
pub mod min_hold;

pub use adjacent_merge::*;
pub use crumbs::*;
pub use fillers::*;
pub use linguistic::*;
pub use majority_vote::*;
pub use min_hold::*;

use serde::{Deserialize, Serialize};

/// Thresholds for the temporal smoothing passes, all in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Width of the majority-vote window centred on each segment start
    pub window: f64,
    /// Minimum time a bucket must hold before another change is accepted
    pub min_hold: f64,
    /// Largest gap bridged when merging same-bucket neighbours
    pub merge_gap: f64,
    /// Segments shorter than this are absorbed into a neighbour
    pub min_segment: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: 1.0,
            min_hold: 1.2,
            merge_gap: 0.35,
            min_segment: 0.30,
        }
    }
}
