pub mod analysis;
pub mod thresholds;
