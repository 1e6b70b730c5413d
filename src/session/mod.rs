mod controller;
mod stats;

pub use controller::RecordPlaybackController;
pub use stats::SessionStats;
