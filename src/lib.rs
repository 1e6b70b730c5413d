pub mod audio;
pub mod button;
pub mod config;
pub mod error;
pub mod peripherals;
pub mod session;
pub mod store;

pub use audio::{sine_block, stereo_to_mono, AudioBlock, ChannelLayout};
pub use button::{ButtonDebouncer, Edge};
pub use config::{AudioConfig, ButtonConfig, Config, NetworkConfig, StorageConfig};
pub use error::{Error, Result};
pub use peripherals::{
    DigitalInput, Level, MicrophoneInput, NetworkAssociation, SpeakerOutput,
};
pub use session::{RecordPlaybackController, SessionStats};
pub use store::{BackingMedium, FileMedium, SequentialStore, StoreMode};
