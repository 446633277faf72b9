pub mod config_service;
pub mod local_file;
pub mod paths;
pub mod profile_store;
pub mod storage;
pub mod voice;

pub use crate::config_service::ConfigService;
pub use crate::local_file::inspect_local_file;
pub use crate::paths::StudyBuddyPaths;
pub use crate::profile_store::JsonProfileRepository;
pub use crate::voice::{
    CommandNarrator, SilentNarrator, UnavailableMicrophone, UnavailableTranscriber, narrator_for,
};
