// src/sources/mod.rs
pub mod extract;
pub mod generative;
pub mod social;
pub mod types;

pub use extract::extract_first_json_array;
pub use generative::GptSignalGenerator;
pub use social::SocialFeedClient;
pub use types::{AuthorProfile, RawPost, SignalGenerator, SocialFeed, SourceError};
