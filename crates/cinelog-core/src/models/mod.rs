pub mod asset;
pub mod movie;
pub mod registration;

pub use asset::StagedAsset;
pub use movie::{MovieDraft, MovieRecord, MovieResponse};
pub use registration::RegistrationRequest;
