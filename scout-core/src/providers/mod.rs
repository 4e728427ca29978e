pub mod cinemeta;
mod http;
pub mod tmdb;
pub mod traits;

pub use cinemeta::CinemetaProvider;
pub use tmdb::TmdbProvider;
pub use traits::{MetadataProvider, ProviderError};
