pub mod domain;
pub mod lookup;
pub mod persistence;
pub mod ports;
pub mod search;

pub use domain::{CacheEntry, CacheKey, LookupQuery, VideoHit};
pub use lookup::LookupService;
pub use persistence::JsonFileStore;
pub use ports::{CacheStore, VideoSearch};
pub use search::YouTubeClient;
