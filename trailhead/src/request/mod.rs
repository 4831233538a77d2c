pub mod cache_key;
pub mod cached;

pub use cache_key::{CacheKey, Params};
pub use cached::RequestCache;
