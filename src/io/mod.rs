mod http;
mod local;

pub use http::HttpSource;
pub use local::LocalFileSource;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for a place a complete `.deb` can be loaded from
#[async_trait]
pub trait Source: Send + Sync {
    /// Load the whole package into memory
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable origin, used in messages
    fn describe(&self) -> &str;
}
