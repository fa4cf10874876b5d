pub use crate::builder::{BoxedCache, CacheBuilder, CachePolicy};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::memo::MemoCache;
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::single::SingleCache;
pub use crate::policy::unbounded::UnboundedCache;
pub use crate::stat::Stat;
pub use crate::traits::{Cache, Source};
