pub use crate::ds::{RecencyRing, SlotArena, SlotId};
pub use crate::error::{EmptyListError, InvalidHandleError, InvariantError};
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
