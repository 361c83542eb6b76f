pub mod recency_ring;
pub mod slot_arena;

pub use recency_ring::{IdIter, Iter, IterRev, RecencyRing};
pub use slot_arena::{SlotArena, SlotId};
