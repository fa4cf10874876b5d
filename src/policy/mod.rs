//! Eviction engines. Each module pairs a single-threaded `*Core` with the
//! thread-safe `*Cache` alias built on [`MemoCache`](crate::memo::MemoCache).

pub mod fifo;
pub mod lru;
pub mod single;
pub mod unbounded;
