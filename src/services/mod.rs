//! Infrastructure services shared across commands: the lock store abstraction
//! over Redis and the in-process TTL cache.

pub mod cache;
pub mod locks;
