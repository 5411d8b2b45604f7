//! Background Tasks Module
//!
//! Contains background tasks owned by cache instances.
//!
//! # Tasks
//! - TTL Sweeper: Removes expired cache entries at configured intervals

mod sweeper;

pub use sweeper::Sweeper;
