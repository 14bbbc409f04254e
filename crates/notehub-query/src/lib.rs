//! Client-side query, cache, and mutation layer.
//!
//! This crate keeps the visible note list consistent with the remote
//! collection. [`QueryClient`] caches pages per [`QueryKey`], coalesces
//! concurrent fetches, retains the last successful page as placeholder
//! data, and discards superseded responses by epoch. [`Mutations`] runs
//! create/delete calls and invalidates the cache on success so observed
//! pages refetch. [`Debouncer`] and [`ListState`] turn raw search input
//! into settled cache keys.
//!
//! Presentation layers consume this crate through snapshots and broadcast
//! events; nothing here renders.

pub mod client;
pub mod debounce;
pub mod events;
pub mod key;
pub mod mutation;
pub mod state;

pub use client::{QueryClient, QueryObserver, QuerySnapshot, QueryStatus};
pub use debounce::Debouncer;
pub use events::{MutationEvent, QueryEvent};
pub use key::QueryKey;
pub use mutation::Mutations;
pub use state::ListState;
