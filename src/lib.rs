//! Terminal falling-block game (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `term_blocks::{core,input,store,term,types}` and adds
//! the runtime [`config`].

pub mod config;

pub use blocks_core as core;
pub use blocks_input as input;
pub use blocks_store as store;
pub use blocks_term as term;
pub use blocks_types as types;
