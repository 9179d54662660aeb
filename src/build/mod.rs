//! Build orchestration for amxbuild
//!
//! Composes discovery, synchronization, compiler invocation, and diagnostic
//! classification into the batch build:
//! - **Sync**: copy assets (mirrored) and includes (flat) into the
//!   distribution tree
//! - **Compile**: drive the Pawn compiler over every script, sequentially,
//!   in scan order
//! - **Aggregate**: fold per-script results into a single batch outcome

pub mod context;
pub mod pipeline;
pub mod result;

pub use context::*;
pub use pipeline::*;
pub use result::*;
