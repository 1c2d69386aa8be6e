//! Session state, uploads and export
//!
//! Holds what a user builds in one sitting: prompt, uploaded files,
//! generated items and the diagram. Nothing here is persisted.

mod export;
mod state;
#[cfg(not(target_arch = "wasm32"))]
mod upload;

pub use export::*;
pub use state::*;
#[cfg(not(target_arch = "wasm32"))]
pub use upload::*;
