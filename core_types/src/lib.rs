//! # Core Types
//!
//! Stable identifiers shared by every crate in the model notebook workspace.
//!
//! ## Philosophy
//!
//! - **Identity, not position**: A cell is found by its id, never by where it sits
//! - **Identity, not name**: A judgment keeps its id across renames and edits
//! - **Minted once**: Ids come from [`new_uuid`] and are never reused
//!
//! ## Key Types
//!
//! - [`CellId`]: Identity of a notebook cell
//! - [`EntityId`]: Identity of a formal judgment (object or morphism declaration)

pub mod ids;
mod uuid_tools;

pub use ids::{CellId, EntityId};
pub use uuid_tools::new_uuid;
