//! # Model Editor Service
//!
//! Glue between the notebook, its cursor, the active theory and the
//! derived name index and validation report.
//!
//! ## Philosophy
//!
//! - **Lockstep**: Every committed mutation updates the cursor and then
//!   rebuilds derived state before returning
//! - **Explicit theory**: The editor is bound to one [`TheoryEntry`](double_theory::TheoryEntry);
//!   constructors come from its type metadata
//! - **Errors as data**: Invalid judgments are shown, never refused
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A renderer (it hands out [`CellView`]s)
//! - A document transport (remote states arrive through [`ModelEditor::apply_remote`])

pub mod constructors;
pub mod editor;
pub mod error;
pub mod view;

pub use constructors::{registry_for_theory, STEM_COMMAND, TEXT_COMMAND};
pub use editor::{KeyOutcome, ModelEditor};
pub use error::EditorError;
pub use view::{CellAction, CellView};
