#![no_std]

//! # Double Theory
//!
//! Read-only schema view over a discrete double theory.
//!
//! ## Philosophy
//!
//! - **Supplied, not computed**: A theory is data handed to the notebook; the
//!   notebook only asks it questions
//! - **Typed tokens**: Object and morphism kinds are [`ObType`] / [`MorType`],
//!   never bare strings
//! - **Derived kinds**: A kind may be built from another one
//!   ([`MorType::Hom`], [`ObType::Tabulator`])
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A category-theory engine (no composition, no limits)
//! - A model checker (judgments are validated elsewhere)
//!
//! ## Example
//!
//! ```
//! use double_theory::{DiscreteTheory, MorType, ObType, TheorySchema};
//!
//! let mut th = DiscreteTheory::new();
//! let entity = ObType::basic("Entity");
//! let attr_type = ObType::basic("AttrType");
//! th.add_ob_type(entity.clone());
//! th.add_ob_type(attr_type.clone());
//! th.add_mor_type(MorType::basic("Attr"), entity.clone(), attr_type.clone());
//!
//! assert_eq!(th.src(&MorType::basic("Attr")), Some(entity));
//! assert_eq!(th.tgt(&MorType::basic("Attr")), Some(attr_type));
//! ```

extern crate alloc;

pub mod discrete;
pub mod library;
pub mod meta;
pub mod schema;
pub mod stdlib;
pub mod types;

pub use discrete::DiscreteTheory;
pub use library::{TheoryEntry, TheoryId, TheoryLibrary};
pub use meta::{ArrowStyle, TypeMeta};
pub use schema::TheorySchema;
pub use types::{MorType, ObType, TheoryType};
