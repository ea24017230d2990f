//! Notebook Test Utilities
//!
//! Shared fixtures for cross-crate notebook tests.
//!
//! ## Test Philosophy
//!
//! - **Lockstep**: Cursor, name index and validation agree with the cells after every step
//! - **Deterministic**: Randomized sequences use fixed seeds
//! - **Errors as data**: Broken references surface as validation errors, never panics

use double_theory::stdlib::default_library;
use double_theory::{MorType, ObType};
use model_core::{ModelJudgment, MorphismDecl, ObjectDecl};
use notebook_core::Cell;
use notebook_settings::EditorConfig;
use services_model_editor::ModelEditor;

/// Editor on an empty notebook under the named standard theory
///
/// Panics if the theory is not in the standard library.
pub fn editor_for(theory: &str) -> ModelEditor {
    let config = EditorConfig {
        theory: theory.to_string(),
        ..EditorConfig::default()
    };
    match ModelEditor::from_library(&default_library(), config) {
        Ok(editor) => editor,
        Err(err) => panic!("standard theory {} missing: {}", theory, err),
    }
}

/// Entity object of the schema theory
pub fn entity(name: &str) -> ObjectDecl {
    ObjectDecl::new(name, ObType::basic("Entity"))
}

/// Attribute type object of the schema theory
pub fn attr_type(name: &str) -> ObjectDecl {
    ObjectDecl::new(name, ObType::basic("AttrType"))
}

/// Mapping between entities of the schema theory
pub fn mapping(name: &str, dom: Option<&ObjectDecl>, cod: Option<&ObjectDecl>) -> MorphismDecl {
    MorphismDecl {
        dom: dom.map(|o| o.id),
        cod: cod.map(|o| o.id),
        ..MorphismDecl::new(name, MorType::hom(ObType::basic("Entity")))
    }
}

/// Attribute from an entity to an attribute type
pub fn attribute(name: &str, dom: &ObjectDecl, cod: &ObjectDecl) -> MorphismDecl {
    MorphismDecl::new(name, MorType::basic("Attr"))
        .with_dom(dom.id)
        .with_cod(cod.id)
}

/// Appends judgments to the end of the editor's notebook
///
/// Panics on structural errors, which appending cannot produce.
pub fn append(editor: &mut ModelEditor, judgments: impl IntoIterator<Item = ModelJudgment>) {
    for judgment in judgments {
        let pos = editor.len();
        if let Err(err) = editor.insert_cell(pos, Cell::formal(judgment)) {
            panic!("append failed: {}", err);
        }
    }
}
