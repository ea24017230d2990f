//! Cell constructors derived from a theory

use cell_commands::{CellConstructor, CommandRegistry};
use double_theory::{TheoryEntry, TheorySchema, TheoryType, TypeMeta};
use input_types::KeyCombo;
use model_core::{ModelJudgment, MorphismDecl, ObjectDecl};
use notebook_core::{Cell, CellTag};
use std::collections::BTreeMap;

/// Name of the constructor for prose cells
pub const TEXT_COMMAND: &str = "Text";
/// Name of the constructor for stem cells
pub const STEM_COMMAND: &str = "Stem";

/// Builds the constructor registry for a theory
///
/// Every type with metadata gets a constructor named after it, in the
/// theory's presentation order, followed by "Text" and "Stem".
/// `keybindings` maps constructor names to shortcut overrides.
pub fn registry_for_theory(
    entry: &TheoryEntry,
    keybindings: &BTreeMap<String, String>,
) -> CommandRegistry<ModelJudgment> {
    let mut registry = CommandRegistry::new();

    for ty in entry.theory.presented_types() {
        let Some(meta) = entry.theory.metadata(ty) else {
            continue;
        };
        let constructor = match ty.clone() {
            TheoryType::ObType(ob_type) => {
                CellConstructor::new(meta.name.clone(), CellTag::Formal, move || {
                    Cell::formal(ModelJudgment::Object(ObjectDecl::new("", ob_type.clone())))
                })
            }
            TheoryType::MorType(mor_type) => {
                CellConstructor::new(meta.name.clone(), CellTag::Formal, move || {
                    Cell::formal(ModelJudgment::Morphism(MorphismDecl::new("", mor_type.clone())))
                })
            }
        };
        registry.register(describe(constructor, ty, meta));
    }

    registry.register(
        CellConstructor::new(TEXT_COMMAND, CellTag::RichText, || Cell::rich_text(""))
            .with_description("Text cell for notes and explanation")
            .with_keywords(["prose", "note"]),
    );
    registry.register(
        CellConstructor::new(STEM_COMMAND, CellTag::Stem, Cell::stem)
            .with_description("Empty cell, choose its kind later"),
    );

    for (name, shortcut) in keybindings {
        match shortcut.parse::<KeyCombo>() {
            Ok(combo) => {
                if !registry.set_shortcut(name, Some(combo)) {
                    tracing::warn!(constructor = %name, "keybinding for unknown constructor");
                }
            }
            Err(err) => {
                tracing::warn!(constructor = %name, %shortcut, %err, "invalid keybinding");
            }
        }
    }

    registry
}

fn describe(
    mut constructor: CellConstructor<ModelJudgment>,
    ty: &TheoryType,
    meta: &TypeMeta,
) -> CellConstructor<ModelJudgment> {
    if let Some(description) = &meta.description {
        constructor = constructor.with_description(description.clone());
    }
    if let Some(shortcut) = &meta.shortcut {
        match shortcut.parse::<KeyCombo>() {
            Ok(combo) => constructor = constructor.with_shortcut(combo),
            Err(err) => tracing::warn!(%ty, %shortcut, %err, "invalid shortcut in theory metadata"),
        }
    }
    constructor.with_keywords([ty.to_string()])
}
