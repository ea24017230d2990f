//! Standard library of theories
//!
//! The bare theories (`th_*`) carry no presentation; [`default_library`]
//! wraps them with names, shortcuts and arrow styles.

use crate::{
    ArrowStyle, DiscreteTheory, MorType, ObType, TheoryEntry, TheoryLibrary, TypeMeta,
};

/// The theory of categories: a single object type
pub fn th_category() -> DiscreteTheory {
    let mut th = DiscreteTheory::new();
    th.add_ob_type(ObType::basic("Object"));
    th
}

/// The theory of database schemas with attributes
pub fn th_schema() -> DiscreteTheory {
    let mut th = DiscreteTheory::new();
    let (x, y) = (ObType::basic("Entity"), ObType::basic("AttrType"));
    th.add_ob_type(x.clone());
    th.add_ob_type(y.clone());
    th.add_mor_type(MorType::basic("Attr"), x, y);
    th
}

/// The theory of signed categories
///
/// Positive morphisms are the hom type; negative ones are a generator on
/// the same object type.
pub fn th_signed_category() -> DiscreteTheory {
    let mut th = DiscreteTheory::new();
    let x = ObType::basic("Object");
    th.add_ob_type(x.clone());
    th.add_mor_type(MorType::basic("Negative"), x.clone(), x);
    th
}

/// The theory of categories with links
///
/// A link goes from an object to a morphism, so its target is the
/// tabulator of the hom type.
pub fn th_category_links() -> DiscreteTheory {
    let mut th = DiscreteTheory::new().with_tabulators();
    let x = ObType::basic("Object");
    th.add_ob_type(x.clone());
    let tab = th.tabulator(th.hom_type(x.clone()));
    th.add_mor_type(MorType::basic("Link"), x, tab);
    th
}

fn simple_olog() -> TheoryEntry {
    let mut th = th_category();
    let x = ObType::basic("Object");
    th.set_meta(
        x.clone(),
        TypeMeta::new("Type")
            .with_description("Type or class of things")
            .with_shortcut("O"),
    );
    th.set_meta(
        MorType::hom(x),
        TypeMeta::new("Aspect")
            .with_description("Aspect or property of a thing")
            .with_shortcut("M"),
    );
    TheoryEntry::new(
        "simple-olog",
        "Olog",
        "Ontology log, a simple conceptual model",
        th,
    )
}

fn simple_schema() -> TheoryEntry {
    let mut th = th_schema();
    let entity = ObType::basic("Entity");
    th.set_meta(
        entity.clone(),
        TypeMeta::new("Entity")
            .with_description("Type of entity or thing")
            .with_shortcut("E")
            .with_display_class("entity"),
    );
    th.set_meta(
        MorType::hom(entity),
        TypeMeta::new("Mapping")
            .with_description("Many-to-one relation between entities")
            .with_shortcut("M"),
    );
    th.set_meta(
        MorType::basic("Attr"),
        TypeMeta::new("Attribute")
            .with_description("Data attribute of an entity")
            .with_shortcut("A")
            .with_arrow_style(ArrowStyle::Flat),
    );
    th.set_meta(
        ObType::basic("AttrType"),
        TypeMeta::new("Attribute type")
            .with_description("Data type of an attribute")
            .with_shortcut("T")
            .with_display_class("attr-type"),
    );
    TheoryEntry::new(
        "simple-schema",
        "Schema",
        "Schema for a categorical database",
        th,
    )
}

fn reg_net() -> TheoryEntry {
    let mut th = th_signed_category().with_only_free_models();
    let x = ObType::basic("Object");
    th.set_meta(
        x.clone(),
        TypeMeta::new("Species")
            .with_description("Biochemical species in the network")
            .with_shortcut("S"),
    );
    th.set_meta(
        MorType::hom(x),
        TypeMeta::new("Promotion")
            .with_description("Positive interaction: activates")
            .with_shortcut("P")
            .with_arrow_style(ArrowStyle::Plus),
    );
    th.set_meta(
        MorType::basic("Negative"),
        TypeMeta::new("Inhibition")
            .with_description("Negative interaction: represses")
            .with_shortcut("N")
            .with_arrow_style(ArrowStyle::Minus),
    );
    TheoryEntry::new(
        "reg-net",
        "Regulatory network",
        "Biochemical species that promote or inhibit each other",
        th,
    )
}

fn category_links() -> TheoryEntry {
    let mut th = th_category_links();
    let x = ObType::basic("Object");
    th.set_meta(
        x.clone(),
        TypeMeta::new("Stock")
            .with_description("Thing with an amount")
            .with_shortcut("S"),
    );
    th.set_meta(
        MorType::hom(x.clone()),
        TypeMeta::new("Flow")
            .with_description("Flow from one stock to another")
            .with_shortcut("F")
            .with_arrow_style(ArrowStyle::Double),
    );
    th.set_meta(
        ObType::tabulator(MorType::hom(x)),
        TypeMeta::new("Linked flow")
            .with_description("Flow that a link can point at"),
    );
    th.set_meta(
        MorType::basic("Link"),
        TypeMeta::new("Link")
            .with_description("Influence of a stock on a flow")
            .with_shortcut("L"),
    );
    TheoryEntry::new(
        "category-links",
        "Stock and flow",
        "Model accumulation (stocks) and change (flows)",
        th,
    )
}

/// Library with every standard theory registered
pub fn default_library() -> TheoryLibrary {
    let mut lib = TheoryLibrary::new();
    lib.register(simple_olog());
    lib.register(simple_schema());
    lib.register(reg_net());
    lib.register(category_links());
    lib
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TheoryId, TheorySchema, TheoryType};

    #[test]
    fn test_bare_theories() {
        assert_eq!(th_category().ob_types().len(), 1);
        assert_eq!(th_schema().ob_types().len(), 2);
        // Negative generator plus the hom type
        assert_eq!(th_signed_category().mor_types().len(), 2);
        assert!(!th_schema().only_free_models());
    }

    #[test]
    fn test_links_target_a_tabulator() {
        let th = th_category_links();
        let link = MorType::basic("Link");
        let tab = ObType::tabulator(MorType::hom(ObType::basic("Object")));
        assert_eq!(th.src(&link), Some(ObType::basic("Object")));
        assert_eq!(th.tgt(&link), Some(tab.clone()));
        assert!(th.has_ob_type(&tab));
    }

    #[test]
    fn test_default_library_ids() {
        let lib = default_library();
        let ids = lib.ids();
        assert_eq!(ids.len(), 4);
        for id in ["simple-olog", "simple-schema", "reg-net", "category-links"] {
            assert!(lib.contains(&TheoryId::new(id)), "missing {}", id);
        }
    }

    #[test]
    fn test_every_presented_type_belongs_to_theory() {
        for entry in default_library().list() {
            for t in entry.theory.presented_types() {
                let known = match t {
                    TheoryType::ObType(x) => entry.theory.has_ob_type(x),
                    TheoryType::MorType(m) => entry.theory.has_mor_type(m),
                };
                assert!(known, "{} presents unknown type {}", entry.id, t);
                assert!(entry.theory.metadata(t).is_some());
            }
        }
    }

    #[test]
    fn test_schema_entry_presentation() {
        let lib = default_library();
        let entry = lib.get(&"simple-schema".into()).unwrap();
        let entity = ObType::basic("Entity");
        let mapping = MorType::hom(entity.clone());

        assert_eq!(entry.ob_type_index(&entity), Some(0));
        assert_eq!(entry.ob_type_index(&ObType::basic("AttrType")), Some(1));
        assert_eq!(entry.mor_type_index(&mapping), Some(0));
        assert_eq!(entry.mor_type_index(&MorType::basic("Attr")), Some(1));

        let meta = entry.theory.metadata(&mapping.into()).unwrap();
        assert_eq!(meta.name, "Mapping");
        assert_eq!(meta.shortcut.as_deref(), Some("M"));
    }

    #[test]
    fn test_links_have_a_constructible_target() {
        let lib = default_library();
        let entry = lib.get(&"category-links".into()).unwrap();
        let link = MorType::basic("Link");
        let target = entry.theory.tgt(&link).unwrap();

        assert_eq!(entry.ob_type_index(&target), Some(1));
        let meta = entry.theory.metadata(&target.into()).unwrap();
        assert_eq!(meta.name, "Linked flow");
        assert_eq!(meta.shortcut, None);
    }

    #[test]
    fn test_reg_net_is_free_only() {
        let lib = default_library();
        let entry = lib.get(&"reg-net".into()).unwrap();
        assert!(entry.only_free_models());
        let meta = entry
            .theory
            .metadata(&MorType::basic("Negative").into())
            .unwrap();
        assert_eq!(meta.arrow_style, Some(ArrowStyle::Minus));
    }
}
