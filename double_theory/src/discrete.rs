//! Discrete double theories given by generators

use crate::{MorType, ObType, TheorySchema, TheoryType, TypeMeta};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// A discrete double theory presented by generating types
///
/// Object types are added explicitly; every object type `x` implicitly has a
/// hom type `Hom(x)` from `x` to `x`. Theories with tabulators additionally
/// accept `Tab(m)` as an object type for every morphism type `m`.
#[derive(Debug, Clone, Default)]
pub struct DiscreteTheory {
    ob_generators: Vec<ObType>,
    mor_generators: Vec<(MorType, ObType, ObType)>,
    metadata: BTreeMap<TheoryType, TypeMeta>,
    presentation: Vec<TheoryType>,
    tabulators: bool,
    only_free_models: bool,
}

impl DiscreteTheory {
    /// Creates an empty theory
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables tabulator object types
    pub fn with_tabulators(mut self) -> Self {
        self.tabulators = true;
        self
    }

    /// Restricts models of this theory to free ones
    pub fn with_only_free_models(mut self) -> Self {
        self.only_free_models = true;
        self
    }

    /// Adds an object type generator, returning whether it is new
    pub fn add_ob_type(&mut self, x: ObType) -> bool {
        if self.ob_generators.contains(&x) {
            return false;
        }
        self.ob_generators.push(x);
        true
    }

    /// Adds a morphism type generator with its source and target, returning
    /// whether it is new
    ///
    /// Re-adding an existing generator leaves its boundary unchanged.
    pub fn add_mor_type(&mut self, m: MorType, src: ObType, tgt: ObType) -> bool {
        if self.mor_generators.iter().any(|(n, _, _)| *n == m) {
            return false;
        }
        self.mor_generators.push((m, src, tgt));
        true
    }

    /// Hom type on an object type
    pub fn hom_type(&self, x: ObType) -> MorType {
        MorType::hom(x)
    }

    /// Tabulator of a morphism type
    pub fn tabulator(&self, m: MorType) -> ObType {
        ObType::tabulator(m)
    }

    /// Attaches display metadata to a type
    ///
    /// Types are presented in the order their metadata was first set.
    pub fn set_meta(&mut self, t: impl Into<TheoryType>, meta: TypeMeta) {
        let t = t.into();
        if !self.metadata.contains_key(&t) {
            self.presentation.push(t.clone());
        }
        self.metadata.insert(t, meta);
    }

    /// Types that carry metadata, in presentation order
    pub fn presented_types(&self) -> &[TheoryType] {
        &self.presentation
    }

    /// Position of an object type among the presented object types
    pub fn ob_type_index(&self, x: &ObType) -> Option<usize> {
        self.presentation
            .iter()
            .filter_map(|t| match t {
                TheoryType::ObType(y) => Some(y),
                TheoryType::MorType(_) => None,
            })
            .position(|y| y == x)
    }

    /// Position of a morphism type among the presented morphism types
    pub fn mor_type_index(&self, m: &MorType) -> Option<usize> {
        self.presentation
            .iter()
            .filter_map(|t| match t {
                TheoryType::MorType(n) => Some(n),
                TheoryType::ObType(_) => None,
            })
            .position(|n| n == m)
    }

    fn generator(&self, m: &MorType) -> Option<&(MorType, ObType, ObType)> {
        self.mor_generators.iter().find(|(n, _, _)| n == m)
    }
}

impl TheorySchema for DiscreteTheory {
    fn ob_types(&self) -> Vec<ObType> {
        self.ob_generators.clone()
    }

    fn mor_types(&self) -> Vec<MorType> {
        self.mor_generators
            .iter()
            .map(|(m, _, _)| m.clone())
            .chain(self.ob_generators.iter().cloned().map(MorType::hom))
            .collect()
    }

    fn has_ob_type(&self, x: &ObType) -> bool {
        match x {
            ObType::Basic(_) => self.ob_generators.contains(x),
            ObType::Tabulator(m) => self.tabulators && self.has_mor_type(m),
        }
    }

    fn has_mor_type(&self, m: &MorType) -> bool {
        match m {
            MorType::Basic(_) => self.generator(m).is_some(),
            MorType::Hom(x) => self.has_ob_type(x),
        }
    }

    fn src(&self, m: &MorType) -> Option<ObType> {
        match m {
            MorType::Basic(_) => self.generator(m).map(|(_, src, _)| src.clone()),
            MorType::Hom(x) => self.has_ob_type(x).then(|| (**x).clone()),
        }
    }

    fn tgt(&self, m: &MorType) -> Option<ObType> {
        match m {
            MorType::Basic(_) => self.generator(m).map(|(_, _, tgt)| tgt.clone()),
            MorType::Hom(x) => self.has_ob_type(x).then(|| (**x).clone()),
        }
    }

    fn metadata(&self, t: &TheoryType) -> Option<&TypeMeta> {
        self.metadata.get(t)
    }

    fn only_free_models(&self) -> bool {
        self.only_free_models
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_theory() -> DiscreteTheory {
        let mut th = DiscreteTheory::new();
        let (x, y) = (ObType::basic("Entity"), ObType::basic("AttrType"));
        th.add_ob_type(x.clone());
        th.add_ob_type(y.clone());
        th.add_mor_type(MorType::basic("Attr"), x, y);
        th
    }

    #[test]
    fn test_generators() {
        let th = schema_theory();
        assert_eq!(th.ob_types().len(), 2);
        // One generator plus one hom type per object type
        assert_eq!(th.mor_types().len(), 3);
        assert!(th.has_ob_type(&ObType::basic("Entity")));
        assert!(!th.has_ob_type(&ObType::basic("Nope")));
        assert!(th.has_mor_type(&MorType::basic("Attr")));
        assert!(!th.has_mor_type(&MorType::basic("Nope")));
    }

    #[test]
    fn test_duplicate_generators_are_not_new() {
        let mut th = schema_theory();
        assert!(!th.add_ob_type(ObType::basic("Entity")));
        assert!(!th.add_mor_type(
            MorType::basic("Attr"),
            ObType::basic("AttrType"),
            ObType::basic("AttrType"),
        ));
        assert_eq!(th.src(&MorType::basic("Attr")), Some(ObType::basic("Entity")));
    }

    #[test]
    fn test_src_tgt_of_generator_and_hom() {
        let th = schema_theory();
        let attr = MorType::basic("Attr");
        assert_eq!(th.src(&attr), Some(ObType::basic("Entity")));
        assert_eq!(th.tgt(&attr), Some(ObType::basic("AttrType")));

        let hom = MorType::hom(ObType::basic("Entity"));
        assert!(th.has_mor_type(&hom));
        assert_eq!(th.src(&hom), Some(ObType::basic("Entity")));
        assert_eq!(th.tgt(&hom), Some(ObType::basic("Entity")));

        let bad_hom = MorType::hom(ObType::basic("Nope"));
        assert!(!th.has_mor_type(&bad_hom));
        assert_eq!(th.src(&bad_hom), None);
        assert_eq!(th.tgt(&MorType::basic("Nope")), None);
    }

    #[test]
    fn test_tabulators_require_opt_in() {
        let mut th = DiscreteTheory::new();
        let x = ObType::basic("Object");
        th.add_ob_type(x.clone());
        let tab = th.tabulator(th.hom_type(x.clone()));
        assert!(!th.has_ob_type(&tab));

        let th = th.with_tabulators();
        assert!(th.has_ob_type(&tab));
        assert!(!th.has_ob_type(&ObType::tabulator(MorType::basic("Nope"))));
    }

    #[test]
    fn test_metadata_and_indices() {
        let mut th = schema_theory();
        let entity = ObType::basic("Entity");
        let attr_type = ObType::basic("AttrType");
        let attr = MorType::basic("Attr");
        th.set_meta(entity.clone(), TypeMeta::new("Entity").with_shortcut("E"));
        th.set_meta(attr.clone(), TypeMeta::new("Attribute").with_shortcut("A"));
        th.set_meta(attr_type.clone(), TypeMeta::new("Attribute type"));

        let meta = th.metadata(&TheoryType::ObType(entity.clone())).unwrap();
        assert_eq!(meta.shortcut.as_deref(), Some("E"));
        assert_eq!(th.ob_type_index(&entity), Some(0));
        assert_eq!(th.ob_type_index(&attr_type), Some(1));
        assert_eq!(th.mor_type_index(&attr), Some(0));
        assert_eq!(th.mor_type_index(&MorType::hom(entity)), None);
        assert_eq!(th.presented_types().len(), 3);
    }

    #[test]
    fn test_set_meta_twice_keeps_position() {
        let mut th = schema_theory();
        let entity = ObType::basic("Entity");
        th.set_meta(entity.clone(), TypeMeta::new("Entity"));
        th.set_meta(ObType::basic("AttrType"), TypeMeta::new("Attribute type"));
        th.set_meta(entity.clone(), TypeMeta::new("Table"));

        assert_eq!(th.ob_type_index(&entity), Some(0));
        assert_eq!(
            th.metadata(&entity.into()).map(|m| m.name.as_str()),
            Some("Table")
        );
    }
}
