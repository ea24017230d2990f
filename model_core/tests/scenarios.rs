use double_theory::stdlib::default_library;
use double_theory::{MorType, ObType, TheoryId};
use model_core::{
    ModelJudgment, MorphismDecl, NameIndex, ObjectDecl, ValidationEngine, ValidationError,
    ValidationReport,
};

fn validate_schema(judgments: &[ModelJudgment]) -> ValidationReport {
    let library = default_library();
    let entry = library
        .get(&TheoryId::new("simple-schema"))
        .expect("schema theory registered");
    let names = NameIndex::build(judgments);
    ValidationEngine::new().validate(&entry.theory, judgments, &names)
}

fn x_y_mapping() -> (ObjectDecl, ObjectDecl, MorphismDecl) {
    let x = ObjectDecl::new("X", ObType::basic("Entity"));
    let y = ObjectDecl::new("Y", ObType::basic("Entity"));
    let m = MorphismDecl::new("M", MorType::hom(ObType::basic("Entity")))
        .with_dom(x.id)
        .with_cod(y.id);
    (x, y, m)
}

#[test]
fn test_mapping_between_entities_is_valid() {
    let (x, y, m) = x_y_mapping();
    let report = validate_schema(&[x.clone().into(), y.clone().into(), m.clone().into()]);

    assert!(report.is_valid());
    let model = report.model.expect("model present");
    assert_eq!(model.object_count(), 2);
    assert_eq!(model.morphism_count(), 1);
    let mapping = &model.morphisms()[0];
    assert_eq!((mapping.dom, mapping.cod), (x.id, y.id));
    assert_eq!(model.object(mapping.dom).map(|ob| ob.name.as_str()), Some("X"));
    assert_eq!(model.object(mapping.cod).map(|ob| ob.name.as_str()), Some("Y"));
}

#[test]
fn test_mapping_without_codomain() {
    let (x, y, mut m) = x_y_mapping();
    m.cod = None;
    let report = validate_schema(&[x.clone().into(), y.clone().into(), m.clone().into()]);

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors_for(m.id), &[ValidationError::CodMissing]);
    assert!(report.errors_for(x.id).is_empty());
    assert!(report.errors_for(y.id).is_empty());
    assert!(report.model.is_none());
}

#[test]
fn test_wrong_domain_kind_leaves_judgment_untouched() {
    let (x, y, m) = x_y_mapping();
    let t = ObjectDecl::new("String", ObType::basic("AttrType"));
    let mut judgments: Vec<ModelJudgment> =
        vec![x.into(), y.into(), t.clone().into(), m.clone().into()];

    assert!(validate_schema(&judgments).is_valid());

    let mut repointed = m.clone();
    repointed.dom = Some(t.id);
    judgments[3] = repointed.clone().into();
    let report = validate_schema(&judgments);

    assert_eq!(
        report.errors_for(m.id),
        &[ValidationError::DomType {
            expected: ObType::basic("Entity"),
            actual: ObType::basic("AttrType"),
        }]
    );
    assert!(report.model.is_none());
    assert_eq!(judgments[3], ModelJudgment::Morphism(repointed));
}

#[test]
fn test_deleting_domain_object() {
    let (x, y, m) = x_y_mapping();
    let judgments: Vec<ModelJudgment> = vec![y.into(), m.clone().into()];
    let report = validate_schema(&judgments);

    assert!(!judgments.iter().any(|j| j.id() == x.id));
    assert_eq!(report.errors_for(m.id), &[ValidationError::DomMissing]);
}

#[test]
fn test_links_into_flows() {
    let library = default_library();
    let entry = library.get(&"category-links".into()).expect("registered");

    let stock = ObType::basic("Object");
    let a = ObjectDecl::new("a", stock.clone());
    let b = ObjectDecl::new("b", stock.clone());
    let flow = ObjectDecl::new("flow", ObType::tabulator(MorType::hom(stock)));
    let link = MorphismDecl::new("link", MorType::basic("Link"))
        .with_dom(a.id)
        .with_cod(flow.id);
    let judgments: Vec<ModelJudgment> =
        vec![a.into(), b.into(), flow.into(), link.clone().into()];

    let names = NameIndex::build(&judgments);
    let report = ValidationEngine::new().validate(&entry.theory, &judgments, &names);
    assert!(report.is_valid(), "{:?}", report.errors);
    assert!(report.model.is_some_and(|model| model.has_morphism(link.id)));
}

#[test]
fn test_only_free_models_flag_is_reported() {
    let library = default_library();
    let entry = library.get(&"reg-net".into()).expect("registered");
    let report = ValidationEngine::new().validate(&entry.theory, &[], &NameIndex::default());
    assert!(report.only_free_models);
}
