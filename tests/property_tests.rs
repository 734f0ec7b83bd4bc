use std::{
    collections::{BTreeSet, HashSet},
    sync::Arc,
};

use rdfbind::{
    CollectionPropertyMapper, CompositePropertyMapper, DirectPropertyMapper, FnIriGenerator,
    FnLiteralGenerator, JsonField, Literal, LiteralPropertyMapper, MapperRegistry, MappingError,
    MemoryGraph, ObjectMapper, PropertyMapper, ResourcePropertyMapper, Term, TraversalContext,
    TrueLiteralGenerator, UriStringPropertyMapper, ValueGenerator,
    vocab::{rdfs, xsd},
};
use serde::Serialize;

const NS: &str = "http://www.example.com/test#";

fn ns(local: &str) -> String {
    format!("{NS}{local}")
}

#[derive(Debug, Serialize)]
struct Item {
    id: String,
    label: String,
    tags: Vec<String>,
    homepage: Option<String>,
    score: Option<i32>,
}

fn item(id: &str) -> Item {
    Item {
        id: id.into(),
        label: format!("Item {id}"),
        tags: Vec::new(),
        homepage: None,
        score: None,
    }
}

#[derive(Debug)]
struct Tag {
    code: String,
}

fn context_with(mappers: ObjectMapper<Item>) -> (Arc<MemoryGraph>, TraversalContext) {
    let mut registry = MapperRegistry::new();
    registry.register(mappers);
    registry.register(
        ObjectMapper::<Tag>::new()
            .with_iri_generator(FnIriGenerator::new(|t: &Tag| Some(ns(&format!("tag/{}", t.code))))),
    );
    let graph = Arc::new(MemoryGraph::new());
    let context = TraversalContext::new(registry).with_graph(graph.clone());
    (graph, context)
}

fn item_mapper() -> ObjectMapper<Item> {
    ObjectMapper::new().with_iri_generator(FnIriGenerator::new(|i: &Item| Some(ns(&i.id))))
}

#[test]
fn test_composite_result_is_or_of_members() {
    let (graph, context) = context_with(item_mapper());
    let subject = item("i1");
    let scope = context.scope().expect("scope");

    let skipping = LiteralPropertyMapper::<str>::with_generator(
        ns("never"),
        FnLiteralGenerator::new(|_: &str| None),
    );
    let composite = CompositePropertyMapper::<Item, str>::new()
        .with(skipping)
        .with(LiteralPropertyMapper::new(rdfs::LABEL));

    assert!(composite.map_value(&scope, &subject, "Item one").expect("map"));
    assert_eq!(graph.len(), 1);
    assert!(graph.contains(&ns("i1"), rdfs::LABEL, &Term::from(Literal::plain("Item one"))));
}

#[test]
fn test_empty_composite_maps_nothing() {
    let (graph, context) = context_with(item_mapper());
    let subject = item("i1");
    let scope = context.scope().expect("scope");
    let composite = CompositePropertyMapper::<Item, str>::default();

    assert!(composite.is_empty());
    assert!(!composite.map_value(&scope, &subject, "value").expect("map"));
    assert!(graph.is_empty());
}

#[test]
fn test_collection_maps_each_element_with_same_subject() {
    let mapper = item_mapper().property(
        "tags",
        |i| Some(&i.tags),
        CollectionPropertyMapper::new(LiteralPropertyMapper::<String>::new(ns("tag"))),
    );
    let (graph, context) = context_with(mapper);
    let mut subject = item("i2");
    subject.tags = vec!["red".into(), "blue".into(), String::new()];

    assert!(context.map(&subject).expect("map"));
    let tags = graph.objects(&ns("i2"), &ns("tag"));
    assert_eq!(
        tags,
        vec![
            Term::from(Literal::plain("red")),
            Term::from(Literal::plain("blue"))
        ]
    );
}

#[test]
fn test_empty_collection_maps_nothing() {
    let (graph, context) = context_with(item_mapper());
    let subject = item("i3");
    let scope = context.scope().expect("scope");
    let mapper = CollectionPropertyMapper::new(LiteralPropertyMapper::<String>::new(ns("tag")));

    let empty: Vec<String> = Vec::new();
    assert!(!mapper.map_value(&scope, &subject, &empty).expect("map"));
    assert!(!PropertyMapper::<Item, Vec<String>>::map(&mapper, &scope, &subject, None).expect("map"));
    assert!(graph.is_empty());
}

#[test]
fn test_collection_accepts_sets_and_arrays() {
    let (graph, context) = context_with(item_mapper());
    let subject = item("i4");
    let scope = context.scope().expect("scope");
    let mapper = CollectionPropertyMapper::new(LiteralPropertyMapper::<i32>::new(ns("n")));

    let ordered: BTreeSet<i32> = [3, 1].into_iter().collect();
    let hashed: HashSet<i32> = [5].into_iter().collect();
    assert!(mapper.map_value(&scope, &subject, &ordered).expect("btree"));
    assert!(mapper.map_value(&scope, &subject, &hashed).expect("hash"));
    assert!(mapper.map_value(&scope, &subject, &[7, 9]).expect("array"));
    assert_eq!(graph.count_matching(Some(&ns("i4")), Some(&ns("n"))), 5);
    assert!(graph.contains(&ns("i4"), &ns("n"), &Term::from(Literal::typed("9", xsd::INT))));
}

#[test]
fn test_collection_of_references_maps_targets() {
    #[derive(Debug)]
    struct Bag {
        tags: Vec<Box<Tag>>,
    }

    let mut registry = MapperRegistry::new();
    registry.register(
        ObjectMapper::<Bag>::new()
            .with_iri_generator(FnIriGenerator::new(|_: &Bag| Some(ns("bag"))))
            .property(
                "tags",
                |b| Some(&b.tags),
                CollectionPropertyMapper::new(ResourcePropertyMapper::<Tag>::new(ns("tagged"))),
            ),
    );
    registry.register(
        ObjectMapper::<Tag>::new()
            .with_type(ns("Tag"))
            .with_iri_generator(FnIriGenerator::new(|t: &Tag| Some(ns(&t.code)))),
    );
    let graph = Arc::new(MemoryGraph::new());
    let context = TraversalContext::new(registry).with_graph(graph.clone());
    let bag = Bag {
        tags: vec![
            Box::new(Tag { code: "x".into() }),
            Box::new(Tag { code: "y".into() }),
        ],
    };

    assert!(context.map(&bag).expect("map"));
    assert!(graph.contains_link(&ns("bag"), &ns("tagged"), &ns("x")));
    assert!(graph.contains_link(&ns("y"), rdfbind::vocab::rdf::TYPE, &ns("Tag")));
    assert!(context.is_visited(bag.tags[1].as_ref()));
}

#[test]
fn test_direct_mapper_uses_registry_identifier_without_traversal() {
    #[derive(Debug)]
    struct Holder {
        tag: Tag,
    }

    let mut registry = MapperRegistry::new();
    registry.register(
        ObjectMapper::<Holder>::new()
            .with_iri_generator(FnIriGenerator::new(|_: &Holder| Some(ns("holder"))))
            .property("tag", |h| Some(&h.tag), DirectPropertyMapper::<Tag>::new(ns("tag"))),
    );
    registry.register(
        ObjectMapper::<Tag>::new()
            .with_type(ns("Tag"))
            .with_iri_generator(FnIriGenerator::new(|t: &Tag| Some(ns(&t.code)))),
    );
    let graph = Arc::new(MemoryGraph::new());
    let context = TraversalContext::new(registry).with_graph(graph.clone());
    let holder = Holder {
        tag: Tag { code: "t1".into() },
    };

    assert!(context.map(&holder).expect("map"));
    assert!(graph.contains_link(&ns("holder"), &ns("tag"), &ns("t1")));
    assert_eq!(graph.count_matching(Some(&ns("t1")), None), 0);
    assert!(!context.is_visited(&holder.tag));
}

#[test]
fn test_direct_mapper_with_generators() {
    let (graph, context) = context_with(item_mapper());
    let subject = item("i5");
    let scope = context.scope().expect("scope");

    let as_iri = DirectPropertyMapper::<str>::with_iri(
        ns("seeAlso"),
        FnIriGenerator::new(|code: &str| Some(ns(&format!("code/{code}")))),
    );
    let as_literal = DirectPropertyMapper::<bool>::with_literal(ns("flag"), TrueLiteralGenerator);

    assert!(as_iri.map_value(&scope, &subject, "abc").expect("iri"));
    assert!(as_literal.map_value(&scope, &subject, &true).expect("literal"));
    assert!(!as_literal.map_value(&scope, &subject, &false).expect("false flag"));
    assert!(graph.contains_link(&ns("i5"), &ns("seeAlso"), &ns("code/abc")));
    assert_eq!(graph.len(), 2);
}

#[test]
fn test_uri_string_mapper_links_valid_iri() {
    let mapper = item_mapper().property(
        "homepage",
        |i| i.homepage.as_deref(),
        UriStringPropertyMapper::new(rdfs::SEE_ALSO),
    );
    let (graph, context) = context_with(mapper);
    let mut subject = item("i6");
    subject.homepage = Some("  http://www.example.com/page  ".into());

    assert!(context.map(&subject).expect("map"));
    assert!(graph.contains_link(&ns("i6"), rdfs::SEE_ALSO, "http://www.example.com/page"));
}

#[test]
fn test_uri_string_mapper_skips_malformed_and_blank_values() {
    let (graph, context) = context_with(item_mapper());
    let subject = item("i7");
    let scope = context.scope().expect("scope");
    let mapper = UriStringPropertyMapper::new(rdfs::SEE_ALSO);

    let malformed = PropertyMapper::<Item, str>::map_value(&mapper, &scope, &subject, "not a uri");
    assert!(!malformed.expect("malformed is tolerated"));
    let blank = PropertyMapper::<Item, str>::map_value(&mapper, &scope, &subject, "   ");
    assert!(!blank.expect("blank"));
    assert!(graph.is_empty());
}

#[test]
fn test_json_field_reader() {
    let mapper = item_mapper()
        .readable("label", JsonField::new("label"), LiteralPropertyMapper::new(rdfs::LABEL))
        .readable("score", JsonField::new("score"), LiteralPropertyMapper::new(ns("score")));
    let (graph, context) = context_with(mapper);
    let subject = item("i8");

    assert!(context.map(&subject).expect("map"));
    assert!(graph.contains(&ns("i8"), rdfs::LABEL, &Term::from(Literal::plain("Item i8"))));
    assert_eq!(graph.count_matching(Some(&ns("i8")), Some(&ns("score"))), 0);
}

#[test]
fn test_json_field_reports_unknown_field() {
    let mapper = item_mapper().readable(
        "missing",
        JsonField::new("nope"),
        LiteralPropertyMapper::new(ns("nope")),
    );
    let (_graph, context) = context_with(mapper);
    let subject = item("i9");

    let err = context.map(&subject).expect_err("unknown field");
    assert!(matches!(
        err.root_cause(),
        MappingError::FieldNotFound { field, .. } if field == "nope"
    ));
    let failure = err.failure().expect("context");
    assert_eq!(failure.field.as_deref(), Some("missing"));
}

#[test]
fn test_checked_constructors_reject_wrong_generator_kind() {
    let literal = LiteralPropertyMapper::<str>::from_generator(
        ns("p"),
        ValueGenerator::iri(FnIriGenerator::new(|v: &str| Some(v.to_string()))),
    );
    assert!(literal.err().is_some_and(|e| e.is_configuration()));

    let resource = ResourcePropertyMapper::<Tag>::from_generator(
        ns("p"),
        ValueGenerator::literal(FnLiteralGenerator::new(|t: &Tag| Some(Literal::plain(&t.code)))),
    );
    assert!(resource.err().is_some_and(|e| e.is_configuration()));

    let accepted = ResourcePropertyMapper::<Tag>::from_generator(
        ns("p"),
        ValueGenerator::iri(FnIriGenerator::new(|t: &Tag| Some(ns(&t.code)))),
    )
    .expect("iri generator");
    assert_eq!(accepted.predicate(), ns("p"));
}

#[test]
fn test_resource_mapper_with_own_generator() {
    let (graph, context) = context_with(item_mapper());
    let subject = item("i10");
    let tag = Tag { code: "z".into() };
    let scope = context.scope().expect("scope");
    let mapper = ResourcePropertyMapper::with_iri_generator(
        ns("tagged"),
        FnIriGenerator::new(|t: &Tag| Some(format!("urn:tag:{}", t.code))),
    );

    assert!(mapper.map_value(&scope, &subject, &&tag).expect("map"));
    assert!(graph.contains_link(&ns("i10"), &ns("tagged"), "urn:tag:z"));
    assert!(context.is_visited(&tag));
}
