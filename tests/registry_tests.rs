use std::sync::Arc;

use rdfbind::{
    ClassMapper, FnIriGenerator, GraphHandle, Literal, LiteralPropertyMapper, MapperRegistry,
    MappingError, MappingParams, MappingScope, MemoryGraph, ObjectMapper, ParamIriGenerator,
    RdfGraph, ResourcePropertyMapper, TraversalContext, generators::IriGenerator, vocab::rdf,
};

const NS: &str = "http://www.example.com/test#";

fn ns(local: &str) -> String {
    format!("{NS}{local}")
}

#[derive(Debug)]
struct Widget {
    code: String,
}

#[derive(Debug)]
struct Gadget {
    widget: Box<Widget>,
}

fn widget(code: &str) -> Widget {
    Widget { code: code.into() }
}

fn widget_mapper() -> ObjectMapper<Widget> {
    ObjectMapper::new()
        .with_type(ns("Widget"))
        .with_iri_generator(FnIriGenerator::new(|w: &Widget| Some(ns(&w.code))))
}

#[test]
fn test_register_reports_replacement() {
    let mut registry = MapperRegistry::new();
    assert!(registry.is_empty());
    assert!(!registry.register(widget_mapper()));
    assert!(registry.register(widget_mapper().with_type(ns("Other"))));
    assert_eq!(registry.len(), 1);
    assert!(registry.is_registered::<Widget>());
    assert!(!registry.is_registered::<Gadget>());
}

#[test]
fn test_replaced_binding_is_used() {
    let registry = MapperRegistry::new()
        .with(widget_mapper())
        .with(widget_mapper().with_type(ns("Replacement")));
    let graph = Arc::new(MemoryGraph::new());
    let context = TraversalContext::new(registry).with_graph(graph.clone());

    context.map(&widget("w1")).expect("map");
    assert!(graph.contains_link(&ns("w1"), rdf::TYPE, &ns("Replacement")));
    assert!(!graph.contains_link(&ns("w1"), rdf::TYPE, &ns("Widget")));
}

#[test]
fn test_empty_registry_is_configuration_error() {
    let registry = MapperRegistry::new();
    let err = registry
        .resolve_mapper::<Widget>()
        .err()
        .expect("empty registry");
    assert!(err.is_configuration());
    assert!(err.to_string().contains("no mappers registered"));
}

#[test]
fn test_unbound_type_is_configuration_error() {
    let registry = MapperRegistry::new().with(widget_mapper());
    let gadget = Gadget {
        widget: Box::new(widget("w")),
    };
    let err = registry
        .resolve_mapper_for(&gadget)
        .err()
        .expect("unbound type");
    assert!(err.is_configuration());
    assert!(err.to_string().contains("no mapper registered for Gadget"));

    let context = TraversalContext::new(registry).with_graph(Arc::new(MemoryGraph::new()));
    assert!(context.map(&gadget).expect_err("map").is_configuration());
    assert!(!context.is_visited(&gadget));
}

#[test]
fn test_unbound_reference_target_fails_the_traversal() {
    let gadget_mapper = ObjectMapper::<Gadget>::new()
        .with_iri_generator(FnIriGenerator::new(|_: &Gadget| Some(ns("gadget"))))
        .property(
            "widget",
            |g| Some(&g.widget),
            ResourcePropertyMapper::<Widget>::new(ns("part")),
        );
    let context = TraversalContext::new(MapperRegistry::new().with(gadget_mapper))
        .with_graph(Arc::new(MemoryGraph::new()));
    let gadget = Gadget {
        widget: Box::new(widget("w")),
    };

    let err = context.map(&gadget).expect_err("widget is unbound");
    assert!(err.is_configuration());
    let failure = err.failure().expect("field context");
    assert_eq!(failure.type_name, "Gadget");
    assert_eq!(failure.field.as_deref(), Some("widget"));
    assert_eq!(failure.predicate.as_deref(), Some(ns("part").as_str()));
}

#[test]
fn test_missing_iri_generator_is_configuration_error() {
    let registry = MapperRegistry::new().with(ObjectMapper::<Widget>::new().with_type(ns("Widget")));
    let err = registry
        .resolve_identifier(&widget("w"), &MappingParams::new())
        .expect_err("no generator");
    assert!(err.is_configuration());

    let context = TraversalContext::new(registry).with_graph(Arc::new(MemoryGraph::new()));
    let err = context.map(&widget("w")).expect_err("map");
    assert!(err.is_configuration());
    assert!(err.to_string().contains("Widget"));
}

#[test]
fn test_missing_graph_is_configuration_error() {
    let context = TraversalContext::new(MapperRegistry::new().with(widget_mapper()));
    let err = context.map(&widget("w")).expect_err("no graph");
    assert!(matches!(err, MappingError::Configuration(_)));
    assert!(context.scope().is_err());
}

#[test]
fn test_attach_new_graph_resets_visited_state() {
    let context = TraversalContext::new(MapperRegistry::new().with(widget_mapper()));
    let first: GraphHandle = Arc::new(MemoryGraph::new());
    context.attach_graph(first.clone());
    let object = widget("w");

    assert!(context.map(&object).expect("map"));
    context.attach_graph(first.clone());
    assert!(context.is_visited(&object));

    let second = Arc::new(MemoryGraph::new());
    context.attach_graph(second.clone());
    assert!(!context.is_visited(&object));
    assert!(context.map(&object).expect("map into second graph"));
    assert!(second.contains_link(&ns("w"), rdf::TYPE, &ns("Widget")));
}

#[test]
fn test_detach_graph() {
    let graph = Arc::new(MemoryGraph::new());
    let context = TraversalContext::new(MapperRegistry::new().with(widget_mapper()))
        .with_graph(graph.clone());
    assert!(context.detach_graph().is_some());
    assert!(context.graph().is_none());
    assert!(context.map(&widget("w")).is_err());
}

#[test]
fn test_params_flow_into_generators() {
    let mapper = ObjectMapper::<Widget>::new()
        .with_iri_generator(ParamIriGenerator::new("base", |w: &Widget| {
            Some(w.code.clone())
        }))
        .property(
            "code",
            |w| Some(w.code.as_str()),
            LiteralPropertyMapper::new(ns("code")),
        );
    let graph = Arc::new(MemoryGraph::new());
    let context = TraversalContext::new(MapperRegistry::new().with(mapper))
        .with_graph(graph.clone())
        .with_params(MappingParams::new().with("base", "urn:default:"));

    let first = widget("a");
    let second = widget("b");
    context.map(&first).expect("default params");
    context
        .map_with(&second, &MappingParams::new().with("base", "urn:other:"))
        .expect("explicit params");

    assert!(graph.contains(
        "urn:default:a",
        &ns("code"),
        &Literal::plain("a").into()
    ));
    assert!(graph.contains("urn:other:b", &ns("code"), &Literal::plain("b").into()));

    let err = context
        .map_with(&widget("c"), &MappingParams::new())
        .expect_err("missing param");
    assert!(err.is_configuration());
}

/// Hand-written class mapper: only the trait, no `ObjectMapper`.
struct CodeOnly;

impl ClassMapper<Widget> for CodeOnly {
    fn map(&self, scope: &MappingScope<'_>, source: &Widget) -> Result<bool, MappingError> {
        scope
            .graph()
            .assert_literal(&ns(&source.code), &ns("code"), &Literal::plain(&source.code))?;
        Ok(true)
    }

    fn iri_generator(&self) -> Option<&dyn IriGenerator<Widget>> {
        None
    }
}

#[test]
fn test_custom_class_mapper() {
    let graph = Arc::new(MemoryGraph::new());
    let context =
        TraversalContext::new(MapperRegistry::new().with(CodeOnly)).with_graph(graph.clone());

    assert!(context.map(&widget("x")).expect("map"));
    assert_eq!(graph.len(), 1);
    assert!(context.resolve_identifier(&widget("x")).is_err());
}

#[test]
fn test_graph_failure_is_wrapped_with_object_context() {
    struct Failing;

    impl RdfGraph for Failing {
        fn assert_resource(&self, _: &str, _: &str, _: &str) -> Result<(), MappingError> {
            Err(MappingError::graph("store offline"))
        }

        fn assert_literal(&self, _: &str, _: &str, _: &Literal) -> Result<(), MappingError> {
            Err(MappingError::graph("store offline"))
        }
    }

    let context = TraversalContext::new(MapperRegistry::new().with(widget_mapper()))
        .with_graph(Arc::new(Failing));
    let err = context.map(&widget("w")).expect_err("graph fails");

    assert!(matches!(err.root_cause(), MappingError::Graph(_)));
    let message = err.to_string();
    assert!(message.contains("Widget"), "{message}");
    assert!(message.contains("store offline"), "{message}");
}

#[test]
fn test_error_message_abbreviates_long_values() {
    let long_code = "x".repeat(200);
    let mapper = ObjectMapper::<Widget>::new()
        .with_iri_generator(FnIriGenerator::new(|_: &Widget| Some(ns("w"))))
        .property(
            "code",
            |w| Some(w.code.as_str()),
            LiteralPropertyMapper::new(""),
        );
    let context = TraversalContext::new(MapperRegistry::new().with(mapper))
        .with_graph(Arc::new(MemoryGraph::new()));

    let err = context.map(&widget(&long_code)).expect_err("empty predicate");
    let failure = err.failure().expect("context");
    assert!(failure.subject.ends_with("..."));
    assert!(failure.subject.chars().count() <= 50);
    assert_eq!(failure.field.as_deref(), Some("code"));
    assert!(matches!(err.root_cause(), MappingError::Graph(_)));
}

#[derive(Debug)]
struct Wrapper<T>(T);

#[test]
fn test_generic_type_names_are_shortened() {
    use rdfbind::errors::short_type_name;

    assert_eq!(short_type_name::<Widget>(), "Widget");
    assert_eq!(short_type_name::<Vec<String>>(), "Vec<String>");
    assert_eq!(short_type_name::<Wrapper<Widget>>(), "Wrapper<Widget>");
    assert_eq!(short_type_name::<(u8, Arc<Widget>)>(), "(u8, Arc<Widget>)");
    assert_eq!(short_type_name::<[Widget]>(), "[Widget]");

    let context = TraversalContext::new(MapperRegistry::new().with(widget_mapper()))
        .with_graph(Arc::new(MemoryGraph::new()));
    let err = context.map(&Wrapper(widget("w"))).expect_err("unbound");
    assert!(
        err.to_string().contains("no mapper registered for Wrapper<Widget>"),
        "{err}"
    );
}
