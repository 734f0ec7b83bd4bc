use std::sync::Arc;

use rdfbind::{
    CollectionPropertyMapper, FnIriGenerator, HashIriGenerator, LiteralPropertyMapper,
    MapperRegistry, MemoryGraph, NamespaceTable, ObjectMapper, ResourcePropertyMapper,
    TraversalContext,
};

const EXNS: &str = "http://www.example.com/ex/";

#[derive(Debug)]
struct Person {
    email: String,
    name: String,
}

#[derive(Debug)]
struct Article {
    id: u64,
    title: String,
    authors: Vec<Arc<Person>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();
    if let Err(err) = run() {
        eprintln!("foaf_export error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let ns = NamespaceTable::with_defaults();

    let person = ObjectMapper::<Person>::new()
        .with_type(ns.expand("foaf:Person")?)
        .with_iri_generator(HashIriGenerator::new(
            format!("{EXNS}person/"),
            |p: &Person| Some(p.email.as_str()),
        ))
        .property(
            "name",
            |p| Some(p.name.as_str()),
            LiteralPropertyMapper::new(ns.expand("foaf:name")?),
        );
    let article = ObjectMapper::<Article>::new()
        .with_type(ns.expand("foaf:Document")?)
        .with_iri_generator(FnIriGenerator::new(|a: &Article| {
            Some(format!("{EXNS}article/{}", a.id))
        }))
        .property(
            "title",
            |a| Some(a.title.as_str()),
            LiteralPropertyMapper::new(ns.expand("dcterms:title")?),
        )
        .property(
            "authors",
            |a| Some(&a.authors),
            CollectionPropertyMapper::new(ResourcePropertyMapper::<Person>::new(
                ns.expand("dcterms:creator")?,
            )),
        );

    let graph = Arc::new(MemoryGraph::new());
    let context =
        TraversalContext::new(MapperRegistry::new().with(person).with(article)).with_graph(graph.clone());

    let tim = Arc::new(Person {
        email: "tbl@w3cc.com".into(),
        name: "Tim Berners-Lee".into(),
    });
    let articles = [
        Article {
            id: 1,
            title: "The Semantic Web".into(),
            authors: vec![tim.clone()],
        },
        Article {
            id: 2,
            title: "Linked Data".into(),
            authors: vec![tim],
        },
    ];
    for article in &articles {
        context.map(article)?;
    }

    print!("{}", graph.to_ntriples());
    Ok(())
}
