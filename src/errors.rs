use std::{fmt, sync::LazyLock};

use ahash::AHashMap;
use parking_lot::Mutex;
use thiserror::Error;

/// Longest rendering of a subject or value kept in error messages.
pub const ABBREVIATE_WIDTH: usize = 50;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("field '{field}' not found on {type_name}")]
    FieldNotFound {
        type_name: &'static str,
        field: String,
    },
    #[error("graph error: {0}")]
    Graph(String),
    #[error(transparent)]
    Mapping(Box<MappingFailure>),
}

impl MappingError {
    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        MappingError::Configuration(msg.into())
    }

    pub fn graph<T: Into<String>>(msg: T) -> Self {
        MappingError::Graph(msg.into())
    }

    pub fn field_not_found<T: Into<String>>(type_name: &'static str, field: T) -> Self {
        MappingError::FieldNotFound {
            type_name,
            field: field.into(),
        }
    }

    /// Walks through contextual wrappers down to the error that started it.
    pub fn root_cause(&self) -> &MappingError {
        let mut current = self;
        while let MappingError::Mapping(failure) = current {
            current = &failure.source;
        }
        current
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self.root_cause(), MappingError::Configuration(_))
    }

    pub fn failure(&self) -> Option<&MappingFailure> {
        match self {
            MappingError::Mapping(failure) => Some(failure),
            _ => None,
        }
    }

    /// Adds the bound field name to an error about `subject`, wrapping it when
    /// the error carries no context for that subject yet.
    pub(crate) fn within_field(self, type_name: &'static str, subject: &str, field: &str) -> Self {
        match self {
            MappingError::Mapping(mut failure)
                if failure.type_name == type_name
                    && failure.subject == subject
                    && failure.field.is_none() =>
            {
                failure.field = Some(field.to_string());
                MappingError::Mapping(failure)
            }
            other => MappingFailure::new(type_name, subject.to_string(), other)
                .field(field)
                .into(),
        }
    }
}

/// Context attached to a failure while mapping one object or one of its fields.
#[derive(Debug)]
pub struct MappingFailure {
    pub type_name: &'static str,
    pub subject: String,
    pub field: Option<String>,
    pub predicate: Option<String>,
    pub value: Option<String>,
    pub source: MappingError,
}

impl MappingFailure {
    pub fn new(type_name: &'static str, subject: String, source: MappingError) -> Self {
        Self {
            type_name,
            subject,
            field: None,
            predicate: None,
            value: None,
            source,
        }
    }

    pub fn field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn predicate(mut self, predicate: &str) -> Self {
        self.predicate = Some(predicate.to_string());
        self
    }

    pub fn value(mut self, value: String) -> Self {
        self.value = Some(value);
        self
    }
}

impl fmt::Display for MappingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error while mapping {}[{}]", self.type_name, self.subject)?;
        if let Some(field) = &self.field {
            write!(f, ".'{field}'")?;
        }
        if let Some(predicate) = &self.predicate {
            write!(f, " <{predicate}>")?;
        }
        if let Some(value) = &self.value {
            write!(f, " [{value}]")?;
        }
        write!(f, " to RDF: {}", self.source)
    }
}

impl std::error::Error for MappingFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<MappingFailure> for MappingError {
    fn from(failure: MappingFailure) -> Self {
        MappingError::Mapping(Box::new(failure))
    }
}

/// Debug rendering of `value`, cut to `max` characters with a trailing `...`.
pub fn abbreviate<V: fmt::Debug + ?Sized>(value: &V, max: usize) -> String {
    let rendered = format!("{value:?}");
    if rendered.chars().count() <= max {
        return rendered;
    }
    let keep = max.saturating_sub(3);
    let mut out: String = rendered.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Short name of `T` without module paths, e.g. `Foo` for `app::model::Foo`
/// and `Wrapper<Foo>` for `app::Wrapper<app::model::Foo>`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    // Shortened compound names, interned once per type.
    static COMPOUND: LazyLock<Mutex<AHashMap<&'static str, &'static str>>> =
        LazyLock::new(Default::default);

    let full = std::any::type_name::<T>();
    if !full.contains(is_type_delimiter) {
        return last_segment(full);
    }
    *COMPOUND
        .lock()
        .entry(full)
        .or_insert_with(|| Box::leak(strip_paths(full).into_boxed_str()))
}

fn is_type_delimiter(ch: char) -> bool {
    matches!(
        ch,
        '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' | '*'
    )
}

fn last_segment(path: &str) -> &str {
    path.rfind("::").map_or(path, |idx| &path[idx + 2..])
}

fn strip_paths(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut start = 0;
    for (idx, ch) in full.char_indices() {
        if is_type_delimiter(ch) {
            out.push_str(last_segment(&full[start..idx]));
            out.push(ch);
            start = idx + ch.len_utf8();
        }
    }
    out.push_str(last_segment(&full[start..]));
    out
}
