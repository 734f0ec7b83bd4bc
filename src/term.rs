use std::{borrow::Cow, fmt, rc::Rc, sync::Arc};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::vocab::xsd;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    /// Untyped (simple) literal.
    pub fn plain<S: Into<String>>(lexical: S) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed<S: Into<String>, D: Into<String>>(lexical: S, datatype: D) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn lang<S: Into<String>, L: Into<String>>(lexical: S, language: L) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    pub fn is_typed_as(&self, datatype: &str) -> bool {
        self.datatype.as_deref() == Some(datatype)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal(&self.lexical))?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if let Some(datatype) = &self.datatype {
            write!(f, "^^<{datatype}>")
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Term {
    Iri(String),
    Literal(Literal),
}

impl Term {
    pub fn iri<S: Into<String>>(iri: S) -> Self {
        Term::Iri(iri.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            Term::Iri(_) => None,
        }
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Literal(literal) => fmt::Display::fmt(literal, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new<S: Into<String>, P: Into<String>>(subject: S, predicate: P, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

/// N-Triples line, including the terminating ` .`.
impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

fn escape_literal(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Conversion of a Rust value into a graph literal carrying the natural XSD
/// datatype of its runtime type. Values that have no literal form yield `None`.
pub trait ToLiteral {
    fn to_literal(&self) -> Option<Literal>;

    /// True for textual values with no characters; drives the empty-string policy
    /// of [`crate::generators::StandardLiteralGenerator`].
    fn is_empty_text(&self) -> bool {
        false
    }
}

/// Free-function form of [`ToLiteral::to_literal`].
pub fn value_to_literal<V: ToLiteral + ?Sized>(value: &V) -> Option<Literal> {
    value.to_literal()
}

impl ToLiteral for str {
    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::plain(self))
    }

    fn is_empty_text(&self) -> bool {
        self.is_empty()
    }
}

impl ToLiteral for String {
    fn to_literal(&self) -> Option<Literal> {
        self.as_str().to_literal()
    }

    fn is_empty_text(&self) -> bool {
        self.is_empty()
    }
}

impl ToLiteral for Cow<'_, str> {
    fn to_literal(&self) -> Option<Literal> {
        self.as_ref().to_literal()
    }

    fn is_empty_text(&self) -> bool {
        self.is_empty()
    }
}

impl ToLiteral for char {
    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::plain(self.to_string()))
    }
}

impl ToLiteral for bool {
    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::typed(self.to_string(), xsd::BOOLEAN))
    }
}

macro_rules! integer_literal {
    ($($ty:ty => $datatype:expr),* $(,)?) => {
        $(
            impl ToLiteral for $ty {
                fn to_literal(&self) -> Option<Literal> {
                    Some(Literal::typed(self.to_string(), $datatype))
                }
            }
        )*
    };
}

integer_literal! {
    i8 => xsd::BYTE,
    i16 => xsd::SHORT,
    i32 => xsd::INT,
    i64 => xsd::LONG,
    i128 => xsd::INTEGER,
    isize => xsd::LONG,
    u8 => xsd::UNSIGNED_BYTE,
    u16 => xsd::UNSIGNED_SHORT,
    u32 => xsd::UNSIGNED_INT,
    u64 => xsd::UNSIGNED_LONG,
    u128 => xsd::NON_NEGATIVE_INTEGER,
    usize => xsd::UNSIGNED_LONG,
}

fn float_lexical(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let lexical = if value > 0.0 { "INF" } else { "-INF" };
        lexical.to_string()
    } else {
        value.to_string()
    }
}

impl ToLiteral for f32 {
    fn to_literal(&self) -> Option<Literal> {
        let lexical = if self.is_finite() {
            self.to_string()
        } else {
            float_lexical(f64::from(*self))
        };
        Some(Literal::typed(lexical, xsd::FLOAT))
    }
}

impl ToLiteral for f64 {
    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::typed(float_lexical(*self), xsd::DOUBLE))
    }
}

impl<Tz: TimeZone> ToLiteral for DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::typed(self.to_rfc3339(), xsd::DATE_TIME))
    }
}

impl ToLiteral for NaiveDateTime {
    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::typed(
            self.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            xsd::DATE_TIME,
        ))
    }
}

impl ToLiteral for NaiveDate {
    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::typed(self.format("%Y-%m-%d").to_string(), xsd::DATE))
    }
}

impl ToLiteral for NaiveTime {
    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::typed(self.format("%H:%M:%S%.f").to_string(), xsd::TIME))
    }
}

impl ToLiteral for url::Url {
    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::typed(self.as_str(), xsd::ANY_URI))
    }
}

impl ToLiteral for serde_json::Value {
    fn to_literal(&self) -> Option<Literal> {
        use serde_json::Value;
        match self {
            Value::Null | Value::Array(_) | Value::Object(_) => None,
            Value::Bool(flag) => flag.to_literal(),
            Value::String(text) => text.to_literal(),
            Value::Number(number) => {
                if number.is_f64() {
                    number.as_f64().and_then(|value| value.to_literal())
                } else {
                    Some(Literal::typed(number.to_string(), xsd::INTEGER))
                }
            }
        }
    }

    fn is_empty_text(&self) -> bool {
        matches!(self, serde_json::Value::String(text) if text.is_empty())
    }
}

impl<T: ToLiteral> ToLiteral for Option<T> {
    fn to_literal(&self) -> Option<Literal> {
        self.as_ref().and_then(ToLiteral::to_literal)
    }

    fn is_empty_text(&self) -> bool {
        self.as_ref().is_some_and(ToLiteral::is_empty_text)
    }
}

macro_rules! forward_literal {
    ($($wrapper:ty),* $(,)?) => {
        $(
            impl<T: ToLiteral + ?Sized> ToLiteral for $wrapper {
                fn to_literal(&self) -> Option<Literal> {
                    (**self).to_literal()
                }

                fn is_empty_text(&self) -> bool {
                    (**self).is_empty_text()
                }
            }
        )*
    };
}

forward_literal!(&T, Box<T>, Rc<T>, Arc<T>);
