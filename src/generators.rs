//! Value generators turn a field value (or a whole object) into the graph value
//! a statement needs: a literal for data fields, an IRI for identifiers.

use std::fmt;

use crate::{
    errors::MappingError,
    iri::{hash_iri_signature, parse_iri, slugify, url_encode},
    params::MappingParams,
    term::{Literal, ToLiteral},
};

pub trait LiteralGenerator<V: ?Sized>: Send + Sync {
    fn literal(&self, value: &V, params: &MappingParams) -> Result<Option<Literal>, MappingError>;
}

/// Computes the identifier of an object; `None` excludes the object (or the
/// relation pointing at it) from the output.
pub trait IriGenerator<T: ?Sized>: Send + Sync {
    fn iri(&self, source: &T, params: &MappingParams) -> Result<Option<String>, MappingError>;
}

impl<V: ?Sized, G: LiteralGenerator<V> + ?Sized> LiteralGenerator<V> for Box<G> {
    fn literal(&self, value: &V, params: &MappingParams) -> Result<Option<Literal>, MappingError> {
        (**self).literal(value, params)
    }
}

impl<T: ?Sized, G: IriGenerator<T> + ?Sized> IriGenerator<T> for Box<G> {
    fn iri(&self, source: &T, params: &MappingParams) -> Result<Option<String>, MappingError> {
        (**self).iri(source, params)
    }
}

/// Either kind of generator, for mappers that accept both.
pub enum ValueGenerator<V: ?Sized> {
    Literal(Box<dyn LiteralGenerator<V>>),
    Iri(Box<dyn IriGenerator<V>>),
}

impl<V: ?Sized> ValueGenerator<V> {
    pub fn literal<G: LiteralGenerator<V> + 'static>(generator: G) -> Self {
        ValueGenerator::Literal(Box::new(generator))
    }

    pub fn iri<G: IriGenerator<V> + 'static>(generator: G) -> Self {
        ValueGenerator::Iri(Box::new(generator))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ValueGenerator::Literal(_) => "literal generator",
            ValueGenerator::Iri(_) => "IRI generator",
        }
    }
}

impl<V: ?Sized> fmt::Debug for ValueGenerator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Default literal generator: scalars get the datatype of their Rust type,
/// text becomes a plain literal. Empty text counts as absent unless
/// `empty_string_is_null` is switched off.
#[derive(Clone, Copy, Debug)]
pub struct StandardLiteralGenerator {
    pub empty_string_is_null: bool,
}

impl StandardLiteralGenerator {
    pub fn new(empty_string_is_null: bool) -> Self {
        Self {
            empty_string_is_null,
        }
    }
}

impl Default for StandardLiteralGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<V: ToLiteral + ?Sized> LiteralGenerator<V> for StandardLiteralGenerator {
    fn literal(&self, value: &V, _params: &MappingParams) -> Result<Option<Literal>, MappingError> {
        if self.empty_string_is_null && value.is_empty_text() {
            return Ok(None);
        }
        Ok(value.to_literal())
    }
}

/// Models a boolean flag by presence: `true` yields `"true"^^xsd:boolean`,
/// `false` yields nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrueLiteralGenerator;

impl LiteralGenerator<bool> for TrueLiteralGenerator {
    fn literal(&self, value: &bool, params: &MappingParams) -> Result<Option<Literal>, MappingError> {
        if !*value {
            return Ok(None);
        }
        StandardLiteralGenerator::default().literal(value, params)
    }
}

impl LiteralGenerator<Option<bool>> for TrueLiteralGenerator {
    fn literal(
        &self,
        value: &Option<bool>,
        params: &MappingParams,
    ) -> Result<Option<Literal>, MappingError> {
        match value {
            Some(flag) => LiteralGenerator::<bool>::literal(self, flag, params),
            None => Ok(None),
        }
    }
}

/// Literal generator backed by a closure.
pub struct FnLiteralGenerator<V: ?Sized> {
    func: Box<dyn Fn(&V) -> Option<Literal> + Send + Sync>,
}

impl<V: ?Sized> FnLiteralGenerator<V> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&V) -> Option<Literal> + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
        }
    }
}

impl<V: ?Sized> LiteralGenerator<V> for FnLiteralGenerator<V> {
    fn literal(&self, value: &V, _params: &MappingParams) -> Result<Option<Literal>, MappingError> {
        Ok((self.func)(value))
    }
}

/// Identifier generator backed by a closure.
pub struct FnIriGenerator<T: ?Sized> {
    func: Box<dyn Fn(&T, &MappingParams) -> Option<String> + Send + Sync>,
}

impl<T: ?Sized> FnIriGenerator<T> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            func: Box::new(move |source, _| func(source)),
        }
    }

    pub fn with_params<F>(func: F) -> Self
    where
        F: Fn(&T, &MappingParams) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
        }
    }
}

impl<T: ?Sized> IriGenerator<T> for FnIriGenerator<T> {
    fn iri(&self, source: &T, params: &MappingParams) -> Result<Option<String>, MappingError> {
        Ok((self.func)(source, params))
    }
}

/// `base` followed by the slug of a name field (`"A Test Object"` becomes
/// `a_test_object`). Blank names produce no identifier.
///
/// The slug is kept as is when `base` plus slug is already a well-formed IRI
/// in normalised form (`"O'Brien"` becomes `o'brien`). Otherwise the slug is
/// form-encoded, so `"50% off"` becomes `50%25_off` and `"Café"` becomes
/// `caf%C3%A9`.
pub struct SlugIriGenerator<T: ?Sized> {
    base: String,
    key: Box<dyn Fn(&T) -> Option<&str> + Send + Sync>,
}

impl<T: ?Sized> SlugIriGenerator<T> {
    pub fn new<B, F>(base: B, key: F) -> Self
    where
        B: Into<String>,
        F: Fn(&T) -> Option<&str> + Send + Sync + 'static,
    {
        Self {
            base: base.into(),
            key: Box::new(key),
        }
    }
}

impl<T: ?Sized> SlugIriGenerator<T> {
    fn join(&self, slug: &str) -> String {
        let iri = format!("{}{}", self.base, slug);
        if slug.contains(['%', '#']) {
            return format!("{}{}", self.base, url_encode(slug));
        }
        match parse_iri(&iri) {
            Ok(normalised) if normalised == iri => iri,
            _ => format!("{}{}", self.base, url_encode(slug)),
        }
    }
}

impl<T: ?Sized> IriGenerator<T> for SlugIriGenerator<T> {
    fn iri(&self, source: &T, _params: &MappingParams) -> Result<Option<String>, MappingError> {
        Ok((self.key)(source)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| self.join(&slugify(name))))
    }
}

/// `base` followed by the MD5 hex digest of a natural key.
pub struct HashIriGenerator<T: ?Sized> {
    base: String,
    key: Box<dyn Fn(&T) -> Option<&str> + Send + Sync>,
}

impl<T: ?Sized> HashIriGenerator<T> {
    pub fn new<B, F>(base: B, key: F) -> Self
    where
        B: Into<String>,
        F: Fn(&T) -> Option<&str> + Send + Sync + 'static,
    {
        Self {
            base: base.into(),
            key: Box::new(key),
        }
    }
}

impl<T: ?Sized> IriGenerator<T> for HashIriGenerator<T> {
    fn iri(&self, source: &T, _params: &MappingParams) -> Result<Option<String>, MappingError> {
        Ok((self.key)(source).map(|key| format!("{}{}", self.base, hash_iri_signature(key))))
    }
}

/// Identifier whose namespace comes from a mapping parameter, so one mapper
/// set can export into different datasets. A missing parameter is a
/// configuration error.
pub struct ParamIriGenerator<T: ?Sized> {
    param: String,
    local: Box<dyn Fn(&T) -> Option<String> + Send + Sync>,
}

impl<T: ?Sized> ParamIriGenerator<T> {
    pub fn new<P, F>(param: P, local: F) -> Self
    where
        P: Into<String>,
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            param: param.into(),
            local: Box::new(local),
        }
    }
}

impl<T: ?Sized> IriGenerator<T> for ParamIriGenerator<T> {
    fn iri(&self, source: &T, params: &MappingParams) -> Result<Option<String>, MappingError> {
        let base = params.get_str(&self.param).ok_or_else(|| {
            MappingError::configuration(format!("mapping param '{}' is not set", self.param))
        })?;
        Ok((self.local)(source).map(|local| format!("{base}{local}")))
    }
}
