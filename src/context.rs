//! Traversal state: the entry point for mapping object graphs.
//!
//! A [`TraversalContext`] owns the visited set and the output graph handle and
//! shares the frozen [`MapperRegistry`]. Each `map` call opens a
//! [`MappingScope`] that every mapper down the call chain receives, so
//! references discovered while mapping go back through the same visited set.
//!
//! Objects are marked visited *before* their mapper runs; a reference cycle
//! that leads back to an object being mapped sees it as done. An object is
//! known by its type and the IRI its class mapper generates, so two values
//! describing the same resource are mapped once. Objects without an IRI fall
//! back to their address. Statements already asserted when an error aborts a
//! call stay in the graph.

use std::{any::Any, sync::Arc};

use parking_lot::RwLock;

use crate::{
    errors::{MappingError, short_type_name},
    graph::{GraphHandle, RdfGraph, same_graph},
    mapper::ClassMapper,
    object::{MappedObject, ObjectKey},
    params::MappingParams,
    registry::MapperRegistry,
    visited::VisitedSet,
};

pub struct TraversalContext {
    registry: Arc<MapperRegistry>,
    graph: RwLock<Option<GraphHandle>>,
    visited: VisitedSet,
    params: MappingParams,
}

impl TraversalContext {
    pub fn new<R: Into<Arc<MapperRegistry>>>(registry: R) -> Self {
        Self {
            registry: registry.into(),
            graph: RwLock::new(None),
            visited: VisitedSet::new(),
            params: MappingParams::new(),
        }
    }

    pub fn with_graph(self, graph: GraphHandle) -> Self {
        *self.graph.write() = Some(graph);
        self
    }

    /// Params used by [`map`](Self::map) and [`resolve_identifier`](Self::resolve_identifier).
    pub fn with_params(mut self, params: MappingParams) -> Self {
        self.params = params;
        self
    }

    pub fn registry(&self) -> &Arc<MapperRegistry> {
        &self.registry
    }

    pub fn params(&self) -> &MappingParams {
        &self.params
    }

    pub fn graph(&self) -> Option<GraphHandle> {
        self.graph.read().clone()
    }

    /// Points the context at `graph`. Switching to a different graph starts a
    /// fresh traversal run; re-attaching the current one keeps the visited set.
    pub fn attach_graph(&self, graph: GraphHandle) {
        let changed = {
            let mut slot = self.graph.write();
            let changed = slot
                .as_ref()
                .is_none_or(|current| !same_graph(current, &graph));
            *slot = Some(graph);
            changed
        };
        if changed {
            tracing::debug!("output graph changed, resetting traversal state");
            self.reset();
        }
    }

    pub fn detach_graph(&self) -> Option<GraphHandle> {
        self.graph.write().take()
    }

    /// Forgets every visited object; bindings and graph stay.
    pub fn reset(&self) {
        self.visited.clear();
    }

    /// `false` for objects of unregistered types.
    pub fn is_visited<T: MappedObject>(&self, object: &T) -> bool {
        match self.registry.resolve_mapper::<T>() {
            Ok(mapper) => self
                .visited
                .contains(&object_key(mapper, object, &self.params)),
            Err(_) => false,
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Opens a scope over the attached graph with the default params.
    pub fn scope(&self) -> Result<MappingScope<'_>, MappingError> {
        self.scope_with(&self.params)
    }

    pub fn scope_with<'a>(
        &'a self,
        params: &'a MappingParams,
    ) -> Result<MappingScope<'a>, MappingError> {
        let graph = self.graph().ok_or_else(|| {
            MappingError::configuration("no graph attached to the traversal context")
        })?;
        Ok(MappingScope {
            context: self,
            graph,
            params,
        })
    }

    /// Maps `object` and everything reachable from it. `false` when the object
    /// was already visited or its mapper skipped it.
    pub fn map<T: MappedObject>(&self, object: &T) -> Result<bool, MappingError> {
        self.scope()?.map(object)
    }

    pub fn map_with<T: MappedObject>(
        &self,
        object: &T,
        params: &MappingParams,
    ) -> Result<bool, MappingError> {
        self.scope_with(params)?.map(object)
    }

    pub fn map_option<T: MappedObject>(&self, object: Option<&T>) -> Result<bool, MappingError> {
        match object {
            Some(object) => self.map(object),
            None => Ok(false),
        }
    }

    /// Maps a value whose concrete type is only known at run time.
    pub fn map_dyn(&self, object: &dyn Any) -> Result<bool, MappingError> {
        self.scope()?.map_dyn(object)
    }

    pub fn resolve_identifier<T: MappedObject>(
        &self,
        object: &T,
    ) -> Result<Option<String>, MappingError> {
        self.registry.resolve_identifier(object, &self.params)
    }
}

/// The view of a traversal a mapper works with during one `map` call. The
/// graph handle is captured when the scope opens, so re-attaching a graph
/// mid-call does not split the output.
pub struct MappingScope<'a> {
    context: &'a TraversalContext,
    graph: GraphHandle,
    params: &'a MappingParams,
}

impl<'a> MappingScope<'a> {
    /// Maps a referenced object through the traversal, at most once per run.
    pub fn map<T: MappedObject>(&self, object: &T) -> Result<bool, MappingError> {
        let mapper = self.context.registry.resolve_mapper::<T>()?;
        let key = object_key(mapper, object, self.params);
        if !self.context.visited.insert(key.clone()) {
            tracing::trace!("{} already visited", short_type_name::<T>());
            return Ok(false);
        }
        tracing::debug!("mapping {:?}", key);
        mapper.map(self, object)
    }

    pub fn map_option<T: MappedObject>(&self, object: Option<&T>) -> Result<bool, MappingError> {
        match object {
            Some(object) => self.map(object),
            None => Ok(false),
        }
    }

    pub fn map_dyn(&self, object: &dyn Any) -> Result<bool, MappingError> {
        let mapper = self.context.registry.resolve_erased(object)?;
        let key = mapper.key_any(object, self.params);
        if !self.context.visited.insert(key.clone()) {
            tracing::trace!("{} already visited", mapper.type_name());
            return Ok(false);
        }
        tracing::debug!("mapping {} {:?}", mapper.type_name(), key);
        mapper.map_any(self, object)
    }

    /// Identifier of `object` according to its registered class mapper.
    pub fn identifier<T: MappedObject>(&self, object: &T) -> Result<Option<String>, MappingError> {
        self.context.registry.resolve_identifier(object, self.params)
    }

    pub fn graph(&self) -> &dyn RdfGraph {
        &*self.graph
    }

    pub fn graph_handle(&self) -> &GraphHandle {
        &self.graph
    }

    pub fn params(&self) -> &'a MappingParams {
        self.params
    }

    pub fn registry(&self) -> &'a MapperRegistry {
        &self.context.registry
    }

    pub fn context(&self) -> &'a TraversalContext {
        self.context
    }
}

/// Visited-set key of `object`: its generated IRI, or its address when the
/// mapper has no generator or the generator yields nothing. A failing
/// generator also falls back to the address; the mapper reports the error
/// itself when it runs.
pub(crate) fn object_key<T: MappedObject>(
    mapper: &dyn ClassMapper<T>,
    object: &T,
    params: &MappingParams,
) -> ObjectKey {
    match mapper.iri_generator().map(|generator| generator.iri(object, params)) {
        Some(Ok(Some(iri))) => ObjectKey::resource::<T, _>(iri),
        _ => ObjectKey::of(object),
    }
}
