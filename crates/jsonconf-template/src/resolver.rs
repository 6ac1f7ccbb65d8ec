//! Resolver trait and registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::expr::Call;

/// A named source of values for template expressions.
///
/// The evaluator hands each `name.method(args)` call to the resolver
/// registered under `name`.
pub trait Resolver: Send + Sync {
    fn resolve(&self, call: &Call) -> Result<Value>;
}

impl<F> Resolver for F
where
    F: Fn(&Call) -> Result<Value> + Send + Sync,
{
    fn resolve(&self, call: &Call) -> Result<Value> {
        self(call)
    }
}

/// Lookup table from resolver name to implementation.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, Arc<dyn Resolver>>,
}

impl ResolverRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, resolver: impl Resolver + 'static) {
        self.register_arc(name, Arc::new(resolver));
    }

    pub fn register_arc(&mut self, name: impl Into<String>, resolver: Arc<dyn Resolver>) {
        self.resolvers.insert(name.into(), resolver);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Resolver>> {
        self.resolvers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Registered names (sorted).
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.resolvers.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("resolvers", &self.names())
            .finish()
    }
}
