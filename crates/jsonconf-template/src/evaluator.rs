//! Recursive evaluation of templated JSON values

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::thread::{self, ThreadId};

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::expr::{self, Call};
use crate::resolver::ResolverRegistry;

/// Default bound on nested resolver invocations.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Walks JSON values and replaces template expressions with resolved values.
///
/// Resolvers may call back into code that evaluates again through the same
/// evaluator (a configuration value referencing another one). Every nested
/// resolver invocation counts against `max_depth`, so a value that refers
/// back to itself ends in [`Error::RecursionLimit`] instead of overflowing
/// the stack. Depth is tracked per thread: evaluations running on
/// different threads never count against each other.
#[derive(Debug)]
pub struct Evaluator {
    registry: ResolverRegistry,
    max_depth: usize,
    depths: Mutex<HashMap<ThreadId, usize>>,
}

impl Evaluator {
    pub fn new(registry: ResolverRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
            depths: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn depths(&self) -> MutexGuard<'_, HashMap<ThreadId, usize>> {
        self.depths.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of resolver invocations in progress on the calling thread.
    pub fn depth(&self) -> usize {
        self.depths()
            .get(&thread::current().id())
            .copied()
            .unwrap_or(0)
    }

    /// Evaluate every template expression inside `value`.
    pub fn evaluate(&self, value: &Value) -> Result<Value> {
        match value {
            Value::String(text) => self.evaluate_string(text),
            Value::Array(items) => items
                .iter()
                .map(|item| self.evaluate(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => {
                if let Some(payload) = expr::marker_payload(map) {
                    return self.call(&Call::parse(payload)?);
                }
                let mut evaluated = Map::with_capacity(map.len());
                for (key, member) in map {
                    evaluated.insert(key.clone(), self.evaluate(member)?);
                }
                Ok(Value::Object(evaluated))
            }
            other => Ok(other.clone()),
        }
    }

    fn evaluate_string(&self, text: &str) -> Result<Value> {
        let found = expr::find_embedded(text);
        if found.is_empty() {
            return Ok(Value::String(text.to_string()));
        }

        // A lone expression keeps the resolved value's type
        if let [only] = found.as_slice() {
            if &text[only.span.clone()] == text.trim() {
                return self.call(&Call::parse(only.payload)?);
            }
        }

        let mut rendered = String::with_capacity(text.len());
        let mut cursor = 0;
        for embedded in &found {
            rendered.push_str(&text[cursor..embedded.span.start]);
            match self.call(&Call::parse(embedded.payload)?)? {
                Value::String(s) => rendered.push_str(&s),
                other => rendered.push_str(&other.to_string()),
            }
            cursor = embedded.span.end;
        }
        rendered.push_str(&text[cursor..]);
        Ok(Value::String(rendered))
    }

    /// Dispatch one call to its resolver, counting it against the depth limit.
    pub fn call(&self, call: &Call) -> Result<Value> {
        let _guard = DepthGuard::enter(self)?;
        let resolver = self
            .registry
            .get(&call.resolver)
            .ok_or_else(|| Error::UnknownResolver {
                name: call.resolver.clone(),
            })?;
        tracing::debug!(
            resolver = %call.resolver,
            method = %call.method,
            depth = self.depth(),
            "Resolving template expression"
        );
        resolver.resolve(call)
    }
}

struct DepthGuard<'a> {
    evaluator: &'a Evaluator,
    thread: ThreadId,
}

impl<'a> DepthGuard<'a> {
    fn enter(evaluator: &'a Evaluator) -> Result<Self> {
        let thread = thread::current().id();
        let mut depths = evaluator.depths();
        let depth = depths.entry(thread).or_insert(0);
        if *depth >= evaluator.max_depth {
            let max_depth = evaluator.max_depth;
            if *depth == 0 {
                depths.remove(&thread);
            }
            tracing::warn!(max_depth, "Template recursion limit reached");
            return Err(Error::RecursionLimit { max_depth });
        }
        *depth += 1;
        Ok(Self { evaluator, thread })
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        let mut depths = self.evaluator.depths();
        if let Some(depth) = depths.get_mut(&self.thread) {
            *depth -= 1;
            if *depth == 0 {
                depths.remove(&self.thread);
            }
        }
    }
}
