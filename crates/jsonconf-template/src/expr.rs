//! Expression parsing
//!
//! An expression payload has the shape `resolver.method(arg, ...)` where each
//! argument is a JSON literal.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Object key marking a whole object as one template expression.
pub const TEMPLATE_KEY: &str = "$template";

/// `{{ ... }}` occurrences inside a string.
static EMBEDDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap());

/// `resolver.method(args)` with the argument list captured raw.
static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*([A-Za-z_][A-Za-z0-9_-]*)\.([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)\s*$")
        .unwrap()
});

/// A parsed resolver invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub resolver: String,
    pub method: String,
    pub args: Vec<Value>,
}

impl Call {
    /// Parse a `resolver.method(args)` payload.
    pub fn parse(expression: &str) -> Result<Self> {
        let caps = CALL.captures(expression).ok_or_else(|| Error::Syntax {
            expression: expression.to_string(),
            reason: "expected resolver.method(arguments)".to_string(),
        })?;

        let raw_args = caps[3].trim();
        let args = if raw_args.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str::<Vec<Value>>(&format!("[{raw_args}]")).map_err(|e| {
                Error::Syntax {
                    expression: expression.to_string(),
                    reason: format!("arguments are not valid JSON: {e}"),
                }
            })?
        };

        Ok(Self {
            resolver: caps[1].to_string(),
            method: caps[2].to_string(),
            args,
        })
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Argument `index` as a string, or [`Error::InvalidArguments`].
    pub fn str_arg(&self, index: usize) -> Result<&str> {
        self.args
            .get(index)
            .and_then(Value::as_str)
            .ok_or_else(|| self.invalid(format!("argument {} must be a string", index + 1)))
    }

    /// Check that the call carries between `min` and `max` arguments.
    pub fn expect_args(&self, min: usize, max: usize) -> Result<()> {
        let n = self.args.len();
        if n < min || n > max {
            let expected = if min == max {
                format!("{min}")
            } else {
                format!("{min} to {max}")
            };
            return Err(self.invalid(format!("expected {expected} arguments, got {n}")));
        }
        Ok(())
    }

    pub fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidArguments {
            resolver: self.resolver.clone(),
            method: self.method.clone(),
            reason: reason.into(),
        }
    }

    pub fn unknown_method(&self) -> Error {
        Error::UnknownMethod {
            resolver: self.resolver.clone(),
            method: self.method.clone(),
        }
    }

    /// Wrap a failure raised while serving this call.
    pub fn failure(&self, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Error {
        Error::Resolver {
            resolver: self.resolver.clone(),
            method: self.method.clone(),
            source: source.into(),
        }
    }
}

/// An expression found inside a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Embedded<'a> {
    /// Byte range of the whole `{{ ... }}` match
    pub span: Range<usize>,
    pub payload: &'a str,
}

pub(crate) fn find_embedded(text: &str) -> Vec<Embedded<'_>> {
    EMBEDDED
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let payload = caps.get(1)?;
            Some(Embedded {
                span: whole.range(),
                payload: payload.as_str(),
            })
        })
        .collect()
}

/// The payload of a `{"$template": "..."}` marker object.
pub(crate) fn marker_payload(map: &Map<String, Value>) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    map.get(TEMPLATE_KEY).and_then(Value::as_str)
}
