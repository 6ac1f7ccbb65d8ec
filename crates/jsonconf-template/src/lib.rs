//! Template expression evaluation over JSON values
//!
//! Values read from configuration may carry deferred expressions that are
//! resolved at read time by named [`Resolver`]s:
//!
//! - inside a string: `"{{ config.get(\"db\", \"/host\") }}"`. A string that
//!   is exactly one expression is replaced by the resolved value with its
//!   type intact; expressions embedded in longer text are interpolated.
//! - as an object marker: `{"$template": "config.packageJson(\"name\")"}`
//!
//! Arguments are JSON literals separated by commas.
//!
//! # Example
//!
//! ```
//! use jsonconf_template::{Call, Evaluator, ResolverRegistry};
//! use serde_json::{Value, json};
//!
//! let mut registry = ResolverRegistry::new();
//! registry.register("math", |call: &Call| -> jsonconf_template::Result<Value> {
//!     let sum: i64 = call.args.iter().filter_map(Value::as_i64).sum();
//!     Ok(json!(sum))
//! });
//!
//! let evaluator = Evaluator::new(registry);
//! let value = json!({"total": "{{ math.sum(1, 2, 3) }}", "label": "n={{ math.sum(2, 2) }}"});
//! assert_eq!(
//!     evaluator.evaluate(&value).unwrap(),
//!     json!({"total": 6, "label": "n=4"})
//! );
//! ```

pub mod error;
pub mod evaluator;
pub mod expr;
pub mod resolver;

pub use error::{Error, Result};
pub use evaluator::{DEFAULT_MAX_DEPTH, Evaluator};
pub use expr::{Call, TEMPLATE_KEY};
pub use resolver::{Resolver, ResolverRegistry};
