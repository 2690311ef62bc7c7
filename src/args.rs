//! Positional argument coercion.

use serde_json::Value;

/// Parses `arg` as JSON, falling back to the verbatim text as a string.
/// An empty argument becomes `null`.
pub fn coerce(arg: &str) -> Value {
    if arg.is_empty() {
        return Value::Null;
    }

    serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.to_string()))
}

/// Coerces every argument, keeping their order.
pub fn coerce_all<S: AsRef<str>>(args: &[S]) -> Vec<Value> {
    args.iter().map(|arg| coerce(arg.as_ref())).collect()
}
