//! Template functions registered on every environment.

use std::collections::HashMap;

use tera::Value;

/// No-op output marker for whitespace control.
///
/// Tera trims whitespace around `{{- ... -}}` markers, but something
/// has to sit between them. `trim()` renders as the empty string, so
/// an author can keep one expression per template source line without
/// the template's own line breaks surviving into the output:
///
/// ```text
/// {{ one }}{{- trim() -}}
/// {{ two }}{{- trim() -}}
/// {{ three }}
/// ```
///
/// renders the three values concatenated. Arguments are accepted and
/// discarded. Purely a formatting aid, not control flow.
pub(crate) fn trim(_args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(String::new()))
}
