//! Generic and language-bound template filters.
//!
//! Two kinds of filter exist. Generic filters are visible to every
//! template regardless of target language. Language-scoped filters
//! are the fixed set `{method, class, variable, string_value, type,
//! pprint, func_call_args, doc_sub}` bound to one
//! [`TargetLanguage`]; they are registered twice — once under the
//! plain name resolved per render to the active language, and once
//! under a `{short_name}_` prefix so a template can deliberately
//! borrow another language's formatting.

use std::collections::HashMap;
use std::sync::Arc;

use tera::{Tera, Value};

use apigen_shared::{DataType, Field};

use crate::lang::{split_words, FormattingError, TargetLanguage};

/// Register the language-independent filter set.
pub(crate) fn register_generic_filters(tera: &mut Tera) {
    tera.register_filter("pjson", pjson);
    tera.register_filter("is_binary", is_binary);
    tera.register_filter("is_list", is_list);
    tera.register_filter("is_struct", is_struct);
    tera.register_filter("is_union", is_union);
    tera.register_filter("is_composite", is_composite);
    tera.register_filter("formal", formal);
    tera.register_filter("inverse_format", inverse_format);
    tera.register_filter("string_slice", string_slice);
}

/// Register the filter set bound to one descriptor.
///
/// Deterministic, pure function of the descriptor; called once per
/// language per Tera instance when the environment is built, never
/// per render. With `prefixed` the names carry the language's short
/// name (`js_type`); without it they claim the plain names (`type`)
/// that templates use for whichever language is active.
pub(crate) fn register_language_filters(
    tera: &mut Tera,
    language: &Arc<dyn TargetLanguage>,
    prefixed: bool,
) {
    let name = |base: &str| -> String {
        if prefixed {
            format!("{}_{base}", language.short_name())
        } else {
            base.to_string()
        }
    };

    let l = Arc::clone(language);
    tera.register_filter(
        &name("method"),
        move |v: &Value, _: &HashMap<String, Value>| {
            let s = expect_str(v, "method")?;
            l.format_method(s).map(Value::String).map_err(filter_error)
        },
    );

    let l = Arc::clone(language);
    tera.register_filter(
        &name("class"),
        move |v: &Value, _: &HashMap<String, Value>| {
            let s = expect_str(v, "class")?;
            l.format_class(s).map(Value::String).map_err(filter_error)
        },
    );

    let l = Arc::clone(language);
    tera.register_filter(
        &name("variable"),
        move |v: &Value, _: &HashMap<String, Value>| {
            let s = expect_str(v, "variable")?;
            l.format_variable(s).map(Value::String).map_err(filter_error)
        },
    );

    let l = Arc::clone(language);
    tera.register_filter(
        &name("string_value"),
        move |v: &Value, _: &HashMap<String, Value>| {
            let s = expect_str(v, "string_value")?;
            l.format_string_value(s)
                .map(Value::String)
                .map_err(filter_error)
        },
    );

    let l = Arc::clone(language);
    tera.register_filter(
        &name("type"),
        move |v: &Value, _: &HashMap<String, Value>| {
            let data_type: DataType = serde_json::from_value(v.clone())
                .map_err(|e| tera::Error::msg(format!("type filter expects a data type: {e}")))?;
            l.format_type(&data_type)
                .map(Value::String)
                .map_err(filter_error)
        },
    );

    let l = Arc::clone(language);
    tera.register_filter(
        &name("pprint"),
        move |v: &Value, _: &HashMap<String, Value>| {
            l.format_object(v).map(Value::String).map_err(filter_error)
        },
    );

    let l = Arc::clone(language);
    tera.register_filter(
        &name("func_call_args"),
        move |v: &Value, _: &HashMap<String, Value>| {
            let fields: Vec<Field> = serde_json::from_value(v.clone()).map_err(|e| {
                tera::Error::msg(format!("func_call_args filter expects a field list: {e}"))
            })?;
            l.format_func_call_args(&fields)
                .map(Value::String)
                .map_err(filter_error)
        },
    );

    let l = Arc::clone(language);
    tera.register_filter(
        &name("doc_sub"),
        move |v: &Value, _: &HashMap<String, Value>| {
            let doc = expect_str(v, "doc_sub")?;
            l.doc_tag_macros()
                .substitute(doc)
                .map(Value::String)
                .map_err(|e| tera::Error::msg(e.to_string()))
        },
    );
}

fn expect_str<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{filter} filter expects a string")))
}

fn filter_error(e: FormattingError) -> tera::Error {
    tera::Error::msg(e.to_string())
}

/// Pretty-printed JSON of any template value.
pub(crate) fn pjson(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let pretty =
        serde_json::to_string_pretty(value).map_err(|e| tera::Error::msg(e.to_string()))?;
    Ok(Value::String(pretty))
}

/// The `kind` discriminant of a serialized [`DataType`], if present.
fn kind_of(value: &Value) -> Option<&str> {
    value.get("kind").and_then(Value::as_str)
}

pub(crate) fn is_binary(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::Bool(kind_of(value) == Some("binary")))
}

pub(crate) fn is_list(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::Bool(kind_of(value) == Some("list")))
}

pub(crate) fn is_struct(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::Bool(kind_of(value) == Some("struct")))
}

pub(crate) fn is_union(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::Bool(kind_of(value) == Some("union")))
}

pub(crate) fn is_composite(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::Bool(matches!(
        kind_of(value),
        Some("struct") | Some("union")
    )))
}

/// Capitalized phrase from an identifier: `upload_session` → `Upload Session`.
pub(crate) fn formal(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = expect_str(value, "formal")?;
    let phrase = split_words(s)
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Value::String(phrase))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Insert the filtered value into a `pattern` argument:
/// `{{ variable | inverse_format(pattern=":{}") }}` renders `:value`.
///
/// The mirror image of `format`: the value fills the pattern's `{}`
/// placeholders instead of the pattern filling the value's.
pub(crate) fn inverse_format(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = expect_str(value, "inverse_format")?;
    let pattern = args
        .get("pattern")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("inverse_format filter requires a 'pattern' argument"))?;
    Ok(Value::String(pattern.replace("{}", s)))
}

/// Bounded string slice with `start`, `end`, and `step` arguments:
/// `{{ s | string_slice(start=1, end=5, step=2) }}`.
pub(crate) fn string_slice(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = expect_str(value, "string_slice")?;
    let chars: Vec<char> = s.chars().collect();

    let start = args.get("start").and_then(Value::as_u64).unwrap_or(0) as usize;
    let end = args
        .get("end")
        .and_then(Value::as_u64)
        .map_or(chars.len(), |e| e as usize)
        .min(chars.len());
    let step = args.get("step").and_then(Value::as_u64).unwrap_or(1) as usize;
    if step == 0 {
        return Err(tera::Error::msg("string_slice step must be positive"));
    }

    let start = start.min(end);
    let sliced: String = chars[start..end].iter().step_by(step).collect();
    Ok(Value::String(sliced))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apply(
        filter: fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>,
        value: Value,
    ) -> Value {
        filter(&value, &HashMap::new()).unwrap()
    }

    #[test]
    fn test_pjson_pretty_prints() {
        let out = apply(pjson, json!({"a": 1}));
        assert_eq!(out.as_str().unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_type_predicates() {
        let strukt = json!({"kind": "struct", "name": "S", "fields": []});
        let union = json!({"kind": "union", "name": "U", "variants": []});
        let list = json!({"kind": "list", "item": {"kind": "binary"}});
        let binary = json!({"kind": "binary"});

        assert_eq!(apply(is_struct, strukt.clone()), Value::Bool(true));
        assert_eq!(apply(is_union, strukt.clone()), Value::Bool(false));
        assert_eq!(apply(is_composite, strukt), Value::Bool(true));
        assert_eq!(apply(is_composite, union), Value::Bool(true));
        assert_eq!(apply(is_list, list.clone()), Value::Bool(true));
        assert_eq!(apply(is_composite, list), Value::Bool(false));
        assert_eq!(apply(is_binary, binary), Value::Bool(true));
        // Non-model values are simply none of the kinds
        assert_eq!(apply(is_struct, json!("text")), Value::Bool(false));
    }

    #[test]
    fn test_formal() {
        assert_eq!(
            apply(formal, json!("upload_session")).as_str().unwrap(),
            "Upload Session"
        );
        assert_eq!(
            apply(formal, json!("getAccountInfo")).as_str().unwrap(),
            "Get Account Info"
        );
    }

    #[test]
    fn test_inverse_format() {
        let mut args = HashMap::new();
        args.insert("pattern".to_string(), json!(":{}"));
        let out = inverse_format(&json!("symbol"), &args).unwrap();
        assert_eq!(out.as_str().unwrap(), ":symbol");
    }

    #[test]
    fn test_inverse_format_requires_pattern() {
        assert!(inverse_format(&json!("x"), &HashMap::new()).is_err());
    }

    #[test]
    fn test_string_slice() {
        let mut args = HashMap::new();
        args.insert("start".to_string(), json!(1));
        args.insert("end".to_string(), json!(5));
        let out = string_slice(&json!("abcdefg"), &args).unwrap();
        assert_eq!(out.as_str().unwrap(), "bcde");

        args.insert("step".to_string(), json!(2));
        let out = string_slice(&json!("abcdefg"), &args).unwrap();
        assert_eq!(out.as_str().unwrap(), "bd");
    }

    #[test]
    fn test_string_slice_bounds_clamped() {
        let mut args = HashMap::new();
        args.insert("end".to_string(), json!(100));
        let out = string_slice(&json!("abc"), &args).unwrap();
        assert_eq!(out.as_str().unwrap(), "abc");
    }

    #[test]
    fn test_string_slice_zero_step_rejected() {
        let mut args = HashMap::new();
        args.insert("step".to_string(), json!(0));
        assert!(string_slice(&json!("abc"), &args).is_err());
    }

    #[test]
    fn test_filters_reject_non_strings() {
        assert!(formal(&json!(42), &HashMap::new()).is_err());
        assert!(string_slice(&json!(42), &HashMap::new()).is_err());
    }
}
