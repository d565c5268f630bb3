//! JavaScript target language formatting.

use apigen_shared::{DataType, Field};
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde_json::Value;

use super::{require_identifier, FormattingError, TargetLanguage};

/// Largest integer a JS `number` holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

#[derive(Debug, Default)]
pub struct JavascriptLanguage;

impl JavascriptLanguage {
    /// JS numbers are doubles; integers beyond 2^53 silently lose
    /// precision, so refuse to emit them as literals.
    fn check_safe_integers(value: &Value) -> Result<(), FormattingError> {
        match value {
            Value::Number(n) => {
                let unsafe_int = match (n.as_i64(), n.as_u64()) {
                    (Some(i), _) => i.unsigned_abs() > MAX_SAFE_INTEGER,
                    (None, Some(u)) => u > MAX_SAFE_INTEGER,
                    _ => false,
                };
                if unsafe_int {
                    return Err(FormattingError::UnrepresentableValue {
                        language: "javascript",
                        value: n.to_string(),
                        reason: "integer exceeds Number.MAX_SAFE_INTEGER",
                    });
                }
                Ok(())
            }
            Value::Array(items) => items.iter().try_for_each(Self::check_safe_integers),
            Value::Object(map) => map.values().try_for_each(Self::check_safe_integers),
            _ => Ok(()),
        }
    }
}

impl TargetLanguage for JavascriptLanguage {
    fn short_name(&self) -> &'static str {
        "js"
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["js"]
    }

    fn format_method(&self, name: &str) -> Result<String, FormattingError> {
        let name = require_identifier(name)?;
        Ok(name.to_lower_camel_case())
    }

    fn format_class(&self, name: &str) -> Result<String, FormattingError> {
        let name = require_identifier(name)?;
        Ok(name.to_upper_camel_case())
    }

    fn format_variable(&self, name: &str) -> Result<String, FormattingError> {
        self.format_method(name)
    }

    fn format_string_value(&self, value: &str) -> Result<String, FormattingError> {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for ch in value.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    return Err(FormattingError::UnrepresentableValue {
                        language: "javascript",
                        value: format!("{value:?}"),
                        reason: "unescapable control character in string literal",
                    })
                }
                c => out.push(c),
            }
        }
        out.push('"');
        Ok(out)
    }

    /// JSDoc-style type expressions; JS itself has no type syntax.
    fn format_type(&self, data_type: &DataType) -> Result<String, FormattingError> {
        Ok(match data_type {
            DataType::Struct { name, .. } | DataType::Union { name, .. } => {
                self.format_class(name)?
            }
            DataType::List { item } => format!("Array.<{}>", self.format_type(item)?),
            DataType::Binary => "Uint8Array".to_string(),
            DataType::String => "string".to_string(),
            DataType::Int64 | DataType::Float64 => "number".to_string(),
            DataType::Boolean => "boolean".to_string(),
            DataType::Timestamp => "Date".to_string(),
        })
    }

    fn format_object(&self, value: &Value) -> Result<String, FormattingError> {
        Self::check_safe_integers(value)?;
        // JSON is a valid JS object literal.
        serde_json::to_string(value).map_err(|_| FormattingError::UnrepresentableValue {
            language: "javascript",
            value: format!("{value:?}"),
            reason: "not serializable as a JS literal",
        })
    }

    fn format_func_call_args(&self, args: &[Field]) -> Result<String, FormattingError> {
        let mut rendered = Vec::with_capacity(args.len());
        for field in args {
            let name = self.format_variable(&field.name)?;
            match &field.default {
                // ES6 default parameter syntax
                Some(default) => rendered.push(format!("{name} = {}", self.format_object(default)?)),
                None => rendered.push(name),
            }
        }
        Ok(rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_formatting() {
        let js = JavascriptLanguage;
        assert_eq!(js.format_method("get_account_info").unwrap(), "getAccountInfo");
        assert_eq!(js.format_variable("file_count").unwrap(), "fileCount");
        assert_eq!(js.format_class("upload_session").unwrap(), "UploadSession");
    }

    #[test]
    fn test_string_value_uses_double_quotes() {
        let js = JavascriptLanguage;
        assert_eq!(js.format_string_value("say \"hi\"").unwrap(), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_type_formatting() {
        let js = JavascriptLanguage;
        let list = DataType::List {
            item: Box::new(DataType::Int64),
        };
        assert_eq!(js.format_type(&list).unwrap(), "Array.<number>");
        assert_eq!(js.format_type(&DataType::Binary).unwrap(), "Uint8Array");
    }

    #[test]
    fn test_object_literal_is_json() {
        let js = JavascriptLanguage;
        assert_eq!(
            js.format_object(&json!({"a": [1, true, null]})).unwrap(),
            "{\"a\":[1,true,null]}"
        );
    }

    #[test]
    fn test_unsafe_integer_rejected() {
        let js = JavascriptLanguage;
        let big = json!(9_007_199_254_740_993_i64);
        assert!(js.format_object(&big).is_err());
        assert!(js.format_object(&json!({"n": big})).is_err());
    }

    #[test]
    fn test_func_call_args_with_es6_default() {
        let js = JavascriptLanguage;
        let args = vec![
            Field {
                name: "file_path".to_string(),
                data_type: DataType::String,
                doc: String::new(),
                default: None,
            },
            Field {
                name: "limit".to_string(),
                data_type: DataType::Int64,
                doc: String::new(),
                default: Some(json!(25)),
            },
        ];
        assert_eq!(js.format_func_call_args(&args).unwrap(), "filePath, limit = 25");
    }
}
