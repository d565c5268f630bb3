//! Ruby target language formatting.

use apigen_shared::{DataType, Field};
use heck::{ToSnakeCase, ToUpperCamelCase};
use serde_json::Value;

use super::{require_identifier, FormattingError, TargetLanguage};

#[derive(Debug, Default)]
pub struct RubyLanguage;

impl TargetLanguage for RubyLanguage {
    fn short_name(&self) -> &'static str {
        "rb"
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["rb"]
    }

    fn format_method(&self, name: &str) -> Result<String, FormattingError> {
        let name = require_identifier(name)?;
        Ok(name.to_snake_case())
    }

    fn format_class(&self, name: &str) -> Result<String, FormattingError> {
        let name = require_identifier(name)?;
        Ok(name.to_upper_camel_case())
    }

    fn format_variable(&self, name: &str) -> Result<String, FormattingError> {
        self.format_method(name)
    }

    /// Single-quoted Ruby strings: only `\\` and `\'` are escapes;
    /// everything else is literal, including newlines.
    fn format_string_value(&self, value: &str) -> Result<String, FormattingError> {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for ch in value.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                c if c.is_control() && c != '\n' && c != '\t' => {
                    return Err(FormattingError::UnrepresentableValue {
                        language: "ruby",
                        value: format!("{value:?}"),
                        reason: "control character in single-quoted string literal",
                    })
                }
                c => out.push(c),
            }
        }
        out.push('\'');
        Ok(out)
    }

    /// YARD-style type expressions.
    fn format_type(&self, data_type: &DataType) -> Result<String, FormattingError> {
        Ok(match data_type {
            DataType::Struct { name, .. } | DataType::Union { name, .. } => {
                self.format_class(name)?
            }
            DataType::List { item } => format!("Array<{}>", self.format_type(item)?),
            DataType::Binary | DataType::String => "String".to_string(),
            DataType::Int64 => "Integer".to_string(),
            DataType::Float64 => "Float".to_string(),
            DataType::Boolean => "Boolean".to_string(),
            DataType::Timestamp => "DateTime".to_string(),
        })
    }

    fn format_object(&self, value: &Value) -> Result<String, FormattingError> {
        Ok(match value {
            Value::Null => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => self.format_string_value(s)?,
            Value::Array(items) => {
                let rendered: Result<Vec<_>, _> =
                    items.iter().map(|v| self.format_object(v)).collect();
                format!("[{}]", rendered?.join(", "))
            }
            Value::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, val) in map {
                    entries.push(format!(
                        "{} => {}",
                        self.format_string_value(key)?,
                        self.format_object(val)?
                    ));
                }
                format!("{{ {} }}", entries.join(", "))
            }
        })
    }

    fn format_func_call_args(&self, args: &[Field]) -> Result<String, FormattingError> {
        let mut rendered = Vec::with_capacity(args.len());
        for field in args {
            let name = self.format_variable(&field.name)?;
            match &field.default {
                // Keyword argument with default
                Some(default) => rendered.push(format!("{name}: {}", self.format_object(default)?)),
                None => rendered.push(name),
            }
        }
        Ok(rendered.join(", "))
    }
}
