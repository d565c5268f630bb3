//! Python target language formatting.

use apigen_shared::{DataType, Field};
use heck::{ToSnakeCase, ToUpperCamelCase};
use serde_json::Value;

use super::{require_identifier, FormattingError, TargetLanguage};

/// Names that cannot be used as Python identifiers; suffixed with `_`.
const RESERVED: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

#[derive(Debug, Default)]
pub struct PythonLanguage;

impl PythonLanguage {
    fn escape_reserved(name: String) -> String {
        if RESERVED.contains(&name.as_str()) {
            format!("{name}_")
        } else {
            name
        }
    }
}

impl TargetLanguage for PythonLanguage {
    fn short_name(&self) -> &'static str {
        "py"
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn format_method(&self, name: &str) -> Result<String, FormattingError> {
        let name = require_identifier(name)?;
        Ok(Self::escape_reserved(name.to_snake_case()))
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
        out.push('\'');
        for ch in value.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    return Err(FormattingError::UnrepresentableValue {
                        language: "python",
                        value: format!("{value:?}"),
                        reason: "unescapable control character in string literal",
                    })
                }
                c => out.push(c),
            }
        }
        out.push('\'');
        Ok(out)
    }

    fn format_type(&self, data_type: &DataType) -> Result<String, FormattingError> {
        Ok(match data_type {
            DataType::Struct { name, .. } | DataType::Union { name, .. } => {
                self.format_class(name)?
            }
            DataType::List { item } => format!("List[{}]", self.format_type(item)?),
            DataType::Binary => "bytes".to_string(),
            DataType::String => "str".to_string(),
            DataType::Int64 => "int".to_string(),
            DataType::Float64 => "float".to_string(),
            DataType::Boolean => "bool".to_string(),
            DataType::Timestamp => "datetime".to_string(),
        })
    }

    fn format_object(&self, value: &Value) -> Result<String, FormattingError> {
        Ok(match value {
            Value::Null => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
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
                        "{}: {}",
                        self.format_string_value(key)?,
                        self.format_object(val)?
                    ));
                }
                format!("{{{}}}", entries.join(", "))
            }
        })
    }

    fn format_func_call_args(&self, args: &[Field]) -> Result<String, FormattingError> {
        let mut rendered = Vec::with_capacity(args.len());
        for field in args {
            let name = self.format_variable(&field.name)?;
            match &field.default {
                Some(default) => rendered.push(format!("{name}={}", self.format_object(default)?)),
                None => rendered.push(name),
            }
        }
        Ok(rendered.join(", "))
    }
}
