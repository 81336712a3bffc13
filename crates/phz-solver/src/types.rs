//! Value shapes inferred for PHP expressions.
//!
//! `Type` is a closed sum: literal singletons, four array shapes, named
//! types and unions. Values are immutable and compared structurally.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Type {
    /// Unknown or unconstrained.
    Any,
    /// String literal singleton.
    Str { content: String },
    /// Integer literal singleton.
    Int { value: i64 },
    /// Associative shape. Entries are ordered and may repeat a key.
    RecordArr {
        entries: Vec<RecordEntry>,
        /// Verbatim remainder of a partially parsed `array{...}` annotation.
        #[serde(skip_serializing_if = "Option::is_none")]
        unparsed: Option<String>,
    },
    /// Indexed `0..n-1`.
    TupleArr { elements: Vec<Type> },
    /// Homogeneous list with unknown indices.
    ListArr { value_type: Box<Type> },
    /// Homogeneous map whose key set is described by `key_type`.
    MapArr {
        key_type: Box<Type>,
        value_type: Box<Type>,
    },
    /// Named class, interface or scalar type.
    Fqn { fqn: String, generics: Vec<Type> },
    /// Union. Flatten before comparing or matching.
    Mt { types: Vec<Type> },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEntry {
    pub key_type: Type,
    pub value_type: Type,
}

impl RecordEntry {
    pub fn new(key_type: Type, value_type: Type) -> Self {
        RecordEntry {
            key_type,
            value_type,
        }
    }
}

impl Type {
    pub fn str(content: impl Into<String>) -> Type {
        Type::Str {
            content: content.into(),
        }
    }

    pub fn int(value: i64) -> Type {
        Type::Int { value }
    }

    pub fn fqn(fqn: impl Into<String>) -> Type {
        Type::Fqn {
            fqn: fqn.into(),
            generics: Vec::new(),
        }
    }

    pub fn record(entries: Vec<RecordEntry>) -> Type {
        Type::RecordArr {
            entries,
            unparsed: None,
        }
    }

    pub fn tuple(elements: Vec<Type>) -> Type {
        Type::TupleArr { elements }
    }

    pub fn list(value_type: Type) -> Type {
        Type::ListArr {
            value_type: Box::new(value_type),
        }
    }

    pub fn map(key_type: Type, value_type: Type) -> Type {
        Type::MapArr {
            key_type: Box::new(key_type),
            value_type: Box::new(value_type),
        }
    }

    /// Collapse several alternatives: none is `Any`, one is itself.
    pub fn union(mut types: Vec<Type>) -> Type {
        match types.len() {
            0 => Type::Any,
            1 => types.swap_remove(0),
            _ => Type::Mt { types },
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    pub fn as_str_literal(&self) -> Option<&str> {
        match self {
            Type::Str { content } => Some(content),
            _ => None,
        }
    }
}

/// Whether `key` can be written as a bare record key.
fn is_bare_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, content: &str) -> fmt::Result {
    f.write_str("'")?;
    for ch in content.chars() {
        if ch == '\'' || ch == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{ch}")?;
    }
    f.write_str("'")
}

fn write_joined(f: &mut fmt::Formatter<'_>, types: &[Type], sep: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => f.write_str("mixed"),
            Type::Str { content } => write_quoted(f, content),
            Type::Int { value } => write!(f, "{value}"),
            Type::RecordArr { entries, unparsed } => {
                f.write_str("array{")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match &entry.key_type {
                        Type::Str { content } if is_bare_key(content) => f.write_str(content)?,
                        key => write!(f, "{key}")?,
                    }
                    write!(f, ": {}", entry.value_type)?;
                }
                if let Some(rest) = unparsed.as_deref().map(str::trim)
                    && !rest.is_empty()
                {
                    if !entries.is_empty() {
                        f.write_str(", ")?;
                    }
                    f.write_str(rest)?;
                }
                f.write_str("}")
            }
            Type::TupleArr { elements } => {
                f.write_str("array{")?;
                write_joined(f, elements, ", ")?;
                f.write_str("}")
            }
            Type::ListArr { value_type } => write!(f, "list<{value_type}>"),
            Type::MapArr {
                key_type,
                value_type,
            } => write!(f, "array<{key_type}, {value_type}>"),
            Type::Fqn { fqn, generics } => {
                f.write_str(fqn)?;
                if !generics.is_empty() {
                    f.write_str("<")?;
                    write_joined(f, generics, ", ")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Type::Mt { types } if types.is_empty() => f.write_str("never"),
            Type::Mt { types } => write_joined(f, types, "|"),
        }
    }
}
