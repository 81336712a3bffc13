//! Docblock comments: cleaning, raw tags, function annotations and
//! `@psalm-type` aliases.

pub mod type_expr;
pub use type_expr::{ParsedTypeExpr, parse_type_expr};

use crate::key_access::flatten_types;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{RecordEntry, Type};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

const PARAM_TAGS: &[&str] = &["param", "psalm-param", "phpstan-param"];
const RETURN_TAGS: &[&str] = &["return", "psalm-return", "phpstan-return"];
const TYPE_ALIAS_TAGS: &[&str] = &["psalm-type", "phpstan-type"];
const IMPORT_TYPE_TAGS: &[&str] = &["psalm-import-type", "phpstan-import-type"];

/// Text of a `/** ... */` comment without the delimiters and the leading
/// `*` gutter of each line.
pub fn doc_comment_text(raw: &str) -> Option<String> {
    let body = raw.strip_prefix("/*")?.trim_start_matches('*');
    let body = body.strip_suffix("*/")?.trim_start();
    let lines: Vec<&str> = body
        .split('\n')
        .map(|line| {
            let line = line.trim_start();
            match line.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => line,
            }
        })
        .collect();
    Some(lines.join("\n"))
}

/// One `@tag ...` annotation. Continuation lines are folded into
/// `text_left`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocTag {
    pub tag_name: String,
    pub text_left: String,
}

/// Split cleaned doc text into tags.
pub fn raw_tags(doc_text: &str) -> Vec<RawDocTag> {
    static TAG_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\s*@([\w\-]+)\s*(.*)").expect("valid regex"));

    let mut tags = Vec::new();
    let mut current: Option<RawDocTag> = None;
    for line in doc_text.split('\n') {
        if let Some(caps) = TAG_RE.captures(line) {
            tags.extend(current.take());
            current = Some(RawDocTag {
                tag_name: caps[1].to_string(),
                text_left: caps[2].to_string(),
            });
        } else if let Some(tag) = current.as_mut() {
            tag.text_left.push('\n');
            tag.text_left.push_str(line);
        }
    }
    tags.extend(current);
    tags
}

/// Tags of a raw doc comment, or nothing when it is not one.
pub fn doc_comment_tags(raw: &str) -> Vec<RawDocTag> {
    doc_comment_text(raw)
        .map(|text| raw_tags(&text))
        .unwrap_or_default()
}

/// `$name` at the start of `text` (after `&` or `...`), without the `$`.
fn leading_variable_name(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let text = text.strip_prefix('&').unwrap_or(text);
    let text = text.strip_prefix("...").unwrap_or(text);
    let name = text.strip_prefix('$')?;
    let len = name
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(name.len());
    (len > 0).then(|| &name[..len])
}

/// Typed annotations of a function or method docblock.
///
/// Types may be unions; flatten them before use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FuncDocInfo {
    /// Parameter types keyed by name without `$`.
    pub params: IndexMap<String, Type>,
    pub return_type: Option<Type>,
}

impl FuncDocInfo {
    /// Read `@param` and `@return` (and their psalm/phpstan forms). Later
    /// tags override earlier ones.
    pub fn from_doc_comment(raw: &str) -> FuncDocInfo {
        let mut info = FuncDocInfo::default();
        for tag in doc_comment_tags(raw) {
            let name = tag.tag_name.as_str();
            let is_param = PARAM_TAGS.contains(&name);
            if !is_param && !RETURN_TAGS.contains(&name) {
                continue;
            }
            let Some(parsed) = parse_type_expr(&tag.text_left) else {
                continue;
            };
            if is_param {
                if let Some(param) = leading_variable_name(&parsed.text_left) {
                    info.params.insert(param.to_string(), parsed.ty);
                }
            } else {
                info.return_type = Some(parsed.ty);
            }
        }
        info
    }

    /// Flattened type of parameter `name` (with or without `$`).
    pub fn param(&self, name: &str) -> Vec<Type> {
        let name = name.strip_prefix('$').unwrap_or(name);
        self.params
            .get(name)
            .cloned()
            .map(flatten_types)
            .unwrap_or_default()
    }

    /// Flattened return type.
    pub fn returns(&self) -> Vec<Type> {
        self.return_type
            .clone()
            .map(flatten_types)
            .unwrap_or_default()
    }
}

/// `@psalm-type Name = Type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAlias {
    pub name: String,
    pub ty: Type,
}

/// `@psalm-import-type Name from Class [as Local]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportedTypeAlias {
    /// Name the alias is visible under in the importing docblock.
    pub local: String,
    /// Name of the alias in the exporting class' docblock.
    pub name: String,
    pub from_class: String,
}

fn leading_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    let len = text
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\\'))
        .unwrap_or(text.len());
    (len > 0).then(|| (&text[..len], &text[len..]))
}

/// Alias definitions in a raw doc comment, in declaration order.
pub fn type_aliases(raw: &str) -> Vec<TypeAlias> {
    doc_comment_tags(raw)
        .into_iter()
        .filter(|tag| TYPE_ALIAS_TAGS.contains(&tag.tag_name.as_str()))
        .filter_map(|tag| {
            let (name, rest) = leading_word(&tag.text_left)?;
            let rest = rest.trim_start();
            let rest = rest.strip_prefix('=').unwrap_or(rest);
            let parsed = parse_type_expr(rest)?;
            Some(TypeAlias {
                name: name.to_string(),
                ty: parsed.ty,
            })
        })
        .collect()
}

/// Alias imports in a raw doc comment.
pub fn imported_type_aliases(raw: &str) -> Vec<ImportedTypeAlias> {
    doc_comment_tags(raw)
        .into_iter()
        .filter(|tag| IMPORT_TYPE_TAGS.contains(&tag.tag_name.as_str()))
        .filter_map(|tag| {
            let (name, rest) = leading_word(&tag.text_left)?;
            let (from, rest) = leading_word(rest)?;
            if !from.eq_ignore_ascii_case("from") {
                return None;
            }
            let (from_class, rest) = leading_word(rest)?;
            let local = leading_word(rest)
                .filter(|(kw, _)| kw.eq_ignore_ascii_case("as"))
                .and_then(|(_, rest)| leading_word(rest))
                .map_or(name, |(local, _)| local);
            Some(ImportedTypeAlias {
                local: local.to_string(),
                name: name.to_string(),
                from_class: from_class.to_string(),
            })
        })
        .collect()
}

/// Replace every bare `Fqn` naming an alias by the alias' target,
/// recursively. Self-referencing aliases are left unexpanded at the point
/// of recursion.
pub fn substitute_aliases(ty: Type, lookup: &dyn Fn(&str) -> Option<Type>) -> Type {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::AliasExpansion);
    substitute(ty, lookup, &mut guard)
}

fn substitute(
    ty: Type,
    lookup: &dyn Fn(&str) -> Option<Type>,
    guard: &mut RecursionGuard<String>,
) -> Type {
    match ty {
        Type::Fqn { fqn, generics } if generics.is_empty() => {
            let Some(target) = lookup(&fqn) else {
                return Type::Fqn { fqn, generics };
            };
            match guard.enter(fqn.clone()) {
                RecursionResult::Entered => {
                    let expanded = substitute(target, lookup, guard);
                    guard.leave(&fqn);
                    expanded
                }
                denied => {
                    trace!(alias = %fqn, ?denied, "alias expansion stopped");
                    Type::Fqn { fqn, generics }
                }
            }
        }
        Type::Fqn { fqn, generics } => Type::Fqn {
            fqn,
            generics: substitute_all(generics, lookup, guard),
        },
        Type::RecordArr { entries, unparsed } => Type::RecordArr {
            entries: entries
                .into_iter()
                .map(|e| {
                    RecordEntry::new(
                        substitute(e.key_type, lookup, guard),
                        substitute(e.value_type, lookup, guard),
                    )
                })
                .collect(),
            unparsed,
        },
        Type::TupleArr { elements } => Type::TupleArr {
            elements: substitute_all(elements, lookup, guard),
        },
        Type::ListArr { value_type } => Type::list(substitute(*value_type, lookup, guard)),
        Type::MapArr {
            key_type,
            value_type,
        } => Type::map(
            substitute(*key_type, lookup, guard),
            substitute(*value_type, lookup, guard),
        ),
        Type::Mt { types } => Type::Mt {
            types: substitute_all(types, lookup, guard),
        },
        leaf @ (Type::Any | Type::Str { .. } | Type::Int { .. }) => leaf,
    }
}

fn substitute_all(
    types: Vec<Type>,
    lookup: &dyn Fn(&str) -> Option<Type>,
    guard: &mut RecursionGuard<String>,
) -> Vec<Type> {
    types
        .into_iter()
        .map(|t| substitute(t, lookup, guard))
        .collect()
}
