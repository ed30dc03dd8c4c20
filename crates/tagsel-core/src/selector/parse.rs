//! Selector expression parsing
//!
//! An expression is a comma separated list of filter specs:
//!
//! ```text
//! [sign] [tag] [ "/" path | "/" module ] [ ":" class ] [ "." method ] [ "[" params "]" ]
//! ```
//!
//! Commas inside square brackets belong to the parameter payload. Parsing is
//! total: a spec that does not match the grammar is logged and skipped.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::clause::{ParamSign, ParameterAttachment, SelectorClause};
use super::Selector;
use crate::tags::STANDARD;

const FILTER_SPEC_PATTERN: &str = r"^([+-]?)(\*|\w*)(?:/((?:[\w.-]+/)*[\w.-]+\.py|\w+))?(?::(\w+))?(?:\.(\w+))?(?:\[(.*)\])?$";

static FILTER_SPEC_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn filter_spec_re() -> Option<&'static Regex> {
    FILTER_SPEC_RE
        .get_or_init(|| match Regex::new(FILTER_SPEC_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(error = %e, "Failed to compile filter spec pattern");
                None
            }
        })
        .as_ref()
}

/// Why a spec was left out of the selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum RejectReason {
    /// The spec does not match the filter spec grammar
    Malformed,
    /// A positive spec names a module outside the available modules
    UnknownModule(String),
}

/// A spec that was skipped while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedSpec {
    pub spec: String,
    #[serde(flatten)]
    pub reason: RejectReason,
}

/// A parsed selector together with the specs that were skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub selector: Selector,
    pub rejected: Vec<RejectedSpec>,
}

/// Split on commas that are not inside square brackets
///
/// Payloads do not nest: the first `]` closes the bracket.
pub(crate) fn split_specs(expression: &str) -> Vec<&str> {
    let mut specs = Vec::new();
    let mut in_brackets = false;
    let mut start = 0;

    for (i, c) in expression.char_indices() {
        match c {
            '[' => in_brackets = true,
            ']' => in_brackets = false,
            ',' if !in_brackets => {
                specs.push(&expression[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    specs.push(&expression[start..]);
    specs
}

/// One spec after grammar matching, before set insertion
struct ParsedSpec {
    include: bool,
    clause: SelectorClause,
    payload: Option<String>,
}

fn parse_spec(spec: &str) -> Option<ParsedSpec> {
    let caps = filter_spec_re()?.captures(spec)?;
    let group = |i: usize| {
        caps.get(i)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
    };

    let include = group(1) != Some("-");
    let tag = match group(2) {
        Some("*") => None,
        Some(tag) => Some(tag.to_string()),
        None if include => Some(STANDARD.to_string()),
        None => None,
    };

    let (module, file_path) = match group(3) {
        Some(segment) if segment.ends_with(".py") => (None, Some(segment.to_string())),
        Some(segment) => (Some(segment.to_string()), None),
        None => (None, None),
    };

    Some(ParsedSpec {
        include,
        clause: SelectorClause {
            tag,
            module,
            class_name: group(4).map(str::to_string),
            method_name: group(5).map(str::to_string),
            file_path,
        },
        payload: group(6).map(str::to_string),
    })
}

impl Selector {
    /// Parse an expression without module validation
    pub fn parse(expression: &str) -> Selector {
        Self::parse_report(expression, None).selector
    }

    /// Parse an expression, validating and fanning out over `available_modules`
    pub fn parse_with_modules<I, S>(expression: &str, available_modules: I) -> Selector
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let modules = available_modules.into_iter().map(Into::into).collect();
        Self::parse_report(expression, Some(modules)).selector
    }

    /// Parse an expression and report which specs were skipped
    pub fn parse_report(
        expression: &str,
        available_modules: Option<BTreeSet<String>>,
    ) -> ParseReport {
        let mut include = BTreeSet::new();
        let mut exclude = BTreeSet::new();
        let mut parameters: Vec<ParameterAttachment> = Vec::new();
        let mut rejected = Vec::new();

        for spec in split_specs(expression) {
            let spec = spec.trim();
            if spec.is_empty() {
                continue;
            }

            let Some(parsed) = parse_spec(spec) else {
                tracing::error!(spec, "Invalid test tag spec");
                rejected.push(RejectedSpec {
                    spec: spec.to_string(),
                    reason: RejectReason::Malformed,
                });
                continue;
            };

            if parsed.include {
                if let (Some(modules), Some(module)) = (&available_modules, &parsed.clause.module) {
                    if !modules.contains(module) {
                        tracing::info!(spec, module = %module, "Skipping spec for unknown module");
                        rejected.push(RejectedSpec {
                            spec: spec.to_string(),
                            reason: RejectReason::UnknownModule(module.clone()),
                        });
                        continue;
                    }
                }
            }

            let ParsedSpec {
                include: is_include,
                clause,
                payload,
            } = parsed;

            if let Some(payload) = payload {
                let attachment = ParameterAttachment {
                    clause: clause.clone(),
                    sign: if is_include {
                        ParamSign::Plus
                    } else {
                        ParamSign::Minus
                    },
                    payload,
                };
                if !parameters.contains(&attachment) {
                    parameters.push(attachment);
                }
                if is_include {
                    include.insert(clause);
                }
            } else if is_include {
                include.insert(clause);
            } else {
                exclude.insert(clause);
            }
        }

        let has_explicit_include = !include.is_empty();
        if !has_explicit_include && (!exclude.is_empty() || !parameters.is_empty()) {
            include.insert(SelectorClause::standard());
        }

        ParseReport {
            selector: Selector {
                include,
                exclude,
                parameters,
                has_explicit_include,
                available_modules,
            },
            rejected,
        }
    }
}
