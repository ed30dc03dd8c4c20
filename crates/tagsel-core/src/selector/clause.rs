//! Selector clauses and parameter attachments

use std::fmt;

use serde::Serialize;

use crate::tags::STANDARD;

/// One structured filter of a selector
///
/// Every component is either a concrete value or `None`, meaning "any".
/// Clauses compare by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SelectorClause {
    pub tag: Option<String>,
    pub module: Option<String>,
    pub class_name: Option<String>,
    pub method_name: Option<String>,
    /// Source file suffix, without the leading `/`
    pub file_path: Option<String>,
}

impl SelectorClause {
    /// A clause that matches every tagged test
    pub fn any() -> Self {
        Self::default()
    }

    /// The implicit `(standard, *, *, *, *)` clause
    pub fn standard() -> Self {
        Self::any().with_tag(STANDARD)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_method(mut self, method_name: impl Into<String>) -> Self {
        self.method_name = Some(method_name.into());
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }
}

/// Renders the clause as a spec body, without sign or parameters
impl fmt::Display for SelectorClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag.as_deref().unwrap_or("*"))?;
        if let Some(path) = &self.file_path {
            write!(f, "/{}", path)?;
        } else if let Some(module) = &self.module {
            write!(f, "/{}", module)?;
        }
        if let Some(class_name) = &self.class_name {
            write!(f, ":{}", class_name)?;
        }
        if let Some(method_name) = &self.method_name {
            write!(f, ".{}", method_name)?;
        }
        Ok(())
    }
}

/// Whether a parameter payload is recorded or suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParamSign {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl fmt::Display for ParamSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamSign::Plus => write!(f, "+"),
            ParamSign::Minus => write!(f, "-"),
        }
    }
}

/// A payload recorded on (or suppressed from) every test matched by `clause`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterAttachment {
    pub clause: SelectorClause,
    pub sign: ParamSign,
    pub payload: String,
}

impl fmt::Display for ParameterAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign == ParamSign::Minus {
            write!(f, "-")?;
        }
        write!(f, "{}[{}]", self.clause, self.payload)
    }
}
