//! Tagsel Core Library
//!
//! Tag attachment for test classes, selector expression parsing and
//! per-test selection.

pub mod attach;
pub mod config;
pub mod error;
pub mod format;
pub mod instance;
pub mod logging;
pub mod manifest;
pub mod selector;
pub mod tags;

pub use attach::{attach, inherit, ClassDescriptor, ClassRegistry, DecoratorArgs, TagToken};
pub use instance::TestInstance;
pub use selector::{Matcher, ParameterAttachment, ParseReport, Selector, SelectorClause};
pub use tags::TagSet;
