//! Style engine: tokenizer, selector parser, specificity, stylesheets, cascade,
//! property binding.

pub mod tokenizer;
pub mod model;
pub mod selector;
pub mod specificity;
pub mod parser;
pub mod stylesheet;
pub mod cascade;
pub mod properties;

pub use cascade::Cascade;
pub use model::{Declaration, Style, Value};
pub use parser::{parse, ParseError, ParsedSelectors, SkippedRule};
pub use properties::PropertyError;
pub use selector::{Combinator, Selector, SelectorSequence, SimpleSelector, SimpleSelectorKind};
pub use specificity::Specificity;
pub use stylesheet::{StyleRule, Stylesheet};
