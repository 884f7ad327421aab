//! Selector specificity calculation and comparison.
//!
//! Specificity determines which rule wins when multiple rules match the same
//! view. The model is a triple:
//!
//! ```text
//! (ids, classes, types)
//! ```
//!
//! Fields are ordered so that `Ord` (lexicographic) gives the cascade order:
//! - More ids beat fewer ids
//! - More classes, attributes and pseudo-states beat fewer
//! - More type selectors beat fewer
//!
//! Equal specificities compare equal; the cascade breaks ties by declaration
//! order. The universal selector counts for nothing.

use std::fmt;

use crate::css::selector::{SelectorSequence, SimpleSelectorKind};

/// Selector specificity, ordered from highest to lowest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity {
    /// Number of id selectors (`#id`).
    pub ids: u32,
    /// Number of class, attribute and pseudo selectors (`.class`, `[a]`, `:selected`).
    pub classes: u32,
    /// Number of type selectors (`Button`, `Panel`).
    pub types: u32,
}

impl Specificity {
    pub const fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self { ids, classes, types }
    }

    /// Count the simple selectors of every sequence.
    pub fn of(sequences: &[SelectorSequence]) -> Self {
        let mut specificity = Specificity::default();
        for simple in sequences.iter().flat_map(|seq| &seq.simple_selectors) {
            match simple.kind {
                SimpleSelectorKind::Id => specificity.ids += 1,
                SimpleSelectorKind::Class
                | SimpleSelectorKind::Attribute
                | SimpleSelectorKind::Pseudo => specificity.classes += 1,
                SimpleSelectorKind::Type => specificity.types += 1,
                SimpleSelectorKind::Universal => {}
            }
        }
        specificity
    }

    /// Weighted integer form: `1000·ids + 100·classes + 10·types`, saturating.
    ///
    /// Agrees with the `Ord` impl as long as no count reaches ten.
    pub fn value(self) -> u32 {
        self.ids
            .saturating_mul(1000)
            .saturating_add(self.classes.saturating_mul(100))
            .saturating_add(self.types.saturating_mul(10))
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.ids, self.classes, self.types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::selector::Selector;

    fn specificity_of(rule: &str) -> Specificity {
        Selector::parse(rule).unwrap().specificity()
    }

    #[test]
    fn type_only() {
        assert_eq!(specificity_of("Button"), Specificity::new(0, 0, 1));
        assert_eq!(specificity_of("Button").value(), 10);
    }

    #[test]
    fn class_attribute_and_pseudo_count_together() {
        assert_eq!(specificity_of(".a[b]:selected"), Specificity::new(0, 3, 0));
    }

    #[test]
    fn universal_counts_for_nothing() {
        assert_eq!(specificity_of("*"), Specificity::default());
        assert_eq!(specificity_of("* > .a"), Specificity::new(0, 1, 0));
    }

    #[test]
    fn counts_across_sequences() {
        assert_eq!(specificity_of("Panel#main .foo Control:highlighted"), Specificity::new(1, 2, 2));
        assert_eq!(specificity_of("Panel#main .foo Control:highlighted").value(), 1220);
    }

    #[test]
    fn id_beats_any_number_of_classes() {
        assert!(specificity_of("#a") > specificity_of(".a.b.c.d.e.f.g.h.i.j.k.l"));
        assert!(specificity_of("Panel#main") > specificity_of("Panel .foo"));
    }

    #[test]
    fn class_beats_types() {
        assert!(specificity_of(".a") > specificity_of("A B C D"));
        assert_eq!(specificity_of(".a").value(), 100);
    }

    #[test]
    fn equal_rules_compare_equal() {
        assert_eq!(specificity_of("A .b").cmp(&specificity_of("C .d")), std::cmp::Ordering::Equal);
    }

    #[test]
    fn value_saturates() {
        let huge = Specificity::new(u32::MAX, 1, 1);
        assert_eq!(huge.value(), u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(Specificity::new(1, 2, 3).to_string(), "(1,2,3)");
    }
}
