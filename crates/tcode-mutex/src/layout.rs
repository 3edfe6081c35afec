//! Merged column schema
//!
//! Provides [`MergedLayout`], the output argument list of a merge together with
//! the source slot each output argument is copied from.

use crate::boundary::Slice;
use crate::error::MergeError;
use indexmap::IndexSet;
use tcode_model::name::collapse_separator;
use tcode_model::{ArgName, Column, Interval};

/// Which input column an output argument comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// First input column
    A,

    /// Second input column
    B,
}

/// Origin of one output argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The source interval's ordinal
    Ordinal(Source),

    /// The source interval's value at a schema position
    Arg(Source, usize),
}

impl Slot {
    /// Source column of this slot
    #[inline]
    #[must_use]
    pub fn source(self) -> Source {
        match self {
            Self::Ordinal(source) | Self::Arg(source, _) => source,
        }
    }
}

/// Output schema of a merge, resolved to source positions
///
/// Layout is `ordinal` then every argument of A, then `ordinal` then every argument
/// of B, each carrying its column's prefix with the separator already collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLayout {
    names: Vec<ArgName>,
    slots: Vec<Slot>,
}

impl MergedLayout {
    /// Resolve the output schema for `a` and `b`
    ///
    /// # Errors
    /// Returns [`MergeError::PrefixCollision`] if two output names coincide
    pub fn build(a: &Column, b: &Column, prefix_a: &str, prefix_b: &str) -> Result<Self, MergeError> {
        let mut names = IndexSet::with_capacity(a.arg_count() + b.arg_count() + 2);
        let mut slots = Vec::with_capacity(names.capacity());

        for (source, column, prefix) in [(Source::A, a, prefix_a), (Source::B, b, prefix_b)] {
            let ordinal = std::iter::once(("ordinal", Slot::Ordinal(source)));
            let args = column
                .arguments()
                .enumerate()
                .map(|(index, arg)| (arg.as_str(), Slot::Arg(source, index)));

            for (name, slot) in ordinal.chain(args) {
                let merged = ArgName::new(&collapse_separator(&format!("{prefix}{name}")))?;
                if !names.insert(merged.clone()) {
                    return Err(MergeError::PrefixCollision {
                        name: merged.into(),
                        prefix_a: prefix_a.to_string(),
                        prefix_b: prefix_b.to_string(),
                    });
                }
                slots.push(slot);
            }
        }

        Ok(Self {
            names: names.into_iter().collect(),
            slots,
        })
    }

    /// Output argument names in order
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[ArgName] {
        &self.names
    }

    /// Source of each output argument, aligned with [`names`](Self::names)
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of output arguments
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Build the output interval for `slice`
    ///
    /// Slots of an absent source stay blank.
    #[must_use]
    pub fn fill(&self, a: Option<&Interval>, b: Option<&Interval>, slice: Slice) -> Interval {
        let values = self
            .slots
            .iter()
            .map(|slot| {
                let active = match slot.source() {
                    Source::A => a,
                    Source::B => b,
                };
                match (active, *slot) {
                    (Some(interval), Slot::Ordinal(_)) => interval.ordinal().to_string(),
                    (Some(interval), Slot::Arg(_, index)) => {
                        interval.value(index).unwrap_or_default().to_string()
                    }
                    (None, _) => String::new(),
                }
            })
            .collect();
        Interval::new(slice.start, slice.end, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tcode_model::column_prefix;

    fn names(layout: &MergedLayout) -> Vec<&str> {
        layout.names().iter().map(ArgName::as_str).collect()
    }

    #[test]
    fn default_prefixes_collapse_to_single_underscore() {
        let a = Column::with_arguments("Looking Left", ["target"]).unwrap();
        let b = Column::with_arguments("trial", ["num", "unit"]).unwrap();
        let layout = MergedLayout::build(
            &a,
            &b,
            &column_prefix(a.name()),
            &column_prefix(b.name()),
        )
        .unwrap();

        assert_eq!(
            names(&layout),
            vec![
                "lookingleft_ordinal",
                "lookingleft_target",
                "trial_ordinal",
                "trial_num",
                "trial_unit",
            ]
        );
        assert_eq!(
            layout.slots(),
            &[
                Slot::Ordinal(Source::A),
                Slot::Arg(Source::A, 0),
                Slot::Ordinal(Source::B),
                Slot::Arg(Source::B, 0),
                Slot::Arg(Source::B, 1),
            ]
        );
    }

    #[test]
    fn custom_prefix_is_used_verbatim_then_normalized() {
        let a = Column::with_arguments("a", ["x"]).unwrap();
        let b = Column::with_arguments("b", ["x"]).unwrap();
        let layout = MergedLayout::build(&a, &b, "Left_", "right___").unwrap();
        assert_eq!(
            names(&layout),
            vec!["left_ordinal", "left_x", "right_ordinal", "right_x"]
        );
    }

    #[test]
    fn equal_prefixes_collide() {
        let a = Column::with_arguments("a", ["x"]).unwrap();
        let b = Column::with_arguments("b", ["y"]).unwrap();
        let err = MergedLayout::build(&a, &b, "same_", "same_").unwrap_err();
        assert!(matches!(
            err,
            MergeError::PrefixCollision { ref name, .. } if name == "same_ordinal"
        ));
    }

    #[test]
    fn fill_copies_active_source_only() {
        let a = Column::with_arguments("a", ["x"]).unwrap();
        let b = Column::with_arguments("b", ["y"]).unwrap();
        let layout = MergedLayout::build(&a, &b, "a___", "b___").unwrap();

        let source = Interval::new(0, 10, vec!["hit".into()]).with_ordinal(4);
        let out = layout.fill(Some(&source), None, Slice::new(2, 8));

        assert_eq!((out.onset(), out.offset()), (2, 8));
        assert_eq!(out.values(), &["4", "hit", "", ""]);
        assert_eq!(out.width(), layout.width());
    }
}
