//! Argument signatures shared by dialect declarations and setup test cases.

use std::fmt;

/// Rendered in place of an argument slot the classifier could not type.
const UNCLASSIFIED_SLOT: &str = "?";

/// The ordered argument types of one declaration or one test case.
///
/// `Unknown` means the source carried no argument information at all and is
/// deliberately distinct from `Known(vec![])`, a call with zero arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Signature {
    Unknown,
    Known(Vec<Option<String>>),
}

impl Signature {
    /// Builds a signature where every slot carries a tag.
    pub fn of<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Signature::Known(tags.into_iter().map(|t| Some(t.into())).collect())
    }

    /// Builds a signature of `arity` copies of the same tag.
    pub fn repeated(tag: &str, arity: usize) -> Self {
        Signature::Known(vec![Some(tag.to_string()); arity])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Signature::Known(slots) = self else {
            return Ok(());
        };
        write!(f, "(")?;
        for (i, slot) in slots.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", slot.as_deref().unwrap_or(UNCLASSIFIED_SLOT))?;
        }
        write!(f, ")")
    }
}
