use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// An opaque optimistic-concurrency token of a resource.
///
/// The revision is advanced by every accepted create, replace, or delete. Its textual form is
/// used as the entity tag of the resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Revision(u64);

impl Revision {
    /// The revision of a freshly created resource.
    pub const INITIAL: Revision = Revision(1);

    /// Returns the revision that follows this one.
    #[must_use]
    pub fn increment(self) -> Revision {
        Revision(self.0 + 1)
    }
}

impl Display for Revision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Parses a revision from its textual form. Surrounding quotes and a weak-tag prefix, as found in
/// entity tags, are accepted.
impl FromStr for Revision {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("W/").unwrap_or(s);
        let s = s.trim_matches('"');
        u64::from_str_radix(s, 16).map(Revision)
    }
}
