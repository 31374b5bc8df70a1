use ldp_fusion_model::vocab::acl;
use ldp_fusion_model::NamedNodeRef;
use std::fmt::{Debug, Display, Formatter};

/// A mode of access that can be granted by an authorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessMode {
    Read,
    Write,
    Append,
    Control,
}

impl AccessMode {
    pub const ALL: [AccessMode; 4] = [
        AccessMode::Read,
        AccessMode::Write,
        AccessMode::Append,
        AccessMode::Control,
    ];

    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            AccessMode::Read => acl::READ,
            AccessMode::Write => acl::WRITE,
            AccessMode::Append => acl::APPEND,
            AccessMode::Control => acl::CONTROL,
        }
    }

    pub fn from_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.iri() == iri)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl Display for AccessMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.iri().as_str())
    }
}

/// A set of [AccessMode]s.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessModes(u8);

impl AccessModes {
    pub const NONE: AccessModes = AccessModes(0);
    pub const ALL: AccessModes = AccessModes(0b1111);

    pub fn contains(self, mode: AccessMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Returns whether the modes allow appending. Write access implies append access.
    pub fn allows_append(self) -> bool {
        self.contains(AccessMode::Append) || self.contains(AccessMode::Write)
    }

    pub fn insert(&mut self, mode: AccessMode) {
        self.0 |= mode.bit();
    }

    #[must_use]
    pub fn with(mut self, mode: AccessMode) -> Self {
        self.insert(mode);
        self
    }

    #[must_use]
    pub fn union(self, other: AccessModes) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub fn intersection(self, other: AccessModes) -> Self {
        Self(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = AccessMode> {
        AccessMode::ALL
            .into_iter()
            .filter(move |mode| self.contains(*mode))
    }
}

impl FromIterator<AccessMode> for AccessModes {
    fn from_iter<T: IntoIterator<Item = AccessMode>>(iter: T) -> Self {
        let mut modes = AccessModes::NONE;
        modes.extend(iter);
        modes
    }
}

impl Extend<AccessMode> for AccessModes {
    fn extend<T: IntoIterator<Item = AccessMode>>(&mut self, iter: T) {
        for mode in iter {
            self.insert(mode);
        }
    }
}

impl From<AccessMode> for AccessModes {
    fn from(mode: AccessMode) -> Self {
        AccessModes::NONE.with(mode)
    }
}

impl Debug for AccessModes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Display for AccessModes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names = self.iter().map(|mode| match mode {
            AccessMode::Read => "Read",
            AccessMode::Write => "Write",
            AccessMode::Append => "Append",
            AccessMode::Control => "Control",
        });
        write!(f, "[{}]", itertools::join(names, ", "))
    }
}
