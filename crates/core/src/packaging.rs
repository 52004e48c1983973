//! Packaging taxonomy recognised by Lei nº 14.785/2023.

use std::fmt;

use crate::text::normalize;

/// Typed at the packaging-type prompt to end the session.
pub const EXIT_SENTINEL: &str = "sair";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PackagingType {
    Plastic,
    Metallic,
    Glass,
    Cardboard,
    FlexiblePlastic,
    Other,
}

impl PackagingType {
    pub const ALL: [PackagingType; 6] = [
        Self::Plastic,
        Self::Metallic,
        Self::Glass,
        Self::Cardboard,
        Self::FlexiblePlastic,
        Self::Other,
    ];

    /// Canonical, already-normalized spelling used by the allow-list.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => "plastica",
            Self::Metallic => "metalica",
            Self::Glass => "vidro",
            Self::Cardboard => "papelao",
            Self::FlexiblePlastic => "plastico flexivel",
            Self::Other => "outro",
        }
    }
}

impl fmt::Display for PackagingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reading the packaging-type prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeInput {
    Exit,
    Valid(PackagingType),
    Invalid,
}

/// The allow-list of packaging types. Built once and shared read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackagingTaxonomy {
    allowed: Vec<PackagingType>,
}

impl Default for PackagingTaxonomy {
    fn default() -> Self {
        Self { allowed: PackagingType::ALL.to_vec() }
    }
}

impl PackagingTaxonomy {
    pub fn new(allowed: Vec<PackagingType>) -> Self {
        Self { allowed }
    }

    pub fn resolve(&self, raw: &str) -> Option<PackagingType> {
        let normalized = normalize(raw.trim());
        self.allowed.iter().copied().find(|kind| kind.as_str() == normalized)
    }

    pub fn is_valid(&self, raw: &str) -> bool {
        self.resolve(raw).is_some()
    }

    /// Sentinel first, then validity.
    pub fn read(&self, raw: &str) -> TypeInput {
        if is_exit_sentinel(raw) {
            return TypeInput::Exit;
        }
        match self.resolve(raw) {
            Some(kind) => TypeInput::Valid(kind),
            None => TypeInput::Invalid,
        }
    }

    /// `"plastica, metalica, vidro, ..."` as embedded in the guidance prompt.
    pub fn joined(&self) -> String {
        self.allowed.iter().map(PackagingType::as_str).collect::<Vec<_>>().join(", ")
    }
}

pub fn is_exit_sentinel(raw: &str) -> bool {
    normalize(raw.trim()) == EXIT_SENTINEL
}
