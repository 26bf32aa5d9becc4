//! Reference kinds, statuses and descriptors

use std::fmt;

use clap::ValueEnum;

/// How a reference target locates its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum RefKind {
    /// A fragment within the same document (`#/definitions/Pet`)
    Local,
    /// Another document addressed by relative path (`../schemas/pet.yaml#/Pet`)
    Relative,
    /// A document addressed by absolute URL (`https://example.com/pet.yaml`)
    Remote,
    /// `$ref` whose value is not a usable string
    #[value(skip)]
    Invalid,
}

impl RefKind {
    /// Classify a raw `$ref` value
    pub fn classify(target: &str) -> Self {
        if target.starts_with('#') {
            return RefKind::Local;
        }

        match url::Url::parse(target) {
            // Single letter schemes are Windows drive letters (`C:\specs\pet.yaml`)
            Ok(url) if url.scheme().len() > 1 => RefKind::Remote,
            _ => RefKind::Relative,
        }
    }

    /// Kinds that fail the bundle when they cannot be resolved
    pub fn is_required(self) -> bool {
        matches!(self, RefKind::Local | RefKind::Relative | RefKind::Remote)
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RefKind::Local => "local",
            RefKind::Relative => "relative",
            RefKind::Remote => "remote",
            RefKind::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

/// Outcome of one reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefStatus {
    /// Replaced by its target's content
    Resolved,
    /// Target could not be loaded or located
    Missing,
    /// Target is an ancestor of the reference
    Circular,
    /// Left as written (filtered out or invalid)
    Skipped,
}

/// Record of one `$ref` encountered during a resolution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDescriptor {
    /// Location of the reference in the bundled output, as a `#/...` fragment
    pub location: String,
    /// Raw `$ref` value, if it was a string
    pub target: Option<String>,
    pub kind: RefKind,
    pub status: RefStatus,
    /// Why the reference is missing or skipped
    pub error: Option<String>,
}

impl ReferenceDescriptor {
    pub fn is_missing(&self) -> bool {
        self.status == RefStatus::Missing
    }
}
