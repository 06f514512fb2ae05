//! Object kinds (`isa` tags) and the families they belong to.

use std::fmt;
use std::str::FromStr;

/// The object kinds this crate models.
///
/// Anything else found in a document is carried as [`ObjectKind::Unknown`].
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Isa {
    PBXProject,
    PBXGroup,
    PBXVariantGroup,
    XCVersionGroup,
    PBXFileReference,
    PBXReferenceProxy,
    PBXNativeTarget,
    PBXAggregateTarget,
    PBXLegacyTarget,
    PBXBuildFile,
    PBXHeadersBuildPhase,
    PBXSourcesBuildPhase,
    PBXFrameworksBuildPhase,
    PBXResourcesBuildPhase,
    PBXCopyFilesBuildPhase,
    PBXShellScriptBuildPhase,
    PBXBuildRule,
    PBXTargetDependency,
    PBXContainerItemProxy,
    XCConfigurationList,
    XCBuildConfiguration,
    PBXFileSystemSynchronizedRootGroup,
    PBXFileSystemSynchronizedBuildFileExceptionSet,
    PBXFileSystemSynchronizedGroupBuildPhaseMembershipExceptionSet,
    XCSwiftPackageProductDependency,
    XCRemoteSwiftPackageReference,
    XCLocalSwiftPackageReference,
}

/// Group kinds. Everything a group can do, these can do.
pub const GROUPS: &[Isa] = &[Isa::PBXGroup, Isa::PBXVariantGroup, Isa::XCVersionGroup];

/// Target kinds.
pub const TARGETS: &[Isa] = &[
    Isa::PBXNativeTarget,
    Isa::PBXAggregateTarget,
    Isa::PBXLegacyTarget,
];

/// Build phase kinds.
pub const BUILD_PHASES: &[Isa] = &[
    Isa::PBXHeadersBuildPhase,
    Isa::PBXSourcesBuildPhase,
    Isa::PBXFrameworksBuildPhase,
    Isa::PBXResourcesBuildPhase,
    Isa::PBXCopyFilesBuildPhase,
    Isa::PBXShellScriptBuildPhase,
];

/// Kinds that can appear as children of a group or be referenced by a build
/// file.
pub const FILE_LIKE: &[Isa] = &[
    Isa::PBXFileReference,
    Isa::PBXGroup,
    Isa::PBXVariantGroup,
    Isa::XCVersionGroup,
    Isa::PBXReferenceProxy,
];

/// Kinds a group lists as children: the file-like kinds plus folders Xcode
/// keeps in sync with the file system.
pub const GROUP_CHILDREN: &[Isa] = &[
    Isa::PBXFileReference,
    Isa::PBXGroup,
    Isa::PBXVariantGroup,
    Isa::XCVersionGroup,
    Isa::PBXReferenceProxy,
    Isa::PBXFileSystemSynchronizedRootGroup,
];

/// Swift package reference kinds.
pub const PACKAGE_REFERENCES: &[Isa] = &[
    Isa::XCRemoteSwiftPackageReference,
    Isa::XCLocalSwiftPackageReference,
];

/// Exception sets of a synchronized folder.
pub const SYNCHRONIZED_EXCEPTION_SETS: &[Isa] = &[
    Isa::PBXFileSystemSynchronizedBuildFileExceptionSet,
    Isa::PBXFileSystemSynchronizedGroupBuildPhaseMembershipExceptionSet,
];

impl Isa {
    /// Every known kind.
    pub const ALL: &'static [Isa] = &[
        Isa::PBXProject,
        Isa::PBXGroup,
        Isa::PBXVariantGroup,
        Isa::XCVersionGroup,
        Isa::PBXFileReference,
        Isa::PBXReferenceProxy,
        Isa::PBXNativeTarget,
        Isa::PBXAggregateTarget,
        Isa::PBXLegacyTarget,
        Isa::PBXBuildFile,
        Isa::PBXHeadersBuildPhase,
        Isa::PBXSourcesBuildPhase,
        Isa::PBXFrameworksBuildPhase,
        Isa::PBXResourcesBuildPhase,
        Isa::PBXCopyFilesBuildPhase,
        Isa::PBXShellScriptBuildPhase,
        Isa::PBXBuildRule,
        Isa::PBXTargetDependency,
        Isa::PBXContainerItemProxy,
        Isa::XCConfigurationList,
        Isa::XCBuildConfiguration,
        Isa::PBXFileSystemSynchronizedRootGroup,
        Isa::PBXFileSystemSynchronizedBuildFileExceptionSet,
        Isa::PBXFileSystemSynchronizedGroupBuildPhaseMembershipExceptionSet,
        Isa::XCSwiftPackageProductDependency,
        Isa::XCRemoteSwiftPackageReference,
        Isa::XCLocalSwiftPackageReference,
    ];

    /// The tag written in the document.
    pub fn as_str(self) -> &'static str {
        match self {
            Isa::PBXProject => "PBXProject",
            Isa::PBXGroup => "PBXGroup",
            Isa::PBXVariantGroup => "PBXVariantGroup",
            Isa::XCVersionGroup => "XCVersionGroup",
            Isa::PBXFileReference => "PBXFileReference",
            Isa::PBXReferenceProxy => "PBXReferenceProxy",
            Isa::PBXNativeTarget => "PBXNativeTarget",
            Isa::PBXAggregateTarget => "PBXAggregateTarget",
            Isa::PBXLegacyTarget => "PBXLegacyTarget",
            Isa::PBXBuildFile => "PBXBuildFile",
            Isa::PBXHeadersBuildPhase => "PBXHeadersBuildPhase",
            Isa::PBXSourcesBuildPhase => "PBXSourcesBuildPhase",
            Isa::PBXFrameworksBuildPhase => "PBXFrameworksBuildPhase",
            Isa::PBXResourcesBuildPhase => "PBXResourcesBuildPhase",
            Isa::PBXCopyFilesBuildPhase => "PBXCopyFilesBuildPhase",
            Isa::PBXShellScriptBuildPhase => "PBXShellScriptBuildPhase",
            Isa::PBXBuildRule => "PBXBuildRule",
            Isa::PBXTargetDependency => "PBXTargetDependency",
            Isa::PBXContainerItemProxy => "PBXContainerItemProxy",
            Isa::XCConfigurationList => "XCConfigurationList",
            Isa::XCBuildConfiguration => "XCBuildConfiguration",
            Isa::PBXFileSystemSynchronizedRootGroup => "PBXFileSystemSynchronizedRootGroup",
            Isa::PBXFileSystemSynchronizedBuildFileExceptionSet => {
                "PBXFileSystemSynchronizedBuildFileExceptionSet"
            }
            Isa::PBXFileSystemSynchronizedGroupBuildPhaseMembershipExceptionSet => {
                "PBXFileSystemSynchronizedGroupBuildPhaseMembershipExceptionSet"
            }
            Isa::XCSwiftPackageProductDependency => "XCSwiftPackageProductDependency",
            Isa::XCRemoteSwiftPackageReference => "XCRemoteSwiftPackageReference",
            Isa::XCLocalSwiftPackageReference => "XCLocalSwiftPackageReference",
        }
    }

    /// Looks up a kind by its document tag.
    pub fn from_tag(tag: &str) -> Option<Isa> {
        Isa::ALL.iter().copied().find(|isa| isa.as_str() == tag)
    }

    /// Returns true for `PBXGroup` and its subkinds.
    pub fn is_group(self) -> bool {
        GROUPS.contains(&self)
    }

    /// Returns true for the target kinds.
    pub fn is_target(self) -> bool {
        TARGETS.contains(&self)
    }

    /// Returns true for the build phase kinds.
    pub fn is_build_phase(self) -> bool {
        BUILD_PHASES.contains(&self)
    }

    /// Build phases a target may hold at most once.
    pub fn is_unique_build_phase(self) -> bool {
        matches!(
            self,
            Isa::PBXHeadersBuildPhase
                | Isa::PBXSourcesBuildPhase
                | Isa::PBXFrameworksBuildPhase
                | Isa::PBXResourcesBuildPhase
        )
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Isa {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Isa::from_tag(s).ok_or_else(|| format!("unknown isa `{s}`"))
    }
}

/// The kind of an object as found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A kind with a schema entry.
    Known(Isa),
    /// A tag this crate does not model; the object is carried opaquely.
    Unknown(String),
}

impl ObjectKind {
    /// Classifies a document tag.
    pub fn from_tag(tag: &str) -> Self {
        match Isa::from_tag(tag) {
            Some(isa) => ObjectKind::Known(isa),
            None => ObjectKind::Unknown(tag.to_string()),
        }
    }

    /// The tag written in the document.
    pub fn tag(&self) -> &str {
        match self {
            ObjectKind::Known(isa) => isa.as_str(),
            ObjectKind::Unknown(tag) => tag,
        }
    }

    /// The modelled kind, if any.
    pub fn isa(&self) -> Option<Isa> {
        match self {
            ObjectKind::Known(isa) => Some(*isa),
            ObjectKind::Unknown(_) => None,
        }
    }

    /// Returns true if this kind has no schema entry.
    pub fn is_unknown(&self) -> bool {
        matches!(self, ObjectKind::Unknown(_))
    }
}

impl From<Isa> for ObjectKind {
    fn from(isa: Isa) -> Self {
        ObjectKind::Known(isa)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The set of kinds a relationship accepts as its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindMatch {
    /// Any object, including unknown kinds.
    Any,
    /// Exactly one kind.
    Exactly(Isa),
    /// Any kind of a family.
    OneOf(&'static [Isa]),
    /// Any kind of a family, or a kind this crate does not model. Lists that
    /// newer Xcode versions extend with kinds of their own use this.
    OneOfOrUnknown(&'static [Isa]),
}

impl KindMatch {
    /// Returns true if `kind` is accepted.
    pub fn matches(&self, kind: &ObjectKind) -> bool {
        match (self, kind) {
            (KindMatch::Any, _) => true,
            (KindMatch::Exactly(expected), ObjectKind::Known(isa)) => expected == isa,
            (KindMatch::OneOf(family), ObjectKind::Known(isa))
            | (KindMatch::OneOfOrUnknown(family), ObjectKind::Known(isa)) => family.contains(isa),
            (KindMatch::OneOfOrUnknown(_), ObjectKind::Unknown(_)) => true,
            (_, ObjectKind::Unknown(_)) => false,
        }
    }

    /// The kinds enumerated by this match; empty for [`KindMatch::Any`].
    /// Unknown kinds are never enumerated.
    pub fn kinds(&self) -> &'static [Isa] {
        match self {
            KindMatch::Any => &[],
            KindMatch::Exactly(isa) => Isa::ALL
                .iter()
                .position(|candidate| candidate == isa)
                .map(|i| &Isa::ALL[i..=i])
                .unwrap_or(&[]),
            KindMatch::OneOf(family) | KindMatch::OneOfOrUnknown(family) => family,
        }
    }
}

impl fmt::Display for KindMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindMatch::Any => f.write_str("any object"),
            KindMatch::Exactly(isa) => write!(f, "{isa}"),
            KindMatch::OneOf(family) => {
                let names: Vec<&str> = family.iter().map(|isa| isa.as_str()).collect();
                write!(f, "one of [{}]", names.join(", "))
            }
            KindMatch::OneOfOrUnknown(family) => {
                let names: Vec<&str> = family.iter().map(|isa| isa.as_str()).collect();
                write!(f, "one of [{}] or an unmodelled kind", names.join(", "))
            }
        }
    }
}
