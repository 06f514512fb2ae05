//! Static relationship schema.
//!
//! Every relationship of every modelled kind is declared once as a
//! [`RelationshipDescriptor`] in a table built at first use. The
//! [`Registry`] indexes those tables by kind and is the single source of truth
//! for how a relationship is stored, read, written and mirrored:
//!
//! - **Direct** relationships name the attribute on the owner that stores the
//!   identifier(s) of the related object(s).
//! - **Inverse** relationships store nothing. Their value is found by scanning
//!   objects of the target kind whose direct relationship (named by the
//!   inverse's `of` field) mentions the owner.
//!
//! ```
//! use pbxgraph::object::Isa;
//! use pbxgraph::schema::{registry, Cardinality};
//!
//! let children = registry().relationship(Isa::PBXGroup, "children").unwrap();
//! assert_eq!(children.cardinality, Cardinality::Many);
//! assert_eq!(children.storage_attribute(), Some("children"));
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use crate::object::{Isa, KindMatch, ObjectKind};
use crate::relation::RelationError;

mod builtin;
mod defaults;
mod errors;

pub use defaults::defaults;
pub use errors::SchemaError;

/// How many objects a relationship relates the owner to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// At most one related object.
    One,
    /// An ordered list of related objects.
    Many,
}

/// Where the identifiers of a relationship live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The owner stores the identifier(s) under `attribute`.
    Direct {
        /// Attribute name as written in the document
        attribute: &'static str,
    },
    /// The owner is found through the direct relationship `of` declared on
    /// the target kind.
    Inverse {
        /// Name of the direct relationship on the target kind
        of: &'static str,
    },
}

/// Declaration of one named relationship of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipDescriptor {
    /// Kinds that declare the relationship
    pub owner: KindMatch,
    /// Relationship name, e.g. `build_phases`
    pub name: &'static str,
    /// One or many
    pub cardinality: Cardinality,
    /// Kinds accepted as the related object
    pub target: KindMatch,
    /// Storage of the relationship
    pub direction: Direction,
}

impl RelationshipDescriptor {
    /// Direct to-one relationship stored under `attribute`.
    pub const fn has_one(
        owner: KindMatch,
        name: &'static str,
        attribute: &'static str,
        target: KindMatch,
    ) -> Self {
        Self {
            owner,
            name,
            cardinality: Cardinality::One,
            target,
            direction: Direction::Direct { attribute },
        }
    }

    /// Direct to-many relationship stored under `attribute`.
    pub const fn has_many(
        owner: KindMatch,
        name: &'static str,
        attribute: &'static str,
        target: KindMatch,
    ) -> Self {
        Self {
            owner,
            name,
            cardinality: Cardinality::Many,
            target,
            direction: Direction::Direct { attribute },
        }
    }

    /// Inverse to-one relationship mirroring `of` on the target kind.
    pub const fn inverse_one(
        owner: KindMatch,
        name: &'static str,
        target: KindMatch,
        of: &'static str,
    ) -> Self {
        Self {
            owner,
            name,
            cardinality: Cardinality::One,
            target,
            direction: Direction::Inverse { of },
        }
    }

    /// Inverse to-many relationship mirroring `of` on the target kind.
    pub const fn inverse_many(
        owner: KindMatch,
        name: &'static str,
        target: KindMatch,
        of: &'static str,
    ) -> Self {
        Self {
            owner,
            name,
            cardinality: Cardinality::Many,
            target,
            direction: Direction::Inverse { of },
        }
    }

    /// The attribute storing the identifiers, `None` for inverse relationships.
    pub fn storage_attribute(&self) -> Option<&'static str> {
        match self.direction {
            Direction::Direct { attribute } => Some(attribute),
            Direction::Inverse { .. } => None,
        }
    }

    /// The mirrored direct relationship, `None` for direct relationships.
    pub fn inverse_of(&self) -> Option<&'static str> {
        match self.direction {
            Direction::Direct { .. } => None,
            Direction::Inverse { of } => Some(of),
        }
    }

    /// Returns true for inverse relationships.
    pub fn is_inverse(&self) -> bool {
        matches!(self.direction, Direction::Inverse { .. })
    }

    /// Returns true for to-many relationships.
    pub fn is_many(&self) -> bool {
        self.cardinality == Cardinality::Many
    }
}

impl fmt::Display for RelationshipDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Per-kind index over the relationship tables.
#[derive(Debug)]
pub struct Registry {
    by_kind: HashMap<Isa, Vec<&'static RelationshipDescriptor>>,
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry::new(builtin::DESCRIPTORS));

/// The process-wide registry of built-in relationships.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

impl Registry {
    /// Indexes `descriptors` by every kind their owner matches.
    pub fn new(descriptors: &'static [RelationshipDescriptor]) -> Self {
        let mut by_kind: HashMap<Isa, Vec<&'static RelationshipDescriptor>> = HashMap::new();
        for descriptor in descriptors {
            for isa in Isa::ALL {
                if descriptor.owner.matches(&ObjectKind::Known(*isa)) {
                    by_kind.entry(*isa).or_default().push(descriptor);
                }
            }
        }
        Self { by_kind }
    }

    /// Every relationship of `isa`, in declaration order.
    pub fn relationships(&self, isa: Isa) -> &[&'static RelationshipDescriptor] {
        self.by_kind.get(&isa).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Looks up a relationship by name.
    pub fn relationship(&self, isa: Isa, name: &str) -> Option<&'static RelationshipDescriptor> {
        self.relationships(isa)
            .iter()
            .copied()
            .find(|descriptor| descriptor.name == name)
    }

    /// Looks up a relationship of an object kind, failing with
    /// [`RelationError::UnknownRelationship`]. Unknown kinds declare nothing.
    pub fn lookup(
        &self,
        kind: &ObjectKind,
        name: &str,
    ) -> Result<&'static RelationshipDescriptor, RelationError> {
        kind.isa()
            .and_then(|isa| self.relationship(isa, name))
            .ok_or_else(|| RelationError::UnknownRelationship {
                kind: kind.tag().to_string(),
                name: name.to_string(),
            })
    }

    /// The direct relationships of `isa`: the identifier-bearing attributes
    /// of its objects.
    pub fn direct(&self, isa: Isa) -> impl Iterator<Item = &'static RelationshipDescriptor> + '_ {
        self.relationships(isa)
            .iter()
            .copied()
            .filter(|descriptor| !descriptor.is_inverse())
    }

    /// The direct relationship an inverse mirrors on one target kind.
    pub fn mirrored(
        &self,
        inverse: &RelationshipDescriptor,
        target: Isa,
    ) -> Option<&'static RelationshipDescriptor> {
        let of = inverse.inverse_of()?;
        self.relationship(target, of)
            .filter(|descriptor| !descriptor.is_inverse())
    }

    /// Returns true if a target of the direct relationship `direct` may have
    /// at most one owner, because some target kind declares a to-one inverse
    /// of it.
    pub fn is_exclusive(&self, direct: &RelationshipDescriptor) -> bool {
        direct.target.kinds().iter().any(|target| {
            self.relationships(*target).iter().any(|candidate| {
                candidate.cardinality == Cardinality::One
                    && candidate.inverse_of() == Some(direct.name)
                    && candidate.target.kinds().iter().any(|owner| {
                        direct.owner.matches(&ObjectKind::Known(*owner))
                    })
            })
        })
    }

    /// Checks the tables for internal consistency.
    ///
    /// Every inverse must mirror an existing direct relationship on every
    /// kind it targets, and no kind may declare a relationship name or a
    /// storage attribute twice. All problems are returned together.
    pub fn validate(&self) -> Result<(), Vec<SchemaError>> {
        let mut problems = Vec::new();
        for isa in Isa::ALL {
            let mut names = HashSet::new();
            let mut attributes = HashSet::new();
            for descriptor in self.relationships(*isa) {
                if !names.insert(descriptor.name) {
                    problems.push(SchemaError::Duplicate {
                        kind: *isa,
                        name: descriptor.name,
                    });
                }
                if let Some(attribute) = descriptor.storage_attribute() {
                    if !attributes.insert(attribute) {
                        problems.push(SchemaError::Duplicate {
                            kind: *isa,
                            name: attribute,
                        });
                    }
                }
                let Some(of) = descriptor.inverse_of() else {
                    continue;
                };
                for target in descriptor.target.kinds() {
                    match self.relationship(*target, of) {
                        None => problems.push(SchemaError::MissingInverse {
                            kind: *isa,
                            relationship: descriptor.name,
                            target: *target,
                            of,
                        }),
                        Some(mirrored) if mirrored.is_inverse() => {
                            problems.push(SchemaError::InverseOfInverse {
                                kind: *isa,
                                relationship: descriptor.name,
                                target: *target,
                                of,
                            })
                        }
                        Some(_) => {}
                    }
                }
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
