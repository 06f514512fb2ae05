//! Options for creating and loading projects.
//!
//! [`ProjectOptions`] is plain serde data so tools can keep it in a JSON
//! configuration file next to the projects they manage:
//!
//! ```
//! use pbxgraph::alloc::IdStrategy;
//! use pbxgraph::config::ProjectOptions;
//!
//! let options: ProjectOptions =
//!     serde_json::from_str(r#"{"id_strategy": {"type": "seeded", "seed": 1}}"#).unwrap();
//! assert_eq!(options.id_strategy, IdStrategy::Seeded { seed: 1 });
//! assert_eq!(options.object_version, "46");
//! ```

use serde::{Deserialize, Serialize};

use crate::alloc::{IdGenerator, IdStrategy};
use crate::constants::{LAST_KNOWN_ARCHIVE_VERSION, LAST_KNOWN_OBJECT_VERSION, LAST_UPGRADE_CHECK};

/// Settings applied to scaffolded projects and to objects created after a
/// project is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectOptions {
    /// How identifiers of new objects are drawn
    pub id_strategy: IdStrategy,

    /// `archiveVersion` written into new documents
    pub archive_version: String,

    /// `objectVersion` written into new documents
    pub object_version: String,

    /// `LastUpgradeCheck` of the root object's attributes
    pub last_upgrade_check: String,

    /// Development region of new projects
    pub development_region: String,

    /// Regions listed in `knownRegions`
    pub known_regions: Vec<String>,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            archive_version: LAST_KNOWN_ARCHIVE_VERSION.to_string(),
            object_version: LAST_KNOWN_OBJECT_VERSION.to_string(),
            last_upgrade_check: LAST_UPGRADE_CHECK.to_string(),
            development_region: "English".to_string(),
            known_regions: vec!["en".to_string()],
        }
    }
}

impl ProjectOptions {
    /// Options drawing identifiers from a seeded sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            id_strategy: IdStrategy::Seeded { seed },
            ..Self::default()
        }
    }

    /// A fresh identifier generator for these options.
    pub fn generator(&self) -> IdGenerator {
        IdGenerator::from_strategy(self.id_strategy)
    }
}
