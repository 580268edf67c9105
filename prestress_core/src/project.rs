//! # Project Data Structures
//!
//! The `Project` struct is the root container for a set of section analyses.
//! Projects serialize to `.psc` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (design code, default materials)
//! └── items: HashMap<Uuid, CalculationItem> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use prestress_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "Viaduct V3");
//! let input = project.settings.new_section_input("G-1 midspan");
//! let id = project.add_item(input.into());
//!
//! assert_eq!(project.get_item(&id).unwrap().label(), "G-1 midspan");
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{CalculationItem, CalculationOutput, SectionAnalysisInput};
use crate::errors::CalcResult;
use crate::geometry::{SectionGeometry, SectionShape};
use crate::materials::{ConcreteInput, PrestressSteel, ReinforcementSteel};
use crate::section::{CrossSectionInput, Reinforcement};

/// Current schema version for .psc files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings (design code, default materials)
    pub settings: GlobalSettings,

    /// All calculation items, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `structure` - Name of the structure or client
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, structure: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                structure: structure.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item and return its new UUID.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        tracing::debug!(%id, label = item.label(), "Added calculation item");
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Get a mutable reference to a calculation item by UUID.
    ///
    /// Marks the project as modified when the item exists.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut CalculationItem> {
        if self.items.contains_key(id) {
            self.touch();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// First item with the given label
    pub fn find_by_label(&self, label: &str) -> Option<(&Uuid, &CalculationItem)> {
        self.items.iter().find(|(_, item)| item.label() == label)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Run every item, ordered by label.
    pub fn run_all(&self) -> Vec<(Uuid, CalcResult<CalculationOutput>)> {
        let mut ids: Vec<&Uuid> = self.items.keys().collect();
        ids.sort_by(|a, b| self.items[*a].label().cmp(self.items[*b].label()).then(a.cmp(b)));
        ids.into_iter().map(|id| (*id, self.items[id].run())).collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Structure or client name
    pub structure: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Design code reference
    pub design_code: String,

    /// Default materials for new sections
    pub default_materials: DefaultMaterials,

    /// Default outline for new sections
    pub default_shape: SectionShape,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            design_code: "EN 1992-1-1:2004".to_string(),
            default_materials: DefaultMaterials::default(),
            default_shape: SectionShape::default(),
        }
    }
}

impl GlobalSettings {
    /// A section analysis input seeded with the project defaults.
    ///
    /// Steel depths are left unset so they follow whatever shape the section ends up with.
    pub fn new_section_input(&self, label: impl Into<String>) -> SectionAnalysisInput {
        let label = label.into();
        SectionAnalysisInput {
            label: label.clone(),
            section: CrossSectionInput {
                label,
                shape: self.default_shape,
                concrete: self.default_materials.concrete.clone(),
                reinforcement_steel: self.default_materials.reinforcement_steel,
                prestress_steel: self.default_materials.prestress_steel,
                reinforcement: Reinforcement::default(),
            },
            ..Default::default()
        }
    }
}

/// Default materials for new calculations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultMaterials {
    pub concrete: ConcreteInput,
    pub reinforcement_steel: ReinforcementSteel,
    pub prestress_steel: PrestressSteel,
}
