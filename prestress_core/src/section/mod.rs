//! # Reinforced Cross-Section
//!
//! A [`CrossSection`] ties one section shape to a concrete, the two steels,
//! and the reinforcement layout. It is built once from a
//! [`CrossSectionInput`] and never mutated; [`CrossSection::reconfigure`]
//! builds a new one from a modified copy of the input.
//!
//! ```text
//!   ─────────────────── y = 0 (top fibre)
//!     ○  ○  ○  ○        As1 at ds1
//!
//!          ●●●          Ap at dp
//!     ○  ○  ○  ○        As2 at ds2
//!   ─────────────────── y = h
//! ```
//!
//! ## Example
//!
//! ```rust
//! use prestress_core::loads::Load;
//! use prestress_core::section::{CrossSection, CrossSectionInput, HomogenizedVariant};
//!
//! let section = CrossSection::new(CrossSectionInput::default()).unwrap();
//! let props = section.homogenized(HomogenizedVariant::ShortTerm).unwrap();
//! let state = section.strain_state(HomogenizedVariant::ShortTerm, &Load::new(0.0, 2.0e8)).unwrap();
//!
//! assert!(props.area_mm2 > 0.0);
//! assert!(state.bottom_stress() > 0.0);
//! ```

pub mod homogenized;
pub mod strain;

pub use homogenized::{homogenize, HomogenizedProperties, HomogenizedVariant};
pub use strain::{SectionState, StrainState};

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, CalcError, CalcResult};
use crate::geometry::{SectionGeometry, SectionShape};
use crate::loads::Load;
use crate::materials::{Concrete, ConcreteInput, PrestressSteel, ReinforcementSteel};

/// Cover from either face to the passive bars in the default layout (mm)
pub const DEFAULT_BAR_COVER_MM: f64 = 50.0;

/// Height of the tendon above the bottom face in the default layout (mm)
pub const DEFAULT_TENDON_COVER_MM: f64 = 150.0;

/// Steel areas and their depths from the top fibre.
///
/// A depth left unset follows the section height: As1 at 50 mm, As2 at
/// h − 50 mm, Ap at h − 150 mm. Use [`Reinforcement::ds1`] and friends to read
/// the effective depths.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reinforcement {
    /// Top passive steel area As1 (mm²)
    pub as1_mm2: f64,
    /// Bottom passive steel area As2 (mm²)
    pub as2_mm2: f64,
    /// Prestressing steel area Ap (mm²)
    pub ap_mm2: f64,
    /// Depth of As1 (mm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ds1_mm: Option<f64>,
    /// Depth of As2 (mm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ds2_mm: Option<f64>,
    /// Depth of Ap (mm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp_mm: Option<f64>,
}

impl Reinforcement {
    /// No steel, depths unset
    pub fn unreinforced() -> Self {
        Self::default()
    }

    /// The default layout for a section of height `h_mm` with every depth set
    pub fn for_height(h_mm: f64) -> Self {
        Self::default().resolved(h_mm)
    }

    /// Effective depth of As1 (mm)
    pub fn ds1(&self) -> f64 {
        self.ds1_mm.unwrap_or(DEFAULT_BAR_COVER_MM)
    }

    /// Effective depth of As2 (mm)
    pub fn ds2(&self, h_mm: f64) -> f64 {
        self.ds2_mm.unwrap_or(h_mm - DEFAULT_BAR_COVER_MM)
    }

    /// Effective depth of Ap (mm)
    pub fn dp(&self, h_mm: f64) -> f64 {
        self.dp_mm.unwrap_or(h_mm - DEFAULT_TENDON_COVER_MM)
    }

    /// Same areas with every unset depth filled in for height `h_mm`
    pub fn resolved(&self, h_mm: f64) -> Self {
        Reinforcement {
            ds1_mm: Some(self.ds1()),
            ds2_mm: Some(self.ds2(h_mm)),
            dp_mm: Some(self.dp(h_mm)),
            ..*self
        }
    }

    /// Areas must be non-negative; effective depths must lie within [0, h]
    pub fn validate(&self, height_mm: f64) -> CalcResult<()> {
        for (field, area) in [
            ("as1_mm2", self.as1_mm2),
            ("as2_mm2", self.as2_mm2),
            ("ap_mm2", self.ap_mm2),
        ] {
            require_finite(field, area)?;
            if area < 0.0 {
                return Err(CalcError::configuration(field, area.to_string(), "Steel area cannot be negative"));
            }
        }
        for (field, depth) in [
            ("ds1_mm", self.ds1()),
            ("ds2_mm", self.ds2(height_mm)),
            ("dp_mm", self.dp(height_mm)),
        ] {
            require_finite(field, depth)?;
            if depth < 0.0 || depth > height_mm {
                return Err(CalcError::configuration(
                    field,
                    depth.to_string(),
                    format!("Depth must lie within the section [0, {}]", height_mm),
                ));
            }
        }
        Ok(())
    }

    /// Total passive steel area (mm²)
    pub fn passive_area(&self) -> f64 {
        self.as1_mm2 + self.as2_mm2
    }
}

/// Configuration of a reinforced cross-section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Girder midspan",
///   "shape": { "type": "Rectangular", "width_mm": 300.0, "height_mm": 800.0 },
///   "concrete": { "fck_mpa": 35.0, "cement_class": "N" },
///   "reinforcement": { "as1_mm2": 900.0, "as2_mm2": 1800.0, "ap_mm2": 1000.0,
///                      "ds1_mm": 60.0, "ds2_mm": 740.0, "dp_mm": 600.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossSectionInput {
    /// User label for this section
    pub label: String,
    /// Concrete outline
    pub shape: SectionShape,
    /// Concrete material
    pub concrete: ConcreteInput,
    /// Passive reinforcement steel
    pub reinforcement_steel: ReinforcementSteel,
    /// Prestressing steel
    pub prestress_steel: PrestressSteel,
    /// Steel areas and depths; unset depths follow the shape height
    pub reinforcement: Reinforcement,
}

impl Default for CrossSectionInput {
    fn default() -> Self {
        CrossSectionInput {
            label: "Section".to_string(),
            shape: SectionShape::default(),
            concrete: ConcreteInput::default(),
            reinforcement_steel: ReinforcementSteel::default(),
            prestress_steel: PrestressSteel::default(),
            reinforcement: Reinforcement::default(),
        }
    }
}

impl CrossSectionInput {
    /// Validate everything except the concrete, which validates on construction
    pub fn validate(&self) -> CalcResult<()> {
        self.shape.validate()?;
        self.reinforcement_steel.validate()?;
        self.prestress_steel.validate()?;
        self.reinforcement.validate(self.shape.height())?;
        Ok(())
    }
}

/// A validated reinforced section
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    input: CrossSectionInput,
    concrete: Concrete,
    /// Reinforcement with every depth resolved for the shape height
    layout: Reinforcement,
}

impl CrossSection {
    /// Validate `input` and build the section.
    ///
    /// # Errors
    ///
    /// `CalcError::Configuration` for any invalid dimension, material
    /// parameter, or reinforcement placement.
    pub fn new(input: CrossSectionInput) -> CalcResult<Self> {
        input.validate()?;
        let concrete = Concrete::new(input.concrete.clone())?;
        let layout = input.reinforcement.resolved(input.shape.height());
        tracing::debug!(
            label = %input.label,
            shape = input.shape.shape_name(),
            height = input.shape.height(),
            "Built cross-section"
        );
        Ok(CrossSection { input, concrete, layout })
    }

    /// Build a new section from a modified copy of this one's input
    ///
    /// ```rust
    /// use prestress_core::section::{CrossSection, CrossSectionInput};
    ///
    /// let base = CrossSection::new(CrossSectionInput::default()).unwrap();
    /// let stronger = base.reconfigure(|input| input.concrete.fck_mpa = 40.0).unwrap();
    /// assert_eq!(stronger.concrete().fck(), 40.0);
    /// assert_eq!(base.concrete().fck(), 25.0);
    /// ```
    pub fn reconfigure<F>(&self, modify: F) -> CalcResult<Self>
    where
        F: FnOnce(&mut CrossSectionInput),
    {
        let mut input = self.input.clone();
        modify(&mut input);
        CrossSection::new(input)
    }

    pub fn input(&self) -> &CrossSectionInput {
        &self.input
    }

    pub fn label(&self) -> &str {
        &self.input.label
    }

    pub fn shape(&self) -> &SectionShape {
        &self.input.shape
    }

    pub fn concrete(&self) -> &Concrete {
        &self.concrete
    }

    /// Reinforcement with the effective depth of every layer set
    pub fn reinforcement(&self) -> &Reinforcement {
        &self.layout
    }

    /// Section height h (mm)
    pub fn height(&self) -> f64 {
        self.input.shape.height()
    }

    /// Homogenized properties for `variant`
    pub fn homogenized(&self, variant: HomogenizedVariant) -> CalcResult<HomogenizedProperties> {
        homogenize(
            self.input.shape.as_geometry(),
            &self.concrete,
            &self.input.reinforcement_steel,
            &self.input.prestress_steel,
            &self.layout,
            variant,
        )
    }

    /// Strain state under `load` for `variant`
    pub fn strain_state(&self, variant: HomogenizedVariant, load: &Load) -> CalcResult<StrainState> {
        load.validate()?;
        StrainState::solve(&self.homogenized(variant)?, load)
    }

    /// Homogenized properties, strain, and fibre stresses under `load`
    pub fn section_state(&self, variant: HomogenizedVariant, load: &Load) -> CalcResult<SectionState> {
        load.validate()?;
        SectionState::evaluate(self.homogenized(variant)?, load)
    }
}
