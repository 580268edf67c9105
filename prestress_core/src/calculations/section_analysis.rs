//! # Section Analysis
//!
//! One labelled analysis of a reinforced, prestressed cross-section under a
//! single load: material properties, homogenized sections, strain states and
//! fibre stresses, and optionally a cracked state and a Magnel check.
//!
//! ## Example
//!
//! ```rust
//! use prestress_core::calculations::section_analysis::{calculate, SectionAnalysisInput};
//! use prestress_core::loads::Load;
//!
//! let input = SectionAnalysisInput {
//!     label: "Midspan".to_string(),
//!     load: Load::new(-1.0e6, -4.0e8),
//!     ..Default::default()
//! };
//! let result = calculate(&input).unwrap();
//! assert!(result.short_term.top_stress_mpa < 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::GeometrySummary;
use crate::loads::Load;
use crate::materials::ConcreteProperties;
use crate::section::{CrossSection, CrossSectionInput, HomogenizedVariant, SectionState};

use super::magnel::{self, MagnelMoments, MagnelResult};

/// Input parameters for a section analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "G-1 midspan",
///   "section": {
///     "shape": { "type": "Rectangular", "width_mm": 500.0, "height_mm": 1000.0 },
///     "concrete": { "fck_mpa": 35.0 },
///     "reinforcement": { "as1_mm2": 900.0, "as2_mm2": 1800.0, "ap_mm2": 1000.0 }
///   },
///   "load": { "n_n": -1350000.0, "m_nmm": -310000000.0 },
///   "cracked_depth_mm": 350.0,
///   "magnel": { "transfer_moment_nmm": -710000000.0, "service_moment_nmm": -310000000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionAnalysisInput {
    /// User label for this analysis (e.g., "G-1 midspan")
    pub label: String,

    /// Section, materials, and reinforcement
    pub section: CrossSectionInput,

    /// Sustained load N, M about the top fibre
    pub load: Load,

    /// Assumed depth of the uncracked concrete for the cracked state (mm)
    pub cracked_depth_mm: Option<f64>,

    /// Total moments for the Magnel check, using the axial force of `load`
    pub magnel: Option<MagnelMoments>,
}

impl Default for SectionAnalysisInput {
    fn default() -> Self {
        SectionAnalysisInput {
            label: "Section analysis".to_string(),
            section: CrossSectionInput::default(),
            load: Load::default(),
            cracked_depth_mm: None,
            magnel: None,
        }
    }
}

impl SectionAnalysisInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.label.trim().is_empty() {
            return Err(CalcError::configuration("label", "", "Label cannot be empty"));
        }
        self.section.validate()?;
        self.load.validate()?;
        if let Some(moments) = &self.magnel {
            if !moments.transfer_moment_nmm.is_finite() || !moments.service_moment_nmm.is_finite() {
                return Err(CalcError::configuration(
                    "magnel",
                    format!("{:?}", moments),
                    "Magnel moments must be finite",
                ));
            }
        }
        Ok(())
    }
}

/// Creep coefficients reported with an analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreepSummary {
    /// Largest sustained compressive stress under the load, short-term section (MPa)
    pub sustained_compression_mpa: f64,
    /// Concrete age at the end of the service life (days)
    pub end_of_life_age_days: f64,
    /// Linear creep coefficient at the end of the service life
    pub final_coefficient: f64,
    /// Creep coefficient including nonlinear amplification for the sustained stress
    pub final_nonlinear_coefficient: f64,
}

/// Results from a section analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysisResult {
    /// Label copied from the input
    pub label: String,
    /// Derived concrete properties
    pub concrete: ConcreteProperties,
    /// Gross section properties
    pub geometry: GeometrySummary,
    /// Load on the short-term section
    pub short_term: SectionState,
    /// Load on the time-dependent section
    pub time_dependent: SectionState,
    /// Load on the cracked section, when a cracked depth was given
    pub cracked: Option<SectionState>,
    /// Creep coefficients for the sustained load
    pub creep: CreepSummary,
    /// Magnel check, when moments were given
    pub magnel: Option<MagnelResult>,
}

impl SectionAnalysisResult {
    /// Magnel verdict, if a check was requested
    pub fn passes(&self) -> Option<bool> {
        self.magnel.as_ref().map(|m| m.passes)
    }
}

/// Run a section analysis.
///
/// # Arguments
///
/// * `input` - Section, load, and optional cracked depth and Magnel moments
///
/// # Returns
///
/// * `Ok(SectionAnalysisResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid or the section is degenerate
pub fn calculate(input: &SectionAnalysisInput) -> CalcResult<SectionAnalysisResult> {
    input.validate()?;

    let section = CrossSection::new(input.section.clone())?;
    let concrete = section.concrete();

    let short_term = section.section_state(HomogenizedVariant::ShortTerm, &input.load)?;
    let time_dependent = section.section_state(HomogenizedVariant::TimeDependent, &input.load)?;
    let cracked = input
        .cracked_depth_mm
        .map(|depth_mm| section.section_state(HomogenizedVariant::Cracked { depth_mm }, &input.load))
        .transpose()?;

    let sustained = short_term.strain.max_compressive_stress();
    let end_of_life = concrete.end_of_life_age_days();
    let creep = CreepSummary {
        sustained_compression_mpa: sustained,
        end_of_life_age_days: end_of_life,
        final_coefficient: concrete.final_creep_coefficient(),
        final_nonlinear_coefficient: concrete.nonlinear_creep_coefficient(end_of_life, sustained)?,
    };

    let magnel = input
        .magnel
        .as_ref()
        .map(|moments| magnel::check(&section, input.load.n_n, moments))
        .transpose()?;

    tracing::info!(
        label = %input.label,
        top = short_term.top_stress_mpa,
        bottom = short_term.bottom_stress_mpa,
        "Section analysis complete"
    );

    Ok(SectionAnalysisResult {
        label: input.label.clone(),
        concrete: *concrete.properties(),
        geometry: section.shape().summary(),
        short_term,
        time_dependent,
        cracked,
        creep,
        magnel,
    })
}

/// Run several independent analyses; one failure does not stop the others.
pub fn calculate_batch(inputs: &[SectionAnalysisInput]) -> Vec<CalcResult<SectionAnalysisResult>> {
    inputs
        .iter()
        .map(|input| {
            calculate(input).inspect_err(|e| {
                tracing::warn!(label = %input.label, code = e.error_code(), "Section analysis failed");
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangular;
    use crate::materials::ConcreteInput;
    use crate::section::Reinforcement;
    use approx::assert_relative_eq;

    fn girder_input(fck: f64, b: f64, h: f64) -> SectionAnalysisInput {
        let n = -1.35e6;
        SectionAnalysisInput {
            label: format!("C{} {}x{}", fck, b, h),
            section: CrossSectionInput {
                shape: Rectangular::new(b, h).unwrap().into(),
                concrete: ConcreteInput {
                    fck_mpa: fck,
                    ..Default::default()
                },
                reinforcement: Reinforcement {
                    as1_mm2: 900.0,
                    as2_mm2: 1800.0,
                    ap_mm2: 1000.0,
                    ds1_mm: Some(60.0),
                    ds2_mm: Some(740.0),
                    dp_mm: Some(600.0),
                },
                ..Default::default()
            },
            load: Load::from_prestress(1.35e6, 600.0, 5.0e8),
            cracked_depth_mm: None,
            magnel: Some(MagnelMoments::from_prestress(n, 600.0, 1.0e8, 5.0e8)),
        }
    }

    #[test]
    fn test_default_analysis_is_unloaded() {
        let result = calculate(&SectionAnalysisInput::default()).unwrap();
        assert_eq!(result.short_term.strain.eps0, 0.0);
        assert_eq!(result.time_dependent.strain.curvature, 0.0);
        assert_eq!(result.creep.sustained_compression_mpa, 0.0);
        assert_eq!(result.creep.final_nonlinear_coefficient, result.creep.final_coefficient);
        assert!(result.cracked.is_none());
        assert_eq!(result.passes(), None);
    }

    #[test]
    fn test_magnel_verdicts() {
        let failing = calculate(&girder_input(20.0, 300.0, 800.0)).unwrap();
        assert_eq!(failing.passes(), Some(false));

        let passing = calculate(&girder_input(35.0, 500.0, 1000.0)).unwrap();
        assert_eq!(passing.passes(), Some(true));
    }

    #[test]
    fn test_cracked_state_reported() {
        let mut input = girder_input(35.0, 500.0, 1000.0);
        input.cracked_depth_mm = Some(400.0);
        let result = calculate(&input).unwrap();
        let cracked = result.cracked.unwrap();
        assert_eq!(cracked.properties.variant, HomogenizedVariant::Cracked { depth_mm: 400.0 });
        assert_eq!(cracked.strain.modulus_mpa, result.concrete.ecm_mpa);
    }

    #[test]
    fn test_cracked_depth_outside_section() {
        let mut input = girder_input(35.0, 500.0, 1000.0);
        input.cracked_depth_mm = Some(1200.0);
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_high_compression_amplifies_creep() {
        let mut input = girder_input(20.0, 300.0, 800.0);
        input.magnel = None;
        input.load = Load::new(-2.5e6, -2.5e6 * 400.0);
        let result = calculate(&input).unwrap();
        // Uniform compression well above 0.45 fck(t0)
        assert!(result.creep.sustained_compression_mpa > 0.45 * result.concrete.fck_t_mpa);
        assert!(result.creep.final_nonlinear_coefficient > result.creep.final_coefficient);
    }

    #[test]
    fn test_geometry_summary() {
        let result = calculate(&girder_input(35.0, 500.0, 1000.0)).unwrap();
        assert_eq!(result.geometry.area_mm2, 500_000.0);
        assert_relative_eq!(result.geometry.notional_size_mm, 2.0 * 500_000.0 / 3_000.0);
    }

    #[test]
    fn test_empty_label_rejected() {
        let input = SectionAnalysisInput {
            label: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_batch_isolates_failures() {
        crate::logging::init_test();
        let mut bad = girder_input(35.0, 500.0, 1000.0);
        bad.section.concrete.fck_mpa = -1.0;
        let results = calculate_batch(&[girder_input(35.0, 500.0, 1000.0), bad, SectionAnalysisInput::default()]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&girder_input(35.0, 500.0, 1000.0)).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: SectionAnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.label, result.label);
        assert_eq!(parsed.passes(), Some(true));
    }
}
