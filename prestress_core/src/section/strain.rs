//! # Linear-Elastic Section State
//!
//! Plane sections remain plane: strain varies linearly with depth,
//! ε(y) = ε0 + k·y, where ε0 is the top-fibre strain and k the curvature.
//! Equilibrium with the homogenized properties about the top fibre gives
//!
//! ```text
//! N = E·(ε0·A + k·Q)
//! M = E·(ε0·Q + k·I)
//! ```
//!
//! solved in closed form. The determinant Q² − A·I is strictly negative for
//! any section with positive area and non-zero extent.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::Load;

use super::homogenized::HomogenizedProperties;

/// Strain field of a section under one load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainState {
    /// Top-fibre strain ε0 (compression negative)
    pub eps0: f64,
    /// Curvature k (1/mm)
    pub curvature: f64,
    /// Concrete modulus used (MPa)
    pub modulus_mpa: f64,
    /// Section height (mm)
    pub height_mm: f64,
}

impl StrainState {
    /// Solve ε0 and k for `load` on a homogenized section.
    ///
    /// # Formula
    /// k  = (N·Q − M·A) / (E·(Q² − A·I))
    /// ε0 = (M·Q − I·N) / (E·(Q² − A·I))
    ///
    /// # Errors
    ///
    /// `CalcError::Numeric` when Q² − A·I ≥ 0 or the result is not finite.
    pub fn solve(props: &HomogenizedProperties, load: &Load) -> CalcResult<Self> {
        let a = props.area_mm2;
        let q = props.first_moment_mm3;
        let i = props.inertia_mm4;
        let e = props.modulus_mpa;

        let det = q * q - a * i;
        if det.is_nan() || det >= 0.0 {
            return Err(CalcError::numeric(
                "strain_state",
                format!("Section determinant Q² − A·I = {} must be negative", det),
            ));
        }

        let denominator = e * det;
        let curvature = (load.n_n * q - load.m_nmm * a) / denominator;
        let eps0 = (load.m_nmm * q - i * load.n_n) / denominator;
        if !curvature.is_finite() || !eps0.is_finite() {
            return Err(CalcError::numeric(
                "strain_state",
                format!("Non-finite solution (eps0 = {}, k = {})", eps0, curvature),
            ));
        }

        Ok(StrainState {
            eps0,
            curvature,
            modulus_mpa: e,
            height_mm: props.height_mm,
        })
    }

    /// Strain at depth `y` (mm)
    #[inline]
    pub fn strain_at(&self, y: f64) -> f64 {
        self.eps0 + self.curvature * y
    }

    /// Concrete stress at depth `y` (MPa)
    #[inline]
    pub fn stress_at(&self, y: f64) -> f64 {
        self.strain_at(y) * self.modulus_mpa
    }

    /// Stress at the top fibre (MPa)
    pub fn top_stress(&self) -> f64 {
        self.stress_at(0.0)
    }

    /// Stress at the bottom fibre (MPa)
    pub fn bottom_stress(&self) -> f64 {
        self.stress_at(self.height_mm)
    }

    /// Depth of the zero-strain fibre, h1 = −ε0/k
    ///
    /// None for pure axial strain (k = 0). The value may lie outside the
    /// section when the whole section is in compression or tension.
    pub fn neutral_depth(&self) -> Option<f64> {
        if self.curvature == 0.0 {
            None
        } else {
            Some(-self.eps0 / self.curvature)
        }
    }

    /// Largest compressive stress magnitude over the section (MPa), 0 if none
    pub fn max_compressive_stress(&self) -> f64 {
        // Linear field: the extreme is at a fibre
        (-self.top_stress().min(self.bottom_stress())).max(0.0)
    }

    /// Recover the section forces from this state
    pub fn resultants(&self, props: &HomogenizedProperties) -> Load {
        let e = self.modulus_mpa;
        Load::new(
            e * (self.eps0 * props.area_mm2 + self.curvature * props.first_moment_mm3),
            e * (self.eps0 * props.first_moment_mm3 + self.curvature * props.inertia_mm4),
        )
    }
}

/// Homogenized properties, strain state, and fibre stresses for one load case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionState {
    /// Homogenized section the state was solved on
    pub properties: HomogenizedProperties,
    /// Solved strain plane
    pub strain: StrainState,
    /// Top fibre stress (MPa)
    pub top_stress_mpa: f64,
    /// Bottom fibre stress (MPa)
    pub bottom_stress_mpa: f64,
    /// Depth of the zero-strain fibre (mm)
    pub neutral_depth_mm: Option<f64>,
}

impl SectionState {
    /// Solve `load` on `properties` and collect the fibre stresses
    pub fn evaluate(properties: HomogenizedProperties, load: &Load) -> CalcResult<Self> {
        let strain = StrainState::solve(&properties, load)?;
        Ok(SectionState {
            properties,
            strain,
            top_stress_mpa: strain.top_stress(),
            bottom_stress_mpa: strain.bottom_stress(),
            neutral_depth_mm: strain.neutral_depth(),
        })
    }
}
