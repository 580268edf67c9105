//! # Homogenized Section
//!
//! Folds passive and prestressing steel into an equivalent all-concrete
//! section using modular ratios n = E_steel / E_concrete. Each bar adds
//! (n − 1)·As at its depth, since the concrete it displaces is already
//! counted in the gross section.
//!
//! ## Variants
//!
//! | Variant         | Concrete modulus | Concrete integrated to |
//! |-----------------|------------------|------------------------|
//! | Short-term      | Ecm              | h                      |
//! | Time-dependent  | Ecm(t0)          | h                      |
//! | Cracked         | Ecm              | caller-supplied y0     |
//!
//! Reinforcement terms are included in every variant.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::SectionGeometry;
use crate::materials::{Concrete, PrestressSteel, ReinforcementSteel};

use super::Reinforcement;

/// Which homogenized section to build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant")]
pub enum HomogenizedVariant {
    /// Full section, 28-day secant modulus
    ShortTerm,
    /// Full section, secant modulus at the loading age
    TimeDependent,
    /// Concrete only above `depth_mm`, 28-day secant modulus
    Cracked { depth_mm: f64 },
}

impl HomogenizedVariant {
    /// Concrete modulus used by this variant (MPa)
    pub fn modulus(&self, concrete: &Concrete) -> f64 {
        match self {
            HomogenizedVariant::ShortTerm | HomogenizedVariant::Cracked { .. } => concrete.ecm(),
            HomogenizedVariant::TimeDependent => concrete.ecm_t(),
        }
    }

    /// Depth to which the concrete is integrated
    pub fn concrete_depth(&self, height_mm: f64) -> f64 {
        match self {
            HomogenizedVariant::Cracked { depth_mm } => *depth_mm,
            _ => height_mm,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            HomogenizedVariant::ShortTerm => "Short-term",
            HomogenizedVariant::TimeDependent => "Time-dependent",
            HomogenizedVariant::Cracked { .. } => "Cracked",
        }
    }
}

/// Equivalent elastic properties of a reinforced section.
///
/// A, Q, I are about the top fibre; I0 is about the homogenized centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomogenizedProperties {
    /// Variant these properties were built for
    pub variant: HomogenizedVariant,
    /// Concrete modulus E (MPa)
    pub modulus_mpa: f64,
    /// Passive steel modular ratio Es/E
    pub n_s: f64,
    /// Prestressing steel modular ratio Ep/E
    pub n_p: f64,
    /// Section height h (mm)
    pub height_mm: f64,
    /// Homogenized area A (mm²)
    pub area_mm2: f64,
    /// First moment about the top fibre Q (mm³)
    pub first_moment_mm3: f64,
    /// Second moment about the top fibre I (mm⁴)
    pub inertia_mm4: f64,
    /// Centroid depth y_cen = Q/A (mm)
    pub y_centroid_mm: f64,
    /// Tendon eccentricity e = dp − y_cen (mm)
    pub eccentricity_mm: f64,
    /// Centroidal second moment I0 = I − A·y_cen² (mm⁴)
    pub inertia_centroidal_mm4: f64,
    /// Top fibre section modulus W1 = I0/y_cen (mm³)
    pub w_top_mm3: f64,
    /// Bottom fibre section modulus W2 = I0/(h − y_cen) (mm³)
    pub w_bottom_mm3: f64,
}

/// Build homogenized properties for `variant`.
///
/// Unset steel depths take the default layout for the section height.
///
/// # Errors
///
/// - `CalcError::Domain` if a cracked depth lies outside [0, h] or the
///   homogenized area is not positive
/// - `CalcError::Numeric` if I0 is negative or a section modulus is not finite
pub fn homogenize(
    geometry: &dyn SectionGeometry,
    concrete: &Concrete,
    bars: &ReinforcementSteel,
    tendons: &PrestressSteel,
    reinforcement: &Reinforcement,
    variant: HomogenizedVariant,
) -> CalcResult<HomogenizedProperties> {
    let h = geometry.height();
    let gross = geometry.integrals_to(variant.concrete_depth(h))?;

    let e = variant.modulus(concrete);
    let n_s = bars.modular_ratio(e);
    let n_p = tendons.modular_ratio(e);
    let dp = reinforcement.dp(h);

    // (area increment, depth) of each steel layer
    let layers = [
        (reinforcement.as1_mm2 * (n_s - 1.0), reinforcement.ds1()),
        (reinforcement.as2_mm2 * (n_s - 1.0), reinforcement.ds2(h)),
        (reinforcement.ap_mm2 * (n_p - 1.0), dp),
    ];
    let area = gross.area + layers.iter().map(|(a, _)| a).sum::<f64>();
    let first_moment = gross.first_moment + layers.iter().map(|(a, d)| a * d).sum::<f64>();
    let inertia = gross.inertia + layers.iter().map(|(a, d)| a * d * d).sum::<f64>();

    if area.is_nan() || area <= 0.0 {
        return Err(CalcError::domain(
            "homogenized_area",
            area.to_string(),
            format!("{} homogenized area must be positive", variant.display_name()),
        ));
    }

    let y_cen = first_moment / area;
    let i0 = inertia - area * y_cen.powi(2);
    if !i0.is_finite() || i0 < 0.0 {
        return Err(CalcError::numeric(
            "homogenize",
            format!("{} centroidal inertia is negative ({})", variant.display_name(), i0),
        ));
    }

    let w_top = i0 / y_cen;
    let w_bottom = i0 / (h - y_cen);
    if !w_top.is_finite() || !w_bottom.is_finite() {
        return Err(CalcError::numeric(
            "homogenize",
            format!(
                "{} section modulus is not finite (centroid at {} mm of {} mm)",
                variant.display_name(),
                y_cen,
                h
            ),
        ));
    }

    tracing::debug!(
        variant = variant.display_name(),
        area,
        y_cen,
        i0,
        "Homogenized section"
    );

    Ok(HomogenizedProperties {
        variant,
        modulus_mpa: e,
        n_s,
        n_p,
        height_mm: h,
        area_mm2: area,
        first_moment_mm3: first_moment,
        inertia_mm4: inertia,
        y_centroid_mm: y_cen,
        eccentricity_mm: dp - y_cen,
        inertia_centroidal_mm4: i0,
        w_top_mm3: w_top,
        w_bottom_mm3: w_bottom,
    })
}
