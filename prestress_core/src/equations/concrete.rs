//! # Concrete Material Formulas (EN 1992-1-1)
//!
//! Pure functions for age-dependent strength, stiffness, and creep of
//! concrete. Strengths are in MPa, ages in days, sizes in mm, humidity in
//! percent. [`crate::materials::Concrete`] composes these into a validated
//! material.
//!
//! ## References
//!
//! - EN 1992-1-1 §3.1.2 (strength development), Table 3.1 (fcm, fctm, Ecm)
//! - EN 1992-1-1 §3.1.4 and Annex B (creep)

// =============================================================================
// STRENGTH AND STIFFNESS
// =============================================================================

/// Difference between mean and characteristic compressive strength (MPa)
pub const FCM_MARGIN_MPA: f64 = 8.0;

/// Characteristic strength above which the high-strength branches apply (MPa)
pub const HIGH_STRENGTH_FCK_MPA: f64 = 50.0;

/// Mean strength separating the two creep branches (MPa)
pub const CREEP_BRANCH_FCM_MPA: f64 = 35.0;

/// Age-dependent strength coefficient βcc(t)
///
/// # Formula
/// βcc(t) = exp(s·(1 − √(28/t)))
///
/// Equals 1 at 28 days.
///
/// # Example
/// ```rust
/// use prestress_core::equations::concrete::bcc;
///
/// assert_eq!(bcc(0.25, 28.0), 1.0);
/// assert!(bcc(0.25, 7.0) < 1.0);
/// ```
///
/// # Reference
/// - EN 1992-1-1 Eq. 3.2
#[inline]
pub fn bcc(s: f64, t_days: f64) -> f64 {
    (s * (1.0 - (28.0 / t_days).sqrt())).exp()
}

/// Mean compressive strength fcm = fck + 8
#[inline]
pub fn fcm(fck: f64) -> f64 {
    fck + FCM_MARGIN_MPA
}

/// Mean axial tensile strength fctm
///
/// # Formula
/// - fck ≤ 50: fctm = 0.30·fck^(2/3)
/// - fck > 50: fctm = 2.12·ln(1 + fcm/10)
///
/// # Reference
/// - EN 1992-1-1 Table 3.1
pub fn fctm(fck: f64) -> f64 {
    if fck <= HIGH_STRENGTH_FCK_MPA {
        0.30 * fck.powf(2.0 / 3.0)
    } else {
        2.12 * (1.0 + 0.1 * fcm(fck)).ln()
    }
}

/// Secant modulus of elasticity Ecm (MPa)
///
/// # Formula
/// Ecm = 22·(fcm/10)^0.3 GPa
#[inline]
pub fn ecm(fcm: f64) -> f64 {
    22.0 * (0.1 * fcm).powf(0.3) * 1_000.0
}

/// Modulus at age t from the strength ratio
///
/// # Formula
/// Ecm(t) = (fcm(t)/fcm)^0.3·Ecm
///
/// # Reference
/// - EN 1992-1-1 Eq. 3.5
#[inline]
pub fn ecm_t(fcm_t: f64, fcm: f64, ecm: f64) -> f64 {
    (fcm_t / fcm).powf(0.3) * ecm
}

/// Strain at peak stress of the parabola-rectangle diagram εc2 (dimensionless)
///
/// # Formula
/// - fck ≤ 50: εc2 = 2.0‰
/// - fck > 50: εc2 = 2.0 + 0.085·(fck − 50)^0.53 ‰
pub fn eps_c2(fck: f64) -> f64 {
    if fck <= HIGH_STRENGTH_FCK_MPA {
        0.002
    } else {
        (2.0 + 0.085 * (fck - HIGH_STRENGTH_FCK_MPA).powf(0.53)) * 1e-3
    }
}

// =============================================================================
// CREEP (ANNEX B)
// =============================================================================

/// Strength correction factor αn = (35/fcm)^p, p ∈ {0.7, 0.2, 0.5}
#[inline]
pub fn alpha_n(fcm: f64, p: f64) -> f64 {
    (CREEP_BRANCH_FCM_MPA / fcm).powf(p)
}

/// Relative humidity factor φRH
///
/// # Formula
/// - fcm ≤ 35: φRH = 1 + (1 − RH/100)/(0.1·h0^(1/3))
/// - fcm > 35: φRH = [1 + (1 − RH/100)/(0.1·h0^(1/3))·α1]·α2
///
/// # Reference
/// - EN 1992-1-1 Eq. B.3a/B.3b
pub fn phi_rh(fcm: f64, rh_percent: f64, h0_mm: f64) -> f64 {
    let humidity_term = (1.0 - rh_percent / 100.0) / (0.1 * h0_mm.cbrt());
    if fcm <= CREEP_BRANCH_FCM_MPA {
        1.0 + humidity_term
    } else {
        (1.0 + humidity_term * alpha_n(fcm, 0.7)) * alpha_n(fcm, 0.2)
    }
}

/// Concrete strength factor β(fcm) = 16.8/√fcm
///
/// # Reference
/// - EN 1992-1-1 Eq. B.4
#[inline]
pub fn beta_fcm(fcm: f64) -> f64 {
    16.8 / fcm.sqrt()
}

/// Loading age factor β(t0) = 1/(0.1 + t0^0.2)
///
/// # Reference
/// - EN 1992-1-1 Eq. B.5
#[inline]
pub fn beta_t0(t0_days: f64) -> f64 {
    1.0 / (0.1 + t0_days.powf(0.2))
}

/// Humidity and size factor βH
///
/// # Formula
/// - fcm ≤ 35: βH = 1.5·[1 + (0.012·RH)^18]·h0 + 250 ≤ 1500
/// - fcm > 35: βH = 1.5·[1 + (0.012·RH)^18]·h0 + 250·α3 ≤ 1500·α3
///
/// # Reference
/// - EN 1992-1-1 Eq. B.8a/B.8b
pub fn beta_h(fcm: f64, rh_percent: f64, h0_mm: f64) -> f64 {
    let base = 1.5 * (1.0 + (0.012 * rh_percent).powi(18)) * h0_mm;
    if fcm <= CREEP_BRANCH_FCM_MPA {
        (base + 250.0).min(1500.0)
    } else {
        let alpha_3 = alpha_n(fcm, 0.5);
        (base + 250.0 * alpha_3).min(1500.0 * alpha_3)
    }
}

/// Creep development factor βc(t, t0)
///
/// # Formula
/// βc = [(t − t0)/(βH + t − t0)]^0.3
///
/// `elapsed_days` is t − t0 and must be non-negative.
///
/// # Reference
/// - EN 1992-1-1 Eq. B.7
#[inline]
pub fn beta_c(elapsed_days: f64, beta_h: f64) -> f64 {
    (elapsed_days / (beta_h + elapsed_days)).powf(0.3)
}

/// Loading age modified for cement type
///
/// # Formula
/// t0 = t0,T·(9/(2 + t0,T^1.2) + 1)^α ≥ 0.5
///
/// # Reference
/// - EN 1992-1-1 Eq. B.9
pub fn cement_adjusted_age(t0_raw: f64, alpha: f64) -> f64 {
    let adjusted = t0_raw * (9.0 / (2.0 + t0_raw.powf(1.2)) + 1.0).powf(alpha);
    adjusted.max(0.5)
}

/// Maturity weight of one day cured at temperature T (°C)
///
/// # Formula
/// exp(−4000/(273 + T) + 13.65)
///
/// # Reference
/// - EN 1992-1-1 Eq. B.10
#[inline]
pub fn maturity_factor(temperature_c: f64) -> f64 {
    (-4000.0 / (273.0 + temperature_c) + 13.65).exp()
}

/// Nonlinear creep amplification for compressive stress above 0.45·fck(t0)
///
/// # Formula
/// φnl = φ·exp(1.5·(kσ − 0.45)), kσ = σc/fck(t0)
///
/// # Reference
/// - EN 1992-1-1 Eq. 3.7
#[inline]
pub fn nonlinear_creep_factor(stress_ratio: f64) -> f64 {
    (1.5 * (stress_ratio - 0.45)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bcc_values() {
        assert_eq!(bcc(0.38, 28.0), 1.0);
        // Class N at 7 days: exp(0.25·(1 − 2)) = e^-0.25
        assert_relative_eq!(bcc(0.25, 7.0), (-0.25_f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_fctm_branches() {
        assert_relative_eq!(fctm(25.0), 2.5649, epsilon = 1e-4);
        assert_relative_eq!(fctm(60.0), 2.12 * (1.0_f64 + 6.8).ln(), max_relative = 1e-12);
        assert_relative_eq!(fctm(60.0), 4.3547, epsilon = 1e-4);
    }

    #[test]
    fn test_ecm_table_values() {
        // EN 1992-1-1 Table 3.1: C30/37 -> 33 GPa, C50/60 -> 37 GPa (rounded)
        assert!((ecm(fcm(30.0)) - 32_837.0).abs() < 1.0);
        assert!((ecm(fcm(50.0)) / 1000.0 - 37.3).abs() < 0.1);
    }

    #[test]
    fn test_ecm_t_at_full_strength() {
        assert_relative_eq!(ecm_t(38.0, 38.0, 32_837.0), 32_837.0);
    }

    #[test]
    fn test_eps_c2() {
        assert_eq!(eps_c2(30.0), 0.002);
        assert_relative_eq!(eps_c2(90.0), (2.0 + 0.085 * 40.0_f64.powf(0.53)) * 1e-3);
    }

    #[test]
    fn test_beta_h_cap() {
        // Thick member at high humidity hits the cap
        assert_eq!(beta_h(33.0, 95.0, 1000.0), 1500.0);
        assert_relative_eq!(beta_h(60.0, 95.0, 1000.0), 1500.0 * alpha_n(60.0, 0.5));
        // Dry thin member stays below it
        assert_relative_eq!(beta_h(33.0, 50.0, 100.0), 1.5 * (1.0 + 0.6_f64.powi(18)) * 100.0 + 250.0);
    }

    #[test]
    fn test_phi_rh_branches_meet() {
        // At fcm = 35 the strength factors are 1 and both branches agree
        let low = phi_rh(35.0, 50.0, 200.0);
        let high = phi_rh(35.0 + 1e-9, 50.0, 200.0);
        assert_relative_eq!(low, high, max_relative = 1e-8);
    }

    #[test]
    fn test_beta_c_limits() {
        assert_eq!(beta_c(0.0, 500.0), 0.0);
        assert!(beta_c(1e9, 500.0) > 0.999);
    }

    #[test]
    fn test_cement_adjusted_age() {
        // Class N leaves the age unchanged
        assert_eq!(cement_adjusted_age(7.0, 0.0), 7.0);
        // Rapid cement behaves older, slow cement younger
        assert!(cement_adjusted_age(7.0, 1.0) > 7.0);
        assert!(cement_adjusted_age(7.0, -1.0) < 7.0);
        // Floor at half a day
        assert_eq!(cement_adjusted_age(0.2, -1.0), 0.5);
    }

    #[test]
    fn test_maturity_factor_near_twenty_degrees() {
        // At 20 °C one day counts as very nearly one day
        assert_relative_eq!(maturity_factor(20.0), 1.0, epsilon = 0.01);
        assert!(maturity_factor(5.0) < maturity_factor(30.0));
    }

    #[test]
    fn test_nonlinear_factor_at_threshold() {
        assert_eq!(nonlinear_creep_factor(0.45), 1.0);
        assert!(nonlinear_creep_factor(0.6) > 1.0);
    }
}
