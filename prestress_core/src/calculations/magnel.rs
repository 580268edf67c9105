//! # Magnel Stress-Limit Check
//!
//! Serviceability check used for preliminary prestress sizing. Fibre
//! stresses are evaluated at two stages:
//!
//! 1. **Transfer** - prestress plus self-weight moment `Mi` on the
//!    time-dependent section (Ecm at the loading age), against limits from
//!    `fck(t0)` and `fctm(t0)`.
//! 2. **Service** - prestress plus full moment `Mf` on the short-term
//!    section, against limits from `fck` and `fctm`.
//!
//! At each stage both the top and bottom fibre must satisfy
//! `−0.45·fck < σ < fctm` with strict inequalities; a stress exactly at a
//! limit fails. Compression is negative.
//!
//! ## Example
//!
//! ```rust
//! use prestress_core::calculations::magnel::{check, MagnelMoments};
//! use prestress_core::section::{CrossSection, CrossSectionInput};
//!
//! let mut input = CrossSectionInput::default();
//! input.reinforcement.ap_mm2 = 1000.0;
//! let section = CrossSection::new(input).unwrap();
//!
//! let moments = MagnelMoments::from_prestress(-1.0e6, 850.0, 1.0e8, 4.0e8);
//! let result = check(&section, -1.0e6, &moments).unwrap();
//! assert_eq!(result.checks.len(), 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::loads::{total_moment, Load};
use crate::section::{CrossSection, HomogenizedVariant, StrainState};

/// Ratio of the characteristic strength allowed in compression
pub const COMPRESSION_LIMIT_RATIO: f64 = 0.45;

/// Total moments about the top fibre at the two stages (N·mm)
///
/// ## JSON Example
///
/// ```json
/// { "transfer_moment_nmm": -7.1e8, "service_moment_nmm": -3.1e8 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnelMoments {
    /// Mi: total moment at transfer
    pub transfer_moment_nmm: f64,
    /// Mf: total moment in service
    pub service_moment_nmm: f64,
}

impl MagnelMoments {
    pub fn new(transfer_moment_nmm: f64, service_moment_nmm: f64) -> Self {
        MagnelMoments {
            transfer_moment_nmm,
            service_moment_nmm,
        }
    }

    /// Totals from external moments and an axial force `n_n` at depth `dp_mm`
    pub fn from_prestress(n_n: f64, dp_mm: f64, external_transfer_nmm: f64, external_service_nmm: f64) -> Self {
        MagnelMoments::new(
            total_moment(external_transfer_nmm, n_n, dp_mm),
            total_moment(external_service_nmm, n_n, dp_mm),
        )
    }
}

/// Load stage of a fibre check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStage {
    Transfer,
    Service,
}

/// Extreme fibre of a fibre check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fibre {
    Top,
    Bottom,
}

/// One stress-versus-limits comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibreCheck {
    pub stage: LoadStage,
    pub fibre: Fibre,
    /// Fibre depth (mm)
    pub depth_mm: f64,
    /// Fibre stress (MPa), compression negative
    pub stress_mpa: f64,
    /// Compression limit −0.45·fck (MPa)
    pub compression_limit_mpa: f64,
    /// Tension limit fctm (MPa)
    pub tension_limit_mpa: f64,
    /// Strictly inside both limits
    pub passes: bool,
}

impl FibreCheck {
    /// Compare `stress_mpa` against strict limits
    pub fn evaluate(
        stage: LoadStage,
        fibre: Fibre,
        depth_mm: f64,
        stress_mpa: f64,
        compression_limit_mpa: f64,
        tension_limit_mpa: f64,
    ) -> Self {
        FibreCheck {
            stage,
            fibre,
            depth_mm,
            stress_mpa,
            compression_limit_mpa,
            tension_limit_mpa,
            passes: compression_limit_mpa < stress_mpa && stress_mpa < tension_limit_mpa,
        }
    }

    fn for_state(stage: LoadStage, fibre: Fibre, state: &StrainState, compression: f64, tension: f64) -> Self {
        let depth = match fibre {
            Fibre::Top => 0.0,
            Fibre::Bottom => state.height_mm,
        };
        FibreCheck::evaluate(stage, fibre, depth, state.stress_at(depth), compression, tension)
    }
}

/// Results of the Magnel check.
///
/// `checks` holds transfer top, transfer bottom, service top, service bottom
/// in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnelResult {
    /// Axial force N (N)
    pub axial_force_n: f64,
    pub moments: MagnelMoments,
    /// State at transfer (time-dependent section)
    pub transfer_state: StrainState,
    /// State in service (short-term section)
    pub service_state: StrainState,
    pub checks: Vec<FibreCheck>,
    /// All four checks pass
    pub passes: bool,
}

impl MagnelResult {
    /// Check if every fibre is within its limits
    pub fn passes(&self) -> bool {
        self.passes
    }

    /// Checks that failed
    pub fn failing_checks(&self) -> impl Iterator<Item = &FibreCheck> {
        self.checks.iter().filter(|c| !c.passes)
    }

    /// The check for one stage and fibre
    pub fn check_for(&self, stage: LoadStage, fibre: Fibre) -> Option<&FibreCheck> {
        self.checks.iter().find(|c| c.stage == stage && c.fibre == fibre)
    }
}

/// Run the Magnel check for axial force `n_n` and the given total moments.
///
/// # Errors
///
/// Propagates `CalcError::Numeric`/`CalcError::Domain` from building the
/// homogenized sections or solving the strain states.
pub fn check(section: &CrossSection, n_n: f64, moments: &MagnelMoments) -> CalcResult<MagnelResult> {
    let concrete = section.concrete();

    let transfer_load = Load::new(n_n, moments.transfer_moment_nmm);
    let transfer_state = section.strain_state(HomogenizedVariant::TimeDependent, &transfer_load)?;
    let transfer_compression = -COMPRESSION_LIMIT_RATIO * concrete.fck_t();
    let transfer_tension = concrete.fctm_t();

    let service_load = Load::new(n_n, moments.service_moment_nmm);
    let service_state = section.strain_state(HomogenizedVariant::ShortTerm, &service_load)?;
    let service_compression = -COMPRESSION_LIMIT_RATIO * concrete.fck();
    let service_tension = concrete.fctm();

    let checks = vec![
        FibreCheck::for_state(LoadStage::Transfer, Fibre::Top, &transfer_state, transfer_compression, transfer_tension),
        FibreCheck::for_state(LoadStage::Transfer, Fibre::Bottom, &transfer_state, transfer_compression, transfer_tension),
        FibreCheck::for_state(LoadStage::Service, Fibre::Top, &service_state, service_compression, service_tension),
        FibreCheck::for_state(LoadStage::Service, Fibre::Bottom, &service_state, service_compression, service_tension),
    ];
    let passes = checks.iter().all(|c| c.passes);

    for failed in checks.iter().filter(|c| !c.passes) {
        tracing::warn!(
            stage = ?failed.stage,
            fibre = ?failed.fibre,
            stress = failed.stress_mpa,
            compression_limit = failed.compression_limit_mpa,
            tension_limit = failed.tension_limit_mpa,
            "Fibre stress outside Magnel limits"
        );
    }
    tracing::info!(label = section.label(), passes, "Magnel check complete");

    Ok(MagnelResult {
        axial_force_n: n_n,
        moments: *moments,
        transfer_state,
        service_state,
        checks,
        passes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangular;
    use crate::materials::ConcreteInput;
    use crate::section::{CrossSectionInput, Reinforcement};

    fn girder(fck: f64, b: f64, h: f64) -> CrossSection {
        CrossSection::new(CrossSectionInput {
            label: "Girder".to_string(),
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
        })
        .unwrap()
    }

    fn moments(n: f64) -> MagnelMoments {
        MagnelMoments::from_prestress(n, 600.0, 1.0e8, 5.0e8)
    }

    #[test]
    fn test_strict_boundaries() {
        let at_compression = FibreCheck::evaluate(LoadStage::Service, Fibre::Top, 0.0, -9.0, -9.0, 2.2);
        assert!(!at_compression.passes);
        let at_tension = FibreCheck::evaluate(LoadStage::Service, Fibre::Top, 0.0, 2.2, -9.0, 2.2);
        assert!(!at_tension.passes);
        let inside = FibreCheck::evaluate(LoadStage::Service, Fibre::Top, 0.0, -8.999, -9.0, 2.2);
        assert!(inside.passes);
    }

    #[test]
    fn test_slender_low_strength_girder_fails() {
        crate::logging::init_test();
        let n = -1.35e6;
        let result = check(&girder(20.0, 300.0, 800.0), n, &moments(n)).unwrap();
        assert!(!result.passes());
        assert!(result.failing_checks().count() >= 1);
        // Service top fibre is over-compressed
        let service_top = result.check_for(LoadStage::Service, Fibre::Top).unwrap();
        assert!(!service_top.passes);
        approx::assert_relative_eq!(service_top.compression_limit_mpa, -9.0, max_relative = 1e-12);
    }

    #[test]
    fn test_four_checks_in_order() {
        let n = -1.35e6;
        let result = check(&girder(20.0, 300.0, 800.0), n, &moments(n)).unwrap();
        let order: Vec<_> = result.checks.iter().map(|c| (c.stage, c.fibre)).collect();
        assert_eq!(
            order,
            vec![
                (LoadStage::Transfer, Fibre::Top),
                (LoadStage::Transfer, Fibre::Bottom),
                (LoadStage::Service, Fibre::Top),
                (LoadStage::Service, Fibre::Bottom),
            ]
        );
        assert_eq!(result.checks[1].depth_mm, 800.0);
    }

    #[test]
    fn test_transfer_limits_use_loading_age() {
        let section = girder(20.0, 300.0, 800.0);
        let n = -1.35e6;
        let result = check(&section, n, &moments(n)).unwrap();
        let transfer = result.check_for(LoadStage::Transfer, Fibre::Top).unwrap();
        assert_eq!(transfer.compression_limit_mpa, -0.45 * section.concrete().fck_t());
        assert_eq!(transfer.tension_limit_mpa, section.concrete().fctm_t());
        assert_eq!(result.transfer_state.modulus_mpa, section.concrete().ecm_t());
        assert_eq!(result.service_state.modulus_mpa, section.concrete().ecm());
    }

    #[test]
    fn test_verdict_is_conjunction() {
        let n = -1.35e6;
        let result = check(&girder(20.0, 300.0, 800.0), n, &moments(n)).unwrap();
        assert_eq!(result.passes, result.checks.iter().all(|c| c.passes));
    }

    #[test]
    fn test_moments_serialization() {
        let m = MagnelMoments::new(-7.1e8, -3.1e8);
        let json = serde_json::to_string(&m).unwrap();
        let parsed: MagnelMoments = serde_json::from_str(&json).unwrap();
        assert_eq!(m, parsed);
    }
}
