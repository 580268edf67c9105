//! Concrete Material Model
//!
//! Age-dependent strength, stiffness, and creep of structural concrete per
//! EN 1992-1-1. A [`ConcreteInput`] is plain, serializable configuration; a
//! [`Concrete`] is the validated material with every derived property
//! computed once at construction.
//!
//! "Age at loading" is the age at which prestress is transferred. All
//! time-dependent properties (`fck_t`, `Ecm_t`, ...) are evaluated at that
//! age.
//!
//! ## Example
//!
//! ```rust
//! use prestress_core::materials::{CementClass, Concrete, ConcreteInput};
//!
//! let input = ConcreteInput {
//!     fck_mpa: 35.0,
//!     cement_class: CementClass::R,
//!     ..Default::default()
//! };
//! let concrete = Concrete::new(input).unwrap();
//!
//! let props = concrete.properties();
//! assert_eq!(props.fcm_mpa, 43.0);
//! assert!(props.fck_t_mpa < 35.0);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::equations::concrete as eq;
use crate::errors::{require_positive, CalcError, CalcResult};

/// Days per year used to convert service life into an evaluation age
const DAYS_PER_YEAR: f64 = 365.0;

/// Cement class per EN 1992-1-1 §3.1.2(6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CementClass {
    /// Slow hardening (CEM 32.5 N)
    S,
    /// Normal hardening (CEM 32.5 R, CEM 42.5 N)
    #[default]
    N,
    /// Rapid hardening (CEM 42.5 R, CEM 52.5 N/R)
    R,
}

impl CementClass {
    /// All cement classes for iteration
    pub const ALL: [CementClass; 3] = [CementClass::S, CementClass::N, CementClass::R];

    /// Strength development coefficient s used in βcc(t)
    pub fn strength_coefficient(&self) -> f64 {
        match self {
            CementClass::R => 0.20,
            CementClass::N => 0.25,
            CementClass::S => 0.38,
        }
    }

    /// Creep loading-age exponent α
    pub fn creep_exponent(&self) -> f64 {
        match self {
            CementClass::S => -1.0,
            CementClass::N => 0.0,
            CementClass::R => 1.0,
        }
    }

    /// Single-letter code
    pub fn code(&self) -> &'static str {
        match self {
            CementClass::S => "S",
            CementClass::N => "N",
            CementClass::R => "R",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CementClass::S => "Class S (slow)",
            CementClass::N => "Class N (normal)",
            CementClass::R => "Class R (rapid)",
        }
    }
}

impl FromStr for CementClass {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S" => Ok(CementClass::S),
            "N" => Ok(CementClass::N),
            "R" => Ok(CementClass::R),
            _ => Err(CalcError::configuration(
                "cement_class",
                s,
                "Cement class must be one of S, N, R",
            )),
        }
    }
}

impl std::fmt::Display for CementClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Configuration for a concrete material.
///
/// Every field has a default, so partial JSON is accepted:
///
/// ```json
/// { "fck_mpa": 35.0, "cement_class": "R", "relative_humidity_pct": 60.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcreteInput {
    /// Characteristic compressive strength fck (MPa)
    pub fck_mpa: f64,

    /// Partial safety factor γc
    pub gamma_c: f64,

    /// Cement class (S, N, R)
    pub cement_class: CementClass,

    /// Notional size h0 = 2Ac/u (mm)
    ///
    /// See [`crate::geometry::SectionGeometry::notional_size`] to derive it
    /// from the actual section.
    pub notional_size_mm: f64,

    /// Relative humidity of the ambient environment (%)
    pub relative_humidity_pct: f64,

    /// Age of the concrete when prestress is transferred (days)
    pub loading_age_days: f64,

    /// Design service life (years)
    pub service_life_years: f64,

    /// Use the temperature-adjusted age in the creep model
    ///
    /// Requires `temperature_history_c` to cover every day up to loading.
    pub temperature_adjusted: bool,

    /// Mean daily curing temperature from casting, one record per day (°C)
    pub temperature_history_c: Option<Vec<f64>>,
}

impl Default for ConcreteInput {
    fn default() -> Self {
        ConcreteInput {
            fck_mpa: 25.0,
            gamma_c: 1.5,
            cement_class: CementClass::N,
            notional_size_mm: 100.0,
            relative_humidity_pct: 25.0,
            loading_age_days: 7.0,
            service_life_years: 100.0,
            temperature_adjusted: false,
            temperature_history_c: None,
        }
    }
}

impl ConcreteInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("fck_mpa", self.fck_mpa)?;
        require_positive("gamma_c", self.gamma_c)?;
        require_positive("notional_size_mm", self.notional_size_mm)?;
        require_positive("relative_humidity_pct", self.relative_humidity_pct)?;
        if self.relative_humidity_pct > 100.0 {
            return Err(CalcError::configuration(
                "relative_humidity_pct",
                self.relative_humidity_pct.to_string(),
                "Relative humidity cannot exceed 100%",
            ));
        }
        require_positive("loading_age_days", self.loading_age_days)?;
        require_positive("service_life_years", self.service_life_years)?;
        if self.temperature_adjusted && self.temperature_history_c.is_none() {
            return Err(CalcError::configuration(
                "temperature_history_c",
                "none",
                "Temperature-adjusted ageing requested without a temperature history",
            ));
        }
        Ok(())
    }
}

/// Derived properties of a concrete, all evaluated once at construction.
///
/// `*_t_*` values are at the loading age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteProperties {
    // === Strength ===
    /// Strength development coefficient βcc at the loading age
    pub bcc: f64,
    /// Characteristic compressive strength fck (MPa)
    pub fck_mpa: f64,
    /// Characteristic compressive strength at loading fck(t) (MPa)
    pub fck_t_mpa: f64,
    /// Mean compressive strength fcm (MPa)
    pub fcm_mpa: f64,
    /// Mean compressive strength at loading fcm(t) (MPa)
    pub fcm_t_mpa: f64,
    /// Mean tensile strength fctm (MPa)
    pub fctm_mpa: f64,
    /// Mean tensile strength at loading fctm(t) (MPa)
    pub fctm_t_mpa: f64,
    /// Design compressive strength fcd = fck/γc (MPa)
    pub fcd_mpa: f64,

    // === Stiffness ===
    /// Secant modulus Ecm (MPa)
    pub ecm_mpa: f64,
    /// Tangent modulus Ec = 1.05·Ecm (MPa)
    pub ec_mpa: f64,
    /// Secant modulus at loading Ecm(t) (MPa)
    pub ecm_t_mpa: f64,
    /// Strain at peak stress, parabola-rectangle diagram
    pub eps_c2: f64,

    // === Creep ===
    /// Loading age before cement adjustment, nominal or temperature-adjusted (days)
    pub loading_age_raw_days: f64,
    /// Loading age after cement-class adjustment (days)
    pub loading_age_adjusted_days: f64,
    /// Relative humidity factor φRH
    pub phi_rh: f64,
    /// Strength factor β(fcm)
    pub beta_fcm: f64,
    /// Loading age factor β(t0)
    pub beta_t0: f64,
    /// Humidity and size factor βH
    pub beta_h: f64,
    /// Notional creep coefficient φ0
    pub phi_0: f64,
    /// Creep coefficient at the end of the service life
    pub phi_final: f64,
}

/// A validated concrete with its derived properties.
///
/// Immutable: to change a parameter, modify the input and build a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Concrete {
    input: ConcreteInput,
    props: ConcreteProperties,
}

impl Concrete {
    /// Validate `input` and compute every derived property.
    ///
    /// # Errors
    ///
    /// `CalcError::Configuration` for non-positive strength, out-of-range
    /// humidity, or a temperature history that does not reach the loading
    /// age when temperature-adjusted ageing is requested.
    pub fn new(input: ConcreteInput) -> CalcResult<Self> {
        input.validate()?;

        let class = input.cement_class;
        let fck = input.fck_mpa;
        let t_load = input.loading_age_days;

        let bcc = eq::bcc(class.strength_coefficient(), t_load);
        let fcm = eq::fcm(fck);
        let fcm_t = bcc * fcm;
        let fctm = eq::fctm(fck);
        let ecm = eq::ecm(fcm);

        let loading_age_raw_days = match (&input.temperature_history_c, input.temperature_adjusted) {
            (Some(history), true) => temperature_adjusted_age(history, t_load)?,
            _ => t_load,
        };
        let loading_age_adjusted_days = eq::cement_adjusted_age(loading_age_raw_days, class.creep_exponent());

        let phi_rh = eq::phi_rh(fcm, input.relative_humidity_pct, input.notional_size_mm);
        let beta_fcm = eq::beta_fcm(fcm);
        let beta_t0 = eq::beta_t0(loading_age_adjusted_days);
        let beta_h = eq::beta_h(fcm, input.relative_humidity_pct, input.notional_size_mm);
        let phi_0 = phi_rh * beta_fcm * beta_t0;
        let phi_final = phi_0 * eq::beta_c(input.service_life_years * DAYS_PER_YEAR, beta_h);

        let props = ConcreteProperties {
            bcc,
            fck_mpa: fck,
            fck_t_mpa: bcc * fck,
            fcm_mpa: fcm,
            fcm_t_mpa: fcm_t,
            fctm_mpa: fctm,
            fctm_t_mpa: bcc * fctm,
            fcd_mpa: fck / input.gamma_c,
            ecm_mpa: ecm,
            ec_mpa: 1.05 * ecm,
            ecm_t_mpa: eq::ecm_t(fcm_t, fcm, ecm),
            eps_c2: eq::eps_c2(fck),
            loading_age_raw_days,
            loading_age_adjusted_days,
            phi_rh,
            beta_fcm,
            beta_t0,
            beta_h,
            phi_0,
            phi_final,
        };

        tracing::debug!(
            fck = fck,
            cement = class.code(),
            t0 = loading_age_adjusted_days,
            ecm = props.ecm_mpa,
            ecm_t = props.ecm_t_mpa,
            phi_0 = phi_0,
            "Built concrete material"
        );

        Ok(Concrete { input, props })
    }

    /// The configuration this material was built from
    pub fn input(&self) -> &ConcreteInput {
        &self.input
    }

    /// All derived properties
    pub fn properties(&self) -> &ConcreteProperties {
        &self.props
    }

    /// Characteristic compressive strength fck (MPa)
    pub fn fck(&self) -> f64 {
        self.props.fck_mpa
    }

    /// Characteristic compressive strength at loading (MPa)
    pub fn fck_t(&self) -> f64 {
        self.props.fck_t_mpa
    }

    /// Mean tensile strength (MPa)
    pub fn fctm(&self) -> f64 {
        self.props.fctm_mpa
    }

    /// Mean tensile strength at loading (MPa)
    pub fn fctm_t(&self) -> f64 {
        self.props.fctm_t_mpa
    }

    /// Secant modulus (MPa)
    pub fn ecm(&self) -> f64 {
        self.props.ecm_mpa
    }

    /// Secant modulus at loading (MPa)
    pub fn ecm_t(&self) -> f64 {
        self.props.ecm_t_mpa
    }

    /// Strength development coefficient βcc at an arbitrary age (days)
    pub fn bcc_at(&self, t_days: f64) -> CalcResult<f64> {
        if !(t_days.is_finite() && t_days > 0.0) {
            return Err(CalcError::domain("t_days", t_days.to_string(), "Age must be positive"));
        }
        Ok(eq::bcc(self.input.cement_class.strength_coefficient(), t_days))
    }

    /// Characteristic compressive strength at an arbitrary age (MPa)
    pub fn fck_at(&self, t_days: f64) -> CalcResult<f64> {
        Ok(self.bcc_at(t_days)? * self.props.fck_mpa)
    }

    /// Secant modulus at an arbitrary age (MPa)
    pub fn ecm_at(&self, t_days: f64) -> CalcResult<f64> {
        let fcm_t = self.bcc_at(t_days)? * self.props.fcm_mpa;
        Ok(eq::ecm_t(fcm_t, self.props.fcm_mpa, self.props.ecm_mpa))
    }

    /// Linear creep coefficient φ(t, t0) at concrete age `t_days`.
    ///
    /// The development term uses the time elapsed since loading; the
    /// cement-adjusted age enters through β(t0).
    ///
    /// # Errors
    ///
    /// `CalcError::Domain` if `t_days` precedes the loading age.
    pub fn creep_coefficient(&self, t_days: f64) -> CalcResult<f64> {
        let elapsed = t_days - self.input.loading_age_days;
        if !elapsed.is_finite() || elapsed < 0.0 {
            return Err(CalcError::domain(
                "t_days",
                t_days.to_string(),
                format!("Creep is evaluated from the loading age ({} days) onward", self.input.loading_age_days),
            ));
        }
        Ok(self.props.phi_0 * eq::beta_c(elapsed, self.props.beta_h))
    }

    /// Creep coefficient including the nonlinear amplification for high
    /// sustained compression.
    ///
    /// `sigma_c_mpa` is the magnitude of the sustained compressive stress.
    /// Up to 0.45·fck(t0) this equals [`Concrete::creep_coefficient`].
    pub fn nonlinear_creep_coefficient(&self, t_days: f64, sigma_c_mpa: f64) -> CalcResult<f64> {
        if !sigma_c_mpa.is_finite() || sigma_c_mpa < 0.0 {
            return Err(CalcError::domain(
                "sigma_c_mpa",
                sigma_c_mpa.to_string(),
                "Sustained compressive stress must be a non-negative magnitude",
            ));
        }
        let phi = self.creep_coefficient(t_days)?;
        let stress_ratio = sigma_c_mpa / self.props.fck_t_mpa;
        if stress_ratio <= 0.45 {
            return Ok(phi);
        }
        tracing::debug!(stress_ratio, "Sustained compression above 0.45 fck(t0), applying nonlinear creep");
        Ok(phi * eq::nonlinear_creep_factor(stress_ratio))
    }

    /// Creep coefficient at the end of the service life
    pub fn final_creep_coefficient(&self) -> f64 {
        self.props.phi_final
    }

    /// Concrete age at the end of the service life (days)
    pub fn end_of_life_age_days(&self) -> f64 {
        self.input.loading_age_days + self.input.service_life_years * DAYS_PER_YEAR
    }
}

/// Temperature-adjusted age from daily curing temperatures.
///
/// Sums the maturity weight of each day up to the loading age; a fractional
/// loading age weights its last day by the fraction.
fn temperature_adjusted_age(history_c: &[f64], loading_age_days: f64) -> CalcResult<f64> {
    let whole_days = loading_age_days.floor() as usize;
    let fraction = loading_age_days - whole_days as f64;
    let needed = if fraction > 0.0 { whole_days + 1 } else { whole_days };

    if history_c.len() < needed {
        return Err(CalcError::configuration(
            "temperature_history_c",
            format!("{} records", history_c.len()),
            format!("At least {} daily records are needed to reach the loading age", needed),
        ));
    }
    if let Some(bad) = history_c[..needed].iter().find(|t| !t.is_finite() || **t <= -273.0) {
        return Err(CalcError::configuration(
            "temperature_history_c",
            bad.to_string(),
            "Temperatures must be finite and above absolute zero",
        ));
    }

    let full: f64 = history_c[..whole_days].iter().map(|&t| eq::maturity_factor(t)).sum();
    let partial = if fraction > 0.0 {
        fraction * eq::maturity_factor(history_c[whole_days])
    } else {
        0.0
    };
    Ok(full + partial)
}
