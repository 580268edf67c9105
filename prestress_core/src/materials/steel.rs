//! Reinforcing and Prestressing Steel
//!
//! Immutable value objects for the two steels a prestressed section carries.
//! Only the properties the elastic section analysis needs are modelled:
//! characteristic strength, elastic modulus, and partial safety factor.

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcResult};

/// Passive (ordinary) reinforcement steel
///
/// ## JSON Example
///
/// ```json
/// { "fyk_mpa": 500.0, "es_mpa": 210000.0, "gamma_s": 1.15 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReinforcementSteel {
    /// Characteristic yield strength fyk (MPa)
    pub fyk_mpa: f64,
    /// Elastic modulus Es (MPa)
    pub es_mpa: f64,
    /// Partial safety factor γs
    pub gamma_s: f64,
}

impl Default for ReinforcementSteel {
    fn default() -> Self {
        ReinforcementSteel {
            fyk_mpa: 500.0,
            es_mpa: 210_000.0,
            gamma_s: 1.15,
        }
    }
}

impl ReinforcementSteel {
    /// Create a steel with the given strength and modulus and the default γs
    pub fn new(fyk_mpa: f64, es_mpa: f64) -> Self {
        ReinforcementSteel {
            fyk_mpa,
            es_mpa,
            ..Default::default()
        }
    }

    /// Validate that all properties are positive and finite
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("fyk_mpa", self.fyk_mpa)?;
        require_positive("es_mpa", self.es_mpa)?;
        require_positive("gamma_s", self.gamma_s)?;
        Ok(())
    }

    /// Design yield strength fyd = fyk/γs
    pub fn fyd_mpa(&self) -> f64 {
        self.fyk_mpa / self.gamma_s
    }

    /// Modular ratio against a concrete modulus
    pub fn modular_ratio(&self, ec_mpa: f64) -> f64 {
        self.es_mpa / ec_mpa
    }
}

/// Prestressing steel (strand, wire, or bar)
///
/// ## JSON Example
///
/// ```json
/// { "fpk_mpa": 1860.0, "ep_mpa": 195000.0, "gamma_p": 1.15 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrestressSteel {
    /// Characteristic tensile strength fpk (MPa)
    pub fpk_mpa: f64,
    /// Elastic modulus Ep (MPa)
    pub ep_mpa: f64,
    /// Partial safety factor γp
    pub gamma_p: f64,
}

impl Default for PrestressSteel {
    fn default() -> Self {
        PrestressSteel {
            fpk_mpa: 1860.0,
            ep_mpa: 195_000.0,
            gamma_p: 1.15,
        }
    }
}

impl PrestressSteel {
    /// Create a steel with the given strength and modulus and the default γp
    pub fn new(fpk_mpa: f64, ep_mpa: f64) -> Self {
        PrestressSteel {
            fpk_mpa,
            ep_mpa,
            ..Default::default()
        }
    }

    /// Validate that all properties are positive and finite
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("fpk_mpa", self.fpk_mpa)?;
        require_positive("ep_mpa", self.ep_mpa)?;
        require_positive("gamma_p", self.gamma_p)?;
        Ok(())
    }

    /// Design strength fpd = fpk/γp
    pub fn fpd_mpa(&self) -> f64 {
        self.fpk_mpa / self.gamma_p
    }

    /// Modular ratio against a concrete modulus
    pub fn modular_ratio(&self, ec_mpa: f64) -> f64 {
        self.ep_mpa / ec_mpa
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let s = ReinforcementSteel::default();
        assert_eq!(s.fyk_mpa, 500.0);
        assert_eq!(s.es_mpa, 210_000.0);
        assert_eq!(s.gamma_s, 1.15);

        let p = PrestressSteel::default();
        assert_eq!(p.fpk_mpa, 1860.0);
        assert_eq!(p.ep_mpa, 195_000.0);
        assert_eq!(p.gamma_p, 1.15);
    }

    #[test]
    fn test_design_strengths() {
        assert_relative_eq!(ReinforcementSteel::default().fyd_mpa(), 434.78, epsilon = 0.01);
        assert_relative_eq!(PrestressSteel::default().fpd_mpa(), 1617.39, epsilon = 0.01);
    }

    #[test]
    fn test_modular_ratio() {
        let s = ReinforcementSteel::new(400.0, 200_000.0);
        assert_relative_eq!(s.modular_ratio(25_000.0), 8.0);
    }

    #[test]
    fn test_validation() {
        assert!(ReinforcementSteel::default().validate().is_ok());
        assert!(ReinforcementSteel::new(-1.0, 200_000.0).validate().is_err());
        assert!(PrestressSteel::new(1860.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let p: PrestressSteel = serde_json::from_str(r#"{ "fpk_mpa": 1770.0 }"#).unwrap();
        assert_eq!(p.fpk_mpa, 1770.0);
        assert_eq!(p.ep_mpa, 195_000.0);
    }
}
