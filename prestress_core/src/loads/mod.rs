//! Section actions
//!
//! Loads are resultants on the cross-section: an axial force N and a bending
//! moment M taken about the top fibre.
//!
//! # Sign Convention
//!
//! - N < 0 is compression (a prestress force P acts as N = −P)
//! - M > 0 produces tension at the bottom fibre
//! - Strain and stress are negative in compression
//!
//! # Example
//!
//! ```
//! use prestress_core::loads::{total_moment, Load};
//!
//! // 1350 kN prestress at 600 mm depth with a 500 kN·m external moment
//! let n = -1.35e6;
//! let load = Load::new(n, total_moment(5.0e8, n, 600.0));
//! assert_eq!(load.m_nmm, 5.0e8 - 8.1e8);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, CalcResult};

/// Axial force and moment about the top fibre
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Load {
    /// Axial force N (N), compression negative
    pub n_n: f64,
    /// Moment about the top fibre M (N·mm)
    pub m_nmm: f64,
}

impl Load {
    pub fn new(n_n: f64, m_nmm: f64) -> Self {
        Load { n_n, m_nmm }
    }

    /// Prestress force `p_n` (positive magnitude) at depth `dp_mm` combined
    /// with an external moment about the top fibre.
    pub fn from_prestress(p_n: f64, dp_mm: f64, external_moment_nmm: f64) -> Self {
        let n = -p_n;
        Load::new(n, total_moment(external_moment_nmm, n, dp_mm))
    }

    /// Same axial force with a different moment
    pub fn with_moment(self, m_nmm: f64) -> Self {
        Load { m_nmm, ..self }
    }

    /// Both components must be finite
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("n_n", self.n_n)?;
        require_finite("m_nmm", self.m_nmm)?;
        Ok(())
    }

    /// True when both components are zero
    pub fn is_zero(&self) -> bool {
        self.n_n == 0.0 && self.m_nmm == 0.0
    }
}

/// Total moment about the top fibre: external moment plus the moment of an
/// axial force acting at depth `dp_mm`.
///
/// # Formula
/// M = M_ext + N·dp
#[inline]
pub fn total_moment(external_moment_nmm: f64, n_n: f64, dp_mm: f64) -> f64 {
    external_moment_nmm + n_n * dp_mm
}
