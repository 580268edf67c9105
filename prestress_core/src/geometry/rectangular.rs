//! Solid rectangular section

use serde::{Deserialize, Serialize};

use super::{SectionGeometry, SectionIntegrals};
use crate::equations::section::{rectangular_area_to, rectangular_first_moment_to, rectangular_inertia_to};
use crate::errors::{require_positive, CalcResult};

/// Rectangle of width b and height h
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rectangular {
    /// Width b (mm)
    pub width_mm: f64,
    /// Height h (mm)
    pub height_mm: f64,
}

impl Default for Rectangular {
    fn default() -> Self {
        Rectangular {
            width_mm: 500.0,
            height_mm: 1000.0,
        }
    }
}

impl Rectangular {
    /// Create a validated rectangle
    pub fn new(width_mm: f64, height_mm: f64) -> CalcResult<Self> {
        let rect = Rectangular { width_mm, height_mm };
        rect.validate()?;
        Ok(rect)
    }

    /// Both dimensions must be positive and finite
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("width_mm", self.width_mm)?;
        require_positive("height_mm", self.height_mm)?;
        Ok(())
    }
}

impl SectionGeometry for Rectangular {
    fn height(&self) -> f64 {
        self.height_mm
    }

    fn max_width(&self) -> f64 {
        self.width_mm
    }

    fn width_unchecked(&self, _y: f64) -> f64 {
        self.width_mm
    }

    fn integrals_unchecked(&self, y: f64) -> SectionIntegrals {
        SectionIntegrals {
            area: rectangular_area_to(self.width_mm, y),
            first_moment: rectangular_first_moment_to(self.width_mm, y),
            inertia: rectangular_inertia_to(self.width_mm, y),
        }
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.width_mm + self.height_mm)
    }
}
