//! # Section Geometry
//!
//! Concrete cross-section shapes and their exact geometric integrals from the
//! top fibre. Depths are measured downward from the top fibre in mm.
//!
//! Every shape implements [`SectionGeometry`]. Shapes supply their height,
//! width function, perimeter, and unchecked integrals; the trait supplies the
//! range-checked accessors and whole-section values.
//!
//! ## Shapes
//!
//! - [`Rectangular`] - solid rectangle b × h
//! - [`Flanged`] - T-section with an optional linear taper under the flange
//!
//! ## JSON Serialization
//!
//! [`SectionShape`] carries a "type" discriminator:
//!
//! ```json
//! { "type": "Rectangular", "width_mm": 300.0, "height_mm": 800.0 }
//!
//! { "type": "Flanged", "flange_width_mm": 1200.0, "height_mm": 900.0,
//!   "flange_thickness_mm": 150.0, "taper_height_mm": 100.0, "web_width_mm": 300.0 }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use prestress_core::geometry::{Rectangular, SectionGeometry};
//!
//! let rect = Rectangular::new(300.0, 800.0).unwrap();
//! assert_eq!(rect.brute_area(), 240_000.0);
//! assert_eq!(rect.y_centroid(), 400.0);
//!
//! // Integrals stop at the requested depth
//! assert_eq!(rect.area_to(200.0).unwrap(), 60_000.0);
//! assert!(rect.area_to(900.0).is_err());
//! ```

pub mod flanged;
pub mod rectangular;

pub use flanged::Flanged;
pub use rectangular::Rectangular;

use serde::{Deserialize, Serialize};

use crate::equations::section::{centroidal_inertia, notional_size};
use crate::errors::{CalcError, CalcResult};

/// Area, first moment, and second moment of the part of a section above a
/// given depth, all about the top fibre.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionIntegrals {
    /// A(y) (mm²)
    pub area: f64,
    /// Q(y) (mm³)
    pub first_moment: f64,
    /// I(y) (mm⁴)
    pub inertia: f64,
}

/// Geometric capability set of a cross-section shape.
///
/// Implementors provide the five required methods; `integrals_unchecked` and
/// `width_unchecked` may assume `0 ≤ y ≤ height()`.
pub trait SectionGeometry {
    /// Total section height h (mm)
    fn height(&self) -> f64;

    /// Maximum width (mm)
    fn max_width(&self) -> f64;

    /// Width at depth `y`, with `y` already within [0, h]
    fn width_unchecked(&self, y: f64) -> f64;

    /// A(y), Q(y), I(y) with `y` already within [0, h]
    fn integrals_unchecked(&self, y: f64) -> SectionIntegrals;

    /// Perimeter of the section outline (mm)
    fn perimeter(&self) -> f64;

    /// Reject depths outside [0, h] with a DomainError
    fn check_depth(&self, y: f64) -> CalcResult<f64> {
        let h = self.height();
        if y.is_nan() || y < 0.0 || y > h {
            return Err(CalcError::domain(
                "y",
                y.to_string(),
                format!("Depth must lie within the section [0, {}]", h),
            ));
        }
        Ok(y)
    }

    /// All three integrals down to depth `y`
    fn integrals_to(&self, y: f64) -> CalcResult<SectionIntegrals> {
        let y = self.check_depth(y)?;
        Ok(self.integrals_unchecked(y))
    }

    /// Area between the top fibre and depth `y` (mm²)
    fn area_to(&self, y: f64) -> CalcResult<f64> {
        Ok(self.integrals_to(y)?.area)
    }

    /// First moment about the top fibre of the area above depth `y` (mm³)
    fn first_moment_to(&self, y: f64) -> CalcResult<f64> {
        Ok(self.integrals_to(y)?.first_moment)
    }

    /// Second moment about the top fibre of the area above depth `y` (mm⁴)
    fn inertia_to(&self, y: f64) -> CalcResult<f64> {
        Ok(self.integrals_to(y)?.inertia)
    }

    /// Width at depth `y` (mm)
    fn width_at(&self, y: f64) -> CalcResult<f64> {
        let y = self.check_depth(y)?;
        Ok(self.width_unchecked(y))
    }

    /// Whole-section integrals
    fn full_integrals(&self) -> SectionIntegrals {
        self.integrals_unchecked(self.height())
    }

    /// Gross concrete area (mm²)
    fn brute_area(&self) -> f64 {
        self.full_integrals().area
    }

    /// Horizontal centroid from the left edge; shapes are symmetric (mm)
    fn x_centroid(&self) -> f64 {
        self.max_width() / 2.0
    }

    /// Vertical centroid depth from the top fibre (mm)
    fn y_centroid(&self) -> f64 {
        let full = self.full_integrals();
        full.first_moment / full.area
    }

    /// Second moment of the whole section about the top fibre (mm⁴)
    fn inertia_top(&self) -> f64 {
        self.full_integrals().inertia
    }

    /// Second moment about the horizontal centroidal axis (mm⁴)
    fn inertia_centroidal(&self) -> f64 {
        let full = self.full_integrals();
        centroidal_inertia(full.inertia, full.area, full.first_moment / full.area)
    }

    /// Notional size h0 = 2A/u (mm)
    fn notional_size(&self) -> f64 {
        notional_size(self.brute_area(), self.perimeter())
    }
}

/// Any supported section shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SectionShape {
    /// Solid rectangle
    Rectangular(Rectangular),
    /// T-section with optional taper
    Flanged(Flanged),
}

impl SectionShape {
    /// Validate shape dimensions
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            SectionShape::Rectangular(r) => r.validate(),
            SectionShape::Flanged(f) => f.validate(),
        }
    }

    /// Borrow the shape as a trait object
    pub fn as_geometry(&self) -> &dyn SectionGeometry {
        match self {
            SectionShape::Rectangular(r) => r,
            SectionShape::Flanged(f) => f,
        }
    }

    /// Shape name for display and logging
    pub fn shape_name(&self) -> &'static str {
        match self {
            SectionShape::Rectangular(_) => "Rectangular",
            SectionShape::Flanged(_) => "Flanged",
        }
    }

    /// Summary of the gross (unreinforced) section
    pub fn summary(&self) -> GeometrySummary {
        let g = self.as_geometry();
        let full = g.full_integrals();
        GeometrySummary {
            shape: self.shape_name().to_string(),
            height_mm: g.height(),
            area_mm2: full.area,
            first_moment_top_mm3: full.first_moment,
            inertia_top_mm4: full.inertia,
            x_centroid_mm: g.x_centroid(),
            y_centroid_mm: g.y_centroid(),
            inertia_centroidal_mm4: g.inertia_centroidal(),
            perimeter_mm: g.perimeter(),
            notional_size_mm: g.notional_size(),
        }
    }
}

impl SectionGeometry for SectionShape {
    fn height(&self) -> f64 {
        self.as_geometry().height()
    }

    fn max_width(&self) -> f64 {
        self.as_geometry().max_width()
    }

    fn width_unchecked(&self, y: f64) -> f64 {
        self.as_geometry().width_unchecked(y)
    }

    fn integrals_unchecked(&self, y: f64) -> SectionIntegrals {
        self.as_geometry().integrals_unchecked(y)
    }

    fn perimeter(&self) -> f64 {
        self.as_geometry().perimeter()
    }
}

impl Default for SectionShape {
    fn default() -> Self {
        SectionShape::Rectangular(Rectangular::default())
    }
}

impl From<Rectangular> for SectionShape {
    fn from(shape: Rectangular) -> Self {
        SectionShape::Rectangular(shape)
    }
}

impl From<Flanged> for SectionShape {
    fn from(shape: Flanged) -> Self {
        SectionShape::Flanged(shape)
    }
}

/// Gross section properties reported alongside analysis results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    pub shape: String,
    pub height_mm: f64,
    pub area_mm2: f64,
    pub first_moment_top_mm3: f64,
    pub inertia_top_mm4: f64,
    pub x_centroid_mm: f64,
    pub y_centroid_mm: f64,
    pub inertia_centroidal_mm4: f64,
    pub perimeter_mm: f64,
    pub notional_size_mm: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_shape() {
        let shape = SectionShape::default();
        assert_eq!(shape.height(), 1000.0);
        assert_eq!(shape.brute_area(), 500_000.0);
    }

    #[test]
    fn test_depth_outside_section_is_domain_error() {
        let shape = SectionShape::default();
        for y in [-1.0, 1000.5, f64::NAN] {
            let err = shape.area_to(y).unwrap_err();
            assert_eq!(err.error_code(), "DOMAIN_ERROR");
        }
        assert!(shape.inertia_to(0.0).is_ok());
        assert!(shape.first_moment_to(1000.0).is_ok());
    }

    #[test]
    fn test_enum_delegates_to_shape() {
        let flanged = Flanged::new(1200.0, 900.0, 150.0, 100.0, 300.0).unwrap();
        let shape: SectionShape = flanged.into();
        assert_eq!(shape.brute_area(), flanged.brute_area());
        assert_eq!(shape.perimeter(), flanged.perimeter());
        assert_eq!(shape.width_at(50.0).unwrap(), 1200.0);
    }

    #[test]
    fn test_summary() {
        let shape: SectionShape = Rectangular::new(300.0, 800.0).unwrap().into();
        let summary = shape.summary();
        assert_eq!(summary.shape, "Rectangular");
        assert_relative_eq!(summary.inertia_centroidal_mm4, 300.0 * 800.0_f64.powi(3) / 12.0, max_relative = 1e-12);
        assert_relative_eq!(summary.notional_size_mm, 2.0 * 240_000.0 / 2_200.0);
        assert_eq!(summary.x_centroid_mm, 150.0);
    }

    #[test]
    fn test_shape_serialization() {
        let shape: SectionShape = Flanged::new(1200.0, 900.0, 150.0, 0.0, 300.0).unwrap().into();
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"type\":\"Flanged\""));
        let parsed: SectionShape = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, parsed);

        let rect: SectionShape = serde_json::from_str(r#"{ "type": "Rectangular", "width_mm": 300.0 }"#).unwrap();
        assert_eq!(rect.height(), 1000.0);
    }
}
