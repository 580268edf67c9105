//! # Cross-Section Integral Formulas
//!
//! Closed-form integrals of a section's width function measured from the top
//! fibre. All depths `y` are positive downward from the top fibre, so every
//! first and second moment here is taken about the top fibre, not the
//! centroid.
//!
//! ## Notation
//!
//! - `A(y)` = area between the top fibre and depth y = ∫ b(s) ds
//! - `Q(y)` = first moment of that area about the top fibre = ∫ b(s)·s ds
//! - `I(y)` = second moment of that area about the top fibre = ∫ b(s)·s² ds
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Chapter 3
//! - EN 1992-1-1 Annex B (notional size h0 = 2Ac/u)

// =============================================================================
// RECTANGULAR SECTION INTEGRALS
// Constant width b from the top fibre down to depth y
// =============================================================================

/// Area of a rectangle of width `b` down to depth `y`
///
/// # Formula
/// A(y) = b·y
#[inline]
pub fn rectangular_area_to(b: f64, y: f64) -> f64 {
    b * y
}

/// First moment about the top fibre of a rectangle down to depth `y`
///
/// # Formula
/// Q(y) = b·y²/2
///
/// # Example
/// ```rust
/// use prestress_core::equations::section::rectangular_first_moment_to;
///
/// let q = rectangular_first_moment_to(300.0, 800.0);
/// assert_eq!(q, 300.0 * 800.0 * 800.0 / 2.0);
/// ```
#[inline]
pub fn rectangular_first_moment_to(b: f64, y: f64) -> f64 {
    b * y.powi(2) / 2.0
}

/// Second moment about the top fibre of a rectangle down to depth `y`
///
/// ```text
///   ─────────── ← top fibre (axis of I)
///   │         │
/// y │         │
///   │         │
///   └─────────┘
///        b
/// ```
///
/// # Formula
/// I(y) = b·y³/3
///
/// Note this is about the top edge; the centroidal value is b·y³/12.
#[inline]
pub fn rectangular_inertia_to(b: f64, y: f64) -> f64 {
    b * y.powi(3) / 3.0
}

// =============================================================================
// LINEARLY-VARYING WIDTH SEGMENT
// Shared helper for flange, taper, and web portions of flanged sections
// =============================================================================

/// A horizontal slice of a section whose width varies linearly with depth.
///
/// The slice starts at depth `y0` with width `b0` and ends at depth
/// `y0 + depth` with width `b1`:
///
/// ```text
///  y0         ┌───────b0───────┐
///              \              /
///  y0+depth     └─────b1─────┘
/// ```
///
/// Width inside the slice: b(y) = b0 + (b1 − b0)·(y − y0)/depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthSegment {
    /// Depth of the upper edge from the top fibre
    pub y0: f64,
    /// Vertical extent of the segment
    pub depth: f64,
    /// Width at the upper edge
    pub b0: f64,
    /// Width at the lower edge
    pub b1: f64,
}

impl WidthSegment {
    /// Create a segment spanning `depth` below `y0`
    pub fn new(y0: f64, depth: f64, b0: f64, b1: f64) -> Self {
        WidthSegment { y0, depth, b0, b1 }
    }

    /// Depth of the lower edge from the top fibre
    #[inline]
    pub fn y_end(&self) -> f64 {
        self.y0 + self.depth
    }

    /// Width at depth y (clamped to the segment)
    pub fn width_at(&self, y: f64) -> f64 {
        if self.depth <= 0.0 {
            return self.b0;
        }
        let y = y.clamp(self.y0, self.y_end());
        self.b0 + (self.b1 - self.b0) * (y - self.y0) / self.depth
    }

    /// Write the width as b(y) = c + s·y in absolute depth
    #[inline]
    fn coefficients(&self) -> (f64, f64) {
        let slope = (self.b1 - self.b0) / self.depth;
        (self.b0 - slope * self.y0, slope)
    }

    /// Clamp y to the segment; returns None for a zero-depth segment
    #[inline]
    fn upper_limit(&self, y: f64) -> Option<f64> {
        if self.depth > 0.0 {
            Some(y.clamp(self.y0, self.y_end()))
        } else {
            None
        }
    }
}

/// Area of the part of `segment` lying above depth `y`
///
/// # Formula
/// With b(s) = c + k·s:
/// A = c·(y − y0) + k·(y² − y0²)/2
///
/// Depths above the segment contribute nothing; depths below it return the
/// full segment area. A zero-depth segment contributes nothing.
pub fn segment_area_to(segment: &WidthSegment, y: f64) -> f64 {
    let Some(y) = segment.upper_limit(y) else {
        return 0.0;
    };
    let (c, k) = segment.coefficients();
    let y0 = segment.y0;
    c * (y - y0) + k * (y.powi(2) - y0.powi(2)) / 2.0
}

/// First moment about the top fibre of the part of `segment` above depth `y`
///
/// # Formula
/// Q = c·(y² − y0²)/2 + k·(y³ − y0³)/3
pub fn segment_first_moment_to(segment: &WidthSegment, y: f64) -> f64 {
    let Some(y) = segment.upper_limit(y) else {
        return 0.0;
    };
    let (c, k) = segment.coefficients();
    let y0 = segment.y0;
    c * (y.powi(2) - y0.powi(2)) / 2.0 + k * (y.powi(3) - y0.powi(3)) / 3.0
}

/// Second moment about the top fibre of the part of `segment` above depth `y`
///
/// # Formula
/// I = c·(y³ − y0³)/3 + k·(y⁴ − y0⁴)/4
pub fn segment_inertia_to(segment: &WidthSegment, y: f64) -> f64 {
    let Some(y) = segment.upper_limit(y) else {
        return 0.0;
    };
    let (c, k) = segment.coefficients();
    let y0 = segment.y0;
    c * (y.powi(3) - y0.powi(3)) / 3.0 + k * (y.powi(4) - y0.powi(4)) / 4.0
}

/// Length of one sloped side of a symmetric trapezoidal segment
///
/// Each side steps in by (b0 − b1)/2 horizontally over the segment depth.
#[inline]
pub fn segment_side_length(segment: &WidthSegment) -> f64 {
    let step = (segment.b0 - segment.b1).abs() / 2.0;
    step.hypot(segment.depth)
}

// =============================================================================
// WHOLE-SECTION RELATIONS
// =============================================================================

/// Transfer a top-fibre second moment to the centroidal axis
///
/// # Formula
/// I0 = I_top − A·y_c²  (parallel axis theorem)
#[inline]
pub fn centroidal_inertia(inertia_top: f64, area: f64, y_centroid: f64) -> f64 {
    inertia_top - area * y_centroid.powi(2)
}

/// Notional size used in creep and shrinkage models
///
/// # Formula
/// h0 = 2·Ac/u, with u the perimeter exposed to drying
///
/// # Reference
/// - EN 1992-1-1 §3.1.4(5)
#[inline]
pub fn notional_size(area: f64, perimeter: f64) -> f64 {
    2.0 * area / perimeter
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangular_integrals() {
        assert_eq!(rectangular_area_to(300.0, 800.0), 240_000.0);
        assert_eq!(rectangular_first_moment_to(300.0, 800.0), 96_000_000.0);
        assert_eq!(rectangular_inertia_to(300.0, 800.0), 300.0 * 800.0_f64.powi(3) / 3.0);
    }

    #[test]
    fn test_constant_segment_matches_rectangle() {
        // A segment with b0 == b1 starting at the top is a rectangle
        let seg = WidthSegment::new(0.0, 800.0, 300.0, 300.0);
        for y in [0.0, 123.0, 400.0, 800.0] {
            assert_relative_eq!(segment_area_to(&seg, y), rectangular_area_to(300.0, y), max_relative = 1e-12);
            assert_relative_eq!(
                segment_first_moment_to(&seg, y),
                rectangular_first_moment_to(300.0, y),
                max_relative = 1e-12
            );
            assert_relative_eq!(
                segment_inertia_to(&seg, y),
                rectangular_inertia_to(300.0, y),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_trapezoid_area_and_centroid() {
        // Trapezoid 600 wide at y=200 narrowing to 200 at y=300
        let seg = WidthSegment::new(200.0, 100.0, 600.0, 200.0);
        let area = segment_area_to(&seg, 300.0);
        assert_relative_eq!(area, (600.0 + 200.0) / 2.0 * 100.0, max_relative = 1e-12);

        // Centroid of a trapezoid from its wide side: h(b0 + 2b1)/(3(b0 + b1))
        let yc_local = 100.0 * (600.0 + 2.0 * 200.0) / (3.0 * (600.0 + 200.0));
        let q = segment_first_moment_to(&seg, 300.0);
        assert_relative_eq!(q / area, 200.0 + yc_local, max_relative = 1e-12);
    }

    #[test]
    fn test_segment_outside_limits() {
        let seg = WidthSegment::new(200.0, 100.0, 600.0, 200.0);
        assert_eq!(segment_area_to(&seg, 150.0), 0.0);
        assert_relative_eq!(segment_area_to(&seg, 1000.0), segment_area_to(&seg, 300.0));
        assert_relative_eq!(segment_inertia_to(&seg, 1000.0), segment_inertia_to(&seg, 300.0));
    }

    #[test]
    fn test_zero_depth_segment_is_empty() {
        let seg = WidthSegment::new(200.0, 0.0, 600.0, 200.0);
        assert_eq!(segment_area_to(&seg, 500.0), 0.0);
        assert_eq!(segment_first_moment_to(&seg, 500.0), 0.0);
        assert_eq!(segment_inertia_to(&seg, 500.0), 0.0);
        assert_eq!(seg.width_at(200.0), 600.0);
    }

    #[test]
    fn test_width_at_interpolates() {
        let seg = WidthSegment::new(200.0, 100.0, 600.0, 200.0);
        assert_relative_eq!(seg.width_at(250.0), 400.0);
        assert_relative_eq!(seg.width_at(300.0), 200.0);
    }

    #[test]
    fn test_segment_side_length() {
        // Steps in 200 each side over 150 deep: 3-4-5 triangle scaled by 50
        let seg = WidthSegment::new(0.0, 150.0, 600.0, 200.0);
        assert_relative_eq!(segment_side_length(&seg), 250.0);
    }

    #[test]
    fn test_centroidal_inertia_of_rectangle() {
        let (b, h) = (300.0, 800.0);
        let i0 = centroidal_inertia(rectangular_inertia_to(b, h), b * h, h / 2.0);
        assert_relative_eq!(i0, b * h.powi(3) / 12.0, max_relative = 1e-12);
    }

    #[test]
    fn test_notional_size() {
        // 300 x 800 rectangle: 2 * 240000 / 2200
        assert_relative_eq!(notional_size(240_000.0, 2_200.0), 218.181818, max_relative = 1e-6);
    }
}
