//! T-shaped (flanged) section
//!
//! ```text
//!   ┌─────────────── b ───────────────┐  y = 0
//!   │             flange              │  t1
//!   └──────┐                   ┌──────┘  y = t1
//!           \      taper      /          t2 (may be zero)
//!            └───┐       ┌───┘           y = t1 + t2
//!                │  web  │
//!                │       │
//!                └── t ──┘               y = h
//! ```
//!
//! The section is integrated as three [`WidthSegment`]s: a constant-width
//! flange, a linearly narrowing taper, and a constant-width web.

use serde::{Deserialize, Serialize};

use super::{SectionGeometry, SectionIntegrals};
use crate::equations::section::{
    segment_area_to, segment_first_moment_to, segment_inertia_to, segment_side_length, WidthSegment,
};
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};

/// T-section with an optional taper between flange and web
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flanged {
    /// Flange width b (mm)
    pub flange_width_mm: f64,
    /// Total height h (mm)
    pub height_mm: f64,
    /// Flange thickness t1 (mm)
    pub flange_thickness_mm: f64,
    /// Taper height t2 (mm), zero for a square re-entrant corner
    pub taper_height_mm: f64,
    /// Web width t (mm)
    pub web_width_mm: f64,
}

impl Default for Flanged {
    fn default() -> Self {
        Flanged {
            flange_width_mm: 1000.0,
            height_mm: 1000.0,
            flange_thickness_mm: 200.0,
            taper_height_mm: 0.0,
            web_width_mm: 300.0,
        }
    }
}

impl Flanged {
    /// Create a validated flanged section
    pub fn new(
        flange_width_mm: f64,
        height_mm: f64,
        flange_thickness_mm: f64,
        taper_height_mm: f64,
        web_width_mm: f64,
    ) -> CalcResult<Self> {
        let section = Flanged {
            flange_width_mm,
            height_mm,
            flange_thickness_mm,
            taper_height_mm,
            web_width_mm,
        };
        section.validate()?;
        Ok(section)
    }

    /// Check dimensions: `0 < t1 < t1 + t2 < h`, `t2 ≥ 0`, `0 < t ≤ b`
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("flange_width_mm", self.flange_width_mm)?;
        require_positive("height_mm", self.height_mm)?;
        require_positive("flange_thickness_mm", self.flange_thickness_mm)?;
        require_finite("taper_height_mm", self.taper_height_mm)?;
        require_positive("web_width_mm", self.web_width_mm)?;

        if self.taper_height_mm < 0.0 {
            return Err(CalcError::configuration(
                "taper_height_mm",
                self.taper_height_mm.to_string(),
                "Taper height cannot be negative",
            ));
        }
        if self.web_width_mm > self.flange_width_mm {
            return Err(CalcError::configuration(
                "web_width_mm",
                self.web_width_mm.to_string(),
                format!("Web width cannot exceed the flange width ({})", self.flange_width_mm),
            ));
        }
        if self.web_start() >= self.height_mm {
            return Err(CalcError::configuration(
                "flange_thickness_mm",
                self.flange_thickness_mm.to_string(),
                format!(
                    "Flange plus taper ({}) must be less than the section height ({})",
                    self.web_start(),
                    self.height_mm
                ),
            ));
        }
        Ok(())
    }

    /// Depth at which the web begins (t1 + t2)
    pub fn web_start(&self) -> f64 {
        self.flange_thickness_mm + self.taper_height_mm
    }

    /// Flange, taper, and web segments from top to bottom
    pub fn segments(&self) -> [WidthSegment; 3] {
        let b = self.flange_width_mm;
        let t = self.web_width_mm;
        let t1 = self.flange_thickness_mm;
        let web_start = self.web_start();
        [
            WidthSegment::new(0.0, t1, b, b),
            WidthSegment::new(t1, self.taper_height_mm, b, t),
            WidthSegment::new(web_start, self.height_mm - web_start, t, t),
        ]
    }
}

impl SectionGeometry for Flanged {
    fn height(&self) -> f64 {
        self.height_mm
    }

    fn max_width(&self) -> f64 {
        self.flange_width_mm
    }

    fn width_unchecked(&self, y: f64) -> f64 {
        let [flange, taper, web] = self.segments();
        if y <= flange.y_end() {
            flange.width_at(y)
        } else if y <= taper.y_end() {
            taper.width_at(y)
        } else {
            web.width_at(y)
        }
    }

    fn integrals_unchecked(&self, y: f64) -> SectionIntegrals {
        self.segments()
            .iter()
            .fold(SectionIntegrals::default(), |acc, seg| SectionIntegrals {
                area: acc.area + segment_area_to(seg, y),
                first_moment: acc.first_moment + segment_first_moment_to(seg, y),
                inertia: acc.inertia + segment_inertia_to(seg, y),
            })
    }

    fn perimeter(&self) -> f64 {
        let [_, taper, web] = self.segments();
        self.flange_width_mm
            + 2.0 * self.flange_thickness_mm
            + 2.0 * segment_side_length(&taper)
            + 2.0 * web.depth
            + self.web_width_mm
    }
}
