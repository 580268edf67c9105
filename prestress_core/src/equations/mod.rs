//! # Prestressed Concrete Equations
//!
//! Pure formulas used by the material, geometry, and section modules. Keeping
//! them in one place makes each one easy to check against its reference.
//!
//! ## Modules
//!
//! - [`concrete`] - Strength development, stiffness, and creep (EN 1992-1-1)
//! - [`section`] - Width-function integrals from the top fibre
//!
//! ## Sign Conventions
//!
//! - **Depth y**: Measured downward from the top fibre
//! - **Axial force**: Negative in compression
//! - **Moment**: Taken about the top fibre; positive causes tension at the bottom
//! - **Strain/stress**: Negative in compression
//!
//! ## Units
//!
//! mm, N, MPa (N/mm²), days
//!
//! ## References
//!
//! - EN 1992-1-1:2004 Eurocode 2: Design of concrete structures
//! - Roark's Formulas for Stress and Strain, 8th Edition

pub mod concrete;
pub mod section;

pub use concrete::{
    bcc, beta_c, beta_fcm, beta_h, beta_t0, cement_adjusted_age, ecm, ecm_t, fcm, fctm, maturity_factor,
    nonlinear_creep_factor, phi_rh,
};
pub use section::{
    centroidal_inertia, notional_size, rectangular_area_to, rectangular_first_moment_to, rectangular_inertia_to,
    segment_area_to, segment_first_moment_to, segment_inertia_to, WidthSegment,
};
