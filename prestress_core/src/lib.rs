//! # prestress_core - Prestressed Concrete Section Analysis
//!
//! `prestress_core` computes the elastic stress and strain state of a concrete
//! beam cross-section carrying passive and prestressing reinforcement under
//! axial force and bending, with age-dependent concrete strength, stiffness,
//! and creep per EN 1992-1-1. It also runs the Magnel stress-limit check used
//! for preliminary prestress sizing.
//!
//! ## Design Philosophy
//!
//! - **Validated once**: Inputs are checked at construction; derived values are immutable
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Configuration, domain, and numeric failures are distinct variants
//! - **Deterministic**: No shared mutable state; every type is `Send + Sync`
//!
//! ## Quick Start
//!
//! ```rust
//! use prestress_core::calculations::section_analysis::{calculate, SectionAnalysisInput};
//! use prestress_core::calculations::MagnelMoments;
//! use prestress_core::geometry::Rectangular;
//! use prestress_core::loads::Load;
//! use prestress_core::section::Reinforcement;
//!
//! let mut input = SectionAnalysisInput::default();
//! input.section.shape = Rectangular::new(500.0, 1000.0).unwrap().into();
//! input.section.concrete.fck_mpa = 35.0;
//! input.section.reinforcement = Reinforcement {
//!     as1_mm2: 900.0,
//!     as2_mm2: 1800.0,
//!     ap_mm2: 1000.0,
//!     ds1_mm: Some(60.0),
//!     ds2_mm: Some(740.0),
//!     dp_mm: Some(600.0),
//! };
//!
//! // 1350 kN prestress at dp = 600 mm
//! input.load = Load::from_prestress(1.35e6, 600.0, 5.0e8);
//! input.magnel = Some(MagnelMoments::from_prestress(-1.35e6, 600.0, 1.0e8, 5.0e8));
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.passes(), Some(true));
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Concrete (strength, stiffness, creep) and steels
//! - [`geometry`] - Section shapes and their integrals from the top fibre
//! - [`section`] - Reinforced cross-section, homogenization, strain solver
//! - [`calculations`] - Section analysis and Magnel check
//! - [`loads`] - Axial force and moment resultants
//! - [`equations`] - Pure formulas
//! - [`project`] - Project container and settings
//! - [`file_io`] - Atomic saves and file locking
//! - [`errors`] - Structured error types
//! - [`logging`] - Subscriber setup for embedding applications

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod loads;
pub mod logging;
pub mod materials;
pub mod project;
pub mod section;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, SectionAnalysisInput, SectionAnalysisResult};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use section::{CrossSection, CrossSectionInput};
