//! # Materials
//!
//! Material models for prestressed concrete sections.
//!
//! ## Material Types
//!
//! - **Concrete**: Age-dependent strength, stiffness, and creep per EN 1992-1-1
//! - **Reinforcement steel**: Passive bars (fyk, Es, γs)
//! - **Prestressing steel**: Strand, wire, or bar (fpk, Ep, γp)
//!
//! ## Example
//!
//! ```rust
//! use prestress_core::materials::{Concrete, ConcreteInput, PrestressSteel, ReinforcementSteel};
//!
//! let concrete = Concrete::new(ConcreteInput::default()).unwrap();
//! let bars = ReinforcementSteel::default();
//! let strand = PrestressSteel::default();
//!
//! // Homogenization ratios against the short-term modulus
//! let n_s = bars.modular_ratio(concrete.ecm());
//! let n_p = strand.modular_ratio(concrete.ecm());
//! assert!(n_s > n_p);
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::{CementClass, Concrete, ConcreteInput, ConcreteProperties};
pub use steel::{PrestressSteel, ReinforcementSteel};
