//! # Section Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`section_analysis`] - Stresses, strains, and creep of a prestressed section
//! - [`magnel`] - Transfer and service fibre stress limits

pub mod magnel;
pub mod section_analysis;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

pub use magnel::{FibreCheck, MagnelMoments, MagnelResult};
pub use section_analysis::{SectionAnalysisInput, SectionAnalysisResult};

/// Enum wrapper for all calculation types.
///
/// Stores heterogeneous calculations in a single project collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Prestressed section analysis
    SectionAnalysis(SectionAnalysisInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::SectionAnalysis(s) => &s.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::SectionAnalysis(_) => "SectionAnalysis",
        }
    }

    /// Run the calculation
    pub fn run(&self) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::SectionAnalysis(input) => {
                section_analysis::calculate(input).map(CalculationOutput::SectionAnalysis)
            }
        }
    }
}

impl From<SectionAnalysisInput> for CalculationItem {
    fn from(input: SectionAnalysisInput) -> Self {
        CalculationItem::SectionAnalysis(input)
    }
}

/// Result of running a [`CalculationItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    SectionAnalysis(SectionAnalysisResult),
}
