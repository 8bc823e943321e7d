pub mod case;
pub mod placeholder;
pub mod types;

pub use case::{CaseData, DemandType, Exhibit, MedicalExpense, SupportedFact};
pub use types::Section;
