pub mod defect;

pub use defect::DefectValidator;
