pub mod generator;
pub mod layout;

pub use generator::ReportGenerator;
