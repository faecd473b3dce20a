pub mod analyze;
pub mod fetch;
pub mod ratio;
pub mod rmsd;
