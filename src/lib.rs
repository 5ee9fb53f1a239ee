pub mod assignment;
pub mod employee;
pub mod engine;
pub mod persistence;
pub mod quota;
pub mod report;
pub mod roster;
pub mod scoring;
pub mod validation;

pub use assignment::AssignmentMethod;
pub use employee::Employee;
pub use engine::AssignmentEngine;
pub use report::{RunOutcome, SectionOutcome};
pub use roster::{PreferenceRow, Roster, SectionRoster};
pub use scoring::ScoreWeights;
