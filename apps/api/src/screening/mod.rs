//! Screening helpers run over extracted resume text: pulls out experience and
//! education lines and rates overall fit from a skill-gap breakdown.

pub mod fit;
pub mod handlers;
pub mod resume_text;

pub use fit::{calculate_overall_fit, OverallFit, SkillGap};
pub use resume_text::{parse_education, parse_experience, ParsedLine};
