use serde::{Deserialize, Serialize};

const FULLY_MET: &str = "Fully Met";

/// One required skill and how well the candidate covers it
/// (`"Fully Met"`, `"Partially Met"`, `"Not Met"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGap {
    #[serde(default)]
    pub skill: String,
    pub status: String,
}

impl SkillGap {
    pub fn is_fully_met(&self) -> bool {
        self.status == FULLY_MET
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallFit {
    Low,
    Moderate,
    High,
}

/// Rates fit by the share of skills fully met: up to 50% is Low, up to 75% Moderate.
/// With no skills to compare against the fit is Moderate.
pub fn calculate_overall_fit(skill_gaps: &[SkillGap]) -> OverallFit {
    if skill_gaps.is_empty() {
        return OverallFit::Moderate;
    }

    let met = skill_gaps.iter().filter(|g| g.is_fully_met()).count();
    let percent = (met as f64 / skill_gaps.len() as f64 * 100.0).round() as u32;

    match percent {
        0..=50 => OverallFit::Low,
        51..=75 => OverallFit::Moderate,
        _ => OverallFit::High,
    }
}
