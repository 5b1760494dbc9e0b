use axum::Json;
use serde::{Deserialize, Serialize};

use crate::screening::{
    calculate_overall_fit, parse_education, parse_experience, OverallFit, ParsedLine, SkillGap,
};

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub resume_text: String,
    #[serde(default)]
    pub skill_gaps: Vec<SkillGap>,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub experience: Vec<ParsedLine>,
    pub education: Vec<ParsedLine>,
    pub overall_fit: OverallFit,
}

/// POST /api/v1/screening/parse
pub async fn handle_parse(Json(req): Json<ParseRequest>) -> Json<ParseResponse> {
    Json(ParseResponse {
        experience: parse_experience(&req.resume_text),
        education: parse_education(&req.resume_text),
        overall_fit: calculate_overall_fit(&req.skill_gaps),
    })
}
