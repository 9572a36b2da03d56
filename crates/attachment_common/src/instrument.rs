//! Published scale metadata and research citations.
//!
//! Static descriptive data returned verbatim to clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest rating on the published response scale
pub const SCALE_MIN: u8 = 1;

/// Highest rating on the published response scale
pub const SCALE_MAX: u8 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub name: String,
    pub authors: String,
    pub year: u16,
    pub link: String,
}

/// Response scale shown next to the questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleInfo {
    pub min: u8,
    pub max: u8,
    /// Anchor labels keyed by rating (serialized as string keys)
    pub labels: BTreeMap<u8, String>,
    pub citation: Citation,
}

/// True if `score` falls inside the published range
pub fn in_scale(score: f64) -> bool {
    score >= f64::from(SCALE_MIN) && score <= f64::from(SCALE_MAX)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchSource {
    pub title: String,
    pub authors: String,
    pub year: u16,
    pub url: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchInfo {
    pub sources: Vec<ResearchSource>,
    pub disclaimer: String,
}

const ECR_R_URL: &str = "https://labs.psychology.illinois.edu/~rcfraley/measures/ecrr.htm";
const ECR_R_AUTHORS: &str = "Fraley, Waller, & Brennan";

pub fn scale_info() -> ScaleInfo {
    let labels = BTreeMap::from([
        (1, "Strongly disagree".to_string()),
        (4, "Neutral".to_string()),
        (7, "Strongly agree".to_string()),
    ]);
    ScaleInfo {
        min: SCALE_MIN,
        max: SCALE_MAX,
        labels,
        citation: Citation {
            name: "ECR-R (Experiences in Close Relationships – Revised)".to_string(),
            authors: ECR_R_AUTHORS.to_string(),
            year: 2000,
            link: ECR_R_URL.to_string(),
        },
    }
}

pub fn research_info() -> ResearchInfo {
    ResearchInfo {
        sources: vec![
            ResearchSource {
                title: "Experiences in Close Relationships – Revised (ECR-R)".to_string(),
                authors: ECR_R_AUTHORS.to_string(),
                year: 2000,
                url: ECR_R_URL.to_string(),
                note: "Widely used measure for adult attachment, providing anxiety and avoidance dimensions.".to_string(),
            },
            ResearchSource {
                title: "Adult attachment orientations and their relations to romantic relationship functioning".to_string(),
                authors: "Mikulincer & Shaver".to_string(),
                year: 2007,
                url: "https://doi.org/10.1037/0003-066X.61.2.167".to_string(),
                note: "Review summarizing prevalence and behavioral correlates of attachment styles.".to_string(),
            },
        ],
        disclaimer: "This quiz is informational and not a clinical diagnosis. Questions are adapted from research items to keep the experience brief and blind.".to_string(),
    }
}
