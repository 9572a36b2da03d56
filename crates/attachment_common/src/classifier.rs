//! Attachment style classification.
//!
//! Splits the (anxiety, avoidance) plane at the scale midpoint into four
//! quadrants. A score equal to the threshold counts as high.

use serde::{Deserialize, Serialize};

/// Midpoint of the 1-7 response scale
pub const THRESHOLD: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachmentStyle {
    #[serde(rename = "Secure")]
    Secure,
    #[serde(rename = "Anxious (Preoccupied)")]
    Anxious,
    #[serde(rename = "Avoidant (Dismissive)")]
    Avoidant,
    #[serde(rename = "Fearful-Avoidant (Disorganized)")]
    FearfulAvoidant,
}

impl AttachmentStyle {
    /// Quadrant for a pair of dimension scores
    pub fn from_scores(anxiety: f64, avoidance: f64) -> Self {
        let low_anxiety = anxiety < THRESHOLD;
        let low_avoidance = avoidance < THRESHOLD;
        match (low_anxiety, low_avoidance) {
            (true, true) => AttachmentStyle::Secure,
            (false, true) => AttachmentStyle::Anxious,
            (true, false) => AttachmentStyle::Avoidant,
            (false, false) => AttachmentStyle::FearfulAvoidant,
        }
    }

    /// Display label, also used as the wire value
    pub fn label(&self) -> &'static str {
        match self {
            AttachmentStyle::Secure => "Secure",
            AttachmentStyle::Anxious => "Anxious (Preoccupied)",
            AttachmentStyle::Avoidant => "Avoidant (Dismissive)",
            AttachmentStyle::FearfulAvoidant => "Fearful-Avoidant (Disorganized)",
        }
    }

    pub fn prevalence(&self) -> &'static str {
        match self {
            AttachmentStyle::Secure => "~50% of adults in community samples",
            AttachmentStyle::Anxious => "~20%",
            AttachmentStyle::Avoidant => "~25%",
            AttachmentStyle::FearfulAvoidant => "~5–10%",
        }
    }

    pub fn recommendations(&self) -> [&'static str; 3] {
        match self {
            AttachmentStyle::Secure => [
                "Maintain open communication and healthy boundaries.",
                "Continue investing in supportive relationships.",
                "Practice self-reflection to keep patterns secure under stress.",
            ],
            AttachmentStyle::Anxious => [
                "Build self-soothing routines (breathing, grounding).",
                "Communicate needs clearly without protest behaviors.",
                "Seek consistent, responsive partners or therapists.",
            ],
            AttachmentStyle::Avoidant => [
                "Practice expressing needs and accepting help.",
                "Experiment with gradual intimacy and repair attempts.",
                "Reflect on autonomy vs. connection to find balance.",
            ],
            AttachmentStyle::FearfulAvoidant => [
                "Work on trauma-informed stabilization with a professional.",
                "Develop consistent routines for safety and connection.",
                "Use titrated exposure to intimacy with trusted others.",
            ],
        }
    }
}

impl std::fmt::Display for AttachmentStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Style plus the fixed text that goes with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub style: AttachmentStyle,
    pub prevalence: String,
    pub recommendations: Vec<String>,
}

/// Classify a pair of mean dimension scores.
///
/// NaN is never less than the threshold, so a NaN axis reads as high.
pub fn classify(anxiety: f64, avoidance: f64) -> Classification {
    let style = AttachmentStyle::from_scores(anxiety, avoidance);
    Classification {
        style,
        prevalence: style.prevalence().to_string(),
        recommendations: style
            .recommendations()
            .iter()
            .map(|r| r.to_string())
            .collect(),
    }
}
