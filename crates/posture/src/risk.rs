//! Rule-based screening risk from asymmetry metrics.
//!
//! Each measurement is checked against fixed clinical thresholds. The first
//! (highest) tier it exceeds adds a finding and a fixed number of points to
//! the risk score, and the total selects the risk level.

use std::fmt;

use base::{log_debug, log_info};
use serde::{Deserialize, Serialize};

use crate::metrics::AsymmetryMetrics;

/// Scores at or above this are high risk.
pub const HIGH_RISK_SCORE: u32 = 50;
/// Scores at or above this are medium risk.
pub const MEDIUM_RISK_SCORE: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Normal,
    Mild,
    Moderate,
    Significant,
}

impl FindingSeverity {
    /// Marker shown in front of a finding line.
    pub fn prefix(self) -> &'static str {
        match self {
            FindingSeverity::Significant => "⚠️ ",
            FindingSeverity::Moderate => "◐ ",
            FindingSeverity::Mild => "○ ",
            FindingSeverity::Normal => "✓ ",
        }
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingSeverity::Normal => write!(f, "normal"),
            FindingSeverity::Mild => write!(f, "mild"),
            FindingSeverity::Moderate => write!(f, "moderate"),
            FindingSeverity::Significant => write!(f, "significant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalFinding {
    pub measurement: String,
    pub value: f64,
    pub unit: String,
    pub severity: FindingSeverity,
    pub clinical_context: String,
    pub reference: String,
}

impl ClinicalFinding {
    /// `"◐ Shoulder Height Difference: 3% of torso (MODERATE)"`
    pub fn summary(&self) -> String {
        format!(
            "{}{}: {:.0}{} ({})",
            self.severity.prefix(),
            self.measurement,
            self.value,
            self.unit,
            self.severity.to_string().to_uppercase()
        )
    }

    pub fn context_line(&self) -> String {
        format!("   → {}", self.clinical_context)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn for_score(score: u32) -> Self {
        if score >= HIGH_RISK_SCORE {
            RiskLevel::High
        } else if score >= MEDIUM_RISK_SCORE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Fixed guidance text for this level.
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => &HIGH_RECOMMENDATIONS,
            RiskLevel::Medium => &MEDIUM_RECOMMENDATIONS,
            RiskLevel::Low => &LOW_RECOMMENDATIONS,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Sum of fired tier points; not capped.
    pub risk_score: u32,
    pub findings: Vec<ClinicalFinding>,
    /// Two lines per finding: summary, then indented clinical context.
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

struct Tier {
    /// Fires when the value is strictly greater.
    above: f64,
    severity: FindingSeverity,
    points: u32,
    context: &'static str,
    reference: &'static str,
}

struct Rule {
    measurement: &'static str,
    unit: &'static str,
    value: fn(&AsymmetryMetrics) -> f64,
    /// Highest threshold first.
    tiers: &'static [Tier],
}

const RULES: [Rule; 8] = [
    Rule {
        measurement: "Height Asymmetry Index (HAI)",
        unit: "/100",
        value: |m| m.hai_score,
        tiers: &[
            Tier {
                above: 15.0,
                severity: FindingSeverity::Significant,
                points: 30,
                context: "HAI significantly exceeds the clinical threshold (>10). The HAI \
                          combines shoulder, axillary fold, and waist crease asymmetries - \
                          the same landmarks used in clinical scoliosis screening. This pattern \
                          of multi-level asymmetry is consistent with underlying spinal curvature.",
                reference: "POTSI methodology (Suzuki et al.); HAI clinical threshold studies",
            },
            Tier {
                above: 10.0,
                severity: FindingSeverity::Moderate,
                points: 20,
                context: "HAI exceeds the clinical threshold for pathologic asymmetry (>10). \
                          The POTSI index considers HAI >10 as warranting further evaluation. \
                          This indicates combined asymmetry across multiple torso landmarks.",
                reference: "POTSI methodology; HAI threshold = 10",
            },
            Tier {
                above: 5.0,
                severity: FindingSeverity::Mild,
                points: 5,
                context: "HAI within normal range. Minor asymmetries across shoulder, axilla, \
                          and waist levels are common in the general population.",
                reference: "POTSI normal range",
            },
        ],
    },
    Rule {
        measurement: "Waist Crease Asymmetry",
        unit: "% of torso",
        value: |m| m.waist_height_diff_pct,
        tiers: &[
            Tier {
                above: 3.0,
                severity: FindingSeverity::Significant,
                points: 15,
                context: "Significant waist crease height difference. Uneven waist creases \
                          are a classic sign of lumbar or thoracolumbar scoliosis. This asymmetry \
                          often correlates with the apex of lumbar curves.",
                reference: "Clinical examination: waist crease asymmetry in scoliosis",
            },
            Tier {
                above: 1.5,
                severity: FindingSeverity::Moderate,
                points: 8,
                context: "Moderate waist crease asymmetry detected. The waist may appear \
                          flattened on one side, which clinicians look for during physical \
                          examination for scoliosis.",
                reference: "SRS clinical examination guidelines",
            },
        ],
    },
    Rule {
        measurement: "Axillary Fold Asymmetry",
        unit: "% of torso",
        value: |m| m.axilla_height_diff_pct,
        tiers: &[
            // top axilla tier is reported as moderate
            Tier {
                above: 2.5,
                severity: FindingSeverity::Moderate,
                points: 10,
                context: "The axillary folds (armpit creases) show height asymmetry. Research \
                          shows this reflects underlying torso asymmetry and correlates with \
                          thoracic curve severity. The shoulder girdle compensates for torso \
                          deformity, making axillae position a useful indicator.",
                reference: "Post-operative shoulder imbalance studies; axilla position research",
            },
            Tier {
                above: 1.0,
                severity: FindingSeverity::Mild,
                points: 4,
                context: "Minor axillary fold height difference. This is included in the HAI \
                          calculation as one of three key torso landmarks.",
                reference: "HAI methodology",
            },
        ],
    },
    Rule {
        measurement: "Shoulder Height Difference",
        unit: "% of torso",
        value: |m| m.shoulder_height_diff_pct,
        tiers: &[
            Tier {
                above: 4.0,
                severity: FindingSeverity::Significant,
                points: 15,
                context: "Exceeds clinical threshold for shoulder imbalance. \
                          This level of asymmetry is uncommon in the general population and \
                          may indicate underlying spinal curvature. Studies show shoulder \
                          asymmetry correlates with thoracic curve magnitude.",
                reference: "Kuklo et al. (2006); Akel et al. shoulder imbalance studies",
            },
            Tier {
                above: 2.0,
                severity: FindingSeverity::Moderate,
                points: 8,
                context: "Moderate shoulder height difference detected. \
                          About 28% of healthy adolescents show this level of asymmetry. \
                          While not diagnostic alone, combined with other findings it may \
                          warrant further evaluation.",
                reference: "Kuklo et al. (2006) shoulder imbalance threshold",
            },
            Tier {
                above: 1.0,
                severity: FindingSeverity::Mild,
                points: 3,
                context: "Within normal variation. Studies show only 19% of adolescents \
                          have perfectly level shoulders. This level of asymmetry is common \
                          and typically not clinically significant.",
                reference: "Akel et al. photographic shoulder assessment",
            },
        ],
    },
    Rule {
        measurement: "Trunk Shift (Coronal Balance)",
        unit: "% of shoulder width",
        value: |m| m.trunk_shift_pct,
        tiers: &[
            Tier {
                above: 7.5,
                severity: FindingSeverity::Significant,
                points: 35,
                context: "Significant lateral trunk deviation. The Scoliosis \
                          Research Society classifies this as Type B/C imbalance. This level \
                          of lateral trunk deviation strongly suggests underlying spinal \
                          curvature and requires clinical evaluation.",
                reference: "SRS coronal balance classification; European Spine Journal (2018)",
            },
            Tier {
                above: 5.0,
                severity: FindingSeverity::Moderate,
                points: 20,
                context: "Moderate trunk decompensation detected. \
                          This indicates the upper body is shifted laterally relative to \
                          the pelvis, which may indicate compensatory posturing for an \
                          underlying spinal curve.",
                reference: "Scoliosis Research Society decompensation criteria",
            },
            Tier {
                above: 2.5,
                severity: FindingSeverity::Mild,
                points: 5,
                context: "Minor lateral shift detected. This is within normal postural \
                          variation and may be influenced by stance, muscle fatigue, or \
                          habitual posture rather than structural deformity.",
                reference: "Coronal balance assessment guidelines",
            },
        ],
    },
    Rule {
        measurement: "Hip/Pelvic Height Difference",
        unit: "% of torso",
        value: |m| m.hip_height_diff_pct,
        tiers: &[
            Tier {
                above: 3.0,
                severity: FindingSeverity::Significant,
                points: 20,
                context: "Significant pelvic obliquity detected. This may indicate \
                          leg length discrepancy (functional or structural) or compensatory \
                          changes from lumbar spinal curvature. Pelvic obliquity can both \
                          cause and result from scoliosis.",
                reference: "Pelvic obliquity in scoliosis assessment literature",
            },
            Tier {
                above: 1.5,
                severity: FindingSeverity::Moderate,
                points: 10,
                context: "Moderate pelvic obliquity. May indicate mild leg length \
                          difference or habitual standing posture. Worth noting but \
                          not diagnostic alone.",
                reference: "Pelvic assessment in postural screening",
            },
        ],
    },
    Rule {
        measurement: "Shoulder Rotation Asymmetry",
        unit: "ratio",
        value: |m| m.shoulder_rotation_score,
        tiers: &[Tier {
            above: 0.08,
            severity: FindingSeverity::Moderate,
            points: 10,
            context: "Detected rotational asymmetry in the shoulders, suggesting \
                      one shoulder may be more forward than the other. This can \
                      indicate thoracic rotation associated with scoliosis, though \
                      photo-based detection has limitations.",
            reference: "3D postural assessment methodology",
        }],
    },
    Rule {
        measurement: "Hip Rotation Asymmetry",
        unit: "ratio",
        value: |m| m.hip_rotation_score,
        tiers: &[Tier {
            above: 0.08,
            severity: FindingSeverity::Moderate,
            points: 10,
            context: "Detected rotational asymmetry in the hips/pelvis. This may \
                      indicate pelvic rotation which can accompany lumbar curves.",
            reference: "Pelvic rotation assessment",
        }],
    },
];

const HIGH_RECOMMENDATIONS: [&str; 4] = [
    "CLINICAL EVALUATION RECOMMENDED: Multiple significant asymmetries detected \
     that exceed clinical thresholds used in scoliosis screening programs.",
    "These findings suggest possible underlying spinal curvature. While photo-based \
     screening cannot measure Cobb angle (requires X-ray), the pattern of asymmetries \
     is consistent with what clinicians look for during physical examination.",
    "NEXT STEPS: Consult a healthcare provider (orthopedist, physiatrist, or spine \
     specialist) for clinical examination. They may recommend standing spine X-rays \
     to measure actual curvature if warranted.",
    "IMPORTANT: Early detection in adolescents (ages 10-18) is crucial as curves can \
     progress during growth spurts. Treatment options are most effective when started early.",
];

const MEDIUM_RECOMMENDATIONS: [&str; 4] = [
    "MONITORING ADVISED: Some postural asymmetries detected that approach or exceed \
     clinical screening thresholds.",
    "These findings alone are not diagnostic but may warrant attention, especially in \
     growing adolescents or if you've noticed changes in posture, uneven shoulders, \
     or clothing fitting differently.",
    "SUGGESTED ACTIONS: (1) Retake this screening in 4-6 weeks to monitor for changes. \
     (2) Consider a clinical screening exam (Adams forward bend test) by a healthcare \
     provider. (3) Watch for progression of any asymmetry.",
    "CONTEXT: School scoliosis screening programs look for similar asymmetries. A \
     scoliometer reading >7° (roughly equivalent to visible trunk rotation) typically \
     triggers referral for X-ray evaluation.",
];

const LOW_RECOMMENDATIONS: [&str; 4] = [
    "REASSURING FINDINGS: Your postural measurements fall within normal variation \
     seen in the general population.",
    "CONTEXT: Studies show only 19% of adolescents have perfectly symmetrical shoulders, \
     and minor postural variations are common and typically not clinically significant.",
    "MAINTENANCE: Continue good posture habits and general physical activity. \
     Core strengthening and flexibility exercises support spinal health.",
    "FOLLOW-UP: Consider repeating this screening in 6-12 months, especially during \
     adolescent growth periods, to monitor for any changes.",
];

const NO_FINDINGS: [&str; 2] = [
    "✓ No significant postural asymmetries detected",
    "   → All measurements within normal population variation",
];

pub fn assess(metrics: &AsymmetryMetrics) -> RiskAssessment {
    let mut findings = Vec::new();
    let mut risk_score = 0;

    for rule in &RULES {
        let value = (rule.value)(metrics);
        let Some(tier) = rule.tiers.iter().find(|tier| value > tier.above) else {
            continue;
        };
        log_debug!(
            "{} {} > {} ({}, +{})",
            rule.measurement,
            value,
            tier.above,
            tier.severity,
            tier.points
        );
        risk_score += tier.points;
        findings.push(ClinicalFinding {
            measurement: rule.measurement.to_string(),
            value,
            unit: rule.unit.to_string(),
            severity: tier.severity,
            clinical_context: tier.context.to_string(),
            reference: tier.reference.to_string(),
        });
    }

    let mut risk_factors: Vec<String> = findings
        .iter()
        .flat_map(|finding| [finding.summary(), finding.context_line()])
        .collect();

    let risk_level = RiskLevel::for_score(risk_score);
    if risk_level == RiskLevel::Low && findings.is_empty() {
        risk_factors.extend(NO_FINDINGS.iter().map(|line| line.to_string()));
    }

    log_info!(
        "risk {} (score {}, {} findings)",
        risk_level,
        risk_score,
        findings.len()
    );

    RiskAssessment {
        risk_level,
        risk_score,
        findings,
        risk_factors,
        recommendations: risk_level
            .recommendations()
            .iter()
            .map(|line| line.to_string())
            .collect(),
    }
}
