//! Scoring collaborator boundary.
//!
//! The scoring engines are external: text in, findings out. Their results
//! arrive as JSON in one of two shapes (a numeric per-principle score, or a
//! findings list per principle). That shape difference is resolved exactly
//! once, here, into a tagged union — downstream code never inspects raw
//! collaborator objects.

use serde::{Deserialize, Serialize};
use vellum_model::{Block, Inline, ParagraphBlock, Spacing, StyleFlags, TextRun};

/// Full result set from a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub overall_score: f64,
    #[serde(default)]
    pub principles: Vec<PrincipleResult>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// One principle's outcome, in either of the shapes the engines produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PrincipleResult {
    /// Numeric score with free-form detail lines.
    #[serde(rename_all = "camelCase")]
    Score {
        name: String,
        score: f64,
        #[serde(default)]
        details: Vec<String>,
    },
    /// Qualitative evaluation with located findings.
    #[serde(rename_all = "camelCase")]
    Evaluation {
        name: String,
        #[serde(default)]
        findings: Vec<Finding>,
    },
}

/// One located finding within the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub message: String,
    #[serde(default)]
    pub excerpt: Option<String>,
}

/// Deserialize a collaborator result from its JSON wire form.
pub fn parse_report(json: &str) -> Result<AnalysisReport, serde_json::Error> {
    serde_json::from_str(json)
}

/// Render a report as an appendix block sequence for analysis-mode exports.
pub fn report_blocks(report: &AnalysisReport) -> Vec<Block> {
    let mut blocks = Vec::new();

    blocks.push(heading(1, "Analysis Report"));
    blocks.push(paragraph(&format!(
        "Overall score: {:.0} / 100",
        report.overall_score
    )));

    for principle in &report.principles {
        match principle {
            PrincipleResult::Score {
                name,
                score,
                details,
            } => {
                blocks.push(heading(2, name));
                blocks.push(paragraph(&format!("Score: {score:.0}")));
                for detail in details {
                    blocks.push(paragraph(detail));
                }
            }
            PrincipleResult::Evaluation { name, findings } => {
                blocks.push(heading(2, name));
                for finding in findings {
                    let line = match &finding.excerpt {
                        Some(excerpt) => format!("{} \u{2014} \u{201C}{excerpt}\u{201D}", finding.message),
                        None => finding.message.clone(),
                    };
                    blocks.push(paragraph(&line));
                }
            }
        }
    }

    if !report.recommendations.is_empty() {
        blocks.push(heading(2, "Recommendations"));
        for recommendation in &report.recommendations {
            blocks.push(paragraph(recommendation));
        }
    }

    blocks
}

fn heading(level: u8, text: &str) -> Block {
    let runs = TextRun::plain(text)
        .map(|run| vec![Inline::Run(run)])
        .unwrap_or_default();
    Block::Paragraph(ParagraphBlock::heading(level, runs))
}

fn paragraph(text: &str) -> Block {
    let runs = TextRun::sanitized(text, StyleFlags::default())
        .map(|run| vec![Inline::Run(run)])
        .unwrap_or_default();
    Block::Paragraph(ParagraphBlock {
        runs,
        spacing: Spacing::new(None, Some(200)),
        ..ParagraphBlock::default()
    })
}
