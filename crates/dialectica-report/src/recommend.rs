//! Rule-derived recommendations.
//!
//! Advisory text keyed on the diagnosis, with overflow rules for extreme
//! metrics.  The branch order mirrors the diagnosis tree: deceptive
//! regimes first, generic equilibrium advice last.

use crate::diagnosis::TrueSystemState;
use crate::report::{Metrics, ParadoxAnalysis};

/// Build the recommendation list for a report.
pub fn recommendations(
    diagnosis: TrueSystemState,
    metrics: Option<&Metrics>,
    paradox: &ParadoxAnalysis,
) -> Vec<String> {
    fn push(out: &mut Vec<String>, lines: &[&str]) {
        out.extend(lines.iter().map(|l| l.to_string()));
    }

    let mut out: Vec<String> = Vec::new();

    match diagnosis {
        TrueSystemState::InsufficientData => {
            push(&mut out, &[
                "Fewer than 100 steps recorded; the diagnosis tree has not engaged",
                "Extend the run before drawing conclusions about the true system state",
            ]);
            return out;
        }
        TrueSystemState::PermanentParadoxicalTranscendence
        | TrueSystemState::IntermittentParadoxicalState => {
            push(&mut out, &[
                "Immediate attention: system is in a paradoxical transcendence state",
                "Re-evaluate fundamental assumptions about system stability",
                "Monitor for meta-paradox escalation",
                "Document all simultaneous extremity events",
            ]);
        }
        TrueSystemState::FalseStabilityRegime => {
            push(&mut out, &[
                "Caution: apparent stability masks underlying extremity",
                "Increase monitoring frequency",
                "Cross-validate the risk index against pole magnitudes",
                "Review historical patterns for similar episodes",
            ]);
        }
        TrueSystemState::SimultaneousExtremityRegime => {
            push(&mut out, &[
                "Warning: both poles operating at extreme values",
                "Prepare for a potential phase transition",
                "Monitor the paradox score closely",
            ]);
        }
        _ => {}
    }

    if let Some(metrics) = metrics {
        if out.is_empty() && metrics.max_xeptqlri > 2.0 {
            push(&mut out, &[
                "Critical: extreme XEPTQLRI values detected",
                "System approaching its theoretical limits",
                "Prepare for a qualitative leap and document all parameters",
            ]);
        } else if out.is_empty() && metrics.stability_deception > 0.5 {
            push(&mut out, &[
                "Deception alert: high stability-deception index",
                "System appears more stable than it is",
                "Re-examine with paradox-aware analysis",
            ]);
        }
    }

    if out.is_empty() {
        match diagnosis {
            TrueSystemState::TrueStability => {
                push(&mut out, &[
                    "System operating in a true stability regime",
                    "Maintain current monitoring protocols",
                    "Run periodic paradox detection checks",
                ]);
            }
            _ => {
                push(&mut out, &[
                    "System in dynamic equilibrium",
                    "Continue standard monitoring",
                    "Watch for paradoxical developments",
                ]);
            }
        }
    }

    if paradox.total_paradox_events > 10 {
        out.push(format!(
            "High paradox event count: {} events recorded",
            paradox.total_paradox_events
        ));
    }
    if let Some(metrics) = metrics {
        if metrics.simultaneous_extremity_score > 0.3 {
            out.push(format!(
                "Simultaneous extremity observed {:.1}% of the time",
                metrics.simultaneous_extremity_score * 100.0
            ));
        }
    }

    out
}
