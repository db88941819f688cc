//! Rendering of experiment outcomes.
//!
//! The text layout has three blocks: what was observed, what was true, and
//! what each estimator predicted. Predictions carry their percentage
//! difference from the truth; estimators without a definite value say why.

use serde::Serialize;
use std::io::{self, Write};
use tank_sim_core::{CaptureArea, Outcome, SampleSummary};

/// Write the human-readable report.
pub fn write_text<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    let (x1, y1) = outcome.area.origin();
    let (x2, y2) = outcome.area.far_corner();

    writeln!(out, "OBSERVATION")?;
    writeln!(out, "Capture area: ({},{}), ({},{})", x1, y1, x2, y2)?;
    writeln!(out, "Number of captured units (k): {}", outcome.summary.size)?;
    match outcome.summary.max_serial {
        Some(m) => writeln!(out, "Largest serial number captured (m): {}", m)?,
        None => writeln!(out, "Largest serial number captured (m): none")?,
    }

    writeln!(out)?;
    writeln!(out, "REALITY")?;
    writeln!(out, "Number of units: {}", outcome.population_size)?;

    writeln!(out)?;
    writeln!(out, "PREDICTIONS")?;
    for prediction in &outcome.predictions {
        let label = prediction.estimator.label();
        match (&prediction.result, prediction.relative_difference()) {
            (Ok(value), Some(diff)) => writeln!(out, "{}: {:.2} ({:.4} %)", label, value, diff)?,
            (Err(err), _) => writeln!(out, "{}: undefined ({})", label, err)?,
            (Ok(value), None) => writeln!(out, "{}: {:.2}", label, value)?,
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    seed: u64,
    population_size: u64,
    capture_area: JsonArea,
    sample: &'a SampleSummary,
    predictions: Vec<JsonPrediction>,
}

#[derive(Debug, Serialize)]
struct JsonArea {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl From<&CaptureArea> for JsonArea {
    fn from(area: &CaptureArea) -> Self {
        let (x1, y1) = area.origin();
        let (x2, y2) = area.far_corner();
        Self { x1, y1, x2, y2 }
    }
}

#[derive(Debug, Serialize)]
struct JsonPrediction {
    estimator: &'static str,
    predicted: Option<f64>,
    truth: u64,
    difference_percent: Option<f64>,
    undefined_reason: Option<String>,
}

/// Write the outcome as one JSON document.
pub fn write_json<W: Write>(out: &mut W, outcome: &Outcome, seed: u64) -> io::Result<()> {
    let report = JsonReport {
        seed,
        population_size: outcome.population_size,
        capture_area: JsonArea::from(&outcome.area),
        sample: &outcome.summary,
        predictions: outcome
            .predictions
            .iter()
            .map(|p| JsonPrediction {
                estimator: p.estimator.label(),
                predicted: p.result.as_ref().ok().copied(),
                truth: p.truth,
                difference_percent: p.relative_difference(),
                undefined_reason: p.result.as_ref().err().map(ToString::to_string),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tank_sim_core::{
        CaptureConfig, Experiment, ExperimentConfig, GeneratorConfig, ScriptedRandom,
    };

    fn outcome(units: &[(f64, f64)]) -> Outcome {
        let experiment = Experiment::new(ExperimentConfig {
            generator: GeneratorConfig::new(1, 100),
            capture: CaptureConfig::new(0.25),
        })
        .unwrap();
        experiment
            .run(&mut ScriptedRandom::for_experiment(units, (0.25, 0.25)))
            .unwrap()
    }

    #[test]
    fn test_text_report() {
        let outcome = outcome(&[(0.3, 0.3), (0.4, 0.4), (0.9, 0.9), (0.45, 0.3), (0.1, 0.1)]);
        let mut buf = Vec::new();
        write_text(&mut buf, &outcome).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Number of captured units (k): 3"));
        assert!(text.contains("Largest serial number captured (m): 4"));
        assert!(text.contains("Number of units: 5"));
        // 4 + 4/3 - 1 = 4
        assert!(text.contains("Frequentist: 4.00 (22.2222 %)"));
        assert!(text.contains("Bayesian mean: 6.00"));
    }

    #[test]
    fn test_text_report_undefined() {
        let outcome = outcome(&[(0.9, 0.9)]);
        let mut buf = Vec::new();
        write_text(&mut buf, &outcome).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("(m): none"));
        assert!(text.contains(
            "Frequentist: undefined (Frequentist needs at least 1 observed units, got 0)"
        ));
        assert!(text.contains("Bayesian mean: undefined"));
    }

    #[test]
    fn test_json_report() {
        let outcome = outcome(&[(0.3, 0.3), (0.9, 0.9)]);
        let mut buf = Vec::new();
        write_json(&mut buf, &outcome, 99).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["seed"], 99);
        assert_eq!(value["population_size"], 2);
        assert_eq!(value["sample"]["size"], 1);
        assert_eq!(value["sample"]["max_serial"], 1);
        assert_eq!(value["predictions"][0]["estimator"], "Frequentist");
        assert_eq!(value["predictions"][0]["predicted"], 1.0);
        assert!(value["predictions"][1]["predicted"].is_null());
        assert!(value["predictions"][1]["undefined_reason"].is_string());
    }
}
