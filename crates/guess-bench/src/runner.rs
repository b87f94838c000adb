use anyhow::{Context, bail};
use guess_core::engine::Engine;
use guess_core::model::catalog::Catalog;
use guess_core::model::serialization::CatalogSnapshot;
use guess_core::model::starter::starter_catalog;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SimulationConfig};
use crate::oracle::Oracle;

const DEFAULT_SEED: u64 = 0x6D64_6775;
const CONFIDENCE_Z: f64 = 1.96; // 95% CI

/// Outcome of one simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub secret: String,
    pub guessed: Option<String>,
    pub correct: bool,
    pub questions_asked: usize,
    pub reached_threshold: bool,
}

/// Aggregate statistics for a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub sessions: usize,
    pub entity_count: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mean_questions: f64,
    pub ci95_questions: (f64, f64),
    /// One-sided p-value that the run beats uniform-random guessing,
    /// via the normal approximation of the binomial.
    pub p_value_vs_chance: f64,
}

/// Plays the engine against a scripted oracle for every session.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
    catalog: Catalog,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> anyhow::Result<Self> {
        let catalog = match config.knowledge.as_ref() {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading knowledge file at {}", path.display()))?;
                CatalogSnapshot::from_json(&json)
                    .with_context(|| format!("parsing knowledge file at {}", path.display()))?
                    .restore()
            }
            None => starter_catalog(),
        };

        if catalog.entity_count() == 0 {
            bail!("knowledge catalog has no entities to guess");
        }

        Ok(Self {
            config,
            outputs,
            catalog,
        })
    }

    pub fn outputs(&self) -> &ResolvedOutputs {
        &self.outputs
    }

    pub fn entity_count(&self) -> usize {
        self.catalog.entity_count()
    }

    pub fn run(&self) -> anyhow::Result<(RunSummary, Vec<SessionRecord>)> {
        let seed = self.config.sessions.seed.unwrap_or(DEFAULT_SEED);
        let mut rng = StdRng::seed_from_u64(seed);

        let count = self.config.sessions.count;
        let mut records = Vec::with_capacity(count);
        for index in 0..count {
            let record = self.play_session(&mut rng);
            event!(
                target: "guess_bench::session",
                Level::INFO,
                index,
                secret = %record.secret,
                guessed = record.guessed.as_deref().unwrap_or("-"),
                correct = record.correct,
                questions = record.questions_asked,
                reached_threshold = record.reached_threshold,
            );
            records.push(record);
        }

        let summary = summarize(&self.config.run_id, self.catalog.entity_count(), &records);
        Ok((summary, records))
    }

    /// One engine-vs-oracle session over a private copy of the catalog.
    fn play_session(&self, rng: &mut StdRng) -> SessionRecord {
        let sessions = &self.config.sessions;
        let secret_index = rng.gen_range(0..self.catalog.entity_count());
        let secret = self.catalog.entities()[secret_index].clone();
        let oracle = Oracle::new(&secret, sessions.unknown_rate);

        let mut catalog = self.catalog.clone();
        let mut engine = Engine::new(&mut catalog);
        let mut asked = 0usize;
        let mut reached_threshold = false;
        let mut guessed: Option<String> = None;

        while asked < sessions.max_questions {
            if let Some(candidate) = engine.best_guess() {
                if candidate.probability >= sessions.guess_threshold {
                    reached_threshold = true;
                    guessed = Some(candidate.name);
                    break;
                }
            }

            let Some(question_id) = engine.best_question().map(str::to_string) else {
                break;
            };
            let answer = oracle.answer(&question_id, rng);
            engine.update_probabilities(&question_id, answer);
            asked += 1;
        }

        if guessed.is_none() {
            guessed = engine.best_guess().map(|candidate| candidate.name);
        }
        let correct = guessed.as_deref() == Some(secret.name());

        SessionRecord {
            secret: secret.name().to_string(),
            guessed,
            correct,
            questions_asked: asked,
            reached_threshold,
        }
    }
}

fn summarize(run_id: &str, entity_count: usize, records: &[SessionRecord]) -> RunSummary {
    let sessions = records.len();
    let correct = records.iter().filter(|record| record.correct).count();
    let accuracy = if sessions > 0 {
        correct as f64 / sessions as f64
    } else {
        0.0
    };

    let questions: Vec<f64> = records
        .iter()
        .map(|record| record.questions_asked as f64)
        .collect();
    let mean_questions = if questions.is_empty() {
        0.0
    } else {
        questions.iter().sum::<f64>() / questions.len() as f64
    };

    RunSummary {
        run_id: run_id.to_string(),
        sessions,
        entity_count,
        correct,
        accuracy,
        mean_questions,
        ci95_questions: confidence_interval(&questions),
        p_value_vs_chance: p_value_vs_chance(sessions, correct, entity_count),
    }
}

fn confidence_interval(points: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean = points.iter().sum::<f64>() / points.len() as f64;
    if points.len() == 1 {
        return (mean, mean);
    }
    let variance = points
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (points.len() as f64 - 1.0);
    let std_error = (variance / points.len() as f64).sqrt();
    let margin = CONFIDENCE_Z * std_error;
    (mean - margin, mean + margin)
}

fn p_value_vs_chance(sessions: usize, correct: usize, entity_count: usize) -> f64 {
    if sessions == 0 || entity_count == 0 {
        return 1.0;
    }
    let chance = 1.0 / entity_count as f64;
    let variance = sessions as f64 * chance * (1.0 - chance);
    if variance <= 0.0 {
        return 1.0;
    }
    let z = (correct as f64 - sessions as f64 * chance) / variance.sqrt();
    let normal = Normal::new(0.0, 1.0).unwrap();
    1.0 - normal.cdf(z)
}

#[cfg(test)]
mod tests {
    use super::{SimulationRunner, confidence_interval, p_value_vs_chance};
    use crate::config::SimulationConfig;

    fn config_yaml(sessions: usize, seed: u64, unknown_rate: f64) -> SimulationConfig {
        let yaml = format!(
            r#"
run_id: "unit"
sessions:
  seed: {seed}
  count: {sessions}
  max_questions: 20
  unknown_rate: {unknown_rate}
outputs:
  summary_md: "out/summary.md"
  summary_json: "out/summary.json"
  plots_dir: "out/plots"
"#
        );
        let mut cfg: SimulationConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
        cfg.validate().expect("config validates");
        cfg
    }

    #[test]
    fn noiseless_oracle_is_always_identified() {
        let config = config_yaml(24, 1234, 0.0);
        let outputs = config.resolved_outputs();
        let runner = SimulationRunner::new(config, outputs).expect("starter catalog loads");

        let (summary, records) = runner.run().expect("simulation completes");
        assert_eq!(summary.sessions, 24);
        assert_eq!(summary.correct, 24);
        assert!((summary.accuracy - 1.0).abs() < 1e-12);
        assert!(summary.mean_questions > 0.0);
        assert!(summary.mean_questions <= 8.0);
        assert!(summary.p_value_vs_chance < 0.001);
        assert!(records.iter().all(|record| record.correct));
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let build = || {
            let config = config_yaml(12, 99, 0.25);
            let outputs = config.resolved_outputs();
            SimulationRunner::new(config, outputs).expect("runner")
        };
        let (_, first) = build().run().expect("first run");
        let (_, second) = build().run().expect("second run");

        let secrets: Vec<_> = first.iter().map(|record| record.secret.clone()).collect();
        let again: Vec<_> = second.iter().map(|record| record.secret.clone()).collect();
        assert_eq!(secrets, again);
        assert_eq!(
            first.iter().map(|r| r.questions_asked).collect::<Vec<_>>(),
            second.iter().map(|r| r.questions_asked).collect::<Vec<_>>()
        );
    }

    #[test]
    fn confidence_interval_brackets_the_mean() {
        let (low, high) = confidence_interval(&[2.0, 4.0, 6.0, 8.0]);
        assert!(low < 5.0 && 5.0 < high);
        assert_eq!(confidence_interval(&[3.0]), (3.0, 3.0));
        assert_eq!(confidence_interval(&[]), (0.0, 0.0));
    }

    #[test]
    fn perfect_accuracy_has_a_tiny_p_value() {
        let p = p_value_vs_chance(32, 32, 5);
        assert!(p < 1e-6);
        assert_eq!(p_value_vs_chance(0, 0, 5), 1.0);
        assert_eq!(p_value_vs_chance(10, 10, 1), 1.0);
    }
}
