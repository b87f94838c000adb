use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

use crate::runner::{RunSummary, SessionRecord};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}

/// Write the markdown and JSON summaries for a finished run.
pub fn write_summary(
    summary: &RunSummary,
    records: &[SessionRecord],
    summary_md: &Path,
    summary_json: &Path,
) -> Result<(), ReportError> {
    for path in [summary_md, summary_json] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ReportError::Io {
                    context: "creating summary directory",
                    source: e,
                })?;
            }
        }
    }

    fs::write(summary_md, render_markdown(summary, records)).map_err(|e| ReportError::Io {
        context: "writing summary markdown",
        source: e,
    })?;

    let json = serde_json::to_string_pretty(summary)?;
    fs::write(summary_json, json).map_err(|e| ReportError::Io {
        context: "writing summary json",
        source: e,
    })?;

    Ok(())
}

fn render_markdown(summary: &RunSummary, records: &[SessionRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Simulation summary: {}\n\n", summary.run_id));
    out.push_str(
        "| Sessions | Entities | Correct | Accuracy | Mean questions | 95% CI | p vs chance |\n",
    );
    out.push_str("|---|---|---|---|---|---|---|\n");
    out.push_str(&format!(
        "| {sessions} | {entities} | {correct} | {accuracy:.1}% | {mean:.2} | [{ci_low:.2}, {ci_high:.2}] | {pval:.4} |\n\n",
        sessions = summary.sessions,
        entities = summary.entity_count,
        correct = summary.correct,
        accuracy = summary.accuracy * 100.0,
        mean = summary.mean_questions,
        ci_low = summary.ci95_questions.0,
        ci_high = summary.ci95_questions.1,
        pval = summary.p_value_vs_chance,
    ));

    out.push_str("## Questions per session\n\n");
    out.push_str("| Questions | Sessions |\n");
    out.push_str("|---|---|\n");
    for (questions, count) in question_counts(records) {
        out.push_str(&format!("| {questions} | {count} |\n"));
    }
    out
}

fn question_counts(records: &[SessionRecord]) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.questions_asked).or_insert(0) += 1;
    }
    counts
}

/// Bar chart of questions asked per session.
///
/// plotters can panic on hosts without usable font support, so rendering
/// runs under `catch_unwind` with the panic hook silenced.
pub fn render_histogram(
    records: &[SessionRecord],
    plots_dir: &Path,
) -> Result<PathBuf, ReportError> {
    if !plots_dir.as_os_str().is_empty() {
        fs::create_dir_all(plots_dir).map_err(|e| ReportError::Io {
            context: "creating plots directory",
            source: e,
        })?;
    }

    let output_path = plots_dir.join("questions_hist.png");
    let counts = question_counts(records);

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));

    let plot_attempt = std::panic::catch_unwind(move || {
        let root = BitMapBackend::new(&output_path, (800, 480)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ReportError::Plot(e.to_string()))?;

        let x_max = counts.keys().max().copied().unwrap_or(0) + 1;
        let y_max = counts.values().max().copied().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption("Questions asked per session", ("sans-serif", 22))
            .set_label_area_size(LabelAreaPosition::Left, 50)
            .set_label_area_size(LabelAreaPosition::Bottom, 60)
            .build_cartesian_2d(0..x_max + 1, 0..y_max + 1)
            .map_err(|e| ReportError::Plot(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .y_desc("Sessions")
            .x_desc("Questions asked")
            .draw()
            .map_err(|e| ReportError::Plot(e.to_string()))?;

        chart
            .draw_series(counts.iter().map(|(&questions, &count)| {
                Rectangle::new([(questions, 0), (questions + 1, count)], BLUE.filled())
            }))
            .map_err(|e| ReportError::Plot(e.to_string()))?;

        drop(chart);

        root.present()
            .map_err(|e| ReportError::Plot(e.to_string()))?;

        drop(root);

        Ok(output_path)
    });

    std::panic::set_hook(prev_hook);

    match plot_attempt {
        Ok(result) => result,
        Err(_) => Err(ReportError::Plot(
            "plotters panicked while rendering (missing font support?)".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{render_markdown, write_summary};
    use crate::runner::{RunSummary, SessionRecord};

    fn sample() -> (RunSummary, Vec<SessionRecord>) {
        let records = vec![
            SessionRecord {
                secret: "Dog".to_string(),
                guessed: Some("Dog".to_string()),
                correct: true,
                questions_asked: 3,
                reached_threshold: true,
            },
            SessionRecord {
                secret: "Cat".to_string(),
                guessed: Some("Cat".to_string()),
                correct: true,
                questions_asked: 3,
                reached_threshold: false,
            },
        ];
        let summary = RunSummary {
            run_id: "unit".to_string(),
            sessions: 2,
            entity_count: 5,
            correct: 2,
            accuracy: 1.0,
            mean_questions: 3.0,
            ci95_questions: (3.0, 3.0),
            p_value_vs_chance: 0.001,
        };
        (summary, records)
    }

    #[test]
    fn markdown_tabulates_question_distribution() {
        let (summary, records) = sample();
        let markdown = render_markdown(&summary, &records);
        assert!(markdown.contains("# Simulation summary: unit"));
        assert!(markdown.contains("| 2 | 5 | 2 | 100.0% |"));
        assert!(markdown.contains("| 3 | 2 |"));
    }

    #[test]
    fn summary_files_land_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let md = dir.path().join("nested/summary.md");
        let json = dir.path().join("nested/summary.json");
        let (summary, records) = sample();

        write_summary(&summary, &records, &md, &json).expect("summary written");

        assert!(md.exists());
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).expect("json readable"))
                .expect("json parses");
        assert_eq!(parsed["sessions"], 2);
        assert_eq!(parsed["run_id"], "unit");
    }
}
