//! Renders the statistics charts into a standalone HTML page.

use std::{fs, io, path::Path};

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::statistics::{
    Aggregate, ChartMode,
    charts::{bar_chart, pie_chart},
};

const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";

/// A report chart with its HTML container ID and ECharts configuration.
struct ReportChart {
    /// The HTML element ID to use for the chart (kebab-case)
    id: &'static str,
    /// The ECharts configuration as a JSON string
    options: String,
}

fn report_charts(mode: ChartMode, aggregate: &Aggregate) -> Vec<ReportChart> {
    match mode {
        ChartMode::Hidden => Vec::new(),
        ChartMode::Pie => vec![
            ReportChart {
                id: "income-pie",
                options: pie_chart("Income", &aggregate.income).to_string(),
            },
            ReportChart {
                id: "expense-pie",
                options: pie_chart("Expenses", &aggregate.expense).to_string(),
            },
        ],
        ChartMode::Bar => vec![
            ReportChart {
                id: "income-bar",
                options: bar_chart("Income", &aggregate.income).to_string(),
            },
            ReportChart {
                id: "expense-bar",
                options: bar_chart("Expenses", &aggregate.expense).to_string(),
            },
        ],
    }
}

/// Make JSON safe to embed in an inline `<script>` element.
///
/// `<` may only appear inside JSON strings, where `\u003c` reads back as the
/// same character, so user text can never close or comment out the element.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

fn charts_script(charts: &[ReportChart]) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chart = echarts.init(document.getElementById("{}"));
                    chart.setOption({});
                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id,
                escape_script_json(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    ))
}

/// Render the charts for `mode` as a complete HTML document.
pub fn render_report(mode: ChartMode, aggregate: &Aggregate) -> Markup {
    let charts = report_charts(mode, aggregate);

    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Statistics - Finance Tracker" }
                script src=(ECHARTS_SCRIPT) {}
                script { (charts_script(&charts)) }
            }

            body
            {
                h1 { "Statistics" }

                @if charts.is_empty() {
                    p { "No chart selected." }
                }

                div style="display: flex; flex-wrap: wrap; gap: 1rem;"
                {
                    @for chart in &charts {
                        div id=(chart.id) style="width: 500px; height: 400px;" {}
                    }
                }
            }
        }
    }
}

/// Write the charts for `mode` to an HTML file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_report(path: &Path, mode: ChartMode, aggregate: &Aggregate) -> io::Result<()> {
    fs::write(path, render_report(mode, aggregate).into_string())?;
    tracing::info!("wrote {mode:?} statistics report to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::statistics::{Aggregate, ChartMode, report::render_report, write_report};

    fn test_aggregate() -> Aggregate {
        Aggregate {
            income: HashMap::from([("Salary".to_owned(), 1000.0)]),
            expense: HashMap::from([("Food".to_owned(), 250.0)]),
        }
    }

    #[test]
    fn pie_report_has_two_pie_containers() {
        let html = render_report(ChartMode::Pie, &test_aggregate()).into_string();

        assert!(html.contains("id=\"income-pie\""));
        assert!(html.contains("id=\"expense-pie\""));
        assert!(!html.contains("income-bar"));
        assert!(html.contains("Salary"));
    }

    #[test]
    fn bar_report_has_two_bar_containers() {
        let html = render_report(ChartMode::Bar, &test_aggregate()).into_string();

        assert!(html.contains("id=\"income-bar\""));
        assert!(html.contains("id=\"expense-bar\""));
        assert!(!html.contains("income-pie"));
    }

    #[test]
    fn category_text_cannot_close_the_script_element() {
        let aggregate = Aggregate {
            income: HashMap::new(),
            expense: HashMap::from([(
                "</script><script>alert(1)</script>".to_owned(),
                10.0,
            )]),
        };

        let html = render_report(ChartMode::Pie, &aggregate).into_string();

        assert_eq!(html.matches("</script>").count(), 2, "got {html}");
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains(r"\u003c/script>\u003cscript>alert(1)"));
    }

    #[test]
    fn hidden_mode_has_no_charts() {
        let html = render_report(ChartMode::Hidden, &Aggregate::default()).into_string();

        assert!(html.contains("No chart selected."));
        assert!(!html.contains("echarts.init"));
    }

    #[test]
    fn writes_report_file() {
        let path = std::env::temp_dir().join(format!(
            "finance-tracker-report-{}.html",
            std::process::id()
        ));

        write_report(&path, ChartMode::Pie, &Aggregate::default()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(contents.starts_with("<!DOCTYPE html>"));
    }
}
