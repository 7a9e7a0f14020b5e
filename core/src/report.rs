use std::{fmt::Write, fs, path::Path};

use anyhow::{anyhow, Context, Result};

pub const DEFAULT_REPORT_TEMPLATE: &str = r"# Report Figures

<!-- SECTION:overview start -->
<!-- Describe what the figures illustrate and where they are used in the report. -->
<!-- SECTION:overview end -->

## Configuration

<!-- SECTION:configuration start -->
<!-- Populated automatically with the parameters from the latest run. -->
<!-- SECTION:configuration end -->

## Figures

<!-- SECTION:figures start -->
<!-- Populated automatically with a thumbnail of every rendered chart. -->
<!-- SECTION:figures end -->

> Hand-written notes outside the `<!-- SECTION:name start/end -->` markers are preserved between runs.
";

#[derive(Clone, Debug)]
pub struct ReportSection {
    id: String,
    content: String,
}

impl ReportSection {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    fn start_marker(&self) -> String {
        format!("<!-- SECTION:{} start -->", self.id)
    }

    fn end_marker(&self) -> String {
        format!("<!-- SECTION:{} end -->", self.id)
    }
}

/// A chart entry for the figures section.
pub struct FigureEntry<'a> {
    pub title: &'a str,
    pub file_name: &'a str,
    pub thumbnail: Option<String>,
}

pub fn ensure_report_file(path: &Path, template: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    if !path.exists() {
        fs::write(path, template)
            .with_context(|| format!("failed to write report template to {}", path.display()))?;
    }

    Ok(())
}

pub fn update_sections(path: &Path, sections: &[ReportSection]) -> Result<()> {
    let mut content = fs::read_to_string(path)
        .with_context(|| format!("failed to read report at {}", path.display()))?;

    for section in sections {
        content = replace_section(&content, section)?;
    }

    fs::write(path, content)
        .with_context(|| format!("failed to write updated report to {}", path.display()))?;
    Ok(())
}

pub fn render_figures_section(figures: &[FigureEntry<'_>]) -> String {
    if figures.is_empty() {
        return "No figures were rendered in the latest run.".to_string();
    }

    let mut output = String::new();
    for figure in figures {
        let _ = writeln!(&mut output, "### {}\n", figure.title);
        let _ = writeln!(&mut output, "File: `{}`\n", figure.file_name);
        if let Some(thumbnail) = &figure.thumbnail {
            let _ = writeln!(&mut output, "![{}]({})\n", figure.title, thumbnail);
        }
    }
    output
}

fn replace_section(content: &str, section: &ReportSection) -> Result<String> {
    let start_marker = section.start_marker();
    let end_marker = section.end_marker();

    let start_idx = content
        .find(&start_marker)
        .ok_or_else(|| anyhow!("missing start marker: {}", start_marker))?;
    let after_start = start_idx + start_marker.len();
    let end_relative = content[after_start..]
        .find(&end_marker)
        .ok_or_else(|| anyhow!("missing end marker: {}", end_marker))?;
    let end_idx = after_start + end_relative;

    let mut updated = String::with_capacity(content.len() + section.content.len());
    updated.push_str(&content[..start_idx]);
    updated.push_str(&start_marker);

    let trimmed = section.content.trim_matches('\n');
    updated.push('\n');
    if !trimmed.is_empty() {
        updated.push_str(trimmed);
        updated.push('\n');
    }

    updated.push_str(&content[end_idx..]);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn replaces_only_marked_region() {
        let content = "intro\n<!-- SECTION:a start -->\nold\n<!-- SECTION:a end -->\noutro\n";
        let updated = replace_section(content, &ReportSection::new("a", "\nnew body\n")).unwrap();
        assert_eq!(
            updated,
            "intro\n<!-- SECTION:a start -->\nnew body\n<!-- SECTION:a end -->\noutro\n"
        );
    }

    #[test]
    fn missing_marker_is_an_error() {
        let err = replace_section("no markers", &ReportSection::new("figures", "x")).unwrap_err();
        assert!(err.to_string().contains("SECTION:figures start"));
    }

    #[test]
    fn template_round_trip_keeps_notes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/report.md");
        ensure_report_file(&path, DEFAULT_REPORT_TEMPLATE).unwrap();

        let mut text = fs::read_to_string(&path).unwrap();
        text.push_str("\nmy note\n");
        fs::write(&path, text).unwrap();

        ensure_report_file(&path, DEFAULT_REPORT_TEMPLATE).unwrap();
        update_sections(
            &path,
            &[
                ReportSection::new("configuration", "- Seed: 1"),
                ReportSection::new("figures", "figs"),
            ],
        )
        .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("<!-- SECTION:configuration start -->\n- Seed: 1\n"));
        assert!(text.contains("my note"));
    }

    #[test]
    fn figures_section_lists_files() {
        let section = render_figures_section(&[FigureEntry {
            title: "Learning curve",
            file_name: "learning_curve.png",
            thumbnail: Some("data:image/png;base64,AAAA".to_string()),
        }]);
        assert!(section.contains("### Learning curve"));
        assert!(section.contains("`learning_curve.png`"));
        assert!(section.contains("](data:image/png;base64,AAAA)"));
        assert!(render_figures_section(&[]).contains("No figures"));
    }
}
