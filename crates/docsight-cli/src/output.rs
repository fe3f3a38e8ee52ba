//! Insight artifact persistence and terminal rendering.

use std::path::{Path, PathBuf};

use docsight_core::{Insights, Result};

/// `report.pdf` → `report.summary.json`, in the same directory.
pub fn artifact_path(source: &Path) -> PathBuf {
    source.with_extension("summary.json")
}

/// Write insights as pretty JSON next to the source document.
pub fn write_artifact(source: &Path, insights: &Insights) -> Result<PathBuf> {
    let path = artifact_path(source);
    let json = serde_json::to_string_pretty(insights)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Text block printed after a run.
pub fn render(insights: &Insights) -> String {
    let mut out = String::from("\n=== SUMMARY ===\n\n");
    out.push_str(&insights.summary);
    out.push_str("\n\n=== KEY POINTS ===\n\n");
    for point in &insights.key_points {
        out.push_str("- ");
        out.push_str(point);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_path() {
        assert_eq!(
            artifact_path(Path::new("/docs/report.pdf")),
            PathBuf::from("/docs/report.summary.json")
        );
        assert_eq!(
            artifact_path(Path::new("temp_files/memo.v2.docx")),
            PathBuf::from("temp_files/memo.v2.summary.json")
        );
    }

    #[test]
    fn test_write_artifact_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("raport.docx");
        let insights = Insights::new("Przychody wzrosły o 10%.", vec!["Koszty spadły".into()]);

        let path = write_artifact(&source, &insights).unwrap();
        assert_eq!(path, dir.path().join("raport.summary.json"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n  \"summary\": \"Przychody wzrosły o 10%.\",\n  \"key_points\": [\n    \"Koszty spadły\"\n  ]\n}"
        );
    }

    #[test]
    fn test_render() {
        let insights = Insights::new("Short.", vec!["one".into(), "two".into()]);
        assert_eq!(
            render(&insights),
            "\n=== SUMMARY ===\n\nShort.\n\n=== KEY POINTS ===\n\n- one\n- two\n"
        );
    }
}
