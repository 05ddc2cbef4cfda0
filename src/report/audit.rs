// plain-text rendering of the data-model audit
use crate::core::classify::AuditReport;
use crate::report::writer::ReportArtifact;

pub const AUDIT_FILE_NAME: &str = "data_model_audit.txt";

impl AuditReport {
    /// One `<Label> (<n>)` heading per section, `- item` lines below it,
    /// blank line between sections. Empty sections keep their heading.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (i, (label, items)) in self.sections().iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("{label} ({})\n", items.len()));
            for item in items.iter() {
                out.push_str(&format!("- {item}\n"));
            }
        }
        out
    }

    pub fn to_artifact(&self) -> ReportArtifact {
        ReportArtifact {
            file_name: AUDIT_FILE_NAME.to_string(),
            media_type: "text/plain",
            bytes: self.render_text().into_bytes(),
        }
    }
}
