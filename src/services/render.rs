use crate::domain::models::{ScanResult, Severity};
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
}

/// A scan result as presented to the user.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderedScan {
    pub severity: Severity,
    pub class: &'static str,
    pub url: String,
    pub summary: String,
    pub sections: Vec<Section>,
    /// When the result was rendered locally, not when the gateway scanned.
    pub rendered_at: DateTime<Local>,
}

pub fn render_scan_result(result: &ScanResult) -> RenderedScan {
    render_scan_result_at(result, Local::now())
}

pub fn render_scan_result_at(result: &ScanResult, now: DateTime<Local>) -> RenderedScan {
    let severity = result.severity();
    let mut sections = Vec::new();

    if let Some(vt) = &result.details.virustotal {
        let mut lines = vec![
            format!("Status: {}", or_na(&vt.status)),
            format!("Malicious Flags: {}", count(vt.malicious_count)),
            format!("Harmless Flags: {}", count(vt.harmless_count)),
        ];
        if let Some(url) = vt.results_url.as_deref().filter(|u| !u.is_empty()) {
            lines.push(format!("Full Report: {}", url));
        }
        sections.push(Section {
            title: "VirusTotal".to_string(),
            lines,
        });
    }

    if let Some(gsb) = &result.details.google_safe_browsing {
        sections.push(Section {
            title: "Google Safe Browsing".to_string(),
            lines: vec![
                format!("Status: {}", or_na(&gsb.status)),
                format!("Message: {}", or_na(&gsb.message)),
            ],
        });
    }

    RenderedScan {
        severity,
        class: severity.class(),
        url: result.url.clone(),
        summary: result.overall_summary.clone(),
        sections,
        rendered_at: now,
    }
}

const MISSING: &str = "n/a";

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        MISSING
    } else {
        value
    }
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |n| n.to_string())
}

impl RenderedScan {
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![format!("[{}] {}", self.class, self.summary)];
        if !self.url.is_empty() {
            out.push(format!("URL: {}", self.url));
        }
        for s in &self.sections {
            out.push(format!("{}:", s.title));
            out.extend(s.lines.iter().map(|l| format!("  {}", l)));
        }
        out.push(format!(
            "Rendered at: {}",
            self.rendered_at.format("%Y-%m-%d %H:%M:%S")
        ));
        out
    }
}
