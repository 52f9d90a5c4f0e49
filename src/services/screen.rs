use crate::domain::models::{Scope, View};
use crate::services::render::RenderedScan;
use serde::Serialize;

/// Contents of the scan result area on the dashboard.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScanArea {
    #[default]
    Empty,
    Scanning { url: String },
    Result(RenderedScan),
    Error { message: String },
}

/// Terminal stand-in for the page: which view is visible and what each
/// region currently shows. Exactly one view is visible at a time.
#[derive(Debug, Clone, Serialize)]
pub struct Screen {
    visible: View,
    welcome: Option<String>,
    scope: Scope,
    scan_input: String,
    scan_area: ScanArea,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            visible: View::Home,
            welcome: None,
            scope: Scope::Individual,
            scan_input: String::new(),
            scan_area: ScanArea::Empty,
        }
    }
}

impl Screen {
    pub fn visible(&self) -> View {
        self.visible
    }

    pub fn show(&mut self, view: View) {
        self.visible = view;
    }

    pub fn welcome(&self) -> Option<&str> {
        self.welcome.as_deref()
    }

    pub fn set_welcome(&mut self, text: Option<String>) {
        self.welcome = text;
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    /// Registration field group currently shown; always mirrors the scope.
    pub fn visible_field_group(&self) -> &'static [&'static str] {
        match self.scope {
            Scope::Individual => &["first_name", "last_name", "mobile"],
            Scope::Enterprise => &["company_name", "company_website", "phone"],
        }
    }

    pub fn scan_input(&self) -> &str {
        &self.scan_input
    }

    pub fn set_scan_input(&mut self, url: &str) {
        self.scan_input = url.to_string();
    }

    pub fn scan_area(&self) -> &ScanArea {
        &self.scan_area
    }

    pub fn set_scan_area(&mut self, area: ScanArea) {
        self.scan_area = area;
    }

    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![format!("view: {}", self.visible)];
        match self.visible {
            View::Dashboard => {
                if let Some(w) = self.welcome() {
                    out.push(w.to_string());
                }
                match &self.scan_area {
                    ScanArea::Empty => {}
                    ScanArea::Scanning { url } => out.push(format!("Scanning {}...", url)),
                    ScanArea::Result(r) => out.extend(r.lines()),
                    ScanArea::Error { message } => out.push(format!("Error: {}", message)),
                }
            }
            View::Registration => {
                out.push(format!(
                    "scope: {:?} ({})",
                    self.scope(),
                    self.visible_field_group().join(", ")
                ));
            }
            View::Home | View::Login => {}
        }
        out
    }
}
