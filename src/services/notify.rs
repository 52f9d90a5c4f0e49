use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Error,
}

/// Where a notice is presented. Alerts interrupt the user; inline notices
/// sit next to the content they concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Alert,
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub channel: Channel,
    pub message: String,
}

impl Notice {
    pub fn alert(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            channel: Channel::Alert,
            message: message.into(),
        }
    }

    pub fn inline(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            channel: Channel::Inline,
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Prints alerts to stderr as they happen and keeps every notice for the
/// `--json` envelope. Inline notices are already part of the rendered screen.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    json: bool,
    seen: Vec<Notice>,
}

impl ConsoleNotifier {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            seen: Vec::new(),
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.seen
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: Notice) {
        if !self.json && notice.channel == Channel::Alert {
            let tag = match notice.level {
                Level::Info => "info",
                Level::Success => "ok",
                Level::Error => "error",
            };
            eprintln!("{}: {}", tag, notice.message);
        }
        self.seen.push(notice);
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
