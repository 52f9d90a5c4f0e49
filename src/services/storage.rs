use crate::domain::models::Session;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/cybershield"))
}

fn session_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("session.json"))
}

pub fn audit(action: &str, data: serde_json::Value) {
    let written =
        config_dir().and_then(|dir| append_audit(&dir.join("audit.jsonl"), action, data));
    if let Err(e) = written {
        warn!(action, error = %e, "could not write audit log");
    }
}

fn append_audit(path: &Path, action: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let event = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339(),
        "action": action,
        "data": data
    });
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(f, "{}", event)?;
    Ok(())
}

/// Session carried between invocations, the way a browser tab keeps it
/// between page loads.
pub fn load_session() -> anyhow::Result<Session> {
    load_session_from(&session_path()?)
}

pub fn save_session(s: &Session) -> anyhow::Result<()> {
    save_session_to(&session_path()?, s)
}

/// An unreadable session file starts the client signed out; the next save
/// replaces or removes it.
pub fn load_session_from(p: &Path) -> anyhow::Result<Session> {
    if !p.exists() {
        return Ok(Session::default());
    }
    let raw = std::fs::read_to_string(p)?;
    match serde_json::from_str(&raw) {
        Ok(s) => Ok(s),
        Err(e) => {
            warn!(path = %p.display(), error = %e, "ignoring unreadable session file");
            Ok(Session::default())
        }
    }
}

/// A signed-out session removes the file instead of writing an empty one.
pub fn save_session_to(p: &Path, s: &Session) -> anyhow::Result<()> {
    if !s.is_signed_in() {
        if p.exists() {
            std::fs::remove_file(p)?;
        }
        return Ok(());
    }
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(p, serde_json::to_string_pretty(s)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SignedInUser;
    use tempfile::TempDir;

    #[test]
    fn session_file_round_trip_and_removal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/session.json");
        assert_eq!(load_session_from(&path).unwrap(), Session::default());

        let s = Session::signed_in(SignedInUser {
            id: 7,
            email: "a@b.com".to_string(),
        });
        save_session_to(&path, &s).unwrap();
        assert_eq!(load_session_from(&path).unwrap(), s);

        save_session_to(&path, &Session::default()).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_session_file_loads_signed_out() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        std::fs::write(&path, "{").unwrap();
        assert_eq!(load_session_from(&path).unwrap(), Session::default());

        std::fs::write(&path, r#"{"user_id": 7, "user_email": "a@b.com"}"#).unwrap();
        assert_eq!(load_session_from(&path).unwrap(), Session::default());

        save_session_to(&path, &Session::default()).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn audit_appends_one_event_per_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("logs/audit.jsonl");
        append_audit(&path, "login", serde_json::json!({"email": "a@b.com"})).unwrap();
        append_audit(&path, "logout", serde_json::json!({})).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let actions: Vec<String> = raw
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap())
            .map(|v| v["action"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(actions, vec!["login", "logout"]);
    }

    #[test]
    fn audit_reports_unwritable_path() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("audit.jsonl");
        assert!(append_audit(&path, "login", serde_json::json!({})).is_err());
    }
}
