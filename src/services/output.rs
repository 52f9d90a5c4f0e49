use crate::domain::models::{JsonOut, Session};
use crate::services::notify::Notice;
use crate::services::screen::Screen;
use serde::Serialize;

/// What one-shot commands report in `--json` mode.
#[derive(Serialize)]
pub struct ActionReport<'a> {
    pub session: &'a Session,
    pub screen: &'a Screen,
    pub notices: &'a [Notice],
}

pub fn print_one<T: Serialize>(
    json: bool,
    ok: bool,
    data: T,
    row: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok, data })?
        );
    } else {
        for line in row(&data) {
            println!("{}", line);
        }
    }
    Ok(())
}

pub fn print_screen(json: bool, ok: bool, report: ActionReport<'_>) -> anyhow::Result<()> {
    print_one(json, ok, report, |r| r.screen.lines())
}
