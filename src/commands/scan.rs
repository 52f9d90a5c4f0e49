use crate::cli::{Cli, Commands};
use crate::commands::ShieldController;
use crate::services::controller::Outcome;
use crate::services::output::{print_one, print_screen, ActionReport};
use crate::services::screen::ScanArea;
use crate::services::storage::audit;

pub fn handle_scan_commands(
    cli: &Cli,
    ctl: &mut ShieldController,
) -> anyhow::Result<Option<Outcome>> {
    let outcome = match &cli.command {
        Commands::Scan { url } => {
            let outcome = ctl.submit_scan(url);
            if let (true, ScanArea::Result(r)) = (outcome.is_done(), ctl.screen().scan_area()) {
                audit(
                    "scan",
                    serde_json::json!({"url": url, "severity": r.severity}),
                );
            }
            print_screen(
                cli.json,
                outcome.is_done(),
                ActionReport {
                    session: ctl.session(),
                    screen: ctl.screen(),
                    notices: ctl.notifier().notices(),
                },
            )?;
            outcome
        }
        Commands::Status => match ctl.check_gateway() {
            Some(status) => {
                print_one(cli.json, true, status, |s| {
                    vec![format!("gateway up: {}", s.message)]
                })?;
                Outcome::Done
            }
            None => {
                if cli.json {
                    print_one(cli.json, false, ctl.notifier().notices(), |_| vec![])?;
                }
                Outcome::Failed
            }
        },
        _ => return Ok(None),
    };
    Ok(Some(outcome))
}
