use crate::cli::{Cli, Commands, RegisterCommands};
use crate::commands::ShieldController;
use crate::domain::models::{Scope, View};
use crate::services::controller::Outcome;
use crate::services::output::{print_one, print_screen, ActionReport};
use crate::services::storage::audit;

fn report(ctl: &ShieldController) -> ActionReport<'_> {
    ActionReport {
        session: ctl.session(),
        screen: ctl.screen(),
        notices: ctl.notifier().notices(),
    }
}

pub fn handle_account_commands(
    cli: &Cli,
    ctl: &mut ShieldController,
) -> anyhow::Result<Option<Outcome>> {
    let outcome = match &cli.command {
        Commands::Register { scope } => {
            ctl.navigate_to(View::Registration);
            let form = ctl.form_mut();
            let scope = match scope {
                RegisterCommands::Individual(a) => {
                    form.email = a.email.clone();
                    form.first_name = a.first_name.clone();
                    form.last_name = a.last_name.clone();
                    form.mobile = a.mobile.clone();
                    Scope::Individual
                }
                RegisterCommands::Enterprise(a) => {
                    form.email = a.email.clone();
                    form.company_name = a.company_name.clone();
                    form.company_website = a.company_website.clone();
                    form.phone = a.phone.clone();
                    Scope::Enterprise
                }
            };
            ctl.select_scope(scope);
            let outcome = ctl.submit_registration();
            if outcome.is_done() {
                audit(
                    "register",
                    serde_json::json!({"email": ctl.form().email, "scope": scope}),
                );
            }
            print_screen(cli.json, outcome.is_done(), report(ctl))?;
            outcome
        }
        Commands::Login { email } => {
            ctl.navigate_to(View::Login);
            let outcome = ctl.submit_login(email);
            if outcome.is_done() {
                audit("login", serde_json::json!({"email": ctl.session().user_email()}));
            }
            print_screen(cli.json, outcome.is_done(), report(ctl))?;
            outcome
        }
        Commands::Logout => {
            let was = ctl.session().user_email().map(str::to_string);
            ctl.sign_out();
            audit("logout", serde_json::json!({"email": was}));
            print_screen(cli.json, true, report(ctl))?;
            Outcome::Done
        }
        Commands::Whoami => {
            let session = ctl.session().clone();
            let signed_in = session.is_signed_in();
            print_one(cli.json, signed_in, session, |s| match &s.user {
                Some(u) => vec![format!("{}\t{}", u.id, u.email)],
                None => vec!["not signed in".to_string()],
            })?;
            if signed_in {
                Outcome::Done
            } else {
                Outcome::Failed
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(outcome))
}
