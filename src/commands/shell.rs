use crate::domain::models::{RegistrationForm, Scope, View};
use crate::gateway::Gateway;
use crate::services::controller::Controller;
use crate::services::notify::Notifier;
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  go <home|login|registration|dashboard>   switch view
  scope <individual|enterprise>            pick registration field group
  set <field> <value>                      fill a registration field
  form                                     show the registration form
  register                                 submit the registration form
  login <email>                            sign in
  scan [url]                               scan url (or the url left in the input)
  logout                                   sign out
  show                                     redraw the current view
  quit                                     leave the shell";

/// Line oriented front end over one controller. The controller, and with it
/// the session, lives until `quit` or end of input.
pub fn run_shell<G, N, R, W>(
    ctl: &mut Controller<G, N>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    G: Gateway,
    N: Notifier,
    R: BufRead,
    W: Write,
{
    draw(ctl, out)?;
    let mut lines = input.lines();
    loop {
        write!(out, "shield[{}]> ", ctl.screen().visible())?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", HELP)?,
            "show" => draw(ctl, out)?,
            "form" => {
                for line in form_lines(ctl.form(), ctl.screen().visible_field_group()) {
                    writeln!(out, "{}", line)?;
                }
            }
            "go" => match rest.parse::<View>() {
                Ok(View::Dashboard) => {
                    ctl.go_to_dashboard();
                    draw(ctl, out)?;
                }
                Ok(view) => {
                    ctl.navigate_to(view);
                    draw(ctl, out)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            "scope" => match rest.parse::<Scope>() {
                Ok(scope) => {
                    ctl.select_scope(scope);
                    draw(ctl, out)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            "set" => {
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                if let Err(e) = ctl.form_mut().set_field(field, value) {
                    writeln!(out, "{}", e)?;
                }
            }
            "register" => {
                ctl.submit_registration();
                draw(ctl, out)?;
            }
            "login" => {
                ctl.submit_login(rest);
                draw(ctl, out)?;
            }
            "scan" => {
                let url = if rest.is_empty() {
                    ctl.screen().scan_input().to_string()
                } else {
                    rest.to_string()
                };
                ctl.submit_scan(&url);
                draw(ctl, out)?;
            }
            "logout" => {
                ctl.sign_out();
                draw(ctl, out)?;
            }
            other => writeln!(out, "unknown command: {} (try `help`)", other)?,
        }
    }
    Ok(())
}

fn draw<G, N, W>(ctl: &Controller<G, N>, out: &mut W) -> anyhow::Result<()>
where
    G: Gateway,
    N: Notifier,
    W: Write,
{
    for line in ctl.screen().lines() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn form_lines(form: &RegistrationForm, group: &[&str]) -> Vec<String> {
    let value = |name: &str| match name {
        "first_name" => Some(&form.first_name),
        "last_name" => Some(&form.last_name),
        "mobile" => Some(&form.mobile),
        "company_name" => Some(&form.company_name),
        "company_website" => Some(&form.company_website),
        "phone" => Some(&form.phone),
        _ => None,
    };
    let mut out = vec![format!("scope: {:?}", form.scope), format!("email: {}", form.email)];
    out.extend(
        group
            .iter()
            .filter_map(|f| value(*f).map(|v| format!("{}: {}", f, v))),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::{form_lines, run_shell};
    use crate::domain::models::{RegistrationForm, Session, View};
    use crate::gateway::fake::FakeGateway;
    use crate::services::controller::Controller;
    use crate::services::notify::RecordingNotifier;

    fn run(script: &str) -> (Controller<FakeGateway, RecordingNotifier>, String) {
        let mut ctl = Controller::new(
            FakeGateway::default(),
            RecordingNotifier::default(),
            Session::default(),
        );
        let mut out = Vec::new();
        run_shell(&mut ctl, script.as_bytes(), &mut out).unwrap();
        (ctl, String::from_utf8(out).unwrap())
    }

    #[test]
    fn register_login_scan_logout_flow() {
        let (ctl, out) = run(
            "go registration\n\
             scope enterprise\n\
             set email ops@acme.test\n\
             set company_name Acme Security Ltd\n\
             set company_website https://acme.test\n\
             set phone 555-0100\n\
             register\n\
             login a@b.com\n\
             scan http://evil.test\n\
             logout\n",
        );
        assert!(out.contains("view: login"));
        assert!(out.contains("Welcome, a@b.com!"));
        assert!(out.contains("[danger] DANGER: malicious"));
        assert_eq!(ctl.screen().visible(), View::Home);
        assert!(!ctl.session().is_signed_in());
        assert_eq!(ctl.gateway().calls(), vec!["register", "login", "scan"]);
    }

    #[test]
    fn dashboard_requires_login() {
        let (ctl, out) = run("go dashboard\n");
        assert_eq!(ctl.screen().visible(), View::Login);
        assert!(out.contains("shield[login]> "));
    }

    #[test]
    fn failed_scan_keeps_input_for_retry() {
        let (ctl, out) = run("login a@b.com\nscan http://fail.test\nscan\n");
        assert!(out.contains("Error: Upstream lookup failed"));
        assert_eq!(ctl.gateway().calls(), vec!["login", "scan", "scan"]);
        assert_eq!(ctl.screen().scan_input(), "http://fail.test");
    }

    #[test]
    fn form_shows_only_selected_group() {
        let (_, out) = run("scope enterprise\nset company_name Acme\nform\n");
        assert!(out.contains("company_name: Acme"));
        assert!(!out.contains("first_name:"));
    }

    #[test]
    fn form_lines_list_email_once() {
        let mut form = RegistrationForm::default();
        form.set_field("email", "ops@acme.test").unwrap();
        form.set_field("phone", "555-0100").unwrap();
        let lines = form_lines(&form, &["email", "phone", "nickname"]);
        assert_eq!(lines, vec!["scope: Individual", "email: ops@acme.test", "phone: 555-0100"]);
    }

    #[test]
    fn unknown_input_is_reported() {
        let (_, out) = run("dance\ngo settings\nscope family\n");
        assert!(out.contains("unknown command: dance"));
        assert!(out.contains("unknown view: settings"));
        assert!(out.contains("unknown scope: family"));
    }
}
