use crate::domain::models::{
    GatewayStatus, LoginRequest, RegistrationForm, ScanRequest, ScanResult, Scope, Session,
    SignedInUser, View,
};
use crate::gateway::{Gateway, GatewayError};
use crate::services::notify::{Level, Notice, Notifier};
use crate::services::render::render_scan_result;
use crate::services::screen::{ScanArea, Screen};
use tracing::debug;

const CONNECTIVITY_MESSAGE: &str = "Could not connect to the server. Please check your connection.";

/// Result of one user action. Failures have already been shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed,
    /// A newer scan was issued before this one completed; its result was dropped.
    Superseded,
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }
}

/// Identifies one issued scan request. Only the latest ticket may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket(u64);

/// Mediates between user actions, the visible view and the gateway.
/// Owns exactly one session for its lifetime.
pub struct Controller<G: Gateway, N: Notifier> {
    gateway: G,
    notifier: N,
    session: Session,
    screen: Screen,
    form: RegistrationForm,
    scan_generation: u64,
}

impl<G: Gateway, N: Notifier> Controller<G, N> {
    /// Starts on the dashboard when `session` already holds a user, else home.
    pub fn new(gateway: G, notifier: N, session: Session) -> Self {
        let mut c = Self {
            gateway,
            notifier,
            session,
            screen: Screen::default(),
            form: RegistrationForm::default(),
            scan_generation: 0,
        };
        c.select_scope(Scope::Individual);
        if c.session.is_signed_in() {
            c.go_to_dashboard();
        } else {
            c.navigate_to(View::Home);
        }
        c
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    pub fn navigate_to(&mut self, view: View) {
        debug!(%view, "navigate");
        self.screen.show(view);
        if view == View::Dashboard {
            if let Some(email) = self.session.user_email() {
                self.screen.set_welcome(Some(format!("Welcome, {}!", email)));
            }
        }
    }

    pub fn go_to_dashboard(&mut self) {
        if self.session.is_signed_in() {
            self.navigate_to(View::Dashboard);
        } else {
            self.navigate_to(View::Login);
        }
    }

    pub fn sign_out(&mut self) {
        self.session.clear();
        self.screen.set_welcome(None);
        self.screen.set_scan_area(ScanArea::Empty);
        self.screen.set_scan_input("");
        self.notifier
            .notify(Notice::alert(Level::Info, "You have been signed out."));
        self.navigate_to(View::Home);
    }

    /// Shows the field group for `scope` and submits that group on register.
    pub fn select_scope(&mut self, scope: Scope) {
        self.form.scope = scope;
        self.screen.set_scope(scope);
    }

    pub fn submit_registration(&mut self) -> Outcome {
        let request = match self.form.request() {
            Ok(r) => r,
            Err(field) => {
                self.notifier.notify(Notice::alert(
                    Level::Error,
                    format!("Please fill in the {} field.", field.replace('_', " ")),
                ));
                return Outcome::Failed;
            }
        };

        match self.gateway.register(&request) {
            Ok(()) => {
                debug!(email = request.email(), "registered");
                self.notifier.notify(Notice::alert(
                    Level::Success,
                    "Registration successful! Please log in.",
                ));
                self.navigate_to(View::Login);
                Outcome::Done
            }
            Err(e) => {
                let message = failure_message(&e, "Registration failed. Please try again.");
                self.notifier.notify(Notice::alert(Level::Error, message));
                Outcome::Failed
            }
        }
    }

    pub fn submit_login(&mut self, email: &str) -> Outcome {
        let email = email.trim();
        if email.is_empty() {
            self.notifier
                .notify(Notice::alert(Level::Error, "Please enter your email."));
            return Outcome::Failed;
        }

        let request = LoginRequest {
            email: email.to_string(),
        };
        match self.gateway.login(&request) {
            Ok(user) => {
                debug!(user_id = user.id, "signed in");
                self.session = Session::signed_in(SignedInUser {
                    id: user.id,
                    email: user.email,
                });
                self.go_to_dashboard();
                Outcome::Done
            }
            Err(e) => {
                let fallback = match &e {
                    GatewayError::Rejected { status: 404, .. } => {
                        "User not found. Please register first."
                    }
                    _ => "Login failed. Please try again.",
                };
                let message = failure_message(&e, fallback);
                self.notifier.notify(Notice::alert(Level::Error, message));
                Outcome::Failed
            }
        }
    }

    /// Pings the gateway health route. Failures are shown like any other.
    pub fn check_gateway(&mut self) -> Option<GatewayStatus> {
        match self.gateway.status() {
            Ok(status) => Some(status),
            Err(e) => {
                let message = failure_message(&e, "Gateway reported a problem.");
                self.notifier.notify(Notice::alert(Level::Error, message));
                None
            }
        }
    }

    pub fn submit_scan(&mut self, url: &str) -> Outcome {
        let Some((ticket, request)) = self.begin_scan(url) else {
            return Outcome::Failed;
        };
        let result = self.gateway.scan(&request);
        self.finish_scan(ticket, result)
    }

    /// Checks preconditions and puts the placeholder up. `None` means the
    /// user was told why and no request should be sent.
    pub fn begin_scan(&mut self, url: &str) -> Option<(ScanTicket, ScanRequest)> {
        self.screen.set_scan_input(url);
        let Some(user_id) = self.session.user_id() else {
            self.notifier
                .notify(Notice::alert(Level::Error, "Please log in to scan a URL."));
            return None;
        };
        let url = url.trim();
        if url.is_empty() {
            self.notifier
                .notify(Notice::alert(Level::Error, "Please enter a URL to scan."));
            return None;
        }

        self.scan_generation += 1;
        let ticket = ScanTicket(self.scan_generation);
        self.screen.set_scan_area(ScanArea::Scanning {
            url: url.to_string(),
        });
        Some((
            ticket,
            ScanRequest {
                url: url.to_string(),
                user_id,
            },
        ))
    }

    pub fn finish_scan(
        &mut self,
        ticket: ScanTicket,
        result: Result<ScanResult, GatewayError>,
    ) -> Outcome {
        if ticket.0 != self.scan_generation {
            debug!(
                ticket = ticket.0,
                latest = self.scan_generation,
                "dropping stale scan response"
            );
            return Outcome::Superseded;
        }

        match result {
            Ok(result) => {
                self.screen
                    .set_scan_area(ScanArea::Result(render_scan_result(&result)));
                self.screen.set_scan_input("");
                Outcome::Done
            }
            Err(e) => {
                let message = failure_message(&e, "Scan failed. Please try again.");
                self.screen.set_scan_area(ScanArea::Error {
                    message: message.clone(),
                });
                self.notifier.notify(Notice::inline(Level::Error, message));
                Outcome::Failed
            }
        }
    }
}

fn failure_message(err: &GatewayError, fallback: &str) -> String {
    match err {
        GatewayError::Connectivity(_) => CONNECTIVITY_MESSAGE.to_string(),
        _ => err.detail().unwrap_or(fallback).to_string(),
    }
}
