use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// The user a session belongs to. Id and email only ever travel together.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SignedInUser {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Session {
    #[serde(default)]
    pub user: Option<SignedInUser>,
}

impl Session {
    pub fn signed_in(user: SignedInUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn clear(&mut self) {
        self.user = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    Login,
    Registration,
    Dashboard,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Login, View::Registration, View::Dashboard];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Login => "login",
            View::Registration => "registration",
            View::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown view: {}", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Individual,
    Enterprise,
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" => Ok(Scope::Individual),
            "enterprise" => Ok(Scope::Enterprise),
            other => Err(format!("unknown scope: {}", other)),
        }
    }
}

/// Body of `POST /register`. Only the fields of the chosen scope are sent.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum RegistrationRequest {
    Individual {
        email: String,
        first_name: String,
        last_name: String,
        mobile: String,
    },
    Enterprise {
        email: String,
        company_name: String,
        company_website: String,
        phone: String,
    },
}

impl RegistrationRequest {
    pub fn email(&self) -> &str {
        match self {
            RegistrationRequest::Individual { email, .. }
            | RegistrationRequest::Enterprise { email, .. } => email,
        }
    }
}

/// Registration form as the user fills it: both field groups exist,
/// only the one matching `scope` is submitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrationForm {
    pub scope: Scope,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub company_name: String,
    pub company_website: String,
    pub phone: String,
}

impl RegistrationForm {
    pub const FIELDS: [&'static str; 7] = [
        "email",
        "first_name",
        "last_name",
        "mobile",
        "company_name",
        "company_website",
        "phone",
    ];

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        let slot = match field {
            "email" => &mut self.email,
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "mobile" => &mut self.mobile,
            "company_name" => &mut self.company_name,
            "company_website" => &mut self.company_website,
            "phone" => &mut self.phone,
            other => {
                return Err(format!(
                    "unknown registration field: {} (expected one of: {})",
                    other,
                    Self::FIELDS.join(", ")
                ))
            }
        };
        *slot = value.trim().to_string();
        Ok(())
    }

    /// Builds the request for the selected scope. Errors with the name of
    /// the first required field left empty.
    pub fn request(&self) -> Result<RegistrationRequest, &'static str> {
        fn required(name: &'static str, value: &str) -> Result<String, &'static str> {
            let v = value.trim();
            if v.is_empty() {
                Err(name)
            } else {
                Ok(v.to_string())
            }
        }

        let email = required("email", &self.email)?;
        Ok(match self.scope {
            Scope::Individual => RegistrationRequest::Individual {
                email,
                first_name: required("first_name", &self.first_name)?,
                last_name: required("last_name", &self.last_name)?,
                mobile: required("mobile", &self.mobile)?,
            },
            Scope::Enterprise => RegistrationRequest::Enterprise {
                email,
                company_name: required("company_name", &self.company_name)?,
                company_website: required("company_website", &self.company_website)?,
                phone: required("phone", &self.phone)?,
            },
        })
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ScanRequest {
    pub url: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
    Warning,
    Clean,
}

impl Severity {
    /// Explicit verdict as stored on the gateway's scan reports.
    pub fn from_status(status: &str) -> Option<Self> {
        match status.trim().to_ascii_uppercase().as_str() {
            "DANGER" => Some(Severity::Danger),
            "WARNING" => Some(Severity::Warning),
            "CLEAN" | "SUCCESS" => Some(Severity::Clean),
            _ => None,
        }
    }

    /// Fallback for gateways that only send the human readable summary.
    pub fn from_summary(summary: &str) -> Self {
        if summary.contains("DANGER") {
            Severity::Danger
        } else if summary.contains("WARNING") {
            Severity::Warning
        } else {
            Severity::Clean
        }
    }

    /// Style class used when presenting a result.
    pub fn class(&self) -> &'static str {
        match self {
            Severity::Danger => "danger",
            Severity::Warning => "warning",
            Severity::Clean => "success",
        }
    }
}

/// Gateways send `null` for values they could not produce; treat it like a
/// missing key.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScanResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: ScanDetails,
}

impl ScanResult {
    pub fn severity(&self) -> Severity {
        self.status
            .as_deref()
            .and_then(Severity::from_status)
            .unwrap_or_else(|| Severity::from_summary(&self.overall_summary))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ScanDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virustotal: Option<VtResult>,
    #[serde(
        default,
        alias = "googleSafeBrowsing",
        skip_serializing_if = "Option::is_none"
    )]
    pub google_safe_browsing: Option<GsbResult>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VtResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub malicious_count: Option<u64>,
    #[serde(default)]
    pub harmless_count: Option<u64>,
    #[serde(default)]
    pub results_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GsbResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GatewayStatus {
    #[serde(default)]
    pub message: String,
}
