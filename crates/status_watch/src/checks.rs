use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tagstore_api::{ApiError, Session};

/// Username the service reserves for itself; its profile doubles as a
/// liveness endpoint.
pub const SERVICE_USERNAME: &str = "tagstore";

/// Probed before anything else, so a dead local uplink is not mistaken
/// for a service outage.
pub const CONNECTIVITY_PROBE_URL: &str = "http://www.google.com";

/// What one probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Pass { message: String, observed: String },
    Fail { message: String },
}

impl CheckOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }

    /// The value recorded in the snapshot for this outcome.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Pass { .. } => "pass",
            Self::Fail { .. } => "fail",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Pass { message, .. } | Self::Fail { message } => message,
        }
    }
}

/// One deployment of the service to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub shortname: String,
    pub base_url: String,
}

impl Instance {
    #[must_use]
    pub fn new(shortname: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            shortname: shortname.into(),
            base_url: base_url.into(),
        }
    }

    /// Probe the instance by fetching the service's own user profile.
    ///
    /// A 200 with an object id passes; transport failures read as the
    /// instance being unreachable; everything else, wrong statuses and
    /// malformed bodies alike, reads as the instance misbehaving.
    #[must_use]
    pub fn probe_user(&self) -> CheckOutcome {
        let session = match Session::new(&self.base_url) {
            Ok(session) => session,
            Err(_) => return self.misbehaving(),
        };

        match session.users().username(SERVICE_USERNAME).get() {
            Ok(response) if response.status == StatusCode::OK => {
                match response.str_field("id") {
                    Some(id) => CheckOutcome::Pass {
                        message: format!(
                            "{} instance is now reachable",
                            capitalize(&self.shortname)
                        ),
                        observed: id.to_owned(),
                    },
                    None => self.misbehaving(),
                }
            }
            Ok(_) => self.misbehaving(),
            Err(ApiError::Http(_)) => CheckOutcome::Fail {
                message: format!("{} instance is unreachable", capitalize(&self.shortname)),
            },
            Err(_) => self.misbehaving(),
        }
    }

    fn misbehaving(&self) -> CheckOutcome {
        CheckOutcome::Fail {
            message: format!(
                "Something unexpected is happening on the {} instance",
                self.shortname
            ),
        }
    }
}

/// Whether the machine running the watcher can reach the wider net at
/// all.
#[must_use]
pub fn internet_reachable() -> bool {
    head_status(CONNECTIVITY_PROBE_URL).is_some_and(status_means_up)
}

fn head_status(url: &str) -> Option<StatusCode> {
    let client = Client::builder().redirect(Policy::none()).build().ok()?;
    let response = client.head(url).send().ok()?;
    Some(response.status())
}

// Redirects are not followed, so a 302 from the probe host still counts
// as connectivity.
fn status_means_up(status: StatusCode) -> bool {
    matches!(status, StatusCode::OK | StatusCode::FOUND)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
