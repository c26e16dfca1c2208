use snapshot_store::Snapshot;
use tagstore_api::{dev, DEFAULT_BASE_URL};
use tracing::{error, info, warn};

use crate::checks::{CheckOutcome, Instance};
use crate::config::InstanceOverrides;
use crate::error::WatchError;
use crate::feed::StatusFeed;

/// One named probe plus the message announcing a changed observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDefinition {
    pub name: String,
    pub changed_message: String,
    pub instance: Instance,
}

/// The service-user probes for the production and sandbox instances.
#[must_use]
pub fn built_in_checks(overrides: &InstanceOverrides) -> Vec<CheckDefinition> {
    let production = overrides
        .production
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    let sandbox = overrides
        .sandbox
        .clone()
        .unwrap_or_else(|| dev::SANDBOX_BASE_URL.to_owned());

    vec![
        CheckDefinition {
            name: "production-user".to_owned(),
            changed_message: "Tagstore user on production has changed id".to_owned(),
            instance: Instance::new("production", production),
        },
        CheckDefinition {
            name: "sandbox-user".to_owned(),
            changed_message: "Tagstore user on sandbox has changed id".to_owned(),
            instance: Instance::new("sandbox", sandbox),
        },
    ]
}

/// A probe's outcome, tagged with what to announce when it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub name: String,
    pub changed_message: String,
    pub outcome: CheckOutcome,
}

/// Run every probe, logging each outcome as it lands.
#[must_use]
pub fn run_checks(definitions: &[CheckDefinition]) -> Vec<CheckReport> {
    definitions
        .iter()
        .map(|definition| {
            let outcome = definition.instance.probe_user();
            match &outcome {
                CheckOutcome::Pass { observed, .. } => {
                    info!(check = %definition.name, %observed, "check passed");
                }
                CheckOutcome::Fail { message } => {
                    error!(check = %definition.name, %message, "check failed");
                }
            }
            CheckReport {
                name: definition.name.clone(),
                changed_message: definition.changed_message.clone(),
                outcome,
            }
        })
        .collect()
}

/// Fold the reports into the snapshot, posting every transition.
///
/// Each check keeps a `laststatus-` key holding pass or fail; passing
/// checks also track the observed id under a `change-` key, and a new id
/// is announced as `<changed_message>: <id>`. A key seen for the first
/// time is seeded silently. When the feed rejects an update the key is
/// left untouched so the next run tries again; transport failures abort
/// the whole fold, leaving the snapshot unsaved for the same reason.
///
/// Returns the messages that were actually posted.
pub fn apply_reports(
    snapshot: &mut Snapshot,
    reports: &[CheckReport],
    feed: &dyn StatusFeed,
) -> Result<Vec<String>, WatchError> {
    let mut posted = Vec::new();

    for report in reports {
        let status_key = format!("laststatus-{}", report.name);
        let status = report.outcome.status_label();
        match snapshot.get(&status_key).map(String::as_str) {
            Some(previous) if previous != status => {
                if post(feed, report.outcome.message(), &mut posted)? {
                    snapshot.insert(status_key, status.to_owned());
                }
            }
            Some(_) => {}
            None => {
                snapshot.insert(status_key, status.to_owned());
            }
        }

        if let CheckOutcome::Pass { observed, .. } = &report.outcome {
            let change_key = format!("change-{}", report.name);
            match snapshot.get(&change_key) {
                Some(previous) if previous != observed => {
                    let message = format!("{}: {observed}", report.changed_message);
                    if post(feed, &message, &mut posted)? {
                        snapshot.insert(change_key, observed.clone());
                    }
                }
                Some(_) => {}
                None => {
                    snapshot.insert(change_key, observed.clone());
                }
            }
        }
    }

    Ok(posted)
}

fn post(
    feed: &dyn StatusFeed,
    message: &str,
    posted: &mut Vec<String>,
) -> Result<bool, WatchError> {
    if feed.post_update(message)? {
        info!(%message, "posted status update");
        posted.push(message.to_owned());
        Ok(true)
    } else {
        warn!(%message, "feed rejected status update");
        Ok(false)
    }
}
