use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modules::command::{decode_json, decode_value, CommandError, Decoded};
use crate::modules::dispatch::{Dispatcher, Outcome};
use crate::modules::stage::StageView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Applied,
    Ignored,
    Failed,
}

/// What happened to one command, in a shape JavaScript and the CLI can print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub command: Option<String>,
    pub status: DispatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DispatchReport {
    pub fn applied(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            status: DispatchStatus::Applied,
            detail: None,
        }
    }

    pub fn ignored(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            status: DispatchStatus::Ignored,
            detail: Some(reason.into()),
        }
    }

    pub fn failed(command: Option<String>, error: impl Into<String>) -> Self {
        Self {
            command,
            status: DispatchStatus::Failed,
            detail: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == DispatchStatus::Failed
    }
}

pub fn dispatch_json_report<V: StageView>(dispatcher: &mut Dispatcher<V>, source: &str) -> DispatchReport {
    report(dispatcher, decode_json(source))
}

pub fn dispatch_value_report<V: StageView>(dispatcher: &mut Dispatcher<V>, value: Value) -> DispatchReport {
    report(dispatcher, decode_value(value))
}

fn report<V: StageView>(
    dispatcher: &mut Dispatcher<V>,
    decoded: Result<Decoded, CommandError>,
) -> DispatchReport {
    let decoded = match decoded {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::error!("Rejected command: {}", e);
            let command = match &e {
                CommandError::Malformed { command, .. } => Some(command.clone()),
                _ => None,
            };
            return DispatchReport::failed(command, e.to_string());
        }
    };

    let kind = match &decoded {
        Decoded::Known(command) => command.kind().to_string(),
        Decoded::Unknown(kind) => kind.clone(),
    };

    match dispatcher.dispatch_decoded(decoded) {
        Ok(Outcome::Applied) => DispatchReport::applied(kind),
        Ok(Outcome::Ignored(reason)) => DispatchReport::ignored(kind, reason.to_string()),
        Err(e) => {
            tracing::error!("Command '{}' failed: {}", kind, e);
            DispatchReport::failed(Some(kind), e.to_string())
        }
    }
}
