//! Calls to the dashboard backend.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BusinessConfig;
use crate::device::TicketItem;
use crate::error::{ApiError, ApiResult};
use crate::http::{Client, Response};
use crate::loaner::LoanerItem;
use crate::slot::DeviceSlot;
use crate::wire;

const DEVICES_PATH: &str = "get-data";
const LOANERS_PATH: &str = "get-loaner-data";
const REFRESH_PATH: &str = "refresh-data";
const NOTIFY_LOANER_PATH: &str = "notify-loaner-return";

#[derive(Debug, Default, Deserialize)]
struct DevicesBody {
    #[serde(default)]
    result: Option<Vec<TicketItem>>,
}

#[derive(Debug, Default, Deserialize)]
struct LoanersBody {
    #[serde(default)]
    loaners: Option<Vec<LoanerItem>>,
}

#[derive(Debug, Default, Deserialize)]
struct RefreshBody {
    #[serde(default)]
    result: Option<Vec<TicketItem>>,
    #[serde(default)]
    throttled: bool,
    #[serde(default)]
    next_allowed_in: Option<Value>,
}

impl RefreshBody {
    /// Wait the backend asked for; only a number counts.
    fn wait_seconds(&self) -> Option<u64> {
        let seconds = self.next_allowed_in.as_ref()?.as_f64()?;
        (seconds >= 0.0).then(|| seconds.ceil() as u64)
    }
}

/// Outcome of a manual device refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub tickets: Vec<TicketItem>,
    /// Seconds until the backend accepts another refresh, when it refused this one.
    pub throttled_for: Option<u64>,
}

impl RefreshOutcome {
    /// Advisory shown when the refresh was throttled.
    pub fn throttle_message(&self) -> Option<String> {
        self.throttled_for.map(throttle_message)
    }
}

pub fn throttle_message(seconds: u64) -> String {
    let plural = if seconds == 1 { "" } else { "s" };
    format!("Please wait {seconds} second{plural} before refreshing again.")
}

/// Slot reported back by the device notify endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotAssignment {
    Assigned(u32),
    /// Anything else the automation stored as the slot, such as an overflow
    /// notice or an error message.
    Other(String),
    /// `-1` or `null`: the device needs no shelf slot; only the email went out.
    NotRequired,
}

impl SlotAssignment {
    fn from_wire(value: &Value) -> Self {
        match value {
            Value::Null => Self::NotRequired,
            Value::Number(n) if n.as_i64() == Some(-1) => Self::NotRequired,
            Value::String(s) if s == "-1" => Self::NotRequired,
            other => match wire::value_slot(other) {
                Some(DeviceSlot::Number(slot)) => Self::Assigned(slot),
                Some(DeviceSlot::Text(text)) => Self::Other(text),
                None => Self::Other(wire::value_text(other)),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct NotifyBody {
    #[serde(default, rename = "slotNumber")]
    slot_number: Value,
    #[serde(default, rename = "UCD", deserialize_with = "wire::text")]
    ucd: String,
    #[serde(default, rename = "requestedFor", deserialize_with = "wire::text")]
    requested_for: String,
    #[serde(default, rename = "CI", deserialize_with = "wire::text")]
    config_item: String,
}

/// What the backend did for a device notify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceNotification {
    pub slot: SlotAssignment,
    /// New due date, empty when the backend sent none.
    pub ucd: String,
    pub requested_for: String,
    pub config_item: String,
}

impl DeviceNotification {
    /// Confirmation shown to the technician, one line per entry.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Customer: {}", self.requested_for),
            format!("Device: {}", self.config_item),
        ];
        match &self.slot {
            SlotAssignment::Assigned(slot) => {
                lines.push(format!("Slot: {slot}"));
                lines.push(format!("UCD: {}", self.ucd));
            }
            SlotAssignment::Other(text) => {
                lines.push(format!("Slot: {text}"));
                lines.push(format!("UCD: {}", self.ucd));
            }
            SlotAssignment::NotRequired => {
                lines.push("Email notification sent. Device does not require slotting.".to_owned());
                if !self.ucd.is_empty() {
                    lines.push(format!("UCD: {}", self.ucd));
                }
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotifyLoanerBody<'a> {
    loaner_name: &'a str,
    user_email: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct NotifyLoanerReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Backend verdict on a loaner return reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanerNotification {
    Sent,
    Rejected(Option<String>),
}

impl LoanerNotification {
    pub fn message(&self, loaner_name: &str, user_email: &str) -> String {
        match self {
            Self::Sent => format!("Notification sent to {user_email} for loaner {loaner_name}."),
            Self::Rejected(error) => format!(
                "Failed to send notification: {}",
                error.as_deref().unwrap_or("Unknown error")
            ),
        }
    }
}

/// Typed client for every backend endpoint the dashboard uses.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: Client,
    config: BusinessConfig,
}

impl DashboardApi {
    pub fn new(config: BusinessConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    pub async fn fetch_devices(&self) -> ApiResult<Vec<TicketItem>> {
        let response = self.client.get(self.config.endpoint(DEVICES_PATH)).send().await?;
        let body: DevicesBody = decode(response)?;
        Ok(body.result.unwrap_or_default())
    }

    pub async fn fetch_loaners(&self) -> ApiResult<Vec<LoanerItem>> {
        let response = self.client.get(self.config.endpoint(LOANERS_PATH)).send().await?;
        let body: LoanersBody = decode(response)?;
        Ok(body.loaners.unwrap_or_default())
    }

    pub async fn refresh_devices(&self) -> ApiResult<RefreshOutcome> {
        let response = self.client.get(self.config.endpoint(REFRESH_PATH)).send().await?;
        let body: RefreshBody = decode(response)?;
        let throttled_for = if body.throttled {
            let seconds = body.wait_seconds();
            info!("Refresh throttled, next allowed in {seconds:?}s");
            seconds
        } else {
            None
        };
        Ok(RefreshOutcome {
            tickets: body.result.unwrap_or_default(),
            throttled_for,
        })
    }

    /// Asks the backend to slot `ticket` and email the customer.
    pub async fn notify_device(&self, ticket: &str, user_email: &str) -> ApiResult<DeviceNotification> {
        let path = format!(
            "{}/{}",
            urlencoding::encode(ticket),
            urlencoding::encode(user_email)
        );
        let response = self.client.get(self.config.endpoint(&path)).send().await?;
        let body: NotifyBody = decode(response)?;
        let slot = SlotAssignment::from_wire(&body.slot_number);
        info!("Notified {ticket}: {slot:?}");
        Ok(DeviceNotification {
            slot,
            ucd: body.ucd,
            requested_for: body.requested_for,
            config_item: body.config_item,
        })
    }

    pub async fn notify_loaner(
        &self,
        loaner_name: &str,
        user_email: &str,
    ) -> ApiResult<LoanerNotification> {
        let request = self
            .client
            .post(self.config.endpoint(NOTIFY_LOANER_PATH))
            .json(&NotifyLoanerBody {
                loaner_name,
                user_email,
            })?;
        let reply: NotifyLoanerReply = decode(request.send().await?)?;
        if reply.success {
            Ok(LoanerNotification::Sent)
        } else {
            warn!("Loaner notify for {loaner_name} rejected: {:?}", reply.error);
            Ok(LoanerNotification::Rejected(reply.error))
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.is_success() {
        return Err(ApiError::Status(response.status));
    }
    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn throttle_message_pluralizes() {
        assert_eq!(
            throttle_message(1),
            "Please wait 1 second before refreshing again."
        );
        assert_eq!(
            throttle_message(45),
            "Please wait 45 seconds before refreshing again."
        );
    }

    #[test]
    fn throttle_wait_must_be_numeric() {
        let body = |value: Value| -> RefreshBody {
            serde_json::from_value(value).expect("refresh body decodes")
        };
        assert_eq!(
            body(json!({"throttled": true, "next_allowed_in": 12})).wait_seconds(),
            Some(12)
        );
        assert_eq!(body(json!({"throttled": true})).wait_seconds(), None);
        assert_eq!(
            body(json!({"throttled": true, "next_allowed_in": "12"})).wait_seconds(),
            None
        );
    }

    #[test]
    fn minus_one_and_null_mean_no_slot() {
        assert_eq!(SlotAssignment::from_wire(&json!(-1)), SlotAssignment::NotRequired);
        assert_eq!(SlotAssignment::from_wire(&json!("-1")), SlotAssignment::NotRequired);
        assert_eq!(SlotAssignment::from_wire(&Value::Null), SlotAssignment::NotRequired);
        assert_eq!(SlotAssignment::from_wire(&json!("17")), SlotAssignment::Assigned(17));
        assert_eq!(SlotAssignment::from_wire(&json!(104)), SlotAssignment::Assigned(104));
    }

    #[test]
    fn overflow_and_error_replies_are_kept_verbatim() {
        let overflow = "57, Overflow! Using Slot 57 as overflow slot";
        assert_eq!(
            SlotAssignment::from_wire(&json!(overflow)),
            SlotAssignment::Other(overflow.to_owned())
        );
        assert_eq!(
            SlotAssignment::from_wire(&json!("No slots available")),
            SlotAssignment::Other("No slots available".to_owned())
        );

        let notification = DeviceNotification {
            slot: SlotAssignment::Other(overflow.to_owned()),
            ucd: "10/30".to_owned(),
            requested_for: "Ada".to_owned(),
            config_item: "LT-1".to_owned(),
        };
        assert_eq!(
            notification.summary(),
            format!("Customer: Ada\nDevice: LT-1\nSlot: {overflow}\nUCD: 10/30")
        );
    }

    #[test]
    fn summary_lists_slot_or_email_only() {
        let mut notification = DeviceNotification {
            slot: SlotAssignment::Assigned(12),
            ucd: "5/20".to_owned(),
            requested_for: "Ada Lovelace".to_owned(),
            config_item: "LT-0042".to_owned(),
        };
        assert_eq!(
            notification.summary(),
            "Customer: Ada Lovelace\nDevice: LT-0042\nSlot: 12\nUCD: 5/20"
        );

        notification.slot = SlotAssignment::NotRequired;
        notification.ucd.clear();
        assert_eq!(
            notification.summary(),
            "Customer: Ada Lovelace\nDevice: LT-0042\nEmail notification sent. Device does not require slotting."
        );
    }

    #[test]
    fn loaner_messages() {
        assert_eq!(
            LoanerNotification::Sent.message("LN-1", "ada@example.com"),
            "Notification sent to ada@example.com for loaner LN-1."
        );
        assert_eq!(
            LoanerNotification::Rejected(None).message("LN-1", "ada@example.com"),
            "Failed to send notification: Unknown error"
        );
    }
}
