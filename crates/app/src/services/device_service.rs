//! Device service: actions available on a single device card.

use devicehub_domain::id::DeviceId;
use devicehub_domain::pin::PinCommand;
use devicehub_domain::sensor::SensorReading;

use crate::ports::{DeviceHubApi, Notifier};

/// Pin control and reading history for one device at a time.
pub struct DeviceService<A, N> {
    api: A,
    notifier: N,
}

impl<A: DeviceHubApi, N: Notifier> DeviceService<A, N> {
    /// Create a new service backed by the given ports.
    pub fn new(api: A, notifier: N) -> Self {
        Self { api, notifier }
    }

    /// Send a pin command built from the card's free-text fields.
    ///
    /// Nothing is changed locally; the device reports its new state on its
    /// own.
    #[tracing::instrument(skip(self))]
    pub async fn control_pin(&self, device_id: &DeviceId, pin: &str, value: &str) -> bool {
        let command = match PinCommand::from_form(device_id.clone(), pin, value) {
            Ok(command) => command,
            Err(err) => {
                self.notifier.error(err.to_string());
                return false;
            }
        };

        match self.api.control_pin(&command).await {
            Ok(()) => {
                tracing::info!(pin = %command.pin, value = %command.value, "pin command sent");
                self.notifier
                    .success(format!("Pin {} set to {}", command.pin, command.value));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "pin command failed");
                self.notifier.error(format!("Failed to control pin: {err}"));
                false
            }
        }
    }

    /// Fetch the `limit` most recent readings of a device.
    #[tracing::instrument(skip(self))]
    pub async fn sensor_history(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> Option<Vec<SensorReading>> {
        match self.api.sensor_history(device_id, limit).await {
            Ok(readings) => Some(readings),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load sensor data");
                self.notifier
                    .error(format!("Failed to load sensor data: {err}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ApiError, NoticeLevel};
    use crate::testing::{Call, FakeApi, RecordingNotifier};
    use devicehub_domain::pin::PinValue;

    #[tokio::test]
    async fn should_send_integer_value_as_number() {
        let api = FakeApi::default();
        let notifier = RecordingNotifier::default();
        let svc = DeviceService::new(&api, &notifier);

        assert!(svc.control_pin(&DeviceId::new("d1"), "D4", "1").await);

        assert_eq!(
            *api.calls.borrow(),
            vec![Call::ControlPin(PinCommand {
                device_id: DeviceId::new("d1"),
                pin: "D4".to_string(),
                value: PinValue::Int(1),
            })]
        );
        assert_eq!(notifier.last().unwrap().text, "Pin D4 set to 1");
    }

    #[tokio::test]
    async fn should_send_text_value_unchanged() {
        let api = FakeApi::default();
        let notifier = RecordingNotifier::default();
        let svc = DeviceService::new(&api, &notifier);

        svc.control_pin(&DeviceId::new("d1"), "LED", "on").await;

        assert_eq!(
            api.count(|c| matches!(
                c,
                Call::ControlPin(PinCommand { value: PinValue::Text(v), .. }) if v == "on"
            )),
            1
        );
    }

    #[tokio::test]
    async fn should_not_call_api_for_empty_pin_or_value() {
        let api = FakeApi::default();
        let notifier = RecordingNotifier::default();
        let svc = DeviceService::new(&api, &notifier);

        assert!(!svc.control_pin(&DeviceId::new("d1"), "", "1").await);
        assert!(!svc.control_pin(&DeviceId::new("d1"), "D4", " ").await);

        assert_eq!(api.total_calls(), 0);
        assert_eq!(notifier.levels(), vec![NoticeLevel::Error, NoticeLevel::Error]);
    }

    #[tokio::test]
    async fn should_report_rejected_pin_command() {
        let api = FakeApi::default();
        *api.mutation_error.borrow_mut() =
            Some(ApiError::http(403, Some("Not authorized".to_string())));
        let notifier = RecordingNotifier::default();
        let svc = DeviceService::new(&api, &notifier);

        assert!(!svc.control_pin(&DeviceId::new("d1"), "D4", "0").await);
        assert_eq!(
            notifier.last().unwrap().text,
            "Failed to control pin: Not authorized"
        );
    }

    #[tokio::test]
    async fn should_request_history_with_limit() {
        let api = FakeApi::default();
        *api.readings.borrow_mut() = Ok(vec![
            serde_json::from_str(r#"{"id": "r1", "device_id": "d1", "data": {"temp": 20}}"#)
                .unwrap(),
        ]);
        let notifier = RecordingNotifier::default();
        let svc = DeviceService::new(&api, &notifier);

        let readings = svc.sensor_history(&DeviceId::new("d1"), 10).await.unwrap();

        assert_eq!(readings.len(), 1);
        assert_eq!(
            *api.calls.borrow(),
            vec![Call::SensorHistory(DeviceId::new("d1"), 10)]
        );
    }

    #[tokio::test]
    async fn should_surface_history_failure() {
        let api = FakeApi::default();
        *api.readings.borrow_mut() = Err(ApiError::Transport("offline".to_string()));
        let notifier = RecordingNotifier::default();
        let svc = DeviceService::new(&api, &notifier);

        assert!(svc.sensor_history(&DeviceId::new("d1"), 10).await.is_none());
        assert_eq!(notifier.levels(), vec![NoticeLevel::Error]);
    }
}
