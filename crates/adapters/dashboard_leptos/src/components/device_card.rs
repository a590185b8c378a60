//! Device card: summary, pin control, recent readings and delete.

use devicehub_app::services::dashboard_service::DashboardService;
use devicehub_app::services::device_service::DeviceService;
use devicehub_domain::device::Device;
use devicehub_domain::device_type;
use devicehub_domain::id::DeviceId;
use devicehub_domain::sensor::SensorReading;
use devicehub_domain::time;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{Loading, use_toasts};
use crate::api::HttpApi;
use crate::store::DashboardState;

/// One device, looked up by id in the shared state so that live status
/// changes re-render only its summary.
#[component]
pub fn DeviceCard(id: DeviceId) -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let state = expect_context::<DashboardState>();
    let toasts = use_toasts();

    let device = Memo::new({
        let id = id.clone();
        move |_| {
            state
                .devices
                .with(|devices| devices.iter().find(|d| d.id == id).cloned())
        }
    });

    let (is_deleting, set_is_deleting) = signal(false);
    let delete = {
        let api = api.clone();
        let id = id.clone();
        move |_| {
            let service = DashboardService::new(api.clone(), toasts, state);
            let id = id.clone();
            set_is_deleting.set(true);
            spawn_local(async move {
                service.delete_device(&id).await;
                let _ = set_is_deleting.try_set(false);
            });
        }
    };

    view! {
        <div class="device-card">
            {move || {
                device
                    .get()
                    .map(|device| {
                        let type_name = state.device_types.with(|types| {
                            device_type::name_of(types, &device.device_type_id).to_string()
                        });
                        let ws_url = api.config().device_ws_url(&device.id, &device.auth_token);
                        view! { <DeviceSummary device type_name ws_url/> }
                    })
            }}
            <PinControl id=id.clone()/>
            <RecentReadings id/>
            <div class="card-actions">
                <button class="btn-danger" on:click=delete disabled=move || is_deleting.get()>
                    {move || if is_deleting.get() { "Deleting\u{2026}" } else { "Delete" }}
                </button>
            </div>
        </div>
    }
}

#[component]
fn DeviceSummary(device: Device, type_name: String, ws_url: String) -> impl IntoView {
    let status_class = if device.status.is_online() {
        "badge badge-online"
    } else {
        "badge badge-offline"
    };
    let firmware = device
        .firmware_version
        .clone()
        .unwrap_or_else(|| "\u{2014}".to_string());
    let last_seen = time::display_opt(device.last_seen.as_ref());
    let ip_address = device.ip_address.clone().unwrap_or_else(|| "\u{2014}".to_string());

    view! {
        <div class="card-header">
            <h3>{device.name.clone()}</h3>
            <span class=status_class>{device.status.to_string()}</span>
        </div>
        <dl class="card-details">
            <dt>"Type"</dt>
            <dd>{type_name}</dd>
            <dt>"Firmware"</dt>
            <dd>{firmware}</dd>
            <dt>"Last seen"</dt>
            <dd>{last_seen}</dd>
            <dt>"IP address"</dt>
            <dd>{ip_address}</dd>
            {device.wifi_ssid.clone().map(|ssid| view! {
                <dt>"Wi-Fi"</dt>
                <dd>{ssid}</dd>
            })}
            <dt>"Auth token"</dt>
            <dd><code>{device.auth_token.clone()}</code></dd>
            <dt>"Connection URL"</dt>
            <dd><code class="wrap">{ws_url}</code></dd>
        </dl>
    }
}

/// Free-text pin/value form. The card does not change until the device
/// reports back.
#[component]
fn PinControl(id: DeviceId) -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let toasts = use_toasts();

    let pin = RwSignal::new(String::new());
    let value = RwSignal::new(String::new());
    let (is_sending, set_is_sending) = signal(false);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let service = DeviceService::new(api.clone(), toasts);
        let id = id.clone();
        let pin_value = pin.get_untracked();
        let raw_value = value.get_untracked();

        set_is_sending.set(true);
        spawn_local(async move {
            service.control_pin(&id, &pin_value, &raw_value).await;
            let _ = set_is_sending.try_set(false);
        });
    };

    view! {
        <form class="pin-control" on:submit=submit>
            <input type="text" placeholder="Pin (e.g. D4)" bind:value=pin/>
            <input type="text" placeholder="Value" bind:value=value/>
            <button type="submit" disabled=move || is_sending.get()>
                {move || if is_sending.get() { "Sending\u{2026}" } else { "Send" }}
            </button>
        </form>
    }
}

/// On-demand list of the latest sensor readings.
#[component]
fn RecentReadings(id: DeviceId) -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let toasts = use_toasts();
    let limit = api.config().sensor_history_limit;

    let is_open = RwSignal::new(false);
    let readings = RwSignal::new(None::<Vec<SensorReading>>);

    let toggle = move |_| {
        if is_open.get_untracked() {
            is_open.set(false);
            return;
        }
        is_open.set(true);
        readings.set(None);

        let service = DeviceService::new(api.clone(), toasts);
        let id = id.clone();
        spawn_local(async move {
            match service.sensor_history(&id, limit).await {
                Some(list) => {
                    let _ = readings.try_set(Some(list));
                }
                None => {
                    let _ = is_open.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="readings">
            <button class="btn-link" on:click=toggle>
                {move || if is_open.get() { "Hide readings" } else { "Recent readings" }}
            </button>
            <Show when=move || is_open.get()>
                {move || match readings.get() {
                    None => view! { <Loading message="Loading readings\u{2026}"/> }.into_any(),
                    Some(list) if list.is_empty() => view! {
                        <p class="muted">"No readings yet."</p>
                    }.into_any(),
                    Some(list) => view! {
                        <ul class="reading-list">
                            {list.into_iter().map(|reading| {
                                let at = time::display_opt(reading.timestamp.as_ref());
                                let data = reading.data_display();
                                view! {
                                    <li>
                                        <span class="reading-time">{at}</span>
                                        <code>{data}</code>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    }.into_any(),
                }}
            </Show>
        </div>
    }
}
