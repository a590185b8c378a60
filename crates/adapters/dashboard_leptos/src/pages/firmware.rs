//! Firmware manager: versions per device type, upload and OTA push.

use devicehub_app::ports::Notifier;
use devicehub_app::services::firmware_service::FirmwareService;
use devicehub_domain::dashboard;
use devicehub_domain::firmware::{FirmwareUploadForm, FirmwareVersion};
use devicehub_domain::id::{DeviceId, DeviceTypeId, FirmwareId};
use devicehub_domain::time;
use leptos::ev::{Event, SubmitEvent};
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpApi;
use crate::components::use_toasts;
use crate::save;
use crate::store::{DashboardState, FirmwareState};

#[component]
pub fn Firmware() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let state = expect_context::<DashboardState>();
    let toasts = use_toasts();
    let firmware = FirmwareState::new();
    provide_context(firmware);

    let on_select = move |ev: Event| {
        let value = event_target_value(&ev);
        firmware.versions.set(Vec::new());
        if value.is_empty() {
            firmware.selected.set(None);
            return;
        }
        let device_type_id = DeviceTypeId::new(value);
        firmware.selected.set(Some(device_type_id.clone()));

        let service = FirmwareService::new(api.clone(), toasts, firmware);
        spawn_local(async move {
            service.list(&device_type_id).await;
        });
    };

    view! {
        <div>
            <h1>"Firmware"</h1>
            <label>
                "Device type"
                <select on:change=on_select>
                    <option value="">"Select a device type"</option>
                    {move || {
                        state
                            .device_types
                            .get()
                            .into_iter()
                            .map(|t| view! { <option value=t.id.to_string()>{t.name}</option> })
                            .collect_view()
                    }}
                </select>
            </label>
            <Show
                when=move || firmware.selected.with(Option::is_some)
                fallback=|| {
                    view! { <p class="muted">"Select a device type to manage its firmware."</p> }
                }
            >
                <UploadForm/>
                <VersionTable/>
            </Show>
        </div>
    }
}

/// Multipart upload for the selected device type.
#[component]
fn UploadForm() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let firmware = expect_context::<FirmwareState>();
    let toasts = use_toasts();

    let version = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let file_input: NodeRef<Input> = NodeRef::new();
    let (is_uploading, set_is_uploading) = signal(false);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let input = file_input.get();
        let form = FirmwareUploadForm {
            device_type_id: firmware.selected.get_untracked(),
            version: version.get_untracked(),
            description: description.get_untracked(),
            file: input
                .as_ref()
                .and_then(web_sys::HtmlInputElement::files)
                .and_then(|files| files.get(0)),
        };
        let service = FirmwareService::new(api.clone(), toasts, firmware);

        set_is_uploading.set(true);
        spawn_local(async move {
            let uploaded = service.upload(form).await;
            let _ = set_is_uploading.try_set(false);
            if uploaded {
                let _ = version.try_set(String::new());
                let _ = description.try_set(String::new());
                if let Some(input) = input {
                    input.set_value("");
                }
            }
        });
    };

    view! {
        <form class="inline-form" on:submit=submit>
            <h2>"Upload firmware"</h2>
            <label>
                "Version"
                <input type="text" placeholder="1.0.1" bind:value=version/>
            </label>
            <label>
                "Description"
                <input type="text" bind:value=description/>
            </label>
            <label>
                "Binary"
                <input type="file" accept=".bin" node_ref=file_input/>
            </label>
            <button type="submit" disabled=move || is_uploading.get()>
                {move || if is_uploading.get() { "Uploading\u{2026}" } else { "Upload" }}
            </button>
        </form>
    }
}

#[component]
fn VersionTable() -> impl IntoView {
    let firmware = expect_context::<FirmwareState>();

    move || {
        let versions = firmware.versions.get();
        if versions.is_empty() {
            view! { <p>"No firmware uploaded for this device type."</p> }.into_any()
        } else {
            view! {
                <table>
                    <thead>
                        <tr>
                            <th>"Version"</th>
                            <th>"Description"</th>
                            <th>"Size"</th>
                            <th>"Uploaded"</th>
                            <th>"Download"</th>
                            <th>"OTA update"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {versions
                            .into_iter()
                            .map(|version| view! { <VersionRow version/> })
                            .collect::<Vec<_>>()}
                    </tbody>
                </table>
            }
            .into_any()
        }
    }
}

#[component]
fn VersionRow(version: FirmwareVersion) -> impl IntoView {
    let size = version.size_display();
    let uploaded = time::display_opt(version.created_at.as_ref());
    let description = version
        .description
        .clone()
        .unwrap_or_else(|| "\u{2014}".to_string());

    view! {
        <tr>
            <td>{version.version.clone()}</td>
            <td>{description}</td>
            <td>{size}</td>
            <td>{uploaded}</td>
            <td>
                <DownloadButton firmware_id=version.id.clone()/>
            </td>
            <td>
                <OtaPush firmware_id=version.id device_type_id=version.device_type_id/>
            </td>
        </tr>
    }
}

/// Fetches the binary with the session token and saves it locally.
#[component]
fn DownloadButton(firmware_id: FirmwareId) -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let firmware = expect_context::<FirmwareState>();
    let toasts = use_toasts();
    let (is_downloading, set_is_downloading) = signal(false);

    let download = move |_| {
        let firmware_id = firmware_id.clone();
        let service = FirmwareService::new(api.clone(), toasts, firmware);

        set_is_downloading.set(true);
        spawn_local(async move {
            if let Some(binary) = service.download(&firmware_id).await {
                if let Err(err) = save::save_binary(&binary) {
                    tracing::warn!(error = ?err, "failed to save firmware");
                    toasts.error(format!("Failed to save {}", binary.file_name));
                }
            }
            let _ = set_is_downloading.try_set(false);
        });
    };

    view! {
        <button on:click=download disabled=move || is_downloading.get()>
            {move || if is_downloading.get() { "Downloading\u{2026}" } else { "Download" }}
        </button>
    }
}

/// Target picker limited to devices of the version's type.
#[component]
fn OtaPush(firmware_id: FirmwareId, device_type_id: DeviceTypeId) -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let state = expect_context::<DashboardState>();
    let firmware = expect_context::<FirmwareState>();
    let toasts = use_toasts();

    let target = RwSignal::new(String::new());
    let (is_pushing, set_is_pushing) = signal(false);

    let push = move |_| {
        let device_id = target.get_untracked();
        if device_id.is_empty() {
            toasts.error("Select a target device");
            return;
        }
        let device_id = DeviceId::new(device_id);
        let firmware_id = firmware_id.clone();
        let service = FirmwareService::new(api.clone(), toasts, firmware);

        set_is_pushing.set(true);
        spawn_local(async move {
            service.push(&device_id, &firmware_id).await;
            let _ = set_is_pushing.try_set(false);
        });
    };

    view! {
        <div class="ota-push">
            <select
                on:change=move |ev| target.set(event_target_value(&ev))
                prop:value=move || target.get()
            >
                <option value="">"Target device"</option>
                {move || {
                    state.devices.with(|devices| {
                        dashboard::of_type(devices, &device_type_id)
                            .map(|d| {
                                let label = format!("{} ({})", d.name, d.status);
                                view! { <option value=d.id.to_string()>{label}</option> }
                            })
                            .collect_view()
                    })
                }}
            </select>
            <button on:click=push disabled=move || is_pushing.get()>
                {move || if is_pushing.get() { "Pushing\u{2026}" } else { "Push" }}
            </button>
        </div>
    }
}
