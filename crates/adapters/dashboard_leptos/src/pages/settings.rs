use leptos::prelude::*;

use crate::components::AddDeviceTypeForm;
use crate::store::DashboardState;

/// Device types: the list and the creation form.
#[component]
pub fn Settings() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    view! {
        <div>
            <h1>"Device types"</h1>
            {move || {
                let types = state.device_types.get();
                if types.is_empty() {
                    view! { <p>"No device types yet."</p> }.into_any()
                } else {
                    view! {
                        <table>
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Description"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {types.into_iter().map(|t| {
                                    let description = t
                                        .description
                                        .unwrap_or_else(|| "\u{2014}".to_string());
                                    view! {
                                        <tr>
                                            <td>{t.name}</td>
                                            <td>{description}</td>
                                        </tr>
                                    }
                                }).collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }.into_any()
                }
            }}
            <AddDeviceTypeForm/>
        </div>
    }
}
