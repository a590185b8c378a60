//! Login / registration page.

use devicehub_app::services::session_service::SessionService;
use devicehub_domain::session::{AuthMode, CredentialsForm, Session};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpApi;
use crate::components::use_toasts;

/// Collects credentials and hands the issued session to `on_login`.
#[component]
pub fn Login(
    /// Unauthenticated client.
    api: HttpApi,
    #[prop(into)] on_login: Callback<Session>,
) -> impl IntoView {
    let toasts = use_toasts();

    let mode = RwSignal::new(AuthMode::Login);
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let (is_pending, set_is_pending) = signal(false);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let service = SessionService::new(api.clone(), toasts);
        let current = mode.get_untracked();
        let form = CredentialsForm {
            username: username.get_untracked(),
            password: password.get_untracked(),
            email: email.get_untracked(),
        };

        set_is_pending.set(true);
        spawn_local(async move {
            let session = service.submit(current, &form).await;
            let _ = set_is_pending.try_set(false);
            if let Some(session) = session {
                on_login.run(session);
            }
        });
    };

    view! {
        <div class="login">
            <form class="login-card" on:submit=submit>
                <h1>"DeviceHub"</h1>
                <p class="muted">
                    {move || match mode.get() {
                        AuthMode::Login => "Sign in to manage your devices",
                        AuthMode::Register => "Create an account",
                    }}
                </p>
                <label>
                    "Username"
                    <input type="text" autocomplete="username" bind:value=username/>
                </label>
                <Show when=move || mode.get().requires_email()>
                    <label>
                        "Email"
                        <input type="email" autocomplete="email" bind:value=email/>
                    </label>
                </Show>
                <label>
                    "Password"
                    <input type="password" autocomplete="current-password" bind:value=password/>
                </label>
                <button type="submit" disabled=move || is_pending.get()>
                    {move || match (is_pending.get(), mode.get()) {
                        (true, _) => "Please wait\u{2026}",
                        (false, AuthMode::Login) => "Log in",
                        (false, AuthMode::Register) => "Register",
                    }}
                </button>
                <button
                    type="button"
                    class="btn-link"
                    on:click=move |_| mode.update(|m| *m = m.toggled())
                >
                    {move || match mode.get() {
                        AuthMode::Login => "No account? Register",
                        AuthMode::Register => "Already registered? Log in",
                    }}
                </button>
            </form>
        </div>
    }
}
