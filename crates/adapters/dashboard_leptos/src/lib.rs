use devicehub_app::services::dashboard_service::DashboardService;
use devicehub_domain::session::Session;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

pub mod api;
mod components;
mod config;
pub mod live;
mod pages;
mod save;
mod store;

use api::HttpApi;
use components::{Nav, ToastContainer, use_toasts};
use pages::{Devices, Firmware, Login, NotFound, Settings};
use store::DashboardState;

/// Root application component.
///
/// Shows the login page until a session exists, then the dashboard shell.
/// The session lives only in memory.
#[component]
pub fn App() -> impl IntoView {
    let config = config::load();
    let timeout_ms = config.toast_timeout_ms;
    let api = HttpApi::new(config);
    let session = RwSignal::new(None::<Session>);

    view! {
        <ToastContainer timeout_ms>
            {move || match session.get() {
                Some(current) => view! {
                    <Shell
                        session=current
                        api=api.clone()
                        on_logout=move |()| session.set(None)
                    />
                }
                .into_any(),
                None => view! {
                    <Login api=api.clone() on_login=move |s: Session| session.set(Some(s))/>
                }
                .into_any(),
            }}
        </ToastContainer>
    }
}

/// Logged-in dashboard: owns the device state and the live feed for as long
/// as it is mounted.
#[component]
fn Shell(
    session: Session,
    /// Unauthenticated client; the shell binds it to the session token.
    api: HttpApi,
    #[prop(into)] on_logout: Callback<()>,
) -> impl IntoView {
    let api = api.with_token(&session.token);
    let toasts = use_toasts();
    let state = DashboardState::new();
    provide_context(api.clone());
    provide_context(state);

    let service = DashboardService::new(api.clone(), toasts, state);
    spawn_local(async move {
        service.load().await;
        let _ = state.loaded.try_set(true);
    });

    let handler = live::DashboardLiveHandler::new(api.clone(), toasts, state);
    let feed = live::spawn_live_feed(&api, &session.user.id, handler);
    on_cleanup(move || drop(feed));

    view! {
        <Router>
            <Nav
                username=session.user.username.clone()
                connection=state.connection
                on_logout
            />
            <main>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=Devices/>
                    <Route path=path!("firmware") view=Firmware/>
                    <Route path=path!("settings") view=Settings/>
                </Routes>
            </main>
        </Router>
    }
}
