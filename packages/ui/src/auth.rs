//! Session context and hooks for the UI.

use catalog::{DogCatalog, Session};
use dioxus::prelude::*;

use crate::favorites::use_favorites;
use crate::service::use_catalog;

/// Get the current session.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<Session> {
    try_use_context::<Signal<Session>>().expect("use_auth must be called inside an AuthProvider")
}

/// Provider component that owns the session for its subtree.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(Session::new()));

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
///
/// The local session and favorites are cleared even if the remote call
/// fails, then `on_logout` fires so the caller can navigate away.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let mut auth = use_auth();
    let mut favorites = use_favorites();
    let catalog = use_catalog();
    let mut busy = use_signal(|| false);

    let onclick = move |_| async move {
        busy.set(true);
        let client = catalog.peek().clone();
        if let Err(e) = client.logout().await {
            tracing::warn!("Remote logout failed: {}", e);
        }
        auth.write().logout();
        favorites.write().clear();
        busy.set(false);
        on_logout.call(());
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}
