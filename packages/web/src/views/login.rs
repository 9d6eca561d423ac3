//! Login page view.

use catalog::{authenticate, Credentials, LOGIN_FAILED_MESSAGE};
use dioxus::prelude::*;
use ui::{use_auth, use_catalog, LoginForm};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let catalog = use_catalog();
    let nav = use_navigator();
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    // Already signed in
    if auth.read().is_authenticated() {
        nav.replace(Route::Dogs {});
    }

    let handle_submit = move |credentials: Credentials| {
        loading.set(true);
        error.set(None);
        spawn(async move {
            let client = catalog.peek().clone();
            let outcome = authenticate(&client, credentials).await;
            loading.set(false);
            match outcome {
                Ok(user) => {
                    auth.write().login(user);
                    nav.push(Route::Dogs {});
                }
                Err(_) => error.set(Some(LOGIN_FAILED_MESSAGE.to_string())),
            }
        });
    };

    rsx! {
        div {
            class: "login-container",
            LoginForm {
                loading: loading(),
                error: error(),
                on_submit: handle_submit,
            }
        }
    }
}
