use catalog::Credentials;
use dioxus::prelude::*;

/// Name and email form. Submission is handed to `on_submit`; the caller owns
/// the remote call and passes back `loading` and `error`.
#[component]
pub fn LoginForm(
    on_submit: EventHandler<Credentials>,
    #[props(default)] loading: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        on_submit.call(Credentials::new(name().trim(), email().trim()));
    };

    rsx! {
        form {
            class: "login-form",
            onsubmit: handle_submit,

            h1 { class: "login-title", "Welcome to Fetch!" }

            input {
                r#type: "text",
                placeholder: "Your Name",
                required: true,
                value: name(),
                oninput: move |evt: FormEvent| name.set(evt.value()),
            }

            input {
                r#type: "email",
                placeholder: "Your Email",
                required: true,
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }

            button {
                r#type: "submit",
                class: "primary",
                disabled: loading,
                if loading { "Signing in..." } else { "Login" }
            }

            if let Some(err) = error {
                p { class: "login-error", "{err}" }
            }
        }
    }
}
