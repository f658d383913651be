//! Registration page. Mirrors the login card with name and password
//! confirmation fields; a password mismatch never reaches the network.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ShortlyApi, api_base_url};
use crate::auth::use_session;
use crate::components::navbar::NavBar;
use crate::web::ScopeAbort;
use crate::web::router::use_router;

/// Message shown when the two password fields hold different values.
fn password_mismatch(password: &str, confirm: &str) -> Option<&'static str> {
    if password == confirm {
        None
    } else {
        Some("Passwords do not match")
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let aborter = StoredValue::new_local(ScopeAbort::register());

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // One toggle drives both password fields.
    let password_type = move || if show_password.get() { "text" } else { "password" };
    let mismatch_message =
        move || password.with(|p| confirm_password.with(|c| password_mismatch(p, c)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if let Some(message) = mismatch_message() {
            set_error_msg.set(Some(message.to_string()));
            return;
        }

        set_error_msg.set(None);
        set_is_submitting.set(true);

        let abort = aborter.with_value(|a| a.handle());
        let api = ShortlyApi::new(api_base_url(), None).with_abort(abort.clone());
        let session = session.clone();
        let name_value = name.with(|n| n.trim().to_string());
        let email_value = email.with(|e| e.trim().to_string());
        let password_value = password.get();

        spawn_local(async move {
            let result = api.register(&name_value, &email_value, &password_value).await;
            if abort.aborted() {
                return;
            }
            set_is_submitting.set(false);
            match result {
                Ok(auth) => {
                    let display_name = auth.display_name.unwrap_or(name_value);
                    session.sign_in(&auth.token, &display_name);
                }
                Err(err) => set_error_msg.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <NavBar />
            <main class="flex justify-center px-4 py-16">
                <div class="card w-full max-w-md bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h1 class="text-2xl font-bold">"Create your account"</h1>
                        <p class="mb-2 text-sm text-base-content/70">
                            "Register to start shortening URLs"
                        </p>

                        <Show when=move || error_msg.with(|e| e.is_some())>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <form on:submit=on_submit class="space-y-4">
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Name"</span>
                                </label>
                                <input
                                    type="text"
                                    placeholder="Your name"
                                    class="input input-bordered w-full"
                                    prop:value=name
                                    required
                                    disabled=move || is_submitting.get()
                                    on:input=move |ev| set_name.set(event_target_value(&ev))
                                />
                            </div>

                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Email"</span>
                                </label>
                                <input
                                    type="email"
                                    placeholder="you@example.com"
                                    class="input input-bordered w-full"
                                    prop:value=email
                                    required
                                    disabled=move || is_submitting.get()
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                />
                            </div>

                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Password"</span>
                                    <button
                                        type="button"
                                        class="btn btn-ghost btn-xs"
                                        on:click=move |_| set_show_password.update(|v| *v = !*v)
                                    >
                                        {move || if show_password.get() { "Hide" } else { "Show" }}
                                    </button>
                                </label>
                                <input
                                    type=password_type
                                    placeholder="••••••••"
                                    class="input input-bordered w-full"
                                    prop:value=password
                                    required
                                    disabled=move || is_submitting.get()
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                />
                            </div>

                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Confirm Password"</span>
                                </label>
                                <input
                                    type=password_type
                                    placeholder="••••••••"
                                    class="input input-bordered w-full"
                                    prop:value=confirm_password
                                    required
                                    disabled=move || is_submitting.get()
                                    on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                                />
                                <Show when=move || {
                                    confirm_password.with(|c| !c.is_empty())
                                        && mismatch_message().is_some()
                                }>
                                    <span class="label-text-alt mt-1 text-error">
                                        {move || mismatch_message().unwrap_or_default()}
                                    </span>
                                </Show>
                            </div>

                            <button
                                type="submit"
                                class="btn btn-primary w-full"
                                disabled=move || is_submitting.get()
                            >
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create account".into_any()
                                }}
                            </button>
                        </form>

                        <p class="mt-4 text-center text-sm text-base-content/70">
                            "Already have an account? "
                            <button
                                class="link link-primary"
                                on:click=move |_| router.navigate("/login-user")
                            >
                                "Login"
                            </button>
                        </p>
                    </div>
                </div>
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::password_mismatch;

    #[test]
    fn differing_passwords_surface_the_mismatch_message() {
        assert_eq!(
            password_mismatch("hunter2", "hunter3"),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn matching_passwords_raise_nothing() {
        assert_eq!(password_mismatch("hunter2", "hunter2"), None);
    }

    #[test]
    fn an_empty_confirm_field_counts_as_a_mismatch() {
        assert_eq!(
            password_mismatch("hunter2", ""),
            Some("Passwords do not match")
        );
    }
}
