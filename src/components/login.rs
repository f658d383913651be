//! Login page. On success the session is signed in and the router's auth
//! effect moves the user to the URL page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ShortlyApi, api_base_url};
use crate::auth::use_session;
use crate::components::navbar::NavBar;
use crate::web::ScopeAbort;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let aborter = StoredValue::new_local(ScopeAbort::register());

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        set_is_submitting.set(true);

        let abort = aborter.with_value(|a| a.handle());
        let api = ShortlyApi::new(api_base_url(), None).with_abort(abort.clone());
        let session = session.clone();
        let email_value = email.with(|e| e.trim().to_string());
        let password_value = password.get();

        spawn_local(async move {
            let result = api.login(&email_value, &password_value).await;
            if abort.aborted() {
                return;
            }
            set_is_submitting.set(false);
            match result {
                Ok(auth) => {
                    // Signing in flips the auth signal; the router redirects.
                    let display_name = auth.display_name.unwrap_or(email_value);
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
                        <h1 class="text-2xl font-bold">"Welcome back"</h1>
                        <p class="mb-2 text-sm text-base-content/70">
                            "Login to continue to URL Shortener"
                        </p>

                        <Show when=move || error_msg.with(|e| e.is_some())>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <form on:submit=on_submit class="space-y-4">
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
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    placeholder="••••••••"
                                    class="input input-bordered w-full"
                                    prop:value=password
                                    required
                                    disabled=move || is_submitting.get()
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                />
                            </div>

                            <div class="flex items-center justify-between text-sm">
                                <label class="label cursor-pointer gap-2 p-0">
                                    <input type="checkbox" class="checkbox checkbox-sm" />
                                    <span class="label-text">"Remember me"</span>
                                </label>
                                <a class="link link-primary">"Forgot password?"</a>
                            </div>

                            <button
                                type="submit"
                                class="btn btn-primary w-full"
                                disabled=move || is_submitting.get()
                            >
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </form>

                        <p class="mt-4 text-center text-sm text-base-content/70">
                            "Don't have an account? "
                            <button
                                class="link link-primary"
                                on:click=move |_| router.navigate("/register-user")
                            >
                                "Register"
                            </button>
                        </p>
                    </div>
                </div>
            </main>
        </div>
    }
}
