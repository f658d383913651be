//! The create-short-URL form, shared by the landing page and the URL page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ShortlyApi, api_base_url};
use crate::auth::use_session;
use crate::web::{ScopeAbort, clipboard};

/// Lifecycle of one shorten submission. Success and error are separate
/// variants, never both at once; editing the input returns a settled phase
/// to idle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    /// Carries the full shareable URL, base address included.
    Success(String),
    Error(String),
}

impl SubmitPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn shareable_url(&self) -> Option<&str> {
        match self {
            Self::Success(url) => Some(url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Editing drops a settled outcome; an in-flight submission keeps
    /// running and lands normally.
    pub fn clear_outcome(&mut self) {
        if matches!(self, Self::Success(_) | Self::Error(_)) {
            *self = Self::Idle;
        }
    }
}

/// Trims the entered URL. Blank or whitespace-only input is rejected with
/// the message shown under the form.
fn validate_url_input(input: &str) -> Result<String, &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err("Please enter a URL")
    } else {
        Ok(trimmed.to_string())
    }
}

#[component]
pub fn ShortenForm(
    /// Called with the assigned short code after a successful create.
    #[prop(optional, into)]
    on_created: Option<Callback<String>>,
) -> impl IntoView {
    let session = use_session();
    let aborter = StoredValue::new_local(ScopeAbort::register());

    let (url, set_url) = signal(String::new());
    let (phase, set_phase) = signal(SubmitPhase::Idle);
    let (copied, set_copied) = signal(false);
    let (copy_error, set_copy_error) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_copied.set(false);
        set_copy_error.set(None);

        let long_url = match url.with(|u| validate_url_input(u)) {
            Ok(value) => value,
            Err(message) => {
                set_phase.set(SubmitPhase::Error(message.to_string()));
                return;
            }
        };

        set_phase.set(SubmitPhase::Submitting);
        let abort = aborter.with_value(|a| a.handle());
        let api = ShortlyApi::new(api_base_url(), session.token()).with_abort(abort.clone());

        spawn_local(async move {
            let result = api.create_short_url(&long_url).await;
            if abort.aborted() {
                return;
            }
            match result {
                Ok(code) => {
                    set_phase.set(SubmitPhase::Success(api.shareable_url(&code)));
                    if let Some(on_created) = on_created {
                        on_created.run(code);
                    }
                }
                Err(err) => set_phase.set(SubmitPhase::Error(err.user_message())),
            }
        });
    };

    let shareable = move || {
        phase
            .with(|p| p.shareable_url().map(str::to_string))
            .unwrap_or_default()
    };

    let on_copy = move |_| {
        let Some(text) = phase.with(|p| p.shareable_url().map(str::to_string)) else {
            return;
        };
        spawn_local(async move {
            match clipboard::write_text(&text).await {
                // The promise may settle after this view is gone, so every
                // write from here on is a try_set.
                Ok(()) => {
                    set_copy_error.try_set(None);
                    set_copied.try_set(true);
                    set_timeout(
                        move || {
                            set_copied.try_set(false);
                        },
                        std::time::Duration::from_secs(2),
                    );
                }
                Err(err) => {
                    web_sys::console::error_1(&err.to_string().into());
                    set_copy_error.try_set(Some("Failed to copy to clipboard".to_string()));
                }
            }
        });
    };

    let error_text = move || {
        phase
            .with(|p| p.error().map(str::to_string))
            .or_else(|| copy_error.get())
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <div class="flex flex-col gap-3 sm:flex-row">
                <input
                    type="text"
                    placeholder="Enter your long URL here..."
                    class="input input-bordered flex-1"
                    prop:value=url
                    disabled=move || phase.with(|p| p.is_submitting())
                    on:input=move |ev| {
                        set_url.set(event_target_value(&ev));
                        set_phase.update(|phase| phase.clear_outcome());
                    }
                />
                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || phase.with(|p| p.is_submitting())
                >
                    {move || if phase.with(|p| p.is_submitting()) {
                        view! { <span class="loading loading-spinner"></span> "Shortening..." }.into_any()
                    } else {
                        "Shorten URL".into_any()
                    }}
                </button>
            </div>

            <Show when=move || error_text().is_some()>
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{move || error_text().unwrap_or_default()}</span>
                </div>
            </Show>
        </form>

        <Show when=move || phase.with(|p| p.shareable_url().is_some())>
            <div class="mt-6 rounded-box border border-primary/30 bg-primary/10 p-4">
                <div class="text-sm font-medium mb-2">"Your shortened URL"</div>
                <div class="flex flex-col gap-3 sm:flex-row sm:items-center">
                    <a
                        href=shareable
                        target="_blank"
                        rel="noopener noreferrer"
                        class="link link-primary flex-1 break-all text-lg font-semibold"
                    >
                        {shareable}
                    </a>
                    <button
                        type="button"
                        class="btn btn-outline btn-sm whitespace-nowrap"
                        title="Copy to clipboard"
                        on:click=on_copy
                    >
                        {move || if copied.get() { "✓ Copied!" } else { "Copy" }}
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_rejected_before_any_request() {
        assert_eq!(validate_url_input(""), Err("Please enter a URL"));
        assert_eq!(validate_url_input("   "), Err("Please enter a URL"));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_from_the_url() {
        assert_eq!(
            validate_url_input("  https://example.com/some/long/path  "),
            Ok("https://example.com/some/long/path".to_string())
        );
        assert_eq!(
            validate_url_input("https://example.com"),
            Ok("https://example.com".to_string())
        );
    }

    #[test]
    fn editing_clears_a_settled_outcome() {
        let mut phase = SubmitPhase::Success("https://short.ly/abc123".to_string());
        phase.clear_outcome();
        assert_eq!(phase, SubmitPhase::Idle);

        let mut phase = SubmitPhase::Error("Please enter a URL".to_string());
        phase.clear_outcome();
        assert_eq!(phase, SubmitPhase::Idle);
    }

    #[test]
    fn editing_does_not_interrupt_an_in_flight_submission() {
        let mut phase = SubmitPhase::Submitting;
        phase.clear_outcome();
        assert_eq!(phase, SubmitPhase::Submitting);

        let mut phase = SubmitPhase::Idle;
        phase.clear_outcome();
        assert_eq!(phase, SubmitPhase::Idle);
    }

    #[test]
    fn success_and_error_are_mutually_exclusive() {
        let success = SubmitPhase::Success("https://short.ly/abc123".to_string());
        assert_eq!(success.shareable_url(), Some("https://short.ly/abc123"));
        assert_eq!(success.error(), None);
        assert!(!success.is_submitting());

        let error = SubmitPhase::Error("Something went wrong. Please try again.".to_string());
        assert_eq!(error.error(), Some("Something went wrong. Please try again."));
        assert_eq!(error.shareable_url(), None);

        assert!(SubmitPhase::Submitting.is_submitting());
        assert_eq!(SubmitPhase::Idle.shareable_url(), None);
        assert_eq!(SubmitPhase::Idle.error(), None);
    }
}
