//! Authenticated URL management page: shorten form on top, the user's
//! links below with click counts, copy buttons, and a refresh control.

use leptos::prelude::*;
use leptos::task::spawn_local;

use shortly_shared::ShortLink;

use crate::api::{ShortlyApi, api_base_url, shareable_url};
use crate::auth::use_session;
use crate::components::icons::{Link2, MousePointerClick, RefreshCw};
use crate::components::navbar::NavBar;
use crate::components::shorten_form::ShortenForm;
use crate::web::{ScopeAbort, clipboard};

/// One listed link plus the clicks registered locally since the last fetch.
/// Opening a short link routes through the backend, which counts the visit;
/// `pending_clicks` mirrors that optimistically until a refresh replaces it.
#[derive(Debug, Clone, PartialEq)]
struct UrlRow {
    record: ShortLink,
    pending_clicks: u64,
}

impl UrlRow {
    fn new(record: ShortLink) -> Self {
        Self {
            record,
            pending_clicks: 0,
        }
    }
}

fn bump_pending(rows: &mut [UrlRow], id: &str) {
    if let Some(row) = rows.iter_mut().find(|row| row.record.id == id) {
        row.pending_clicks += 1;
    }
}

#[component]
pub fn UrlPage() -> impl IntoView {
    let ctx = use_session();
    let aborter = StoredValue::new_local(ScopeAbort::register());

    let (rows, set_rows) = signal(Vec::<UrlRow>::new());
    let (loading, set_loading) = signal(true);
    let (copied_id, set_copied_id) = signal(Option::<String>::None);
    let (copy_error, set_copy_error) = signal(Option::<String>::None);

    let load_urls = {
        let ctx = ctx.clone();
        move || {
            set_loading.set(true);
            let abort = aborter.with_value(|a| a.handle());
            let api = ShortlyApi::new(api_base_url(), ctx.token()).with_abort(abort.clone());
            spawn_local(async move {
                let result = api.list_urls().await;
                if abort.aborted() {
                    return;
                }
                set_loading.set(false);
                match result {
                    // A fresh list also resets optimistic pending counts.
                    Ok(records) => set_rows.set(records.into_iter().map(UrlRow::new).collect()),
                    Err(err) => {
                        web_sys::console::error_1(&format!("failed to load urls: {err}").into());
                        set_rows.set(Vec::new());
                    }
                }
            });
        }
    };

    Effect::new({
        let load_urls = load_urls.clone();
        move |_| load_urls()
    });

    let on_created = Callback::new({
        let load_urls = load_urls.clone();
        move |_code: String| load_urls()
    });

    view! {
        <div class="min-h-screen bg-base-200">
            <NavBar />
            <main class="mx-auto max-w-5xl space-y-8 px-4 py-10">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="badge badge-outline badge-primary">"Live link shortener"</div>
                        <h1 class="text-3xl font-bold">"URL Shortener"</h1>
                        <p class="mb-2 text-base-content/70">
                            "Transform long URLs into short, shareable links in seconds."
                        </p>
                        <ShortenForm on_created=on_created />
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h2 class="card-title">"Your Short URLs"</h2>
                            <button
                                type="button"
                                class="btn btn-ghost btn-circle btn-sm"
                                title="Refresh"
                                disabled=move || loading.get()
                                on:click={
                                    let load_urls = load_urls.clone();
                                    move |_| load_urls()
                                }
                            >
                                <RefreshCw attr:class=move || {
                                    if loading.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" }
                                } />
                            </button>
                        </div>

                        <Show when=move || copy_error.with(|e| e.is_some())>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || copy_error.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show
                            when=move || !loading.get()
                            fallback=|| view! {
                                <div class="flex items-center justify-center gap-3 py-10 text-base-content/60">
                                    <span class="loading loading-spinner"></span>
                                    "Loading your URLs..."
                                </div>
                            }
                        >
                            <Show
                                when=move || rows.with(|r| !r.is_empty())
                                fallback=|| view! {
                                    <div class="flex flex-col items-center gap-2 py-10 text-center text-base-content/60">
                                        <Link2 attr:class="h-8 w-8" />
                                        <p class="font-medium">"No URLs created yet"</p>
                                        <p class="text-sm">"Create your first short URL above!"</p>
                                    </div>
                                }
                            >
                                <div class="space-y-3">
                                    <For
                                        each=move || rows.get()
                                        key=|row| row.record.id.clone()
                                        children=move |row: UrlRow| {
                                            let row_id = row.record.id.clone();
                                            let short_link = shareable_url(&api_base_url(), &row.record.short_url);
                                            let full_url = row.record.full_url.clone();
                                            let created = row
                                                .record
                                                .created_at
                                                .map(|ts| ts.format("%b %d, %Y").to_string())
                                                .unwrap_or_else(|| "-".to_string());

                                            // Keyed rows render once per id, so click counts
                                            // must come back in through the rows signal.
                                            let counts = Memo::new({
                                                let id = row_id.clone();
                                                move |_| {
                                                    rows.with(|rows| {
                                                        rows.iter()
                                                            .find(|r| r.record.id == id)
                                                            .map(|r| (r.record.clicks, r.pending_clicks))
                                                            .unwrap_or((0, 0))
                                                    })
                                                }
                                            });

                                            let on_open = {
                                                let id = row_id.clone();
                                                move |_| set_rows.update(|rows| bump_pending(rows, &id))
                                            };

                                            let on_copy = {
                                                let text = short_link.clone();
                                                let id = row_id.clone();
                                                move |_| {
                                                    let text = text.clone();
                                                    let id = id.clone();
                                                    spawn_local(async move {
                                                        match clipboard::write_text(&text).await {
                                                            Ok(()) => {
                                                                set_copy_error.try_set(None);
                                                                set_copied_id.try_set(Some(id));
                                                                set_timeout(
                                                                    move || {
                                                                        set_copied_id.try_set(None);
                                                                    },
                                                                    std::time::Duration::from_secs(2),
                                                                );
                                                            }
                                                            Err(err) => {
                                                                web_sys::console::error_1(&err.to_string().into());
                                                                set_copy_error.try_set(Some(
                                                                    "Failed to copy to clipboard".to_string(),
                                                                ));
                                                            }
                                                        }
                                                    });
                                                }
                                            };

                                            let copy_label = {
                                                let id = row_id.clone();
                                                move || {
                                                    if copied_id.with(|c| c.as_deref() == Some(id.as_str())) {
                                                        "✓ Copied!"
                                                    } else {
                                                        "Copy"
                                                    }
                                                }
                                            };

                                            view! {
                                                <div class="flex flex-col gap-3 rounded-box border border-base-300 bg-base-100 p-4 sm:flex-row sm:items-center sm:justify-between">
                                                    <div class="min-w-0 flex-1">
                                                        <a
                                                            href=short_link.clone()
                                                            target="_blank"
                                                            rel="noopener noreferrer"
                                                            class="link link-primary break-all font-semibold"
                                                            on:click=on_open
                                                        >
                                                            {short_link.clone()}
                                                        </a>
                                                        <p class="truncate text-sm text-base-content/60" title=full_url.clone()>
                                                            {full_url.clone()}
                                                        </p>
                                                        <div class="mt-1 flex flex-wrap items-center gap-2 text-xs text-base-content/60">
                                                            <MousePointerClick attr:class="h-3.5 w-3.5" />
                                                            <span>{move || format!("{} clicks", counts.get().0)}</span>
                                                            <Show when=move || { counts.get().1 > 0 }>
                                                                <span class="badge badge-ghost badge-sm">
                                                                    {move || format!("+{} pending", counts.get().1)}
                                                                </span>
                                                            </Show>
                                                            <span>{format!("Created {created}")}</span>
                                                        </div>
                                                    </div>
                                                    <button
                                                        type="button"
                                                        class="btn btn-outline btn-sm whitespace-nowrap"
                                                        title="Copy to clipboard"
                                                        on:click=on_copy
                                                    >
                                                        {copy_label}
                                                    </button>
                                                </div>
                                            }
                                        }
                                    />
                                </div>
                            </Show>
                        </Show>
                    </div>
                </div>
            </main>
        </div>
    }
}
