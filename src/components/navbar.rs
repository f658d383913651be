//! Top navigation bar, shared by every page.
//!
//! Signed-out visitors get Login / Sign Up buttons; signed-in users get an
//! avatar dropdown with their display name and a Logout entry.

use leptos::prelude::*;

use crate::auth::use_session;
use crate::components::icons::Link2;
use crate::web::router::use_router;

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_session();
    let session = ctx.session();
    let router = use_router();
    let (menu_open, set_menu_open) = signal(false);

    let on_logout = {
        let ctx = ctx.clone();
        move || {
            set_menu_open.set(false);
            ctx.sign_out();
            router.navigate("/");
        }
    };

    let avatar_initial = move || {
        session.with(|s| s.initial().map(String::from))
            .unwrap_or_else(|| "?".to_string())
    };

    view! {
        <div class="navbar bg-base-100 px-4 shadow-sm sm:px-6">
            <div class="flex-1">
                <button class="btn btn-ghost gap-2 text-lg" on:click=move |_| router.navigate("/")>
                    <Link2 attr:class="h-5 w-5 text-primary" />
                    "URL Shortener"
                </button>
            </div>
            <div class="flex-none">
                <Show
                    when=move || session.with(|s| s.is_authenticated())
                    fallback=move || view! {
                        <div class="flex items-center gap-2">
                            <button class="btn btn-ghost" on:click=move |_| router.navigate("/login-user")>
                                "Login"
                            </button>
                            <button class="btn btn-primary" on:click=move |_| router.navigate("/register-user")>
                                "Sign Up"
                            </button>
                        </div>
                    }
                >
                    {
                        let on_logout = on_logout.clone();
                        view! {
                            <div class="dropdown dropdown-end">
                                <button
                                    class="btn btn-ghost btn-circle avatar avatar-placeholder"
                                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                                >
                                    <div class="w-10 rounded-full bg-primary text-primary-content">
                                        <span class="text-lg">{avatar_initial}</span>
                                    </div>
                                </button>
                                <Show when=move || menu_open.get()>
                                    {
                                        let on_logout = on_logout.clone();
                                        view! {
                                            <ul class="menu dropdown-content z-10 mt-3 w-52 rounded-box bg-base-100 p-2 shadow">
                                                <li class="menu-title">
                                                    {move || session.with(|s| s.display_name().to_string())}
                                                </li>
                                                <li>
                                                    <button on:click=move |_| on_logout()>"Logout"</button>
                                                </li>
                                            </ul>
                                        }
                                    }
                                </Show>
                            </div>
                        }
                    }
                </Show>
            </div>
        </div>
    }
}
