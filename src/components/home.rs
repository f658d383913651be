//! Public landing page: hero with the shorten form, feature highlights,
//! and sign-up calls to action.
//!
//! The router keeps authenticated users off this page, so it only ever
//! renders for guests.

use leptos::prelude::*;

use crate::components::icons::{BarChart2, ShieldCheck, Zap};
use crate::components::navbar::NavBar;
use crate::components::shorten_form::ShortenForm;
use crate::web::router::use_router;

#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="min-h-screen bg-base-200">
            <NavBar />
            <main>
                <section class="hero py-16">
                    <div class="hero-content w-full max-w-3xl flex-col gap-6 text-center">
                        <div class="badge badge-outline badge-primary">"Fast, Simple, Reliable"</div>
                        <h1 class="text-4xl font-bold sm:text-5xl">"Shorten Your URLs"</h1>
                        <p class="max-w-xl text-base-content/70">
                            "Transform long, complex URLs into short, shareable links in seconds. Perfect for social media, emails, and more."
                        </p>
                        <div class="card w-full bg-base-100 shadow-xl">
                            <div class="card-body text-left">
                                <ShortenForm />
                            </div>
                        </div>
                        <div class="flex flex-wrap justify-center gap-3">
                            <button class="btn btn-primary" on:click=move |_| router.navigate("/login-user")>
                                "Get Started"
                            </button>
                            <button class="btn btn-outline" on:click=move |_| router.navigate("/register-user")>
                                "Create Account"
                            </button>
                        </div>
                    </div>
                </section>

                <section class="mx-auto max-w-5xl px-4 pb-16">
                    <div class="mb-10 text-center">
                        <h2 class="text-3xl font-bold">"Why Choose Our URL Shortener?"</h2>
                        <p class="mt-2 text-base-content/70">
                            "Everything you need to manage and share your links effectively"
                        </p>
                    </div>
                    <div class="grid gap-6 sm:grid-cols-3">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <Zap attr:class="h-8 w-8 text-primary" />
                                <h3 class="card-title text-lg">"Lightning Fast"</h3>
                                <p class="text-sm text-base-content/70">
                                    "Generate short URLs instantly with our optimized infrastructure"
                                </p>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <ShieldCheck attr:class="h-8 w-8 text-primary" />
                                <h3 class="card-title text-lg">"Secure & Reliable"</h3>
                                <p class="text-sm text-base-content/70">
                                    "Your links are safe with enterprise-grade security and reliability"
                                </p>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <BarChart2 attr:class="h-8 w-8 text-primary" />
                                <h3 class="card-title text-lg">"Analytics Ready"</h3>
                                <p class="text-sm text-base-content/70">
                                    "Track clicks and monitor performance with detailed analytics"
                                </p>
                            </div>
                        </div>
                    </div>
                </section>
            </main>
            <footer class="footer footer-center bg-base-100 p-6 text-base-content/60">
                <p>"© 2025 URL Shortener. All rights reserved."</p>
            </footer>
        </div>
    }
}
