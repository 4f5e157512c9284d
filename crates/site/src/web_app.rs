use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use portfolio_app_terminal::{ToastNotifier, ToastStack};

use crate::pages::{AboutPage, ContactPage, HomePage, NotFoundPage, ProjectsPage, SkillsPage};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();
    let toasts = ToastNotifier::default();
    provide_context(toasts);

    view! {
        <Title text="Developer Portfolio" />
        <Meta name="description" content="A neo-brutalist CLI-inspired developer portfolio." />

        <Router>
            <nav class="site-nav">
                <A href="/" exact=true>"~"</A>
                <A href="/about">"about"</A>
                <A href="/projects">"projects"</A>
                <A href="/skills">"skills"</A>
                <A href="/contact">"contact"</A>
            </nav>
            <main class="site-root">
                <Routes>
                    <Route path="" view=HomePage />
                    <Route path="/about" view=AboutPage />
                    <Route path="/projects" view=ProjectsPage />
                    <Route path="/skills" view=SkillsPage />
                    <Route path="/contact" view=ContactPage />
                    <Route path="/*any" view=NotFoundPage />
                </Routes>
            </main>
            <ToastStack notifier=toasts />
        </Router>
    }
}
