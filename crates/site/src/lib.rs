mod commands;
mod navigation;
mod pages;
mod web_app;

pub use commands::{contact_commands, home_commands, project_commands, skill_commands};
pub use navigation::RouterNavigation;
pub use web_app::SiteApp;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
