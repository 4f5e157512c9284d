//! Router-backed [`NavigationService`] for terminals mounted inside the site router.

use std::rc::Rc;

use leptos_router::{use_navigate, NavigateOptions};
use platform_host::NavigationService;
use platform_host_web::WebLocationNavigation;

/// Client-side navigation through `leptos_router`; reloads go through `window.location`.
#[derive(Clone)]
pub struct RouterNavigation {
    navigate: Rc<dyn Fn(&str)>,
    reload: Rc<dyn NavigationService>,
}

impl RouterNavigation {
    /// Wraps the navigate function of the surrounding `<Router>`.
    pub fn from_router() -> Self {
        let navigate = use_navigate();
        Self::new(move |path| navigate(path, NavigateOptions::default()))
    }

    /// Builds a router from a plain navigate callback.
    pub fn new(navigate: impl Fn(&str) + 'static) -> Self {
        Self {
            navigate: Rc::new(navigate),
            reload: Rc::new(WebLocationNavigation),
        }
    }
}

impl NavigationService for RouterNavigation {
    fn navigate(&self, path: &str) -> Result<(), String> {
        if !path.starts_with('/') {
            return Err(format!("refusing to navigate to non-site path `{path}`"));
        }
        (self.navigate)(path);
        Ok(())
    }

    fn reload(&self) -> Result<(), String> {
        self.reload.reload()
    }
}
