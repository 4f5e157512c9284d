//! `window.location`-backed navigation.

use platform_host::NavigationService;

#[derive(Debug, Clone, Copy, Default)]
/// Navigates by assigning `window.location`, which loads the target as a full page.
///
/// Hosts with a client-side router use this for reloads and as a fallback outside the router.
pub struct WebLocationNavigation;

impl WebLocationNavigation {
    #[cfg(target_arch = "wasm32")]
    fn location() -> Result<web_sys::Location, String> {
        web_sys::window()
            .map(|window| window.location())
            .ok_or_else(|| "window unavailable".to_string())
    }
}

impl NavigationService for WebLocationNavigation {
    fn navigate(&self, path: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::location()?
                .set_href(path)
                .map_err(|e| format!("location.href assignment failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = path;
            Ok(())
        }
    }

    fn reload(&self) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::location()?
                .reload()
                .map_err(|e| format!("location.reload failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(())
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn host_build_accepts_requests() {
        let router = WebLocationNavigation;
        assert_eq!(router.navigate("/projects"), Ok(()));
        assert_eq!(router.reload(), Ok(()));
    }
}
