//! Router contracts used for programmatic page navigation.

use std::{cell::RefCell, rc::Rc};

/// Host service that maps paths to pages.
pub trait NavigationService {
    /// Navigates the host to `path`.
    fn navigate(&self, path: &str) -> Result<(), String>;

    /// Reloads the current page.
    fn reload(&self) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Router that ignores every request.
pub struct NoopNavigationService;

impl NavigationService for NoopNavigationService {
    fn navigate(&self, _path: &str) -> Result<(), String> {
        Ok(())
    }

    fn reload(&self) -> Result<(), String> {
        Ok(())
    }
}

/// One request observed by [`RecordingNavigationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    /// `navigate(path)` was called.
    Navigate(String),
    /// `reload()` was called.
    Reload,
}

#[derive(Debug, Clone, Default)]
/// Router that records requests in call order. Clones share the log.
pub struct RecordingNavigationService {
    requests: Rc<RefCell<Vec<NavigationRequest>>>,
}

impl RecordingNavigationService {
    /// Returns the recorded requests.
    pub fn requests(&self) -> Vec<NavigationRequest> {
        self.requests.borrow().clone()
    }
}

impl NavigationService for RecordingNavigationService {
    fn navigate(&self, path: &str) -> Result<(), String> {
        self.requests
            .borrow_mut()
            .push(NavigationRequest::Navigate(path.to_string()));
        Ok(())
    }

    fn reload(&self) -> Result<(), String> {
        self.requests.borrow_mut().push(NavigationRequest::Reload);
        Ok(())
    }
}
