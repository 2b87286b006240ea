//! Top-level navigation stack
//!
//! Two routes only: the login screen and the authenticated tab group.
//! Tabs inside the group are not stack entries.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    Login,
    MainTabs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    routes: Vec<Route>,
}

impl NavigationStack {
    /// Stack holding only `initial`
    pub fn new(initial: Route) -> Self {
        Self {
            routes: vec![initial],
        }
    }

    pub fn current(&self) -> Route {
        // never empty: `go_back` refuses to pop the last entry
        self.routes[self.routes.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Swap the current entry for `route`; the old entry is not reachable
    /// by going back
    pub fn replace(&mut self, route: Route) {
        self.routes.pop();
        self.routes.push(route);
    }

    pub fn can_go_back(&self) -> bool {
        self.routes.len() > 1
    }

    /// Pop the current entry. Returns false at the root.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.routes.pop();
        true
    }

    pub fn depth(&self) -> usize {
        self.routes.len()
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}
