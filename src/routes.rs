//! Route table module
//!
//! Maps exact request paths to handlers, with a catch-all fallback.
//! Only two routes exist today, but keeping the table explicit makes
//! dispatch testable without a socket.

use std::collections::HashMap;

pub const API_HELLO_PATH: &str = "/api/hello";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// JSON greeting endpoint
    ApiHello,
    /// Fallback: the static welcome page
    Welcome,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    exact: HashMap<String, Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        let mut exact = HashMap::new();
        exact.insert(API_HELLO_PATH.to_string(), Route::ApiHello);
        Self { exact }
    }
}

impl RouteTable {
    /// Resolve a request path. Exact match only; everything else,
    /// including `/`, falls through to the welcome page.
    pub fn resolve(&self, path: &str) -> Route {
        self.exact.get(path).copied().unwrap_or(Route::Welcome)
    }
}
