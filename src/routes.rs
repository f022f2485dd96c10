// Client-side routing surface
// Maps site paths to pages and decides where missing treks and unknown paths go

use crate::catalog::TrekCatalog;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Treks,
    TrekDetail(String),
    // Optionally pre-selects a trek in the booking form
    Booking(Option<String>),
    About,
    Contact,
}

impl Route {
    // Query strings, fragments and trailing slashes are ignored
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["treks"] => Some(Route::Treks),
            ["treks", id] => Some(Route::TrekDetail(id.to_string())),
            ["booking"] => Some(Route::Booking(None)),
            ["booking", trek_id] => Some(Route::Booking(Some(trek_id.to_string()))),
            ["about"] => Some(Route::About),
            ["contact"] => Some(Route::Contact),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Treks => "/treks".to_string(),
            Route::TrekDetail(id) => format!("/treks/{}", id),
            Route::Booking(None) => "/booking".to_string(),
            Route::Booking(Some(trek_id)) => format!("/booking/{}", trek_id),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

impl Resolution {
    pub fn route(&self) -> &Route {
        match self {
            Resolution::Render(route) | Resolution::Redirect(route) => route,
        }
    }
}

pub fn resolve(path: &str, catalog: &TrekCatalog) -> Resolution {
    match Route::parse(path) {
        None => {
            debug!(path, "unknown path, redirecting home");
            Resolution::Redirect(Route::Home)
        }
        Some(Route::TrekDetail(id)) if catalog.get_trek_by_id(&id).is_none() => {
            debug!(trek_id = %id, "trek not found, redirecting to listing");
            Resolution::Redirect(Route::Treks)
        }
        Some(Route::Booking(Some(trek_id))) if catalog.get_trek_by_id(&trek_id).is_none() => {
            debug!(trek_id = %trek_id, "unknown trek on booking path, dropping pre-selection");
            Resolution::Render(Route::Booking(None))
        }
        Some(route) => Resolution::Render(route),
    }
}
