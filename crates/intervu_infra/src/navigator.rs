use std::sync::{Mutex, PoisonError};

use intervu_domain::{Navigation, Route};
use intervu_services::NavigationInfra;
use tracing::info;

/// Remembers where the services last asked to go. A terminal front end reads
/// it back after each command to decide what to show next.
#[derive(Default)]
pub struct RouteNavigator {
    current: Mutex<Option<Navigation>>,
}

impl RouteNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Navigation> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_at(&self, route: &Route) -> bool {
        self.current().is_some_and(|navigation| &navigation.route == route)
    }
}

impl NavigationInfra for RouteNavigator {
    fn navigate(&self, navigation: Navigation) {
        info!(route = %navigation.route, with_state = navigation.state.is_some(), "Navigating");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(navigation);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_latest_navigation_wins() {
        let fixture = RouteNavigator::new();

        fixture.navigate(Route::Home.into());
        fixture.navigate(Route::Login.into());

        assert!(fixture.is_at(&Route::Login));
        assert!(!fixture.is_at(&Route::Home));
        assert_eq!(fixture.current(), Some(Navigation::to(Route::Login)));
    }
}
