use std::time::Duration;

use crate::TripResult;

/// How long the splash page is shown before moving on to the home form.
pub const SPLASH_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Splash,
    Home,
    Results,
    Map,
    History,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEvent {
    SplashElapsed,
    PlanCompleted,
    ShowMap,
    ShowHistory,
    Back,
    Home,
}

impl Page {
    /// Next page for `event`. Pairs without a transition keep the current page.
    pub fn next(self, event: PageEvent) -> Page {
        match (self, event) {
            (Page::Splash, PageEvent::SplashElapsed) => Page::Home,
            (Page::Splash, _) => Page::Splash,
            (Page::Home, PageEvent::PlanCompleted) => Page::Results,
            (Page::Results, PageEvent::ShowMap) => Page::Map,
            (Page::Map, PageEvent::Back) => Page::Results,
            (Page::Results, PageEvent::Back) => Page::Home,
            (Page::History, PageEvent::Back) => Page::Home,
            (_, PageEvent::ShowHistory) => Page::History,
            (_, PageEvent::Home) => Page::Home,
            (page, _) => page,
        }
    }
}

/// Navigation state plus the trip computed in this session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub page: Page,
    pub current_trip: Option<TripResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(self, event: PageEvent) -> Self {
        Self {
            page: self.page.next(event),
            ..self
        }
    }

    /// Stores the finished trip and moves to the results page.
    ///
    /// The trip is only kept when the transition is accepted, so a late
    /// completion arriving on another page does not replace what is shown.
    pub fn plan_completed(self, trip: TripResult) -> Self {
        let page = self.page.next(PageEvent::PlanCompleted);
        if page == Page::Results {
            Self {
                page,
                current_trip: Some(trip),
            }
        } else {
            self
        }
    }
}
