//! Step/route mapping and the session entry marker.
//!
//! The route is the source of truth for the active step; the navigator's
//! location is a cache reconciled on every visit.

use wizard_logging::{wizard_debug, wizard_info, wizard_warn};

use crate::GuideSection;

pub const WIZARD_ROOT: &str = "/interview-v2";
pub const STEP_ROUTE_PREFIX: &str = "/interview-v2/step/";
/// Résumé upload, job details, then one step per guide section.
pub const STEP_COUNT: usize = 2 + GuideSection::ALL.len();

/// A validated step index in `0..STEP_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WizardStep(usize);

impl WizardStep {
    pub const RESUME_UPLOAD: WizardStep = WizardStep(0);
    pub const JOB_DETAILS: WizardStep = WizardStep(1);
    pub const LAST: WizardStep = WizardStep(STEP_COUNT - 1);

    pub fn new(index: usize) -> Option<Self> {
        (index < STEP_COUNT).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    pub fn route(self) -> String {
        format!("{STEP_ROUTE_PREFIX}{}", self.0)
    }

    pub fn requires_guide(self) -> bool {
        self.guide_section().is_some()
    }

    pub fn guide_section(self) -> Option<GuideSection> {
        self.0
            .checked_sub(2)
            .and_then(|offset| GuideSection::ALL.get(offset).copied())
    }

    pub fn title(self) -> &'static str {
        match self.guide_section() {
            Some(section) => section.title(),
            None if self == Self::RESUME_UPLOAD => "Upload Resume",
            None => "Job Details",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Step(WizardStep),
    Invalid(String),
}

/// Maps a route path to a step. The wizard root lands on step 0; anything
/// else outside `/interview-v2/step/{0..STEP_COUNT}` is invalid.
pub fn parse_route(path: &str) -> RouteTarget {
    let trimmed = path.trim();
    let trimmed = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
    let trimmed = trimmed.trim_end_matches('/');

    if trimmed == WIZARD_ROOT {
        return RouteTarget::Step(WizardStep::RESUME_UPLOAD);
    }

    trimmed
        .strip_prefix(STEP_ROUTE_PREFIX)
        .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|id| id.parse::<usize>().ok())
        .and_then(WizardStep::new)
        .map(RouteTarget::Step)
        .unwrap_or_else(|| RouteTarget::Invalid(path.to_owned()))
}

/// Where the navigator currently believes the user is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Location {
    /// No route has been reported yet.
    #[default]
    Unvisited,
    Step(WizardStep),
    Invalid(String),
}

impl Location {
    pub fn step(&self) -> Option<WizardStep> {
        match self {
            Location::Step(step) => Some(*step),
            Location::Unvisited | Location::Invalid(_) => None,
        }
    }
}

/// Distinguishes a fresh entry to step 0 from an incidental re-visit.
///
/// Set on the first visit to step 0, cleared when a different step is
/// visited. While set, visits to step 0 do not reset the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionEntryMarker {
    initialized: bool,
}

impl SessionEntryMarker {
    pub fn is_set(&self) -> bool {
        self.initialized
    }

    fn set(&mut self) {
        self.initialized = true;
    }

    fn clear(&mut self) {
        self.initialized = false;
    }
}

/// Result of reconciling the cache with a reported route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    Step {
        step: WizardStep,
        previous: Option<WizardStep>,
        /// The cached step differed from the visited one.
        changed: bool,
        /// First visit to step 0 in this session; the wizard must reset.
        fresh_entry: bool,
    },
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepNavigator {
    location: Location,
    marker: SessionEntryMarker,
}

impl StepNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn current_step(&self) -> Option<WizardStep> {
        self.location.step()
    }

    pub fn marker(&self) -> SessionEntryMarker {
        self.marker
    }

    /// Forces the cache to the visited route. Invalid routes touch nothing
    /// but the cached location.
    pub fn visit(&mut self, target: RouteTarget) -> Visit {
        match target {
            RouteTarget::Invalid(raw) => {
                wizard_warn!("Invalid step route requested: {raw}");
                self.location = Location::Invalid(raw);
                Visit::Invalid
            }
            RouteTarget::Step(step) => {
                let previous = self.location.step();
                let changed = self.location != Location::Step(step);
                self.location = Location::Step(step);

                let fresh_entry = if step == WizardStep::RESUME_UPLOAD {
                    let fresh = !self.marker.is_set();
                    self.marker.set();
                    fresh
                } else {
                    self.marker.clear();
                    false
                };
                if fresh_entry {
                    wizard_info!("Fresh session entry at step 0");
                } else if changed {
                    wizard_debug!("Navigated to step {}", step.index());
                }

                Visit::Step {
                    step,
                    previous,
                    changed,
                    fresh_entry,
                }
            }
        }
    }

    /// Explicit start-over: land on step 0 with the marker already set so
    /// the echoed route does not reset a second time.
    pub(crate) fn restart(&mut self) {
        self.location = Location::Step(WizardStep::RESUME_UPLOAD);
        self.marker.set();
    }
}
