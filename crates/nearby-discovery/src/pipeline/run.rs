use serde::Serialize;

/// Lifecycle of one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    LocatingUser,
    Searching,
    Enriching,
    Ready,
    Failed,
}

impl SearchPhase {
    /// Forward-only transitions; `Failed` is reachable from any active phase.
    #[must_use]
    pub fn can_advance_to(self, next: SearchPhase) -> bool {
        use SearchPhase::{Enriching, Failed, Idle, LocatingUser, Ready, Searching};
        matches!(
            (self, next),
            (Idle, LocatingUser)
                | (LocatingUser, Searching)
                | (Searching, Enriching)
                | (Enriching, Ready)
                | (LocatingUser | Searching | Enriching, Failed)
        )
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchPhase::Ready | SearchPhase::Failed)
    }
}

impl std::fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SearchPhase::Idle => "idle",
            SearchPhase::LocatingUser => "locating user",
            SearchPhase::Searching => "searching",
            SearchPhase::Enriching => "enriching",
            SearchPhase::Ready => "ready",
            SearchPhase::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// State machine for a single `run_search` call.
#[derive(Debug, Clone)]
pub struct SearchRun {
    generation: u64,
    phase: SearchPhase,
    history: Vec<SearchPhase>,
}

impl SearchRun {
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            phase: SearchPhase::Idle,
            history: vec![SearchPhase::Idle],
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Every phase visited so far, starting with `Idle`.
    #[must_use]
    pub fn history(&self) -> &[SearchPhase] {
        &self.history
    }

    /// Moves to `next` and returns `true`, or returns `false` and stays put
    /// if the transition would go backwards or skip a phase.
    pub fn advance(&mut self, next: SearchPhase) -> bool {
        if !self.phase.can_advance_to(next) {
            tracing::warn!(
                generation = self.generation,
                from = %self.phase,
                to = %next,
                "rejected search phase transition"
            );
            return false;
        }
        tracing::debug!(generation = self.generation, phase = %next, "search phase");
        self.phase = next;
        self.history.push(next);
        true
    }

    /// Marks the run failed unless it already finished.
    pub fn fail(&mut self) {
        if !self.phase.is_terminal() && self.phase != SearchPhase::Idle {
            self.advance(SearchPhase::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_visits_every_phase_in_order() {
        let mut run = SearchRun::new(1);

        assert!(run.advance(SearchPhase::LocatingUser));
        assert!(run.advance(SearchPhase::Searching));
        assert!(run.advance(SearchPhase::Enriching));
        assert!(run.advance(SearchPhase::Ready));

        assert_eq!(
            run.history(),
            &[
                SearchPhase::Idle,
                SearchPhase::LocatingUser,
                SearchPhase::Searching,
                SearchPhase::Enriching,
                SearchPhase::Ready,
            ]
        );
    }

    #[test]
    fn rejects_backwards_and_skipping_transitions() {
        let mut run = SearchRun::new(1);
        assert!(!run.advance(SearchPhase::Searching));
        run.advance(SearchPhase::LocatingUser);
        run.advance(SearchPhase::Searching);

        assert!(!run.advance(SearchPhase::LocatingUser));
        assert!(!run.advance(SearchPhase::Ready));
        assert_eq!(run.phase(), SearchPhase::Searching);
    }

    #[test]
    fn fail_from_active_phase_only() {
        let mut idle = SearchRun::new(1);
        idle.fail();
        assert_eq!(idle.phase(), SearchPhase::Idle);

        let mut run = SearchRun::new(2);
        run.advance(SearchPhase::LocatingUser);
        run.fail();
        assert_eq!(run.phase(), SearchPhase::Failed);

        run.fail();
        assert_eq!(run.history().len(), 3);
    }

    #[test]
    fn ready_is_terminal() {
        assert!(!SearchPhase::Ready.can_advance_to(SearchPhase::Failed));
        assert!(SearchPhase::Ready.is_terminal());
        assert!(SearchPhase::Failed.is_terminal());
    }
}
