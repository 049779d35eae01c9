//! Step scheduling for the intro and hero timelines
//!
//! A timeline is an ordered list of named steps. Each step's start time is
//! fixed when it is added, from its [`Position`]. Advancing the clock fires
//! every step whose start has been reached, in (start, insertion) order.

/// Where a step starts relative to what came before
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Right after the preceding step ends (`">"`)
    AfterPrevious,
    /// This long before the preceding step ends (`"-=N"`), clamped at 0
    Overlap(f64),
    /// Absolute time from timeline start
    At(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledStep<A> {
    pub label: &'static str,
    pub start: f64,
    pub duration: f64,
    pub action: A,
    fired: bool,
}

impl<A> ScheduledStep<A> {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A step reaching its start time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired<A> {
    pub label: &'static str,
    pub at: f64,
    pub action: A,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<A> {
    steps: Vec<ScheduledStep<A>>,
    elapsed: f64,
    completed: bool,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            elapsed: 0.0,
            completed: false,
        }
    }
}

impl<A: Copy> Timeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step; returns its scheduled start
    pub fn push(&mut self, label: &'static str, duration: f64, position: Position, action: A) -> f64 {
        let prev_end = self.steps.last().map(ScheduledStep::end).unwrap_or(0.0);
        let start = match position {
            Position::AfterPrevious => prev_end,
            Position::Overlap(n) => (prev_end - n).max(0.0),
            Position::At(t) => t.max(0.0),
        };
        self.steps.push(ScheduledStep {
            label,
            start,
            duration: duration.max(0.0),
            action,
            fired: false,
        });
        start
    }

    /// Natural end of the timeline
    pub fn duration(&self) -> f64 {
        self.steps.iter().map(ScheduledStep::end).fold(0.0, f64::max)
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn start_of(&self, label: &str) -> Option<f64> {
        self.steps.iter().find(|s| s.label == label).map(|s| s.start)
    }

    /// Move the clock forward and collect newly started steps.
    ///
    /// Returns `(fired, just_completed)`. Completion is reported once, on
    /// the advance that reaches the natural end.
    pub fn advance(&mut self, dt: f64) -> (Vec<Fired<A>>, bool) {
        if self.completed {
            return (Vec::new(), false);
        }
        self.elapsed += dt.max(0.0);

        let mut due: Vec<usize> = self
            .steps
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.fired && s.start <= self.elapsed + f64::EPSILON)
            .map(|(i, _)| i)
            .collect();
        // Stable sort keeps insertion order for equal starts
        due.sort_by(|&a, &b| self.steps[a].start.total_cmp(&self.steps[b].start));

        let fired = due
            .into_iter()
            .map(|i| {
                let step = &mut self.steps[i];
                step.fired = true;
                Fired {
                    label: step.label,
                    at: step.start,
                    action: step.action,
                }
            })
            .collect();

        let done = self.steps.iter().all(|s| s.fired) && self.elapsed + f64::EPSILON >= self.duration();
        if done {
            self.completed = true;
        }
        (fired, done)
    }
}
