//! Status and tick results returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// # Turn-based Semantics
///
/// Conditions and actions resolve within a single tick (`Success`/`Failure`).
/// `Running` exists for composites that were interrupted mid-way and for
/// unbounded repeaters: it tells the caller to tick again, and lets the
/// caller check its wall-clock budget between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The behavior completed successfully.
    ///
    /// For conditions: the condition was met.
    /// For actions: an action was produced.
    Success,

    /// The behavior failed.
    ///
    /// For conditions: the condition was not met.
    /// For actions: the action could not be produced (e.g. no valid target).
    Failure,

    /// The behavior has not reached a verdict yet; tick again.
    Running,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    ///
    /// `Running` passes through unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }
}

/// One node evaluation: a [`Status`] plus the output threaded up from a leaf.
///
/// Leaves that produce a payload (action leaves) return it here; composites
/// propagate the first payload produced by a succeeding child. This replaces
/// the "write into a shared scratch slot" pattern, so the caller receives the
/// chosen output directly from the root tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick<T> {
    pub status: Status,
    pub output: Option<T>,
}

impl<T> Tick<T> {
    /// Success carrying an optional payload.
    #[inline]
    pub fn success(output: Option<T>) -> Self {
        Self {
            status: Status::Success,
            output,
        }
    }

    /// Failure. Failures never carry a payload.
    #[inline]
    pub fn failure() -> Self {
        Self {
            status: Status::Failure,
            output: None,
        }
    }

    /// Running: the node needs another tick to reach a verdict.
    #[inline]
    pub fn running() -> Self {
        Self {
            status: Status::Running,
            output: None,
        }
    }

    /// Returns `true` if the tick reached a terminal status.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !self.status.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_swaps_terminal_states() {
        assert_eq!(Status::Success.invert(), Status::Failure);
        assert_eq!(Status::Failure.invert(), Status::Success);
    }

    #[test]
    fn invert_passes_running_through() {
        assert_eq!(Status::Running.invert(), Status::Running);
    }

    #[test]
    fn failure_ticks_carry_no_output() {
        let tick: Tick<u32> = Tick::failure();
        assert!(tick.output.is_none());
        assert!(tick.is_terminal());
    }
}
