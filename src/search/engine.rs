// Backtracking engine
// Generic depth-first search over a fixed decision sequence, instrumented per transition

use serde::{Deserialize, Serialize};

use crate::trace::{Recorder, Snapshot, StepEvent};

/// Whether the search stops at the first complete assignment or enumerates all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    FirstSolution,
    AllSolutions,
}

/// A backtracking problem: a fixed sequence of decision positions, each with
/// candidate domain `0..domain_size()`
///
/// The engine owns the control flow and the recording protocol; implementors
/// supply the safety predicate and the working-state mutations.
pub trait SearchSpace {
    /// Number of decision positions
    fn positions(&self) -> usize;

    /// Size of the candidate domain at every position
    fn domain_size(&self) -> usize;

    /// Safety predicate for placing `candidate` at `position`
    fn admissible(&self, position: usize, candidate: usize) -> bool;

    /// Commit `candidate` at `position`
    fn place(&mut self, position: usize, candidate: usize);

    /// Undo the commit at `position`
    fn remove(&mut self, position: usize, candidate: usize);

    /// Committed candidates so far, in position order
    fn assignment(&self) -> Vec<usize>;

    /// Deep copy of the working state for recording
    fn snapshot(&self) -> Snapshot;
}

/// Run a backtracking search to completion, recording every transition
///
/// Candidates are tried in ascending order, so the trace is fully
/// deterministic for a given problem. In `FirstSolution` mode the trace ends
/// at `SolutionFound` or `Exhausted`; in `AllSolutions` mode it ends at
/// `EnumerationDone` (one or more solutions) or `Exhausted` (none).
pub fn run_search<P: SearchSpace>(problem: &mut P, mode: SearchMode, recorder: &mut Recorder) {
    let mut solutions = 0;
    let stopped = explore(problem, 0, mode, recorder, &mut solutions);

    match mode {
        SearchMode::FirstSolution => {
            if !stopped {
                recorder.record(StepEvent::Exhausted, problem.snapshot());
            }
        }
        SearchMode::AllSolutions => {
            if solutions > 0 {
                recorder.record(StepEvent::EnumerationDone { solutions }, problem.snapshot());
            } else {
                recorder.record(StepEvent::Exhausted, problem.snapshot());
            }
        }
    }
}

/// Returns true when the search should stop unwinding (first solution found)
fn explore<P: SearchSpace>(
    problem: &mut P,
    position: usize,
    mode: SearchMode,
    recorder: &mut Recorder,
    solutions: &mut usize,
) -> bool {
    recorder.attempt();
    recorder.record(StepEvent::Explore { position }, problem.snapshot());

    if position == problem.positions() {
        *solutions += 1;
        recorder.record(
            StepEvent::SolutionFound {
                assignment: problem.assignment(),
            },
            problem.snapshot(),
        );
        return mode == SearchMode::FirstSolution;
    }

    // An empty domain falls straight through: no Try events, immediate failure
    for candidate in 0..problem.domain_size() {
        recorder.record(StepEvent::Try { position, candidate }, problem.snapshot());

        if !problem.admissible(position, candidate) {
            recorder.record(StepEvent::Reject { position, candidate }, problem.snapshot());
            continue;
        }

        problem.place(position, candidate);
        recorder.record(StepEvent::Accept { position, candidate }, problem.snapshot());

        if explore(problem, position + 1, mode, recorder, solutions) {
            return true;
        }

        problem.remove(position, candidate);
        recorder.key_op();
        recorder.record(
            StepEvent::Backtrack { position, candidate },
            problem.snapshot(),
        );
    }

    false
}
