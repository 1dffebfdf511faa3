//! `PathAnalyser`: a small state machine tracking "incidents"
//! along control-flow paths -- whether a function has definitely/possibly
//! returned, called its superclass initializer, or used `self` -- so
//! initializer and return-completeness checks can
//! tell "certain" from merely "potential".

use rustc_hash::FxHashSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Incident {
    Returned,
    CalledSuperInitializer,
    UsedSelf,
}

struct BranchSet {
    entry_certain: FxHashSet<Incident>,
    entry_potential: FxHashSet<Incident>,
    completed: Vec<(FxHashSet<Incident>, FxHashSet<Incident>)>,
}

pub struct PathAnalyser {
    certain: FxHashSet<Incident>,
    potential: FxHashSet<Incident>,
    stack: Vec<BranchSet>,
}

impl PathAnalyser {
    pub fn new() -> Self {
        PathAnalyser { certain: FxHashSet::default(), potential: FxHashSet::default(), stack: Vec::new() }
    }

    /// Records an incident that unconditionally occurred on the current
    /// path (e.g. a `return` statement just analysed).
    pub fn record(&mut self, incident: Incident) {
        self.certain.insert(incident);
        self.potential.insert(incident);
    }

    pub fn is_certain(&self, incident: Incident) -> bool {
        self.certain.contains(&incident)
    }

    pub fn is_potential(&self, incident: Incident) -> bool {
        self.potential.contains(&incident)
    }

    /// Opens a new multi-branch construct (an `if`/else-if/else chain or a
    /// loop), snapshotting the path state every branch will diverge from.
    pub fn begin_branches(&mut self) {
        self.stack.push(BranchSet { entry_certain: self.certain.clone(), entry_potential: self.potential.clone(), completed: Vec::new() });
    }

    /// Resets the path state to the construct's entry point so the next
    /// branch body is analysed independently of its siblings.
    pub fn begin_branch(&mut self) {
        let top = self.stack.last().expect("begin_branches must precede begin_branch");
        self.certain = top.entry_certain.clone();
        self.potential = top.entry_potential.clone();
    }

    /// Records this branch's resulting path state for later merging.
    pub fn end_branch(&mut self) {
        let snapshot = (self.certain.clone(), self.potential.clone());
        self.stack.last_mut().expect("begin_branches must precede end_branch").completed.push(snapshot);
    }

    /// Merges an exhaustive set of mutually exclusive branches (every
    /// alternative covered, e.g. an `if` with a final `else`): an incident
    /// is certain only if every branch made it certain; potential if any
    /// branch did.
    pub fn end_mutual_exclusive_branches(&mut self) {
        let frame = self.stack.pop().expect("unbalanced begin_branches/end_mutual_exclusive_branches");
        let mut certain_intersection: Option<FxHashSet<Incident>> = None;
        let mut potential_union = frame.entry_potential.clone();
        for (certain, potential) in &frame.completed {
            certain_intersection = Some(match certain_intersection {
                None => certain.clone(),
                Some(acc) => acc.intersection(certain).copied().collect(),
            });
            potential_union.extend(potential.iter().copied());
        }
        let certain_intersection = certain_intersection.unwrap_or_default();
        self.certain = frame.entry_certain.union(&certain_intersection).copied().collect();
        self.potential = potential_union;
    }

    /// Merges a non-exhaustive construct (an `if` with no `else`, or a
    /// loop that might run zero times): nothing new becomes certain, only
    /// potential.
    pub fn end_uncertain_branches(&mut self) {
        let frame = self.stack.pop().expect("unbalanced begin_branches/end_uncertain_branches");
        let mut potential_union = frame.entry_potential.clone();
        for (_, potential) in &frame.completed {
            potential_union.extend(potential.iter().copied());
        }
        self.certain = frame.entry_certain.clone();
        self.potential = potential_union;
    }
}

impl Default for PathAnalyser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incident_certain_only_when_every_branch_has_it() {
        let mut analyser = PathAnalyser::new();
        analyser.begin_branches();
        analyser.begin_branch();
        analyser.record(Incident::Returned);
        analyser.end_branch();
        analyser.begin_branch();
        // This branch does not return.
        analyser.end_branch();
        analyser.end_mutual_exclusive_branches();
        assert!(!analyser.is_certain(Incident::Returned));
        assert!(analyser.is_potential(Incident::Returned));
    }

    #[test]
    fn incident_certain_when_both_branches_have_it() {
        let mut analyser = PathAnalyser::new();
        analyser.begin_branches();
        analyser.begin_branch();
        analyser.record(Incident::CalledSuperInitializer);
        analyser.end_branch();
        analyser.begin_branch();
        analyser.record(Incident::CalledSuperInitializer);
        analyser.end_branch();
        analyser.end_mutual_exclusive_branches();
        assert!(analyser.is_certain(Incident::CalledSuperInitializer));
    }

    #[test]
    fn uncertain_branches_never_promote_to_certain() {
        let mut analyser = PathAnalyser::new();
        analyser.begin_branches();
        analyser.begin_branch();
        analyser.record(Incident::UsedSelf);
        analyser.end_branch();
        analyser.end_uncertain_branches();
        assert!(!analyser.is_certain(Incident::UsedSelf));
        assert!(analyser.is_potential(Incident::UsedSelf));
    }
}
