//! `CommonTypeFinder`: an incremental accumulator driven one
//! sibling expression at a time while walking a list literal or an
//! if/else-if/else chain, producing the narrowest type every candidate is
//! compatible with -- falling back to a protocol intersection, then
//! `Someobject`/`Something`.

use rustc_hash::FxHashSet;

use crate::compat::is_compatible;
use crate::context::TypeContext;
use crate::def::{DefArena, TypeDefId};
use crate::ty::{Type, TypeKind};

#[derive(Default)]
pub struct CommonTypeFinder {
    best: Option<Type>,
    protocols: Option<FxHashSet<TypeDefId>>,
    /// Set on any narrowing step that dropped the best type to `Someobject`
    /// or `Something` from something more specific, so callers can emit an
    /// ambiguous-common-type warning at the triggering candidate's
    /// position.
    pub narrowed_to_top: bool,
}

impl CommonTypeFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, candidate: &Type, defs: &DefArena) {
        let candidate_protocols = protocol_set_of(candidate, defs);
        match &self.best {
            None => {
                self.best = Some(candidate.clone());
                self.protocols = Some(candidate_protocols);
            }
            Some(current) => {
                let ctx = TypeContext::new();
                let _ = &ctx;
                if !is_compatible(candidate, current, defs, None) && !is_compatible(current, candidate, defs, None) {
                    let lub = least_upper_bound(current, candidate);
                    if matches!(lub.kind, TypeKind::Someobject | TypeKind::Something)
                        && !matches!(current.kind, TypeKind::Someobject | TypeKind::Something)
                    {
                        self.narrowed_to_top = true;
                    }
                    self.best = Some(lub);
                } else if is_compatible(current, candidate, defs, None) && !is_compatible(candidate, current, defs, None) {
                    // candidate is a strict supertype of what we have so far.
                    self.best = Some(candidate.clone());
                }
                self.protocols = Some(match self.protocols.take() {
                    Some(existing) => existing.intersection(&candidate_protocols).copied().collect(),
                    None => candidate_protocols,
                });
            }
        }
    }

    pub fn result(self) -> Type {
        match (self.best, self.protocols) {
            (Some(t), Some(ps)) if matches!(t.kind, TypeKind::Something) && !ps.is_empty() => {
                let mut ids: Vec<TypeDefId> = ps.into_iter().collect();
                ids.sort();
                Type::multi_protocol(ids.into_iter().map(|id| Type::protocol(id, vec![])).collect())
            }
            (Some(t), _) => t,
            (None, _) => Type::something(),
        }
    }
}

/// `Someobject` for two distinct reference types, `Something` otherwise
///.
fn least_upper_bound(a: &Type, b: &Type) -> Type {
    let a_is_ref = matches!(a.kind, TypeKind::Class(..) | TypeKind::Someobject);
    let b_is_ref = matches!(b.kind, TypeKind::Class(..) | TypeKind::Someobject);
    if a_is_ref && b_is_ref {
        Type::someobject()
    } else {
        Type::something()
    }
}

/// Empty unless `t` names a `Class`/`ValueType`/`Enum` definition with
/// declared conformances, or is itself a `Protocol`/`MultiProtocol`.
fn protocol_set_of(t: &Type, defs: &DefArena) -> FxHashSet<TypeDefId> {
    let mut set = FxHashSet::default();
    match &t.kind {
        TypeKind::Protocol(id, _) => {
            set.insert(*id);
        }
        TypeKind::MultiProtocol(protos) => {
            for p in protos {
                if let TypeKind::Protocol(id, _) = &p.kind {
                    set.insert(*id);
                }
            }
        }
        TypeKind::Class(id, _) | TypeKind::ValueType(id, _) | TypeKind::Enum(id) => {
            for conformance in &defs.get(*id).conformances {
                if let TypeKind::Protocol(p_id, _) = &conformance.kind {
                    set.insert(*p_id);
                }
            }
        }
        _ => {}
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::DefKind;
    use glyph_common::StringPool;

    #[test]
    fn empty_accumulation_yields_something() {
        let finder = CommonTypeFinder::new();
        assert_eq!(finder.result().kind, Type::something().kind);
    }

    #[test]
    fn single_candidate_is_returned_unchanged() {
        let defs = DefArena::new();
        let mut finder = CommonTypeFinder::new();
        finder.add(&Type::no_return(), &defs);
        assert_eq!(finder.result().kind, Type::no_return().kind);
    }

    #[test]
    fn two_distinct_classes_narrow_to_someobject() {
        let pool = StringPool::new();
        let mut defs = DefArena::new();
        let cat = defs.insert(DefKind::Class, pool.intern("Cat"));
        let dog = defs.insert(DefKind::Class, pool.intern("Dog"));
        let mut finder = CommonTypeFinder::new();
        finder.add(&Type::class(cat, vec![]), &defs);
        finder.add(&Type::class(dog, vec![]), &defs);
        assert_eq!(finder.result().kind, Type::someobject().kind);
        assert!(finder.narrowed_to_top);
    }

    #[test]
    fn shared_protocol_conformance_survives_as_multi_protocol() {
        let pool = StringPool::new();
        let mut defs = DefArena::new();
        let comparable = defs.insert(DefKind::Protocol, pool.intern("Comparable"));
        let cat = defs.insert(DefKind::Class, pool.intern("Cat"));
        let dog = defs.insert(DefKind::Class, pool.intern("Dog"));
        defs.get_mut(cat).conformances.push(Type::protocol(comparable, vec![]));
        defs.get_mut(dog).conformances.push(Type::protocol(comparable, vec![]));
        let mut finder = CommonTypeFinder::new();
        finder.add(&Type::class(cat, vec![]), &defs);
        finder.add(&Type::class(dog, vec![]), &defs);
        let result = finder.result();
        match result.kind {
            TypeKind::MultiProtocol(ps) => assert_eq!(ps.len(), 1),
            other => panic!("expected MultiProtocol, got {other:?}"),
        }
    }
}
