//! Scoping: a singly-linked stack of frames, an instance scope
//! pushed/popped in lock-step with it, and a one-level temporary scope for
//! value-type mutating-method receivers. Built on a `Vec<FxHashMap<...>>`
//! scope-stack, extended with `init_level` bookkeeping to track definite
//! initialisation across frames.

use rustc_hash::FxHashMap;

use glyph_common::Symbol;
use glyph_types::Type;

/// One local or instance variable as tracked by the scoper.
#[derive(Clone, Debug)]
pub struct Variable {
    pub ty: Type,
    pub is_mutable: bool,
    /// Frame depth at which this variable became initialised; `None` until
    /// then. A variable is readable iff `init_level <= current_depth` and
    /// has been marked initialised.
    pub init_level: Option<u32>,
}

impl Variable {
    pub fn declared_uninitialised(ty: Type, is_mutable: bool) -> Self {
        Variable { ty, is_mutable, init_level: None }
    }

    pub fn declared_initialised(ty: Type, is_mutable: bool, depth: u32) -> Self {
        Variable { ty, is_mutable, init_level: Some(depth) }
    }

    pub fn is_initialised_at(&self, current_depth: u32) -> bool {
        matches!(self.init_level, Some(level) if level <= current_depth)
    }
}

type Frame = FxHashMap<Symbol, Variable>;

/// The local-variable and instance-variable scope stacks for one function
/// being analysed.
pub struct Scoper {
    frames: Vec<Frame>,
    instance_frames: Vec<Frame>,
    depth: u32,
    temporary_scope_active: bool,
}

impl Scoper {
    pub fn new() -> Self {
        Scoper { frames: vec![Frame::default()], instance_frames: vec![Frame::default()], depth: 0, temporary_scope_active: false }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn push_scope(&mut self) {
        self.depth += 1;
        self.frames.push(Frame::default());
        self.instance_frames.push(Frame::default());
    }

    pub fn pop_scope(&mut self) {
        assert!(self.frames.len() > 1, "cannot pop the function-level scope");
        self.frames.pop();
        self.instance_frames.pop();
        self.depth -= 1;
    }

    pub fn push_temporary_scope(&mut self) {
        self.temporary_scope_active = true;
        self.push_scope();
    }

    pub fn pop_temporary_scope(&mut self) {
        self.pop_scope();
        self.temporary_scope_active = false;
    }

    pub fn in_temporary_scope(&self) -> bool {
        self.temporary_scope_active
    }

    pub fn declare(&mut self, name: Symbol, var: Variable) {
        self.frames.last_mut().expect("at least one frame").insert(name, var);
    }

    pub fn declare_instance(&mut self, name: Symbol, var: Variable) {
        self.instance_frames.last_mut().expect("at least one frame").insert(name, var);
    }

    pub fn lookup(&self, name: Symbol) -> Option<&Variable> {
        self.frames.iter().rev().find_map(|frame| frame.get(&name))
    }

    pub fn lookup_mut(&mut self, name: Symbol) -> Option<&mut Variable> {
        self.frames.iter_mut().rev().find_map(|frame| frame.get_mut(&name))
    }

    pub fn lookup_instance(&self, name: Symbol) -> Option<&Variable> {
        self.instance_frames.iter().rev().find_map(|frame| frame.get(&name))
    }

    pub fn lookup_instance_mut(&mut self, name: Symbol) -> Option<&mut Variable> {
        self.instance_frames.iter_mut().rev().find_map(|frame| frame.get_mut(&name))
    }

    /// Marks a previously-declared-but-uninitialised variable initialised at
    /// the current depth. Used for instance variables assigned inside a
    /// constructor body and for `🍮` declarations later given a value.
    pub fn mark_initialised(&mut self, name: Symbol) {
        let depth = self.depth;
        if let Some(var) = self.lookup_mut(name) {
            var.init_level = Some(depth);
        }
    }

    pub fn mark_instance_initialised(&mut self, name: Symbol) {
        let depth = self.depth;
        if let Some(var) = self.lookup_instance_mut(name) {
            var.init_level = Some(depth);
        }
    }
}

impl Default for Scoper {
    fn default() -> Self {
        Self::new()
    }
}

/// One closure capture: the enclosing scope's variable id it was sourced
/// from, the captured type, and the fresh local id the closure body sees
///.
#[derive(Clone, Debug)]
pub struct CaptureDescriptor {
    pub source: Symbol,
    pub ty: Type,
    pub capture_id: Symbol,
}

/// Wraps a closure body's own [`Scoper`]; on a local-scope lookup miss it
/// consults the enclosing scoper, declares a fresh local mirroring the
/// outer variable, and records a [`CaptureDescriptor`].
pub struct CapturingScoper<'a> {
    pub inner: Scoper,
    enclosing: &'a Scoper,
    pub captures: Vec<CaptureDescriptor>,
    pub captured_self: bool,
}

impl<'a> CapturingScoper<'a> {
    pub fn new(enclosing: &'a Scoper) -> Self {
        CapturingScoper { inner: Scoper::new(), enclosing, captures: Vec::new(), captured_self: false }
    }

    /// Looks up `name`, capturing it from the enclosing scope on first miss.
    pub fn lookup_or_capture(&mut self, name: Symbol) -> Option<Variable> {
        if let Some(var) = self.inner.lookup(name) {
            return Some(var.clone());
        }
        let outer = self.enclosing.lookup(name)?.clone();
        self.captures.push(CaptureDescriptor { source: name, ty: outer.ty.clone(), capture_id: name });
        self.inner.declare(name, outer.clone());
        Some(outer)
    }

    pub fn note_self_used(&mut self) {
        self.captured_self = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_common::StringPool;
    use glyph_types::Type;

    #[test]
    fn shadowing_prefers_innermost_frame() {
        let pool = StringPool::new();
        let name = pool.intern("x");
        let mut scoper = Scoper::new();
        scoper.declare(name, Variable::declared_initialised(Type::something(), false, 0));
        scoper.push_scope();
        scoper.declare(name, Variable::declared_initialised(Type::no_return(), false, 1));
        assert_eq!(scoper.lookup(name).unwrap().ty.kind, Type::no_return().kind);
        scoper.pop_scope();
        assert_eq!(scoper.lookup(name).unwrap().ty.kind, Type::something().kind);
    }

    #[test]
    #[should_panic]
    fn popping_the_last_frame_panics() {
        let mut scoper = Scoper::new();
        scoper.pop_scope();
    }

    #[test]
    fn uninitialised_variable_becomes_readable_after_mark() {
        let pool = StringPool::new();
        let name = pool.intern("x");
        let mut scoper = Scoper::new();
        scoper.declare(name, Variable::declared_uninitialised(Type::something(), true));
        assert!(!scoper.lookup(name).unwrap().is_initialised_at(scoper.depth()));
        scoper.mark_initialised(name);
        assert!(scoper.lookup(name).unwrap().is_initialised_at(scoper.depth()));
    }

    #[test]
    fn capturing_scoper_records_capture_on_first_miss() {
        let pool = StringPool::new();
        let name = pool.intern("total");
        let mut enclosing = Scoper::new();
        enclosing.declare(name, Variable::declared_initialised(Type::something(), false, 0));
        let mut capturing = CapturingScoper::new(&enclosing);
        assert!(capturing.lookup_or_capture(name).is_some());
        assert_eq!(capturing.captures.len(), 1);
        assert!(capturing.lookup_or_capture(name).is_some());
        assert_eq!(capturing.captures.len(), 1, "second lookup hits the now-local declaration, not a new capture");
    }
}
