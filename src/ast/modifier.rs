//! In-place replacement of single child slots.
//!
//! A modifier names one slot of one parent node type, e.g. "child 2 of a
//! composite" or "the index of an array". [`BoundModifier`] pairs a slot with
//! the parent it currently points at, so rewriting code can carry "replace slot
//! X of node Y" around as a value and re-point it at other parents of the same
//! shape.
//!
//! For rewrites planned over a whole tree, [`collect_slots`] records a
//! [`SlotPath`] to each match first and [`Expression::replace_at`] applies the
//! replacement afterwards, so no borrow of the tree is held in between.

use std::mem;
use std::ops::ControlFlow;

use crate::ast::expression::{
    ArrayExpression, CompositeExpression, Expression, OuterExpression, PathElement,
    PathExpression, PropertyExpression,
};
use crate::ast::visit::{Visit, VisitResult};
use crate::error::ModifierError;

/// A typed child slot of a parent node.
pub trait ExpressionModifier {
    /// Node type that owns the slot.
    type Parent;
    /// Value stored in the slot.
    type Child;

    /// Reads the slot.
    fn get<'p>(&self, parent: &'p Self::Parent) -> Result<&'p Self::Child, ModifierError>;

    /// Replaces the slot's value, returning the previous one.
    fn replace(
        &self,
        parent: &mut Self::Parent,
        child: Self::Child,
    ) -> Result<Self::Child, ModifierError>;
}

/// The `index`-th child of a [`CompositeExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeChildModifier {
    pub index: usize,
}

impl CompositeChildModifier {
    /// Addresses child `index`.
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl ExpressionModifier for CompositeChildModifier {
    type Parent = CompositeExpression;
    type Child = Expression;

    fn get<'p>(&self, parent: &'p CompositeExpression) -> Result<&'p Expression, ModifierError> {
        parent
            .children
            .get(self.index)
            .ok_or(ModifierError::IndexOutOfBounds {
                index: self.index,
                len: parent.children.len(),
            })
    }

    fn replace(
        &self,
        parent: &mut CompositeExpression,
        child: Expression,
    ) -> Result<Expression, ModifierError> {
        let len = parent.children.len();
        let slot = parent
            .children
            .get_mut(self.index)
            .ok_or(ModifierError::IndexOutOfBounds {
                index: self.index,
                len,
            })?;
        Ok(mem::replace(slot, child))
    }
}

/// The `index`-th element of a [`PathExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathElementModifier {
    pub index: usize,
}

impl PathElementModifier {
    /// Addresses element `index`.
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl ExpressionModifier for PathElementModifier {
    type Parent = PathExpression;
    type Child = PathElement;

    fn get<'p>(&self, parent: &'p PathExpression) -> Result<&'p PathElement, ModifierError> {
        parent
            .elements
            .get(self.index)
            .ok_or(ModifierError::IndexOutOfBounds {
                index: self.index,
                len: parent.elements.len(),
            })
    }

    fn replace(
        &self,
        parent: &mut PathExpression,
        child: PathElement,
    ) -> Result<PathElement, ModifierError> {
        let len = parent.elements.len();
        let slot = parent
            .elements
            .get_mut(self.index)
            .ok_or(ModifierError::IndexOutOfBounds {
                index: self.index,
                len,
            })?;
        Ok(mem::replace(slot, child))
    }
}

/// The base property of an [`ArrayExpression`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ArrayBaseModifier;

impl ExpressionModifier for ArrayBaseModifier {
    type Parent = ArrayExpression;
    type Child = PropertyExpression;

    fn get<'p>(&self, parent: &'p ArrayExpression) -> Result<&'p PropertyExpression, ModifierError> {
        Ok(&parent.base)
    }

    fn replace(
        &self,
        parent: &mut ArrayExpression,
        child: PropertyExpression,
    ) -> Result<PropertyExpression, ModifierError> {
        Ok(mem::replace(&mut parent.base, child))
    }
}

/// The index expression of an [`ArrayExpression`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ArrayIndexModifier;

impl ExpressionModifier for ArrayIndexModifier {
    type Parent = ArrayExpression;
    type Child = Expression;

    fn get<'p>(&self, parent: &'p ArrayExpression) -> Result<&'p Expression, ModifierError> {
        Ok(&parent.index)
    }

    fn replace(
        &self,
        parent: &mut ArrayExpression,
        child: Expression,
    ) -> Result<Expression, ModifierError> {
        Ok(mem::replace(parent.index.as_mut(), child))
    }
}

/// The path wrapped by an [`OuterExpression`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OuterPathModifier;

impl ExpressionModifier for OuterPathModifier {
    type Parent = OuterExpression;
    type Child = PathExpression;

    fn get<'p>(&self, parent: &'p OuterExpression) -> Result<&'p PathExpression, ModifierError> {
        Ok(&parent.path)
    }

    fn replace(
        &self,
        parent: &mut OuterExpression,
        child: PathExpression,
    ) -> Result<PathExpression, ModifierError> {
        Ok(mem::replace(&mut parent.path, child))
    }
}

// ============================================================================
// Bound modifiers
// ============================================================================

/// A slot together with the parent it currently targets.
///
/// Owned by one rewrite pass at a time. Cloning copies the slot but not the
/// target; the clone must be pointed at a parent with [`BoundModifier::retarget`].
#[derive(Debug)]
pub struct BoundModifier<'a, M: ExpressionModifier> {
    slot: M,
    target: Option<&'a mut M::Parent>,
}

impl<'a, M: ExpressionModifier> BoundModifier<'a, M> {
    /// Creates a modifier with no target.
    pub fn unbound(slot: M) -> Self {
        Self { slot, target: None }
    }

    /// Creates a modifier pointing at `target`.
    pub fn bound(slot: M, target: &'a mut M::Parent) -> Self {
        Self {
            slot,
            target: Some(target),
        }
    }

    /// The slot this modifier writes.
    pub fn slot(&self) -> &M {
        &self.slot
    }

    /// Returns true if the modifier has a target parent.
    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    /// Points the modifier at another parent, returning the previous one.
    pub fn retarget(&mut self, target: &'a mut M::Parent) -> Option<&'a mut M::Parent> {
        self.target.replace(target)
    }

    /// Drops the current target.
    pub fn unbind(&mut self) -> Option<&'a mut M::Parent> {
        self.target.take()
    }

    /// Reads the targeted slot.
    pub fn get(&self) -> Result<&M::Child, ModifierError> {
        match self.target.as_deref() {
            Some(parent) => self.slot.get(parent),
            None => Err(ModifierError::Unbound),
        }
    }

    /// Replaces the targeted slot in place, returning the previous child.
    pub fn set(&mut self, child: M::Child) -> Result<M::Child, ModifierError> {
        match self.target.as_deref_mut() {
            Some(parent) => self.slot.replace(parent, child),
            None => Err(ModifierError::Unbound),
        }
    }
}

impl<M: ExpressionModifier + Clone> Clone for BoundModifier<'_, M> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            target: None,
        }
    }
}

// ============================================================================
// Slot paths
// ============================================================================

/// One step from a node to an expression-valued child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Child `n` of a composite.
    CompositeChild(usize),
    /// Index expression of array element `n` of a path.
    PathElementIndex(usize),
    /// Index expression of array element `n` of the path inside `OUTER(...)`.
    OuterElementIndex(usize),
    /// Index expression of a standalone array node.
    ArrayIndex,
}

/// Chain of slots from a root expression to one of its descendants.
/// An empty path addresses the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SlotPath {
    slots: Vec<Slot>,
}

impl SlotPath {
    /// The empty path, addressing the root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from root-first slots.
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// Slots from the root down.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns true if this path addresses the root.
    pub fn is_root(&self) -> bool {
        self.slots.is_empty()
    }
}

fn array_element_mut(
    elements: &mut [PathElement],
    slot: Slot,
    index: usize,
) -> Result<&mut ArrayExpression, ModifierError> {
    let len = elements.len();
    match elements.get_mut(index) {
        Some(PathElement::Array(array)) => Ok(array),
        Some(PathElement::Property(_)) => Err(ModifierError::SlotMismatch {
            slot,
            found: "property",
        }),
        None => Err(ModifierError::IndexOutOfBounds { index, len }),
    }
}

fn array_element(elements: &[PathElement], index: usize) -> Option<&ArrayExpression> {
    elements.get(index).and_then(PathElement::as_array)
}

/// Resolves one slot of `parent` for reading.
fn child_at(parent: &Expression, slot: Slot) -> Option<&Expression> {
    match (parent, slot) {
        (Expression::Composite(composite), Slot::CompositeChild(index)) => {
            CompositeChildModifier::new(index).get(composite).ok()
        }
        (Expression::Path(path), Slot::PathElementIndex(index)) => {
            array_element(&path.elements, index).map(ArrayExpression::index)
        }
        (Expression::Outer(outer), Slot::OuterElementIndex(index)) => {
            array_element(&outer.path.elements, index).map(ArrayExpression::index)
        }
        (Expression::Array(array), Slot::ArrayIndex) => Some(array.index()),
        _ => None,
    }
}

/// Resolves one slot of `parent` for writing.
fn child_at_mut(parent: &mut Expression, slot: Slot) -> Result<&mut Expression, ModifierError> {
    match (parent, slot) {
        (Expression::Composite(composite), Slot::CompositeChild(index)) => {
            let len = composite.children.len();
            composite
                .children
                .get_mut(index)
                .ok_or(ModifierError::IndexOutOfBounds { index, len })
        }
        (Expression::Path(path), Slot::PathElementIndex(index)) => {
            Ok(array_element_mut(&mut path.elements, slot, index)?.index.as_mut())
        }
        (Expression::Outer(outer), Slot::OuterElementIndex(index)) => {
            Ok(array_element_mut(&mut outer.path.elements, slot, index)?.index.as_mut())
        }
        (Expression::Array(array), Slot::ArrayIndex) => Ok(array.index.as_mut()),
        (other, slot) => Err(ModifierError::SlotMismatch {
            slot,
            found: other.kind_name(),
        }),
    }
}

impl Expression {
    /// Reads the descendant addressed by `path`.
    pub fn get_at(&self, path: &SlotPath) -> Option<&Expression> {
        path.slots
            .iter()
            .try_fold(self, |node, slot| child_at(node, *slot))
    }

    /// Replaces the descendant addressed by `path`, returning the previous value.
    pub fn replace_at(
        &mut self,
        path: &SlotPath,
        replacement: Expression,
    ) -> Result<Expression, ModifierError> {
        let mut node = self;
        for slot in &path.slots {
            node = child_at_mut(node, *slot)?;
        }
        Ok(mem::replace(node, replacement))
    }
}

/// Records a [`SlotPath`] to every sub-expression matching `predicate`.
///
/// Matches are not searched further; a match at the root yields a single root path.
/// Only expression-valued slots are considered, so path segments and the path
/// inside `OUTER(...)` are walked through but never reported themselves.
pub fn collect_slots<P>(root: &Expression, predicate: P) -> Vec<SlotPath>
where
    P: FnMut(&Expression) -> bool,
{
    let mut collector = SlotCollector {
        predicate,
        current: Vec::new(),
        found: Vec::new(),
    };
    let _ = root.accept(&mut collector);
    collector.found
}

struct SlotCollector<P> {
    predicate: P,
    current: Vec<Slot>,
    found: Vec<SlotPath>,
}

impl<P> SlotCollector<P>
where
    P: FnMut(&Expression) -> bool,
{
    fn descend(&mut self, slot: Slot, child: &Expression) -> VisitResult<()> {
        self.current.push(slot);
        let flow = self.visit_expression(child);
        self.current.pop();
        flow
    }

    fn descend_elements(
        &mut self,
        elements: &[PathElement],
        slot: fn(usize) -> Slot,
    ) -> VisitResult<()> {
        for (i, element) in elements.iter().enumerate() {
            if let PathElement::Array(array) = element {
                if let ControlFlow::Break(b) = self.descend(slot(i), array.index()) {
                    return ControlFlow::Break(b);
                }
            }
        }
        ControlFlow::Continue(())
    }
}

impl<P> Visit for SlotCollector<P>
where
    P: FnMut(&Expression) -> bool,
{
    type Break = ();

    fn visit_expression(&mut self, expression: &Expression) -> VisitResult<()> {
        if (self.predicate)(expression) {
            self.found.push(SlotPath::new(self.current.clone()));
            return ControlFlow::Continue(());
        }
        crate::ast::visit::walk_expression(self, expression)
    }

    fn visit_composite(&mut self, composite: &CompositeExpression) -> VisitResult<()> {
        for (i, child) in composite.children().iter().enumerate() {
            if let ControlFlow::Break(b) = self.descend(Slot::CompositeChild(i), child) {
                return ControlFlow::Break(b);
            }
        }
        ControlFlow::Continue(())
    }

    fn visit_path(&mut self, path: &PathExpression) -> VisitResult<()> {
        self.descend_elements(path.elements(), Slot::PathElementIndex)
    }

    fn visit_outer(&mut self, outer: &OuterExpression) -> VisitResult<()> {
        self.descend_elements(outer.path().elements(), Slot::OuterElementIndex)
    }

    fn visit_array(&mut self, array: &ArrayExpression) -> VisitResult<()> {
        self.descend(Slot::ArrayIndex, array.index())
    }
}
