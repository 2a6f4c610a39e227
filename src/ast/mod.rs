//! AST node types, rendering, traversal and slot modifiers.

mod display;
pub mod expression;
pub mod modifier;
pub mod resolve;
mod span;
pub mod visit;
mod visit_macros;
pub mod visit_mut;

pub(crate) use display::push_fragment;

pub use expression::{
    ArrayExpression, CompositeExpression, Expression, FooExpression, OuterExpression,
    ParameterExpression, PathElement, PathExpression, PropertyExpression, Subquery,
    SubqueryExpression,
};
pub use modifier::{
    ArrayBaseModifier, ArrayIndexModifier, BoundModifier, CompositeChildModifier,
    ExpressionModifier, OuterPathModifier, PathElementModifier, Slot, SlotPath, collect_slots,
};
pub use resolve::{JoinNodeId, PathResolution, PathResolver, resolve_paths};
pub use span::{Span, Spanned, cover};
pub use visit::{Visit, VisitResult};
pub use visit_mut::VisitMut;
