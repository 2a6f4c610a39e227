//! Resolution metadata attached to paths after parsing.
//!
//! The parser never fills these in. A query builder that knows the entity model
//! implements [`PathResolver`] and runs [`resolve_paths`] over a parsed tree.

use smol_str::SmolStr;

use crate::ast::expression::{
    ArrayExpression, CompositeExpression, Expression, OuterExpression, PathExpression,
};
use crate::ast::visit::VisitResult;
use crate::ast::visit_mut::{self, VisitMut};

/// Opaque handle to a join node owned by the surrounding query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinNodeId(pub u32);

/// Where a path ends up after join resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolution {
    /// Join node the path navigates from.
    pub base_node: JoinNodeId,
    /// Field on the base node, if the path ends in one.
    pub field: Option<SmolStr>,
    /// Whether the path denotes a collection.
    pub collection_valued: bool,
}

impl PathResolution {
    /// Resolution to `base_node` with no field.
    pub fn new(base_node: JoinNodeId) -> Self {
        Self {
            base_node,
            field: None,
            collection_valued: false,
        }
    }

    /// Sets the field the path ends in.
    pub fn with_field(mut self, field: impl Into<SmolStr>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Marks the path as denoting a collection.
    pub fn with_collection_valued(mut self, collection_valued: bool) -> Self {
        self.collection_valued = collection_valued;
        self
    }
}

/// Binds parsed paths to join nodes.
pub trait PathResolver {
    /// Returns the resolution for `path`, or `None` to leave it unresolved.
    fn resolve(&mut self, path: &PathExpression) -> Option<PathResolution>;
}

impl<F> PathResolver for F
where
    F: FnMut(&PathExpression) -> Option<PathResolution>,
{
    fn resolve(&mut self, path: &PathExpression) -> Option<PathResolution> {
        self(path)
    }
}

/// Runs `resolver` over every path in `expression`, including paths inside
/// array indices and `OUTER(...)`. Returns how many paths were resolved.
pub fn resolve_paths<R: PathResolver + ?Sized>(expression: &mut Expression, resolver: &mut R) -> usize {
    let mut pass = ResolvePass {
        resolver,
        resolved: 0,
    };
    let _ = expression.accept_mut(&mut pass);
    pass.resolved
}

struct ResolvePass<'r, R: ?Sized> {
    resolver: &'r mut R,
    resolved: usize,
}

impl<R: PathResolver + ?Sized> VisitMut for ResolvePass<'_, R> {
    type Break = ();

    fn visit_path(&mut self, path: &mut PathExpression) -> VisitResult<()> {
        if let Some(resolution) = self.resolver.resolve(path) {
            path.set_resolution(resolution);
            self.resolved += 1;
        }
        visit_mut::walk_path(self, path)
    }

    fn visit_array(&mut self, array: &mut ArrayExpression) -> VisitResult<()> {
        visit_mut::walk_array(self, array)
    }

    fn visit_composite(&mut self, composite: &mut CompositeExpression) -> VisitResult<()> {
        visit_mut::walk_composite(self, composite)
    }

    fn visit_outer(&mut self, outer: &mut OuterExpression) -> VisitResult<()> {
        visit_mut::walk_outer(self, outer)
    }
}
