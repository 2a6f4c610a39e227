//! Expression AST nodes.
//!
//! The parser only structures paths, parameters and `OUTER(...)` calls. Everything
//! else (operators, literals, function names, parentheses) is kept as opaque text
//! in [`FooExpression`] leaves, so a parsed tree is a mix of structured and
//! opaque children inside a [`CompositeExpression`].
//!
//! Node shapes are fixed after construction. Child slots can only be replaced
//! through the modifiers in [`crate::ast::modifier`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;

use crate::ast::resolve::PathResolution;

// ============================================================================
// Expression - closed set of node variants
// ============================================================================

/// Any node of a parsed expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Opaque, unparsed text such as `AVG(`, `+1` or `NULLIF(1,1)`.
    Foo(FooExpression),

    /// A single identifier segment.
    Property(PropertyExpression),

    /// A named bind parameter (`:name`).
    Parameter(ParameterExpression),

    /// An indexed segment (`base[index]`).
    Array(ArrayExpression),

    /// A dotted navigation path.
    Path(PathExpression),

    /// An ordered mix of child expressions.
    Composite(CompositeExpression),

    /// `OUTER(path)`.
    Outer(OuterExpression),

    /// A subquery supplied by a surrounding query builder.
    Subquery(SubqueryExpression),
}

impl Expression {
    /// Short name of the node variant, used in diagnostics and traces.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Foo(_) => "foo",
            Expression::Property(_) => "property",
            Expression::Parameter(_) => "parameter",
            Expression::Array(_) => "array",
            Expression::Path(_) => "path",
            Expression::Composite(_) => "composite",
            Expression::Outer(_) => "outer",
            Expression::Subquery(_) => "subquery",
        }
    }

    /// Returns the path if this is a path expression.
    pub fn as_path(&self) -> Option<&PathExpression> {
        match self {
            Expression::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Returns the composite if this is a composite expression.
    pub fn as_composite(&self) -> Option<&CompositeExpression> {
        match self {
            Expression::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Returns the opaque text if this is a foo expression.
    pub fn as_foo(&self) -> Option<&FooExpression> {
        match self {
            Expression::Foo(foo) => Some(foo),
            _ => None,
        }
    }

    /// Returns the parameter if this is a parameter expression.
    pub fn as_parameter(&self) -> Option<&ParameterExpression> {
        match self {
            Expression::Parameter(parameter) => Some(parameter),
            _ => None,
        }
    }

    /// Returns the outer call if this is an `OUTER(...)` expression.
    pub fn as_outer(&self) -> Option<&OuterExpression> {
        match self {
            Expression::Outer(outer) => Some(outer),
            _ => None,
        }
    }

    /// Converts into a path, handing the expression back on mismatch.
    pub fn into_path(self) -> Result<PathExpression, Expression> {
        match self {
            Expression::Path(path) => Ok(path),
            other => Err(other),
        }
    }
}

impl From<FooExpression> for Expression {
    fn from(value: FooExpression) -> Self {
        Expression::Foo(value)
    }
}

impl From<PropertyExpression> for Expression {
    fn from(value: PropertyExpression) -> Self {
        Expression::Property(value)
    }
}

impl From<ParameterExpression> for Expression {
    fn from(value: ParameterExpression) -> Self {
        Expression::Parameter(value)
    }
}

impl From<ArrayExpression> for Expression {
    fn from(value: ArrayExpression) -> Self {
        Expression::Array(value)
    }
}

impl From<PathExpression> for Expression {
    fn from(value: PathExpression) -> Self {
        Expression::Path(value)
    }
}

impl From<CompositeExpression> for Expression {
    fn from(value: CompositeExpression) -> Self {
        Expression::Composite(value)
    }
}

impl From<OuterExpression> for Expression {
    fn from(value: OuterExpression) -> Self {
        Expression::Outer(value)
    }
}

impl From<SubqueryExpression> for Expression {
    fn from(value: SubqueryExpression) -> Self {
        Expression::Subquery(value)
    }
}

// ============================================================================
// Leaves
// ============================================================================

/// Opaque text fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FooExpression {
    text: SmolStr,
}

impl FooExpression {
    /// Creates a new opaque fragment.
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self { text: text.into() }
    }

    /// The raw text of the fragment.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A single identifier segment of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyExpression {
    name: SmolStr,
}

impl PropertyExpression {
    /// Creates a new property segment.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self { name: name.into() }
    }

    /// The property name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named bind parameter. The name excludes the leading `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterExpression {
    name: SmolStr,
}

impl ParameterExpression {
    /// Creates a parameter reference. A leading `:` is stripped if present.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        let name: SmolStr = name.into();
        match name.strip_prefix(':') {
            Some(stripped) => Self {
                name: SmolStr::new(stripped),
            },
            None => Self { name },
        }
    }

    /// The parameter name without the `:` marker.
    pub fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Paths
// ============================================================================

/// `base[index]`.
///
/// The index is either a [`ParameterExpression`], a path, an opaque fragment,
/// or a composite built from a nested parse of the bracket contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayExpression {
    pub(crate) base: PropertyExpression,
    pub(crate) index: Box<Expression>,
}

impl ArrayExpression {
    /// Creates an indexed segment.
    pub fn new(base: PropertyExpression, index: impl Into<Expression>) -> Self {
        Self {
            base,
            index: Box::new(index.into()),
        }
    }

    /// The indexed property.
    pub fn base(&self) -> &PropertyExpression {
        &self.base
    }

    /// The index expression.
    pub fn index(&self) -> &Expression {
        &self.index
    }

    /// The index when it is a bind parameter.
    pub fn parameter_index(&self) -> Option<&ParameterExpression> {
        self.index.as_parameter()
    }
}

/// One element of a [`PathExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Plain identifier segment.
    Property(PropertyExpression),
    /// Indexed segment.
    Array(ArrayExpression),
}

impl PathElement {
    /// Name of the property this element navigates through.
    pub fn property_name(&self) -> &str {
        match self {
            PathElement::Property(property) => property.name(),
            PathElement::Array(array) => array.base().name(),
        }
    }

    /// Returns the array expression if this element is indexed.
    pub fn as_array(&self) -> Option<&ArrayExpression> {
        match self {
            PathElement::Array(array) => Some(array),
            PathElement::Property(_) => None,
        }
    }
}

impl From<PropertyExpression> for PathElement {
    fn from(value: PropertyExpression) -> Self {
        PathElement::Property(value)
    }
}

impl From<ArrayExpression> for PathElement {
    fn from(value: ArrayExpression) -> Self {
        PathElement::Array(value)
    }
}

impl From<PathElement> for Expression {
    fn from(value: PathElement) -> Self {
        match value {
            PathElement::Property(property) => Expression::Property(property),
            PathElement::Array(array) => Expression::Array(array),
        }
    }
}

/// A dotted navigation path such as `d.b[a].c`.
///
/// Equality and hashing only consider the element list. The collection-function
/// flag and the resolution metadata ride along without affecting identity.
#[derive(Debug, Clone, Default)]
pub struct PathExpression {
    pub(crate) elements: Vec<PathElement>,
    used_in_collection_function: bool,
    resolution: Option<PathResolution>,
}

impl PathExpression {
    /// Creates a path from its elements.
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self {
            elements,
            used_in_collection_function: false,
            resolution: None,
        }
    }

    /// Creates a path of plain property segments.
    pub fn from_properties<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| PathElement::Property(PropertyExpression::new(name)))
                .collect(),
        )
    }

    /// Marks whether the path is the argument of a collection function such as `SIZE`.
    pub fn with_used_in_collection_function(mut self, used: bool) -> Self {
        self.used_in_collection_function = used;
        self
    }

    /// The ordered path elements.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the path has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// True when the path was the argument of `SIZE`, `MEMBER OF` or `IS EMPTY`.
    pub fn is_used_in_collection_function(&self) -> bool {
        self.used_in_collection_function
    }

    /// Resolution metadata attached by an external resolver.
    pub fn resolution(&self) -> Option<&PathResolution> {
        self.resolution.as_ref()
    }

    /// Attaches resolution metadata, returning what was there before.
    pub fn set_resolution(&mut self, resolution: PathResolution) -> Option<PathResolution> {
        self.resolution.replace(resolution)
    }

    /// Removes resolution metadata.
    pub fn clear_resolution(&mut self) -> Option<PathResolution> {
        self.resolution.take()
    }

    pub(crate) fn mark_used_in_collection_function(&mut self) {
        self.used_in_collection_function = true;
    }

    pub(crate) fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }
}

impl PartialEq for PathExpression {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for PathExpression {}

impl Hash for PathExpression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.hash(state);
    }
}

// ============================================================================
// Containers
// ============================================================================

/// Ordered sequence of child expressions; the parser's output container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CompositeExpression {
    pub(crate) children: Vec<Expression>,
}

impl CompositeExpression {
    /// Creates a composite from its children.
    pub fn new(children: Vec<Expression>) -> Self {
        Self { children }
    }

    /// The ordered children.
    pub fn children(&self) -> &[Expression] {
        &self.children
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if there are no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Consumes the composite and returns its children.
    pub fn into_children(self) -> Vec<Expression> {
        self.children
    }

    /// Unwraps a single-child composite to that child.
    pub fn simplify(mut self) -> Expression {
        if self.children.len() == 1 {
            if let Some(child) = self.children.pop() {
                return child;
            }
        }
        Expression::Composite(self)
    }
}

/// `OUTER(path)`: a path scoped to the enclosing query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OuterExpression {
    pub(crate) path: PathExpression,
}

impl OuterExpression {
    /// Wraps a path.
    pub fn new(path: PathExpression) -> Self {
        Self { path }
    }

    /// The wrapped path.
    pub fn path(&self) -> &PathExpression {
        &self.path
    }
}

// ============================================================================
// Subquery extension point
// ============================================================================

/// A subquery owned by a surrounding query builder.
///
/// The parser never produces subqueries; builders splice them into trees they
/// assemble themselves and renderers see them through the visitor.
pub trait Subquery: fmt::Debug + Send + Sync {
    /// Writes the subquery text.
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Handle to a [`Subquery`]. Two handles are equal only if they share the same subquery.
#[derive(Debug, Clone)]
pub struct SubqueryExpression {
    subquery: Arc<dyn Subquery>,
}

impl SubqueryExpression {
    /// Wraps a subquery.
    pub fn new(subquery: Arc<dyn Subquery>) -> Self {
        Self { subquery }
    }

    /// The wrapped subquery.
    pub fn subquery(&self) -> &Arc<dyn Subquery> {
        &self.subquery
    }
}

impl PartialEq for SubqueryExpression {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.subquery, &other.subquery)
    }
}

impl Eq for SubqueryExpression {}

impl Hash for SubqueryExpression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.subquery) as *const () as usize).hash(state);
    }
}
