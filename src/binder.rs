//! Placeholder binding between statement templates and concrete statements.
//!
//! [`extract`] walks a template such as `INSERT INTO t (a) VALUE (?)` in
//! lockstep with a concrete statement such as `INSERT INTO t (a) VALUE (42)` and
//! returns the literals that occupy the template's placeholders. [`substitute`]
//! goes the other way and fills a template's placeholders with values.

use thiserror::Error;

use crate::semantic::{Value, placeholders};
use crate::sql::{EditConflict, EditList, Node, NodeKind, SqlTree};

/// Errors from binding placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The two statements differ in shape at `offset` of the concrete statement.
    #[error("statement does not match template at position {}: expected {template}, found {literal}", .offset + 1)]
    StructuralMismatch {
        template: String,
        literal: String,
        offset: usize,
    },

    #[error("expected {expected} arguments, got {found}")]
    ArgumentCount { expected: usize, found: usize },

    /// A float argument is infinite or NaN and has no SQL spelling.
    #[error("argument {index} is not a finite number")]
    NonFiniteArgument { index: usize },

    #[error(transparent)]
    Edit(#[from] EditConflict),
}

pub type BindResult<T> = Result<T, BindError>;

/// Values bound to a template's placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// One value per placeholder, in document order.
    pub arguments: Vec<Value>,
    /// The concrete statement with every bound literal replaced by `?`.
    pub canonical_sql: String,
}

/// Binds the placeholders of `template` to the literals of `literal`.
pub fn extract(template: &SqlTree, literal: &SqlTree) -> BindResult<Extraction> {
    let mut binder = Extractor {
        arguments: Vec::new(),
        edits: EditList::new(),
    };
    binder.step(template.root(), literal.root())?;

    let canonical_sql = binder.edits.apply(literal.source())?;
    tracing::debug!(
        arguments = binder.arguments.len(),
        canonical_sql = %canonical_sql,
        "extracted placeholder arguments"
    );
    Ok(Extraction {
        arguments: binder.arguments,
        canonical_sql,
    })
}

struct Extractor {
    arguments: Vec<Value>,
    edits: EditList,
}

impl Extractor {
    fn step(&mut self, template: Node<'_>, literal: Node<'_>) -> BindResult<()> {
        tracing::trace!(
            template = %template.kind(),
            literal = %literal.kind(),
            offset = literal.span().start,
            "binder step"
        );

        if let Some(slot) = template.as_literal().filter(|l| l.is_placeholder()) {
            let value = literal
                .as_literal()
                .and_then(|l| Value::from_literal(&l.kind))
                .ok_or_else(|| mismatch(NodeKind::Literal.to_string(), literal))?;
            tracing::trace!(slot = slot.span.start, value = %value, "bound placeholder");
            self.arguments.push(value);
            self.edits.replace(literal.span(), "?");
            return Ok(());
        }

        if template.kind() != literal.kind() {
            return Err(mismatch(template.kind().to_string(), literal));
        }
        // Table names are routed separately and may differ between the two.
        if template.kind() == NodeKind::TableName {
            return Ok(());
        }

        let template_children = template.children();
        let literal_children = literal.children();
        if template_children.len() != literal_children.len() {
            return Err(BindError::StructuralMismatch {
                template: format!("{} with {} children", template.kind(), template_children.len()),
                literal: format!("{} with {} children", literal.kind(), literal_children.len()),
                offset: literal.span().start,
            });
        }
        for (t, l) in template_children.into_iter().zip(literal_children) {
            self.step(t, l)?;
        }
        Ok(())
    }
}

fn mismatch(template: String, literal: Node<'_>) -> BindError {
    BindError::StructuralMismatch {
        template,
        literal: literal.kind().to_string(),
        offset: literal.span().start,
    }
}

/// Replaces the placeholders of `tree` with `args`, in document order.
///
/// Values are written as their SQL text; strings are inserted without quoting.
/// Infinite and NaN floats are rejected.
pub fn substitute(tree: &SqlTree, args: &[Value]) -> BindResult<String> {
    let slots = placeholders(tree);
    if slots.len() != args.len() {
        return Err(BindError::ArgumentCount {
            expected: slots.len(),
            found: args.len(),
        });
    }

    let mut edits = EditList::new();
    for (index, (slot, arg)) in slots.iter().zip(args).enumerate() {
        if matches!(arg, Value::Float(n) if !n.is_finite()) {
            return Err(BindError::NonFiniteArgument { index });
        }
        edits.replace(slot.span, arg.to_string());
    }
    Ok(edits.apply(tree.source())?)
}
