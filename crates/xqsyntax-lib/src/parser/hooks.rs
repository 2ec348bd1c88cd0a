//! Overridable grammar entry points.
//!
//! The base grammar calls these productions through a [`HookTable`] instead of directly.
//! Each dialect builds its table by wrapping the previous entry:
//!
//! ```text
//! extend_after(&mut table.primary_expr, |p| p.ml_constructor());
//! ```
//!
//! Tables are assembled once per parse, in a fixed dialect order.

use std::rc::Rc;

use super::core::Parser;
use super::dialect;
use super::outcome::Parsed;
use crate::config::Dialect;

pub(crate) type Hook = Rc<dyn for<'a> Fn(&mut Parser<'a>) -> Parsed>;

pub(crate) fn hook<F>(f: F) -> Hook
where
    F: for<'a> Fn(&mut Parser<'a>) -> Parsed + 'static,
{
    Rc::new(f)
}

/// Wraps `slot` so the extension is tried only when the previous entry declines.
pub(crate) fn extend_after<F>(slot: &mut Hook, extension: F)
where
    F: for<'a> Fn(&mut Parser<'a>) -> Parsed + 'static,
{
    let base = Rc::clone(slot);
    *slot = hook(move |p| base(p).or_else(|| extension(p)));
}

/// Wraps `slot` so the extension is tried first and the previous entry only when it declines.
pub(crate) fn extend_before<F>(slot: &mut Hook, extension: F)
where
    F: for<'a> Fn(&mut Parser<'a>) -> Parsed + 'static,
{
    let base = Rc::clone(slot);
    *slot = hook(move |p| extension(p).or_else(|| base(p)));
}

/// Replaces `slot` with a production that receives the previous entry as an operand, for
/// extensions that continue after what the base parsed rather than offering an alternative.
pub(crate) fn wrap<F>(slot: &mut Hook, production: F)
where
    F: for<'a> Fn(&mut Parser<'a>, &Hook) -> Parsed + 'static,
{
    let base = Rc::clone(slot);
    *slot = hook(move |p| production(p, &base));
}

#[derive(Clone)]
pub(crate) struct HookTable {
    pub(crate) query_body: Hook,
    pub(crate) prolog_decl: Hook,
    pub(crate) expr_single: Hook,
    /// The operand of a comparison, where full text inserts `contains text`.
    pub(crate) contains_expr: Hook,
    /// The operand of `validate`/path steps, where BaseX adds postfix `update`.
    pub(crate) value_expr: Hook,
    pub(crate) primary_expr: Hook,
    pub(crate) kind_test: Hook,
    pub(crate) item_type: Hook,
    pub(crate) catch_clause: Hook,
}

impl HookTable {
    pub(crate) fn base() -> Self {
        Self {
            query_body: hook(|p| p.query_body()),
            prolog_decl: hook(|p| p.prolog_decl()),
            expr_single: hook(|p| p.expr_single_base()),
            contains_expr: hook(|p| p.string_concat_expr()),
            value_expr: hook(|p| p.value_expr_base()),
            primary_expr: hook(|p| p.primary_expr_base()),
            kind_test: hook(|p| p.kind_test_base()),
            item_type: hook(|p| p.item_type_base()),
            catch_clause: hook(|p| p.catch_clause()),
        }
    }

    pub(crate) fn for_dialect(d: Dialect) -> Self {
        let mut table = Self::base();
        if d.contains(Dialect::FULL_TEXT) {
            dialect::full_text::install(&mut table);
        }
        if d.contains(Dialect::UPDATE) {
            dialect::update::install(&mut table);
        }
        if d.contains(Dialect::SCRIPTING) {
            dialect::scripting::install(&mut table);
        }
        if d.contains(Dialect::MARKLOGIC) {
            dialect::marklogic::install(&mut table);
        }
        if d.contains(Dialect::SAXON) {
            dialect::saxon::install(&mut table);
        }
        if d.contains(Dialect::BASEX) {
            dialect::basex::install(&mut table);
        }
        table
    }
}
