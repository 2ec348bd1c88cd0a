//! BaseX postfix `update`: `$doc update { delete node ./a }` or `$doc update rename node . as "b"`.

use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::parser::hooks::{Hook, HookTable, wrap};
use crate::syntax::{Keyword, SyntaxKind};

pub(crate) fn install(table: &mut HookTable) {
    wrap(&mut table.value_expr, |p, operand| p.update_expr(operand));
}

impl Parser<'_> {
    fn update_expr(&mut self, operand: &Hook) -> Parsed {
        let m = self.mark();
        let lhs = operand(self);
        if !lhs.is_matched() {
            return m.rollback_declined(self);
        }
        let mut result = lhs;
        let mut m = m;
        while self.nth_is_plain_kw(0, Keyword::Update) {
            self.bump_kw(Keyword::Update);
            if self.at(SyntaxKind::BraceOpen) {
                let _ = self.enclosed_expr();
            } else {
                let _ = self.expr_single_or_error();
            }
            let done = m.done(self, SyntaxKind::UpdateExpr);
            result = done.parsed(self);
            m = done.precede(self);
        }
        m.drop(self);
        result
    }
}
