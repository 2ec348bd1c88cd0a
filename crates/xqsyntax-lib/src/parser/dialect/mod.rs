//! Extension grammars. Each module exposes `install`, which layers its productions onto a
//! [`HookTable`](super::hooks::HookTable), plus the productions themselves as parser
//! methods.

pub(crate) mod basex;
pub(crate) mod full_text;
pub(crate) mod marklogic;
pub(crate) mod saxon;
pub(crate) mod scripting;
pub(crate) mod update;
