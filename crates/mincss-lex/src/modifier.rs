//! The per-emission modifier hook.
//!
//! A modifier is a capability object the tokenizer calls after appending
//! each token and before updating the context stack, so the hook observes
//! the structural context the token was emitted in. The built-in minifier in
//! `mincss-min` is one implementation; callers may install their own.
//!
//! Rights and prohibitions:
//!
//! - the hook may rewrite the `user` override of the current token and of
//!   any predecessor whose kind is modifiable, retype the current token, and
//!   insert or delete predecessors (including repairing the declaration view
//!   through [`ContextStack::set_declaration_last`]);
//! - the hook must not touch the read position and, apart from the current
//!   token, must not touch anything at or after it — nothing after the
//!   current token exists yet.

use crate::context::ContextStack;
use crate::token::{TokenId, TokenList};
use mincss_util::Result;

/// Mutable view handed to the modifier for one emission.
pub struct ModifyCx<'a> {
    /// The token list, current token at the tail.
    pub list: &'a mut TokenList,
    /// The working buffer backing all token spans.
    pub buf: &'a [u8],
    /// The token that was just emitted.
    pub current: TokenId,
    /// Context stack as it was before this token's transition.
    pub ctxt: &'a mut ContextStack,
}

/// Post-emission hook over the token stream.
///
/// A hook that grows the token arena (inserting a synthetic separator, for
/// example) reports allocation failure the same way the rest of the engine
/// does; the error aborts the run through
/// [`Tokenizer::tokenize`](crate::Tokenizer::tokenize).
pub trait Modifier {
    fn on_token(&mut self, cx: &mut ModifyCx<'_>) -> Result<()>;
}
