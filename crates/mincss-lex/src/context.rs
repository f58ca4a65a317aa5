//! Structural context tracking.
//!
//! A stack of frames describing where the next token logically appears:
//! inside a block, an at-rule prelude, a declaration, or a parenthesized
//! group. The tracker runs after every emission (and after the modifier, so
//! a modifier observes the context the token was emitted in). The
//! declaration frame carries the live view consumers need: the property
//! ident and the last non-trivia token of the value seen so far.

use mincss_util::Result;

use crate::token::{TokenId, TokenKind, TokenList};

/// One structural context frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// `{` .. `}` block.
    Block { open: TokenId },
    /// From an at-keyword to its terminating `;` or opening `{`.
    AtPrelude { at: TokenId },
    /// From the `:` after a property ident to the next `;` or `}`.
    Declaration { first: TokenId, last: TokenId },
    /// Parenthesized group: function arguments or a bare `(` .. `)`.
    Group { open: TokenId },
}

/// Stack of structural contexts; the top reflects the current position.
#[derive(Default)]
pub struct ContextStack {
    frames: Vec<Frame>,
}

impl ContextStack {
    pub fn new() -> Self {
        ContextStack::default()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The innermost declaration frame, if any (a declaration stays current
    /// while its value descends into function-argument groups).
    pub fn declaration(&self) -> Option<(TokenId, TokenId)> {
        self.frames.iter().rev().find_map(|f| match f {
            Frame::Declaration { first, last } => Some((*first, *last)),
            _ => None,
        })
    }

    /// True if the current position is inside a declaration value.
    pub fn in_declaration(&self) -> bool {
        self.declaration().is_some()
    }

    /// Repairs the innermost declaration's `last` pointer after a modifier
    /// deleted the token it referred to.
    pub fn set_declaration_last(&mut self, id: TokenId) {
        for f in self.frames.iter_mut().rev() {
            if let Frame::Declaration { last, .. } = f {
                *last = id;
                return;
            }
        }
    }

    fn push(&mut self, frame: Frame) -> Result<()> {
        self.frames.try_reserve(1)?;
        self.frames.push(frame);
        Ok(())
    }

    /// Applies the transition for the just-emitted token `id`.
    pub fn update(&mut self, list: &TokenList, id: TokenId) -> Result<()> {
        let kind = list.get(id).kind;
        match kind {
            TokenKind::CurlyOpen => {
                // A stray declaration frame here means a selector with a
                // pseudo-class was misread as a property; drop it.
                if matches!(self.top(), Some(Frame::Declaration { .. })) {
                    self.frames.pop();
                }
                if matches!(self.top(), Some(Frame::AtPrelude { .. })) {
                    self.frames.pop();
                }
                self.push(Frame::Block { open: id })?;
            }
            TokenKind::CurlyClose => {
                if matches!(self.top(), Some(Frame::Declaration { .. })) {
                    self.frames.pop();
                }
                if matches!(self.top(), Some(Frame::Block { .. })) {
                    self.frames.pop();
                }
            }
            TokenKind::AtKeyword => {
                self.push(Frame::AtPrelude { at: id })?;
            }
            TokenKind::Semicolon => match self.top() {
                Some(Frame::Declaration { .. }) | Some(Frame::AtPrelude { .. }) => {
                    self.frames.pop();
                }
                _ => {}
            },
            TokenKind::Colon => {
                let in_decl_position = matches!(self.top(), None | Some(Frame::Block { .. }));
                if in_decl_position {
                    if let Some(prop) = list.prev_non_trivia(id) {
                        if list.get(prop).kind == TokenKind::Ident {
                            self.push(Frame::Declaration {
                                first: prop,
                                last: id,
                            })?;
                        }
                    }
                }
            }
            TokenKind::Function | TokenKind::RoundOpen => {
                self.track_value(id);
                self.push(Frame::Group { open: id })?;
                return Ok(());
            }
            TokenKind::RoundClose => {
                if matches!(self.top(), Some(Frame::Group { .. })) {
                    self.frames.pop();
                }
            }
            TokenKind::Eof => return Ok(()),
            _ => {}
        }

        self.track_value(id);
        Ok(())
    }

    /// Records `id` as the declaration's last value token when the current
    /// context is the declaration itself (tokens inside nested groups do not
    /// move the pointer; the closing paren does).
    fn track_value(&mut self, id: TokenId) {
        if let Some(Frame::Declaration { last, .. }) = self.frames.last_mut() {
            *last = id;
        }
    }
}
