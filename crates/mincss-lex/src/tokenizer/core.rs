//! Core tokenizer: dispatch loop and token emission.

use mincss_util::{Error, Result, Span};

use crate::classify::{
    is_digit, is_hex, is_name, is_name_start, is_ws, starts_ident, starts_number,
    starts_valid_escape,
};
use crate::context::ContextStack;
use crate::cursor::Cursor;
use crate::modifier::{Modifier, ModifyCx};
use crate::token::{DumpMode, Token, TokenFlag, TokenId, TokenKind, TokenList};

use super::{comment, ident, number, string};

/// Streaming CSS tokenizer.
///
/// Usage mirrors the pipeline: install the input, optionally install a
/// modifier, run [`tokenize`](Tokenizer::tokenize) to end of input, then
/// [`dump`](Tokenizer::dump) the serialized result. Dropping the tokenizer
/// releases the token list, the working buffer and every `user` override.
#[derive(Default)]
pub struct Tokenizer {
    input: Option<Vec<u8>>,
    buf: Vec<u8>,
    list: TokenList,
    ctxt: ContextStack,
    modifier: Option<Box<dyn Modifier>>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer::default()
    }

    /// Installs the source buffer, replacing any prior input.
    pub fn set_input(&mut self, src: impl Into<Vec<u8>>) {
        self.input = Some(src.into());
    }

    /// Registers the post-emission hook, replacing any prior one.
    pub fn set_modifier(&mut self, modifier: Box<dyn Modifier>) {
        self.modifier = Some(modifier);
    }

    /// Runs the pipeline to end of input.
    pub fn tokenize(&mut self) -> Result<()> {
        let src = self.input.take().ok_or(Error::NullInput)?;
        let mut cur = Cursor::new(src)?;

        loop {
            let token = next_token(&mut cur)?;
            let kind = token.kind;
            self.emit(&cur, token)?;
            if kind == TokenKind::Eof {
                break;
            }
        }

        self.buf = cur.into_buf();
        Ok(())
    }

    /// Serializes the token list.
    pub fn dump(&self, mode: DumpMode) -> Vec<u8> {
        self.list.render(&self.buf, mode)
    }

    /// The finished token list.
    pub fn tokens(&self) -> &TokenList {
        &self.list
    }

    /// The normalized working buffer backing all token spans.
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Appends `token`, applies the `@import` elevation, runs the modifier
    /// and updates the context stack.
    fn emit(&mut self, cur: &Cursor, token: Token) -> Result<()> {
        let id = self.list.push_back(token)?;
        self.elevate_import_url(cur, id);

        log::trace!(
            target: "mincss::lex",
            "emit {:?} {:?}",
            self.list.get(id).kind,
            String::from_utf8_lossy(self.list.get(id).data.of(cur.buf())),
        );

        if let Some(modifier) = self.modifier.as_mut() {
            let mut cx = ModifyCx {
                list: &mut self.list,
                buf: cur.buf(),
                current: id,
                ctxt: &mut self.ctxt,
            };
            modifier.on_token(&mut cx)?;
        }

        self.ctxt.update(&self.list, id)
    }

    /// Retypes a string as a url when it directly follows `@import`.
    ///
    /// Only whitespace and comments may stand between the at-keyword and the
    /// string; any other predecessor leaves the string alone.
    fn elevate_import_url(&mut self, cur: &Cursor, id: TokenId) {
        if self.list.get(id).kind != TokenKind::String {
            return;
        }
        let Some(prev) = self.list.prev_non_trivia(id) else {
            return;
        };
        let prev_token = self.list.get(prev);
        if prev_token.kind != TokenKind::AtKeyword
            || prev_token.data.of(cur.buf()) != b"@import"
        {
            return;
        }

        let token = self.list.get_mut(id);
        token.kind = TokenKind::Url;
        token.flag = TokenFlag::AtUrlString;
        token.info = Span::new(token.data.start as usize, token.data.start as usize + 1);
    }
}

/// Produces the next token from the window; the heart of the dispatch table.
fn next_token(cur: &mut Cursor) -> Result<Token> {
    let b = cur.current();
    match b {
        0 => Ok(Token::new(TokenKind::Eof, Span::new(cur.pos(), cur.pos()))),
        b if is_ws(b) => fill_ws(cur),
        b'"' | b'\'' => string::fill_string(cur),
        b'#' => {
            if is_name(cur.peek(1)) || starts_valid_escape(cur.window_from(1)) {
                ident::fill_hash(cur)
            } else {
                fill_fixed(cur, TokenKind::Delim, 1)
            }
        }
        b'$' => match cur.peek(1) {
            b'=' => fill_fixed(cur, TokenKind::SuffixMatch, 2),
            _ => fill_fixed(cur, TokenKind::Delim, 1),
        },
        b'(' => fill_fixed(cur, TokenKind::RoundOpen, 1),
        b')' => fill_fixed(cur, TokenKind::RoundClose, 1),
        b'[' => fill_fixed(cur, TokenKind::SquareOpen, 1),
        b']' => fill_fixed(cur, TokenKind::SquareClose, 1),
        b'{' => fill_fixed(cur, TokenKind::CurlyOpen, 1),
        b'}' => fill_fixed(cur, TokenKind::CurlyClose, 1),
        b',' => fill_fixed(cur, TokenKind::Comma, 1),
        b':' => fill_fixed(cur, TokenKind::Colon, 1),
        b';' => fill_fixed(cur, TokenKind::Semicolon, 1),
        b'*' => match cur.peek(1) {
            b'=' => fill_fixed(cur, TokenKind::SubstrMatch, 2),
            _ => fill_fixed(cur, TokenKind::Delim, 1),
        },
        b'+' | b'.' => {
            if starts_number(cur.window()) {
                number::fill_number(cur)
            } else {
                fill_fixed(cur, TokenKind::Delim, 1)
            }
        }
        b'-' => {
            if starts_number(cur.window()) {
                number::fill_number(cur)
            } else if cur.peek(1) == b'-' && cur.peek(2) == b'>' {
                // CDC outranks ident-start; `--` alone begins a custom
                // property name.
                fill_fixed(cur, TokenKind::Cdc, 3)
            } else if starts_ident(cur.window()) {
                ident::fill_ident_like(cur)
            } else {
                fill_fixed(cur, TokenKind::Delim, 1)
            }
        }
        b'/' => match cur.peek(1) {
            b'*' => comment::fill_comment(cur),
            _ => fill_fixed(cur, TokenKind::Delim, 1),
        },
        b'<' => {
            if cur.peek(1) == b'!' && cur.peek(2) == b'-' && cur.peek(3) == b'-' {
                fill_fixed(cur, TokenKind::Cdo, 4)
            } else {
                fill_fixed(cur, TokenKind::Delim, 1)
            }
        }
        b'@' => {
            if starts_ident(cur.window_from(1)) {
                ident::fill_at_keyword(cur)
            } else {
                fill_fixed(cur, TokenKind::Delim, 1)
            }
        }
        b'\\' => {
            if starts_valid_escape(cur.window()) {
                ident::fill_ident_like(cur)
            } else {
                fill_fixed(cur, TokenKind::Delim, 1)
            }
        }
        b'^' => match cur.peek(1) {
            b'=' => fill_fixed(cur, TokenKind::PrefixMatch, 2),
            _ => fill_fixed(cur, TokenKind::Delim, 1),
        },
        b'u' | b'U' => {
            if cur.peek(1) == b'+' && (cur.peek(2) == b'?' || is_hex(cur.peek(2))) {
                ident::fill_unicode_range(cur)
            } else {
                ident::fill_ident_like(cur)
            }
        }
        b'|' => match cur.peek(1) {
            b'=' => fill_fixed(cur, TokenKind::DashMatch, 2),
            b'|' => fill_fixed(cur, TokenKind::Column, 2),
            _ => fill_fixed(cur, TokenKind::Delim, 1),
        },
        b'~' => match cur.peek(1) {
            b'=' => fill_fixed(cur, TokenKind::IncludeMatch, 2),
            _ => fill_fixed(cur, TokenKind::Delim, 1),
        },
        b if is_digit(b) => number::fill_number(cur),
        b if is_name_start(b) => ident::fill_ident_like(cur),
        _ => fill_fixed(cur, TokenKind::Delim, 1),
    }
}

/// Consumes a token of fixed character width.
fn fill_fixed(cur: &mut Cursor, kind: TokenKind, chars: usize) -> Result<Token> {
    let start = cur.pos();
    for _ in 0..chars {
        cur.advance()?;
    }
    Ok(Token::new(kind, Span::new(start, cur.pos())))
}

/// Consumes a run of whitespace into one token.
fn fill_ws(cur: &mut Cursor) -> Result<Token> {
    let start = cur.pos();
    while is_ws(cur.current()) {
        cur.advance()?;
    }
    Ok(Token::new(TokenKind::Ws, Span::new(start, cur.pos())))
}
