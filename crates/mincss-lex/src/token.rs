//! Token model and the token list.
//!
//! Tokens live in an arena indexed by [`TokenId`]; `prev`/`next` are plain
//! ids, so the list is doubly linked without ownership cycles. Released
//! slots are reused through a free list. The serializer lives here as well:
//! it is the single consumer of the `user` override.

use mincss_util::{Idx, IndexVec, Result, Span};

/// Index of a token in its [`TokenList`] arena.
///
/// Ids stay stable across insertions and deletions; a released slot's id is
/// only handed out again once the slot is reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u32);

impl Idx for TokenId {
    fn from_usize(idx: usize) -> Self {
        debug_assert!(idx <= u32::MAX as usize);
        TokenId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The closed set of token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ws,
    String,
    BadString,
    Hash,
    Delim,
    SuffixMatch,
    SubstrMatch,
    PrefixMatch,
    DashMatch,
    IncludeMatch,
    Column,
    RoundOpen,
    RoundClose,
    SquareOpen,
    SquareClose,
    CurlyOpen,
    CurlyClose,
    Comma,
    Colon,
    Semicolon,
    Cdo,
    Cdc,
    Number,
    Percentage,
    Dimension,
    Function,
    Ident,
    AtKeyword,
    Url,
    BadUrl,
    UnicodeRange,
    Comment,
    Eof,
}

impl TokenKind {
    /// Whitespace or comment.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Ws | TokenKind::Comment)
    }

    /// Kinds whose text a modifier may rewrite.
    pub fn is_modifiable(self) -> bool {
        matches!(
            self,
            TokenKind::Ws
                | TokenKind::Comment
                | TokenKind::String
                | TokenKind::Hash
                | TokenKind::Url
                | TokenKind::Number
                | TokenKind::Percentage
                | TokenKind::Dimension
                | TokenKind::Ident
                | TokenKind::Function
                | TokenKind::AtKeyword
        )
    }
}

/// Kind-dependent token flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TokenFlag {
    #[default]
    None,
    /// Number-like token without fraction or exponent.
    Integer,
    /// Number-like token with a fraction or exponent.
    Number,
    /// Hash whose name would start an identifier.
    Id,
    /// Hash whose name would not start an identifier.
    Unrestricted,
    /// String token, or url token written in string form.
    String,
    /// String retyped to url because it directly follows `@import`.
    AtUrlString,
}

/// One classified token.
///
/// `data` always covers the raw text of the token in the working buffer.
/// `info` is kind-dependent: the unit of a dimension, the `%` of a
/// percentage, or the opening quote of a string/url-string. `user`, when
/// set, replaces `data` during minify-mode serialization and is owned by the
/// token.
#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub flag: TokenFlag,
    pub data: Span,
    pub info: Span,
    pub user: Option<String>,
    prev: Option<TokenId>,
    next: Option<TokenId>,
}

impl Token {
    pub fn new(kind: TokenKind, data: Span) -> Self {
        Token {
            kind,
            flag: TokenFlag::None,
            data,
            info: Span::EMPTY,
            user: None,
            prev: None,
            next: None,
        }
    }

    /// The text the serializer would emit in minify mode.
    pub fn effective<'a>(&'a self, buf: &'a [u8]) -> &'a [u8] {
        match &self.user {
            Some(s) => s.as_bytes(),
            None => self.data.of(buf),
        }
    }
}

/// Serialization mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpMode {
    /// Emit every token's raw `data`; reproduces the preprocessed input.
    Preserve,
    /// Emit `user` when set, `data` otherwise.
    Minify,
}

/// Doubly-linked token sequence backed by an arena.
#[derive(Default)]
pub struct TokenList {
    slots: IndexVec<TokenId, Option<Token>>,
    free: Vec<TokenId>,
    head: Option<TokenId>,
    tail: Option<TokenId>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList::default()
    }

    pub fn head(&self) -> Option<TokenId> {
        self.head
    }

    pub fn tail(&self) -> Option<TokenId> {
        self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Borrow a live token.
    ///
    /// Panics if `id` refers to a released slot; holding on to an id past
    /// the deletion of its token is a logic error.
    pub fn get(&self, id: TokenId) -> &Token {
        match &self.slots[id] {
            Some(token) => token,
            None => panic!("token {:?} has been released", id),
        }
    }

    pub fn get_mut(&mut self, id: TokenId) -> &mut Token {
        match &mut self.slots[id] {
            Some(token) => token,
            None => panic!("token {:?} has been released", id),
        }
    }

    pub fn prev(&self, id: TokenId) -> Option<TokenId> {
        self.get(id).prev
    }

    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        self.get(id).next
    }

    fn alloc(&mut self, token: Token) -> Result<TokenId> {
        if let Some(id) = self.free.pop() {
            self.slots[id] = Some(token);
            Ok(id)
        } else {
            self.slots.try_reserve(1)?;
            Ok(self.slots.push(Some(token)))
        }
    }

    /// Appends a token at the tail.
    pub fn push_back(&mut self, mut token: Token) -> Result<TokenId> {
        token.prev = self.tail;
        token.next = None;
        let id = self.alloc(token)?;
        match self.tail {
            Some(tail) => self.get_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        Ok(id)
    }

    /// Inserts a token directly after `anchor`.
    pub fn insert_after(&mut self, anchor: TokenId, mut token: Token) -> Result<TokenId> {
        let following = self.next(anchor);
        token.prev = Some(anchor);
        token.next = following;
        let id = self.alloc(token)?;
        self.get_mut(anchor).next = Some(id);
        match following {
            Some(f) => self.get_mut(f).prev = Some(id),
            None => self.tail = Some(id),
        }
        Ok(id)
    }

    /// Inserts a token directly before `anchor`.
    pub fn insert_before(&mut self, anchor: TokenId, mut token: Token) -> Result<TokenId> {
        let preceding = self.prev(anchor);
        token.prev = preceding;
        token.next = Some(anchor);
        let id = self.alloc(token)?;
        self.get_mut(anchor).prev = Some(id);
        match preceding {
            Some(p) => self.get_mut(p).next = Some(id),
            None => self.head = Some(id),
        }
        Ok(id)
    }

    /// Unlinks `id` from the chain and releases its slot.
    pub fn release(&mut self, id: TokenId) {
        let (prev, next) = {
            let token = self.get(id);
            (token.prev, token.next)
        };
        match prev {
            Some(p) => self.get_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.get_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.slots[id] = None;
        self.free.push(id);
    }

    /// Iterates ids head to tail.
    pub fn ids(&self) -> Ids<'_> {
        Ids {
            list: self,
            next: self.head,
        }
    }

    /// Nearest predecessor that is not whitespace or a comment.
    pub fn prev_non_trivia(&self, id: TokenId) -> Option<TokenId> {
        let mut cur = self.prev(id);
        while let Some(p) = cur {
            if !self.get(p).kind.is_trivia() {
                return Some(p);
            }
            cur = self.prev(p);
        }
        None
    }

    /// Nearest predecessor whose effective text is non-empty.
    pub fn prev_rendered(&self, id: TokenId, buf: &[u8]) -> Option<TokenId> {
        let mut cur = self.prev(id);
        while let Some(p) = cur {
            if !self.get(p).effective(buf).is_empty() {
                return Some(p);
            }
            cur = self.prev(p);
        }
        None
    }

    /// Serializes the list.
    pub fn render(&self, buf: &[u8], mode: DumpMode) -> Vec<u8> {
        let mut out = Vec::new();
        for id in self.ids() {
            let token = self.get(id);
            if token.kind == TokenKind::Eof {
                continue;
            }
            match mode {
                DumpMode::Preserve => out.extend_from_slice(token.data.of(buf)),
                DumpMode::Minify => out.extend_from_slice(token.effective(buf)),
            }
        }
        out
    }
}

/// Iterator over live token ids, head to tail.
pub struct Ids<'a> {
    list: &'a TokenList,
    next: Option<TokenId>,
}

impl Iterator for Ids<'_> {
    type Item = TokenId;

    fn next(&mut self) -> Option<TokenId> {
        let id = self.next?;
        self.next = self.list.next(id);
        Some(id)
    }
}
