//! Edge case tests for mincss-lex
