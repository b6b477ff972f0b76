//! Parameter normalization for query strings
//!
//! Pure helpers that turn caller-supplied values into the literal fragments
//! the API expects. Nothing here touches the network.

use crate::types::Before;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;
use std::hash::BuildHasher;

/// A single symbol or a collection of symbols
///
/// Ordered collections keep the caller's iteration order. Unordered sets are
/// sorted so the joined output is deterministic.
pub trait SymbolList {
    /// Returns the raw tokens in query order
    fn tokens(&self) -> Vec<String>;
}

impl SymbolList for str {
    fn tokens(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl SymbolList for String {
    fn tokens(&self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: AsRef<str>> SymbolList for [S] {
    fn tokens(&self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> SymbolList for [S; N] {
    fn tokens(&self) -> Vec<String> {
        self.as_slice().tokens()
    }
}

impl<S: AsRef<str>> SymbolList for Vec<S> {
    fn tokens(&self) -> Vec<String> {
        self.as_slice().tokens()
    }
}

impl<S: AsRef<str>> SymbolList for BTreeSet<S> {
    fn tokens(&self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, H: BuildHasher> SymbolList for HashSet<S, H> {
    fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self.iter().map(|s| s.as_ref().to_string()).collect();
        tokens.sort();
        tokens
    }
}

impl<T: SymbolList + ?Sized> SymbolList for &T {
    fn tokens(&self) -> Vec<String> {
        (**self).tokens()
    }
}

/// Upper-cases every symbol and joins them with `,`
///
/// A single string is upper-cased and returned as is, so an already joined
/// value like `"btc,eth"` becomes `"BTC,ETH"`.
pub fn join_symbols<T: SymbolList + ?Sized>(value: &T) -> String {
    value
        .tokens()
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join(",")
}

/// Joins values with `,` without changing their case
///
/// Used for news feed names and language codes.
pub fn join_list<T: SymbolList + ?Sized>(value: &T) -> String {
    value.tokens().join(",")
}

/// Formats `&name=value`, or an empty string when the value is absent
///
/// A value is absent when it is `None` or renders as an empty string. Each
/// comma-separated token is percent-encoded; the commas stay literal.
pub fn optional_fragment<V: Display>(name: &str, value: Option<V>) -> String {
    match value.map(|v| v.to_string()) {
        Some(v) if !v.is_empty() => format!("&{}={}", name, encode_tokens(&v)),
        _ => String::new(),
    }
}

fn encode_tokens(value: &str) -> String {
    value
        .split(',')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join(",")
}

/// Converts a news cursor into integer epoch seconds
///
/// Calendar times are taken as UTC. Fractional epochs are truncated.
pub fn to_unix_seconds(before: Option<&Before>) -> Option<i64> {
    before.map(|b| match b {
        Before::Utc(dt) => dt.timestamp(),
        Before::Naive(dt) => dt.and_utc().timestamp(),
        Before::Epoch(secs) => secs.trunc() as i64,
    })
}
