//! draw.io style strings (`key=value;flag;key=value;`).
//!
//! A [`Style`] behaves like an ordered map: keys are unique, a repeated key overwrites the
//! earlier value but keeps the position of its first occurrence.

use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    entries: IndexMap<String, Option<String>>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a raw style string.
    ///
    /// Only the first `=` of a segment separates key from value, so values such as
    /// `points=[[0,0]]` or `image=data:x=y` survive intact. Segments without `=` become bare
    /// flags and empty segments are dropped.
    pub fn decode(raw: &str) -> Self {
        let mut style = Self::new();
        for segment in raw.split(';') {
            if segment.is_empty() {
                continue;
            }
            match segment.split_once('=') {
                Some((key, value)) => style.set(key, Some(value)),
                None => style.set(segment, None),
            }
        }
        style
    }

    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            push_fragment(&mut out, key, value.as_deref());
            out.push(';');
        }
        out
    }

    pub fn set(&mut self, key: &str, value: Option<&str>) {
        self.entries
            .insert(key.to_string(), value.map(|v| v.to_string()));
    }

    /// Returns `None` when the key is absent and `Some(None)` for a bare flag.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Entries of `self` that `base` does not already carry with the same value.
    pub fn delta<'a>(&'a self, base: &Style) -> impl Iterator<Item = (&'a str, Option<&'a str>)> {
        self.iter().filter(move |(key, value)| base.get(key) != Some(*value))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<'a> FromIterator<(&'a str, Option<&'a str>)> for Style {
    fn from_iter<I: IntoIterator<Item = (&'a str, Option<&'a str>)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (key, value) in iter {
            style.set(key, value);
        }
        style
    }
}

/// The style fragment for one entry: `key=value`, or just `key` for a flag.
pub fn fragment(key: &str, value: Option<&str>) -> String {
    let mut out = String::with_capacity(key.len() + value.map_or(0, |v| v.len() + 1));
    push_fragment(&mut out, key, value);
    out
}

fn push_fragment(out: &mut String, key: &str, value: Option<&str>) {
    out.push_str(key);
    if let Some(value) = value {
        out.push('=');
        out.push_str(value);
    }
}
