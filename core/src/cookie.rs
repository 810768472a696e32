//! Name/value cookie jar.
//!
//! Cookies arrive either as a mapping or as an ordered list of pairs; both
//! collapse into the same `CookieJar`. In an ordered list a later pair with
//! the same name replaces the earlier one.

use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// A new jar holding every cookie of `self` and `overrides`; on a name
    /// collision the cookie from `overrides` wins.
    pub fn merged(&self, overrides: &CookieJar) -> CookieJar {
        let mut cookies = self.cookies.clone();
        cookies.extend(overrides.cookies.iter().map(|(k, v)| (k.clone(), v.clone())));
        CookieJar { cookies }
    }

    /// Value for a `Cookie` request header, `None` when the jar is empty.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self.iter().map(|(name, value)| format!("{name}={value}")).collect();
        Some(pairs.join("; "))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CookieJar {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut jar = CookieJar::new();
        for (name, value) in iter {
            jar.set(name, value);
        }
        jar
    }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for CookieJar {
    fn from(cookies: HashMap<K, V>) -> Self {
        cookies.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for CookieJar {
    fn from(cookies: BTreeMap<K, V>) -> Self {
        cookies.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for CookieJar {
    fn from(cookies: Vec<(K, V)>) -> Self {
        cookies.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for CookieJar {
    fn from(cookies: [(K, V); N]) -> Self {
        cookies.into_iter().collect()
    }
}
