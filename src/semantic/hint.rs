//! Proxy hints carried in `/* @proxy k1=v1;k2=v2 */` comments.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sql::{Comment, SqlTree, Statement};

const HINT_MARKER: &str = "@proxy";

/// Key/value pairs from a proxy hint comment, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hints(BTreeMap<String, String>);

impl Hints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the full text of a hint comment, delimiters included.
    ///
    /// Returns empty hints if the comment is not a proxy hint. Pairs that do
    /// not contain exactly one `=` are dropped.
    pub fn parse(comment: &str) -> Self {
        let Some(body) = hint_body(comment) else {
            return Self::default();
        };

        let mut map = BTreeMap::new();
        for segment in body.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let mut pieces = segment.split('=');
            match (pieces.next(), pieces.next(), pieces.next()) {
                (Some(key), Some(value), None) if !key.trim().is_empty() => {
                    map.insert(key.trim().to_string(), value.trim().to_string());
                }
                _ => {
                    tracing::debug!(pair = segment, "dropping malformed hint pair");
                }
            }
        }
        Self(map)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Reads a boolean hint. Accepts `true`/`false` in any case and `1`/`0`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        let value = self.get_str(key)?;
        if value.eq_ignore_ascii_case("true") || value == "1" {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") || value == "0" {
            Some(false)
        } else {
            None
        }
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_str(key)?.parse().ok()
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get_str(key)?.parse().ok()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for Hints {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Hints {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Returns the text between `@proxy` and the closing `*/`.
fn hint_body(comment: &str) -> Option<&str> {
    let body = comment.strip_prefix("/*")?.trim_start();
    let body = body.strip_prefix(HINT_MARKER)?;
    Some(body.strip_suffix("*/").unwrap_or(body))
}

/// Returns the hints attached to the statement's leading keyword.
///
/// Multi-table UPDATE and DELETE and unmodeled statements report no hints.
pub fn extract_hints(tree: &SqlTree) -> Hints {
    hint_comment(tree.statement())
        .map(|c| Hints::parse(&c.text))
        .unwrap_or_default()
}

fn hint_comment(stmt: &Statement) -> Option<&Comment> {
    match stmt {
        Statement::Select(s) => s.hint.as_ref(),
        Statement::Insert(s) => s.hint.as_ref(),
        Statement::Update(s) if s.single_table().is_some() => s.hint.as_ref(),
        Statement::Delete(s) if s.single_table().is_some() => s.hint.as_ref(),
        Statement::Update(_) | Statement::Delete(_) | Statement::Other(_) => None,
        Statement::Begin(s) | Statement::Commit(s) | Statement::Rollback(s) => s.hint.as_ref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints(sql: &str) -> Hints {
        extract_hints(&SqlTree::parse(sql).unwrap())
    }

    #[test]
    fn test_select_hint() {
        let h = hints("SELECT /* @proxy k1=true;k2=222 */ * FROM t");
        assert_eq!(h, Hints::from_iter([("k1", "true"), ("k2", "222")]));
        assert_eq!(h.get_bool("k1"), Some(true));
        assert_eq!(h.get_i64("k2"), Some(222));
        assert_eq!(h.get_f64("k2"), Some(222.0));
        assert_eq!(h.get_str("k3"), None);
    }

    #[test]
    fn test_no_hint_is_empty() {
        assert!(hints("SELECT * FROM t").is_empty());
        assert!(hints("SELECT /* plain */ * FROM t").is_empty());
    }

    #[test]
    fn test_hint_positions() {
        assert_eq!(hints("INSERT /* @proxy a=1 */ INTO t (x) VALUES (1)").len(), 1);
        assert_eq!(hints("UPDATE /*@proxy a=1*/ t SET x = 1").len(), 1);
        assert_eq!(hints("DELETE /* @proxy a=1 */ FROM t").len(), 1);
        assert_eq!(hints("BEGIN /* @proxy a=1 */").len(), 1);
        assert_eq!(hints("COMMIT /* @proxy a=1 */").len(), 1);
    }

    #[test]
    fn test_multi_table_statements_have_no_hints() {
        assert!(hints("UPDATE /* @proxy a=1 */ t1, t2 SET t1.x = t2.x").is_empty());
        assert!(hints("DELETE /* @proxy a=1 */ t1 FROM t1 JOIN t2 ON t1.id = t2.id").is_empty());
    }

    #[test]
    fn test_malformed_pairs_are_dropped() {
        let h = Hints::parse("/* @proxy  a = 1 ; bad ; c=1=2;; =x; d= */");
        assert_eq!(h, Hints::from_iter([("a", "1"), ("d", "")]));
    }

    #[test]
    fn test_get_bool() {
        let h = Hints::parse("/* @proxy a=TRUE;b=0;c=yes */");
        assert_eq!(h.get_bool("a"), Some(true));
        assert_eq!(h.get_bool("b"), Some(false));
        assert_eq!(h.get_bool("c"), None);
    }

    #[test]
    fn test_non_hint_comment() {
        assert!(Hints::parse("/* proxy a=1 */").is_empty());
        assert!(Hints::parse("-- @proxy a=1").is_empty());
    }
}
