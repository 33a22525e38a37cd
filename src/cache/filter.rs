//! Key Filter Module
//!
//! Selects the keys whose whole string matches a regular expression. Matching
//! is spread over a fixed pool of worker tasks that pull from one shared input
//! queue and push hits to a collector task.

use std::sync::Arc;

use regex::Regex;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::error::{CacheError, Result};

// == Key Filter ==
/// A compiled, fully anchored key pattern.
#[derive(Debug, Clone)]
pub struct KeyFilter {
    regex: Arc<Regex>,
}

impl KeyFilter {
    /// Compiles `pattern` so that it must match an entire key.
    ///
    /// Returns `BadPattern` if the expression does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored).map_err(|e| CacheError::BadPattern(e.to_string()))?;
        Ok(Self {
            regex: Arc::new(regex),
        })
    }

    /// Tests a single key.
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// Tests every key on a pool of `workers` tasks and returns the matches.
    ///
    /// Returns only after every key has been tested. The order of the result
    /// is unspecified.
    pub async fn filter(&self, keys: Vec<String>, workers: usize) -> Vec<String> {
        let workers = workers.max(1);
        let total = keys.len();

        let (in_tx, in_rx) = mpsc::channel::<String>(workers);
        let in_rx = Arc::new(Mutex::new(in_rx));
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();

        let collector = tokio::spawn(async move {
            let mut matched = Vec::new();
            while let Some(key) = out_rx.recv().await {
                matched.push(key);
            }
            matched
        });

        let mut pool = JoinSet::new();
        for _ in 0..workers {
            let in_rx = Arc::clone(&in_rx);
            let out_tx = out_tx.clone();
            let filter = self.clone();
            pool.spawn(async move {
                loop {
                    let next = in_rx.lock().await.recv().await;
                    let Some(key) = next else { break };
                    if filter.is_match(&key) && out_tx.send(key).is_err() {
                        break;
                    }
                }
            });
        }
        // Collector ends once every worker has dropped its sender
        drop(out_tx);

        for key in keys {
            if in_tx.send(key).await.is_err() {
                break;
            }
        }
        drop(in_tx);

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                error!("Key filter worker failed: {}", e);
            }
        }

        match collector.await {
            Ok(matched) => {
                debug!("Key filter matched {} of {} keys", matched.len(), total);
                matched
            }
            Err(e) => {
                error!("Key filter collector failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Filters `keys` by `pattern`; an empty pattern returns every key unchanged.
pub async fn filter_keys(keys: Vec<String>, pattern: &str, workers: usize) -> Result<Vec<String>> {
    if pattern.is_empty() {
        return Ok(keys);
    }
    let filter = KeyFilter::new(pattern)?;
    Ok(filter.filter(keys, workers).await)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn keys(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn as_set(items: Vec<String>) -> HashSet<String> {
        items.into_iter().collect()
    }

    #[test]
    fn test_pattern_is_anchored() {
        let filter = KeyFilter::new("a.*").unwrap();
        assert!(filter.is_match("abc"));
        assert!(!filter.is_match("bac"));

        let filter = KeyFilter::new("b").unwrap();
        assert!(filter.is_match("b"));
        assert!(!filter.is_match("abc"));
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let filter = KeyFilter::new("ab|cd").unwrap();
        assert!(filter.is_match("ab"));
        assert!(filter.is_match("cd"));
        assert!(!filter.is_match("abx"));
        assert!(!filter.is_match("xcd"));
    }

    #[test]
    fn test_bad_pattern() {
        let result = KeyFilter::new("a(");
        assert!(matches!(result, Err(CacheError::BadPattern(_))));
    }

    #[tokio::test]
    async fn test_filter_selects_matches() {
        let filter = KeyFilter::new("a.*").unwrap();
        let matched = filter.filter(keys(&["abc", "xyz", "axy"]), 3).await;
        assert_eq!(as_set(matched), as_set(keys(&["abc", "axy"])));
    }

    #[tokio::test]
    async fn test_filter_more_workers_than_keys() {
        let filter = KeyFilter::new("k[0-9]").unwrap();
        let matched = filter.filter(keys(&["k1"]), 16).await;
        assert_eq!(matched, keys(&["k1"]));
    }

    #[tokio::test]
    async fn test_filter_zero_workers_still_runs() {
        let filter = KeyFilter::new(".*").unwrap();
        let matched = filter.filter(keys(&["a", "b"]), 0).await;
        assert_eq!(matched.len(), 2);
    }

    #[tokio::test]
    async fn test_filter_many_keys() {
        let input: Vec<String> = (0..1000).map(|i| format!("user:{}", i)).collect();
        let filter = KeyFilter::new("user:1[0-9]*").unwrap();
        let matched = filter.filter(input.clone(), 4).await;

        let expected: HashSet<String> =
            input.into_iter().filter(|k| k.starts_with("user:1")).collect();
        assert_eq!(as_set(matched), expected);
    }

    #[tokio::test]
    async fn test_filter_keys_empty_pattern_returns_all() {
        let result = filter_keys(keys(&["a", "b"]), "", 2).await.unwrap();
        assert_eq!(result, keys(&["a", "b"]));
    }

    #[tokio::test]
    async fn test_filter_keys_bad_pattern() {
        let result = filter_keys(keys(&["a"]), "[", 2).await;
        assert!(matches!(result, Err(CacheError::BadPattern(_))));
    }
}
