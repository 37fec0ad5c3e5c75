//! Async task management for the search backend.
//!
//! Searches run in background tasks so the input keeps rendering and
//! ticking while a query is in flight. Results come back over a tokio
//! channel which the main loop drains with `try_recv()` on each tick.
//!
//! The search itself is simulated: after a configurable delay, each term is
//! checked against the rewrite table. The first term with a rewrite turns
//! the whole query into a "did you mean" answer.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

/// Messages sent from background tasks to the main event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMessage {
    /// The query was accepted as-is.
    Searched {
        /// Tags joined with a single space.
        query: String,
    },

    /// A term had no direct matches.
    NoMatches {
        /// The rejected term first, then the other submitted terms in order.
        original_tags: Vec<String>,
        /// Replacement terms for the rejected one.
        suggested_tags: Vec<String>,
    },
}

/// Lookup table from a term without matches to its replacements.
///
/// Keys are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RewriteTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl RewriteTable {
    /// Build a table from configured rewrites.
    pub fn new(rewrites: &BTreeMap<String, Vec<String>>) -> Self {
        let entries = rewrites
            .iter()
            .map(|(term, suggestions)| (term.trim().to_lowercase(), suggestions.clone()))
            .collect();
        Self { entries }
    }

    /// Replacements for `term`, if it has any.
    pub fn lookup(&self, term: &str) -> Option<&[String]> {
        self.entries
            .get(&term.trim().to_lowercase())
            .map(Vec::as_slice)
    }

    /// Answer a submitted tag list.
    pub fn resolve(&self, tags: &[String]) -> SearchMessage {
        let rejected = tags
            .iter()
            .enumerate()
            .find_map(|(i, tag)| self.lookup(tag).map(|s| (i, s)));

        match rejected {
            Some((index, suggestions)) => {
                let mut original_tags = Vec::with_capacity(tags.len());
                original_tags.push(tags[index].clone());
                original_tags.extend(
                    tags.iter()
                        .enumerate()
                        .filter(|(i, _)| *i != index)
                        .map(|(_, tag)| tag.clone()),
                );
                SearchMessage::NoMatches {
                    original_tags,
                    suggested_tags: suggestions.to_vec(),
                }
            }
            None => SearchMessage::Searched {
                query: tags.join(" "),
            },
        }
    }
}

/// Spawns background search tasks.
///
/// Cloning is cheap; every clone reports to the same channel.
#[derive(Debug, Clone)]
pub struct SearchSpawner {
    tx: mpsc::UnboundedSender<SearchMessage>,
    rewrites: RewriteTable,
    delay: Duration,
}

impl SearchSpawner {
    /// Create a spawner reporting through `tx`.
    pub fn new(
        tx: mpsc::UnboundedSender<SearchMessage>,
        rewrites: RewriteTable,
        delay: Duration,
    ) -> Self {
        Self { tx, rewrites, delay }
    }

    /// Spawn a search for the submitted tags.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_search(&self, tags: Vec<String>) {
        let tx = self.tx.clone();
        let rewrites = self.rewrites.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let message = rewrites.resolve(&tags);
            debug!(?message, "Search finished");
            // The receiver is gone only when the app is shutting down
            let _ = tx.send(message);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RewriteTable {
        let mut rewrites = BTreeMap::new();
        rewrites.insert("Gym".to_string(), vec!["fitness center".to_string()]);
        rewrites.insert(
            "w/d".to_string(),
            vec!["washer".to_string(), "dryer".to_string()],
        );
        RewriteTable::new(&rewrites)
    }

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = table();
        assert_eq!(
            table.lookup("GYM"),
            Some(&["fitness center".to_string()][..])
        );
        assert!(table.lookup("pool").is_none());
    }

    #[test]
    fn test_resolve_without_rewrite_joins_query() {
        let message = table().resolve(&tags(&["2BR", "Brooklyn"]));
        assert_eq!(
            message,
            SearchMessage::Searched {
                query: "2BR Brooklyn".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_moves_rejected_term_first() {
        let message = table().resolve(&tags(&["2BR", "gym", "Brooklyn"]));
        assert_eq!(
            message,
            SearchMessage::NoMatches {
                original_tags: tags(&["gym", "2BR", "Brooklyn"]),
                suggested_tags: tags(&["fitness center"]),
            }
        );
    }

    #[test]
    fn test_resolve_uses_first_rejected_term() {
        let message = table().resolve(&tags(&["w/d", "gym"]));
        match message {
            SearchMessage::NoMatches {
                original_tags,
                suggested_tags,
            } => {
                assert_eq!(original_tags, tags(&["w/d", "gym"]));
                assert_eq!(suggested_tags, tags(&["washer", "dryer"]));
            }
            other => panic!("expected NoMatches, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_spawn_search_reports_over_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spawner = SearchSpawner::new(tx, table(), Duration::ZERO);

        spawner.spawn_search(tags(&["pet friendly"]));

        let message = rx.recv().await.expect("search result");
        assert_eq!(
            message,
            SearchMessage::Searched {
                query: "pet friendly".to_string()
            }
        );
    }

    #[test]
    fn test_spawn_search_waits_for_delay() {
        tokio_test::block_on(async {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let spawner = SearchSpawner::new(tx, table(), Duration::from_millis(30));

            spawner.spawn_search(tags(&["gym"]));
            tokio::task::yield_now().await;
            assert!(rx.try_recv().is_err());

            let message = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("search finished in time")
                .expect("search result");
            assert!(matches!(message, SearchMessage::NoMatches { .. }));
        });
    }
}
