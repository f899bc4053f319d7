//! Match-priority indices derived from a [`LexiconStore`].
//!
//! Both scanners walk their index front to back and take the first entry that
//! prefixes the remaining input. The sort order below is what makes "first
//! match" equal "longest, highest-priority match":
//!
//! - SS side: trigger length descending, then category precedence
//!   (Composite > Structural > Tag > Core), then declaration order
//! - NL side: phrase length descending, then declaration order
//!
//! Lengths are counted in chars. Both sorts are stable, so building twice from
//! the same store yields identical lists.

use std::cmp::Reverse;
use std::sync::Arc;

use serde::Serialize;
use ss_lexicon::{Category, LexiconStore};

/// One SS trigger in match order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SsIndexEntry {
    pub trigger: String,
    pub category: Category,
}

/// SS triggers from every category, longest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortedSsIndex(Vec<SsIndexEntry>);

impl SortedSsIndex {
    pub fn iter(&self) -> std::slice::Iter<'_, SsIndexEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First entry whose trigger prefixes `text`.
    pub fn first_match(&self, text: &str) -> Option<&SsIndexEntry> {
        self.0.iter().find(|e| text.starts_with(e.trigger.as_str()))
    }
}

/// NL phrases, longest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortedNlIndex(Vec<String>);

impl SortedNlIndex {
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Both sorted indices plus the lexicon they were built from.
///
/// Holding the store here means a translator can never be handed indices and
/// a lexicon that disagree.
#[derive(Debug, Clone)]
pub struct MatchIndices {
    lexicon: Arc<LexiconStore>,
    ss: SortedSsIndex,
    nl: SortedNlIndex,
}

impl MatchIndices {
    pub fn lexicon(&self) -> &LexiconStore {
        &self.lexicon
    }

    pub fn ss(&self) -> &SortedSsIndex {
        &self.ss
    }

    pub fn nl(&self) -> &SortedNlIndex {
        &self.nl
    }

    /// Fingerprint of the lexicon these indices were derived from.
    pub fn fingerprint(&self) -> &str {
        self.lexicon.fingerprint()
    }

    /// Indices paired with a lexicon they were not built from.
    #[cfg(test)]
    pub(crate) fn from_parts(
        lexicon: Arc<LexiconStore>,
        ss: Vec<SsIndexEntry>,
        nl: Vec<String>,
    ) -> Self {
        Self {
            lexicon,
            ss: SortedSsIndex(ss),
            nl: SortedNlIndex(nl),
        }
    }

    /// Whether these indices still describe `store`.
    ///
    /// Hosts that swap lexicons call this to decide whether to rebuild.
    pub fn is_current_for(&self, store: &LexiconStore) -> bool {
        self.lexicon.fingerprint() == store.fingerprint()
    }
}

/// Builds [`MatchIndices`] from a lexicon.
pub struct MatchIndexBuilder;

impl MatchIndexBuilder {
    /// Derive both indices. Never fails; an empty lexicon gives empty indices.
    pub fn build(lexicon: Arc<LexiconStore>) -> MatchIndices {
        let ss = Self::build_ss(&lexicon);
        let nl = Self::build_nl(&lexicon);

        tracing::debug!(
            fingerprint = %lexicon.fingerprint(),
            ss_entries = ss.len(),
            nl_entries = nl.len(),
            "built match indices"
        );

        MatchIndices { lexicon, ss, nl }
    }

    fn build_ss(lexicon: &LexiconStore) -> SortedSsIndex {
        // entries() already yields categories in precedence order, each in
        // declaration order; the stable sort keeps that within equal lengths.
        let mut entries: Vec<(usize, SsIndexEntry)> = lexicon
            .entries()
            .map(|e| {
                let len = e.trigger_len();
                (
                    len,
                    SsIndexEntry {
                        trigger: e.trigger,
                        category: e.category,
                    },
                )
            })
            .collect();
        entries.sort_by_key(|(len, e)| (Reverse(*len), e.category.precedence()));
        SortedSsIndex(entries.into_iter().map(|(_, e)| e).collect())
    }

    fn build_nl(lexicon: &LexiconStore) -> SortedNlIndex {
        let mut phrases: Vec<(usize, String)> = lexicon
            .phrases()
            .iter()
            .map(|p| (p.phrase_len(), p.phrase.clone()))
            .collect();
        phrases.sort_by_key(|(len, _)| Reverse(*len));
        SortedNlIndex(phrases.into_iter().map(|(_, p)| p).collect())
    }
}

/// Build match indices for a lexicon.
pub fn build_match_indices(lexicon: Arc<LexiconStore>) -> MatchIndices {
    MatchIndexBuilder::build(lexicon)
}
