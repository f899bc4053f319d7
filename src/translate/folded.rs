//! Case-folded and original views of the same input, advanced in lockstep.
//!
//! Phrase matching runs against the case-folded view; unmatched words are
//! copied from the original view so their case survives. Lower-casing can
//! change byte length (and sometimes char count), so the two views are tied
//! together by a table of char boundaries rather than by equal offsets.

use nom::{bytes::complete::take_till1, IResult};
use ss_lexicon::fold_char;

pub(crate) struct FoldedCursor<'a> {
    original: &'a str,
    folded: String,
    /// `(original_offset, folded_offset)` at every original char start, plus the end.
    marks: Vec<(usize, usize)>,
    pos: usize,
}

impl<'a> FoldedCursor<'a> {
    pub(crate) fn new(original: &'a str) -> Self {
        let mut folded = String::with_capacity(original.len());
        let mut marks = Vec::with_capacity(original.len() + 1);
        for (offset, c) in original.char_indices() {
            marks.push((offset, folded.len()));
            folded.extend(fold_char(c));
        }
        marks.push((original.len(), folded.len()));
        Self {
            original,
            folded,
            marks,
            pos: 0,
        }
    }

    pub(crate) fn folded_rest(&self) -> &str {
        &self.folded[self.marks[self.pos].1..]
    }

    pub(crate) fn original_rest(&self) -> &'a str {
        &self.original[self.marks[self.pos].0..]
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos + 1 >= self.marks.len()
    }

    /// Offset into the original input, for progress checks.
    pub(crate) fn original_offset(&self) -> usize {
        self.marks[self.pos].0
    }

    pub(crate) fn trim_start(&mut self) {
        let skipped = self
            .original_rest()
            .chars()
            .take_while(|c| c.is_whitespace())
            .count();
        self.advance_chars(skipped);
    }

    /// Advance both views past `n` chars of the original.
    pub(crate) fn advance_chars(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.marks.len() - 1);
    }

    /// Advance both views past `len` bytes of the folded view.
    ///
    /// Returns `false` (and does not move) if that point falls inside the
    /// folding of a single original char.
    pub(crate) fn advance_folded_bytes(&mut self, len: usize) -> bool {
        let target = self.marks[self.pos].1 + len;
        match self.marks[self.pos..].binary_search_by_key(&target, |&(_, folded)| folded) {
            Ok(i) => {
                self.pos += i;
                true
            }
            Err(_) => false,
        }
    }

    /// Take the next run of non-whitespace chars from the original view.
    pub(crate) fn take_word(&mut self) -> Option<&'a str> {
        let (_, word) = next_word(self.original_rest()).ok()?;
        self.advance_chars(word.chars().count());
        Some(word)
    }
}

fn next_word(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}
