//! Dependency instances and the builder that assembles them from token rows
//!
//! An instance stores one sentence as parallel columns indexed `0..=N`.
//! Index 0 is a synthetic root token, so a CoNLL-U HEAD value can be used
//! as an index directly: `HEAD=0` points at the root, `HEAD=k` at token `k`.

use crate::block::Row;
use crate::error::{ReadError, Result};
use crate::options::ReaderOptions;
use atoi::FromRadix10Checked;
use log::{trace, warn};
use rustc_hash::FxHashSet;

pub const ROOT_FORM: &str = "<root>";
pub const ROOT_LEMMA: &str = "<root-LEMMA>";
pub const ROOT_POS: &str = "<root-POS>";
pub const ROOT_DEPREL: &str = "<no-type>";
pub const ROOT_HEAD: i32 = -1;

/// Literal marking an absent LEMMA, FEATS or HEAD
pub const PLACEHOLDER: &str = "_";

// CoNLL-U column positions
const ID: usize = 0;
const FORM: usize = 1;
const LEMMA: usize = 2;
const UPOS: usize = 3;
const FEATS: usize = 5;
const HEAD: usize = 6;
const DEPREL: usize = 7;

/// Morphological features of one token
pub type FeatureSet = FxHashSet<String>;

/// One sentence with per-token annotations and a head-index tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyInstance {
    forms: Vec<String>,
    lemmas: Option<Vec<Option<String>>>,
    coarse_pos: Vec<String>,
    fine_pos: Vec<String>,
    features: Vec<Option<FeatureSet>>,
    heads: Vec<i32>,
    deprels: Vec<String>,
}

/// Borrowed view of a single position in an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub form: &'a str,
    pub lemma: Option<&'a str>,
    pub coarse_pos: &'a str,
    pub fine_pos: &'a str,
    pub features: Option<&'a FeatureSet>,
    pub head: i32,
    pub deprel: &'a str,
}

impl DependencyInstance {
    /// Number of real tokens (the root is not counted)
    pub fn len(&self) -> usize {
        self.forms.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn forms(&self) -> &[String] {
        &self.forms
    }

    /// Lemma column, absent when no token in the sentence had a lemma
    pub fn lemmas(&self) -> Option<&[Option<String>]> {
        self.lemmas.as_deref()
    }

    pub fn coarse_pos(&self) -> &[String] {
        &self.coarse_pos
    }

    pub fn fine_pos(&self) -> &[String] {
        &self.fine_pos
    }

    pub fn features(&self) -> &[Option<FeatureSet>] {
        &self.features
    }

    pub fn heads(&self) -> &[i32] {
        &self.heads
    }

    pub fn deprels(&self) -> &[String] {
        &self.deprels
    }

    /// View of position `idx` (0 is the root)
    pub fn token(&self, idx: usize) -> Option<Token<'_>> {
        if idx >= self.forms.len() {
            return None;
        }
        Some(Token {
            form: &self.forms[idx],
            lemma: self
                .lemmas
                .as_ref()
                .and_then(|lemmas| lemmas[idx].as_deref()),
            coarse_pos: &self.coarse_pos[idx],
            fine_pos: &self.fine_pos[idx],
            features: self.features[idx].as_ref(),
            head: self.heads[idx],
            deprel: &self.deprels[idx],
        })
    }

    /// Real tokens in sentence order, paired with their index
    pub fn tokens(&self) -> impl Iterator<Item = (usize, Token<'_>)> + '_ {
        (1..self.forms.len()).filter_map(move |idx| self.token(idx).map(|tok| (idx, tok)))
    }

    /// Indices of the tokens governed by `idx`
    pub fn dependents(&self, idx: usize) -> Vec<usize> {
        self.heads
            .iter()
            .enumerate()
            .skip(1)
            .filter(|&(_, &head)| usize::try_from(head).is_ok_and(|h| h == idx))
            .map(|(dep, _)| dep)
            .collect()
    }
}

/// Build an instance from one sentence block
///
/// Returns `Ok(None)` for an empty block, which callers treat as
/// end-of-stream.
pub fn build_instance(rows: &[Row], options: ReaderOptions) -> Result<Option<DependencyInstance>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let size = rows.len() + 1;
    let mut forms = Vec::with_capacity(size);
    let mut lemmas = Vec::with_capacity(size);
    let mut pos = Vec::with_capacity(size);
    let mut features: Vec<Option<FeatureSet>> = Vec::with_capacity(size);
    let mut heads = Vec::with_capacity(size);
    let mut deprels = Vec::with_capacity(size);

    forms.push(ROOT_FORM.to_string());
    lemmas.push(Some(ROOT_LEMMA.to_string()));
    pos.push(ROOT_POS.to_string());
    features.push(None);
    heads.push(ROOT_HEAD);
    deprels.push(ROOT_DEPREL.to_string());

    let mut has_lemma = false;

    for (idx, row) in rows.iter().enumerate().map(|(i, row)| (i + 1, row)) {
        if row.fields.len() <= DEPREL {
            return Err(ReadError::format(
                row.line,
                &row.fields.join("\t"),
                format!("Expected at least {} fields, found {}", DEPREL + 1, row.fields.len()),
            ));
        }

        // Field 1: FORM
        forms.push(row.field(FORM).to_string());

        // Field 2: LEMMA
        let lemma = row.field(LEMMA);
        if lemma == PLACEHOLDER {
            lemmas.push(None);
        } else {
            lemmas.push(Some(lemma.to_string()));
            has_lemma = true;
        }

        // Field 3: UPOS (Field 4, XPOS, is not read)
        pos.push(row.field(UPOS).to_string());

        // Field 5: FEATS
        let feats = row.field(FEATS);
        features.push(
            (feats != PLACEHOLDER).then(|| feats.split('|').map(str::to_string).collect()),
        );

        // Field 6: HEAD
        heads.push(parse_head(row, idx, rows.len(), options)?);

        // Field 7: DEPREL
        deprels.push(row.field(DEPREL).to_string());
    }

    trace!(
        "Built instance of {} tokens ending at line {}",
        rows.len(),
        rows[rows.len() - 1].line
    );

    Ok(Some(DependencyInstance {
        forms,
        lemmas: has_lemma.then_some(lemmas),
        // Coarse and fine POS both come from UPOS
        coarse_pos: pos.clone(),
        fine_pos: pos,
        features,
        heads,
        deprels,
    }))
}

/// Parse the HEAD column of token `idx` in a sentence of `len` tokens
fn parse_head(row: &Row, idx: usize, len: usize, options: ReaderOptions) -> Result<i32> {
    let value = row.field(HEAD);

    if value == PLACEHOLDER {
        warn!(
            "Missing HEAD at line {}: {} {} {} {}",
            row.line,
            row.field(ID),
            row.field(FORM),
            row.field(LEMMA),
            row.field(UPOS)
        );
        return Err(ReadError::MalformedHead {
            line: row.line,
            id: row.field(ID).to_string(),
            form: row.field(FORM).to_string(),
            lemma: row.field(LEMMA).to_string(),
            upos: row.field(UPOS).to_string(),
        });
    }

    let invalid = || ReadError::InvalidHead {
        line: row.line,
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let head = match usize::from_radix_10_checked(bytes) {
        (Some(head), used) if used > 0 && used == bytes.len() => head,
        _ => return Err(invalid()),
    };

    if options.check_heads && (head > len || head == idx) {
        return Err(ReadError::HeadOutOfRange {
            line: row.line,
            head,
            len,
        });
    }

    i32::try_from(head).map_err(|_| invalid())
}
