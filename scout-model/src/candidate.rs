use std::collections::HashSet;
use std::fmt;

/// Opaque key identifying a candidate within one candidate list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CandidateIdent(pub String);

impl CandidateIdent {
    pub fn new(ident: impl Into<String>) -> Self {
        Self(ident.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateIdent {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CandidateIdent {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A search hit scored locally by the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub ident: CandidateIdent,
    pub display_name: String,
    pub size_bytes: u64,
    /// Caller supplied relevance in `0.0..=1.0`.
    pub relevance_score: f64,
    pub positive_votes: u64,
}

impl Candidate {
    pub fn new(
        ident: impl Into<CandidateIdent>,
        display_name: impl Into<String>,
        size_bytes: u64,
        relevance_score: f64,
        positive_votes: u64,
    ) -> Self {
        Self {
            ident: ident.into(),
            display_name: display_name.into(),
            size_bytes,
            relevance_score,
            positive_votes,
        }
    }
}

/// Final ranking, best first.
///
/// Holds at most the `max` passed at construction and never the same
/// identity twice.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RankedResult(Vec<Candidate>);

impl RankedResult {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Take candidates in iteration order, skipping identities already taken,
    /// until `max` entries are collected.
    pub fn collect_unique<'a, I>(candidates: I, max: usize) -> Self
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        let mut seen: HashSet<&CandidateIdent> = HashSet::new();
        let mut ranked = Vec::with_capacity(max.min(16));

        for candidate in candidates {
            if ranked.len() >= max {
                break;
            }
            if seen.insert(&candidate.ident) {
                ranked.push(candidate.clone());
            }
        }

        Self(ranked)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.0.iter()
    }

    pub fn idents(&self) -> impl Iterator<Item = &CandidateIdent> {
        self.0.iter().map(|candidate| &candidate.ident)
    }

    pub fn into_inner(self) -> Vec<Candidate> {
        self.0
    }
}

impl IntoIterator for RankedResult {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
