//! Parsing of the oracle's free-text selection.
//!
//! The reply is expected to be a comma separated list of 1-based positions.
//! Anything else is tolerated: tokens that are not numbers or point outside
//! the candidate list are dropped, and the reply as a whole is classified so
//! fusion can tell "nothing is relevant" apart from "the reply is garbage".

/// Reply the oracle uses to say that no candidate is relevant.
pub const NO_RELEVANT_SENTINEL: &str = "NO_RELEVANT_ITEMS";

const TOKEN_DELIMITER: char = ',';

/// Classified oracle reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Empty reply or the [`NO_RELEVANT_SENTINEL`]; a deliberate answer.
    NoneRelevant,
    /// Non-empty reply in which no token named a valid candidate.
    Unusable,
    /// 0-based candidate indices in the oracle's order of preference,
    /// without repeats.
    Picked(Vec<usize>),
}

impl Selection {
    /// Selected indices; empty for both non-picking variants.
    pub fn indices(&self) -> &[usize] {
        match self {
            Selection::Picked(indices) => indices,
            Selection::NoneRelevant | Selection::Unusable => &[],
        }
    }
}

/// Turn `reply` into candidate indices valid for a list of
/// `candidate_count` entries.
pub fn parse_selection(reply: &str, candidate_count: usize) -> Selection {
    let reply = reply.trim();
    if reply.is_empty() || reply.eq_ignore_ascii_case(NO_RELEVANT_SENTINEL) {
        return Selection::NoneRelevant;
    }

    let mut picked: Vec<usize> = Vec::new();
    for token in reply.split(TOKEN_DELIMITER) {
        let Some(position) = leading_integer(token.trim()) else {
            continue;
        };
        let Some(index) = position
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
        else {
            continue;
        };
        if index < candidate_count && !picked.contains(&index) {
            picked.push(index);
        }
    }

    if picked.is_empty() {
        Selection::Unusable
    } else {
        Selection::Picked(picked)
    }
}

/// Integer made of the token's leading sign and digits, ignoring whatever
/// follows (`"3."` reads as 3, `"7)"` as 7, `"x1"` as nothing).
fn leading_integer(token: &str) -> Option<i64> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let sign_len = token.len() - unsigned.len();
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    token[..sign_len + digits].parse().ok()
}
