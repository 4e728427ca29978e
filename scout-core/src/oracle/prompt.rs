use std::fmt::Write;

use scout_config::constants::MAX_FUSION_RESULTS;
use scout_model::Candidate;

use crate::selection::NO_RELEVANT_SENTINEL;
use crate::size::human_size;

/// Number of candidates the oracle is asked to pick.
pub const REQUESTED_PICKS: usize = MAX_FUSION_RESULTS;

/// Build the single user message sent to the oracle.
pub fn render_prompt(candidates: &[Candidate], query: &str) -> String {
    let mut prompt = format!(
        "Original search query: \"{query}\"\n\n\
         Based on this query, please select the top {REQUESTED_PICKS} most relevant files from the following list. \
         Provide your answer as a comma-separated list of numbers corresponding to the items in the list \
         (e.g., \"1, 3, 5, 2, 4, 6, 8, 7, 9, 10\"). \
         If there are fewer than {REQUESTED_PICKS} relevant items, list all relevant ones. \
         If no items seem relevant, return an empty list or a \"{NO_RELEVANT_SENTINEL}\" message.\n\n\
         Candidate files:\n"
    );

    for (position, candidate) in candidates.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "{}. {} (Size: {}, Score: {:.2}, Votes: {})",
            position + 1,
            candidate.display_name,
            human_size(candidate.size_bytes),
            candidate.relevance_score,
            candidate.positive_votes,
        );
    }

    prompt.push_str("\nYour selection (comma-separated numbers):");
    prompt
}
