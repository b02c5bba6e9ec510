//! Ranked autocomplete over employee names.
//!
//! Names that start with the query come first, then names that end with it,
//! then names that merely contain it. Order inside each class is the input
//! order, and the list is cut at [`MAX_SUGGESTIONS`].

use crate::directory::Candidate;

pub const MAX_SUGGESTIONS: usize = 10;

/// Match class, ordered from strongest to weakest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchRank {
    Prefix,
    Suffix,
    Substring,
}

/// Classifies an already lowercased name against an already lowercased query.
pub fn rank(name: &str, query: &str) -> Option<MatchRank> {
    if name.starts_with(query) {
        Some(MatchRank::Prefix)
    } else if name.ends_with(query) {
        Some(MatchRank::Suffix)
    } else if name.contains(query) {
        Some(MatchRank::Substring)
    } else {
        None
    }
}

pub fn suggest<'a>(query: &str, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
    suggest_with_limit(query, candidates, MAX_SUGGESTIONS)
}

pub fn suggest_with_limit<'a>(
    query: &str,
    candidates: &'a [Candidate],
    limit: usize,
) -> Vec<&'a Candidate> {
    let query = query.trim().to_lowercase();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(MatchRank, &Candidate)> = candidates
        .iter()
        .filter_map(|candidate| {
            rank(&candidate.name.to_lowercase(), &query).map(|rank| (rank, candidate))
        })
        .collect();

    // stable: input order survives within a rank
    ranked.sort_by_key(|(rank, _)| *rank);

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate)
        .collect()
}
