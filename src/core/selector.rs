//! Recommendation selection.
//!
//! Picks the best member of a duplicate group: strictly highest quality
//! score, with an alphabetical (case-insensitive) tie-break on the display
//! name so the choice is reproducible regardless of traversal order.

use crate::models::media::{FileCandidate, FolderCandidate};

/// Anything the selector can rank: a scored file or folder.
pub trait Candidate {
    fn display_name(&self) -> &str;
    fn total_score(&self) -> f64;
}

impl Candidate for FileCandidate {
    fn display_name(&self) -> &str {
        &self.file.filename
    }

    fn total_score(&self) -> f64 {
        self.score.total
    }
}

impl Candidate for FolderCandidate {
    fn display_name(&self) -> &str {
        &self.folder.name
    }

    fn total_score(&self) -> f64 {
        self.folder.score.total
    }
}

/// Select the index of the best member of a group.
///
/// Returns `None` for groups with fewer than 2 members: with nothing to
/// compare against, no recommendation is made.
pub fn select_best<C: Candidate>(members: &[C]) -> Option<usize> {
    if members.len() < 2 {
        return None;
    }

    let mut best = 0;
    for (idx, member) in members.iter().enumerate().skip(1) {
        let score = member.total_score();
        let best_score = members[best].total_score();
        if score > best_score {
            best = idx;
        } else if score == best_score {
            let name = member.display_name().to_lowercase();
            let best_name = members[best].display_name().to_lowercase();
            if name < best_name {
                best = idx;
            }
        }
    }
    Some(best)
}
