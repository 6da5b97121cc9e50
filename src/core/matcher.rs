//! Cross-library matching stage.
//!
//! Pure stage: buckets movie folders from any number of library roots by
//! matching key. Buckets of a single member are discarded; everything else
//! becomes a duplicate group with its best member marked.

use crate::core::selector;
use crate::core::title::{self, MatchKey, MatchMode};
use crate::models::media::{DuplicateGroup, FolderCandidate, MovieFolder};
use std::collections::HashMap;

/// Bucket folders by key and build duplicate groups.
///
/// A group may contain multiple members from the same root as well as from
/// different roots. Groups come back sorted by key, members sorted by path.
pub fn match_folders(folders: Vec<MovieFolder>, mode: MatchMode) -> Vec<DuplicateGroup> {
    let buckets = match mode {
        MatchMode::Exact => bucket_exact(folders),
        MatchMode::Fuzzy => bucket_fuzzy(folders),
    };

    let mut groups: Vec<DuplicateGroup> = buckets
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(key, members)| build_group(key, members))
        .collect();
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    groups
}

fn bucket_exact(folders: Vec<MovieFolder>) -> Vec<(String, Vec<MovieFolder>)> {
    let mut buckets: HashMap<String, Vec<MovieFolder>> = HashMap::new();
    for folder in folders {
        let key = title::exact_key(&folder.name);
        buckets.entry(key).or_default().push(folder);
    }
    buckets.into_iter().collect()
}

/// Bucket by canonical title, then resolve years within each title bucket.
///
/// A folder whose name carries no year token still matches a dated variant
/// of the same title when the bucket holds exactly one distinct year
/// ("Matrix 2160p 4K" joins "Matrix (1999) 1080p BluRay"). When a title
/// bucket spans several distinct years, such as remakes, year-less folders
/// cannot be attributed to either and form their own bucket.
fn bucket_fuzzy(folders: Vec<MovieFolder>) -> Vec<(String, Vec<MovieFolder>)> {
    let mut by_title: HashMap<String, Vec<(MatchKey, MovieFolder)>> = HashMap::new();
    for folder in folders {
        let key = title::canonical_key(&folder.name);
        if key.title.is_empty() {
            // All-noise names ("1080p", "4K HEVC") carry no identity to
            // match on; they must never pool into one bucket.
            continue;
        }
        by_title
            .entry(key.title.clone())
            .or_default()
            .push((key, folder));
    }

    let mut buckets: Vec<(String, Vec<MovieFolder>)> = Vec::new();

    for (_, entries) in by_title {
        let mut distinct_years: Vec<u16> = entries
            .iter()
            .filter_map(|(key, _)| key.year)
            .collect();
        distinct_years.sort_unstable();
        distinct_years.dedup();

        if distinct_years.len() <= 1 {
            let year = distinct_years.first().copied();
            let key = MatchKey {
                title: entries[0].0.title.clone(),
                year,
            };
            buckets.push((
                key.to_string(),
                entries.into_iter().map(|(_, folder)| folder).collect(),
            ));
        } else {
            let mut by_year: HashMap<Option<u16>, Vec<MovieFolder>> = HashMap::new();
            let mut titles: HashMap<Option<u16>, String> = HashMap::new();
            for (key, folder) in entries {
                titles.entry(key.year).or_insert_with(|| key.title.clone());
                by_year.entry(key.year).or_default().push(folder);
            }
            for (year, members) in by_year {
                let key = MatchKey {
                    title: titles.remove(&year).unwrap_or_default(),
                    year,
                };
                buckets.push((key.to_string(), members));
            }
        }
    }

    buckets
}

fn build_group(key: String, members: Vec<MovieFolder>) -> DuplicateGroup {
    let mut members: Vec<FolderCandidate> = members
        .into_iter()
        .map(|folder| FolderCandidate {
            folder,
            recommended: false,
        })
        .collect();
    members.sort_by(|a, b| a.folder.path.cmp(&b.folder.path));

    if let Some(best) = selector::select_best(&members) {
        members[best].recommended = true;
    }

    DuplicateGroup { key, members }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quality;
    use std::path::PathBuf;

    const MB: u64 = 1024 * 1024;

    fn folder(root: &str, name: &str, size: u64) -> MovieFolder {
        let path = PathBuf::from(root).join(name);
        MovieFolder {
            path,
            name: name.to_string(),
            library_root: PathBuf::from(root),
            files: Vec::new(),
            total_size: size,
            score: quality::score(name, size),
        }
    }

    #[test]
    fn test_fuzzy_unifies_quality_variants() {
        let folders = vec![
            folder("/a", "Matrix (1999) 1080p BluRay", 800 * MB),
            folder("/a", "Matrix (1999) 720p", 300 * MB),
            folder("/b", "Matrix 2160p 4K", 2000 * MB),
        ];
        let groups = match_folders(folders, MatchMode::Fuzzy);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "matrix (1999)");
        assert_eq!(groups[0].members.len(), 3);
        // Exactly one member carries the recommendation marker
        assert_eq!(
            groups[0].members.iter().filter(|m| m.recommended).count(),
            1
        );
    }

    #[test]
    fn test_exact_mode_under_matches() {
        let folders = vec![
            folder("/a", "Matrix (1999) 1080p BluRay", 800 * MB),
            folder("/a", "Matrix (1999) 720p", 300 * MB),
            folder("/b", "Matrix 2160p 4K", 2000 * MB),
        ];
        let groups = match_folders(folders, MatchMode::Exact);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_exact_mode_matches_literal_names() {
        let folders = vec![
            folder("/a", "The Matrix", 800 * MB),
            folder("/b", "the  MATRIX", 300 * MB),
        ];
        let groups = match_folders(folders, MatchMode::Exact);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "the matrix");
    }

    #[test]
    fn test_same_root_members_allowed() {
        let folders = vec![
            folder("/a", "Inception (2010) 1080p", 800 * MB),
            folder("/a", "Inception.2010.720p.WEBRip", 300 * MB),
        ];
        let groups = match_folders(folders, MatchMode::Fuzzy);
        assert_eq!(groups.len(), 1);
        assert!(groups[0]
            .members
            .iter()
            .all(|m| m.folder.library_root == PathBuf::from("/a")));
    }

    #[test]
    fn test_distinct_years_split_into_separate_groups() {
        let folders = vec![
            folder("/a", "Psycho (1960) 1080p", 800 * MB),
            folder("/b", "Psycho (1960) 720p", 300 * MB),
            folder("/a", "Psycho (1998) 1080p", 700 * MB),
            folder("/b", "Psycho (1998) 720p", 200 * MB),
        ];
        let groups = match_folders(folders, MatchMode::Fuzzy);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "psycho (1960)");
        assert_eq!(groups[1].key, "psycho (1998)");
    }

    #[test]
    fn test_yearless_folder_not_attributed_among_remakes() {
        let folders = vec![
            folder("/a", "Psycho (1960) 1080p", 800 * MB),
            folder("/a", "Psycho (1998) 1080p", 700 * MB),
            folder("/b", "Psycho 720p", 200 * MB),
        ];
        let groups = match_folders(folders, MatchMode::Fuzzy);
        // Each bucket holds one member, so nothing groups
        assert!(groups.is_empty());
    }

    #[test]
    fn test_noise_only_names_never_fuzzy_group() {
        let folders = vec![
            folder("/a", "1080p", 800 * MB),
            folder("/b", "720p", 300 * MB),
            folder("/b", "4K HEVC", 2000 * MB),
        ];
        let groups = match_folders(folders, MatchMode::Fuzzy);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_singleton_buckets_discarded() {
        let folders = vec![
            folder("/a", "Alien (1979) 1080p", 800 * MB),
            folder("/b", "Blade Runner (1982) 1080p", 700 * MB),
        ];
        let groups = match_folders(folders, MatchMode::Fuzzy);
        assert!(groups.is_empty());
    }
}
