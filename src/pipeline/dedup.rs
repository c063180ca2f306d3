// src/pipeline/dedup.rs

//! Candidate deduplication and filtering.

use std::collections::HashSet;

use crate::models::Candidate;

/// Merge-filter discovery candidates.
///
/// Order-preserving, first-seen wins. Drops candidates with empty or
/// repeated URLs and titles shorter than `min_title_len`; caps the
/// surviving list at 1.5x `max_sources` to bound downstream work.
pub fn filter_candidates(
    candidates: Vec<Candidate>,
    min_title_len: usize,
    max_sources: usize,
) -> Vec<Candidate> {
    let cap = max_sources + max_sources / 2;
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for candidate in candidates {
        if candidate.url.is_empty() || candidate.title.chars().count() < min_title_len {
            continue;
        }
        if !seen.insert(candidate.url.clone()) {
            continue;
        }
        unique.push(candidate);
        if unique.len() >= cap {
            break;
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileType;

    fn candidate(title: &str, url: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            author: "Penulis".to_string(),
            year: 2024,
            url: url.to_string(),
            file_type: FileType::Article,
            source_name: "Test".to_string(),
            citations: None,
        }
    }

    #[test]
    fn never_emits_duplicate_urls() {
        let candidates = vec![
            candidate("Pendidikan vokasi digital pertama", "https://a"),
            candidate("Pendidikan vokasi digital kedua", "https://a"),
            candidate("Pendidikan vokasi digital ketiga", "https://b"),
        ];
        let unique = filter_candidates(candidates, 10, 10);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].title, "Pendidikan vokasi digital pertama");

        let urls: HashSet<_> = unique.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls.len(), unique.len());
    }

    #[test]
    fn drops_short_titles_and_empty_urls() {
        let candidates = vec![
            candidate("pendek", "https://a"),
            candidate("Judul cukup panjang untuk lolos", ""),
            candidate("Judul cukup panjang untuk lolos", "https://b"),
        ];
        let unique = filter_candidates(candidates, 10, 10);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].url, "https://b");
    }

    #[test]
    fn caps_at_one_and_a_half_times_max() {
        let candidates: Vec<_> = (0..30)
            .map(|i| candidate("Judul panjang untuk kandidat uji", &format!("https://{i}")))
            .collect();
        let unique = filter_candidates(candidates, 10, 8);
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn preserves_first_seen_order() {
        let candidates = vec![
            candidate("Kandidat pertama dalam daftar", "https://1"),
            candidate("Kandidat kedua dalam daftar", "https://2"),
            candidate("Kandidat ketiga dalam daftar", "https://3"),
        ];
        let unique = filter_candidates(candidates, 10, 10);
        let urls: Vec<_> = unique.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["https://1", "https://2", "https://3"]);
    }
}
