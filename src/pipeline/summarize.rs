// src/pipeline/summarize.rs

//! Extractive summarization.
//!
//! Ranks sentences by domain-keyword density and assembles a 100-200 word
//! summary in the configured language.

use crate::models::Language;

/// Sentences considered from the head of the content.
const SENTENCE_POOL: usize = 20;

/// Sentences kept after scoring.
const SELECTED_SENTENCES: usize = 7;

/// Minimum sentence length worth scoring.
const MIN_SENTENCE_LEN: usize = 20;

const MAX_WORDS: usize = 200;
const MIN_WORDS: usize = 50;

/// Extractive summarizer over source content.
pub struct Summarizer {
    keywords: Vec<String>,
    language: Language,
}

impl Summarizer {
    pub fn new(keywords: Vec<String>, language: Language) -> Self {
        Self { keywords, language }
    }

    /// Generate a summary for content, using the title for context when
    /// the content yields too few words.
    pub fn summarize(&self, content: &str, title: &str) -> String {
        let sentences: Vec<&str> = content
            .split(['.', '!', '?'])
            .take(SENTENCE_POOL)
            .map(str::trim)
            .collect();

        let mut scored: Vec<(&str, f64)> = sentences
            .iter()
            .filter(|s| s.chars().count() >= MIN_SENTENCE_LEN)
            .filter_map(|s| {
                let score = self.sentence_score(s);
                (score > 0.0).then_some((*s, score))
            })
            .collect();

        // Stable sort keeps document order among equally scored sentences.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let selected: Vec<&str> = if scored.is_empty() {
            sentences.iter().take(3).copied().collect()
        } else {
            scored
                .iter()
                .take(SELECTED_SENTENCES)
                .map(|(s, _)| *s)
                .collect()
        };

        let mut summary = selected.join(". ");

        let word_count = summary.split_whitespace().count();
        if word_count > MAX_WORDS {
            summary = cap_words(&summary, MAX_WORDS);
        } else if word_count < MIN_WORDS {
            summary = format!("{}{}", self.context_intro(title), summary);
            if summary.split_whitespace().count() > MAX_WORDS {
                summary = cap_words(&summary, MAX_WORDS);
            }
        }

        summary
    }

    fn sentence_score(&self, sentence: &str) -> f64 {
        let lower = sentence.to_lowercase();
        let mut score = 0.0;

        for keyword in &self.keywords {
            if lower.contains(keyword.as_str()) {
                score += 1.0;
            }
        }
        if sentence.chars().any(|c| c.is_ascii_digit()) {
            score += 0.5;
        }
        if lower.contains("indonesia") {
            score += 1.0;
        }

        score
    }

    fn context_intro(&self, title: &str) -> String {
        match self.language {
            Language::Id => format!(
                "Dokumen '{title}' membahas aspek-aspek penting pendidikan vokasi dan \
                 teknologi digital di Indonesia. "
            ),
            Language::En => format!(
                "The document '{title}' discusses key aspects of vocational education \
                 and digital technology in Indonesia. "
            ),
        }
    }
}

fn cap_words(text: &str, max_words: usize) -> String {
    let capped: Vec<&str> = text.split_whitespace().take(max_words).collect();
    format!("{}...", capped.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarizer() -> Summarizer {
        Summarizer::new(
            vec![
                "vokasi".to_string(),
                "digital".to_string(),
                "pendidikan".to_string(),
                "smk".to_string(),
            ],
            Language::Id,
        )
    }

    #[test]
    fn prefers_keyword_dense_sentences() {
        let content = "Cuaca hari ini cerah dan menyenangkan sekali. \
                       Pendidikan vokasi digital di SMK Indonesia berkembang pesat sejak 2021. \
                       Harga bahan pokok relatif stabil bulan ini.";
        let summary = summarizer().summarize(content, "Laporan");
        assert!(summary.contains("Pendidikan vokasi digital"));
        assert!(!summary.contains("bahan pokok"));
    }

    #[test]
    fn short_summary_gets_context_intro() {
        let content = "Pendidikan vokasi digital penting untuk Indonesia.";
        let summary = summarizer().summarize(content, "Studi Vokasi");
        assert!(summary.starts_with("Dokumen 'Studi Vokasi'"));
    }

    #[test]
    fn english_intro_when_configured() {
        let summarizer = Summarizer::new(vec!["digital".to_string()], Language::En);
        let summary = summarizer.summarize("Digital skills training matters a lot.", "Study");
        assert!(summary.starts_with("The document 'Study'"));
    }

    #[test]
    fn long_summary_is_word_capped() {
        let sentence = format!(
            "Pendidikan vokasi digital Indonesia {} sangat penting",
            "kata ".repeat(40)
        );
        let content: String = (0..10)
            .map(|i| format!("{sentence} nomor {i}. "))
            .collect();
        let summary = summarizer().summarize(&content, "Laporan");
        assert!(summary.split_whitespace().count() <= MAX_WORDS + 1);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn falls_back_to_leading_sentences() {
        let content = "Kalimat pertama tanpa kata kunci yang cocok sama sekali. \
                       Kalimat kedua juga netral dan panjang secukupnya.";
        let summary = summarizer().summarize(content, "Netral");
        assert!(summary.contains("Kalimat pertama"));
    }
}
