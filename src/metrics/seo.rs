//! On-page SEO score (0-100).
//!
//! Six independently bounded factors are summed and clamped:
//!
//! | Factor | Points |
//! |---|---|
//! | Length fit against the target word count | 5-25 |
//! | Keyword density (first five keywords) | 0-30 |
//! | Primary keyword near the start | 0-15 |
//! | Structure: line breaks, headings, emphasis | 0-10 |
//! | Mean paragraph length | 0-10 |
//! | Call to action / closing | 0-10 |

use serde::{Deserialize, Serialize};
use tracing::info;

/// Keywords past this index are ignored for density.
const MAX_SCORED_KEYWORDS: usize = 5;

/// Action and conclusion words; any occurrence earns full credit.
const CTA_WORDS: &[&str] = &[
    "descubre",
    "aprende",
    "comienza",
    "únete",
    "prueba",
    "conclusión",
    "resumen",
    "en conclusión",
    "para finalizar",
    "empieza",
    "visita",
    "contacta",
];

/// Closing words; only checked in the tail of the text.
const CLOSING_WORDS: &[&str] = &["fin", "final", "concluir"];

const CLOSING_WINDOW_CHARS: usize = 500;

/// Per-factor points behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeoBreakdown {
    pub word_count: usize,
    pub length: f64,
    pub keyword_density: f64,
    pub keyword_placement: f64,
    pub structure: f64,
    pub paragraph_balance: f64,
    pub call_to_action: f64,
}

impl SeoBreakdown {
    #[must_use]
    pub fn total(&self) -> f64 {
        (self.length
            + self.keyword_density
            + self.keyword_placement
            + self.structure
            + self.paragraph_balance
            + self.call_to_action)
            .clamp(0.0, 100.0)
    }
}

/// Score `content` against `keywords` and a target word count.
///
/// Every factor is a bounded constant, so scoring has no failure mode and
/// needs no fallback value.
pub fn calculate_seo_score<S: AsRef<str>>(
    content: &str,
    keywords: &[S],
    target_length: usize,
) -> f64 {
    let breakdown = seo_breakdown(content, keywords, target_length);
    let score = breakdown.total();
    info!(
        score,
        words = breakdown.word_count,
        keywords = keywords.len(),
        "SEO score calculated"
    );
    score
}

/// Compute every factor separately.
#[must_use]
pub fn seo_breakdown<S: AsRef<str>>(
    content: &str,
    keywords: &[S],
    target_length: usize,
) -> SeoBreakdown {
    let content_lower = content.to_lowercase();
    let word_count = content.split_whitespace().count();
    let keywords: Vec<String> = keywords
        .iter()
        .map(|kw| kw.as_ref().to_lowercase())
        .collect();

    SeoBreakdown {
        word_count,
        length: length_points(word_count, target_length),
        keyword_density: density_points(&content_lower, &keywords, word_count),
        keyword_placement: placement_points(&content_lower, &keywords),
        structure: structure_points(content),
        paragraph_balance: paragraph_points(content),
        call_to_action: cta_points(&content_lower),
    }
}

#[allow(clippy::cast_precision_loss)]
fn length_points(word_count: usize, target_length: usize) -> f64 {
    let words = word_count as f64;
    let target = target_length as f64;
    if (target * 0.8..=target * 1.2).contains(&words) {
        25.0
    } else if (target * 0.6..=target * 1.4).contains(&words) {
        20.0
    } else if word_count >= 300 {
        15.0
    } else {
        5.0
    }
}

fn density_points(content_lower: &str, keywords: &[String], word_count: usize) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    // One mention every 200 words, never fewer than two.
    let ideal_count = (word_count / 200).max(2);
    let mut points = 0usize;

    for (idx, keyword) in keywords.iter().take(MAX_SCORED_KEYWORDS).enumerate() {
        let occurrences = content_lower.matches(keyword.as_str()).count();
        if idx == 0 {
            points += if occurrences >= ideal_count {
                15
            } else if occurrences >= ideal_count / 2 {
                10
            } else {
                5
            };
        } else if occurrences >= 1 {
            points += occurrences.saturating_mul(3).min(15);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let capped = points.min(30) as f64;
    capped
}

fn placement_points(content_lower: &str, keywords: &[String]) -> f64 {
    let Some(primary) = keywords.first() else {
        return 0.0;
    };
    if prefix_chars(content_lower, 200).contains(primary.as_str()) {
        15.0
    } else if prefix_chars(content_lower, 400).contains(primary.as_str()) {
        10.0
    } else {
        5.0
    }
}

fn structure_points(content: &str) -> f64 {
    let mut points = 0.0;
    if content.contains('\n') {
        points += 3.0;
    }
    if content.contains("##") {
        points += 4.0;
    }
    if content.contains('*') {
        points += 3.0;
    }
    points
}

fn paragraph_points(content: &str) -> f64 {
    let lengths: Vec<usize> = content
        .split("\n\n")
        .filter(|p| !p.trim().is_empty() && !p.starts_with('#'))
        .map(|p| p.split_whitespace().count())
        .collect();
    if lengths.is_empty() {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    if (50.0..=150.0).contains(&mean) {
        10.0
    } else if (30.0..=200.0).contains(&mean) {
        7.0
    } else {
        3.0
    }
}

fn cta_points(content_lower: &str) -> f64 {
    if CTA_WORDS.iter().any(|word| content_lower.contains(word)) {
        return 10.0;
    }
    let tail = suffix_chars(content_lower, CLOSING_WINDOW_CHARS);
    if CLOSING_WORDS.iter().any(|word| tail.contains(word)) {
        5.0
    } else {
        0.0
    }
}

/// First `n` characters of `s`.
fn prefix_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(idx, _)| &s[..idx])
}

/// Last `n` characters of `s`.
fn suffix_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    s.char_indices().rev().nth(n - 1).map_or(s, |(idx, _)| &s[idx..])
}
