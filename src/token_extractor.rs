/*!
 * Vocabulary lookup and token extraction.
 *
 * Caption text is normalized into discrete sign vocabulary tokens through a
 * read-only word-to-symbol dictionary. The dictionary is injected at
 * construction and never mutated during a request.
 */

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Serialize;

use crate::caption_processor::{CaptionRecord, TimeInterval};

/// A time-aligned run of sign vocabulary tokens derived from one caption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignTokenSegment {
    /// When the tokens should be rendered
    #[serde(flatten)]
    pub interval: TimeInterval,
    /// Vocabulary symbols in original word order, duplicates preserved
    pub tokens: Vec<String>,
}

/// Read-only mapping from lowercase words to sign vocabulary symbols.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: HashMap<String, String>,
}

impl Vocabulary {
    /// Build a vocabulary from word/symbol pairs. Keys are lowercased so
    /// lookups are case-insensitive.
    pub fn new(entries: HashMap<String, String>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(word, symbol)| (word.to_lowercase(), symbol))
            .collect();
        Vocabulary { entries }
    }

    /// Load a vocabulary from a JSON object file of word -> symbol.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))?;

        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse vocabulary file: {}", path.display()))?;

        if entries.is_empty() {
            warn!("Vocabulary file {} contains no entries", path.display());
        }

        Ok(Self::new(entries))
    }

    /// The built-in default vocabulary, used when no external dictionary
    /// file is configured.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_VOCABULARY
                .iter()
                .map(|(word, symbol)| (word.to_string(), symbol.to_string()))
                .collect(),
        )
    }

    /// Look up the symbol for a word, case-insensitively.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vocabulary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extract vocabulary tokens from caption text.
    ///
    /// Only literal `.` and `,` are stripped before splitting on
    /// whitespace; every other character participates in word matching.
    /// Unmapped words are dropped silently, order and duplicates of mapped
    /// words are preserved.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let cleaned = text.replace(['.', ','], "");
        cleaned
            .split_whitespace()
            .filter_map(|word| self.lookup(word))
            .map(str::to_string)
            .collect()
    }
}

/// Derive token segments from caption records.
///
/// A record whose extraction yields no tokens produces no segment.
pub fn segments_from_records(
    records: &[CaptionRecord],
    vocabulary: &Vocabulary,
) -> Vec<SignTokenSegment> {
    records
        .iter()
        .filter_map(|record| {
            let tokens = vocabulary.extract(&record.text);
            if tokens.is_empty() {
                debug!(
                    "Caption at {:.3}s produced no tokens, dropping",
                    record.interval.start
                );
                None
            } else {
                Some(SignTokenSegment {
                    interval: record.interval,
                    tokens,
                })
            }
        })
        .collect()
}

// Default word-to-sign table shipped with the application.
const BUILTIN_VOCABULARY: &[(&str, &str)] = &[
    ("hello", "HELLO"),
    ("hi", "HELLO"),
    ("world", "WORLD"),
    ("how", "HOW"),
    ("are", "YOU"),
    ("you", "YOU"),
    ("doing", "DO"),
    ("do", "DO"),
    ("i", "I"),
    ("am", "AM"),
    ("fine", "FINE"),
    ("good", "GOOD"),
    ("thank", "THANK"),
    ("thanks", "THANK"),
    ("yes", "YES"),
    ("no", "NO"),
    ("please", "PLEASE"),
    ("sorry", "SORRY"),
    ("bad", "BAD"),
    ("nice", "GOOD"),
    ("great", "GOOD"),
    ("awesome", "GOOD"),
    ("again", "AGAIN"),
    ("air", "AIR"),
    ("all", "ALL"),
    ("animal", "ANIMAL"),
    ("at", "AT"),
    ("because", "BECAUSE"),
    ("bottom", "BOTTOM"),
    ("die", "DIE"),
    ("died", "DIE"),
    ("down", "DOWN"),
    ("fire", "FIRE"),
    ("for", "FOR"),
    ("from", "FROM"),
    ("gas", "GAS"),
    ("get", "GET"),
    ("got", "GET"),
    ("happen", "HAPPEN"),
    ("happened", "HAPPEN"),
    ("human", "HUMAN"),
    ("in", "IN"),
    ("is", "IS"),
    ("it", "IT"),
    ("kill", "KILL"),
    ("killed", "KILL"),
    ("lake", "LAKE"),
    ("live", "LIVE"),
    ("lived", "LIVE"),
    ("make", "MAKE"),
    ("minute", "MINUTE"),
    ("near", "NEAR"),
    ("never", "NEVER"),
    ("night", "NIGHT"),
    ("old", "OLD"),
    ("on", "ON"),
    ("one", "ONE"),
    ("people", "PEOPLE"),
    ("sat", "SIT"),
    ("see", "SEE"),
    ("sit", "SIT"),
    ("sleep", "SLEEP"),
    ("story", "STORY"),
    ("sure", "SURE"),
    ("that", "THAT"),
    ("their", "THEIR"),
    ("them", "THEM"),
    ("they", "THEY"),
    ("this", "THIS"),
    ("today", "TODAY"),
    ("tomorrow", "TOMORROW"),
    ("top", "TOP"),
    ("under", "UNDER"),
    ("village", "VILLAGE"),
    ("volcano", "VOLCANO"),
    ("was", "IS"),
    ("what", "WHAT"),
    ("why", "WHY"),
    ("with", "WITH"),
    ("without", "WITHOUT"),
    ("travel", "TRAVEL"),
    ("video", "VIDEO"),
    ("home", "HOME"),
    ("drone", "DRONE"),
    ("camera", "CAMERA"),
    ("book", "BOOK"),
    ("page", "PAGE"),
    ("day", "DAY"),
    ("fun", "FUN"),
    ("idea", "IDEA"),
    ("love", "LOVE"),
];
