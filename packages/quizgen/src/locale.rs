//! Source-text locale detection.
//!
//! The prompt catalogue is keyed by locale, so generation starts by
//! guessing the language of the source text. Detection never fails:
//! anything outside the supported set falls back to English.

use serde::{Deserialize, Serialize};

/// Languages the prompt catalogue has content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Hu,
}

impl Locale {
    /// Locale used when detection is inconclusive or unsupported.
    pub const FALLBACK: Locale = Locale::En;

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hu => "hu",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guess the locale of `text`.
///
/// Takes the detector's single best guess and keeps it only when it is
/// a supported locale; everything else maps to [`Locale::FALLBACK`].
pub fn detect(text: &str) -> Locale {
    match whatlang::detect_lang(text) {
        Some(whatlang::Lang::Eng) => Locale::En,
        Some(whatlang::Lang::Hun) => Locale::Hu,
        _ => Locale::FALLBACK,
    }
}
