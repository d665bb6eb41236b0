//! Language catalog — the ordered set of languages a session can select.
//!
//! The catalog is built once at startup from the engine's supported-language
//! enumeration ([`LanguageCatalog::from_engine`]), resolving every code to a
//! display name through the built-in locale table in [`names`]. It is
//! read-only afterwards and shared as `Arc<LanguageCatalog>`.
//!
//! Selection is always keyed by language code, never by list position.

pub mod names;

use crate::engine::TranslationEngineGateway;

pub use names::{display_name, LocaleName, LOCALE_NAMES};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// A selectable natural language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    /// BCP-47-like tag (e.g. `"en"`, `"ta"`).
    pub code: String,
    /// Human-readable name shown in selection menus.
    pub display_name: String,
}

impl Language {
    /// Build a [`Language`] whose display name comes from the locale table.
    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        let display_name = display_name(&code);
        Self { code, display_name }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.code)
    }
}

// ---------------------------------------------------------------------------
// LanguageCatalog
// ---------------------------------------------------------------------------

/// Ordered, code-unique list of [`Language`]s.
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    /// Build a catalog from engine language codes, preserving their order.
    ///
    /// Blank codes are skipped and duplicate codes keep their first
    /// occurrence, so `code` stays unique within the catalog.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut languages: Vec<Language> = Vec::new();

        for code in codes {
            let code = code.as_ref().trim();
            if code.is_empty() {
                continue;
            }
            if languages.iter().any(|l| l.code == code) {
                log::debug!("catalog: dropping duplicate language code {code:?}");
                continue;
            }
            languages.push(Language::from_code(code));
        }

        Self { languages }
    }

    /// Build the catalog from the engine's supported-language enumeration.
    ///
    /// An empty enumeration gives an empty catalog. If the engine cannot be
    /// asked at all, the built-in locale table is used instead.
    pub async fn from_engine(gateway: &dyn TranslationEngineGateway) -> Self {
        match gateway.supported_languages().await {
            Ok(codes) => {
                let catalog = Self::from_codes(codes);
                if catalog.is_empty() {
                    log::warn!("catalog: engine reported no supported languages");
                } else {
                    log::info!("catalog: {} languages available", catalog.len());
                }
                catalog
            }
            Err(e) => {
                log::warn!("catalog: language enumeration failed ({e}); using built-in list");
                Self::builtin()
            }
        }
    }

    /// Catalog of every language in the built-in locale table.
    pub fn builtin() -> Self {
        Self::from_codes(LOCALE_NAMES.iter().map(|l| l.code))
    }

    /// All languages, in enumeration order.
    pub fn list(&self) -> &[Language] {
        &self.languages
    }

    /// Look up a language by exact code.
    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    /// Returns `true` if `code` is in the catalog.
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
