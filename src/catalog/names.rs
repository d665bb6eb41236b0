//! Built-in locale table: language code → English display name.
//!
//! Covers every language the on-device engine family ships models for.
//! [`display_name`] resolves BCP-47-like tags by their primary subtag, so
//! `"pt-BR"` and `"PT"` both resolve through the `"pt"` entry.

// ---------------------------------------------------------------------------
// LocaleName
// ---------------------------------------------------------------------------

/// One entry of the locale table.
#[derive(Debug)]
pub struct LocaleName {
    /// Primary language subtag, lowercase (e.g. `"ta"`).
    pub code: &'static str,
    /// English display name (e.g. `"Tamil"`).
    pub name: &'static str,
}

/// All languages with a known display name, in code order.
pub const LOCALE_NAMES: &[LocaleName] = &[
    LocaleName { code: "af", name: "Afrikaans" },
    LocaleName { code: "ar", name: "Arabic" },
    LocaleName { code: "be", name: "Belarusian" },
    LocaleName { code: "bg", name: "Bulgarian" },
    LocaleName { code: "bn", name: "Bengali" },
    LocaleName { code: "ca", name: "Catalan" },
    LocaleName { code: "cs", name: "Czech" },
    LocaleName { code: "cy", name: "Welsh" },
    LocaleName { code: "da", name: "Danish" },
    LocaleName { code: "de", name: "German" },
    LocaleName { code: "el", name: "Greek" },
    LocaleName { code: "en", name: "English" },
    LocaleName { code: "eo", name: "Esperanto" },
    LocaleName { code: "es", name: "Spanish" },
    LocaleName { code: "et", name: "Estonian" },
    LocaleName { code: "fa", name: "Persian" },
    LocaleName { code: "fi", name: "Finnish" },
    LocaleName { code: "fr", name: "French" },
    LocaleName { code: "ga", name: "Irish" },
    LocaleName { code: "gl", name: "Galician" },
    LocaleName { code: "gu", name: "Gujarati" },
    LocaleName { code: "he", name: "Hebrew" },
    LocaleName { code: "hi", name: "Hindi" },
    LocaleName { code: "hr", name: "Croatian" },
    LocaleName { code: "ht", name: "Haitian Creole" },
    LocaleName { code: "hu", name: "Hungarian" },
    LocaleName { code: "id", name: "Indonesian" },
    LocaleName { code: "is", name: "Icelandic" },
    LocaleName { code: "it", name: "Italian" },
    LocaleName { code: "ja", name: "Japanese" },
    LocaleName { code: "ka", name: "Georgian" },
    LocaleName { code: "kn", name: "Kannada" },
    LocaleName { code: "ko", name: "Korean" },
    LocaleName { code: "lt", name: "Lithuanian" },
    LocaleName { code: "lv", name: "Latvian" },
    LocaleName { code: "mk", name: "Macedonian" },
    LocaleName { code: "mr", name: "Marathi" },
    LocaleName { code: "ms", name: "Malay" },
    LocaleName { code: "mt", name: "Maltese" },
    LocaleName { code: "nl", name: "Dutch" },
    LocaleName { code: "no", name: "Norwegian" },
    LocaleName { code: "pl", name: "Polish" },
    LocaleName { code: "pt", name: "Portuguese" },
    LocaleName { code: "ro", name: "Romanian" },
    LocaleName { code: "ru", name: "Russian" },
    LocaleName { code: "sk", name: "Slovak" },
    LocaleName { code: "sl", name: "Slovenian" },
    LocaleName { code: "sq", name: "Albanian" },
    LocaleName { code: "sv", name: "Swedish" },
    LocaleName { code: "sw", name: "Swahili" },
    LocaleName { code: "ta", name: "Tamil" },
    LocaleName { code: "te", name: "Telugu" },
    LocaleName { code: "th", name: "Thai" },
    LocaleName { code: "tl", name: "Tagalog" },
    LocaleName { code: "tr", name: "Turkish" },
    LocaleName { code: "uk", name: "Ukrainian" },
    LocaleName { code: "ur", name: "Urdu" },
    LocaleName { code: "vi", name: "Vietnamese" },
    LocaleName { code: "zh", name: "Chinese" },
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Resolve `code` to a human-readable display name.
///
/// Subtags after the primary one are kept in parentheses. Codes missing from
/// [`LOCALE_NAMES`] display as the code itself.
///
/// ```
/// use lingo_session::catalog::display_name;
///
/// assert_eq!(display_name("ta"), "Tamil");
/// assert_eq!(display_name("pt-BR"), "Portuguese (BR)");
/// assert_eq!(display_name("xx"), "xx");
/// ```
pub fn display_name(code: &str) -> String {
    let mut parts = code.split(['-', '_']);
    let primary = parts.next().unwrap_or_default().to_ascii_lowercase();
    let rest: Vec<&str> = parts.filter(|p| !p.is_empty()).collect();

    match LOCALE_NAMES.iter().find(|l| l.code == primary) {
        Some(entry) if rest.is_empty() => entry.name.to_string(),
        Some(entry) => format!("{} ({})", entry.name, rest.join("-")),
        None => code.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_codes_are_unique_and_sorted() {
        for pair in LOCALE_NAMES.windows(2) {
            assert!(pair[0].code < pair[1].code, "{} !< {}", pair[0].code, pair[1].code);
        }
    }

    #[test]
    fn resolves_default_pair() {
        assert_eq!(display_name("en"), "English");
        assert_eq!(display_name("ta"), "Tamil");
    }

    #[test]
    fn primary_subtag_is_case_insensitive() {
        assert_eq!(display_name("DE"), "German");
    }

    #[test]
    fn region_subtag_is_kept() {
        assert_eq!(display_name("zh_Hant"), "Chinese (Hant)");
    }

    #[test]
    fn unknown_code_falls_back_to_code() {
        assert_eq!(display_name("tlh"), "tlh");
        assert_eq!(display_name(""), "");
    }
}
