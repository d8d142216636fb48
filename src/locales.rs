use std::collections::HashMap;

const MESSAGES: &str = include_str!("../locales/messages.json");

/// Translated strings, keyed by locale then message key.
#[derive(Debug, Default)]
pub struct Locales {
    messages: HashMap<String, HashMap<String, String>>,
}

impl Locales {
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(MESSAGES)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            messages: serde_json::from_str(json)?,
        })
    }

    /// Looks up `key` for `locale`, then for its language alone ("fr-FR" -> "fr"),
    /// and returns `fallback` when neither has it.
    pub fn get_msg(&self, locale: &str, key: &str, fallback: &str) -> String {
        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        [locale, language]
            .iter()
            .find_map(|candidate| self.messages.get(*candidate)?.get(key))
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_parses() {
        let locales = Locales::builtin().unwrap();
        assert_eq!(locales.get_msg("en-US", "hobby", "x"), "Hobby");
        assert_eq!(locales.get_msg("fr", "object", "x"), "Objet");
    }

    #[test]
    fn test_language_fallback() {
        let locales = Locales::from_json(r#"{"fr":{"trait":"Caractère"}}"#).unwrap();
        assert_eq!(locales.get_msg("fr-FR", "trait", "Trait"), "Caractère");
        assert_eq!(locales.get_msg("fr_CA", "trait", "Trait"), "Caractère");
    }

    #[test]
    fn test_missing_key_or_locale_uses_fallback() {
        let locales = Locales::from_json(r#"{"fr":{"trait":"Caractère"}}"#).unwrap();
        assert_eq!(locales.get_msg("fr", "hobby", "Hobby"), "Hobby");
        assert_eq!(locales.get_msg("ja", "trait", "Trait"), "Trait");
        assert_eq!(Locales::default().get_msg("", "prompt_error", "Failed"), "Failed");
    }
}
