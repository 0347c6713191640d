//! Teksty odpowiedzi (en/fr) i preferencje językowe użytkowników.

use std::fmt;
use std::str::FromStr;

use dashmap::DashMap;

/// Obsługiwane języki odpowiedzi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    En,
    Fr,
}

pub const SUPPORTED: [Lang; 2] = [Lang::En, Lang::Fr];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code `{0}`")]
pub struct UnknownLang(pub String);

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }

    /// Potwierdzenie zmiany – zawsze w NOWO wybranym języku.
    pub fn language_set(self) -> &'static str {
        match self {
            Lang::En => "✅ Language set to English.",
            Lang::Fr => "✅ Langue définie sur le français.",
        }
    }

    pub fn invalid_language(self) -> String {
        let codes = SUPPORTED
            .iter()
            .map(|l| format!("`{}`", l.code()))
            .collect::<Vec<_>>()
            .join(", ");
        match self {
            Lang::En => format!("❌ Invalid language. Available: {codes}"),
            Lang::Fr => format!("❌ Langue invalide. Disponibles : {codes}"),
        }
    }

    pub fn invalid_uid(self) -> &'static str {
        match self {
            Lang::En => "❌ **Invalid UID!**",
            Lang::Fr => "❌ **UID invalide !**",
        }
    }

    pub fn unavailable(self) -> &'static str {
        match self {
            Lang::En => "❌ Could not get information. Please try again later.",
            Lang::Fr => "❌ Impossible d'obtenir les informations. Veuillez réessayer plus tard.",
        }
    }

    pub fn wrong_channel(self, channel_id: u64) -> String {
        match self {
            Lang::En => format!("❌ Commands can only be used in <#{channel_id}>."),
            Lang::Fr => {
                format!("❌ Les commandes ne peuvent être utilisées que dans <#{channel_id}>.")
            }
        }
    }

    pub fn banned_title(self) -> &'static str {
        match self {
            Lang::En => "**▌ Banned Account 🛑 **",
            Lang::Fr => "**▌ Compte banni 🛑 **",
        }
    }

    pub fn clean_title(self) -> &'static str {
        match self {
            Lang::En => "**▌ Clean Account ✅ **",
            Lang::Fr => "**▌ Compte non banni ✅ **",
        }
    }

    pub fn banned_reason(self) -> &'static str {
        match self {
            Lang::En => "This account used cheats.",
            Lang::Fr => "Ce compte a utilisé des triches.",
        }
    }

    pub fn clean_status(self) -> &'static str {
        match self {
            Lang::En => "No evidence of cheats.",
            Lang::Fr => "Aucune preuve de triche.",
        }
    }

    pub fn labels(self) -> Labels {
        match self {
            Lang::En => Labels {
                reason: "Reason",
                duration: "Duration",
                nickname: "Nickname",
                region: "Region",
                status: "Status",
            },
            Lang::Fr => Labels {
                reason: "Raison",
                duration: "Durée",
                nickname: "Pseudo",
                region: "Région",
                status: "Statut",
            },
        }
    }
}

/// Etykiety pól w opisie karty.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub reason: &'static str,
    pub duration: &'static str,
    pub nickname: &'static str,
    pub region: &'static str,
    pub status: &'static str,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = UnknownLang;

    /// Kod jest normalizowany do małych liter (`FR` == `fr`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "fr" => Ok(Lang::Fr),
            other => Err(UnknownLang(other.to_string())),
        }
    }
}

/// Preferencje językowe: user_id -> Lang. Tylko w pamięci, znikają po restarcie.
#[derive(Debug, Default)]
pub struct LanguageStore {
    by_user: DashMap<u64, Lang>,
}

impl LanguageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brak wpisu → `en`.
    pub fn get(&self, user_id: u64) -> Lang {
        self.by_user.get(&user_id).map(|l| *l).unwrap_or_default()
    }

    pub fn set(&self, user_id: u64, lang: Lang) {
        self.by_user.insert(user_id, lang);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("en".parse::<Lang>(), Ok(Lang::En));
        assert_eq!("FR".parse::<Lang>(), Ok(Lang::Fr));
        assert_eq!(" Fr ".parse::<Lang>(), Ok(Lang::Fr));
        assert_eq!("de".parse::<Lang>(), Err(UnknownLang("de".into())));
    }

    #[test]
    fn store_defaults_to_english() {
        let store = LanguageStore::new();
        assert_eq!(store.get(1), Lang::En);
        store.set(1, Lang::Fr);
        assert_eq!(store.get(1), Lang::Fr);
        assert_eq!(store.get(2), Lang::En);
        store.set(1, Lang::En);
        assert_eq!(store.get(1), Lang::En);
    }

    #[test]
    fn invalid_language_lists_every_code() {
        for lang in SUPPORTED {
            let msg = lang.invalid_language();
            assert!(msg.contains("`en`") && msg.contains("`fr`"), "{msg}");
        }
    }

    #[test]
    fn wrong_channel_names_the_channel() {
        assert!(Lang::En.wrong_channel(123).contains("<#123>"));
        assert!(Lang::Fr.wrong_channel(123).contains("<#123>"));
    }
}
