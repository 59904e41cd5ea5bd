#![forbid(unsafe_code)]

//! Reference user text for tests and benchmarks.

use std::fmt;

use ahash::AHashMap;
use tdom_core::Resolver;

/// Keys of the reference phrase catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phrase {
    Greeting,
    Tooltip,
    Item,
    Search,
    Logo,
    Submit,
}

impl Phrase {
    /// Every phrase, in declaration order.
    pub const ALL: [Phrase; 6] = [
        Phrase::Greeting,
        Phrase::Tooltip,
        Phrase::Item,
        Phrase::Search,
        Phrase::Logo,
        Phrase::Submit,
    ];
}

/// Locale-specific display strings for [`Phrase`].
#[derive(Clone)]
pub struct Catalog {
    locale: &'static str,
    entries: AHashMap<Phrase, String>,
}

impl Catalog {
    fn from_pairs(locale: &'static str, pairs: [(Phrase, &str); 6]) -> Self {
        Self {
            locale,
            entries: pairs.into_iter().map(|(k, v)| (k, v.to_string())).collect(),
        }
    }

    pub fn english() -> Self {
        Self::from_pairs(
            "en",
            [
                (Phrase::Greeting, "Hello"),
                (Phrase::Tooltip, "Tooltip"),
                (Phrase::Item, "Item"),
                (Phrase::Search, "Search"),
                (Phrase::Logo, "Company logo"),
                (Phrase::Submit, "Submit"),
            ],
        )
    }

    pub fn german() -> Self {
        Self::from_pairs(
            "de",
            [
                (Phrase::Greeting, "Hallo"),
                (Phrase::Tooltip, "Kurzinfo"),
                (Phrase::Item, "Eintrag"),
                (Phrase::Search, "Suchen"),
                (Phrase::Logo, "Firmenlogo"),
                (Phrase::Submit, "Absenden"),
            ],
        )
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    /// Display string for `phrase`. Unknown phrases print as `??Phrase??`.
    pub fn lookup(&self, phrase: Phrase) -> String {
        self.entries
            .get(&phrase)
            .cloned()
            .unwrap_or_else(|| format!("??{phrase:?}??"))
    }

    /// Resolver backed by a copy of this catalog.
    ///
    /// Each call returns a new resolver identity. Build it once and keep it
    /// across render passes, or memoized subtrees will never be reused.
    pub fn resolver(&self) -> Resolver<Phrase> {
        let catalog = self.clone();
        Resolver::new(move |phrase: &Phrase| catalog.lookup(*phrase))
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("locale", &self.locale)
            .field("entries", &self.entries.len())
            .finish()
    }
}
