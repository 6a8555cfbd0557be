use std::fmt::Display;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Es];

    /// Matches on the primary language subtag (`es-MX` is `es`), falling back to `en`.
    pub fn resolve(value: &str) -> Self {
        let primary = value
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "es" => Locale::Es,
            _ => Locale::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    pub fn bundle(&self) -> MessageBundle {
        let (title, description) = match self {
            Locale::En => (
                "StyleBuddy",
                "Your AI-powered personal stylist. Rate your outfits, discover your style and find the hairstyle that suits you.",
            ),
            Locale::Es => (
                "StyleBuddy",
                "Tu estilista personal con IA. Califica tus atuendos, descubre tu estilo y encuentra el peinado que te favorece.",
            ),
        };

        MessageBundle {
            locale: *self,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page-level strings for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageBundle {
    pub locale: Locale,
    pub title: String,
    pub description: String,
}
