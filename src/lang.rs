use serde_json::Value;

/// Display language of the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Es, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// The "Pending" placeholder text.
    pub fn pending(&self) -> &'static str {
        self.pick("Pendiente", "Pending")
    }

    pub(crate) fn pick(&self, es: &'static str, en: &'static str) -> &'static str {
        match self {
            Self::Es => es,
            Self::En => en,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A string with an `es` and an `en` variant, either of which may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    pub es: Option<String>,
    pub en: Option<String>,
}

impl LocalizedText {
    pub fn new(es: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            es: Some(es.into()),
            en: Some(en.into()),
        }
    }

    /// Only a JSON object counts as a lang-map.
    pub fn from_json(value: Option<&Value>) -> Option<Self> {
        let map = value?.as_object()?;
        Some(Self {
            es: scalar_text(map.get("es")),
            en: scalar_text(map.get("en")),
        })
    }

    /// The variant for `lang`, falling back to that language's placeholder.
    pub fn get(&self, lang: Language) -> &str {
        let variant = match lang {
            Language::Es => self.es.as_deref(),
            Language::En => self.en.as_deref(),
        };
        variant.unwrap_or_else(|| lang.pending())
    }
}

/// Resolves a possibly missing lang-map for `lang`.
pub fn get_language_value(value: Option<&LocalizedText>, lang: Language) -> &str {
    match value {
        Some(text) => text.get(lang),
        None => lang.pending(),
    }
}

/// Reads a displayable scalar. Empty strings, zero, `false`, `null`
/// and nested values all count as absent.
pub(crate) fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => {
            Some(n.to_string()).filter(|text| text != "0")
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) if f != 0.0 && !f.is_nan() => Some(number_text(f)),
            _ => None,
        },
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// A float as a browser would print it: `9.0` is `9`, `1.5e3` is `1500`,
/// and very large or very small magnitudes use exponent form (`1e+21`).
fn number_text(f: f64) -> String {
    let abs = f.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let text = format!("{f:e}");
        if text.contains("e-") {
            text
        } else {
            text.replacen('e', "e+", 1)
        }
    } else {
        f.to_string()
    }
}
