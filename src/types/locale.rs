use serde::{Deserialize, Serialize};

/// Output locale of a review message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh_CN")]
    SimplifiedChinese,
}

impl Locale {
    /// Locales a review is published in when nothing else is configured.
    pub const DEFAULT_ORDER: [Locale; 2] = [Locale::English, Locale::SimplifiedChinese];

    /// Returns the resource code, also used as the catalog file stem.
    ///
    /// ```
    /// use xcal_gerrit::types::locale::Locale;
    /// assert_eq!(Locale::SimplifiedChinese.code(), "zh_CN");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::SimplifiedChinese => "zh_CN",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    /// Accepts codes and names case-insensitively ("en", "english", "zh_CN", "zh-cn", "zh", "中文").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" | "en_us" | "en-us" => Ok(Locale::English),
            "zh" | "zh_cn" | "zh-cn" | "chinese" | "中文" => Ok(Locale::SimplifiedChinese),
            _ => Err(format!("Unsupported locale: {}. Supported values: en, zh_CN", s)),
        }
    }
}
