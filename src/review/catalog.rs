//! Localized message templates.
//!
//! Templates live in TOML resources keyed by [`MessageId::key`], one file per
//! locale. The built-in files are embedded at compile time; a directory with
//! files of the same names can override individual keys. Lookups fall back
//! to English when a locale lacks a key.

use std::{
    collections::HashMap,
    fmt::{Display, Write as _},
    fs,
    path::Path,
};

use crate::{
    errors::{ConfigError, PublishError},
    types::Locale,
};

const EMBEDDED_EN: &str = include_str!("../../assets/messages/en.toml");
const EMBEDDED_ZH_CN: &str = include_str!("../../assets/messages/zh_CN.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// Summary block: project, commit, risk, total, definite, high, medium, low, url
    Result,
    /// Delta block: new count, fixed count, baseline commit, diff-summary url
    Dsr,
    DsrNew,
    DsrFixed,
    /// One issue row, ten fields
    DsrDetail,
    ConnectionOk,
    EmptyServerName,
    EmptyServerVersion,
}

impl MessageId {
    pub fn key(&self) -> &'static str {
        match self {
            MessageId::Result => "result",
            MessageId::Dsr => "dsr",
            MessageId::DsrNew => "dsr_new",
            MessageId::DsrFixed => "dsr_fixed",
            MessageId::DsrDetail => "dsr_detail",
            MessageId::ConnectionOk => "form_connection_ok",
            MessageId::EmptyServerName => "form_empty_server",
            MessageId::EmptyServerVersion => "form_empty_version",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    bundles: HashMap<Locale, HashMap<String, String>>,
}

impl MessageCatalog {
    /// Catalog built from the templates shipped with the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        let mut catalog = Self::default();
        catalog.merge_bundle(Locale::English, EMBEDDED_EN, "embedded en.toml")?;
        catalog.merge_bundle(Locale::SimplifiedChinese, EMBEDDED_ZH_CN, "embedded zh_CN.toml")?;
        Ok(catalog)
    }

    /// Embedded templates, overridden by `<dir>/<locale>.toml` files that exist.
    pub fn load(messages_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let mut catalog = Self::embedded()?;
        let Some(dir) = messages_dir else {
            return Ok(catalog);
        };

        for locale in Locale::DEFAULT_ORDER {
            let path = dir.join(format!("{}.toml", locale.code()));
            if !path.exists() {
                continue;
            }
            let origin = path.to_string_lossy().to_string();
            let source =
                fs::read_to_string(&path).map_err(|e| ConfigError::FileRead(origin.clone(), e))?;
            catalog.merge_bundle(locale, &source, &origin)?;
            tracing::debug!(locale = %locale, path = %origin, "Loaded message overrides");
        }
        Ok(catalog)
    }

    /// Parse a TOML bundle and merge its keys over the existing ones for `locale`.
    pub fn merge_bundle(
        &mut self,
        locale: Locale,
        source: &str,
        origin: &str,
    ) -> Result<(), ConfigError> {
        let entries: HashMap<String, String> =
            toml::from_str(source).map_err(|e| ConfigError::TomlParse(origin.to_string(), e))?;
        self.bundles.entry(locale).or_default().extend(entries);
        Ok(())
    }

    pub fn template(&self, id: MessageId, locale: Locale) -> Option<&str> {
        let lookup = |l: Locale| {
            self.bundles
                .get(&l)
                .and_then(|bundle| bundle.get(id.key()))
                .map(String::as_str)
        };
        lookup(locale).or_else(|| lookup(Locale::English))
    }

    pub fn render(
        &self,
        id: MessageId,
        locale: Locale,
        args: &[&dyn Display],
    ) -> Result<String, PublishError> {
        let template = self
            .template(id, locale)
            .ok_or_else(|| PublishError::MissingTemplate {
                id: id.key().to_string(),
                locale: locale.code().to_string(),
            })?;
        Ok(format_template(template, args))
    }
}

/// Substitute `{N}` placeholders; an index without an argument is kept as written.
pub fn format_template(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '{' {
            out.push(c);
            continue;
        }

        let mut digits = String::new();
        while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
            digits.push(d);
            chars.next();
        }

        if chars.peek() == Some(&'}') && !digits.is_empty() {
            chars.next();
            match digits.parse::<usize>().ok().and_then(|i| args.get(i)) {
                Some(arg) => {
                    let _ = write!(out, "{}", arg);
                }
                None => {
                    out.push('{');
                    out.push_str(&digits);
                    out.push('}');
                }
            }
        } else {
            out.push('{');
            out.push_str(&digits);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ALL_IDS: [MessageId; 8] = [
        MessageId::Result,
        MessageId::Dsr,
        MessageId::DsrNew,
        MessageId::DsrFixed,
        MessageId::DsrDetail,
        MessageId::ConnectionOk,
        MessageId::EmptyServerName,
        MessageId::EmptyServerVersion,
    ];

    #[test]
    fn test_embedded_bundles_are_complete() {
        let catalog = MessageCatalog::embedded().unwrap();
        for locale in Locale::DEFAULT_ORDER {
            for id in ALL_IDS {
                let bundle = &catalog.bundles[&locale];
                assert!(
                    bundle.contains_key(id.key()),
                    "{} missing in {}",
                    id.key(),
                    locale
                );
            }
        }
    }

    #[test]
    fn test_format_template() {
        assert_eq!(format_template("{0} new issues:", &[&2]), "2 new issues:");
        assert_eq!(format_template("{1}-{0}-{1}", &[&"a", &"b"]), "b-a-b");
        assert_eq!(format_template("missing {3}", &[&"a"]), "missing {3}");
        assert_eq!(format_template("brace { and {x}", &[&"a"]), "brace { and {x}");
        assert_eq!(format_template("tail {", &[]), "tail {");
        assert_eq!(format_template("{12}", &[]), "{12}");
    }

    #[test]
    fn test_render_falls_back_to_english() {
        let mut catalog = MessageCatalog::default();
        catalog
            .merge_bundle(Locale::English, r#"dsr_new = "{0} new issues:""#, "test")
            .unwrap();
        catalog
            .merge_bundle(Locale::SimplifiedChinese, r#"dsr_fixed = "修复 {0}""#, "test")
            .unwrap();

        assert_eq!(
            catalog
                .render(MessageId::DsrNew, Locale::SimplifiedChinese, &[&3])
                .unwrap(),
            "3 new issues:"
        );
        let err = catalog
            .render(MessageId::DsrDetail, Locale::SimplifiedChinese, &[])
            .unwrap_err();
        assert!(matches!(err, PublishError::MissingTemplate { .. }));
    }

    #[test]
    fn test_directory_overrides_single_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en.toml"), r#"dsr_new = "NEW: {0}""#).unwrap();

        let catalog = MessageCatalog::load(Some(dir.path())).unwrap();
        assert_eq!(
            catalog.render(MessageId::DsrNew, Locale::English, &[&1]).unwrap(),
            "NEW: 1"
        );
        assert_eq!(
            catalog.render(MessageId::DsrFixed, Locale::English, &[&1]).unwrap(),
            "1 fixed issues:"
        );
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zh_CN.toml"), "dsr_new = ").unwrap();
        assert!(matches!(
            MessageCatalog::load(Some(dir.path())),
            Err(ConfigError::TomlParse(_, _))
        ));
    }
}
