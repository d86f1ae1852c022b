//! Host environment signals used to pick a display currency

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locale assumed when the host supplies none.
pub const DEFAULT_LOCALE: &str = "en-IN";

const DEFAULT_TIME_ZONE: &str = "UTC";

/// `locale`, or [`DEFAULT_LOCALE`] when it is blank.
pub fn locale_or_default(locale: &str) -> &str {
    if locale.trim().is_empty() {
        DEFAULT_LOCALE
    } else {
        locale
    }
}

/// Supplies the shopper's timezone and locale identifiers.
pub trait EnvironmentProvider: Send + Sync {
    fn current_time_zone(&self) -> String;
    fn current_locale(&self) -> String;
}

/// Environment with explicit values, used for overrides and tests.
#[derive(Debug, Clone)]
pub struct FixedEnvironment {
    time_zone: String,
    locale: String,
}

impl FixedEnvironment {
    pub fn new(time_zone: &str, locale: &str) -> Self {
        Self {
            time_zone: time_zone.to_string(),
            locale: locale.to_string(),
        }
    }
}

impl EnvironmentProvider for FixedEnvironment {
    fn current_time_zone(&self) -> String {
        self.time_zone.clone()
    }

    fn current_locale(&self) -> String {
        self.locale.clone()
    }
}

/// Reads signals from the process environment and the system zoneinfo setup.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    timezone_file: PathBuf,
    localtime_link: PathBuf,
}

impl SystemEnvironment {
    pub fn new() -> Self {
        Self {
            timezone_file: PathBuf::from("/etc/timezone"),
            localtime_link: PathBuf::from("/etc/localtime"),
        }
    }
}

impl Default for SystemEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentProvider for SystemEnvironment {
    fn current_time_zone(&self) -> String {
        let tz = time_zone_from_vars(|key| std::env::var(key).ok())
            .or_else(|| time_zone_from_file(&self.timezone_file))
            .or_else(|| time_zone_from_link(&self.localtime_link))
            .unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string());
        debug!("Detected time zone: {}", tz);
        tz
    }

    fn current_locale(&self) -> String {
        let locale = locale_from_vars(|key| std::env::var(key).ok())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        debug!("Detected locale: {}", locale);
        locale
    }
}

/// Explicit values where given, another provider for the rest.
pub struct OverrideEnvironment<P: EnvironmentProvider> {
    time_zone: Option<String>,
    locale: Option<String>,
    fallback: P,
}

impl<P: EnvironmentProvider> OverrideEnvironment<P> {
    pub fn new(time_zone: Option<String>, locale: Option<String>, fallback: P) -> Self {
        Self {
            time_zone,
            locale,
            fallback,
        }
    }
}

impl<P: EnvironmentProvider> EnvironmentProvider for OverrideEnvironment<P> {
    fn current_time_zone(&self) -> String {
        self.time_zone
            .clone()
            .unwrap_or_else(|| self.fallback.current_time_zone())
    }

    fn current_locale(&self) -> String {
        self.locale
            .clone()
            .unwrap_or_else(|| self.fallback.current_locale())
    }
}

/// Reads `TZ`, dropping the POSIX `:` prefix.
pub fn time_zone_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    lookup("TZ")
        .map(|tz| tz.trim().trim_start_matches(':').to_string())
        .filter(|tz| !tz.is_empty())
}

fn time_zone_from_file(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn time_zone_from_link(path: &Path) -> Option<String> {
    let target = fs::read_link(path).ok()?;
    zone_from_zoneinfo_path(&target.to_string_lossy())
}

/// Extracts `Area/City` from a path such as `/usr/share/zoneinfo/Area/City`.
pub fn zone_from_zoneinfo_path(path: &str) -> Option<String> {
    path.split_once("zoneinfo/")
        .map(|(_, zone)| zone.to_string())
        .filter(|zone| !zone.is_empty())
}

/// First usable value of `LC_ALL`, `LC_MONETARY`, `LANG`, as a BCP 47 style
/// tag (`en_IN.UTF-8` becomes `en-IN`).
pub fn locale_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["LC_ALL", "LC_MONETARY", "LANG"]
        .iter()
        .filter_map(|key| lookup(key))
        .find_map(|value| normalize_posix_locale(&value))
}

/// Converts a POSIX locale name to a language tag. `C` and `POSIX` carry no
/// locale information and yield `None`.
pub fn normalize_posix_locale(value: &str) -> Option<String> {
    let name = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    Some(name.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_locale_or_default() {
        assert_eq!(locale_or_default(""), "en-IN");
        assert_eq!(locale_or_default("  "), "en-IN");
        assert_eq!(locale_or_default("fr-FR"), "fr-FR");
    }

    #[test]
    fn test_fixed_environment() {
        let env = FixedEnvironment::new("Asia/Tokyo", "ja-JP");
        assert_eq!(env.current_time_zone(), "Asia/Tokyo");
        assert_eq!(env.current_locale(), "ja-JP");
    }

    #[test]
    fn test_override_environment() {
        let fallback = FixedEnvironment::new("Asia/Kolkata", "en-IN");
        let env = OverrideEnvironment::new(None, Some("de-DE".to_string()), fallback);
        assert_eq!(env.current_time_zone(), "Asia/Kolkata");
        assert_eq!(env.current_locale(), "de-DE");
    }

    #[test]
    fn test_time_zone_from_vars() {
        assert_eq!(
            time_zone_from_vars(vars(&[("TZ", ":Europe/London")])),
            Some("Europe/London".to_string())
        );
        assert_eq!(time_zone_from_vars(vars(&[("TZ", "  ")])), None);
        assert_eq!(time_zone_from_vars(vars(&[])), None);
    }

    #[test]
    fn test_zone_from_zoneinfo_path() {
        assert_eq!(
            zone_from_zoneinfo_path("/usr/share/zoneinfo/Asia/Kolkata"),
            Some("Asia/Kolkata".to_string())
        );
        assert_eq!(
            zone_from_zoneinfo_path("../usr/share/zoneinfo/America/New_York"),
            Some("America/New_York".to_string())
        );
        assert_eq!(zone_from_zoneinfo_path("/etc/localtime"), None);
    }

    #[test]
    fn test_locale_precedence() {
        let lookup = vars(&[("LANG", "en_GB.UTF-8"), ("LC_MONETARY", "fr_FR.UTF-8")]);
        assert_eq!(locale_from_vars(lookup), Some("fr-FR".to_string()));

        let lookup = vars(&[("LC_ALL", "C"), ("LANG", "de_DE@euro")]);
        assert_eq!(locale_from_vars(lookup), Some("de-DE".to_string()));

        assert_eq!(locale_from_vars(vars(&[("LANG", "POSIX")])), None);
    }

    #[test]
    fn test_normalize_posix_locale() {
        assert_eq!(normalize_posix_locale("en_IN.UTF-8"), Some("en-IN".into()));
        assert_eq!(normalize_posix_locale("ja_JP"), Some("ja-JP".into()));
        assert_eq!(normalize_posix_locale("C.UTF-8"), None);
        assert_eq!(normalize_posix_locale(""), None);
    }

    #[test]
    fn test_system_environment_reads_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let tz_file = dir.path().join("timezone");
        fs::write(&tz_file, "Australia/Sydney\n")?;

        let env = SystemEnvironment {
            timezone_file: tz_file,
            localtime_link: dir.path().join("missing"),
        };
        assert_eq!(
            time_zone_from_file(&env.timezone_file),
            Some("Australia/Sydney".to_string())
        );
        assert_eq!(time_zone_from_link(&env.localtime_link), None);
        Ok(())
    }
}
