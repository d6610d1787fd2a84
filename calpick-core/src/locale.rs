//! Locale-aware week layout: which weekday starts a row and what the
//! column headers say.
//!
//! Lookups never fail outward. An unknown tag or a formatting failure falls
//! back to a Monday-first week with English labels, so the grid can always
//! be drawn. Results are cheap but not free; hosts resolve them once per
//! activation (see [`LocaleSettings`]).

use std::fmt::Write;

use chrono::{Locale, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalPickError, CalPickResult};

/// Used when nothing better is known about the runtime.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Monday, used whenever the locale cannot be resolved.
pub const DEFAULT_FIRST_DAY: u8 = 1;

/// Environment variables consulted for the runtime locale, most specific first.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

// CLDR week data: territories whose week does not start on Monday.
const SUNDAY_FIRST: &[&str] = &[
    "AG", "AS", "BD", "BR", "BS", "BT", "BW", "BZ", "CA", "CN", "CO", "DM", "DO", "ET", "GT",
    "GU", "HK", "HN", "ID", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "LA", "MH", "MM", "MO",
    "MT", "MX", "MZ", "NI", "NP", "PA", "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV",
    "TH", "TT", "TW", "UM", "US", "VE", "VI", "WS", "YE", "ZA", "ZW",
];
const SATURDAY_FIRST: &[&str] = &[
    "AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];
const FRIDAY_FIRST: &[&str] = &["MV"];

/// Week layout for one locale, as stored in the picker state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSettings {
    pub first_day_of_week: u8,
    pub weekdays: Vec<String>,
}

impl LocaleSettings {
    pub fn for_locale(locale: &str) -> Self {
        let first_day_of_week = local_first_day_of_week(locale);
        let weekdays = weekday_names(locale, first_day_of_week);

        LocaleSettings {
            first_day_of_week,
            weekdays,
        }
    }
}

/// A locale tag broken into the parts the week layout cares about.
///
/// Accepts BCP 47 (`en-US`, `de`, `en-US-u-fw-mon`) and POSIX
/// (`de_DE.UTF-8`, `ca_ES@valencia`) spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTag {
    pub language: String,
    pub region: Option<String>,
    /// First day requested through a `-u-fw-` extension.
    pub first_day: Option<u8>,
}

impl LocaleTag {
    pub fn parse(tag: &str) -> CalPickResult<Self> {
        let tag = tag.trim();
        // POSIX codeset and modifier
        let tag = tag.split(['.', '@']).next().unwrap_or(tag);

        let (main, first_day) = match tag.find("-u-") {
            Some(idx) => (&tag[..idx], unicode_first_day(&tag[idx + 3..])),
            None => (tag, None),
        };

        let mut subtags = main.split(['-', '_']);

        let language = subtags
            .next()
            .filter(|l| (2..=3).contains(&l.len()) && l.chars().all(|c| c.is_ascii_alphabetic()))
            .map(|l| l.to_ascii_lowercase())
            .ok_or_else(|| CalPickError::Locale(tag.to_string()))?;

        // Skip the script subtag, take the first region-shaped one
        let region = subtags
            .find(|s| {
                (s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
                    || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit()))
            })
            .map(|r| r.to_ascii_uppercase());

        Ok(LocaleTag {
            language,
            region,
            first_day,
        })
    }

    /// Region from the tag, or the region the language is most often used in.
    pub fn effective_region(&self) -> String {
        self.region
            .clone()
            .unwrap_or_else(|| likely_region(&self.language))
    }

    /// Matching entry of chrono's locale tables.
    pub fn chrono_locale(&self) -> CalPickResult<Locale> {
        let exact = format!("{}_{}", self.language, self.effective_region());
        let likely = format!("{}_{}", self.language, likely_region(&self.language));

        Locale::try_from(exact.as_str())
            .or_else(|_| Locale::try_from(likely.as_str()))
            .map_err(|_| CalPickError::Locale(exact))
    }
}

/// Weekday (0 = Sunday) the given locale starts its week on.
/// Falls back to Monday when the locale cannot be resolved.
pub fn local_first_day_of_week(locale: &str) -> u8 {
    resolve_first_day(locale).unwrap_or_else(|e| {
        tracing::debug!("Falling back to Monday-first week for '{}': {}", locale, e);
        DEFAULT_FIRST_DAY
    })
}

/// Fallible core of [`local_first_day_of_week`].
pub fn resolve_first_day(locale: &str) -> CalPickResult<u8> {
    let tag = LocaleTag::parse(locale)?;
    let chrono_locale = tag.chrono_locale()?;

    // The locale must be able to name the reference Sunday
    let sunday = reference_day(0)
        .ok_or_else(|| CalPickError::Locale(locale.to_string()))?;
    if localized_label(sunday, "%A", chrono_locale)?.is_empty() {
        return Err(CalPickError::Locale(locale.to_string()));
    }

    Ok(tag
        .first_day
        .unwrap_or_else(|| first_day_for_region(&tag.effective_region())))
}

/// Seven abbreviated weekday labels, starting at `first_day_of_week`.
pub fn weekday_names(locale: &str, first_day_of_week: u8) -> Vec<String> {
    let chrono_locale = LocaleTag::parse(locale)
        .and_then(|tag| tag.chrono_locale())
        .unwrap_or_else(|e| {
            tracing::debug!("Using English weekday labels for '{}': {}", locale, e);
            Locale::POSIX
        });

    (0..7u8)
        .map(|i| {
            let weekday = (first_day_of_week % 7 + i) % 7;
            short_label(weekday, chrono_locale)
        })
        .collect()
}

/// Runtime locale from the environment, `en-US` if none is set.
pub fn detect_locale() -> String {
    locale_from_env(|key| std::env::var(key).ok())
}

fn locale_from_env<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| {
            let base = value.split(['.', '@']).next().unwrap_or_default();
            !base.is_empty() && base != "C" && base != "POSIX"
        })
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

fn short_label(weekday: u8, locale: Locale) -> String {
    reference_day(weekday)
        .and_then(|date| {
            localized_label(date, "%a", locale)
                .or_else(|_| localized_label(date, "%a", Locale::POSIX))
                .ok()
        })
        .unwrap_or_default()
}

/// One day of the reference week Monday 2024-01-01 .. Sunday 2024-01-07,
/// picked by weekday number (0 = Sunday).
fn reference_day(weekday: u8) -> Option<NaiveDate> {
    let offset = (u32::from(weekday % 7) + 6) % 7;
    NaiveDate::from_ymd_opt(2024, 1, 1 + offset)
}

fn localized_label(date: NaiveDate, fmt: &str, locale: Locale) -> CalPickResult<String> {
    let datetime = date.and_time(NaiveTime::default()).and_utc();

    let mut label = String::new();
    write!(label, "{}", datetime.format_localized(fmt, locale))?;
    Ok(label)
}

fn first_day_for_region(region: &str) -> u8 {
    if SUNDAY_FIRST.contains(&region) {
        0
    } else if SATURDAY_FIRST.contains(&region) {
        6
    } else if FRIDAY_FIRST.contains(&region) {
        5
    } else {
        1
    }
}

fn likely_region(language: &str) -> String {
    match language {
        "en" => "US",
        "ja" => "JP",
        "zh" => "CN",
        "ko" => "KR",
        "he" => "IL",
        "ar" => "EG",
        "pt" => "BR",
        "hi" => "IN",
        "fa" => "IR",
        "sv" => "SE",
        "da" => "DK",
        "nb" | "nn" => "NO",
        "el" => "GR",
        "cs" => "CZ",
        "uk" => "UA",
        "et" => "EE",
        "sl" => "SI",
        "vi" => "VN",
        "ka" => "GE",
        "sq" => "AL",
        other => return other.to_ascii_uppercase(),
    }
    .to_string()
}

/// Value of the `fw` key in a Unicode extension (`fw-sun`, `ca-gregory-fw-mon`).
fn unicode_first_day(extension: &str) -> Option<u8> {
    let parts: Vec<&str> = extension.split('-').collect();
    let idx = parts.iter().position(|p| p.eq_ignore_ascii_case("fw"))?;

    match parts.get(idx + 1)?.to_ascii_lowercase().as_str() {
        "sun" => Some(0),
        "mon" => Some(1),
        "tue" => Some(2),
        "wed" => Some(3),
        "thu" => Some(4),
        "fri" => Some(5),
        "sat" => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_bcp47_tags() {
        let tag = LocaleTag::parse("en-US").unwrap();
        assert_eq!(tag.language, "en");
        assert_eq!(tag.region.as_deref(), Some("US"));
        assert_eq!(tag.first_day, None);
    }

    #[test]
    fn parses_posix_tags() {
        let tag = LocaleTag::parse("de_DE.UTF-8").unwrap();
        assert_eq!(tag.language, "de");
        assert_eq!(tag.region.as_deref(), Some("DE"));

        let tag = LocaleTag::parse("ca_ES@valencia").unwrap();
        assert_eq!(tag.region.as_deref(), Some("ES"));
    }

    #[test]
    fn skips_script_subtag() {
        let tag = LocaleTag::parse("zh-Hant-TW").unwrap();
        assert_eq!(tag.language, "zh");
        assert_eq!(tag.region.as_deref(), Some("TW"));
    }

    #[test]
    fn parses_first_day_extension() {
        let tag = LocaleTag::parse("en-US-u-fw-mon").unwrap();
        assert_eq!(tag.region.as_deref(), Some("US"));
        assert_eq!(tag.first_day, Some(1));

        let tag = LocaleTag::parse("de-DE-u-ca-gregory-fw-sun").unwrap();
        assert_eq!(tag.first_day, Some(0));
    }

    #[test]
    fn rejects_garbage_tags() {
        assert!(LocaleTag::parse("").is_err());
        assert!(LocaleTag::parse("12-34").is_err());
        assert!(LocaleTag::parse("not a locale").is_err());
    }

    #[test]
    fn bare_language_borrows_likely_region() {
        let tag = LocaleTag::parse("en").unwrap();
        assert_eq!(tag.effective_region(), "US");
        let tag = LocaleTag::parse("de").unwrap();
        assert_eq!(tag.effective_region(), "DE");
    }

    #[test]
    fn first_day_is_always_a_weekday_index() {
        for locale in ["en-US", "en-GB", "de-DE", "ar-EG", "fr", "xx-YY", ""] {
            assert!(local_first_day_of_week(locale) <= 6, "{}", locale);
        }
    }

    #[test]
    fn us_week_starts_on_sunday() {
        assert_eq!(local_first_day_of_week("en-US"), 0);
        assert_eq!(local_first_day_of_week("en"), 0);
    }

    #[test]
    fn european_weeks_start_on_monday() {
        assert_eq!(local_first_day_of_week("en-GB"), 1);
        assert_eq!(local_first_day_of_week("de-DE"), 1);
        assert_eq!(local_first_day_of_week("fr_FR.UTF-8"), 1);
    }

    #[test]
    fn middle_eastern_weeks_start_on_saturday() {
        assert_eq!(local_first_day_of_week("ar-EG"), 6);
    }

    #[test]
    fn extension_overrides_region() {
        assert_eq!(local_first_day_of_week("en-US-u-fw-mon"), 1);
        assert_eq!(local_first_day_of_week("de-DE-u-fw-sun"), 0);
    }

    #[test]
    fn unknown_locale_falls_back_to_monday() {
        assert_eq!(local_first_day_of_week("invalid-locale"), DEFAULT_FIRST_DAY);
        assert_eq!(local_first_day_of_week("xx-YY"), DEFAULT_FIRST_DAY);
        assert!(resolve_first_day("invalid-locale").is_err());
    }

    #[test]
    fn weekday_names_has_seven_labels() {
        assert_eq!(weekday_names("en-US", 0).len(), 7);
        assert_eq!(weekday_names("invalid-locale", 3).len(), 7);
    }

    #[test]
    fn weekday_names_start_on_sunday() {
        let names = weekday_names("en-US", 0);
        assert_eq!(names[0], "Sun");
        assert_eq!(names[1], "Mon");
        assert_eq!(names[6], "Sat");
    }

    #[test]
    fn weekday_names_start_on_monday() {
        let names = weekday_names("en-US", 1);
        assert_eq!(names[0], "Mon");
        assert_eq!(names[6], "Sun");
    }

    #[test]
    fn weekday_names_are_localized() {
        let names = weekday_names("de-DE", 1);
        assert_eq!(names[0], "Mo");
        assert_eq!(names[6], "So");
    }

    #[test]
    fn weekday_names_fall_back_to_english() {
        let names = weekday_names("invalid-locale", 0);
        assert_eq!(names[0], "Sun");
        assert_eq!(names[6], "Sat");
    }

    #[test]
    fn settings_bundle_both_fields() {
        let settings = LocaleSettings::for_locale("en-GB");
        assert_eq!(settings.first_day_of_week, 1);
        assert_eq!(settings.weekdays[0], "Mon");
    }

    #[test]
    fn env_detection_prefers_lc_all() {
        let env: HashMap<&str, &str> = HashMap::from([("LC_ALL", "de_DE.UTF-8"), ("LANG", "en_US.UTF-8")]);
        let detected = locale_from_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(detected, "de_DE.UTF-8");
    }

    #[test]
    fn env_detection_skips_c_locale() {
        let env: HashMap<&str, &str> = HashMap::from([("LC_ALL", "C.UTF-8"), ("LANG", "fr_FR.UTF-8")]);
        let detected = locale_from_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(detected, "fr_FR.UTF-8");
    }

    #[test]
    fn env_detection_defaults_to_en_us() {
        let detected = locale_from_env(|_| None);
        assert_eq!(detected, "en-US");

        let detected = locale_from_env(|_| Some("POSIX".to_string()));
        assert_eq!(detected, "en-US");
    }
}
