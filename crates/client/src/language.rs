// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Accept-Language` from POSIX locale names.

/// Build an `Accept-Language` value from a colon-separated locale list.
///
/// `en_US.UTF-8:fr` becomes `en-us, en;q=0.9, fr;q=0.8`. Falls back to `en`.
pub fn accept_language(locales: &str) -> String {
    let mut names: Vec<String> = Vec::new();
    for locale in locales.split(':').filter(|locale| !locale.is_empty()) {
        for variant in variants(locale) {
            if variant.contains(['.', '@']) || variant == "C" || variant == "POSIX" {
                continue;
            }
            let name = variant.replace('_', "-").to_lowercase();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    if names.is_empty() {
        return "en".to_string();
    }

    // Quality in hundredths; the step shrinks so long lists stay positive.
    let step = match names.len() {
        0..=9 => 10,
        10..=19 => 5,
        _ => 1,
    };
    let mut value = String::new();
    for (index, name) in names.iter().enumerate() {
        if index > 0 {
            value.push_str(", ");
        }
        value.push_str(name);
        if index > 0 {
            let quality = 100usize.saturating_sub(index * step).max(1);
            if step == 10 {
                value.push_str(&format!(";q=0.{}", quality / 10));
            } else {
                value.push_str(&format!(";q=0.{quality:02}"));
            }
        }
    }
    value
}

/// Expand `lang_TERRITORY.codeset@modifier` from most to least specific.
fn variants(locale: &str) -> Vec<String> {
    let (rest, modifier) = split_suffix(locale, '@');
    let (rest, codeset) = split_suffix(rest, '.');
    let (language, territory) = split_suffix(rest, '_');

    let mut variants = Vec::new();
    for mask in (0u8..8).rev() {
        let territory = if mask & 0b100 != 0 { territory } else { Some("") };
        let codeset = if mask & 0b010 != 0 { codeset } else { Some("") };
        let modifier = if mask & 0b001 != 0 { modifier } else { Some("") };
        // A component selected by the mask but absent from the locale
        let (Some(territory), Some(codeset), Some(modifier)) = (territory, codeset, modifier) else {
            continue;
        };
        variants.push(format!("{language}{territory}{codeset}{modifier}"));
    }
    variants
}

/// Split at the first `separator`, keeping it on the suffix.
fn split_suffix(value: &str, separator: char) -> (&str, Option<&str>) {
    match value.find(separator) {
        Some(index) => (&value[..index], Some(&value[index..])),
        None => (value, None),
    }
}

#[cfg(test)]
#[path = "language_tests.rs"]
mod tests;
