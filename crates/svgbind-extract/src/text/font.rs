use std::collections::BTreeMap;

use crate::config::ExtractConfig;
use crate::native::NativeValue;
use crate::value::{AttrBag, AttrValue};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// `bold`, `bolder` and numeric weights of 600 and up are bold.
    pub fn from_keyword(s: &str) -> Option<FontWeight> {
        match s {
            "normal" | "lighter" => Some(FontWeight::Normal),
            "bold" | "bolder" => Some(FontWeight::Bold),
            n => numeric_weight(n).map(FontWeight::from_number),
        }
    }

    pub fn from_number(n: u16) -> FontWeight {
        if n >= 600 { FontWeight::Bold } else { FontWeight::Normal }
    }

    pub fn name(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// `100`, `200`, … `900`.
fn numeric_weight(s: &str) -> Option<u16> {
    let n: u16 = s.parse().ok()?;
    ((100..=900).contains(&n) && n % 100 == 0 && s.len() == 3).then_some(n)
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    /// `oblique` is treated as italic.
    pub fn from_keyword(s: &str) -> Option<FontStyle> {
        match s {
            "normal" => Some(FontStyle::Normal),
            "italic" | "oblique" => Some(FontStyle::Italic),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontDescriptor {
    pub fn to_native(&self) -> NativeValue {
        let mut fields = BTreeMap::new();
        fields.insert("fontFamily".to_string(), NativeValue::str(&self.family));
        fields.insert("fontSize".to_string(), NativeValue::Number(self.size));
        fields.insert("fontWeight".to_string(), NativeValue::str(self.weight.name()));
        fields.insert("fontStyle".to_string(), NativeValue::str(self.style.name()));
        NativeValue::record(fields)
    }
}

/// First entry of a comma-separated family list, unquoted and trimmed.
pub fn first_family(list: &str) -> &str {
    list.split(',')
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

fn family_or_default(list: &str, config: &ExtractConfig) -> String {
    match first_family(list) {
        "" => config.default_font_family.clone(),
        family => family.to_string(),
    }
}

fn size_or_default(size: Option<f32>, config: &ExtractConfig) -> f32 {
    size.filter(|s| *s > 0.0).unwrap_or(config.default_font_size)
}

/// Splits off the first whitespace-delimited word.
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

fn starts_numeric(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// Reads `<number>[unit][/<line-height>]`, returning the number.
fn parse_size_token(word: &str) -> Option<f32> {
    let end = word
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(word.len());
    let n: f32 = word[..end].parse().ok()?;
    let unit = word[end..].split('/').next().unwrap_or_default();
    unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%').then_some(n)
}

/// Parses CSS `font` shorthand:
/// `[style || variant || weight]* [<size>[unit][/<line-height>]] <family>[, …]`.
///
/// Never fails; missing pieces take the configured defaults.
pub fn parse_font_shorthand(src: &str, config: &ExtractConfig) -> FontDescriptor {
    let mut weight = FontWeight::Normal;
    let mut style = FontStyle::Normal;
    let mut rest = src;

    // Style, variant and weight keywords, in any order.
    loop {
        let (word, after) = next_word(rest);
        if word.is_empty() {
            break;
        }
        let lower = word.to_ascii_lowercase();
        // A bare weight number is only a weight when a size follows it.
        if numeric_weight(&lower).is_some() && !starts_numeric(next_word(after).0) {
            break;
        }
        if let Some(w) = FontWeight::from_keyword(&lower) {
            if lower != "normal" {
                weight = w;
            }
        } else if let Some(s) = FontStyle::from_keyword(&lower) {
            if lower != "normal" {
                style = s;
            }
        } else if lower != "small-caps" {
            break;
        }
        rest = after;
    }

    let mut size = None;
    let (word, after) = next_word(rest);
    if starts_numeric(word) {
        if let Some(n) = parse_size_token(word) {
            size = Some(n);
            rest = after;
            // Detached line height: "12px / 14px" or "12px /14px".
            let (next, after_next) = next_word(rest);
            if next == "/" {
                rest = next_word(after_next).1;
            } else if next.starts_with('/') {
                rest = after_next;
            }
        }
    }

    FontDescriptor {
        family: family_or_default(rest, config),
        size: size_or_default(size, config),
        weight,
        style,
    }
}

/// Builds a font from individual `fontFamily`/`fontSize`/`fontWeight`/
/// `fontStyle` attributes (or a `font` object with the same keys).
pub fn font_from_fields(bag: &AttrBag, config: &ExtractConfig) -> FontDescriptor {
    let weight = match bag.get("fontWeight") {
        Some(AttrValue::Number(n)) => FontWeight::from_number(*n as u16),
        Some(AttrValue::Str(s)) => FontWeight::from_keyword(s.trim()).unwrap_or_else(|| {
            log::warn!("fontWeight: {s:?} is not a font weight, using normal");
            FontWeight::Normal
        }),
        _ => FontWeight::Normal,
    };
    let style = match bag.get_str("fontStyle") {
        Some(s) => FontStyle::from_keyword(s.trim()).unwrap_or_else(|| {
            log::warn!("fontStyle: {s:?} is not a font style, using normal");
            FontStyle::Normal
        }),
        None => FontStyle::Normal,
    };
    FontDescriptor {
        family: family_or_default(bag.get_str("fontFamily").unwrap_or_default(), config),
        size: size_or_default(bag.get_f32("fontSize"), config),
        weight,
        style,
    }
}
