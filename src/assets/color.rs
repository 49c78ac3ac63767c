//! JSON representations for card colors.
//!
//! Colors accept `"#rrggbb"`, `"#rrggbbaa"`, `[r, g, b]` or `[r, g, b, a]` (0..=255 integers).
//! They serialize back as integer arrays so `--print-config` output can be fed to `--config`.

use crate::foundation::core::{Rgb8, Rgba8};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Hex(String),
    Arr(Vec<u8>),
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.r, self.g, self.b, self.a].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Rgba8::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.r, self.g, self.b].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let c = match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom)?,
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Rgba8::new(*r, *g, *b, 255),
                _ => {
                    return Err(serde::de::Error::custom(
                        "rgb array must have len 3 ([r,g,b])",
                    ));
                }
            },
        };
        if c.a != 255 {
            return Err(serde::de::Error::custom("rgb color must be opaque"));
        }
        Ok(Rgb8::new(c.r, c.g, c.b))
    }
}

pub(crate) fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let Some(hex) = s.strip_prefix('#') else {
        return Err(format!("color '{s}' must start with '#'"));
    };
    if !hex.is_ascii() {
        return Err(format!("color '{s}' is not valid hex"));
    }

    let channel = |i: usize| -> Result<u8, String> {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("color '{s}' is not valid hex"))
    };

    match hex.len() {
        6 => Ok(Rgba8::new(channel(0)?, channel(2)?, channel(4)?, 255)),
        8 => Ok(Rgba8::new(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            channel(6)?,
        )),
        _ => Err(format!(
            "color '{s}' must be #rrggbb or #rrggbbaa (got {} hex digits)",
            hex.len()
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
