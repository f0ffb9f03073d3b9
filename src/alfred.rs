//! Alfred Script Filter output format.

use std::fmt::Display;
use std::io::{self, Write};

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

pub const ICON_PATH: &str = "icon.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub path: String,
}

impl Icon {
    pub fn workflow() -> Self {
        Self {
            path: ICON_PATH.to_owned(),
        }
    }
}

/// A single result row in Alfred's Script Filter format.
/// This shape is consumed by the workflow as-is and must not be altered.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Getters, CopyGetters, Serialize, Deserialize)]
pub struct Item {
    #[getset(get = "pub")]
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uid: Option<String>,
    #[getset(get = "pub")]
    #[builder(setter(into))]
    title: String,
    #[getset(get = "pub")]
    #[builder(default, setter(into))]
    #[serde(default)]
    subtitle: String,
    #[getset(get = "pub")]
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arg: Option<String>,
    #[getset(get = "pub")]
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    autocomplete: Option<String>,
    #[getset(get = "pub")]
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<Icon>,
    #[getset(get_copy = "pub")]
    valid: bool,
}

impl Item {
    /// An informational row shown to the user (not actionable).
    pub fn message(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self::builder()
            .title(title)
            .subtitle(subtitle)
            .valid(false)
            .build()
    }

    pub fn error(message: impl Display) -> Self {
        Self::message("Error", message.to_string())
    }
}

/// Conversion of a domain record into its Alfred presentation.
pub trait AsItem {
    fn as_item(&self) -> Item;
}

#[derive(Debug, Serialize)]
struct Response<'a> {
    items: &'a [Item],
}

pub fn write_items(mut writer: impl Write, items: &[Item]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, &Response { items })?;
    writeln!(writer)?;
    Ok(())
}

/// Emits the one-and-only JSON envelope for this invocation to stdout.
pub fn output(items: &[Item]) -> anyhow::Result<()> {
    write_items(io::stdout().lock(), items)
}

#[cfg(test)]
mod tests {
    use super::{write_items, Icon, Item};

    #[test]
    fn empty_envelope() {
        let mut buf = Vec::new();
        write_items(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"items\": []\n}\n");
    }

    #[test]
    fn message_item_omits_optional_fields() {
        let item = Item::error("Unsupported search type: shows");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Error",
                "subtitle": "Unsupported search type: shows",
                "valid": false,
            })
        );
    }

    #[test]
    fn full_item_round_trips() {
        let item = Item::builder()
            .uid("letterboxd-film-the-matrix")
            .title("The Matrix (1999)")
            .subtitle("Director: Wachowskis")
            .arg("https://letterboxd.com/film/the-matrix/")
            .autocomplete("The Matrix")
            .icon(Icon::workflow())
            .valid(true)
            .build();
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
