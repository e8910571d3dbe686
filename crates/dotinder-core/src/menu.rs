//! Menu catalog parsed from the restaurant's HTML page.
//!
//! The raw document is fingerprinted so a re-submission of identical
//! content is a no-op; the item list is only ever replaced atomically by
//! a fully successful parse.

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{BotError, Result};

/// A single orderable item.
///
/// Immutable once constructed; equality is by all fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Short alphanumeric code printed on the menu (e.g. "M12").
    /// Some items carry none.
    pub id: Option<String>,

    /// Display name, never empty.
    pub name: String,

    /// Price in currency units; absent when the price text did not parse.
    pub price: Option<f64>,
}

impl MenuItem {
    /// Create a new item.
    pub fn new(id: Option<String>, name: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.id {
            write!(f, "[{}] ", id)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(price) = self.price {
            write!(f, " ({:.2} Euro)", price)?;
        }
        Ok(())
    }
}

/// Outcome of feeding a raw document into [`Menu::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuUpdate {
    /// The source content was byte-identical to the last parsed one.
    Unchanged,
    /// The item list was replaced with a fresh parse.
    Replaced {
        /// Number of items in the new list.
        items: usize,
    },
}

/// Extraction patterns for the one supported HTML layout.
///
/// Items live in `menuItemBox` elements; each carries a `menuItemName`
/// text of the form `<code> - <name>` (code optional, separator may be a
/// hyphen or an en-dash) and a `menuItemPrice` text with a decimal comma.
struct MenuHtmlParser {
    name_text: Regex,
    price_text: Regex,
    name_line: Regex,
    price_number: Regex,
}

impl MenuHtmlParser {
    fn new() -> Self {
        Self {
            name_text: Regex::new(r#"menuItemName[^>]*>\s*([^<]+)"#)
                .expect("name extraction pattern is valid"),
            price_text: Regex::new(r#"menuItemPrice[^>]*>\s*([^<]+)"#)
                .expect("price extraction pattern is valid"),
            name_line: Regex::new(r"^(?:(?P<id>\w*\d+)\s*[-–]\s*)?(?P<name>(?:[\w\.-]{2,} ?)+)")
                .expect("name line pattern is valid"),
            price_number: Regex::new(r"(\d+(?:[.,]\d+)?)").expect("price pattern is valid"),
        }
    }

    /// Parse the full document into an item list.
    ///
    /// Item boxes whose name line does not match the expected shape are
    /// skipped; a document yielding zero items is a parse failure.
    fn parse(&self, raw: &str) -> Result<Vec<MenuItem>> {
        let mut items = Vec::new();

        // Each occurrence of the box class starts one item block; the
        // name and price live in the text up to the next block.
        for block in raw.split("menuItemBox").skip(1) {
            let Some(name_text) = self.capture(&self.name_text, block) else {
                continue;
            };
            let Some(caps) = self.name_line.captures(name_text.trim()) else {
                continue;
            };
            let Some(name) = caps.name("name").map(|m| m.as_str().trim()) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let id = caps.name("id").map(|m| m.as_str().to_string());

            let price = self
                .capture(&self.price_text, block)
                .and_then(|text| self.capture(&self.price_number, text))
                .and_then(|num| num.replace(',', ".").parse::<f64>().ok());

            items.push(MenuItem::new(id, name, price));
        }

        if items.is_empty() {
            return Err(BotError::MenuParse {
                message: "document contains no parseable menu items".to_string(),
            });
        }
        Ok(items)
    }

    fn capture<'a>(&self, pattern: &Regex, haystack: &'a str) -> Option<&'a str> {
        pattern
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// The parsed, addressable catalog of orderable items.
pub struct Menu {
    items: Vec<MenuItem>,
    fingerprint: Option<String>,
    parser: MenuHtmlParser,
}

impl Menu {
    /// Create an empty menu; no items until the first successful update.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            fingerprint: None,
            parser: MenuHtmlParser::new(),
        }
    }

    /// Feed a (possibly changed) raw document into the menu.
    ///
    /// Returns [`MenuUpdate::Unchanged`] when the content fingerprint
    /// matches the last parsed source. On parse failure the previous
    /// item list and fingerprint are left untouched.
    pub fn update(&mut self, raw: &str) -> Result<MenuUpdate> {
        let fingerprint = Self::fingerprint_of(raw);
        if self.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            debug!("menu source unchanged, skipping re-parse");
            return Ok(MenuUpdate::Unchanged);
        }

        let items = self.parser.parse(raw)?;
        let count = items.len();

        // Only committed once parsing succeeded.
        self.items = items;
        self.fingerprint = Some(fingerprint);
        debug!(items = count, "menu replaced from new source");
        Ok(MenuUpdate::Replaced { items: count })
    }

    /// Look up an item by its short code.
    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id.as_deref() == Some(id))
    }

    /// All items, in document order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Returns true once at least one source document parsed successfully.
    pub fn is_loaded(&self) -> bool {
        self.fingerprint.is_some()
    }

    fn fingerprint_of(raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <html><body>
        <div class="menuItemBox">
          <span class="menuItemName">62 - Butter Chicken</span>
          <span class="menuItemPrice">14,90 &euro;</span>
        </div>
        <div class="menuItemBox">
          <span class="menuItemName">M7 – Palak Paneer</span>
          <span class="menuItemPrice">12,50 &euro;</span>
        </div>
        <div class="menuItemBox">
          <span class="menuItemName">Mango Lassi</span>
          <span class="menuItemPrice">auf Anfrage</span>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_sample_document() {
        let mut menu = Menu::new();
        let update = menu.update(SAMPLE_HTML).unwrap();

        assert_eq!(update, MenuUpdate::Replaced { items: 3 });
        assert!(menu.is_loaded());

        let butter_chicken = menu.find("62").unwrap();
        assert_eq!(butter_chicken.name, "Butter Chicken");
        assert_eq!(butter_chicken.price, Some(14.9));

        // En-dash separator and letter-prefixed code.
        let palak = menu.find("M7").unwrap();
        assert_eq!(palak.name, "Palak Paneer");

        // No code, no parseable price.
        let lassi = &menu.items()[2];
        assert_eq!(lassi.id, None);
        assert_eq!(lassi.name, "Mango Lassi");
        assert_eq!(lassi.price, None);
    }

    #[test]
    fn test_reparse_identical_source_is_noop() {
        let mut menu = Menu::new();
        assert!(matches!(
            menu.update(SAMPLE_HTML).unwrap(),
            MenuUpdate::Replaced { .. }
        ));
        assert_eq!(menu.update(SAMPLE_HTML).unwrap(), MenuUpdate::Unchanged);
        assert_eq!(menu.items().len(), 3);
    }

    #[test]
    fn test_parse_failure_keeps_previous_menu() {
        let mut menu = Menu::new();
        menu.update(SAMPLE_HTML).unwrap();

        let err = menu.update("<html>maintenance page</html>").unwrap_err();
        assert!(err.keeps_menu());

        // Previous catalog still addressable.
        assert_eq!(menu.items().len(), 3);
        assert!(menu.find("62").is_some());

        // The failed update stored no fingerprint, so re-submitting the
        // known-good source is still recognized as unchanged.
        assert_eq!(menu.update(SAMPLE_HTML).unwrap(), MenuUpdate::Unchanged);
    }

    #[test]
    fn test_unknown_id_lookup() {
        let mut menu = Menu::new();
        menu.update(SAMPLE_HTML).unwrap();
        assert!(menu.find("999").is_none());
    }

    #[test]
    fn test_item_display() {
        let full = MenuItem::new(Some("62".to_string()), "Butter Chicken", Some(14.9));
        assert_eq!(full.to_string(), "[62] Butter Chicken (14.90 Euro)");

        let bare = MenuItem::new(None, "Mango Lassi", None);
        assert_eq!(bare.to_string(), "Mango Lassi");
    }

    #[test]
    fn test_empty_menu_is_not_loaded() {
        let menu = Menu::new();
        assert!(!menu.is_loaded());
        assert!(menu.find("62").is_none());
    }
}
