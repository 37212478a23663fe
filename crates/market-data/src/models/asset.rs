use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The fixed look-back windows a source reports percentage changes for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeWindow {
    OneHour,
    TwentyFourHours,
    SevenDays,
}

impl ChangeWindow {
    /// All windows, shortest first.
    pub const ALL: [ChangeWindow; 3] = [
        ChangeWindow::OneHour,
        ChangeWindow::TwentyFourHours,
        ChangeWindow::SevenDays,
    ];

    /// Short column label ("1 h", "24 h", "7 d").
    pub fn label(self) -> &'static str {
        match self {
            ChangeWindow::OneHour => "1 h",
            ChangeWindow::TwentyFourHours => "24 h",
            ChangeWindow::SevenDays => "7 d",
        }
    }
}

/// One asset as delivered by a market data source, before any display shaping.
///
/// A `None` change means the source has no figure for that window. It is not
/// the same thing as a 0% move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssetRecord {
    /// Source-unique identifier (e.g. "bitcoin")
    pub id: String,

    /// Ticker symbol, when the source reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Human readable name
    pub name: String,

    /// Current price in the quote currency. This type does not check the
    /// sign; sources drop entries with a negative price before building one
    /// (see `parse_markets`).
    pub price: Decimal,

    #[serde(default)]
    pub change_1h: Option<Decimal>,

    #[serde(default)]
    pub change_24h: Option<Decimal>,

    #[serde(default)]
    pub change_7d: Option<Decimal>,
}

impl RawAssetRecord {
    /// Create a record with no symbol and no change figures.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            symbol: None,
            name: name.into(),
            price,
            change_1h: None,
            change_24h: None,
            change_7d: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the change figure for one window.
    pub fn with_change(mut self, window: ChangeWindow, value: Decimal) -> Self {
        match window {
            ChangeWindow::OneHour => self.change_1h = Some(value),
            ChangeWindow::TwentyFourHours => self.change_24h = Some(value),
            ChangeWindow::SevenDays => self.change_7d = Some(value),
        }
        self
    }

    /// The change figure for `window`, if the source reported one.
    pub fn change(&self, window: ChangeWindow) -> Option<Decimal> {
        match window {
            ChangeWindow::OneHour => self.change_1h,
            ChangeWindow::TwentyFourHours => self.change_24h,
            ChangeWindow::SevenDays => self.change_7d,
        }
    }
}
