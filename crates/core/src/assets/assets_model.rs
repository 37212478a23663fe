//! Asset display model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use coinboard_market_data::ChangeWindow;

use crate::utils::format_utils::{format_percentage, format_price};

/// One row of the asset list, ready to render.
///
/// Built from a raw record plus a favorites lookup by
/// [`normalize`](crate::assets::normalize). The only field that changes
/// between refreshes is `is_favorite`, and only through
/// [`apply_favorite_flags`](crate::assets::apply_favorite_flags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAsset {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub name: String,
    pub price: Decimal,
    pub change_1h: Option<Decimal>,
    pub change_24h: Option<Decimal>,
    pub change_7d: Option<Decimal>,
    pub is_favorite: bool,
}

impl DisplayAsset {
    pub fn change(&self, window: ChangeWindow) -> Option<Decimal> {
        match window {
            ChangeWindow::OneHour => self.change_1h,
            ChangeWindow::TwentyFourHours => self.change_24h,
            ChangeWindow::SevenDays => self.change_7d,
        }
    }

    /// Price with exactly two decimals.
    pub fn price_display(&self) -> String {
        format_price(self.price)
    }

    /// Change with two decimals and a percent sign, or "N/A" when unknown.
    pub fn change_display(&self, window: ChangeWindow) -> String {
        format_percentage(self.change(window))
    }
}
