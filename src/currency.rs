// Display currency conversion. Applied to final values only.
use crate::utils::group_thousands;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    UsDollar,
    Euro,
    Rupiah,
}

impl Currency {
    /// Fixed exchange rate from the dataset's base currency (USD).
    pub fn rate(self) -> f64 {
        match self {
            Currency::UsDollar => 1.0,
            Currency::Euro => 0.92,
            Currency::Rupiah => 15800.0,
        }
    }

    pub fn convert(self, amount_usd: f64) -> f64 {
        amount_usd * self.rate()
    }

    /// Formats an already converted amount, e.g. `€41,250`.
    pub fn format(self, amount: f64) -> String {
        let digits = group_thousands(amount);
        match self {
            Currency::UsDollar => format!("${}", digits),
            Currency::Euro => format!("€{}", digits),
            Currency::Rupiah => format!("Rp {}", digits),
        }
    }

    /// Converts a USD amount and formats it in this currency.
    pub fn display(self, amount_usd: f64) -> String {
        self.format(self.convert(amount_usd))
    }
}
