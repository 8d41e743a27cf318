use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub type TransactionId = Uuid;

/// One sale event. Records are immutable once created; corrections are made
/// by removing the record and entering a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub name: String,
    pub quantity: u32,
    /// Unit price in whole currency units.
    pub price: f64,
    /// Creation instant, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Transaction {
    pub fn total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Body of an add request. Fields are kept as raw JSON so that wrongly typed
/// or missing values end up as a rejected entry instead of an extractor error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTransactionRequest {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub price: Value,
}

impl AddTransactionRequest {
    pub fn name(&self) -> &str {
        self.name.as_str().unwrap_or_default()
    }

    /// Whole-number quantity, accepting `2`, `2.0` and `"2"`.
    pub fn quantity(&self) -> Option<i64> {
        match &self.quantity {
            Value::Number(number) => number.as_i64().or_else(|| number.as_f64().and_then(whole)),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(whole))
            }
            _ => None,
        }
    }

    pub fn price(&self) -> Option<f64> {
        let price = match &self.price {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        price.filter(|price| price.is_finite())
    }
}

fn whole(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15).then_some(value as i64)
}

#[derive(Debug, Deserialize)]
pub struct ClearTodayRequest {
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayPoint {
    pub date: String,
    pub items: u64,
    pub sales: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub start_of_today: i64,
    pub start_of_week: i64,
    pub daily_transactions: Vec<Transaction>,
    pub weekly_transaction_count: usize,
    pub total_sales_today: f64,
    pub total_items_today: u64,
    pub total_sales_this_week: f64,
    pub weekly_target: f64,
    pub remaining_to_target: f64,
    pub show_warning: bool,
    pub week_days: Vec<DayPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddTransactionResponse {
    pub added: Option<Transaction>,
    pub summary: SummaryResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearTodayResponse {
    pub removed: usize,
    pub summary: SummaryResponse,
}

/// Fields as posted by the plain HTML form; numbers arrive as text and
/// anything unparsable is treated like an invalid entry.
#[derive(Debug, Deserialize)]
pub struct AddTransactionForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price: String,
}

impl From<AddTransactionForm> for AddTransactionRequest {
    fn from(form: AddTransactionForm) -> Self {
        Self {
            name: Value::String(form.name),
            quantity: Value::String(form.quantity),
            price: Value::String(form.price),
        }
    }
}
