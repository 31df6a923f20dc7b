use serde::{Deserialize, Deserializer, Serialize};

/// The label shown for a transaction without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The API's identifier for a transaction.
pub type TransactionId = i64;

/// A transaction owned by the ClaritySpend API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// The amount in dollars.
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
}

impl Transaction {
    /// The category to display, falling back to [UNCATEGORIZED] when the
    /// transaction has no category or an empty one.
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => category,
            _ => UNCATEGORIZED,
        }
    }
}

/// The body for creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
}

/// The body for changing a transaction's category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUpdate {
    pub category: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
