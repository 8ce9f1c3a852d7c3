//! Market domain models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::users::Role;

/// A marketplace listing as returned by the API.
///
/// The client never looks inside a listing; it only moves it around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketItem(pub Value);

impl MarketItem {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Result envelope of a listing endpoint: `{ "data": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingEnvelope {
    #[serde(default)]
    pub data: Option<Vec<MarketItem>>,
}

impl ListingEnvelope {
    pub fn with_items(items: Vec<MarketItem>) -> Self {
        Self { data: Some(items) }
    }

    /// Listings carried by the envelope; a missing `data` counts as none.
    pub fn into_items(self) -> Vec<MarketItem> {
        self.data.unwrap_or_default()
    }
}

/// Which upstream sources a role is entitled to browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPlan {
    Requests,
    Offers,
    /// Offers then requests, fetched concurrently.
    Both,
    Nothing,
}

impl FetchPlan {
    pub fn for_role(role: &Role) -> Self {
        match role {
            Role::Carrier => FetchPlan::Requests,
            Role::Provider => FetchPlan::Offers,
            Role::DualOperator => FetchPlan::Both,
            Role::Unknown(_) => FetchPlan::Nothing,
        }
    }
}

/// State exposed by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    pub items: Vec<MarketItem>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl Default for AggregationResult {
    /// A fresh aggregator reports loading until its first fetch settles.
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: true,
            error_message: None,
        }
    }
}

/// Serializable snapshot handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketView {
    pub data: Vec<MarketItem>,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<AggregationResult> for MarketView {
    fn from(result: AggregationResult) -> Self {
        Self {
            data: result.items,
            loading: result.is_loading,
            error: result.error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_plan_covers_every_role() {
        assert_eq!(FetchPlan::for_role(&Role::Carrier), FetchPlan::Requests);
        assert_eq!(FetchPlan::for_role(&Role::Provider), FetchPlan::Offers);
        assert_eq!(FetchPlan::for_role(&Role::DualOperator), FetchPlan::Both);
        assert_eq!(
            FetchPlan::for_role(&Role::Unknown("admin".into())),
            FetchPlan::Nothing
        );
    }

    #[test]
    fn test_envelope_missing_or_null_data_is_empty() {
        let missing: ListingEnvelope = serde_json::from_str("{}").unwrap();
        assert!(missing.into_items().is_empty());

        let null: ListingEnvelope = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(null.into_items().is_empty());
    }

    #[test]
    fn test_envelope_keeps_items_opaque_and_ordered() {
        let envelope: ListingEnvelope = serde_json::from_value(json!({
            "data": [{"id": "o1", "weight": 12}, "not-even-an-object", {"id": "o2"}],
            "meta": {"page": 1}
        }))
        .unwrap();

        let items = envelope.into_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_value()["weight"], 12);
        assert_eq!(items[1].as_value(), &json!("not-even-an-object"));
        assert_eq!(items[2].as_value()["id"], "o2");
    }

    #[test]
    fn test_market_view_wire_shape() {
        let view = MarketView::from(AggregationResult {
            items: vec![MarketItem::new(json!({"id": "r1"}))],
            is_loading: false,
            error_message: None,
        });
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"data": [{"id": "r1"}], "loading": false, "error": null})
        );
    }
}
