use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A required field was absent or empty on a decoded record.
#[derive(Error, Debug)]
#[error("missing required field `{0}`")]
pub struct MissingField(pub &'static str);

/// Optimized image metadata attached to an event or market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageOptimization {
    pub id: Option<String>,

    #[serde(rename = "imageUrlSource")]
    pub image_url_source: Option<String>,

    #[serde(rename = "imageUrlOptimized")]
    pub image_url_optimized: Option<String>,

    #[serde(rename = "imageSizeKbSource")]
    pub image_size_kb_source: Option<f64>,

    #[serde(rename = "imageSizeKbOptimized")]
    pub image_size_kb_optimized: Option<f64>,

    #[serde(rename = "imageOptimizedComplete")]
    pub image_optimized_complete: Option<bool>,

    #[serde(rename = "imageOptimizedLastUpdated")]
    pub image_optimized_last_updated: Option<String>,

    #[serde(rename = "relID")]
    pub rel_id: Option<i64>,

    pub field: Option<String>,
    pub relname: Option<String>,
}

/// Tag attached to an event or market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<String>,
    pub label: Option<String>,
    pub slug: Option<String>,

    #[serde(rename = "forceShow")]
    pub force_show: Option<bool>,

    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,

    #[serde(rename = "createdBy")]
    pub created_by: Option<i64>,

    #[serde(rename = "updatedBy")]
    pub updated_by: Option<i64>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "forceHide")]
    pub force_hide: Option<bool>,

    #[serde(rename = "isCarousel")]
    pub is_carousel: Option<bool>,
}

/// Category attached to an event or market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<String>,
    pub label: Option<String>,

    #[serde(rename = "parentCategory")]
    pub parent_category: Option<String>,

    pub slug: Option<String>,

    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,

    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,

    #[serde(rename = "updatedBy")]
    pub updated_by: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Series an event belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub id: Option<String>,
    pub ticker: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,

    #[serde(rename = "seriesType")]
    pub series_type: Option<String>,

    pub recurrence: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub layout: Option<String>,

    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub archived: Option<bool>,
    pub new: Option<bool>,
    pub featured: Option<bool>,
    pub restricted: Option<bool>,

    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,

    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,

    #[serde(rename = "updatedBy")]
    pub updated_by: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "commentsEnabled")]
    pub comments_enabled: Option<bool>,

    // Upstream sends this as a string on series, unlike events
    pub competitive: Option<String>,

    #[serde(rename = "volume24hr")]
    pub volume_24hr: Option<f64>,

    pub volume: Option<f64>,
    pub liquidity: Option<f64>,

    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(rename = "commentCount")]
    pub comment_count: Option<i64>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Creator of an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreator {
    pub id: Option<String>,

    #[serde(rename = "creatorName")]
    pub creator_name: Option<String>,

    #[serde(rename = "creatorHandle")]
    pub creator_handle: Option<String>,

    #[serde(rename = "creatorUrl")]
    pub creator_url: Option<String>,

    #[serde(rename = "creatorImage")]
    pub creator_image: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Market from the Gamma API, owned by exactly one [`Event`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    /// Required. A missing id decodes to `""` and fails [`Market::validate`].
    #[serde(default)]
    pub id: String,

    pub question: Option<String>,

    #[serde(rename = "conditionId")]
    pub condition_id: Option<String>,

    pub slug: Option<String>,

    #[serde(rename = "resolutionSource")]
    pub resolution_source: Option<String>,

    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,

    pub description: Option<String>,

    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub archived: Option<bool>,

    #[serde(rename = "marketType")]
    pub market_type: Option<String>,

    #[serde(rename = "rewardsMinSize")]
    pub rewards_min_size: Option<f64>,

    #[serde(rename = "rewardsMaxSpread")]
    pub rewards_max_spread: Option<f64>,

    // Outcomes, prices, volume, liquidity and clob token ids arrive as
    // opaque JSON-encoded strings. They are kept verbatim, never parsed.
    pub outcomes: Option<String>,

    #[serde(rename = "outcomePrices")]
    pub outcome_prices: Option<String>,

    pub volume: Option<String>,
    pub liquidity: Option<String>,

    pub category: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdBy")]
    pub created_by: Option<i64>,

    #[serde(rename = "updatedBy")]
    pub updated_by: Option<i64>,

    #[serde(rename = "marketMakerAddress")]
    pub market_maker_address: Option<String>,

    pub new: Option<bool>,
    pub featured: Option<bool>,
    pub restricted: Option<bool>,

    #[serde(rename = "volumeNum")]
    pub volume_num: Option<f64>,

    #[serde(rename = "liquidityNum")]
    pub liquidity_num: Option<f64>,

    #[serde(rename = "volume24hr")]
    pub volume_24hr: Option<f64>,

    #[serde(rename = "volume1wk")]
    pub volume_1wk: Option<f64>,

    #[serde(rename = "volume1mo")]
    pub volume_1mo: Option<f64>,

    #[serde(rename = "volume1yr")]
    pub volume_1yr: Option<f64>,

    #[serde(rename = "enableOrderBook")]
    pub enable_order_book: Option<bool>,

    #[serde(rename = "clobTokenIds")]
    pub clob_token_ids: Option<String>,

    pub competitive: Option<f64>,
    pub spread: Option<f64>,

    #[serde(rename = "lastTradePrice")]
    pub last_trade_price: Option<f64>,

    #[serde(rename = "bestBid")]
    pub best_bid: Option<f64>,

    #[serde(rename = "bestAsk")]
    pub best_ask: Option<f64>,

    #[serde(rename = "imageOptimized")]
    pub image_optimized: Option<ImageOptimization>,

    #[serde(rename = "iconOptimized")]
    pub icon_optimized: Option<ImageOptimization>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(rename = "commentsEnabled")]
    pub comments_enabled: Option<bool>,
}

impl Market {
    /// Check required fields after decode.
    pub fn validate(&self) -> Result<(), MissingField> {
        if self.id.is_empty() {
            return Err(MissingField("id"));
        }
        Ok(())
    }
}

/// Event from the Gamma API (contains markets)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Required. A missing id decodes to `""` and fails [`Event::validate`].
    #[serde(default)]
    pub id: String,

    pub ticker: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,

    #[serde(rename = "resolutionSource")]
    pub resolution_source: Option<String>,

    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(rename = "creationDate")]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,

    pub image: Option<String>,
    pub icon: Option<String>,

    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub archived: Option<bool>,
    pub new: Option<bool>,
    pub featured: Option<bool>,
    pub restricted: Option<bool>,

    pub liquidity: Option<f64>,
    pub volume: Option<f64>,

    #[serde(rename = "openInterest")]
    pub open_interest: Option<f64>,

    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,

    pub category: Option<String>,
    pub subcategory: Option<String>,

    // Snake case upstream, unlike every other timestamp-ish key here
    pub published_at: Option<String>,

    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,

    #[serde(rename = "updatedBy")]
    pub updated_by: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "commentsEnabled")]
    pub comments_enabled: Option<bool>,

    pub competitive: Option<f64>,

    #[serde(rename = "volume24hr")]
    pub volume_24hr: Option<f64>,

    #[serde(rename = "volume1wk")]
    pub volume_1wk: Option<f64>,

    #[serde(rename = "volume1mo")]
    pub volume_1mo: Option<f64>,

    #[serde(rename = "volume1yr")]
    pub volume_1yr: Option<f64>,

    #[serde(rename = "featuredImage")]
    pub featured_image: Option<String>,

    #[serde(rename = "enableOrderBook")]
    pub enable_order_book: Option<bool>,

    #[serde(rename = "liquidityAmm")]
    pub liquidity_amm: Option<f64>,

    #[serde(rename = "liquidityClob")]
    pub liquidity_clob: Option<f64>,

    #[serde(rename = "negRisk")]
    pub neg_risk: Option<bool>,

    #[serde(rename = "negRiskMarketID")]
    pub neg_risk_market_id: Option<String>,

    #[serde(rename = "commentCount")]
    pub comment_count: Option<i64>,

    #[serde(rename = "imageOptimized")]
    pub image_optimized: Option<ImageOptimization>,

    #[serde(rename = "iconOptimized")]
    pub icon_optimized: Option<ImageOptimization>,

    #[serde(rename = "featuredImageOptimized")]
    pub featured_image_optimized: Option<ImageOptimization>,

    #[serde(rename = "subEvents", default)]
    pub sub_events: Vec<String>,

    #[serde(default)]
    pub markets: Vec<Market>,

    #[serde(default)]
    pub series: Vec<Series>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    pub cyom: Option<bool>,

    #[serde(rename = "closedTime")]
    pub closed_time: Option<DateTime<Utc>>,

    #[serde(rename = "showAllOutcomes")]
    pub show_all_outcomes: Option<bool>,

    #[serde(rename = "showMarketImages")]
    pub show_market_images: Option<bool>,

    #[serde(rename = "enableNegRisk")]
    pub enable_neg_risk: Option<bool>,

    #[serde(rename = "seriesSlug")]
    pub series_slug: Option<String>,

    pub live: Option<bool>,
    pub ended: Option<bool>,

    #[serde(rename = "eventCreators", default)]
    pub event_creators: Vec<EventCreator>,
}

impl Event {
    /// Check required fields after decode. Nested markets are validated
    /// separately so the caller can report which one failed.
    pub fn validate(&self) -> Result<(), MissingField> {
        if self.id.is_empty() {
            return Err(MissingField("id"));
        }
        Ok(())
    }
}

/// Response from the events endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEventsResponse {
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_validate_requires_id() {
        let event: Event = serde_json::from_str(r#"{"title": "No id here"}"#).unwrap();
        let err = event.validate().unwrap_err();
        assert_eq!(err.to_string(), "missing required field `id`");

        let event: Event = serde_json::from_str(r#"{"id": "123"}"#).unwrap();
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_market_numeric_strings_kept_verbatim() {
        let market: Market = serde_json::from_str(
            r#"{
                "id": "m-1",
                "volume": "10000.5",
                "liquidity": "5000",
                "outcomes": "[\"Yes\", \"No\"]",
                "clobTokenIds": "[\"111\", \"222\"]"
            }"#,
        )
        .unwrap();

        assert!(market.validate().is_ok());
        assert_eq!(market.volume.as_deref(), Some("10000.5"));
        assert_eq!(market.liquidity.as_deref(), Some("5000"));
        assert_eq!(market.outcomes.as_deref(), Some(r#"["Yes", "No"]"#));
        assert_eq!(market.clob_token_ids.as_deref(), Some(r#"["111", "222"]"#));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let event: Event = serde_json::from_str(
            r#"{"id": "1", "title": "T", "someBrandNewField": {"nested": true}}"#,
        )
        .unwrap();
        assert_eq!(event.id, "1");
        assert_eq!(event.title.as_deref(), Some("T"));
    }
}
