use serde::{Deserialize, Serialize};

/// Location tag given to leftovers created on the line during a batch.
pub const PRODUCTION_LINE: &str = "PRODUCTION_LINE";

/// Upper bound for bar length and thresholds (one kilometre). Keeps every
/// running total far away from `i64` overflow.
pub const MAX_LENGTH_MM: i64 = 1_000_000;

const DEFAULT_FULL_BAR_LENGTH_MM: i64 = 6500;
const DEFAULT_MIN_USABLE_OFFCUT_MM: i64 = 500;
const DEFAULT_SCRAP_THRESHOLD_MM: i64 = 200;
const DEFAULT_PRIORITY: i32 = 1;

/// Offcut of profile stock, either sitting in the warehouse or produced
/// earlier in the same batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteItem {
    pub id: String,
    pub location: String,
    pub length_mm: i64,
    pub profile_code: String,
    pub color: String,
}

/// A single piece that has to be cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: String,
    pub profile_code: String,
    pub color: String,
    pub required_length_mm: i64,
    /// 1 (low) to 5 (high)
    #[serde(default = "default_priority")]
    pub priority: i32,
}

/// Where the material for a cut came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// Leftover of a bar or offcut already cut earlier in this batch
    NewBarRemnant,
    /// Physical offcut taken from the warehouse
    Waste,
    /// Freshly opened full-length bar
    NewBar,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::NewBarRemnant => "NEW_BAR_REMNANT",
            SourceType::Waste => "WASTE",
            SourceType::NewBar => "NEW_BAR",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input: orders to cut, warehouse offcuts and the cutting thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub orders: Vec<OrderItem>,
    #[serde(default)]
    pub available_waste: Vec<WasteItem>,
    #[serde(default = "default_full_bar_length")]
    pub full_bar_length_mm: i64,
    /// Leftovers at or above this length are worth keeping
    #[serde(default = "default_min_usable_offcut")]
    pub min_usable_offcut_mm: i64,
    /// Leftovers below this length are trash
    #[serde(default = "default_scrap_threshold")]
    pub scrap_threshold_mm: i64,
}

/// Assignment of one order to its source material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedCut {
    pub order_id: String,
    pub source_type: SourceType,
    /// Consumed warehouse item, only set for [`SourceType::Waste`]
    pub source_id: Option<String>,
    pub waste_created_mm: i64,
    pub is_scrap: bool,
}

/// Output: one cut per order plus running totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationResponse {
    pub cuts: Vec<OptimizedCut>,
    pub total_waste_used_count: u32,
    pub total_new_bars_count: u32,
    pub total_scrap_generated_mm: i64,
}

/// Lookup of the single tightest warehouse offcut for one piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteRecommendationRequest {
    pub profile_code: String,
    pub color: String,
    pub required_length_mm: i64,
    #[serde(default)]
    pub available_waste: Vec<WasteItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRecommendationResponse {
    pub recommended_item_id: Option<String>,
    pub waste_length_mm: i64,
    pub cutoff_waste_mm: i64,
    pub score: f64,
    pub message: String,
}

/// Error type for optimization
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("Invalid input: full bar length must be positive, got {0} mm")]
    InvalidBarLength(i64),

    #[error("Invalid input: {field} is {value} mm, at most {max} mm is supported", max = MAX_LENGTH_MM)]
    LengthTooLarge { field: &'static str, value: i64 },

    #[error("Invalid input: order '{order_id}' requires {required_length_mm} mm, length must be positive")]
    InvalidOrderLength {
        order_id: String,
        required_length_mm: i64,
    },

    #[error("Invalid input: order '{order_id}' requires {required_length_mm} mm, longer than the {full_bar_length_mm} mm bar")]
    OrderExceedsBar {
        order_id: String,
        required_length_mm: i64,
        full_bar_length_mm: i64,
    },
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

fn default_full_bar_length() -> i64 {
    DEFAULT_FULL_BAR_LENGTH_MM
}

fn default_min_usable_offcut() -> i64 {
    DEFAULT_MIN_USABLE_OFFCUT_MM
}

fn default_scrap_threshold() -> i64 {
    DEFAULT_SCRAP_THRESHOLD_MM
}
