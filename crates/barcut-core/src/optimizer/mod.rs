use crate::types::*;
use tracing::debug;

mod classify;
mod grouping;
mod pool;
mod selector;
mod summary;

pub use summary::BatchStats;

use classify::Thresholds;
use summary::Tally;

/// Allocates cut orders to in-run remnants, warehouse offcuts or new bars
/// using a three-tier greedy best-fit heuristic per (profile, color) group.
pub struct Optimizer {
    request: OptimizationRequest,
}

impl Optimizer {
    /// Validates requests and builds a new optimizer instance.
    ///
    /// A batch with a single invalid order is rejected as a whole.
    pub fn new(request: OptimizationRequest) -> Result<Self> {
        if request.full_bar_length_mm <= 0 {
            return Err(OptimizerError::InvalidBarLength(request.full_bar_length_mm));
        }

        for (field, value) in [
            ("full_bar_length_mm", request.full_bar_length_mm),
            ("min_usable_offcut_mm", request.min_usable_offcut_mm),
            ("scrap_threshold_mm", request.scrap_threshold_mm),
        ] {
            if value > MAX_LENGTH_MM {
                return Err(OptimizerError::LengthTooLarge { field, value });
            }
        }

        for order in &request.orders {
            if order.required_length_mm <= 0 {
                return Err(OptimizerError::InvalidOrderLength {
                    order_id: order.order_id.clone(),
                    required_length_mm: order.required_length_mm,
                });
            }

            if order.required_length_mm > request.full_bar_length_mm {
                return Err(OptimizerError::OrderExceedsBar {
                    order_id: order.order_id.clone(),
                    required_length_mm: order.required_length_mm,
                    full_bar_length_mm: request.full_bar_length_mm,
                });
            }
        }

        Ok(Self { request })
    }

    /// Runs the allocation over every group and returns one cut per order.
    ///
    /// Works on private copies of the request collections, so repeated calls
    /// yield identical responses.
    pub fn optimize(&self) -> OptimizationResponse {
        let groups = grouping::partition(&self.request.orders, &self.request.available_waste);
        let mut tally = Tally::with_capacity(self.request.orders.len());

        for mut group in groups {
            group.sort_for_allocation();
            debug!(
                profile_code = %group.key.profile_code,
                color = %group.key.color,
                orders = group.orders.len(),
                waste = group.waste.len(),
                "allocating group"
            );
            self.allocate_group(group, &mut tally);
        }

        tally.into_response()
    }

    fn thresholds(&self) -> Thresholds {
        Thresholds {
            scrap_threshold_mm: self.request.scrap_threshold_mm,
            min_usable_offcut_mm: self.request.min_usable_offcut_mm,
        }
    }
}
