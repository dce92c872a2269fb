use crate::types::*;
use serde::{Deserialize, Serialize};

/// Running totals collected while allocating a batch.
#[derive(Debug, Default)]
pub(super) struct Tally {
    cuts: Vec<OptimizedCut>,
    waste_used: u32,
    new_bars: u32,
    scrap_mm: i64,
    remnant_seq: u32,
}

impl Tally {
    pub fn with_capacity(orders: usize) -> Self {
        Self {
            cuts: Vec::with_capacity(orders),
            ..Self::default()
        }
    }

    pub fn record(&mut self, cut: OptimizedCut) {
        match cut.source_type {
            SourceType::Waste => self.waste_used += 1,
            SourceType::NewBar => self.new_bars += 1,
            SourceType::NewBarRemnant => {}
        }
        self.cuts.push(cut);
    }

    pub fn add_scrap(&mut self, remnant: i64) {
        self.scrap_mm += remnant;
    }

    /// Number of bars opened so far, including one about to be recorded.
    pub fn next_bar_number(&self) -> u32 {
        self.new_bars + 1
    }

    pub fn next_remnant_id(&mut self) -> String {
        self.remnant_seq += 1;
        format!("virt-{}", self.remnant_seq)
    }

    pub fn into_response(self) -> OptimizationResponse {
        OptimizationResponse {
            cuts: self.cuts,
            total_waste_used_count: self.waste_used,
            total_new_bars_count: self.new_bars,
            total_scrap_generated_mm: self.scrap_mm,
        }
    }
}

/// Yield figures derived from a finished response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total_cuts: usize,
    pub from_remnants: usize,
    pub from_waste: usize,
    pub from_new_bars: usize,
    pub scrap_cuts: usize,
    pub scrap_mm: i64,
}

impl BatchStats {
    pub fn from_response(response: &OptimizationResponse) -> Self {
        let mut stats = BatchStats {
            total_cuts: response.cuts.len(),
            scrap_mm: response.total_scrap_generated_mm,
            ..Default::default()
        };

        for cut in &response.cuts {
            match cut.source_type {
                SourceType::NewBarRemnant => stats.from_remnants += 1,
                SourceType::Waste => stats.from_waste += 1,
                SourceType::NewBar => stats.from_new_bars += 1,
            }
            if cut.is_scrap {
                stats.scrap_cuts += 1;
            }
        }

        stats
    }

    /// Share of cuts served without opening a new bar, in percent.
    pub fn reuse_percentage(&self) -> f64 {
        if self.total_cuts == 0 {
            return 0.0;
        }
        ((self.from_remnants + self.from_waste) as f64 / self.total_cuts as f64) * 100.0
    }
}
