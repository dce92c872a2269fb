/// Length limits that decide what happens to a leftover.
#[derive(Debug, Clone, Copy)]
pub(super) struct Thresholds {
    pub scrap_threshold_mm: i64,
    pub min_usable_offcut_mm: i64,
}

/// Fate of the leftover produced by a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Disposition {
    /// Exact cut, nothing left over
    Nothing,
    /// Counted towards the scrap total
    Scrap,
    /// Returns to the group's remnant pool
    Reuse,
    /// Neither reused nor counted
    Dropped,
}

impl Thresholds {
    pub fn is_scrap(&self, remnant: i64) -> bool {
        remnant > 0 && remnant < self.scrap_threshold_mm
    }

    /// Too long to be harmless scrap, too short to be useful stock.
    pub fn is_bad_offcut(&self, remnant: i64) -> bool {
        remnant > self.scrap_threshold_mm && remnant < self.min_usable_offcut_mm
    }

    /// Leftover of a new bar or an in-run remnant. Anything that is not scrap
    /// stays on the line.
    pub fn settle_on_line(&self, remnant: i64) -> Disposition {
        if remnant <= 0 {
            Disposition::Nothing
        } else if remnant >= self.scrap_threshold_mm {
            Disposition::Reuse
        } else {
            Disposition::Scrap
        }
    }

    /// Leftover of a warehouse offcut. Only usable lengths stay on the line;
    /// the band between the two thresholds is dropped.
    pub fn settle_from_stock(&self, remnant: i64) -> Disposition {
        if remnant <= 0 {
            Disposition::Nothing
        } else if remnant < self.scrap_threshold_mm {
            Disposition::Scrap
        } else if remnant >= self.min_usable_offcut_mm {
            Disposition::Reuse
        } else {
            Disposition::Dropped
        }
    }
}
