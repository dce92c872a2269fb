use super::classify::Thresholds;
use crate::types::WasteItem;

/// Leftovers produced while cutting the current group. Kept in insertion
/// order, which is also the tie-break order for best fit.
#[derive(Debug, Default)]
pub(super) struct RemnantPool {
    items: Vec<WasteItem>,
}

impl RemnantPool {
    /// Index of the remnant leaving the smallest leftover, first one on ties.
    pub fn best_fit(&self, required_mm: i64) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;

        for (idx, item) in self.items.iter().enumerate() {
            if item.length_mm < required_mm {
                continue;
            }
            let remnant = item.length_mm - required_mm;
            match best {
                Some((_, best_remnant)) if remnant >= best_remnant => {}
                _ => best = Some((idx, remnant)),
            }
        }

        best.map(|(idx, _)| idx)
    }

    pub fn take(&mut self, idx: usize) -> WasteItem {
        self.items.remove(idx)
    }

    pub fn push(&mut self, item: WasteItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Warehouse offcuts of one group, sorted ascending by length. An item
/// leaves the pool for good once taken.
#[derive(Debug)]
pub(super) struct WastePool {
    items: Vec<WasteItem>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    idx: usize,
    remnant: i64,
    bad: bool,
}

impl WastePool {
    pub fn new(items: Vec<WasteItem>) -> Self {
        Self { items }
    }

    /// Picks the tightest offcut whose leftover is not a bad offcut. Falls
    /// back to the tightest bad one only when nothing else fits.
    pub fn best_fit(&self, required_mm: i64, thresholds: &Thresholds) -> Option<usize> {
        let mut best: Option<Candidate> = None;

        for (idx, item) in self.items.iter().enumerate() {
            if item.length_mm < required_mm {
                continue;
            }
            let remnant = item.length_mm - required_mm;
            let candidate = Candidate {
                idx,
                remnant,
                bad: thresholds.is_bad_offcut(remnant),
            };

            let better = match best {
                None => true,
                Some(current) => match (current.bad, candidate.bad) {
                    (true, false) => true,
                    (false, true) => false,
                    _ => candidate.remnant < current.remnant,
                },
            };
            if better {
                best = Some(candidate);
            }
        }

        best.map(|c| c.idx)
    }

    pub fn take(&mut self, idx: usize) -> WasteItem {
        self.items.remove(idx)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: Thresholds = Thresholds {
        scrap_threshold_mm: 200,
        min_usable_offcut_mm: 500,
    };

    fn item(id: &str, length: i64) -> WasteItem {
        WasteItem {
            id: id.to_string(),
            location: "R1".to_string(),
            length_mm: length,
            profile_code: "P1".to_string(),
            color: "White".to_string(),
        }
    }

    #[test]
    fn test_remnant_best_fit_prefers_tightest() {
        let mut pool = RemnantPool::default();
        pool.push(item("a", 3000));
        pool.push(item("b", 1200));
        pool.push(item("c", 1800));

        assert_eq!(pool.best_fit(1000), Some(1));
        assert_eq!(pool.best_fit(1500), Some(2));
        assert_eq!(pool.best_fit(3001), None);
    }

    #[test]
    fn test_remnant_best_fit_ties_keep_insertion_order() {
        let mut pool = RemnantPool::default();
        pool.push(item("first", 1500));
        pool.push(item("second", 1500));

        assert_eq!(pool.best_fit(1000), Some(0));
        assert_eq!(pool.take(0).id, "first");
        assert_eq!(pool.best_fit(1000), Some(0));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_waste_best_fit_avoids_bad_offcuts() {
        // leftovers: 300 (bad), 1000 (usable)
        let pool = WastePool::new(vec![item("w1", 1300), item("w2", 2000)]);

        assert_eq!(pool.best_fit(1000, &DEFAULTS), Some(1));
    }

    #[test]
    fn test_waste_best_fit_scrap_leftover_counts_as_good() {
        // leftovers: 100 (scrap), 600 (usable)
        let pool = WastePool::new(vec![item("w1", 1100), item("w2", 1600)]);

        assert_eq!(pool.best_fit(1000, &DEFAULTS), Some(0));
    }

    #[test]
    fn test_waste_best_fit_falls_back_to_tightest_bad() {
        // leftovers: 250, 400, both bad
        let pool = WastePool::new(vec![item("w1", 1250), item("w2", 1400)]);

        assert_eq!(pool.best_fit(1000, &DEFAULTS), Some(0));
    }

    #[test]
    fn test_waste_best_fit_ignores_short_items() {
        let pool = WastePool::new(vec![item("w1", 400), item("w2", 999)]);

        assert_eq!(pool.best_fit(1000, &DEFAULTS), None);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_waste_best_fit_ties_keep_scan_order() {
        let pool = WastePool::new(vec![item("w1", 1600), item("w2", 1600)]);

        assert_eq!(pool.best_fit(1000, &DEFAULTS), Some(0));
    }
}
