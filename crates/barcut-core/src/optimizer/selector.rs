use super::classify::Disposition;
use super::grouping::{Group, GroupKey};
use super::pool::{RemnantPool, WastePool};
use super::*;
use tracing::trace;

/// Mutable state of one group while its orders are being cut. Dropped with
/// whatever remnants are left once the group is done.
struct GroupRun {
    key: GroupKey,
    waste: WastePool,
    remnants: RemnantPool,
}

impl Optimizer {
    /// Cuts every order of an already sorted group, in order.
    pub(super) fn allocate_group(&self, group: Group, tally: &mut Tally) {
        let mut run = GroupRun {
            key: group.key,
            waste: WastePool::new(group.waste),
            remnants: RemnantPool::default(),
        };

        for order in &group.orders {
            let cut = self
                .cut_from_remnant(order, &mut run, tally)
                .or_else(|| self.cut_from_waste(order, &mut run, tally))
                .unwrap_or_else(|| self.cut_from_new_bar(order, &mut run, tally));

            trace!(
                order_id = %cut.order_id,
                source = %cut.source_type,
                source_id = ?cut.source_id,
                leftover_mm = cut.waste_created_mm,
                remnants = run.remnants.len(),
                waste_left = run.waste.len(),
                "order allocated"
            );
            tally.record(cut);
        }
    }

    /// Reuses the tightest leftover already produced in this group.
    fn cut_from_remnant(
        &self,
        order: &OrderItem,
        run: &mut GroupRun,
        tally: &mut Tally,
    ) -> Option<OptimizedCut> {
        let idx = run.remnants.best_fit(order.required_length_mm)?;
        let source = run.remnants.take(idx);
        let remnant = source.length_mm - order.required_length_mm;

        let disposition = self.thresholds().settle_on_line(remnant);
        if disposition == Disposition::Reuse {
            let id = tally.next_remnant_id();
            run.remnants.push(run.key.remnant(id, remnant));
        } else if disposition == Disposition::Scrap {
            tally.add_scrap(remnant);
        }

        Some(self.cut(order, SourceType::NewBarRemnant, None, remnant))
    }

    /// Consumes a warehouse offcut, preferring ones that leave no bad offcut.
    fn cut_from_waste(
        &self,
        order: &OrderItem,
        run: &mut GroupRun,
        tally: &mut Tally,
    ) -> Option<OptimizedCut> {
        let thresholds = self.thresholds();
        let idx = run.waste.best_fit(order.required_length_mm, &thresholds)?;
        let source = run.waste.take(idx);
        let remnant = source.length_mm - order.required_length_mm;

        match thresholds.settle_from_stock(remnant) {
            Disposition::Scrap => tally.add_scrap(remnant),
            Disposition::Reuse => {
                let id = format!("rem-{}", source.id);
                run.remnants.push(run.key.remnant(id, remnant));
            }
            Disposition::Dropped => {
                trace!(source_id = %source.id, remnant, "bad offcut left untracked");
            }
            Disposition::Nothing => {}
        }

        Some(self.cut(order, SourceType::Waste, Some(source.id), remnant))
    }

    /// Opens a fresh bar. Always succeeds for a validated order.
    fn cut_from_new_bar(
        &self,
        order: &OrderItem,
        run: &mut GroupRun,
        tally: &mut Tally,
    ) -> OptimizedCut {
        let remnant = self.request.full_bar_length_mm - order.required_length_mm;

        match self.thresholds().settle_on_line(remnant) {
            Disposition::Reuse => {
                let id = format!("newbar-{}", tally.next_bar_number());
                run.remnants.push(run.key.remnant(id, remnant));
            }
            Disposition::Scrap => tally.add_scrap(remnant),
            Disposition::Dropped | Disposition::Nothing => {}
        }

        self.cut(order, SourceType::NewBar, None, remnant)
    }

    fn cut(
        &self,
        order: &OrderItem,
        source_type: SourceType,
        source_id: Option<String>,
        remnant: i64,
    ) -> OptimizedCut {
        OptimizedCut {
            order_id: order.order_id.clone(),
            source_type,
            source_id,
            waste_created_mm: remnant,
            is_scrap: self.thresholds().is_scrap(remnant),
        }
    }
}
