use crate::types::{OrderItem, WasteItem, PRODUCTION_LINE};
use std::collections::HashMap;

/// Orders and offcuts only ever meet when profile and color both match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct GroupKey {
    pub profile_code: String,
    pub color: String,
}

impl GroupKey {
    fn of_order(order: &OrderItem) -> Self {
        Self {
            profile_code: order.profile_code.clone(),
            color: order.color.clone(),
        }
    }

    fn of_waste(item: &WasteItem) -> Self {
        Self {
            profile_code: item.profile_code.clone(),
            color: item.color.clone(),
        }
    }

    /// Builds a leftover that lives on the production line for this group.
    pub fn remnant(&self, id: String, length_mm: i64) -> WasteItem {
        WasteItem {
            id,
            location: PRODUCTION_LINE.to_string(),
            length_mm,
            profile_code: self.profile_code.clone(),
            color: self.color.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct Group {
    pub key: GroupKey,
    pub orders: Vec<OrderItem>,
    pub waste: Vec<WasteItem>,
}

impl Group {
    fn new(key: GroupKey) -> Self {
        Self {
            key,
            orders: Vec::new(),
            waste: Vec::new(),
        }
    }

    /// Orders by descending priority then descending length, waste by
    /// ascending length. Both sorts are stable.
    pub fn sort_for_allocation(&mut self) {
        self.orders.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.required_length_mm.cmp(&a.required_length_mm))
        });
        self.waste.sort_by_key(|item| item.length_mm);
    }
}

/// Splits the batch into groups in order of first appearance among the
/// orders. Offcuts whose key has no orders are left out.
pub(super) fn partition(orders: &[OrderItem], waste: &[WasteItem]) -> Vec<Group> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for order in orders {
        let key = GroupKey::of_order(order);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(Group::new(key));
            groups.len() - 1
        });
        groups[slot].orders.push(order.clone());
    }

    for item in waste {
        if let Some(&slot) = index.get(&GroupKey::of_waste(item)) {
            groups[slot].waste.push(item.clone());
        }
    }

    groups
}
