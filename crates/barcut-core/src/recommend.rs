use crate::types::{WasteItem, WasteRecommendationRequest, WasteRecommendationResponse};

const MATCH_SCORE: f64 = 0.95;

/// Suggests the single warehouse offcut that fits one piece most tightly.
///
/// Advisory only: nothing is reserved or removed, and an empty answer means
/// a new bar has to be opened.
pub fn recommend_waste(request: &WasteRecommendationRequest) -> WasteRecommendationResponse {
    let best = request
        .available_waste
        .iter()
        .filter(|item| {
            item.profile_code == request.profile_code
                && item.color == request.color
                && item.length_mm >= request.required_length_mm
        })
        .fold(None::<(&WasteItem, i64)>, |best, item| {
            let cutoff = item.length_mm - request.required_length_mm;
            match best {
                Some((_, best_cutoff)) if cutoff >= best_cutoff => best,
                _ => Some((item, cutoff)),
            }
        });

    match best {
        Some((item, cutoff)) => WasteRecommendationResponse {
            recommended_item_id: Some(item.id.clone()),
            waste_length_mm: item.length_mm,
            cutoff_waste_mm: cutoff,
            score: MATCH_SCORE,
            message: format!("Use offcut from location {}", item.location),
        },
        None => WasteRecommendationResponse {
            recommended_item_id: None,
            waste_length_mm: 0,
            cutoff_waste_mm: 0,
            score: 0.0,
            message: "No matching offcut. Use a new bar.".to_string(),
        },
    }
}
