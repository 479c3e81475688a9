//! Health-profile driven product recommendations.
//!
//! Products tagged for one of the user's goals come first, in catalog
//! order. Anything whose ingredients mention a declared allergen is dropped.
//! Short lists are padded with the best-rated remaining products.

use wellnest_core::onboarding::HealthProfile;

use crate::db::ProductTable;
use crate::models::Product;

/// Recommendations are padded up to this many products.
pub const MIN_RECOMMENDATIONS: usize = 4;

/// Recommendations never exceed this many products.
pub const MAX_RECOMMENDATIONS: usize = 8;

/// Catalog tags that serve a survey health goal.
fn goal_tags(goal: &str) -> &'static [&'static str] {
    match goal {
        "weight_loss" => &["weight loss", "fitness"],
        "muscle_gain" => &["muscle", "fitness"],
        "energy" => &["daily", "essential"],
        "sleep" => &["sleep", "relaxation", "melatonin"],
        "stress" => &["stress relief", "relaxation"],
        "immunity" => &["immunity"],
        "general" => &["essential", "daily"],
        _ => &[],
    }
}

/// Ingredient keywords for a survey allergy answer.
fn allergen_keywords(allergy: &str) -> Vec<String> {
    let keywords: &[&str] = match allergy {
        "dairy" => &["dairy", "milk", "casein", "whey", "lactose"],
        "nuts" => &["nut", "almond", "cashew", "walnut", "peanut"],
        "gluten" => &["gluten", "wheat", "barley"],
        "soy" => &["soy"],
        "shellfish" => &["shellfish", "shrimp", "crab", "lobster"],
        "eggs" => &["egg"],
        other => return vec![other.to_lowercase()],
    };
    keywords.iter().map(|k| (*k).to_owned()).collect()
}

fn contains_allergen(product: &Product, keywords: &[String]) -> bool {
    keywords.iter().any(|k| product.mentions_ingredient(k))
}

/// Pick products for a user. Without a health profile this is the top
/// rated products.
#[must_use]
pub fn recommend<'a>(
    products: &'a ProductTable,
    profile: Option<&HealthProfile>,
) -> Vec<&'a Product> {
    let keywords: Vec<String> = profile
        .map(|p| p.allergies.iter().flat_map(|a| allergen_keywords(a)).collect())
        .unwrap_or_default();
    let safe = |p: &Product| !contains_allergen(p, &keywords);

    let mut picks: Vec<&Product> = match profile {
        Some(profile) => products
            .all()
            .iter()
            .filter(|p| {
                profile
                    .health_goals
                    .iter()
                    .flat_map(|g| goal_tags(g))
                    .any(|tag| p.has_tag(tag))
            })
            .filter(|p| safe(p))
            .collect(),
        None => Vec::new(),
    };

    if picks.len() < MIN_RECOMMENDATIONS {
        let mut by_rating: Vec<&Product> = products.all().iter().collect();
        by_rating.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        // Allergen-safe products first, then whatever is left
        let (safe_rest, unsafe_rest): (Vec<&Product>, Vec<&Product>) = by_rating
            .into_iter()
            .filter(|p| !picks.iter().any(|pick| pick.id == p.id))
            .partition(|p| safe(p));

        let missing = MIN_RECOMMENDATIONS - picks.len();
        picks.extend(safe_rest.into_iter().chain(unsafe_rest).take(missing));
    }

    picks.truncate(MAX_RECOMMENDATIONS);
    picks
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::seed;

    fn table() -> ProductTable {
        ProductTable::new(seed::products())
    }

    fn profile(goals: &[&str], allergies: &[&str]) -> HealthProfile {
        HealthProfile {
            health_goals: goals.iter().map(|g| (*g).to_owned()).collect(),
            allergies: allergies.iter().map(|a| (*a).to_owned()).collect(),
            ..HealthProfile::default()
        }
    }

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_no_profile_is_top_rated() {
        let table = table();
        let picks = recommend(&table, None);
        assert_eq!(
            names(&picks),
            ["Vitamin D3", "Protein Powder", "Collagen Peptides", "Daily Multivitamin"]
        );
    }

    #[test]
    fn test_goal_matches_come_first() {
        let table = table();
        let profile = profile(&["sleep"], &[]);
        let picks = recommend(&table, Some(&profile));

        assert_eq!(picks.len(), MIN_RECOMMENDATIONS);
        assert_eq!(
            names(picks.get(..2).unwrap()),
            ["Magnesium Complex", "Sleep Support Formula"]
        );
    }

    #[test]
    fn test_allergens_excluded() {
        let table = table();
        // Protein Powder lists sodium caseinate and coconut milk powder
        let profile = profile(&["muscle_gain"], &["dairy"]);
        let picks = recommend(&table, Some(&profile));

        assert!(picks.iter().all(|p| p.name != "Protein Powder"));
        assert_eq!(picks.first().unwrap().name, "Magnesium Complex");
    }

    #[test]
    fn test_capped_at_max() {
        let table = table();
        let profile = profile(
            &["weight_loss", "muscle_gain", "energy", "sleep", "stress", "immunity", "general"],
            &[],
        );
        let picks = recommend(&table, Some(&profile));
        assert!(picks.len() <= MAX_RECOMMENDATIONS);
        assert!(picks.len() >= MIN_RECOMMENDATIONS);
    }
}
