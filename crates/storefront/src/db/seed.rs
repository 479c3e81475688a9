//! Seed catalog loaded into every fresh store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use wellnest_core::{CategoryId, ProductId};

use crate::models::{Category, Product};

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    rating: f64,
    review_count: u32,
    image_seed: &'static str,
    category: &'static str,
    tags: &'static [&'static str],
    ingredients: &'static str,
    usage: &'static str,
    benefits: &'static [&'static str],
}

/// Catalog launch date; product `n` was added `n` days later.
const CATALOG_EPOCH: i64 = 1_704_067_200; // 2024-01-01T00:00:00Z
const SECONDS_PER_DAY: i64 = 86_400;

const CATALOG: [SeedProduct; 8] = [
    SeedProduct {
        name: "Daily Multivitamin",
        description: "A comprehensive vitamin and mineral supplement designed to support overall health and fill nutritional gaps in your daily diet. Our formula contains essential nutrients in their most bioavailable forms for optimal absorption.",
        price_cents: 2499,
        rating: 4.7,
        review_count: 128,
        image_seed: "vitamin1",
        category: "Vitamins",
        tags: &["daily", "essential", "immunity"],
        ingredients: "Vitamin A (as beta-carotene), Vitamin C (as ascorbic acid), Vitamin D3 (as cholecalciferol), Vitamin E (as d-alpha tocopheryl), Vitamin K (as phytonadione), Thiamin (as thiamin mononitrate), Riboflavin, Niacin (as niacinamide), Vitamin B6 (as pyridoxine HCl), Folate (as methylfolate), Vitamin B12 (as methylcobalamin), Biotin, Pantothenic acid (as d-calcium pantothenate), Calcium (as calcium carbonate), Iron (as ferrous fumarate), Magnesium (as magnesium oxide), Zinc (as zinc citrate), Selenium (as selenomethionine), Copper (as copper gluconate), Manganese (as manganese gluconate), Chromium (as chromium picolinate), Molybdenum (as sodium molybdate), Potassium (as potassium chloride)",
        usage: "Take 2 capsules daily with food or as directed by your healthcare professional.",
        benefits: &[
            "Supports overall health and wellness",
            "Helps fill nutritional gaps in your diet",
            "Contains essential vitamins and minerals in their most bioavailable forms",
            "Promotes immune system function",
            "Supports energy production and reduces fatigue",
        ],
    },
    SeedProduct {
        name: "Omega-3 Fish Oil",
        description: "High-quality omega-3 fatty acids sourced from sustainable wild fish. Our molecular distillation process ensures purity and removes heavy metals, PCBs, and other contaminants.",
        price_cents: 1999,
        rating: 4.5,
        review_count: 89,
        image_seed: "omega3",
        category: "Supplements",
        tags: &["heart", "brain", "essential"],
        ingredients: "Fish oil concentrate (from sustainable wild fish), EPA (eicosapentaenoic acid), DHA (docosahexaenoic acid), gelatin capsule, glycerin, purified water, natural lemon flavor, mixed tocopherols (as preservative).",
        usage: "Take 1-2 softgels daily with food or as directed by your healthcare professional.",
        benefits: &[
            "Supports cardiovascular health",
            "Promotes brain function and cognitive health",
            "Helps reduce inflammation",
            "Supports joint health and flexibility",
            "Promotes eye health",
        ],
    },
    SeedProduct {
        name: "Protein Powder",
        description: "A premium plant-based protein powder blend featuring pea, rice, and hemp proteins for a complete amino acid profile. Our formula is designed to support muscle recovery, growth, and overall health.",
        price_cents: 3999,
        rating: 4.8,
        review_count: 243,
        image_seed: "protein",
        category: "Nutrition",
        tags: &["fitness", "muscle", "plant-based"],
        ingredients: "Pea protein isolate, brown rice protein, hemp protein, coconut milk powder (coconut milk, maltodextrin, sodium caseinate), natural flavors, sea salt, stevia leaf extract, xanthan gum.",
        usage: "Mix 1 scoop (30g) with 8-10 oz of water, almond milk, or your preferred beverage. Consume post-workout or as needed throughout the day to meet protein requirements.",
        benefits: &[
            "Provides 25g of complete plant-based protein per serving",
            "Supports muscle recovery and growth",
            "Easy to digest and absorb",
            "Free from common allergens like dairy, soy, and gluten",
            "Great taste with no artificial sweeteners or flavors",
        ],
    },
    SeedProduct {
        name: "Probiotics",
        description: "Advanced probiotic blend featuring 50 billion CFU and 12 clinically studied strains for comprehensive digestive health and immune system support.",
        price_cents: 2999,
        rating: 4.6,
        review_count: 112,
        image_seed: "probiotic",
        category: "Digestive Health",
        tags: &["gut health", "immunity", "digestion"],
        ingredients: "Probiotic blend (50 billion CFU): Lactobacillus acidophilus, Lactobacillus plantarum, Lactobacillus paracasei, Lactobacillus casei, Lactobacillus rhamnosus, Lactobacillus bulgaricus, Bifidobacterium lactis, Bifidobacterium bifidum, Bifidobacterium longum, Bifidobacterium breve, Streptococcus thermophilus, Saccharomyces boulardii; Vegetable capsule (hydroxypropyl methylcellulose), microcrystalline cellulose, vegetable magnesium stearate.",
        usage: "Take 1 capsule daily with or without food. For enhanced digestive support, take 1 capsule twice daily.",
        benefits: &[
            "Supports digestive health and regularity",
            "Helps balance gut microbiome",
            "Promotes immune system function",
            "Assists with nutrient absorption",
            "Shelf-stable formula - no refrigeration required",
        ],
    },
    SeedProduct {
        name: "Vitamin D3",
        description: "High-potency vitamin D3 (cholecalciferol) in an easy-to-absorb liquid softgel form. Supports bone health, immune function, muscle health, and overall wellness.",
        price_cents: 1599,
        rating: 4.9,
        review_count: 198,
        image_seed: "vitamind",
        category: "Vitamins",
        tags: &["bone health", "immunity", "sunshine vitamin"],
        ingredients: "Vitamin D3 (as cholecalciferol), extra virgin olive oil, gelatin capsule, glycerin, purified water.",
        usage: "Take 1 softgel daily with food or as directed by your healthcare professional.",
        benefits: &[
            "Supports bone health and calcium absorption",
            "Promotes immune system function",
            "Assists with muscle function and strength",
            "Supports mood and cognitive health",
            "High potency 5000 IU (125mcg) formula",
        ],
    },
    SeedProduct {
        name: "Magnesium Complex",
        description: "Comprehensive magnesium formula featuring three highly absorbable forms of magnesium for optimal bioavailability. Supports muscle function, nerve health, energy production, and sleep quality.",
        price_cents: 2299,
        rating: 4.7,
        review_count: 156,
        image_seed: "magnesium",
        category: "Minerals",
        tags: &["sleep", "muscle", "stress relief"],
        ingredients: "Magnesium (as magnesium glycinate, magnesium citrate, and magnesium malate), vegetable capsule (hydroxypropyl methylcellulose), microcrystalline cellulose.",
        usage: "Take 2 capsules daily with food, preferably in the evening, or as directed by your healthcare professional.",
        benefits: &[
            "Supports muscle relaxation and recovery",
            "Promotes healthy nerve function",
            "Assists with energy production and metabolism",
            "Supports restful sleep and stress management",
            "Promotes cardiovascular health",
        ],
    },
    SeedProduct {
        name: "Collagen Peptides",
        description: "Premium hydrolyzed collagen peptides sourced from grass-fed, pasture-raised bovine. Unflavored and dissolves easily in hot or cold liquids to support skin, hair, nails, joints, and gut health.",
        price_cents: 3499,
        rating: 4.8,
        review_count: 267,
        image_seed: "collagen",
        category: "Beauty",
        tags: &["skin", "joints", "anti-aging"],
        ingredients: "Hydrolyzed bovine collagen peptides (from grass-fed, pasture-raised cattle).",
        usage: "Mix 1-2 scoops (10-20g) into coffee, tea, smoothies, soups, or any hot or cold beverage. Can also be added to foods like oatmeal, yogurt, or baked goods.",
        benefits: &[
            "Supports skin elasticity and hydration",
            "Promotes hair and nail strength and growth",
            "Supports joint health and mobility",
            "Assists with gut lining integrity",
            "Mixes easily with no taste or texture",
        ],
    },
    SeedProduct {
        name: "Sleep Support Formula",
        description: "Comprehensive sleep support formula featuring melatonin, magnesium, and calming herbs to help you fall asleep faster, stay asleep longer, and wake up refreshed without morning grogginess.",
        price_cents: 2799,
        rating: 4.6,
        review_count: 132,
        image_seed: "sleep",
        category: "Sleep",
        tags: &["sleep", "relaxation", "melatonin"],
        ingredients: "Magnesium (as magnesium glycinate), Valerian root extract, Passionflower extract, Chamomile flower extract, L-theanine, GABA (gamma-aminobutyric acid), Melatonin, vegetable capsule (hydroxypropyl methylcellulose), microcrystalline cellulose.",
        usage: "Take 1-2 capsules 30-60 minutes before bedtime or as directed by your healthcare professional.",
        benefits: &[
            "Helps you fall asleep faster",
            "Promotes longer, deeper sleep cycles",
            "Reduces nighttime awakenings",
            "Calms mind and reduces stress",
            "Non-habit forming formula",
        ],
    },
];

/// Build the seed catalog. Product ids start at 1; category ids follow
/// first appearance.
#[must_use]
pub fn products() -> Vec<Product> {
    let mut categories: Vec<Category> = Vec::new();

    (1_i32..)
        .zip(CATALOG.iter())
        .map(|(id, seed)| {
            let existing = categories.iter().find(|c| c.name == seed.category).cloned();
            let category = existing.unwrap_or_else(|| {
                let next = i32::try_from(categories.len()).unwrap_or(i32::MAX) + 1;
                let category = Category {
                    id: CategoryId::new(next),
                    name: seed.category.to_owned(),
                };
                categories.push(category.clone());
                category
            });

            let created_at = DateTime::<Utc>::from_timestamp(
                CATALOG_EPOCH + i64::from(id) * SECONDS_PER_DAY,
                0,
            )
            .unwrap_or_default();

            Product {
                id: ProductId::new(id),
                name: seed.name.to_owned(),
                description: seed.description.to_owned(),
                price: Decimal::new(seed.price_cents, 2),
                rating: seed.rating,
                review_count: seed.review_count,
                image: format!("https://picsum.photos/seed/{}/300/300", seed.image_seed),
                category,
                tags: seed.tags.iter().map(|t| (*t).to_owned()).collect(),
                ingredients: Some(seed.ingredients.to_owned()),
                usage: Some(seed.usage.to_owned()),
                benefits: seed.benefits.iter().map(|b| (*b).to_owned()).collect(),
                reviews: Vec::new(),
                created_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_and_categories() {
        let products = products();
        assert_eq!(products.len(), 8);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].category.name, "Vitamins");
        // Vitamin D3 shares the first category
        assert_eq!(products[4].category.id, products[0].category.id);
        assert_eq!(products[7].category.id, CategoryId::new(7));
        assert_eq!(products[2].price, Decimal::new(3999, 2));
        assert!(products[7].created_at > products[0].created_at);
    }
}
