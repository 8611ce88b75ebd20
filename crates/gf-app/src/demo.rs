//! Built-in demo dataset
//! Garages around Bristol and Bath, used when no CSV file is configured

use anyhow::Result;
use async_trait::async_trait;

use gf_core::{Dataset, ShopRecord, ShopSource, REFERENCE_SHOP_NAME};

/// (shop, city, distance from the reference, latitude, longitude)
const GARAGES: &[(&str, &str, f64, f64, f64)] = &[
    (REFERENCE_SHOP_NAME, "Bristol", 0.0, 51.4613, -2.5600),
    ("Redfield Motors", "Bristol", 1.2, 51.4588, -2.5627),
    ("Bedminster Auto Care", "Bristol", 2.4, 51.4404, -2.6014),
    ("Clifton Car Clinic", "Bristol", 3.1, 51.4578, -2.6190),
    ("Fishponds Garage", "Bristol", 3.6, 51.4800, -2.5270),
    ("Horfield Service Centre", "Bristol", 4.8, 51.4920, -2.5890),
    ("Kingswood Autos", "Bristol", 5.5, 51.4550, -2.5040),
    ("Avonmouth Diesel", "Bristol", 8.9, 51.5010, -2.6960),
    ("Keynsham Motor Works", "Bristol", 6.7, 51.4140, -2.4980),
    ("Bath Road Garage", "Bath", 11.8, 51.3850, -2.3440),
    ("Widcombe Motors", "Bath", 12.6, 51.3770, -2.3540),
    ("Weston Car Repairs", "Weston-super-Mare", 14.9, 51.3460, -2.9770),
];

/// (problem, base price in pounds)
const PROBLEMS: &[(&str, u32)] = &[
    ("clutch replacement", 420),
    ("brake pads", 140),
    ("timing belt", 360),
    ("MOT", 55),
];

const SLOTS: &[&str] = &["Mon 9am", "Tue 11am", "Wed 2pm", "Thu 10am", "Fri 4pm"];

/// Loads the built-in demo dataset
#[derive(Debug, Default)]
pub struct DemoShopSource;

#[async_trait]
impl ShopSource for DemoShopSource {
    async fn load(&self) -> Result<Dataset> {
        Ok(demo_dataset())
    }

    fn source_name(&self) -> &str {
        "demo"
    }
}

/// Every garage offers every repair, with deterministic prices and slots.
/// Some combinations have no availability.
pub fn demo_dataset() -> Dataset {
    let mut records = Vec::with_capacity(GARAGES.len() * PROBLEMS.len());

    for (g, &(shop, city, distance, latitude, longitude)) in GARAGES.iter().enumerate() {
        for (p, &(problem, base_price)) in PROBLEMS.iter().enumerate() {
            let seed = g * PROBLEMS.len() + p;
            let price = base_price + (seed as u32 * 37) % 90;
            let earliest_availability = (seed % 4 != 3).then(|| SLOTS[seed % SLOTS.len()].to_string());

            records.push(ShopRecord {
                shop_name: shop.to_string(),
                city: city.to_string(),
                problem: problem.to_string(),
                distance_from_reference: distance,
                latitude,
                longitude,
                price: format!("£{price}"),
                earliest_availability,
            });
        }
    }

    Dataset::new(records)
}
