//! Fixed catalog used by the mock client

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

use crate::models::{Brand, CarDetail, CarImage, CarStatus, CarSummary, Price};

fn timestamp(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

fn brand(id: &str, name: &str, description: &str) -> Brand {
    Brand {
        id: id.to_string(),
        name: name.to_string(),
        logo_url: String::new(),
        description: description.to_string(),
        created_at: timestamp(1, 0),
        updated_at: timestamp(1, 0),
    }
}

pub fn brands() -> Vec<Brand> {
    vec![
        brand("1", "Ferrari", "Italian luxury sports car manufacturer"),
        brand("2", "Porsche", "German automobile manufacturer specializing in high-performance sports cars"),
        brand("3", "Jaguar", "British luxury vehicle company"),
        brand("4", "Mercedes-Benz", "German luxury and commercial vehicle automotive brand"),
        brand("5", "Aston Martin", "British independent manufacturer of luxury sports cars and grand tourers"),
    ]
}

struct CarRow {
    id: &'static str,
    brand_index: usize,
    model: &'static str,
    year: i32,
    price: &'static str,
    is_featured: bool,
    image: &'static str,
    day: u32,
}

const CAR_ROWS: [CarRow; 6] = [
    CarRow {
        id: "1",
        brand_index: 0,
        model: "250 GTO",
        year: 1962,
        price: "48000000.00",
        is_featured: true,
        image: "https://images.unsplash.com/photo-1583121274602-3e2820c69888?w=800",
        day: 15,
    },
    CarRow {
        id: "2",
        brand_index: 1,
        model: "911 Carrera RS 2.7",
        year: 1973,
        price: "1200000.00",
        is_featured: true,
        image: "https://images.unsplash.com/photo-1503376780353-7e6692767b70?w=800",
        day: 16,
    },
    CarRow {
        id: "3",
        brand_index: 2,
        model: "E-Type",
        year: 1961,
        price: "280000.00",
        is_featured: true,
        image: "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?w=800",
        day: 17,
    },
    CarRow {
        id: "4",
        brand_index: 3,
        model: "300SL Gullwing",
        year: 1955,
        price: "1500000.00",
        is_featured: false,
        image: "https://images.unsplash.com/photo-1618843479313-40f8afb4b4d8?w=800",
        day: 18,
    },
    CarRow {
        id: "5",
        brand_index: 4,
        model: "DB5",
        year: 1964,
        price: "900000.00",
        is_featured: false,
        image: "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=800",
        day: 19,
    },
    CarRow {
        id: "6",
        brand_index: 0,
        model: "Testarossa",
        year: 1984,
        price: "250000.00",
        is_featured: false,
        image: "https://images.unsplash.com/photo-1592198084033-aade902d1aae?w=800",
        day: 20,
    },
];

pub fn cars() -> Vec<CarSummary> {
    let brands = brands();
    CAR_ROWS
        .iter()
        .filter_map(|row| {
            let brand = brands.get(row.brand_index)?.clone();
            Some(CarSummary {
                id: row.id.to_string(),
                brand,
                model: row.model.to_string(),
                year: row.year,
                price: Price::new(row.price),
                is_featured: row.is_featured,
                status: CarStatus::Active,
                primary_image: Some(row.image.to_string()),
                created_at: timestamp(row.day, 10),
            })
        })
        .collect()
}

fn image(id: &str, url: &str, alt_text: &str, is_primary: bool, sort_order: u32) -> CarImage {
    CarImage {
        id: id.to_string(),
        image_url: url.to_string(),
        alt_text: alt_text.to_string(),
        is_primary,
        sort_order,
    }
}

/// Detail records for the cars that have a full write-up
pub fn car_details() -> HashMap<String, CarDetail> {
    let descriptions = [
        (
            "1",
            "The Ferrari 250 GTO is a GT car produced by Ferrari from 1962 to 1964 for homologation into the FIA's Group 3 Grand Touring Car category. It is widely considered to be the greatest Ferrari ever made.",
            vec![
                image("1", "https://images.unsplash.com/photo-1583121274602-3e2820c69888?w=800", "Ferrari 250 GTO front view", true, 0),
                image("2", "https://images.unsplash.com/photo-1544636331-e26879cd4d9b?w=800", "Ferrari 250 GTO side view", false, 1),
            ],
        ),
        (
            "2",
            "The Porsche 911 Carrera RS 2.7 was a lightweight version of the 911 built for homologation into the Group 4 Special GT racing class.",
            vec![image("3", "https://images.unsplash.com/photo-1503376780353-7e6692767b70?w=800", "Porsche 911 Carrera RS", true, 0)],
        ),
        (
            "3",
            "The Jaguar E-Type, or the Jaguar XK-E, is a British sports car that was manufactured by Jaguar Cars Ltd. Enzo Ferrari called it \"the most beautiful car ever made\".",
            vec![image("4", "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?w=800", "Jaguar E-Type", true, 0)],
        ),
    ];

    let summaries = cars();
    let mut details = HashMap::new();
    for (id, description, images) in descriptions {
        if let Some(summary) = summaries.iter().find(|car| car.id == id) {
            let mut detail = CarDetail::from_summary(summary, description);
            detail.images = images;
            details.insert(id.to_string(), detail);
        }
    }
    details
}
