//! The catalog seeded on first run.

use luxelane_core::{Price, Product, ProductId};

struct Seed {
    id: u64,
    name: &'static str,
    description: &'static str,
    cents: u32,
    image: &'static str,
    category: &'static str,
    features: [&'static str; 3],
}

const SEEDS: [Seed; 8] = [
    Seed {
        id: 1,
        name: "Premium Wireless Headphones",
        description: "Immersive sound quality with noise cancellation technology and premium build quality.",
        cents: 34999,
        image: "/products/headphones.jpg",
        category: "audio",
        features: [
            "Active Noise Cancellation",
            "30-hour Battery Life",
            "Premium Sound Quality",
        ],
    },
    Seed {
        id: 2,
        name: "Ultra-thin Smartwatch",
        description: "Stay connected with this elegant smartwatch featuring health monitoring and seamless notifications.",
        cents: 29999,
        image: "/products/smartwatch.jpg",
        category: "wearables",
        features: ["Heart Rate Monitor", "Sleep Tracking", "Water Resistant"],
    },
    Seed {
        id: 3,
        name: "Professional Camera Lens",
        description: "Capture stunning photos with this high-quality professional camera lens with vibrance enhancement.",
        cents: 129_999,
        image: "/products/camera-lens.jpg",
        category: "photography",
        features: ["Ultra-wide Angle", "Weather Sealed", "Fast Autofocus"],
    },
    Seed {
        id: 4,
        name: "Minimalist Desk Lamp",
        description: "Elegant desk lamp with adjustable brightness and color temperature for your workspace.",
        cents: 12999,
        image: "/products/desk-lamp.jpg",
        category: "home",
        features: ["Touch Controls", "Adjustable Brightness", "USB Charging Port"],
    },
    Seed {
        id: 5,
        name: "Portable Power Bank",
        description: "High-capacity power bank for charging your devices on the go with fast charging capability.",
        cents: 7999,
        image: "/products/power-bank.jpg",
        category: "accessories",
        features: ["20,000mAh Capacity", "Fast Charging", "Multiple Ports"],
    },
    Seed {
        id: 6,
        name: "Wireless Earbuds",
        description: "True wireless earbuds with exceptional sound quality and long battery life.",
        cents: 19999,
        image: "/products/earbuds.jpg",
        category: "audio",
        features: ["Noise Isolation", "24-hour Battery Life", "Touch Controls"],
    },
    Seed {
        id: 7,
        name: "Smart Home Speaker",
        description: "Voice-controlled smart speaker with premium sound and virtual assistant.",
        cents: 24999,
        image: "/products/smart-speaker.jpg",
        category: "audio",
        features: ["Voice Control", "Multi-room Audio", "Smart Home Integration"],
    },
    Seed {
        id: 8,
        name: "Ergonomic Keyboard",
        description: "Comfortable ergonomic keyboard with customizable backlighting and programmable keys.",
        cents: 14999,
        image: "/products/keyboard.jpg",
        category: "accessories",
        features: ["Mechanical Switches", "Ergonomic Design", "Programmable Keys"],
    },
];

/// The eight products every fresh store starts with.
#[must_use]
pub fn default_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId::from_number(seed.id),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            price: Price::from_cents(seed.cents),
            image: seed.image.to_owned(),
            category: seed.category.to_owned(),
            features: seed.features.iter().map(|f| (*f).to_owned()).collect(),
        })
        .collect()
}
