//! Product and testimonial catalog.
//!
//! Both JSON documents load concurrently at startup. A read or parse
//! failure on either side substitutes a small fixed fallback array, so the
//! storefront always has content to show.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    pub price: u64,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub text: String,
    pub rating: u8,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub testimonials: Vec<Testimonial>,
}

impl Catalog {
    /// Load both documents from `data_dir`, falling back per side.
    pub async fn load(data_dir: &Path) -> Catalog {
        let (products, testimonials) = tokio::join!(
            load_or_fallback(
                data_dir.join("products.json"),
                "product catalog",
                fallback_products
            ),
            load_or_fallback(
                data_dir.join("testimonials.json"),
                "testimonial list",
                fallback_testimonials
            ),
        );
        Catalog {
            products,
            testimonials,
        }
    }
}

impl Product {
    /// Whether a displayable image asset exists under `<data_dir>/images`.
    /// A missing asset is normal; the UI shows a placeholder glyph instead.
    pub fn image_available(&self, data_dir: &Path) -> bool {
        let Some(name) = &self.image else {
            return false;
        };
        let images = data_dir.join("images");
        if images.join(name).is_file() {
            return true;
        }
        ["png", "jpg", "jpeg", "webp"]
            .iter()
            .any(|ext| images.join(format!("{name}.{ext}")).is_file())
    }
}

async fn load_or_fallback<T>(
    path: std::path::PathBuf,
    what: &str,
    fallback: fn() -> Vec<T>,
) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    match read_json::<Vec<T>>(&path).await {
        Ok(items) => items,
        Err(err) => {
            warn!("{what} unavailable ({err}); using fallback dataset");
            fallback()
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn fallback_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            title: "Template Keuangan (Demo)".to_string(),
            price: 49_000,
            category: "Finance".to_string(),
            description: "Deskripsi placeholder saat offline.".to_string(),
            features: vec!["Fitur A".to_string()],
            image: Some("financial-sheet".to_string()),
        },
        Product {
            id: 2,
            title: "Meal Prep (Demo)".to_string(),
            price: 29_000,
            category: "Food".to_string(),
            description: "Deskripsi placeholder saat offline.".to_string(),
            features: vec!["Fitur B".to_string()],
            image: Some("meal-sheet".to_string()),
        },
        Product {
            id: 3,
            title: "Umrah Planner (Demo)".to_string(),
            price: 35_000,
            category: "Travel".to_string(),
            description: "Deskripsi placeholder saat offline.".to_string(),
            features: vec!["Fitur C".to_string()],
            image: Some("umrah-sheet".to_string()),
        },
    ]
}

pub fn fallback_testimonials() -> Vec<Testimonial> {
    vec![Testimonial {
        id: 1,
        name: "User Demo".to_string(),
        role: "Pengunjung".to_string(),
        text: "Konten gagal dimuat dari JSON, menampilkan data demo.".to_string(),
        rating: 5,
    }]
}
