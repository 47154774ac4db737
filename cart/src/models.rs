use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    pub price: f64,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartEntry {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    pub fn id(&self) -> u32 {
        self.product.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity.get())
    }
}
