//! # Function Input
//!
//! The `RunInput` document the checkout host sends on stdin.
//!
//! ```json
//! {
//!   "cart": {
//!     "attributes": [{ "key": "dealer_assignment_data", "value": "{...}" }],
//!     "lines": [{ "merchandise": { "product": { "productType": "SUP Paddle" } } }],
//!     "deliveryGroups": [{ "deliveryAddress": { "province": "CA", "provinceCode": "CA" } }]
//!   }
//! }
//! ```
//!
//! Every nested field is optional: gift cards have no product, carts without
//! an address have no delivery group.

use serde::Deserialize;

use dealer_core::types::{CartSnapshot, LineItem, RegionCode};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunInput {
    pub cart: Cart,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub attributes: Vec<Attribute>,

    #[serde(default)]
    pub lines: Vec<CartLine>,

    #[serde(default)]
    pub delivery_groups: Vec<DeliveryGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attribute {
    pub key: String,

    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartLine {
    #[serde(default)]
    pub merchandise: Merchandise,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Merchandise {
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub product_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryGroup {
    #[serde(default)]
    pub delivery_address: Option<DeliveryAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    #[serde(default)]
    pub province: Option<String>,

    #[serde(default)]
    pub province_code: Option<String>,
}

impl Cart {
    /// Value of the first attribute named `key`, if any.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.key == key)
            .and_then(|attribute| attribute.value.as_deref())
    }

    /// `province`, else `provinceCode`, of the first delivery group.
    ///
    /// Empty strings count as missing.
    pub fn delivery_region(&self) -> Option<RegionCode> {
        let address = self.delivery_groups.first()?.delivery_address.as_ref()?;
        [&address.province, &address.province_code]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .find(|value| !value.is_empty())
            .map(RegionCode::new)
    }

    /// The read-only view the rule engine consumes.
    pub fn snapshot(&self) -> CartSnapshot {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let product_type = line
                    .merchandise
                    .product
                    .as_ref()
                    .and_then(|product| product.product_type.as_deref())
                    .unwrap_or_default();
                LineItem::from_product_type(product_type)
            })
            .collect();

        CartSnapshot::new(lines, self.delivery_region())
    }
}
