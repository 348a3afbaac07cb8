//! The product catalog and its pure state transitions.
//!
//! [`Catalog`] never touches storage. The store computes the next catalog
//! with [`Catalog::with_product`], persists it, and only then swaps it in.

mod defaults;
pub mod query;

use std::collections::HashSet;

use thiserror::Error;

use luxelane_core::{Product, ProductId};

pub use defaults::default_products;

/// Errors from catalog transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A product with this id is already in the catalog.
    #[error("a product with id {0} already exists")]
    DuplicateId(ProductId),
}

/// Products keyed by id, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The default catalog used when storage is empty or unreadable.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            products: default_products(),
        }
    }

    /// Build a catalog from a list that may contain repeated ids.
    ///
    /// The first product with a given id wins. Returns the ids of the
    /// dropped duplicates so the caller can report them.
    #[must_use]
    pub fn from_products_lossy(products: Vec<Product>) -> (Self, Vec<ProductId>) {
        let mut seen = HashSet::with_capacity(products.len());
        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(products.len());

        for product in products {
            if seen.insert(product.id.clone()) {
                kept.push(product);
            } else {
                dropped.push(product.id);
            }
        }

        (Self { products: kept }, dropped)
    }

    /// Decode a stored catalog document (a JSON array of products).
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the document is malformed.
    pub fn decode(json: &str) -> Result<(Self, Vec<ProductId>), serde_json::Error> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::from_products_lossy(products))
    }

    /// Encode the catalog as a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.products)
    }

    /// All products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// The catalog with `product` appended.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if the id is already present.
    pub fn with_product(&self, product: Product) -> Result<Self, CatalogError> {
        if self.contains(&product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }

        let mut products = Vec::with_capacity(self.products.len() + 1);
        products.extend_from_slice(&self.products);
        products.push(product);
        Ok(Self { products })
    }

    /// Allocate an id for a new product.
    ///
    /// One more than the largest numeric id, or the product count plus one
    /// when no ids are numeric; bumped until it is unused.
    #[must_use]
    pub fn next_id(&self) -> ProductId {
        let start = self
            .products
            .iter()
            .filter_map(|p| p.id.as_number())
            .max()
            .unwrap_or_else(|| u64::try_from(self.products.len()).unwrap_or(u64::MAX))
            .saturating_add(1);

        (start..=u64::MAX)
            .map(ProductId::from_number)
            .find(|id| !self.contains(id))
            .unwrap_or_else(|| ProductId::from_number(u64::MAX))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use luxelane_core::Price;

    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::parse(id).unwrap(),
            name: format!("Product {id}"),
            description: "Test product".to_string(),
            price: Price::from_cents(1000),
            image: String::new(),
            category: "test".to_string(),
            features: Vec::new(),
        }
    }

    #[test]
    fn test_defaults() {
        let catalog = Catalog::defaults();
        assert_eq!(catalog.len(), 8);
        let lens = catalog.get(&ProductId::from_number(3)).unwrap();
        assert_eq!(lens.price, Price::from_cents(129_999));
        assert_eq!(lens.category, "photography");
        assert!(catalog.products().iter().all(|p| p.features.len() == 3));
    }

    #[test]
    fn test_with_product_appends_without_mutating() {
        let catalog = Catalog::defaults();
        let next = catalog.with_product(product("9")).unwrap();

        assert_eq!(catalog.len(), 8);
        assert_eq!(next.len(), 9);
        assert_eq!(next.products().last().unwrap().id.as_str(), "9");
    }

    #[test]
    fn test_with_product_rejects_duplicate() {
        let catalog = Catalog::defaults();
        let err = catalog.with_product(product("1")).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(ProductId::from_number(1)));
    }

    #[test]
    fn test_lossy_keeps_first_duplicate() {
        let mut second = product("1");
        second.name = "Impostor".to_string();

        let (catalog, dropped) = Catalog::from_products_lossy(vec![product("1"), second, product("2")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].name, "Product 1");
        assert_eq!(dropped, vec![ProductId::from_number(1)]);
    }

    #[test]
    fn test_encode_decode() {
        let catalog = Catalog::defaults();
        let json = catalog.encode().unwrap();
        let (decoded, dropped) = Catalog::decode(&json).unwrap();
        assert_eq!(decoded, catalog);
        assert!(dropped.is_empty());

        assert!(Catalog::decode("{not json").is_err());
        assert!(Catalog::decode(r#"{"id": "1"}"#).is_err());
    }

    #[test]
    fn test_next_id() {
        assert_eq!(Catalog::defaults().next_id().as_str(), "9");
        assert_eq!(Catalog::default().next_id().as_str(), "1");

        let (named, _) = Catalog::from_products_lossy(vec![product("sku-a"), product("sku-b")]);
        assert_eq!(named.next_id().as_str(), "3");

        let (mixed, _) = Catalog::from_products_lossy(vec![product("3"), product("sku"), product("4")]);
        assert_eq!(mixed.next_id().as_str(), "5");
    }
}
