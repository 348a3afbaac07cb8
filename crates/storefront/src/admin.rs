//! Admin product entry.
//!
//! The admin page submits a [`ProductForm`] of raw text fields. Validation
//! reports every problem at once; a valid form becomes a [`Product`] under an
//! id allocated by the catalog.

use serde::Deserialize;

use luxelane_core::{Email, PLACEHOLDER_IMAGE, Price, Product, ProductId};

use crate::checkout::FieldError;

const MIN_NAME_CHARS: usize = 2;
const MIN_DESCRIPTION_CHARS: usize = 10;

/// Raw product fields as entered by an admin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    /// Decimal price text, e.g. `"49.99"`.
    pub price: String,
    pub description: String,
    pub category: String,
    /// Image URL; blank means the placeholder.
    pub image: String,
    /// Comma-separated feature list.
    pub features: String,
}

impl ProductForm {
    /// Check every field, returning all problems found.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError::new(
                "name",
                "Product name must be at least 2 characters",
            ));
        }

        match Price::parse(&self.price) {
            Ok(price) if !price.is_zero() => {}
            _ => errors.push(FieldError::new("price", "Price must be a positive number")),
        }

        if self.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
            errors.push(FieldError::new(
                "description",
                "Description must be at least 10 characters",
            ));
        }

        if self.category.trim().is_empty() {
            errors.push(FieldError::new("category", "Please select a category"));
        }

        errors
    }

    /// Feature list split on commas, trimmed, blanks dropped.
    #[must_use]
    pub fn feature_list(&self) -> Vec<String> {
        self.features
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Build the product under `id`.
    ///
    /// # Errors
    ///
    /// Returns every field problem if the form does not validate.
    pub fn into_product(self, id: ProductId) -> Result<Product, Vec<FieldError>> {
        let errors = self.validate();
        let price = match Price::parse(&self.price) {
            Ok(price) if errors.is_empty() => price,
            _ => return Err(errors),
        };

        let image = match self.image.trim() {
            "" => PLACEHOLDER_IMAGE.to_owned(),
            url => url.to_owned(),
        };

        Ok(Product {
            id,
            features: self.feature_list(),
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            price,
            image,
            category: self.category.trim().to_owned(),
        })
    }
}

/// Whether `email` belongs to the configured admin account.
#[must_use]
pub fn is_admin(email: &Email, admin: &Email) -> bool {
    email.matches(admin)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            name: "  Travel Adapter ".to_string(),
            price: "24.99".to_string(),
            description: "Universal travel adapter with USB-C.".to_string(),
            category: "accessories".to_string(),
            image: String::new(),
            features: "USB-C, , 150 countries,  Surge protection ".to_string(),
        }
    }

    #[test]
    fn test_into_product() {
        let product = form().into_product(ProductId::from_number(9)).unwrap();
        assert_eq!(product.id.as_str(), "9");
        assert_eq!(product.name, "Travel Adapter");
        assert_eq!(product.price, Price::from_cents(2499));
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
        assert_eq!(
            product.features,
            ["USB-C", "150 countries", "Surge protection"]
        );
    }

    #[test]
    fn test_explicit_image_kept() {
        let mut f = form();
        f.image = " https://cdn.example.com/adapter.jpg ".to_string();
        let product = f.into_product(ProductId::from_number(9)).unwrap();
        assert_eq!(product.image, "https://cdn.example.com/adapter.jpg");
    }

    #[test]
    fn test_validate_reports_all_fields() {
        let errors = ProductForm::default().validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "price", "description", "category"]);
    }

    #[test]
    fn test_price_must_be_positive() {
        for price in ["0", "-5", "abc", ""] {
            let mut f = form();
            f.price = price.to_string();
            let errors = f.into_product(ProductId::from_number(9)).unwrap_err();
            assert_eq!(errors.len(), 1, "price {price:?}");
            assert_eq!(errors[0].field, "price");
        }
    }

    #[test]
    fn test_short_name_and_description() {
        let mut f = form();
        f.name = "A".to_string();
        f.description = "Too short".to_string();
        let fields: Vec<&str> = f.validate().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "description"]);
    }

    #[test]
    fn test_empty_features() {
        let mut f = form();
        f.features = " , ,".to_string();
        assert!(f.feature_list().is_empty());
    }

    #[test]
    fn test_is_admin_ignores_case() {
        let admin = Email::parse("admin@example.com").unwrap();
        assert!(is_admin(&Email::parse("Admin@Example.com").unwrap(), &admin));
        assert!(!is_admin(&Email::parse("shopper@example.com").unwrap(), &admin));
    }
}
