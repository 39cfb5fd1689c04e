//! Wire types for the inventory API.
//!
//! Field names and shapes follow the API's JSON exactly; anything the API
//! may omit or get creative with is `Option` or defaulted so a single odd
//! row cannot fail a whole response.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shoeworld_core::{Email, ShoeCategory, ShoeId, UserId, UserRole, Username};

/// A shoe as returned by `GET /shoes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shoe {
    pub id: ShoeId,
    pub name: String,
    pub brand: String,
    /// The API serializes prices as JSON numbers.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub category: ShoeCategory,
    #[serde(default)]
    pub image: Option<String>,
    /// Category-specific attributes (style, sport type, material).
    #[serde(default)]
    pub attributes: Option<serde_json::Value>,
    /// Raw creation timestamp; the API does not commit to a format.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Shoe {
    /// Whether at least one pair is available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Payload for `POST /shoes`.
///
/// Exactly one of `style` / `sport_type` / `material` is set, matching the
/// shoe's category.
#[derive(Debug, Clone, Serialize)]
pub struct NewShoe {
    pub name: String,
    pub brand: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub size: String,
    pub stock: u32,
    pub color: String,
    pub category: ShoeCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

/// Payload for `POST /api/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful response from `POST /api/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for authenticated API calls.
    pub token: String,
    pub user: ApiUser,
}

/// Account data attached to a login response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

/// Payload for `POST /api/register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub password: String,
    pub role: UserRole,
}

/// Plain `{"message": ...}` body the API uses for results and errors.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shoe_deserializes_float_price() {
        let json = r#"{
            "id": 1,
            "name": "Air Max 90",
            "brand": "Nike",
            "price": 129.99,
            "size": "10",
            "stock": 5,
            "color": "white",
            "category": "athletic",
            "image": null,
            "created_at": "2024-01-01 10:00:00"
        }"#;
        let shoe: Shoe = serde_json::from_str(json).unwrap();
        assert_eq!(shoe.price.to_string(), "129.99");
        assert_eq!(shoe.category, ShoeCategory::Athletic);
        assert!(shoe.in_stock());
    }

    #[test]
    fn test_shoe_tolerates_missing_optional_fields() {
        let json = r#"{"id": 2, "name": "Derby", "brand": "Clarks", "price": 89.0}"#;
        let shoe: Shoe = serde_json::from_str(json).unwrap();
        assert_eq!(shoe.size, "");
        assert_eq!(shoe.stock, 0);
        assert!(!shoe.in_stock());
        assert_eq!(shoe.category, ShoeCategory::Casual);
        assert_eq!(shoe.image, None);
    }

    #[test]
    fn test_new_shoe_skips_unset_attributes() {
        let new_shoe = NewShoe {
            name: "Oxford".to_string(),
            brand: "Allen Edmonds".to_string(),
            price: Decimal::new(24900, 2),
            size: "10".to_string(),
            stock: 3,
            color: "black".to_string(),
            category: ShoeCategory::Formal,
            image: None,
            style: None,
            sport_type: None,
            material: Some("leather".to_string()),
        };
        let json = serde_json::to_value(&new_shoe).unwrap();
        assert_eq!(json["category"], "formal");
        assert_eq!(json["material"], "leather");
        assert_eq!(json["price"], 249.0);
        assert!(json.get("style").is_none());
        assert!(json.get("sport_type").is_none());
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_api_user_defaults_role_to_customer() {
        let user: ApiUser = serde_json::from_str(r#"{"id": 1, "username": "dmoney"}"#).unwrap();
        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.email, None);
    }
}
