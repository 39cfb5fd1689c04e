//! Shoe category taxonomy.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Product category for a shoe.
///
/// The catalog recognizes three categories. Each carries one
/// category-specific attribute on the product form (`style` for casual,
/// `sport_type` for athletic, `material` for formal).
///
/// Deserialization is tolerant: an unrecognized category string coming back
/// from the inventory API folds into [`Casual`](Self::Casual), the API's own
/// column default, so one odd row cannot fail a whole catalog fetch.
/// Serialization always writes the canonical lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShoeCategory {
    Athletic,
    #[default]
    Casual,
    Formal,
}

impl ShoeCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Athletic, Self::Casual, Self::Formal];

    /// The canonical lowercase name used on the wire and in URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Athletic => "athletic",
            Self::Casual => "casual",
            Self::Formal => "formal",
        }
    }

    /// Capitalized name for filter buttons and form options.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Athletic => "Athletic",
            Self::Casual => "Casual",
            Self::Formal => "Formal",
        }
    }

    /// The emoji shown on product cards for this category.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Athletic => "\u{1f45f}",
            Self::Casual => "\u{1f45e}",
            Self::Formal => "\u{1f454}",
        }
    }

    /// Name of the category-specific product attribute.
    #[must_use]
    pub const fn attribute_name(&self) -> &'static str {
        match self {
            Self::Athletic => "sport_type",
            Self::Casual => "style",
            Self::Formal => "material",
        }
    }

    /// Human-readable label for the category-specific attribute.
    #[must_use]
    pub const fn attribute_label(&self) -> &'static str {
        match self {
            Self::Athletic => "Sport type",
            Self::Casual => "Style",
            Self::Formal => "Material",
        }
    }

    /// Value used for the category-specific attribute when left blank.
    #[must_use]
    pub const fn attribute_default(&self) -> &'static str {
        match self {
            Self::Athletic => "running",
            Self::Casual => "sneaker",
            Self::Formal => "leather",
        }
    }
}

impl fmt::Display for ShoeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShoeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "athletic" => Ok(Self::Athletic),
            "casual" => Ok(Self::Casual),
            "formal" => Ok(Self::Formal),
            _ => Err(format!("invalid shoe category: {s}")),
        }
    }
}

impl Serialize for ShoeCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShoeCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("athletic".parse::<ShoeCategory>().unwrap(), ShoeCategory::Athletic);
        assert_eq!("casual".parse::<ShoeCategory>().unwrap(), ShoeCategory::Casual);
        assert_eq!("formal".parse::<ShoeCategory>().unwrap(), ShoeCategory::Formal);
        assert!("sandals".parse::<ShoeCategory>().is_err());
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&ShoeCategory::Formal).unwrap();
        assert_eq!(json, "\"formal\"");
    }

    #[test]
    fn test_deserialize_unknown_falls_back_to_casual() {
        let category: ShoeCategory = serde_json::from_str("\"crocs\"").unwrap();
        assert_eq!(category, ShoeCategory::Casual);
    }

    #[test]
    fn test_attribute_mapping() {
        assert_eq!(ShoeCategory::Casual.attribute_name(), "style");
        assert_eq!(ShoeCategory::Casual.attribute_default(), "sneaker");
        assert_eq!(ShoeCategory::Athletic.attribute_name(), "sport_type");
        assert_eq!(ShoeCategory::Athletic.attribute_default(), "running");
        assert_eq!(ShoeCategory::Formal.attribute_name(), "material");
        assert_eq!(ShoeCategory::Formal.attribute_default(), "leather");
    }

    #[test]
    fn test_icons() {
        assert_eq!(ShoeCategory::Athletic.icon(), "👟");
        assert_eq!(ShoeCategory::Casual.icon(), "👞");
        assert_eq!(ShoeCategory::Formal.icon(), "👔");
    }
}
