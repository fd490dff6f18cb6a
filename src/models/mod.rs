use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Menu,
    Supermarket,
    Attraction,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Menu, Category::Supermarket, Category::Attraction];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Menu => "menu",
            Category::Supermarket => "supermarket",
            Category::Attraction => "attraction",
        }
    }

    /// Exact, case-sensitive match on the wire label.
    pub fn from_string(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Reverse geocoded place names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub country: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl LocationInfo {
    pub const UNKNOWN_COUNTRY: &'static str = "UnknownCountry";
    pub const UNKNOWN_REGION: &'static str = "UnknownRegion";

    /// Placeholder used when geocoding is disabled or finds nothing.
    pub fn unknown() -> Self {
        Self {
            country: Self::UNKNOWN_COUNTRY.to_string(),
            region: Self::UNKNOWN_REGION.to_string(),
            city: None,
        }
    }
}

/// Place names plus the coordinates they were resolved from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    #[serde(flatten)]
    pub info: LocationInfo,
    pub lat: f64,
    pub lng: f64,
}

impl ResolvedLocation {
    pub fn new(info: LocationInfo, coordinates: Coordinates) -> Self {
        Self {
            info,
            lat: coordinates.lat,
            lng: coordinates.lng,
        }
    }
}

/// A validated analyze call, credentials included.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub api_key: String,
    pub model: String,
    pub text: String,
    pub image_base64: Vec<String>,
    pub category: Category,
    pub location: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    pub model: String,
    pub location: ResolvedLocation,
    pub category: Category,
    pub prompt_used: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_string() {
        assert_eq!(Category::from_string("menu"), Some(Category::Menu));
        assert_eq!(Category::from_string("supermarket"), Some(Category::Supermarket));
        assert_eq!(Category::from_string("attraction"), Some(Category::Attraction));
        assert_eq!(Category::from_string("Menu"), None);
        assert_eq!(Category::from_string("beach"), None);
    }

    #[test]
    fn test_result_serializes_camel_case_and_flattens_location() {
        let result = AnalyzeResult {
            model: "gpt-4.1-mini".to_string(),
            location: ResolvedLocation::new(LocationInfo::unknown(), Coordinates { lat: 25.03, lng: 121.56 }),
            category: Category::Menu,
            prompt_used: "prompt".to_string(),
            content: "answer".to_string(),
        };

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["category"], "menu");
        assert_eq!(json["promptUsed"], "prompt");
        assert_eq!(json["location"]["country"], "UnknownCountry");
        assert_eq!(json["location"]["region"], "UnknownRegion");
        assert_eq!(json["location"]["lat"], 25.03);
        assert!(json["location"].get("city").is_none());
    }
}
