//! # Business Profile
//!
//! The single-tenant business profile that letterheads every quote.
//! Exactly one profile exists per deployment; presence is modeled
//! explicitly as `Option<BusinessProfile>` by the store rather than as
//! implicit global state.

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Company type selected at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    #[serde(rename = "Carpenter/Joiner")]
    CarpenterJoiner,
    #[serde(rename = "Door Fabricator")]
    DoorFabricator,
    #[serde(rename = "Site Contractor")]
    SiteContractor,
    #[serde(rename = "DIY/Individual")]
    DiyIndividual,
}

impl CompanyType {
    /// All company types for UI selection
    pub const ALL: [CompanyType; 4] = [
        CompanyType::CarpenterJoiner,
        CompanyType::DoorFabricator,
        CompanyType::SiteContractor,
        CompanyType::DiyIndividual,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CompanyType::CarpenterJoiner => "Carpenter/Joiner",
            CompanyType::DoorFabricator => "Door Fabricator",
            CompanyType::SiteContractor => "Site Contractor",
            CompanyType::DiyIndividual => "DIY/Individual",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> QuoteResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "carpenter/joiner" | "carpenter" | "joiner" => Ok(CompanyType::CarpenterJoiner),
            "door fabricator" | "fabricator" => Ok(CompanyType::DoorFabricator),
            "site contractor" | "contractor" => Ok(CompanyType::SiteContractor),
            "diy/individual" | "diy" | "individual" => Ok(CompanyType::DiyIndividual),
            _ => Err(QuoteError::invalid_input(
                "company_type",
                s,
                "Expected one of: Carpenter/Joiner, Door Fabricator, Site Contractor, DIY/Individual",
            )),
        }
    }
}

impl std::fmt::Display for CompanyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Business profile captured at first-run setup.
///
/// Replaced wholesale on edit, never patched field-by-field.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Fractal Doors Ltd",
///   "company_type": "Door Fabricator",
///   "address": "12 Mill Lane",
///   "phone": "+44 1234 567890",
///   "email": "quotes@fractaldoors.example",
///   "website": "fractaldoors.example",
///   "social": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Business name (required)
    pub name: String,

    /// Kind of business
    pub company_type: CompanyType,

    /// Postal address
    pub address: String,

    /// Contact phone (required)
    pub phone: String,

    /// Contact email (required)
    pub email: String,

    /// Website, if any
    #[serde(default)]
    pub website: Option<String>,

    /// Social media handle, if any
    #[serde(default)]
    pub social: Option<String>,
}

impl BusinessProfile {
    /// Validate required fields before persistence.
    ///
    /// Name, phone and email must be non-empty; everything else is
    /// optional.
    pub fn validate(&self) -> QuoteResult<()> {
        if self.name.trim().is_empty() {
            return Err(QuoteError::missing_field("name"));
        }
        if self.phone.trim().is_empty() {
            return Err(QuoteError::missing_field("phone"));
        }
        if self.email.trim().is_empty() {
            return Err(QuoteError::missing_field("email"));
        }
        Ok(())
    }

    /// Website and social handle joined for display, empty if neither is set.
    pub fn links_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(web) = self.website.as_deref() {
            if !web.trim().is_empty() {
                parts.push(web.trim());
            }
        }
        if let Some(social) = self.social.as_deref() {
            if !social.trim().is_empty() {
                parts.push(social.trim());
            }
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> BusinessProfile {
        BusinessProfile {
            name: "Fractal Doors Ltd".to_string(),
            company_type: CompanyType::DoorFabricator,
            address: "12 Mill Lane".to_string(),
            phone: "+44 1234 567890".to_string(),
            email: "quotes@fractaldoors.example".to_string(),
            website: Some("fractaldoors.example".to_string()),
            social: None,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(test_profile().validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let mut p = test_profile();
        p.name = "".to_string();
        assert_eq!(p.validate().unwrap_err(), QuoteError::missing_field("name"));

        let mut p = test_profile();
        p.phone = "   ".to_string();
        assert_eq!(p.validate().unwrap_err(), QuoteError::missing_field("phone"));

        let mut p = test_profile();
        p.email = "".to_string();
        assert_eq!(p.validate().unwrap_err(), QuoteError::missing_field("email"));
    }

    #[test]
    fn test_company_type_serialization() {
        let json = serde_json::to_string(&CompanyType::CarpenterJoiner).unwrap();
        assert_eq!(json, "\"Carpenter/Joiner\"");

        let roundtrip: CompanyType = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, CompanyType::CarpenterJoiner);
    }

    #[test]
    fn test_company_type_flexible_parse() {
        assert_eq!(
            CompanyType::from_str_flexible("diy").unwrap(),
            CompanyType::DiyIndividual
        );
        assert!(CompanyType::from_str_flexible("plumber").is_err());
    }

    #[test]
    fn test_links_line() {
        let mut p = test_profile();
        assert_eq!(p.links_line(), "fractaldoors.example");
        p.social = Some("@fractaldoors".to_string());
        assert_eq!(p.links_line(), "fractaldoors.example @fractaldoors");
        p.website = None;
        p.social = None;
        assert_eq!(p.links_line(), "");
    }

    #[test]
    fn test_profile_roundtrip() {
        let profile = test_profile();
        let json = serde_json::to_string_pretty(&profile).unwrap();
        let roundtrip: BusinessProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, roundtrip);
    }
}
