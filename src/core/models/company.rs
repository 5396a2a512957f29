//! Structured company record extracted from an "about" page

use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Content type of uploaded records
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Company and contact details; absent fields are empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    /// Name of the owner or managing director
    pub owner_name: String,
    /// Position of the owner, e.g. "Geschäftsführer"
    pub position: String,
    /// Full legal name of the company
    pub company_name: String,
    /// Contact email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Fax number
    pub fax: String,
    /// Website URL
    pub website: String,
    /// Profession or professional title
    pub profession: String,
    /// Industry sector
    pub sector: String,
}

impl CompanyInfo {
    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        [
            &self.owner_name,
            &self.position,
            &self.company_name,
            &self.email,
            &self.phone,
            &self.fax,
            &self.website,
            &self.profession,
            &self.sector,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }

    /// Pretty JSON bytes for upload, non-ASCII kept as UTF-8
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
