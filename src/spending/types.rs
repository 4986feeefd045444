//! Request body types for the USAspending v2 API.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Contract award type codes used when the caller does not pick any.
pub const DEFAULT_AWARD_TYPE_CODES: [&str; 4] = ["A", "B", "C", "D"];

/// Agency named in every spending-by-award search.
pub const SEARCH_AGENCY_NAME: &str = "Department of Defense";

/// Columns requested from the spending-by-award search.
pub const SEARCH_FIELDS: [&str; 5] = [
    "Award ID",
    "Recipient Name",
    "Award Amount",
    "Description",
    "Action Date",
];

/// Column the spending-by-award search is sorted on.
pub const SEARCH_SORT_FIELD: &str = "Action Date";

/// Owned copy of [`DEFAULT_AWARD_TYPE_CODES`].
pub fn default_award_type_codes() -> Vec<String> {
    DEFAULT_AWARD_TYPE_CODES.iter().map(|c| c.to_string()).collect()
}

/// Role an agency plays on an award.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgencyType {
    /// Agency that awarded the contract.
    #[default]
    Awarding,
    /// Agency that funded the contract.
    Funding,
}

/// Level of the agency hierarchy a filter matches on. Searches only
/// target whole departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgencyTier {
    /// Top-level department.
    Toptier,
}

/// Sort direction. Search results are always newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    /// Descending.
    Desc,
}

/// Agency selector inside search filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyFilter {
    /// Awarding or funding.
    #[serde(rename = "type")]
    pub agency_type: AgencyType,
    /// Hierarchy level.
    pub tier: AgencyTier,
    /// Agency display name.
    pub name: String,
}

/// Inclusive date window, dates formatted as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    /// First day of the window.
    pub start_date: String,
    /// Last day of the window.
    pub end_date: String,
}

impl TimePeriod {
    /// Window covering January 1st through December 31st of `year`.
    pub fn for_fiscal_year(year: u16) -> Self {
        Self {
            start_date: format!("{year:04}-01-01"),
            end_date: format!("{year:04}-12-31"),
        }
    }
}

/// Filters block of a spending-by-award search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Agencies to match.
    pub agencies: Vec<AgencyFilter>,
    /// Date windows to match.
    pub time_period: Vec<TimePeriod>,
    /// Award type codes to match.
    pub award_type_codes: Vec<String>,
}

/// Body of `POST /search/spending_by_award/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search filters.
    pub filters: SearchFilters,
    /// Output columns.
    pub fields: Vec<String>,
    /// Column to sort on.
    pub sort: String,
    /// Sort direction.
    pub order: SortOrder,
    /// Page size.
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
}

/// Body of `POST /awards/summary/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Toptier agency code, e.g. "020".
    pub toptier_code: String,
    /// Fiscal year.
    pub fiscal_year: u16,
    /// Awarding or funding.
    pub agency_type: AgencyType,
    /// Award type codes to include.
    pub award_type_codes: Vec<String>,
}

/// Lookup of a single award. Carries no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    /// Opaque award identifier, embedded in the resource path.
    pub award_id: String,
}

impl DetailRequest {
    /// Path segments below the API base URL. The trailing empty segment
    /// produces the trailing slash upstream expects.
    pub fn path_segments(&self) -> [&str; 3] {
        ["awards", self.award_id.as_str(), ""]
    }
}
