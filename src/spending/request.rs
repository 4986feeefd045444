//! Builders turning validated parameters into upstream request bodies.
//!
//! All builders are pure. An empty award type code list is replaced by
//! [`DEFAULT_AWARD_TYPE_CODES`].

use super::types::{
    default_award_type_codes, AgencyFilter, AgencyTier, AgencyType, DetailRequest,
    SearchFilters, SearchRequest, SortOrder, SummaryRequest, TimePeriod, SEARCH_AGENCY_NAME,
    SEARCH_FIELDS, SEARCH_SORT_FIELD,
};

fn codes_or_default(award_type_codes: Vec<String>) -> Vec<String> {
    if award_type_codes.is_empty() {
        default_award_type_codes()
    } else {
        award_type_codes
    }
}

/// Build the award summary body for one agency and fiscal year.
pub fn build_summary_request(
    toptier_code: impl Into<String>,
    fiscal_year: u16,
    agency_type: AgencyType,
    award_type_codes: Vec<String>,
) -> SummaryRequest {
    SummaryRequest {
        toptier_code: toptier_code.into(),
        fiscal_year,
        agency_type,
        award_type_codes: codes_or_default(award_type_codes),
    }
}

/// Build the Department of Defense spending-by-award search for one fiscal year.
pub fn build_search_request(
    fiscal_year: u16,
    limit: u32,
    page: u32,
    award_type_codes: Vec<String>,
) -> SearchRequest {
    SearchRequest {
        filters: SearchFilters {
            agencies: vec![AgencyFilter {
                agency_type: AgencyType::Awarding,
                tier: AgencyTier::Toptier,
                name: SEARCH_AGENCY_NAME.to_string(),
            }],
            time_period: vec![TimePeriod::for_fiscal_year(fiscal_year)],
            award_type_codes: codes_or_default(award_type_codes),
        },
        fields: SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
        sort: SEARCH_SORT_FIELD.to_string(),
        order: SortOrder::Desc,
        limit,
        page,
    }
}

/// Build the award detail lookup.
pub fn build_detail_request(award_id: impl Into<String>) -> DetailRequest {
    DetailRequest {
        award_id: award_id.into(),
    }
}
