//! Query parameter extraction, defaults and validation.
//!
//! Handlers extract [`SummaryQuery`] / [`ContractsQuery`] with
//! `axum_extra::extract::Query`, which accepts repeated keys for list
//! parameters (`award_type_codes=A&award_type_codes=B`, or the bracketed
//! `award_type_codes[]=A`). For scalar parameters the last occurrence wins.
//! Unknown keys are ignored. Range checks happen in the `TryFrom` impls.

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::error::ApiError;
use crate::spending::request::{build_search_request, build_summary_request};
use crate::spending::types::{AgencyType, SearchRequest, SummaryRequest};

/// Supported fiscal years.
pub const FISCAL_YEAR_RANGE: RangeInclusive<i64> = 2000..=2100;
/// Supported page sizes.
pub const LIMIT_RANGE: RangeInclusive<i64> = 1..=500;
/// Supported toptier code lengths.
pub const TOPTIER_CODE_LEN: RangeInclusive<usize> = 3..=4;

/// Fiscal year used when the caller omits one.
pub const DEFAULT_FISCAL_YEAR: u16 = 2023;
/// Toptier code used when the caller omits one (Department of Defense).
pub const DEFAULT_TOPTIER_CODE: &str = "020";
/// Page size used when the caller omits one.
pub const DEFAULT_LIMIT: u32 = 50;
/// Page used when the caller omits one.
pub const DEFAULT_PAGE: u32 = 1;

/// Raw query of `GET /api/summary`.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub toptier_code: Option<String>,
    pub fiscal_year: Option<i64>,
    pub agency_type: Option<AgencyType>,
    #[serde(default)]
    pub award_type_codes: Vec<String>,
    #[serde(default, rename = "award_type_codes[]")]
    pub award_type_codes_bracketed: Vec<String>,
}

/// Raw query of `GET /api/contracts`.
#[derive(Debug, Default, Deserialize)]
pub struct ContractsQuery {
    pub fiscal_year: Option<i64>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
    #[serde(default)]
    pub award_type_codes: Vec<String>,
    #[serde(default, rename = "award_type_codes[]")]
    pub award_type_codes_bracketed: Vec<String>,
}

fn check_range(key: &str, value: i64, range: &RangeInclusive<i64>) -> Result<i64, ApiError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::Validation(format!(
            "{key} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )))
    }
}

fn fiscal_year(raw: Option<i64>) -> Result<u16, ApiError> {
    match raw {
        None => Ok(DEFAULT_FISCAL_YEAR),
        Some(year) => {
            let year = check_range("fiscal_year", year, &FISCAL_YEAR_RANGE)?;
            u16::try_from(year).map_err(|_| ApiError::Validation("fiscal_year out of range".into()))
        }
    }
}

fn award_type_codes(plain: Vec<String>, bracketed: Vec<String>) -> Result<Vec<String>, ApiError> {
    plain
        .into_iter()
        .chain(bracketed)
        .map(|code| {
            let code = code.trim();
            if code.is_empty() {
                Err(ApiError::Validation(
                    "award_type_codes entries must not be empty".to_string(),
                ))
            } else {
                Ok(code.to_string())
            }
        })
        .collect()
}

/// Validate an award identifier taken from the request path.
///
/// Any non-empty string is passed through, except `.` and `..`, which would
/// name a different upstream resource once placed in a URL path.
pub fn award_id(raw: String) -> Result<String, ApiError> {
    match raw.as_str() {
        "" => Err(ApiError::Validation("award_id must not be empty".to_string())),
        "." | ".." => Err(ApiError::Validation(format!(
            "award_id {raw:?} is not a valid award identifier"
        ))),
        _ => Ok(raw),
    }
}

/// Validated parameters of `GET /api/summary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryParams {
    /// Toptier agency code.
    pub toptier_code: String,
    /// Fiscal year.
    pub fiscal_year: u16,
    /// Awarding or funding.
    pub agency_type: AgencyType,
    /// Award type codes; empty means the defaults.
    pub award_type_codes: Vec<String>,
}

impl TryFrom<SummaryQuery> for SummaryParams {
    type Error = ApiError;

    fn try_from(query: SummaryQuery) -> Result<Self, Self::Error> {
        let toptier_code = query
            .toptier_code
            .unwrap_or_else(|| DEFAULT_TOPTIER_CODE.to_string());
        if !TOPTIER_CODE_LEN.contains(&toptier_code.chars().count()) {
            return Err(ApiError::Validation(format!(
                "toptier_code must be {} to {} characters long, got {toptier_code:?}",
                TOPTIER_CODE_LEN.start(),
                TOPTIER_CODE_LEN.end()
            )));
        }

        Ok(Self {
            toptier_code,
            fiscal_year: fiscal_year(query.fiscal_year)?,
            agency_type: query.agency_type.unwrap_or_default(),
            award_type_codes: award_type_codes(
                query.award_type_codes,
                query.award_type_codes_bracketed,
            )?,
        })
    }
}

impl SummaryParams {
    /// Build the upstream body.
    pub fn into_request(self) -> SummaryRequest {
        build_summary_request(
            self.toptier_code,
            self.fiscal_year,
            self.agency_type,
            self.award_type_codes,
        )
    }
}

/// Validated parameters of `GET /api/contracts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractsParams {
    /// Fiscal year.
    pub fiscal_year: u16,
    /// Page size.
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
    /// Award type codes; empty means the defaults.
    pub award_type_codes: Vec<String>,
}

impl TryFrom<ContractsQuery> for ContractsParams {
    type Error = ApiError;

    fn try_from(query: ContractsQuery) -> Result<Self, Self::Error> {
        let limit = match query.limit {
            None => DEFAULT_LIMIT,
            Some(limit) => check_range("limit", limit, &LIMIT_RANGE)? as u32,
        };

        let page = match query.page {
            None => DEFAULT_PAGE,
            Some(page) => u32::try_from(page)
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| {
                    ApiError::Validation(format!("page must be at least 1, got {page}"))
                })?,
        };

        Ok(Self {
            fiscal_year: fiscal_year(query.fiscal_year)?,
            limit,
            page,
            award_type_codes: award_type_codes(
                query.award_type_codes,
                query.award_type_codes_bracketed,
            )?,
        })
    }
}

impl ContractsParams {
    /// Build the upstream body.
    pub fn into_request(self) -> SearchRequest {
        build_search_request(self.fiscal_year, self.limit, self.page, self.award_type_codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contracts(query: ContractsQuery) -> Result<ContractsParams, ApiError> {
        ContractsParams::try_from(query)
    }

    #[test]
    fn summary_defaults() {
        let params = SummaryParams::try_from(SummaryQuery::default()).unwrap();
        assert_eq!(
            params,
            SummaryParams {
                toptier_code: "020".to_string(),
                fiscal_year: 2023,
                agency_type: AgencyType::Awarding,
                award_type_codes: Vec::new(),
            }
        );
        assert_eq!(params.into_request().award_type_codes, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn summary_accepts_all_parameters() {
        let params = SummaryParams::try_from(SummaryQuery {
            toptier_code: Some("097".into()),
            fiscal_year: Some(2021),
            agency_type: Some(AgencyType::Funding),
            award_type_codes: vec!["A".into()],
            award_type_codes_bracketed: vec!["C".into()],
        })
        .unwrap();

        assert_eq!(params.toptier_code, "097");
        assert_eq!(params.fiscal_year, 2021);
        assert_eq!(params.agency_type, AgencyType::Funding);
        assert_eq!(params.award_type_codes, vec!["A", "C"]);
    }

    #[test]
    fn summary_rejects_bad_toptier_code_length() {
        for code in ["02", "02000"] {
            let err = SummaryParams::try_from(SummaryQuery {
                toptier_code: Some(code.into()),
                ..Default::default()
            })
            .unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
    }

    #[test]
    fn fiscal_year_bounds_are_inclusive() {
        for year in [2000, 2100] {
            assert!(contracts(ContractsQuery {
                fiscal_year: Some(year),
                ..Default::default()
            })
            .is_ok());
        }
        for year in [1999, 2101, -1] {
            let err = contracts(ContractsQuery {
                fiscal_year: Some(year),
                ..Default::default()
            })
            .unwrap_err();
            assert!(err.to_string().contains("fiscal_year"), "{year}: {err}");
        }
    }

    #[test]
    fn contracts_defaults() {
        let params = contracts(ContractsQuery::default()).unwrap();
        assert_eq!(params.fiscal_year, 2023);
        assert_eq!(params.limit, 50);
        assert_eq!(params.page, 1);
        assert!(params.award_type_codes.is_empty());
    }

    #[test]
    fn contracts_limit_and_page_bounds() {
        let with = |limit, page| {
            contracts(ContractsQuery {
                limit,
                page,
                ..Default::default()
            })
        };
        assert!(with(Some(500), None).is_ok());
        assert!(with(Some(0), None).is_err());
        assert!(with(Some(501), None).is_err());
        assert!(with(None, Some(0)).is_err());
        assert!(with(None, Some(i64::from(u32::MAX) + 1)).is_err());
    }

    #[test]
    fn empty_award_type_code_is_rejected() {
        assert!(contracts(ContractsQuery {
            award_type_codes: vec![" ".into()],
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn dot_award_ids_are_rejected() {
        for id in [".", "..", ""] {
            let err = award_id(id.to_string()).unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "{id:?}");
        }
        assert_eq!(award_id("CONT_AWD_1".into()).unwrap(), "CONT_AWD_1");
        assert_eq!(award_id("...".into()).unwrap(), "...");
    }
}
