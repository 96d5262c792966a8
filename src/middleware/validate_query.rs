use axum::{
    extract::{Query, Request},
    http::Uri,
    middleware::Next,
    response::Response,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::filter::{CompanyFilter, JobFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
}

/// Allowed query keys for one resource and the min/max pairs that must be ordered
#[derive(Debug)]
pub struct QueryRules {
    pub fields: &'static [(&'static str, FieldKind)],
    pub ranges: &'static [(&'static str, &'static str)],
}

pub const COMPANY_QUERY: QueryRules = QueryRules {
    fields: &[
        ("name", FieldKind::Text),
        ("minEmployees", FieldKind::Integer),
        ("maxEmployees", FieldKind::Integer),
    ],
    ranges: &[("minEmployees", "maxEmployees")],
};

pub const JOB_QUERY: QueryRules = QueryRules {
    fields: &[
        ("title", FieldKind::Text),
        ("minSalary", FieldKind::Integer),
        ("hasEquity", FieldKind::Boolean),
    ],
    ranges: &[],
};

impl QueryRules {
    /// Every violation in `pairs`: unknown keys first, then bad values, then inverted ranges.
    /// An allowed key with an empty value counts as absent.
    pub fn violations(&self, pairs: &[(String, String)]) -> Vec<String> {
        let mut errors = Vec::new();
        let lookup = |key: &str| {
            pairs
                .iter()
                .find(|(k, v)| k == key && !v.is_empty())
                .map(|(_, v)| v.as_str())
        };

        let mut seen: Vec<&str> = Vec::new();
        for (key, _) in pairs {
            let key = key.as_str();
            if !self.fields.iter().any(|&(name, _)| name == key) && !seen.contains(&key) {
                errors.push(format!("Invalid field: {}", key));
                seen.push(key);
            }
        }

        for &(name, kind) in self.fields {
            let Some(value) = lookup(name) else { continue };
            match kind {
                FieldKind::Text => {}
                FieldKind::Integer => {
                    if value.parse::<i32>().is_err() {
                        errors.push(format!("{} must be a number", name));
                    }
                }
                FieldKind::Boolean => {
                    if value != "true" && value != "false" {
                        errors.push(format!("{} must be 'true' or 'false'", name));
                    }
                }
            }
        }

        for &(min, max) in self.ranges {
            let lo = lookup(min).and_then(|v| v.parse::<i32>().ok());
            let hi = lookup(max).and_then(|v| v.parse::<i32>().ok());
            if let (Some(lo), Some(hi)) = (lo, hi) {
                if lo > hi {
                    errors.push(format!("{} cannot be greater than {}", min, max));
                }
            }
        }

        errors
    }
}

/// Check the query string against `rules`, then parse it into `T` and store it
/// as a request extension for the handler.
async fn validate_query<T>(rules: &QueryRules, mut request: Request, next: Next) -> Result<Response, ApiError>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(request.uri())
        .map_err(|e| ApiError::bad_request(e.body_text()))?;

    let errors = rules.violations(&pairs);
    if !errors.is_empty() {
        tracing::debug!(path = %request.uri().path(), "rejected query: {}", errors.join(", "));
        return Err(ApiError::bad_request(errors.join(", ")));
    }

    let filter = parse_filter::<T>(&pairs)?;
    request.extensions_mut().insert(filter);

    Ok(next.run(request).await)
}

/// Deserialize the filter from the non-empty pairs only
fn parse_filter<T: DeserializeOwned>(pairs: &[(String, String)]) -> Result<T, ApiError> {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().filter(|(_, v)| !v.is_empty()))
        .finish();
    let uri: Uri = format!("/?{}", query)
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid query string"))?;
    let Query(filter) = Query::<T>::try_from_uri(&uri).map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(filter)
}

pub async fn validate_company_query(request: Request, next: Next) -> Result<Response, ApiError> {
    validate_query::<CompanyFilter>(&COMPANY_QUERY, request, next).await
}

pub async fn validate_job_query(request: Request, next: Next) -> Result<Response, ApiError> {
    validate_query::<JobFilter>(&JOB_QUERY, request, next).await
}
