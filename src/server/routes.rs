use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Company, QuestionRow};
use crate::error::Error;

use super::{error::ApiError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct CompaniesResponse {
    pub companies: Vec<Company>,
}

pub async fn companies_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CompaniesResponse>, ApiError> {
    let companies = state.catalog.list_companies().await?;
    Ok(Json(CompaniesResponse { companies }))
}

pub async fn questions_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<QuestionRow>>, ApiError> {
    let company = required(&params, "company")?;
    let timeframe = required(&params, "timeframe")?;

    debug!("Questions requested for {company}/{timeframe}");
    let rows = state.catalog.load_questions(company, timeframe).await?;
    Ok(Json(rows))
}

fn required<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str, Error> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::MissingParameter(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_missing_and_empty() {
        let mut params = HashMap::new();
        params.insert("company".to_string(), "accenture".to_string());
        params.insert("timeframe".to_string(), String::new());

        assert_eq!(required(&params, "company").unwrap(), "accenture");
        assert!(matches!(
            required(&params, "timeframe"),
            Err(Error::MissingParameter(_))
        ));
        assert!(required(&params, "other").is_err());
    }
}
