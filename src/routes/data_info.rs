//! Handler for `GET /api/data_info`.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use super::STATUS_SUCCESS;
use crate::data::TableInfo;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DataInfoResponse {
    pub status: &'static str,
    pub data_info: BTreeMap<String, TableInfo>,
}

/// Row counts and column names of every table that loaded at startup.
pub async fn data_info(State(state): State<AppState>) -> Json<DataInfoResponse> {
    Json(DataInfoResponse {
        status: STATUS_SUCCESS,
        data_info: state.store.table_info(),
    })
}
