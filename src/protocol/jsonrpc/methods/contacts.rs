// Copyright (c) 2025 Lehua Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! The `contacts.*` methods over a [`ContactIndex`].

use std::sync::Arc;

use futures::future;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::protocol::jsonrpc::error::JsonRpcError;
use crate::protocol::jsonrpc::handler::{JsonRpcHandler, MethodResult};
use crate::search::ContactIndex;

/// Parameters of `contacts.search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Name or e-mail prefix
    pub query: String,
}

/// Parameters of `contacts.add` and `contacts.remove`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    /// Owner of the terms
    pub user_id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// E-mail address
    #[serde(default)]
    pub email: Option<String>,
}

/// Parameters of `contacts.update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParams {
    /// Owner of the terms
    pub user_id: String,

    #[serde(default)]
    pub old_name: Option<String>,

    #[serde(default)]
    pub old_email: Option<String>,

    #[serde(default)]
    pub new_name: Option<String>,

    #[serde(default)]
    pub new_email: Option<String>,
}

/// Registers the `contacts.*` methods against a shared index.
pub fn register_contact_methods(handler: &JsonRpcHandler, index: Arc<RwLock<ContactIndex>>) {
    let search_index = Arc::clone(&index);
    handler.register_method("contacts.search", move |params| {
        future::ready(handle_search(&search_index, params))
    });

    let add_index = Arc::clone(&index);
    handler.register_method("contacts.add", move |params| {
        future::ready(handle_add(&add_index, params))
    });

    let remove_index = Arc::clone(&index);
    handler.register_method("contacts.remove", move |params| {
        future::ready(handle_remove(&remove_index, params))
    });

    let update_index = Arc::clone(&index);
    handler.register_method("contacts.update", move |params| {
        future::ready(handle_update(&update_index, params))
    });

    handler.register_method("contacts.stats", move |_params| {
        future::ready(to_result(&index.read().stats()))
    });
}

fn handle_search(index: &RwLock<ContactIndex>, params: Option<Value>) -> MethodResult {
    let params: SearchParams = parse_params("contacts.search", params)?;
    let matches = index.read().search_contacts(&params.query)?;
    to_result(&matches)
}

fn handle_add(index: &RwLock<ContactIndex>, params: Option<Value>) -> MethodResult {
    let params: UserParams = parse_params("contacts.add", params)?;
    let added = index.write().add_user(
        &params.user_id,
        params.name.as_deref(),
        params.email.as_deref(),
    );
    info!(user_id = %params.user_id, added, "Contact added");
    Ok(json!({ "added": added }))
}

fn handle_remove(index: &RwLock<ContactIndex>, params: Option<Value>) -> MethodResult {
    let params: UserParams = parse_params("contacts.remove", params)?;
    let removed = index.write().remove_user(
        &params.user_id,
        params.name.as_deref(),
        params.email.as_deref(),
    );
    info!(user_id = %params.user_id, removed, "Contact removed");
    Ok(json!({ "removed": removed }))
}

fn handle_update(index: &RwLock<ContactIndex>, params: Option<Value>) -> MethodResult {
    let params: UpdateParams = parse_params("contacts.update", params)?;
    index.write().update_user(
        &params.user_id,
        params.old_name.as_deref(),
        params.old_email.as_deref(),
        params.new_name.as_deref(),
        params.new_email.as_deref(),
    );
    info!(user_id = %params.user_id, "Contact updated");
    Ok(Value::Bool(true))
}

fn parse_params<T: DeserializeOwned>(method: &str, params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| {
        JsonRpcError::invalid_params(format!("{method} requires an object of parameters"))
    })?;
    serde_json::from_value(params)
        .map_err(|err| JsonRpcError::invalid_params(format!("{method}: {err}")))
}

fn to_result<T: Serialize>(value: &T) -> MethodResult {
    serde_json::to_value(value).map_err(|err| JsonRpcError::internal_error(err.to_string()))
}
