//! Request DTOs for Web API.

use serde::{de, Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation::no_control_chars;
use crate::node::{NewNode, NodeType, NodeUpdate};
use crate::web::error::ApiError;

/// Node creation request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    /// Node name.
    #[serde(default)]
    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "no_control_chars")
    )]
    pub name: Option<String>,
    /// `FILE` or `FOLDER`.
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    /// Parent folder ID (empty or absent = root level).
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Size in bytes, as a number or decimal string.
    #[serde(default, deserialize_with = "deserialize_size")]
    #[schema(value_type = Option<String>)]
    pub size: Option<i64>,
    /// MIME type (empty = none).
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl CreateNodeRequest {
    /// Convert into a [`NewNode`].
    pub fn into_new_node(self) -> Result<NewNode, ApiError> {
        let (name, node_type) = match (self.name, self.node_type) {
            (Some(name), Some(node_type)) if !name.trim().is_empty() => (name, node_type),
            _ => return Err(ApiError::bad_request("Name and type are required")),
        };

        let mut new_node = NewNode::new(name, parse_node_type(&node_type)?);
        new_node.parent_id = non_empty(self.parent_id);
        new_node.size = self.size;
        new_node.mime_type = non_empty(self.mime_type);
        Ok(new_node)
    }
}

/// Partial node update request.
///
/// Absent fields are left alone; an explicit `null` clears `parentId`,
/// `size` or `mimeType`.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeRequest {
    /// New name.
    #[serde(default)]
    #[validate(
        length(
            min = 1,
            max = 255,
            message = "Name must be between 1 and 255 characters"
        ),
        custom(function = "no_control_chars")
    )]
    pub name: Option<String>,
    /// New type.
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    /// New parent folder ID.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub parent_id: Option<Option<String>>,
    /// New size.
    #[serde(default, deserialize_with = "deserialize_double_size")]
    #[schema(value_type = Option<String>)]
    pub size: Option<Option<i64>>,
    /// New MIME type.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub mime_type: Option<Option<String>>,
}

impl UpdateNodeRequest {
    /// Convert into a [`NodeUpdate`].
    pub fn into_update(self) -> Result<NodeUpdate, ApiError> {
        let node_type = self
            .node_type
            .as_deref()
            .map(parse_node_type)
            .transpose()?;

        Ok(NodeUpdate {
            name: self.name,
            node_type,
            parent_id: self.parent_id.map(non_empty),
            size: self.size,
            mime_type: self.mime_type.map(non_empty),
        })
    }
}

/// Pagination query for child listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page size (clamped to the configured maximum).
    pub limit: Option<u32>,
    /// Number of children to skip.
    pub offset: Option<u32>,
}

/// Search query.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring to look for in names.
    #[serde(default)]
    pub q: String,
    /// Result cap (clamped to the configured maximum).
    pub limit: Option<u32>,
}

fn parse_node_type(value: &str) -> Result<NodeType, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid node type"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Size as sent over the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(i64),
    Text(String),
}

fn deserialize_size<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawSize>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawSize::Number(n)) => Ok(Some(n)),
        Some(RawSize::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawSize::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom("size must be an integer")),
    }
}

fn deserialize_double_size<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_size(deserializer).map(Some)
}

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
