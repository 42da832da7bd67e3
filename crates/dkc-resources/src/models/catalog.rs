use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseReceipt {
    #[serde(deserialize_with = "lenient::datetime")]
    pub date: DateTime<Utc>,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub code: i64,
    pub amount: i64,
    #[serde(default)]
    pub receipt: Vec<WarehouseReceipt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialStock {
    pub id: i64,
    pub status: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub code: String,
    pub warehouse: Vec<Warehouse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialStock {
    #[serde(deserialize_with = "lenient::datetime")]
    pub create: DateTime<Utc>,
    pub materials: Vec<MaterialStock>,
}

/// Full catalog card of one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub node_id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub etim_class_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub series: String,
    pub country: String,
    pub unit: String,
    pub volume: f64,
    pub weight: f64,
    #[serde(deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(default)]
    pub url: Option<Url>,
    pub price: f64,
    pub barcode: Vec<Value>,
    #[serde(default)]
    pub thumbnail_url: Option<Url>,
    #[serde(default)]
    pub additional_images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_string_map")]
    pub attributes: Option<HashMap<String, String>>,
    #[serde(default, deserialize_with = "lenient::opt_string_map")]
    pub etim_attributes: Option<HashMap<String, String>>,
    #[serde(deserialize_with = "lenient::string_map")]
    pub packing: HashMap<String, String>,
    #[serde(deserialize_with = "lenient::string_map")]
    pub avg_delivery: HashMap<String, String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub accessories: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub accessories_codes: Vec<String>,
    #[serde(default)]
    pub warehouse: Option<Vec<Warehouse>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterial {
    pub material: Material,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCertificate {
    pub id: i64,
    pub name: String,
    pub src: Url,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub number: String,
    /// Unix seconds
    pub start_date: i64,
    /// Unix seconds
    pub expiration_date: i64,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub node_ids: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub item_ids: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub item_full_codes: Vec<String>,
}

/// The endpoint answers with a bare array; it is wrapped here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialCertificates {
    pub certificates: Vec<MaterialCertificate>,
}

/// Material code to the list of linked codes
pub type CodeLinks = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialRelated {
    pub related: CodeLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialAccessories {
    pub accessories: CodeLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialVideo {
    pub video: CodeLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialDrawingsSketch {
    pub drawings_sketch: CodeLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialDescription {
    pub description: CodeLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialAnalogs {
    pub analogs: CodeLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialSpecification {
    pub specification: CodeLinks,
}
