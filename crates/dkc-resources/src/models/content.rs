//! Revision feeds and file transfer.
//!
//! Every revision section has the same `{updated, removed}` shape, captured
//! once by [`Changes`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRevisionLastSize {
    pub size: i64,
    pub forced_update: bool,
}

/// Entries added or changed since the requested revision, and ids of removed ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Changes<T> {
    pub updated: Vec<T>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub removed: Vec<String>,
}

impl<T> Changes<T> {
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub country_id: String,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub coordinates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub parent_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sort: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawable {
    pub name: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sort: String,
    #[serde(deserialize_with = "lenient::string")]
    pub node_id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub barcode: Vec<String>,
    #[serde(default)]
    pub thumbnail_url: Option<Url>,
    #[serde(default)]
    pub additional_images: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::string_map")]
    pub attributes: HashMap<String, String>,
    pub drawables: Vec<Drawable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub parent_id: String,
    pub name: String,
    pub src: String,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub node_ids: Vec<String>,
}

/// Booklets and instructions share this shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    pub src: String,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub node_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDocument {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    pub src: String,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub node_ids: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub item_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalepointLocation {
    #[serde(deserialize_with = "lenient::string")]
    pub city_id: String,
    pub address: String,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub coordinates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalepointContact {
    #[serde(deserialize_with = "lenient::string_vec")]
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salepoint {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    pub url: String,
    pub location: SalepointLocation,
    pub contact: SalepointContact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionLast {
    /// `false` when the feed is a full snapshot rather than a delta
    pub delta: bool,
    pub countries: Changes<Country>,
    pub cities: Changes<City>,
    pub nodes: Changes<Node>,
    pub products: Changes<Product>,
    pub catalogues: Changes<Catalogue>,
    pub booklets: Changes<Document>,
    pub certificates: Changes<CertificateDocument>,
    pub instructions: Changes<Document>,
    pub salepoints: Changes<Salepoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetRevisionLast {
    pub revision: RevisionLast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    pub links: Vec<DrawingLink>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub node_ids: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub item_ids: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub item_full_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionDrawings {
    pub delta: bool,
    pub drawings: Changes<Drawing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetRevisionDrawings {
    pub revision: RevisionDrawings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionCertificate {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    pub src: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub number: String,
    pub start_date: i64,
    pub expiration_date: i64,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub node_ids: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub item_ids: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub item_full_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionCertificates {
    pub delta: bool,
    pub certificates: Changes<RevisionCertificate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetRevisionCertificates {
    pub revision: RevisionCertificates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionMaterial {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub node_id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub etim_class_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub series: String,
    pub country: String,
    pub unit: String,
    pub volume: f64,
    pub weight: f64,
    #[serde(deserialize_with = "lenient::string")]
    pub code: String,
    pub url: String,
    pub price: f64,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub barcode: Vec<String>,
    #[serde(default)]
    pub thumbnail_url: Option<Url>,
    #[serde(default)]
    pub additional_images: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::string_map")]
    pub attributes: HashMap<String, String>,
    #[serde(deserialize_with = "lenient::string_map")]
    pub etim_attributes: HashMap<String, String>,
    #[serde(deserialize_with = "lenient::string_map")]
    pub packing: HashMap<String, String>,
    #[serde(deserialize_with = "lenient::string_map")]
    pub avg_delivery: HashMap<String, String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub accessories: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub accessories_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionMaterials {
    pub delta: bool,
    pub materials: Changes<RevisionMaterial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetRevisionMaterials {
    pub revision: RevisionMaterials,
}

/// A stored file; `value` is the base64 payload as the API returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFile {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFile {
    pub id: i64,
}

/// Form body for uploading a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFileContent {
    pub name: String,
    pub value: String,
}
