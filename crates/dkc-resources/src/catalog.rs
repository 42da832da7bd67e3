use tracing::instrument;

use crate::client::RestClient;
use crate::error::{ResourceError, Result};
use crate::models::catalog::*;
use crate::response::ApiResponse;

/// Material selection for [`Catalog::get_material_stock`].
///
/// An empty query asks for the stock of every material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockQuery {
    codes: Vec<String>,
    ids: Vec<String>,
}

impl StockQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.codes.push(code.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codes.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if !self.codes.is_empty() {
            query.push(("code", self.codes.join(",")));
        }
        if !self.ids.is_empty() {
            query.push(("id", self.ids.join(",")));
        }
        query
    }
}

/// Material catalog: cards, certificates, stock and cross references
#[derive(Debug, Clone)]
pub struct Catalog {
    client: RestClient,
}

fn code_query(code: Option<&str>) -> Vec<(&'static str, String)> {
    match code {
        Some(code) if !code.is_empty() => vec![("code", code.to_string())],
        _ => Vec::new(),
    }
}

impl Catalog {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Catalog card for a material code
    #[instrument(skip(self))]
    pub async fn get_material(&self, code: &str) -> Result<ApiResponse<GetMaterial>> {
        if code.trim().is_empty() {
            return Err(ResourceError::invalid("code", "material code must not be empty"));
        }
        self.client
            .get(&["catalog", "material"], &code_query(Some(code)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_material_certificates(
        &self,
        code: &str,
    ) -> Result<ApiResponse<GetMaterialCertificates>> {
        if code.trim().is_empty() {
            return Err(ResourceError::invalid("code", "material code must not be empty"));
        }
        let response: ApiResponse<Vec<MaterialCertificate>> = self
            .client
            .get(&["catalog", "material", "certificates"], &code_query(Some(code)))
            .await?;
        Ok(response.map(|certificates| GetMaterialCertificates { certificates }))
    }

    /// Stock levels per warehouse with expected receipts
    #[instrument(skip(self))]
    pub async fn get_material_stock(
        &self,
        query: &StockQuery,
    ) -> Result<ApiResponse<GetMaterialStock>> {
        self.client
            .get(&["catalog", "material", "stock"], &query.to_query())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_material_related(
        &self,
        code: Option<&str>,
    ) -> Result<ApiResponse<GetMaterialRelated>> {
        self.client
            .get(&["catalog", "material", "related"], &code_query(code))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_material_accessories(
        &self,
        code: Option<&str>,
    ) -> Result<ApiResponse<GetMaterialAccessories>> {
        self.client
            .get(&["catalog", "material", "accessories"], &code_query(code))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_material_video(
        &self,
        code: Option<&str>,
    ) -> Result<ApiResponse<GetMaterialVideo>> {
        self.client
            .get(&["catalog", "material", "video"], &code_query(code))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_material_drawings_sketch(
        &self,
        code: Option<&str>,
    ) -> Result<ApiResponse<GetMaterialDrawingsSketch>> {
        self.client
            .get(&["catalog", "material", "drawings", "sketch"], &code_query(code))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_material_description(
        &self,
        code: Option<&str>,
    ) -> Result<ApiResponse<GetMaterialDescription>> {
        self.client
            .get(&["catalog", "material", "description"], &code_query(code))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_material_analogs(
        &self,
        code: Option<&str>,
    ) -> Result<ApiResponse<GetMaterialAnalogs>> {
        self.client
            .get(&["catalog", "material", "analogs"], &code_query(code))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_material_specification(
        &self,
        code: Option<&str>,
    ) -> Result<ApiResponse<GetMaterialSpecification>> {
        self.client
            .get(&["catalog", "material", "specification"], &code_query(code))
            .await
    }
}
