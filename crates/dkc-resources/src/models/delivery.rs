use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// One line of a delivery time request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTimeContentItem {
    pub code: i64,
    pub count: i64,
    pub warehouse_id: i64,
}

/// Request body for `delivery/time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTimeContent {
    pub company_warehouse: String,
    pub items: Vec<DeliveryTimeContentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDate {
    #[serde(deserialize_with = "lenient::datetime")]
    pub date: DateTime<Utc>,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTime {
    pub code: i64,
    pub status: bool,
    pub date_last: DeliveryDate,
    pub date_detail: Vec<DeliveryDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetDeliveryTime {
    pub items: Vec<DeliveryTime>,
}
