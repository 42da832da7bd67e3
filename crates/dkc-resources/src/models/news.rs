use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsCompany {
    pub title: String,
    pub text: String,
    pub thumbnail_url: String,
    pub images: Vec<String>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetNewsCompany {
    pub news: Vec<NewsCompany>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsCommunity {
    pub text: String,
    #[serde(deserialize_with = "lenient::date")]
    pub timestamp: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetNewsCommunity {
    pub news: Vec<NewsCommunity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsProducts {
    pub title: String,
    pub text: String,
    pub thumbnail_url: Url,
    pub images: Vec<String>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetNewsProducts {
    pub news: Vec<NewsProducts>,
}
