//! HTTP access to the base API.
//!
//! Requests are blocking: each page is fetched, projected and written before the
//! next request goes out.

use crate::config::TapConfig;
use crate::error::{Result, TapError};
use crate::schema::BaseMetadata;
use crate::types::RecordPage;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Anything that can serve pages of a table's records
pub trait RecordSource {
    /// Fetch one page; `offset` is the token returned by the previous page
    fn fetch_page(&self, base_id: &str, table_name: &str, offset: Option<&str>) -> Result<RecordPage>;

    /// Iterate over every page of a table, following continuation tokens
    fn pages<'a>(&'a self, base_id: &'a str, table_name: &'a str) -> Pages<'a, Self>
    where
        Self: Sized,
    {
        Pages {
            source: self,
            base_id,
            table_name,
            offset: None,
            done: false,
        }
    }
}

/// Iterator over the pages of one table.
///
/// Ends after the first page without an offset, or after yielding an error.
pub struct Pages<'a, S: RecordSource> {
    source: &'a S,
    base_id: &'a str,
    table_name: &'a str,
    offset: Option<String>,
    done: bool,
}

impl<'a, S: RecordSource> Iterator for Pages<'a, S> {
    type Item = Result<RecordPage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.source.fetch_page(self.base_id, self.table_name, self.offset.as_deref()) {
            Ok(page) => {
                self.offset = page.next_offset().map(str::to_string);
                self.done = self.offset.is_none();
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Client for the metadata and records endpoints
pub struct AirtableClient {
    client: Client,
    metadata_url: String,
    records_url: String,
    token: String,
}

impl AirtableClient {
    pub fn new(config: &TapConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tap-airtable/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(AirtableClient {
            client,
            metadata_url: config.metadata_url.clone(),
            records_url: config.records_url.clone(),
            token: config.token.clone(),
        })
    }

    /// URL of a table's records; `/` in the table name is escaped
    pub fn table_url(&self, base_id: &str, table_name: &str) -> String {
        format!("{}{}/{}", self.records_url, base_id, table_name.replace('/', "%2F"))
    }

    /// Tables and fields of a base
    pub fn fetch_metadata(&self, base_id: &str) -> Result<BaseMetadata> {
        let url = format!("{}{}", self.metadata_url, base_id);
        debug!(url = %url, "Fetching base metadata");
        self.get_json(self.client.get(&url), &url)
    }

    fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T> {
        let response = request.bearer_auth(&self.token).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TapError::Api {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl RecordSource for AirtableClient {
    fn fetch_page(&self, base_id: &str, table_name: &str, offset: Option<&str>) -> Result<RecordPage> {
        let url = self.table_url(base_id, table_name);
        debug!(url = %url, offset = ?offset, "Fetching records page");

        let mut request = self.client.get(&url);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }
        self.get_json(request, &url)
    }
}
