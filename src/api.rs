//! Backend REST API client

use std::time::Duration;

use crate::models::{ChannelPage, EpgInfo, FavoritesResponse, GroupsResponse};
use crate::session::FetchSpec;

type ApiResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Path and query pairs for a channel page request
pub fn page_request(spec: &FetchSpec) -> (String, Vec<(String, String)>) {
    match spec {
        FetchSpec::Listing {
            page,
            page_size,
            group,
        } => {
            let mut query = vec![
                ("page".to_string(), page.to_string()),
                ("page_size".to_string(), page_size.to_string()),
            ];
            if let Some(group) = group {
                query.push(("group".to_string(), group.clone()));
            }
            ("/api/channels".to_string(), query)
        }
        FetchSpec::Search {
            query,
            page,
            page_size,
        } => (
            "/api/channels/search".to_string(),
            vec![
                ("q".to_string(), query.clone()),
                ("page".to_string(), page.to_string()),
                ("page_size".to_string(), page_size.to_string()),
            ],
        ),
    }
}

pub struct ApiClient {
    base_url: String,
    user_agent: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base_url: &str, user_agent: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .timeout_connect(Some(Duration::from_secs(10)))
            .build()
            .new_agent();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
            agent,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApiResult<T> {
        let mut request = self
            .agent
            .get(self.endpoint(path))
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");
        for (key, value) in query {
            request = request.query(key, value);
        }

        let mut response = request
            .call()
            .map_err(|e| format!("Request failed: {}", e))?;

        if response.status() != 200 {
            return Err(format!("HTTP error: {}", response.status()).into());
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| format!("Read failed: {}", e))?;

        Ok(serde_json::from_str(&body)?)
    }

    pub fn get_groups(&self) -> ApiResult<Vec<String>> {
        let response: GroupsResponse = self.get_json("/api/channels/groups", &[])?;
        Ok(response.groups)
    }

    /// Fetch one page of channels: plain listing, group-filtered
    /// listing, or search
    pub fn get_page(&self, spec: &FetchSpec) -> ApiResult<ChannelPage> {
        let (path, query) = page_request(spec);
        self.get_json(&path, &query)
    }

    pub fn get_channels(
        &self,
        page: usize,
        page_size: usize,
        group: Option<&str>,
    ) -> ApiResult<ChannelPage> {
        self.get_page(&FetchSpec::Listing {
            page,
            page_size,
            group: group.map(|g| g.to_string()),
        })
    }

    pub fn search_channels(&self, q: &str, page: usize, page_size: usize) -> ApiResult<ChannelPage> {
        self.get_page(&FetchSpec::Search {
            query: q.to_string(),
            page,
            page_size,
        })
    }

    pub fn get_favorites(&self) -> ApiResult<Vec<String>> {
        let response: FavoritesResponse = self.get_json("/api/favorites", &[])?;
        Ok(response.favorites)
    }

    /// Response bodies of the favorite mutations carry nothing the
    /// client applies; only the status matters.
    pub fn add_favorite(&self, channel_id: &str, list_name: &str) -> ApiResult<()> {
        let body = serde_json::to_string(&serde_json::json!({
            "channel_id": channel_id,
            "list_name": list_name,
        }))?;

        let response = self
            .agent
            .post(self.endpoint("/api/favorites"))
            .header("User-Agent", &self.user_agent)
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()).into());
        }
        Ok(())
    }

    pub fn remove_favorite(&self, channel_id: &str) -> ApiResult<()> {
        let response = self
            .agent
            .delete(self.endpoint(&format!("/api/favorites/{}", channel_id)))
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()).into());
        }
        Ok(())
    }

    /// Trigger a server-side re-ingest of the channel source. Returns no
    /// payload to apply; the caller re-fetches groups and channels after.
    pub fn refresh_channels(&self) -> ApiResult<()> {
        let response = self
            .agent
            .post(self.endpoint("/api/channels/refresh"))
            .header("User-Agent", &self.user_agent)
            .send_empty()
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()).into());
        }
        Ok(())
    }

    pub fn get_epg(&self, channel_id: &str) -> ApiResult<EpgInfo> {
        self.get_json(&format!("/api/epg/{}", channel_id), &[])
    }
}
