//! Blocking HTTP client for the Redmine REST API.

use super::errors::from_status;
use super::wire::{
    IssuesResponse, TimeEntriesResponse, TimeEntryEnvelope, TimeEntryRequest, UserEnvelope,
};
use super::{IssueQuery, MAX_PAGE_SIZE, TimeEntryPage, TimeEntryQuery, TrackerClient};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::issue::IssueMetadata;
use crate::models::time_entry::{NewTimeEntry, RemoteTimeEntry, RemoteUser, TimeEntryPatch};
use crate::session::Session;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

const API_KEY_HEADER: &str = "X-Redmine-API-Key";

pub struct RedmineClient {
    http: Client,
    base_url: String,
}

impl RedmineClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> AppResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AppError::Config(
                "Redmine base URL is not configured.".into(),
            ));
        }
        if api_key.trim().is_empty() {
            return Err(AppError::Config(
                "Redmine API key is not configured. Please set your API key with `rtcal apikey --set <KEY>`.".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key.trim())
            .map_err(|_| AppError::Config("API key contains invalid characters".into()))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(concat!("rtcal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Build from configuration and the session's API key. Missing base URL
    /// or key fail here, before any request is sent.
    pub fn from_session(cfg: &Config, session: &Session) -> AppResult<Self> {
        let base_url = cfg.base_url()?;
        let api_key = session.api_key()?;
        Self::new(
            &base_url,
            api_key,
            Duration::from_secs(cfg.request_timeout_secs),
        )
    }

    /// Same as `from_session` but with an explicit key (used to verify a
    /// key before storing it).
    pub fn with_key(cfg: &Config, api_key: &str) -> AppResult<Self> {
        let base_url = cfg.base_url()?;
        Self::new(
            &base_url,
            api_key,
            Duration::from_secs(cfg.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send(&self, request: RequestBuilder, what: &str) -> AppResult<Response> {
        let response = request.send()?;
        let status = response.status();
        log::debug!("{} → HTTP {}", what, status.as_u16());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(from_status(status, &body, what))
    }

    fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let text = response.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl TrackerClient for RedmineClient {
    fn list_time_entries(&self, query: &TimeEntryQuery) -> AppResult<TimeEntryPage> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(owner) = query.owner.as_param() {
            params.push(("user_id", owner));
        }
        params.push(("from", query.from.format("%Y-%m-%d").to_string()));
        params.push(("to", query.to.format("%Y-%m-%d").to_string()));
        params.push(("limit", query.limit.min(MAX_PAGE_SIZE).to_string()));
        params.push(("offset", query.offset.to_string()));

        let request = self.http.get(self.url("time_entries.json")).query(&params);
        let response = self.send(request, "time entries")?;
        let json: TimeEntriesResponse = Self::read_json(response)?;

        Ok(TimeEntryPage {
            entries: json.time_entries,
            total_count: json.total_count,
            offset: json.offset,
            limit: json.limit,
        })
    }

    fn get_time_entry(&self, id: u32) -> AppResult<RemoteTimeEntry> {
        let request = self.http.get(self.url(&format!("time_entries/{id}.json")));
        let response = self.send(request, &format!("time entry {id}"))?;
        let json: TimeEntryEnvelope = Self::read_json(response)?;
        Ok(json.time_entry)
    }

    fn create_time_entry(&self, entry: &NewTimeEntry) -> AppResult<RemoteTimeEntry> {
        let body = TimeEntryRequest::from(entry);
        let request = self.http.post(self.url("time_entries.json")).json(&body);
        let response = self.send(request, "new time entry")?;
        let json: TimeEntryEnvelope = Self::read_json(response)?;
        Ok(json.time_entry)
    }

    fn update_time_entry(&self, id: u32, patch: &TimeEntryPatch) -> AppResult<()> {
        let body = TimeEntryRequest::from(patch);
        let request = self
            .http
            .put(self.url(&format!("time_entries/{id}.json")))
            .json(&body);
        // 204 No Content on success
        self.send(request, &format!("time entry {id}"))?;
        Ok(())
    }

    fn delete_time_entry(&self, id: u32) -> AppResult<()> {
        let request = self
            .http
            .delete(self.url(&format!("time_entries/{id}.json")));
        self.send(request, &format!("time entry {id}"))?;
        Ok(())
    }

    fn get_issues_by_ids(&self, ids: &[u32]) -> AppResult<HashMap<u32, IssueMetadata>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        // closed issues are still referenced by old entries; Redmine caps
        // a page at 100, so larger id sets take one request per 100 ids
        let mut found = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_PAGE_SIZE as usize) {
            let joined = chunk
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");

            let request = self.http.get(self.url("issues.json")).query(&[
                ("issue_id", joined),
                ("status_id", "*".to_string()),
                ("limit", MAX_PAGE_SIZE.to_string()),
            ]);
            let response = self.send(request, "issues")?;
            let json: IssuesResponse = Self::read_json(response)?;
            found.extend(json.issues.into_iter().map(|i| (i.id, i)));
        }

        Ok(found)
    }

    fn list_issues(&self, query: &IssueQuery) -> AppResult<Vec<IssueMetadata>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(project) = &query.project_id {
            params.push(("project_id", project.clone()));
        }
        let limit = if query.limit == 0 { MAX_PAGE_SIZE } else { query.limit };
        params.push(("limit", limit.min(MAX_PAGE_SIZE).to_string()));
        params.push(("offset", query.offset.to_string()));

        let request = self.http.get(self.url("issues.json")).query(&params);
        let response = self.send(request, "issues")?;
        let json: IssuesResponse = Self::read_json(response)?;
        Ok(json.issues)
    }

    fn current_user(&self) -> AppResult<RemoteUser> {
        let request = self.http.get(self.url("users/current.json"));
        let response = self.send(request, "current user")?;
        let json: UserEnvelope = Self::read_json(response)?;
        Ok(json.user)
    }
}
