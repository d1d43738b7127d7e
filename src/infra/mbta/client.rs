use anyhow::Result;
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::services::transit_api::TransitApi;
use transit_lookup::config::Config;
use transit_lookup::error::LookupError;
use transit_lookup::fetch::{ApiKey, BasicClient, HttpClient, fetch_json};
use transit_lookup::models::{
    Alert, Document, ListDocument, Resource, Route, RoutePattern, Vehicle,
};

/// Activities an alert must affect to be listed.
const ALERT_ACTIVITIES: &str = "BOARD,EXIT,RIDE";

pub struct MbtaClient {
    base_url: Url,
    http: Box<dyn HttpClient>,
}

impl MbtaClient {
    /// Builds a client from configuration, sending the API key when one is set.
    pub fn new(config: &Config) -> Result<Self> {
        let basic = BasicClient::with_timeouts(config.timeout, config.connect_timeout)?;

        let http: Box<dyn HttpClient> = match &config.api_key {
            Some(key) => Box::new(ApiKey::mbta(basic, key)?),
            None => Box::new(basic),
        };

        Ok(Self::with_http(config.base_url.clone(), http))
    }

    pub fn with_http(base_url: Url, http: Box<dyn HttpClient>) -> Self {
        Self { base_url, http }
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<D: DeserializeOwned>(&self, url: Url) -> Result<D, LookupError> {
        debug!(%url, "GET");
        fetch_json(self.http.as_ref(), url).await
    }

    /// Fetches one record by id. A blank id would address the collection
    /// endpoint instead, so it is reported as not found without a request.
    async fn get_one<A: DeserializeOwned + Default>(
        &self,
        kind: &'static str,
        collection: &str,
        id: &str,
    ) -> Result<Resource<A>, LookupError> {
        let not_found = || LookupError::NotFound {
            kind,
            id: id.to_string(),
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(not_found());
        }

        let url = self.endpoint(&[collection, id])?;
        self.get::<Document<Resource<A>>>(url)
            .await?
            .into_data()
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl TransitApi for MbtaClient {
    #[tracing::instrument(skip(self))]
    async fn get_route(&self, id: &str) -> Result<Route, LookupError> {
        self.get_one("Route", "routes", id).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_route_patterns(&self, route_id: &str) -> Result<Vec<RoutePattern>, LookupError> {
        let mut url = self.endpoint(&["route_patterns"])?;
        url.query_pairs_mut().append_pair("filter[route]", route_id);
        let patterns = self.get::<ListDocument<RoutePattern>>(url).await?.into_list();
        debug!(count = patterns.len(), "Route patterns fetched");
        Ok(patterns)
    }

    #[tracing::instrument(skip(self))]
    async fn get_vehicle(&self, id: &str) -> Result<Vehicle, LookupError> {
        self.get_one("Vehicle", "vehicles", id).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_alerts(&self) -> Result<Vec<Alert>, LookupError> {
        let mut url = self.endpoint(&["alerts"])?;
        url.query_pairs_mut()
            .append_pair("filter[activity]", ALERT_ACTIVITIES);
        let alerts = self.get::<ListDocument<Alert>>(url).await?.into_list();
        debug!(count = alerts.len(), "Alerts fetched");
        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Answers every request with the same canned response and records the
    /// requested URLs.
    struct Canned {
        status: u16,
        body: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl HttpClient for Canned {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            self.seen.lock().unwrap().push(req.url().to_string());
            let resp = http::Response::builder()
                .status(self.status)
                .body(self.body)
                .unwrap();
            Ok(resp.into())
        }
    }

    fn client(status: u16, body: &'static str) -> (MbtaClient, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let http = Canned {
            status,
            body,
            seen: seen.clone(),
        };
        let base = "https://api-v3.mbta.com".parse().unwrap();
        (MbtaClient::with_http(base, Box::new(http)), seen)
    }

    #[tokio::test]
    async fn test_route_url_is_encoded() {
        let (api, seen) = client(200, r#"{"data": {"id": "Green-B", "attributes": {}}}"#);
        let route = api.get_route("Green B/1").await.unwrap();
        assert_eq!(route.id, "Green-B");
        assert_eq!(
            seen.lock().unwrap()[0],
            "https://api-v3.mbta.com/routes/Green%20B%2F1"
        );
    }

    #[tokio::test]
    async fn test_missing_route_is_not_found() {
        let (api, _) = client(200, r#"{"data": null}"#);
        let err = api.get_route("999").await.unwrap_err();
        assert_eq!(err.user_message(), "Route not found.");
    }

    #[tokio::test]
    async fn test_route_patterns_filter() {
        let (api, seen) = client(
            200,
            r#"{"data": [{"id": "66-_-0", "attributes": {"direction_id": 0, "direction_headsign": "Harvard"}}]}"#,
        );
        let patterns = api.list_route_patterns("66").await.unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(
            seen.lock().unwrap()[0],
            "https://api-v3.mbta.com/route_patterns?filter%5Broute%5D=66"
        );
    }

    #[tokio::test]
    async fn test_alerts_activity_filter() {
        let (api, seen) = client(200, "{}");
        let alerts = api.list_alerts().await.unwrap();
        assert!(alerts.is_empty());
        assert_eq!(
            seen.lock().unwrap()[0],
            "https://api-v3.mbta.com/alerts?filter%5Bactivity%5D=BOARD%2CEXIT%2CRIDE"
        );
    }

    #[tokio::test]
    async fn test_vehicle_error_detail() {
        let (api, _) = client(404, r#"{"errors": [{"detail": "Not Found"}]}"#);
        let err = api.get_vehicle("nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Not Found");
    }

    #[tokio::test]
    async fn test_blank_id_is_not_found_without_request() {
        let (api, seen) = client(200, r#"{"data": []}"#);

        let err = api.get_vehicle("  ").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound { kind: "Vehicle", .. }));
        assert_eq!(err.user_message(), "Vehicle not found.");

        let err = api.get_route("").await.unwrap_err();
        assert_eq!(err.user_message(), "Route not found.");

        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vehicle_id_is_trimmed() {
        let (api, seen) = client(200, r#"{"data": {"id": "y1899", "attributes": {}}}"#);
        let vehicle = api.get_vehicle(" y1899 ").await.unwrap();
        assert_eq!(vehicle.id, "y1899");
        assert_eq!(seen.lock().unwrap()[0], "https://api-v3.mbta.com/vehicles/y1899");
    }

    #[tokio::test]
    async fn test_alerts_skip_malformed_entries() {
        let (api, _) = client(200, r#"{"data": [null, {"id": "a1", "attributes": {}}]}"#);
        let alerts = api.list_alerts().await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "a1");
    }

    #[test]
    fn test_base_path_is_kept() {
        let base = "http://localhost:4000/v3/".parse().unwrap();
        let (canned, _) = client(200, "{}");
        let api = MbtaClient::with_http(base, canned.http);
        let url = api.endpoint(&["vehicles", "y1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/v3/vehicles/y1");
    }
}
