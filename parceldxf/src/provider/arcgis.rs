//! ODNR statewide parcel layer provider.
//!
//! Queries an ArcGIS MapServer layer for every parcel intersecting an
//! envelope and returns the features as GeoJSON.
//!
//! # URL Pattern
//!
//! `{endpoint}?f=geojson&geometryType=esriGeometryEnvelope&geometry={xmin},{ymin},{xmax},{ymax}
//! &inSR={service srid}&outSR={zone epsg}&outFields={fields}&returnGeometry=true&where=1=1`
//!
//! - The envelope is given in the service's own reference system (`inSR`)
//! - Geometries come back in the caller's State-Plane zone (`outSR`), so no
//!   reprojection of the response is needed
//! - No authentication, no paging: if the layer caps the record count for a
//!   large envelope, the truncated result is returned as-is

use geojson::GeoJson;
use tracing::debug;

use crate::crs::{BoundingBox, CrsTable, Zone};
use crate::parcel::ParcelCollection;
use crate::provider::{HttpClient, ProviderError};

/// Query endpoint of the ODNR landbase parcel layer.
pub const ODNR_PARCEL_URL: &str =
    "https://gis.ohiodnr.gov/arcgis_site2/rest/services/OIT_Services/odnr_landbase_v2/MapServer/4/query";

/// Attribute fields requested when none are configured.
pub const DEFAULT_FIELDS: &str = "PIN,OWNER1,OWNER2,ADDRESS,CITY,STATE,ZIP,ACRES";

/// Parameters of one envelope query.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelQuery {
    /// Envelope in the service reference system.
    pub envelope: BoundingBox,
    /// EPSG code of `envelope`.
    pub in_sr: u32,
    /// EPSG code the service should return geometries in.
    pub out_sr: u32,
    /// Comma-separated attribute names.
    pub out_fields: String,
}

impl ParcelQuery {
    /// Builds a query for a service-space envelope, returning geometries in
    /// the zone's State-Plane system.
    pub fn new(envelope: BoundingBox, crs: &CrsTable, zone: Zone, fields: &str) -> Self {
        Self {
            envelope,
            in_sr: crs.service_srid,
            out_sr: crs.state_plane(zone).epsg,
            out_fields: fields.to_string(),
        }
    }

    /// Query string parameters in request order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("f", "geojson".to_string()),
            ("geometryType", "esriGeometryEnvelope".to_string()),
            ("geometry", self.envelope.to_envelope_string()),
            ("inSR", self.in_sr.to_string()),
            ("outSR", self.out_sr.to_string()),
            ("outFields", self.out_fields.clone()),
            ("returnGeometry", "true".to_string()),
            ("where", "1=1".to_string()),
        ]
    }
}

/// Parcel layer client.
///
/// # Example
///
/// ```ignore
/// use parceldxf::provider::{ParcelProvider, ParcelQuery, ReqwestClient};
///
/// let client = ReqwestClient::new()?;
/// let provider = ParcelProvider::new(client);
/// let parcels = provider.fetch(&query)?;
/// ```
pub struct ParcelProvider<C: HttpClient> {
    http_client: C,
    endpoint: String,
}

impl<C: HttpClient> ParcelProvider<C> {
    /// Creates a provider for the ODNR parcel layer.
    pub fn new(http_client: C) -> Self {
        Self::with_endpoint(http_client, ODNR_PARCEL_URL)
    }

    /// Creates a provider against another query endpoint.
    pub fn with_endpoint(http_client: C, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    pub fn http_client(&self) -> &C {
        &self.http_client
    }

    /// Builds the full request URL with encoded query parameters.
    pub fn build_url(&self, query: &ParcelQuery) -> Result<String, ProviderError> {
        reqwest::Url::parse_with_params(&self.endpoint, query.params())
            .map(String::from)
            .map_err(|e| ProviderError::InvalidEndpoint {
                url: self.endpoint.clone(),
                reason: e.to_string(),
            })
    }

    /// Issues the query and converts the response.
    ///
    /// Exactly one request is made; failures are not retried.
    pub fn fetch(&self, query: &ParcelQuery) -> Result<ParcelCollection, ProviderError> {
        let url = self.build_url(query)?;
        debug!(url = %url, "Querying parcel service");

        let body = self.http_client.get(&url)?;
        debug!(bytes = body.len(), "Received parcel response");

        let parcels = parse_response(&body)?;
        debug!(features = parcels.len(), "Parsed parcel response");
        Ok(parcels)
    }
}

/// Parses a query response body into parcels.
///
/// ArcGIS reports request problems as `{"error": {...}}` with a 200 status;
/// those become [`ProviderError::ServiceError`].
pub fn parse_response(body: &[u8]) -> Result<ParcelCollection, ProviderError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("not valid JSON: {}", e)))?;

    if let Some(error) = value.get("error").filter(|e| e.is_object()) {
        return Err(ProviderError::ServiceError {
            code: error.get("code").and_then(|c| c.as_i64()).unwrap_or_default(),
            message: error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error")
                .to_string(),
        });
    }

    let collection = match GeoJson::from_json_value(value) {
        Ok(GeoJson::FeatureCollection(collection)) => collection,
        Ok(_) => {
            return Err(ProviderError::InvalidResponse(
                "expected a GeoJSON FeatureCollection".to_string(),
            ))
        }
        Err(e) => return Err(ProviderError::InvalidResponse(e.to_string())),
    };

    ParcelCollection::from_geojson(collection)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockHttpClient;

    const TWO_PARCELS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]},
                "properties": {"PIN": "010-001", "OWNER1": "SMITH JOHN"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[20, 20], [30, 20], [30, 30], [20, 20]]],
                    [[[40, 40], [50, 40], [50, 50], [40, 40]]]
                ]},
                "properties": {"PIN": "010-002", "OWNER1": "DOE JANE"}
            }
        ]
    }"#;

    fn sample_query() -> ParcelQuery {
        ParcelQuery::new(
            BoundingBox::new(-9_200_000.0, 4_850_000.0, -9_190_000.0, 4_860_000.0),
            &CrsTable::ohio(),
            Zone::South,
            DEFAULT_FIELDS,
        )
    }

    #[test]
    fn test_query_params() {
        let query = sample_query();
        let params = query.params();

        assert_eq!(params.len(), 8);
        assert!(params.contains(&("f", "geojson".to_string())));
        assert!(params.contains(&("geometryType", "esriGeometryEnvelope".to_string())));
        assert!(params.contains(&("inSR", "3857".to_string())));
        assert!(params.contains(&("outSR", "3735".to_string())));
        assert!(params.contains(&("returnGeometry", "true".to_string())));
        assert!(params.contains(&("where", "1=1".to_string())));
        assert!(params.contains(&("geometry", "-9200000,4850000,-9190000,4860000".to_string())));
    }

    #[test]
    fn test_north_zone_out_sr() {
        let query = ParcelQuery::new(
            BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            &CrsTable::ohio(),
            Zone::North,
            "PIN",
        );
        assert_eq!(query.out_sr, 3734);
        assert_eq!(query.out_fields, "PIN");
    }

    #[test]
    fn test_url_construction() {
        let provider = ParcelProvider::new(MockHttpClient::new(Ok(Vec::new())));
        let url = provider.build_url(&sample_query()).unwrap();

        assert!(url.starts_with(ODNR_PARCEL_URL));
        assert!(url.contains("f=geojson"));
        assert!(url.contains("outFields=PIN%2COWNER1"));
        assert!(url.contains("where=1%3D1"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let provider = ParcelProvider::with_endpoint(MockHttpClient::new(Ok(Vec::new())), "not a url");
        let result = provider.build_url(&sample_query());
        assert!(matches!(result, Err(ProviderError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_fetch_success_issues_single_request() {
        let client = MockHttpClient::new(Ok(TWO_PARCELS.as_bytes().to_vec()));
        let provider = ParcelProvider::with_endpoint(client, "http://localhost/query");

        let parcels = provider.fetch(&sample_query()).unwrap();
        assert_eq!(parcels.len(), 2);
        assert_eq!(parcels.parcels[0].attribute_text("PIN"), "010-001");

        let requested = provider.http_client.requested();
        assert_eq!(requested.len(), 1);
        assert!(requested[0].starts_with("http://localhost/query?"));
    }

    #[test]
    fn test_fetch_propagates_http_error() {
        let client = MockHttpClient::new(Err(ProviderError::HttpError("HTTP 503".to_string())));
        let provider = ParcelProvider::new(client);

        let result = provider.fetch(&sample_query());
        assert_eq!(
            result.unwrap_err(),
            ProviderError::HttpError("HTTP 503".to_string())
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_response(b"<html>Service Unavailable</html>");
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_service_error_envelope() {
        let body = br#"{"error": {"code": 400, "message": "Invalid or missing input parameters.", "details": []}}"#;
        let result = parse_response(body);
        assert_eq!(
            result.unwrap_err(),
            ProviderError::ServiceError {
                code: 400,
                message: "Invalid or missing input parameters.".to_string()
            }
        );
    }

    #[test]
    fn test_parse_non_collection() {
        let body = br#"{"type": "Point", "coordinates": [1, 2]}"#;
        let result = parse_response(body);
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_empty_collection() {
        let body = br#"{"type": "FeatureCollection", "features": []}"#;
        let parcels = parse_response(body).unwrap();
        assert!(parcels.is_empty());
    }

    #[test]
    fn test_parse_short_position() {
        let body = br#"{"type": "FeatureCollection", "features": [{
            "type": "Feature",
            "geometry": {"type": "Polygon", "coordinates": [[[1], [2], [3], [1]]]},
            "properties": {}
        }]}"#;
        assert!(matches!(
            parse_response(body),
            Err(ProviderError::InvalidResponse(_))
        ));
    }
}
