//! Distance and travel-time estimation via the Google Distance Matrix API.
//!
//! Pickup/drop are free-text addresses as entered on the invoice form. Results
//! are cached in MongoDB per address pair so repeated estimates for the same
//! route skip the paid API call. Requires `GOOGLE_MAPS_API_KEY` in the
//! environment.

use mongodb::{bson::oid::ObjectId, Client};
use serde::{Deserialize, Serialize};
use std::{env, sync::Arc, time::Duration};

use crate::db::collections::Collections;

// Cache duration in seconds (24 hours; routes between fixed addresses are static)
const CACHE_DURATION_SECS: i64 = 86400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRoute {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub duration: String,
    pub cached_at: mongodb::bson::DateTime,
    pub expires_at: mongodb::bson::DateTime,
}

#[derive(Debug, Deserialize)]
struct GoogleMapsResponse {
    status: String,
    rows: Vec<GoogleMapsRow>,
}

#[derive(Debug, Deserialize)]
struct GoogleMapsRow {
    elements: Vec<GoogleMapsElement>,
}

#[derive(Debug, Deserialize)]
struct GoogleMapsElement {
    status: String,
    distance: Option<GoogleMapsDistance>,
    duration: Option<GoogleMapsDuration>,
}

#[derive(Debug, Deserialize)]
struct GoogleMapsDistance {
    value: u32, // meters
}

#[derive(Debug, Deserialize)]
struct GoogleMapsDuration {
    text: String, // human readable, e.g. "1 hour 5 mins"
}

#[derive(Debug, Clone)]
pub struct DistanceEstimate {
    pub distance_km: f64,
    pub duration: String,
    pub from_cache: bool,
}

pub struct DistanceService {
    client: Arc<Client>,
    http_client: reqwest::Client,
    api_key: String,
}

impl DistanceService {
    pub fn new(client: Arc<Client>) -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY")
            .map_err(|_| "GOOGLE_MAPS_API_KEY environment variable not set")?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            http_client,
            api_key,
        })
    }

    /// Estimate distance and travel time between two addresses, serving from
    /// cache when an unexpired entry for the pair exists.
    pub async fn estimate(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DistanceEstimate, Box<dyn std::error::Error>> {
        let origin_key = normalize_address(origin);
        let destination_key = normalize_address(destination);

        if let Ok(Some(cached)) = self.get_cached_route(&origin_key, &destination_key).await {
            println!("Using cached route for '{}' -> '{}'", origin, destination);
            return Ok(DistanceEstimate {
                distance_km: cached.distance_km,
                duration: cached.duration,
                from_cache: true,
            });
        }

        println!(
            "Fetching route from Google Maps API for '{}' -> '{}'",
            origin, destination
        );
        let result = self.fetch_from_google_maps(origin, destination).await?;

        if let Err(e) = self
            .cache_route(&origin_key, &destination_key, &result)
            .await
        {
            eprintln!("Failed to cache route result: {}", e);
        }

        Ok(result)
    }

    async fn get_cached_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> mongodb::error::Result<Option<CachedRoute>> {
        let collection = Collections::route_cache(&self.client);

        let filter = mongodb::bson::doc! {
            "origin": origin,
            "destination": destination,
            "expires_at": { "$gt": mongodb::bson::DateTime::now() }
        };

        collection.find_one(filter).await
    }

    async fn cache_route(
        &self,
        origin: &str,
        destination: &str,
        result: &DistanceEstimate,
    ) -> mongodb::error::Result<()> {
        let collection = Collections::route_cache(&self.client);

        let now = mongodb::bson::DateTime::now();
        let expires_at = mongodb::bson::DateTime::from_millis(
            now.timestamp_millis() + (CACHE_DURATION_SECS * 1000),
        );

        let cached_route = CachedRoute {
            id: None,
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km: result.distance_km,
            duration: result.duration.clone(),
            cached_at: now,
            expires_at,
        };

        collection.insert_one(cached_route).await?;
        Ok(())
    }

    async fn fetch_from_google_maps(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DistanceEstimate, Box<dyn std::error::Error>> {
        let url = "https://maps.googleapis.com/maps/api/distancematrix/json";

        let response = self
            .http_client
            .get(url)
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("mode", "driving"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let response_text = response.text().await?;

        let google_response: GoogleMapsResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                format!(
                    "Failed to parse Google Maps response: {}. Response: {}",
                    e, response_text
                )
            })?;

        if google_response.status != "OK" {
            return Err(format!("Google Maps API error: {}", google_response.status).into());
        }

        if google_response.rows.is_empty() || google_response.rows[0].elements.is_empty() {
            return Err("No distance data returned from Google Maps".into());
        }

        let element = &google_response.rows[0].elements[0];

        if element.status != "OK" {
            return Err(format!("Google Maps element error: {}", element.status).into());
        }

        let distance = element.distance.as_ref().ok_or("Distance not available")?;
        let duration = element.duration.as_ref().ok_or("Duration not available")?;

        Ok(DistanceEstimate {
            distance_km: (distance.value as f64 / 1000.0 * 100.0).round() / 100.0,
            duration: duration.text.clone(),
            from_cache: false,
        })
    }

    /// Clean up expired cache entries
    pub async fn cleanup_expired_cache(&self) -> mongodb::error::Result<u64> {
        let collection = Collections::route_cache(&self.client);

        let filter = mongodb::bson::doc! {
            "expires_at": { "$lt": mongodb::bson::DateTime::now() }
        };

        let result = collection.delete_many(filter).await?;
        println!(
            "Cleaned up {} expired route cache entries",
            result.deleted_count
        );

        Ok(result.deleted_count)
    }
}

fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_address() {
        assert_eq!(normalize_address("  MG Road, Kochi "), "mg road, kochi");
    }
}
