//! Fetching of the shipped baseline documents.

use anyhow::Context;
use contracts::domain::a003_food::{BaselineDocument, Food};
use contracts::shared::RestaurantSnapshot;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

async fn fetch_json<T: DeserializeOwned>(url: &str) -> anyhow::Result<T> {
    let response = Request::get(url)
        .send()
        .await
        .with_context(|| format!("baseline request to '{}' failed", url))?;
    if !response.ok() {
        anyhow::bail!("baseline '{}' answered HTTP {}", url, response.status());
    }
    response
        .json::<T>()
        .await
        .with_context(|| format!("baseline '{}' is not a valid document", url))
}

/// Restaurants and menus shipped with the site
pub async fn fetch_restaurant_baseline(url: &str) -> anyhow::Result<RestaurantSnapshot> {
    let snapshot: RestaurantSnapshot = fetch_json(url).await?;
    log::info!(
        "restaurant baseline: {} restaurants, {} menus",
        snapshot.restaurants.len(),
        snapshot.menus.len()
    );
    Ok(snapshot)
}

/// Food baseline converted to the persisted shape
pub async fn fetch_food_baseline(url: &str) -> anyhow::Result<Vec<Food>> {
    let document: BaselineDocument = fetch_json(url).await?;
    let foods = document.into_foods();
    log::info!("food baseline: {} foods", foods.len());
    Ok(foods)
}
