use std::sync::Arc;
use std::time::Duration;

use fleet::TrackingContext;
use model::point::GeoPoint;
use oracle::{GenAiClient, GenAiCredentials, GenerativeOracle, OfflineOracle};

#[tokio::main]
async fn main() {
    env_logger::init();

    let oracle: Arc<dyn GenerativeOracle> = match GenAiCredentials::from_env() {
        Some(credentials) => match GenAiClient::new(&credentials) {
            Ok(client) => Arc::new(client),
            Err(why) => {
                log::warn!("could not build oracle client ({why}), running offline");
                Arc::new(OfflineOracle)
            }
        },
        None => {
            log::info!("no GEMINI_API_KEY set, running offline");
            Arc::new(OfflineOracle)
        }
    };

    let context = TrackingContext::new(oracle);
    context.start_simulator().await;

    // let the fleet drift for a couple of ticks
    tokio::time::sleep(Duration::from_secs(9)).await;

    {
        let fleet = context.fleet();
        let state = fleet.read().await;
        let now = chrono::Local::now();
        for (id, asset) in state.assets() {
            println!(
                "{id} {} @ ({:.4}, {:.4}) {:?} {} mph, seen {}, milestone {:?}",
                asset.name,
                asset.position.latitude,
                asset.position.longitude,
                asset.status,
                asset.speed_mph,
                asset.freshness(now),
                asset.milestone.map(|m| m.progress()),
            );
        }
        for fence in state.fences() {
            println!(
                "fence {} '{}' ({:?}, {} vertices, {}m)",
                fence.id,
                fence.content.name,
                fence.content.kind,
                fence.content.vertex_count(),
                fence.content.radius_m,
            );
        }
    }

    let insight = context.insight("4 assets online, 1 idle at the depot").await;
    println!("insight: {}", insight.text);
    if !insight.sources.is_empty() {
        println!("sources: {:?}", insight.sources);
    }

    if let Some(place) = context.search("Ferry Building").await {
        println!(
            "found '{}', viewport now {:?}",
            place.display_name,
            context.viewport().await
        );
    }

    // measure across town with the ruler
    context
        .handle_map_click(GeoPoint::new(37.7749, -122.4194))
        .await;
    context
        .handle_map_click(GeoPoint::new(37.7849, -122.4294))
        .await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    if let Some(result) = context.distance_result().await {
        println!(
            "ruler: {:.3} km - \"{}\"",
            result.distance_km, result.narrative
        );
    }

    let masked = context.display_positions(true).await;
    println!(
        "masked positions: {}",
        serde_json::to_string_pretty(&masked).unwrap()
    );

    context.shutdown().await;
}
