//! Subcommand handlers. Results go to stdout; logs go to stderr.

use nearby_core::{AppConfig, DetailedPlace, SearchCriteria};
use nearby_discovery::{map_markers, DiscoveryPipeline};

use crate::render::{self, PlaceView, SearchReport};

/// # Errors
///
/// Returns an error if location, search, or the saved-set lookup fails.
pub(crate) async fn run_search(
    pipeline: &DiscoveryPipeline,
    config: &AppConfig,
    criteria: &SearchCriteria,
    json: bool,
) -> anyhow::Result<()> {
    let results = pipeline.run_search(criteria).await?;
    let views = views_for(pipeline, config, &results.places).await?;

    if json {
        let report = SearchReport {
            generation: results.generation,
            origin: results.origin,
            location_from_cache: results.location_from_cache,
            places: views,
            markers: map_markers(&results.places),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if views.is_empty() {
        println!(
            "no {} places within {} m matched; try a larger --radius or lower --min-rating",
            criteria.category, criteria.radius_meters
        );
        return Ok(());
    }
    println!(
        "{} places near {}{}",
        views.len(),
        results.origin,
        if results.location_from_cache {
            " (cached location)"
        } else {
            ""
        }
    );
    render::print_table(&views);
    Ok(())
}

/// # Errors
///
/// Returns an error if the saved set cannot be read.
pub(crate) async fn run_saved(
    pipeline: &DiscoveryPipeline,
    config: &AppConfig,
    json: bool,
) -> anyhow::Result<()> {
    let saved = pipeline.list_saved().await?;
    let views = views_for(pipeline, config, &saved).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else if views.is_empty() {
        println!("no saved places; use `nearby toggle <PLACE_ID>` to save one");
    } else {
        render::print_table(&views);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the saved set cannot be read or written.
pub(crate) async fn run_toggle(pipeline: &DiscoveryPipeline, place_id: &str) -> anyhow::Result<()> {
    if pipeline.toggle_save(place_id).await? {
        println!("saved {place_id}");
    } else {
        println!("removed {place_id}");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the saved set cannot be written.
pub(crate) async fn run_clear_saved(pipeline: &DiscoveryPipeline) -> anyhow::Result<()> {
    pipeline.clear_saved().await?;
    println!("cleared saved places");
    Ok(())
}

async fn views_for<'a>(
    pipeline: &DiscoveryPipeline,
    config: &AppConfig,
    places: &'a [DetailedPlace],
) -> anyhow::Result<Vec<PlaceView<'a>>> {
    let mut views = Vec::with_capacity(places.len());
    for place in places {
        let saved = pipeline.is_saved(place.id()).await?;
        views.push(PlaceView::new(
            place,
            saved,
            &config.places_base_url,
            &config.places_api_key,
        ));
    }
    Ok(views)
}
