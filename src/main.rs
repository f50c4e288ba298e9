use anyhow::Result;

use plantcast_app::{DetailController, ListController, Navigator, Route, ScreenState};
use plantcast_location::ConfiguredProvider;
use plantcast_plants::PlantsClient;
use plantcast_weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    plantcast_core::init()?;

    let (config, _validation) = plantcast_core::Config::load_validated()?;
    tracing::info!("Plantcast started");

    let location = if config.location.permission_granted {
        ConfiguredProvider::new(config.location.latitude, config.location.longitude)
    } else {
        ConfiguredProvider::denied()
    };
    let weather =
        WeatherClient::new_with_base_url(&config.weather.api_key, &config.weather.base_url)?;
    let plants = PlantsClient::new_with_base_url(&config.plants.token, &config.plants.base_url)?;

    let mut navigator = Navigator::new();

    // List screen: one fetch sequence per activation
    let mut list = ListController::new(location.clone(), weather, plants.clone());
    list.initialize().await;
    print!("{}", plantcast_app::list::render(list.state()));

    // An index argument selects a row, as tapping it would
    let selected = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok());
    if let (Some(index), ScreenState::Loaded { plants: results, .. }) = (selected, list.state()) {
        match results.get(index) {
            Some(plant) => navigator.push(Route::PlantDetail {
                plant: plant.clone(),
            }),
            None => tracing::warn!("No plant at index {}", index),
        }
    }

    if let Route::PlantDetail { plant } = navigator.current() {
        let detail = DetailController::new(location, plants);
        if let Some(screen) = detail.load(plant).await {
            println!();
            print!("{}", screen.render());
        }
    }

    Ok(())
}
