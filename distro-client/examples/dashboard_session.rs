// distro-client/examples/dashboard_session.rs
// Log in, mount the zones view, create a zone and watch the view refresh

use distro_client::api::zones;
use distro_client::logger::init_logger;
use distro_client::{Api, ClientConfig, Navigation, RouteTable};
use shared::models::ZoneCreate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger("info,distro_client=debug", false)?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <username> <password> [new zone name]", args[0]);
        println!("  Backend URL comes from DISTRO_API_URL (default http://localhost:8000/api)");
        return Ok(());
    }

    let config = ClientConfig::from_env();
    let api = Api::new(&config)?;

    if !api.session().is_authenticated() {
        let user = api.login(&args[1], &args[2]).await?;
        tracing::info!(user = %user.username, role = %user.role, "logged in");
    }

    let routes = RouteTable::dashboard();
    if let Navigation::Redirect(to) = routes.resolve("/zones", &api.session().state()) {
        tracing::warn!(redirect = to, "zones page is not available for this account");
        return Ok(());
    }

    let mut view = api.subscribe(&zones::GET_ZONES, ());
    let current = view.settled().await;
    match (&current.data, &current.error) {
        (_, Some(error)) => tracing::error!(%error, "failed to load zones"),
        (Some(zones), None) => tracing::info!(count = zones.len(), "zones loaded"),
        (None, None) => {}
    }

    if let Some(name) = args.get(3) {
        let body = ZoneCreate {
            name: name.clone(),
            description: None,
            distributor_id: None,
        };
        let zone = api.mutate(&zones::CREATE_ZONE, body).await?;
        tracing::info!(id = zone.id, "zone created");

        let refreshed = view.settled().await;
        if let Some(zones) = refreshed.data {
            for zone in zones {
                println!("{:>5}  {}", zone.id, zone.name);
            }
        }
    }

    Ok(())
}
