use trial_watch::configuration::get_configuration;
use trial_watch::startup::Application;
use trial_watch::telemetry::{get_subscriber, initialize_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("trial-watch".into(), "info".into(), std::io::stdout);
    initialize_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration");

    Application::build(configuration)
        .await?
        .run_until_stopped()
        .await?;

    Ok(())
}
