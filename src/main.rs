use message_service::api;
use message_service::common::init;
use message_service::settings::AppSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::get();
    init::initialize_logging(settings);
    match settings.app_component.as_str() {
        "api" => api::serve(settings).await,
        other => anyhow::bail!("Unknown app component: {other}"),
    }
}
