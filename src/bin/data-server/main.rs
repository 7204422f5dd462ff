use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use restaurant_profile::config::Config;

mod api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let state = web::Data::new(api::ApiState::new(&config.data_dir));
    tracing::info!(
        "serving {} on {}:{}",
        config.data_dir.display(),
        config.host,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
            .app_data(state.clone())
            .service(api::restaurant)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
