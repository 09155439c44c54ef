use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenvy::dotenv;
use log::info;
use page_analyzer::{config::Config, db, routes, types::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;

    let db = db::get_database(&config.database).await?;
    info!("Connecting to Database");
    let conn = db::connect(&db)?;
    info!("Connected to Database. Migrating");
    db::migrate_db(conn).await?;
    info!("Migrated Database");

    let bind = (config.host.clone(), config.port);
    let app_data = web::Data::new(AppState { db, config });

    info!("Listening on {}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_data.clone())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
