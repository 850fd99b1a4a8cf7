use claimdeck::{AppContext, ConfigBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    claimdeck::init_tracing();

    let config = ConfigBuilder::new().from_env().build()?;

    let db = claimdeck::database::connect(&config.database).await?;
    if config.database.bootstrap_schema {
        claimdeck::database::bootstrap_schema(&db).await?;
    }

    let context = AppContext::new(db, config.clone());

    claimdeck::build_app(context, config).serve().await?;

    Ok(())
}
