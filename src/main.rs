use catalog_store::{
    config::AppConfig,
    database,
    error::Result,
    models::{ApparelDetails, ElectronicsDetails, Product, ProductKind},
    queries::{category_queries, product_queries},
};
use tracing::Level;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config).await {
        tracing::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: &AppConfig) -> Result<()> {
    let pool = database::create_pool(&config.database).await?;
    database::check_health(&pool).await?;

    let category = category_queries::create_category(
        &pool,
        "Summer collection",
        "Seasonal demo inventory",
    )
    .await?;

    let mut shirt = Product::apparel(
        "T-shirt",
        vec!["https://img.example.com/tshirt-front.jpg".to_string()],
        1000,
        "Plain cotton tee",
        10,
        category.id,
        ApparelDetails {
            size: "M".to_string(),
            color: "blue".to_string(),
            garment_type: "casual".to_string(),
            material_fee: 50,
        },
    );
    product_queries::create(&pool, &mut shirt).await?;
    tracing::info!("Created apparel product with id {}", shirt.id());

    let mut headphones = Product::electronics(
        "Headphones",
        vec!["https://img.example.com/headphones.jpg".to_string()],
        15000,
        "Over-ear, wired",
        4,
        category.id,
        ElectronicsDetails {
            brand: "AKG".to_string(),
            warranty_fee: 1200,
        },
    );
    product_queries::create(&pool, &mut headphones).await?;
    tracing::info!("Created electronics product with id {}", headphones.id());

    shirt.add_stock(5);
    shirt.set_price(1200);
    product_queries::update(&pool, &shirt).await?;
    tracing::info!("Restocked and repriced product {}", shirt.id());

    for product in product_queries::find_all(&pool).await? {
        let kind = match product.kind() {
            ProductKind::Apparel(details) => format!(
                "apparel {} {} ({})",
                details.color, details.garment_type, details.size
            ),
            ProductKind::Electronics(details) => format!("electronics by {}", details.brand),
        };
        println!(
            "#{} {}: {} minor units, {} in stock [{}]",
            product.id(),
            product.name(),
            product.price(),
            product.quantity(),
            kind
        );
    }

    Ok(())
}
