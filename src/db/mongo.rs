use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_MAX_POOL_SIZE: u32 = 10;
const DEFAULT_MIN_POOL_SIZE: u32 = 1;

fn pool_size_from_env(var: &str, default: u32) -> u32 {
    std::env::var(var)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Pooled client for the whole process. Pool bounds are tunable through
/// `MONGODB_MAX_POOL_SIZE` / `MONGODB_MIN_POOL_SIZE`.
pub async fn create_mongo_client(uri: &String) -> Arc<Client> {
    let mut client_options = ClientOptions::parse(uri)
        .await
        .expect("MongoDB URI may be incorrect! Failed to parse.");

    client_options.app_name = Some("cabdesk-api".to_string());
    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(pool_size_from_env(
        "MONGODB_MAX_POOL_SIZE",
        DEFAULT_MAX_POOL_SIZE,
    ));
    client_options.min_pool_size = Some(pool_size_from_env(
        "MONGODB_MIN_POOL_SIZE",
        DEFAULT_MIN_POOL_SIZE,
    ));

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client =
        Client::with_options(client_options).expect("Failed to create MongoDB client with options");

    // Verify the connection up front; a failed ping is survivable (the
    // health endpoint keeps reporting it) so only warn.
    match client
        .database("Billing")
        .run_command(mongodb::bson::doc! {"ping": 1})
        .await
    {
        Ok(_) => println!("MongoDB connection verified with ping"),
        Err(e) => {
            eprintln!("WARNING: MongoDB ping failed: {}", e);
            eprintln!("The API may still work, but some functionality might be impaired");
        }
    }

    Arc::new(client)
}
