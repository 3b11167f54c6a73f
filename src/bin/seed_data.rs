//! Demo data seeder for the gift certificate store.
//!
//! Creates tags, certificates with random tag subsets, users and orders
//! through the application services, so every record passes the same
//! validation as API input.
//!
//! Usage:
//! ```bash
//! cargo run --bin seed-data
//! cargo run --bin seed-data -- --count 500 --seed 42
//! ```

use anyhow::{bail, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use gift_certificates::application::dto::{
    CreateCertificateRequest, CreateTagRequest, CreateUserOrderRequest, RegisterRequest,
    TagRequest,
};
use gift_certificates::config::Settings;
use gift_certificates::infrastructure::database;
use gift_certificates::startup::AppState;

const ADJECTIVES: &[&str] = &[
    "Relaxing", "Thrilling", "Cozy", "Gourmet", "Scenic", "Private", "Classic", "Wild",
    "Golden", "Sunny", "Quiet", "Festive",
];

const ACTIVITIES: &[&str] = &[
    "spa day", "wine tasting", "kayak tour", "cooking class", "balloon flight", "city walk",
    "horse ride", "pottery lesson", "boat trip", "theatre night", "climbing session",
    "photo shoot",
];

const TAG_WORDS: &[&str] = &[
    "spa", "food", "wine", "sport", "outdoor", "water", "family", "romance", "art", "music",
    "travel", "extreme", "relax", "craft", "nature", "night",
];

#[derive(Parser)]
#[command(
    name = "seed-data",
    about = "Gift certificate store data seeder",
    long_about = "Fill the database with random tags, certificates, users and orders"
)]
struct SeedArgs {
    /// Number of records of each kind
    #[arg(long, short = 'n', default_value_t = 100)]
    count: usize,

    /// Maximum number of tags attached to one certificate
    #[arg(long, default_value_t = 4)]
    max_tags: usize,

    /// Password given to every generated user
    #[arg(long, default_value = "password123")]
    password: String,

    /// Attempts per order before giving up on it
    #[arg(long, default_value_t = 5)]
    order_attempts: usize,

    /// RNG seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    gift_certificates::telemetry::init_tracing();

    let args = SeedArgs::parse();
    let mut settings = Settings::load()?;
    if let Some(url) = &args.database_url {
        settings.database.url = url.clone();
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let pool = database::create_pool(&settings.database).await?;
    database::run_migrations(&pool).await?;
    let state = AppState::new(pool, settings);

    let tag_names = seed_tags(&state, args.count).await;
    let certificate_ids = seed_certificates(&state, &mut rng, &tag_names, &args).await;
    let user_ids = seed_users(&state, args.count, &args.password).await;

    if certificate_ids.is_empty() || user_ids.is_empty() {
        bail!("No certificates or users available, cannot place orders");
    }

    let orders = seed_orders(&state, &mut rng, &user_ids, &certificate_ids, &args).await;

    info!(
        tags = tag_names.len(),
        certificates = certificate_ids.len(),
        users = user_ids.len(),
        orders,
        "Seeding complete"
    );

    Ok(())
}

/// Tag names are `<word>_<n>` so reruns mostly collide only with themselves.
async fn seed_tags(state: &AppState, count: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(count);

    for i in 0..count {
        let name = format!("{}_{}", TAG_WORDS[i % TAG_WORDS.len()], i);
        match state.tag_service.create(CreateTagRequest::new(&name)).await {
            Ok(tag) => names.push(tag.name),
            Err(e) => warn!(name = %name, error = %e, "Skipping tag"),
        }
    }

    info!(created = names.len(), "Tags seeded");
    names
}

async fn seed_certificates(
    state: &AppState,
    rng: &mut StdRng,
    tag_names: &[String],
    args: &SeedArgs,
) -> Vec<i64> {
    let mut ids = Vec::with_capacity(args.count);

    for i in 0..args.count {
        let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Classic");
        let activity = ACTIVITIES.choose(rng).copied().unwrap_or("city walk");
        let tag_count = rng.random_range(0..=args.max_tags.min(tag_names.len()));

        let request = CreateCertificateRequest {
            name: Some(format!("{} {} {}", adjective, activity, i)),
            description: Some(format!(
                "A {} {} for one or two people",
                adjective.to_lowercase(),
                activity
            )),
            price: Some(rng.random_range(10..=500)),
            duration: Some(rng.random_range(7..=365)),
            tags: tag_names
                .choose_multiple(rng, tag_count)
                .map(TagRequest::new)
                .collect(),
        };

        match state.certificate_service.create(request).await {
            Ok(certificate) => ids.push(certificate.id),
            Err(e) => warn!(index = i, error = %e, "Skipping certificate"),
        }
    }

    info!(created = ids.len(), "Certificates seeded");
    ids
}

async fn seed_users(state: &AppState, count: usize, password: &str) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);

    for i in 0..count {
        let request = RegisterRequest {
            name: format!("user_{:04}", i),
            password: password.to_owned(),
        };
        match state.auth_service.register(request).await {
            Ok((user, _)) => ids.push(user.id),
            Err(e) => warn!(index = i, error = %e, "Skipping user"),
        }
    }

    info!(created = ids.len(), "Users seeded");
    ids
}

/// A failed order is retried with a fresh random user and certificate.
async fn seed_orders(
    state: &AppState,
    rng: &mut StdRng,
    user_ids: &[i64],
    certificate_ids: &[i64],
    args: &SeedArgs,
) -> usize {
    let mut placed = 0;

    for i in 0..args.count {
        for attempt in 1..=args.order_attempts {
            let (Some(&user_id), Some(&certificate_id)) =
                (user_ids.choose(rng), certificate_ids.choose(rng))
            else {
                return placed;
            };

            let request = CreateUserOrderRequest::new(user_id, certificate_id);
            match state.order_service.create(request).await {
                Ok(_) => {
                    placed += 1;
                    break;
                }
                Err(e) => warn!(index = i, attempt, error = %e, "Order failed, retrying"),
            }
        }
    }

    info!(created = placed, "Orders seeded");
    placed
}
