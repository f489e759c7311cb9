//! CLI smoke entry point.
//!
//! # Responsibility
//! - Seed an in-memory catalog through the public façades and print the
//!   resulting post aggregates.
//! - Keep output deterministic for quick local sanity checks.

use carlot_core::{
    default_log_level, init_logging, open_db, open_db_in_memory, Car, CarRepository, Engine,
    EngineRepository, FileRef, FileRepository, HistoryOwner, HistoryOwnerRepository, Owner,
    OwnerRepository, Participation, ParticipationRepository, Post, PostPhoto, PostPhotoRepository,
    PostRepository, PriceHistory, PriceHistoryRepository, Store, User, UserRepository,
};
use std::env;
use std::error::Error;
use std::process::exit;

fn main() {
    if let Err(err) = run() {
        eprintln!("carlot_cli failed: {err}");
        exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("carlot_core version={}", carlot_core::core_version());

    let log_dir = env::temp_dir().join("carlot-logs");
    if let Some(dir) = log_dir.to_str() {
        if let Err(err) = init_logging(default_log_level(), dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    // Optional db path; without one the catalog lives in memory.
    let conn = match env::args().nth(1) {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = Store::new(conn);

    let seller = UserRepository::new(&store).create(User::new("seller", "pw"));
    let keeper_account = UserRepository::new(&store).create(User::new("keeper", "pw"));

    let engine = EngineRepository::new(&store).create(Engine::new("1.6 MPI"));
    let car = CarRepository::new(&store).create(Car::new("Lada Vesta", engine.id));

    let keeper = OwnerRepository::new(&store).create(Owner::new("First Keeper", keeper_account.id));
    HistoryOwnerRepository::new(&store).create(HistoryOwner::new(
        car.id,
        keeper.id,
        1_700_000_000_000,
        Some(1_710_000_000_000),
    ));

    let posts = PostRepository::new(&store);
    let listing = posts.create(Post::new(
        "clean, one owner, full history",
        1_720_000_000_000,
        seller.id,
        car.id,
    ));
    posts.create(Post::new(
        "spare-parts donor",
        1_710_000_000_000,
        seller.id,
        car.id,
    ));

    let front = FileRepository::new(&store).create(FileRef::new("front", "/photos/front.jpg"));
    PostPhotoRepository::new(&store).create(PostPhoto::new(listing.id, front.id, 0));
    PriceHistoryRepository::new(&store).create(PriceHistory::new(
        listing.id,
        500_000,
        480_000,
        1_720_000_100_000,
    ));
    ParticipationRepository::new(&store).create(Participation::new(listing.id, keeper_account.id));

    let aggregates = posts.find_all_aggregates();
    println!("{}", serde_json::to_string_pretty(&aggregates)?);

    Ok(())
}
