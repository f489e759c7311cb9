use carlot_core::{
    open_db_in_memory, Car, CarRepository, Engine, EngineRepository, FileRef, FileRepository,
    HistoryOwner, HistoryOwnerRepository, Owner, OwnerRepository, Participation,
    ParticipationRepository, Post, PostPhoto, PostPhotoRepository, PostRepository, PriceHistory,
    PriceHistoryRepository, Store, User, UserRepository,
};
use std::time::{SystemTime, UNIX_EPOCH};

const MINUTE_MS: i64 = 60 * 1000;

#[test]
fn aggregate_resolves_author_car_and_engine() {
    let store = open_store();
    let author = seed_user(&store, "alice");
    let car = seed_car(&store, "Lada Vesta", "1.6 MPI");
    let post = seed_post(&store, &author, &car, "clean, one owner", 1_000);

    let aggregates = PostRepository::new(&store).find_all_aggregates();
    assert_eq!(aggregates.len(), 1);

    let aggregate = &aggregates[0];
    assert_eq!(aggregate.post, post);
    assert_eq!(aggregate.author, author);
    assert_eq!(aggregate.car.car, car);
    assert_eq!(aggregate.car.engine.name, "1.6 MPI");
    assert!(aggregate.car.ownerships.is_empty());
    assert!(aggregate.photos.is_empty());
    assert!(aggregate.price_history.is_empty());
    assert!(aggregate.participations.is_empty());
}

#[test]
fn collections_attach_to_their_posts_only() {
    let store = open_store();
    let author = seed_user(&store, "alice");
    let car_a = seed_car(&store, "Lada Vesta", "1.6");
    let car_b = seed_car(&store, "Lada Priora", "1.8");
    let post_a = seed_post(&store, &author, &car_a, "gallery", 2_000);
    let post_b = seed_post(&store, &author, &car_b, "single shot", 1_000);

    // Photos inserted out of sort order on purpose.
    add_photo(&store, &post_a, "/photos/a2.jpg", 2);
    add_photo(&store, &post_a, "/photos/a0.jpg", 0);
    add_photo(&store, &post_a, "/photos/a1.jpg", 1);
    add_photo(&store, &post_b, "/photos/b0.jpg", 0);

    let price_history = PriceHistoryRepository::new(&store);
    price_history.create(PriceHistory::new(post_a.id, 500_000, 480_000, 2_100));
    price_history.create(PriceHistory::new(post_a.id, 480_000, 450_000, 2_200));

    let participations = ParticipationRepository::new(&store);
    let bidder_one = seed_user(&store, "bidder-one");
    let bidder_two = seed_user(&store, "bidder-two");
    participations.create(Participation::new(post_a.id, bidder_one.id));
    participations.create(Participation::new(post_a.id, bidder_two.id));

    let aggregates = PostRepository::new(&store).find_all_aggregates();
    assert_eq!(aggregates.len(), 2);

    let aggregate_a = &aggregates[0];
    assert_eq!(aggregate_a.post.id, post_a.id);
    assert_eq!(aggregate_a.photos.len(), 3);
    let paths: Vec<&str> = aggregate_a
        .photos
        .iter()
        .map(|attachment| attachment.file.path.as_str())
        .collect();
    assert_eq!(paths, ["/photos/a0.jpg", "/photos/a1.jpg", "/photos/a2.jpg"]);
    assert_eq!(aggregate_a.price_history.len(), 2);
    assert_eq!(aggregate_a.price_history[0].price_after, 480_000);
    assert_eq!(aggregate_a.participations.len(), 2);

    let aggregate_b = &aggregates[1];
    assert_eq!(aggregate_b.post.id, post_b.id);
    assert_eq!(aggregate_b.photos.len(), 1);
    assert_eq!(aggregate_b.photos[0].file.path, "/photos/b0.jpg");
    assert!(aggregate_b.price_history.is_empty());
    assert!(aggregate_b.participations.is_empty());
}

#[test]
fn ownership_history_attaches_to_every_post_of_the_car() {
    let store = open_store();
    let author = seed_user(&store, "alice");
    let car = seed_car(&store, "Lada Vesta", "1.6");
    let post_new = seed_post(&store, &author, &car, "relisted", 2_000);
    let post_old = seed_post(&store, &author, &car, "first listing", 1_000);

    let owners = OwnerRepository::new(&store);
    let first_account = seed_user(&store, "first-keeper");
    let second_account = seed_user(&store, "second-keeper");
    let first_owner = owners.create(Owner::new("First Keeper", first_account.id));
    let second_owner = owners.create(Owner::new("Second Keeper", second_account.id));

    let history = HistoryOwnerRepository::new(&store);
    history.create(HistoryOwner::new(car.id, second_owner.id, 200, None));
    history.create(HistoryOwner::new(car.id, first_owner.id, 100, Some(200)));

    let aggregates = PostRepository::new(&store).find_all_aggregates();
    assert_eq!(aggregates.len(), 2);
    assert_eq!(aggregates[0].post.id, post_new.id);
    assert_eq!(aggregates[1].post.id, post_old.id);

    for aggregate in &aggregates {
        let ownerships = &aggregate.car.ownerships;
        assert_eq!(ownerships.len(), 2);
        // Ordered by interval start.
        assert_eq!(ownerships[0].record.start_at, 100);
        assert_eq!(ownerships[0].owner.name, "First Keeper");
        assert_eq!(ownerships[0].owner_user.login, "first-keeper");
        assert_eq!(ownerships[1].record.end_at, None);
        assert_eq!(ownerships[1].owner_user.login, "second-keeper");
    }
}

#[test]
fn results_order_newest_first_with_id_tiebreak() {
    let store = open_store();
    let author = seed_user(&store, "alice");
    let car = seed_car(&store, "Lada Vesta", "1.6");

    let oldest = seed_post(&store, &author, &car, "oldest", 1_000);
    let newest = seed_post(&store, &author, &car, "newest", 3_000);
    let tied_first = seed_post(&store, &author, &car, "tied first", 2_000);
    let tied_second = seed_post(&store, &author, &car, "tied second", 2_000);

    let ids: Vec<_> = PostRepository::new(&store)
        .find_all_aggregates()
        .into_iter()
        .map(|aggregate| aggregate.post.id)
        .collect();

    // Tied timestamps fall back to id, newest insert first.
    assert_eq!(ids, [newest.id, tied_second.id, tied_first.id, oldest.id]);
}

#[test]
fn created_between_includes_both_ends() {
    let store = open_store();
    let author = seed_user(&store, "alice");
    let car = seed_car(&store, "Lada Vesta", "1.6");
    let lower = seed_post(&store, &author, &car, "on the lower bound", 1_000);
    let upper = seed_post(&store, &author, &car, "on the upper bound", 2_000);
    seed_post(&store, &author, &car, "outside", 3_000);

    let hits = PostRepository::new(&store).find_all_created_between(1_000, 2_000);

    let ids: Vec<_> = hits.iter().map(|aggregate| aggregate.post.id).collect();
    assert_eq!(ids, [upper.id, lower.id]);
}

#[test]
fn created_between_picks_the_window_around_now() {
    let store = open_store();
    let author = seed_user(&store, "alice");
    let car = seed_car(&store, "Lada Vesta", "1.6");
    let now = now_ms();

    let ten_minutes_ago = seed_post(&store, &author, &car, "10m", now - 10 * MINUTE_MS);
    let twenty_minutes_ago = seed_post(&store, &author, &car, "20m", now - 20 * MINUTE_MS);
    seed_post(&store, &author, &car, "30m", now - 30 * MINUTE_MS);

    let hits = PostRepository::new(&store)
        .find_all_created_between(now - 25 * MINUTE_MS, now - 5 * MINUTE_MS);

    let ids: Vec<_> = hits.iter().map(|aggregate| aggregate.post.id).collect();
    assert_eq!(ids, [ten_minutes_ago.id, twenty_minutes_ago.id]);
}

#[test]
fn with_photos_returns_only_posts_carrying_photos() {
    let store = open_store();
    let author = seed_user(&store, "alice");
    let car = seed_car(&store, "Lada Vesta", "1.6");
    let illustrated = seed_post(&store, &author, &car, "with photo", 2_000);
    seed_post(&store, &author, &car, "text only", 1_000);

    add_photo(&store, &illustrated, "/photos/only.jpg", 0);

    let hits = PostRepository::new(&store).find_all_with_photos();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].post.id, illustrated.id);
    assert_eq!(hits[0].photos.len(), 1);
}

#[test]
fn car_name_match_is_case_insensitive_and_passes_wildcards_through() {
    let store = open_store();
    let author = seed_user(&store, "alice");
    let vesta = seed_car(&store, "Lada Vesta", "1.6");
    let priora = seed_car(&store, "lada Priora", "1.8");
    let benz = seed_car(&store, "Mercedes C180", "2.0");
    seed_post(&store, &author, &vesta, "vesta", 3_000);
    seed_post(&store, &author, &priora, "priora", 2_000);
    seed_post(&store, &author, &benz, "benz", 1_000);

    let posts = PostRepository::new(&store);

    let lada_hits = posts.find_all_by_car_name_like("aDa");
    let names: Vec<&str> = lada_hits
        .iter()
        .map(|aggregate| aggregate.car.car.name.as_str())
        .collect();
    assert_eq!(names, ["Lada Vesta", "lada Priora"]);

    assert_eq!(posts.find_all_by_car_name_like("Vesta").len(), 1);
    // The key is not escaped; a lone wildcard matches every car.
    assert_eq!(posts.find_all_by_car_name_like("%").len(), 3);
    assert!(posts.find_all_by_car_name_like("Volga").is_empty());
}

#[test]
fn empty_candidate_set_yields_no_aggregates() {
    let store = open_store();
    let author = seed_user(&store, "alice");
    let car = seed_car(&store, "Lada Vesta", "1.6");
    seed_post(&store, &author, &car, "outside every window", 10_000);

    assert!(PostRepository::new(&store)
        .find_all_created_between(1, 2)
        .is_empty());
}

#[test]
fn load_failure_degrades_to_empty_list() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE posts;").unwrap();
    let store = Store::new(conn);

    let posts = PostRepository::new(&store);
    assert!(posts.find_all_aggregates().is_empty());
    assert!(posts.find_all_with_photos().is_empty());
}

fn open_store() -> Store {
    Store::new(open_db_in_memory().unwrap())
}

fn now_ms() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after unix epoch");
    elapsed.as_millis() as i64
}

fn seed_user(store: &Store, login: &str) -> User {
    UserRepository::new(store).create(User::new(login, "pw"))
}

fn seed_car(store: &Store, name: &str, engine_name: &str) -> Car {
    let engine = EngineRepository::new(store).create(Engine::new(engine_name));
    CarRepository::new(store).create(Car::new(name, engine.id))
}

fn seed_post(store: &Store, author: &User, car: &Car, description: &str, created: i64) -> Post {
    PostRepository::new(store).create(Post::new(description, created, author.id, car.id))
}

fn add_photo(store: &Store, post: &Post, path: &str, sort: i64) -> PostPhoto {
    let file = FileRepository::new(store).create(FileRef::new(path, path));
    PostPhotoRepository::new(store).create(PostPhoto::new(post.id, file.id, sort))
}
