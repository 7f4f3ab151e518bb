use reltab::{key, tuple, CompositeKey, Config, Database, Error, Mismatch, Table, Value};
use std::collections::BTreeSet;

fn movie(db: &Database, name: &str) -> Table {
    db.create_table(
        name,
        "title year length genre studioName producerNo",
        "String Integer Integer String String Integer",
        "title year",
    )
    .unwrap()
}

fn movie_db(db: &Database) -> (Table, Table, Table, Table) {
    let mut movie_table = movie(db, "movie");
    let mut cinema = movie(db, "cinema");
    let mut star = db
        .create_table(
            "movieStar",
            "name address gender birthdate",
            "String String Character String",
            "name",
        )
        .unwrap();
    let mut studio = db
        .create_table(
            "studio",
            "name address presNo",
            "String String Integer",
            "name",
        )
        .unwrap();

    let films = vec![
        tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345],
        tuple!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345],
        tuple!["Rocky", 1985, 200, "action", "Universal", 12125],
        tuple!["Rambo", 1978, 100, "action", "Universal", 32355],
    ];
    for film in films {
        movie_table.insert(film).unwrap();
    }
    cinema
        .insert(tuple!["Rocky", 1985, 200, "action", "Universal", 12125])
        .unwrap();
    cinema
        .insert(tuple!["Rambo", 1978, 100, "action", "Universal", 32355])
        .unwrap();
    cinema
        .insert(tuple!["Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890])
        .unwrap();

    star.insert(tuple!["Carrie_Fisher", "Hollywood", 'F', "9/9/99"])
        .unwrap();
    star.insert(tuple!["Mark_Hamill", "Brentwood", 'M', "8/8/88"])
        .unwrap();

    studio.insert(tuple!["Fox", "Los_Angeles", 7777]).unwrap();
    studio
        .insert(tuple!["Universal", "Universal_City", 8888])
        .unwrap();
    studio
        .insert(tuple!["DreamWorks", "Universal_City", 9999])
        .unwrap();

    (movie_table, cinema, star, studio)
}

fn as_set(table: &Table) -> BTreeSet<CompositeKey> {
    table
        .to_vec()
        .unwrap()
        .into_iter()
        .map(CompositeKey::from)
        .collect()
}

fn run_queries(db: &Database) {
    let (movie, cinema, star, studio) = movie_db(db);

    // project
    let titles = movie.project("title year").unwrap();
    assert_eq!(
        vec![
            tuple!["Star_Wars", 1977],
            tuple!["Star_Wars_2", 1980],
            tuple!["Rocky", 1985],
            tuple!["Rambo", 1978],
        ],
        titles.to_vec().unwrap()
    );

    // select
    let year = movie.col("year").unwrap();
    let old = movie.select(|t| t[year] < Value::from(1980)).unwrap();
    assert_eq!(2, old.len());
    let star_wars = movie.select_key(&key!["Star_Wars", 1977]).unwrap();
    assert_eq!(
        vec![tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345]],
        star_wars.to_vec().unwrap()
    );
    assert!(movie.select_key(&key!["Jaws", 1975]).unwrap().is_empty());

    // union
    let all = movie.union(&cinema).unwrap();
    assert_eq!(5, all.len());
    assert_eq!(as_set(&all), as_set(&cinema.union(&movie).unwrap()));
    assert!(matches!(
        movie.union(&star),
        Err(Error::IncompatibleTables {
            mismatch: Mismatch::Arity { left: 6, right: 4 },
            ..
        })
    ));

    // minus
    assert_eq!(
        vec![
            tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345],
            tuple!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345],
        ],
        movie.minus(&cinema).unwrap().to_vec().unwrap()
    );
    assert_eq!(
        vec![tuple!["Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890]],
        cinema.minus(&movie).unwrap().to_vec().unwrap()
    );
    assert!(movie.minus(&movie).unwrap().is_empty());

    // equi-join
    let joined = movie.join("studioName", "name", &studio).unwrap();
    assert_eq!(4, joined.len());
    assert_eq!(9, joined.schema().arity());
    for tuple in joined.to_vec().unwrap() {
        assert_eq!(tuple[4], tuple[6]);
    }

    // natural join
    let natural = movie.natural_join(&cinema).unwrap();
    assert_eq!(movie.schema().attributes(), natural.schema().attributes());
    assert_eq!(
        vec![
            tuple!["Rocky", 1985, 200, "action", "Universal", 12125],
            tuple!["Rambo", 1978, 100, "action", "Universal", 32355],
        ],
        natural.to_vec().unwrap()
    );

    // operands are left untouched
    assert_eq!(4, movie.len());
    assert_eq!(3, cinema.len());
}

#[test]
fn test_movie_db_in_memory() {
    run_queries(&Database::new());
}

#[test]
fn test_movie_db_paged() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::with_config(Config::new().with_paged_store(2).with_store_dir(dir.path()));
    run_queries(&db);
}

#[test]
fn test_movie_db_one_tuple_pages() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::with_config(Config::new().with_paged_store(1).with_store_dir(dir.path()));
    run_queries(&db);
}

#[test]
fn test_movie_db_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::with_config(Config::new().with_snapshot_dir(dir.path()));
    let (movie, _, _, studio) = movie_db(&db);

    let joined = movie.join("studioName", "name", &studio).unwrap();
    for table in [&movie, &studio, &joined] {
        db.save(table).unwrap();
    }

    let loaded = db.load("movie").unwrap();
    assert_eq!(movie.schema(), loaded.schema());
    assert_eq!(movie.to_vec().unwrap(), loaded.to_vec().unwrap());
    assert_eq!(
        Some(tuple!["Rocky", 1985, 200, "action", "Universal", 12125]),
        loaded.get(&key!["Rocky", 1985]).unwrap()
    );

    let loaded = db.load(joined.name()).unwrap();
    assert_eq!(joined.schema().attributes(), loaded.schema().attributes());
    assert_eq!(joined.to_vec().unwrap(), loaded.to_vec().unwrap());
}
