use anyhow::{Context, Result};
use reltab::{key, tuple, Config, Database, Value};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let dir = tempfile::tempdir().context("failed to create the store directory")?;
    let db = Database::with_config(
        Config::new()
            .with_paged_store(2)
            .with_store_dir(dir.path().join("pages"))
            .with_snapshot_dir(dir.path()),
    );

    let mut movie = db.create_table(
        "movie",
        "title year length genre studioName producerNo",
        "String Integer Integer String String Integer",
        "title year",
    )?;
    let mut cinema = db.create_table(
        "cinema",
        "title year length genre studioName producerNo",
        "String Integer Integer String String Integer",
        "title year",
    )?;
    let mut movie_star = db.create_table(
        "movieStar",
        "name address gender birthdate",
        "String String Character String",
        "name",
    )?;
    let mut stars_in = db.create_table(
        "starsIn",
        "movieTitle movieYear starName",
        "String Integer String",
        "movieTitle movieYear starName",
    )?;
    let mut movie_exec = db.create_table(
        "movieExec",
        "certNo name address fee",
        "Integer String String Double",
        "certNo",
    )?;
    let mut studio = db.create_table(
        "studio",
        "name address presNo",
        "String String Integer",
        "name",
    )?;

    movie.insert(tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345])?;
    movie.insert(tuple!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345])?;
    movie.insert(tuple!["Rocky", 1985, 200, "action", "Universal", 12125])?;
    movie.insert(tuple!["Rambo", 1978, 100, "action", "Universal", 32355])?;

    cinema.insert(tuple!["Rocky", 1985, 200, "action", "Universal", 12125])?;
    cinema.insert(tuple!["Rambo", 1978, 100, "action", "Universal", 32355])?;
    cinema.insert(tuple!["Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890])?;

    movie_star.insert(tuple!["Carrie_Fisher", "Hollywood", 'F', "9/9/99"])?;
    movie_star.insert(tuple!["Mark_Hamill", "Brentwood", 'M', "8/8/88"])?;
    movie_star.insert(tuple!["Harrison_Ford", "Beverly_Hills", 'M', "7/7/77"])?;

    stars_in.insert(tuple!["Star_Wars", 1977, "Carrie_Fisher"])?;
    stars_in.insert(tuple!["Star_Wars", 1977, "Mark_Hamill"])?;
    stars_in.insert(tuple!["Star_Wars", 1977, "Harrison_Ford"])?;

    movie_exec.insert(tuple![9999, "S_Spielberg", "Hollywood", 10000.00])?;

    studio.insert(tuple!["Fox", "Los_Angeles", 7777])?;
    studio.insert(tuple!["Universal", "Universal_City", 8888])?;
    studio.insert(tuple!["DreamWorks", "Universal_City", 9999])?;

    // a tuple of the wrong shape is rejected
    if let Err(e) = studio.insert(tuple!["Paramount", 4444]) {
        println!("rejected: {}", e);
    }

    for table in [&movie, &cinema, &movie_star, &stars_in, &movie_exec, &studio] {
        print!("{}", table);
        print!("{}", table.display_index());
    }

    print!("{}", movie.project("title year")?);

    let year = movie.col("year").context("movie has no year")?;
    print!("{}", movie.select(|t| t[year] < Value::from(1980))?);
    print!("{}", movie.select_key(&key!["Star_Wars", 1977])?);

    print!("{}", movie.union(&cinema)?);
    if let Err(e) = movie.union(&movie_star) {
        println!("union failed: {}", e);
    }

    print!("{}", movie.minus(&cinema)?);
    print!("{}", movie.join("studioName", "name", &studio)?);
    print!("{}", movie.natural_join(&cinema)?);
    print!("{}", movie_star.join("name", "starName", &stars_in)?);

    db.save(&movie)?;
    let loaded = db.load("movie")?;
    print!("{}", loaded);
    print!("{}", loaded.display_index());

    Ok(())
}
