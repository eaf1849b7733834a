use mobc::{Manager, Pool};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

pub type DbPool = Pool<SqliteManager>;

/// Catalog rows resolved during the interactive selection.
#[derive(Debug, Clone)]
pub struct State {
    pub id: i64,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct City {
    pub id: i64,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct Niche {
    pub id: i64,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogCounts {
    pub states: i64,
    pub cities: i64,
    pub niches: i64,
}

pub struct SqliteManager {
    db_path: String,
}

impl SqliteManager {
    pub fn new(db_path: String) -> Self {
        debug!("Creating SqliteManager for path: {}", db_path);
        Self { db_path }
    }
}

#[async_trait::async_trait]
impl Manager for SqliteManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        debug!("Opening catalog database: {}", self.db_path);
        let conn = Connection::open(&self.db_path)?;
        conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(conn)
    }

    async fn check(&self, conn: Self::Connection) -> Result<Self::Connection, Self::Error> {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(conn)
    }
}

pub async fn create_db_pool(
    db_path: &str,
) -> Result<DbPool, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = Path::new(db_path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let manager = SqliteManager::new(db_path.to_string());
    let pool = Pool::builder().max_open(4).build(manager);

    ensure_schema(&pool).await?;
    info!("Catalog database ready at {}", db_path);
    Ok(pool)
}

async fn ensure_schema(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS states (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            state_code TEXT UNIQUE NOT NULL,
            state_name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            state_id INTEGER NOT NULL,
            city_slug TEXT NOT NULL,
            FOREIGN KEY (state_id) REFERENCES states(id),
            UNIQUE (state_id, city_slug)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS niches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            niche_code TEXT UNIQUE NOT NULL,
            niche_name TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

pub async fn get_states(
    pool: &DbPool,
) -> Result<Vec<State>, Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;
    let mut stmt =
        conn.prepare("SELECT id, state_code, state_name FROM states ORDER BY state_name")?;
    let rows = stmt.query_map([], |row| {
        Ok(State {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub async fn get_cities(
    pool: &DbPool,
    state_id: i64,
) -> Result<Vec<City>, Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;
    let mut stmt =
        conn.prepare("SELECT id, city_slug FROM cities WHERE state_id = ?1 ORDER BY city_slug")?;
    let rows = stmt.query_map(params![state_id], |row| {
        Ok(City {
            id: row.get(0)?,
            slug: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub async fn get_niches(
    pool: &DbPool,
) -> Result<Vec<Niche>, Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;
    let mut stmt =
        conn.prepare("SELECT id, niche_code, niche_name FROM niches ORDER BY niche_name")?;
    let rows = stmt.query_map([], |row| {
        Ok(Niche {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Upserts one state with its cities. Duplicate codes and slugs are ignored
/// thanks to the UNIQUE constraints, so re-imports are safe.
pub async fn upsert_state_with_cities(
    pool: &DbPool,
    state_code: &str,
    state_name: &str,
    city_slugs: &[String],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;

    conn.execute(
        "INSERT OR IGNORE INTO states (state_code, state_name) VALUES (?1, ?2)",
        params![state_code, state_name],
    )?;
    let state_id: i64 = conn.query_row(
        "SELECT id FROM states WHERE state_code = ?1",
        params![state_code],
        |row| row.get(0),
    )?;

    for slug in city_slugs {
        conn.execute(
            "INSERT OR IGNORE INTO cities (state_id, city_slug) VALUES (?1, ?2)",
            params![state_id, slug],
        )?;
    }

    Ok(())
}

pub async fn upsert_niche(
    pool: &DbPool,
    niche_code: &str,
    niche_name: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;
    conn.execute(
        "INSERT OR IGNORE INTO niches (niche_code, niche_name) VALUES (?1, ?2)",
        params![niche_code, niche_name],
    )?;
    Ok(())
}

pub async fn catalog_counts(
    pool: &DbPool,
) -> Result<CatalogCounts, Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;
    let states: i64 = conn.query_row("SELECT COUNT(*) FROM states", [], |row| row.get(0))?;
    let cities: i64 = conn.query_row("SELECT COUNT(*) FROM cities", [], |row| row.get(0))?;
    let niches: i64 = conn.query_row("SELECT COUNT(*) FROM niches", [], |row| row.get(0))?;
    Ok(CatalogCounts {
        states,
        cities,
        niches,
    })
}
