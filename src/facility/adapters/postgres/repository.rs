//! `PostgreSQL` repository implementations for facility storage.

use super::{
    models::{AssetRow, LocationRow, NewAssetRow, NewLocationRow},
    schema::{assets, locations},
};
use crate::facility::{
    domain::{
        Asset, AssetId, Location, LocationId, PersistedAssetData, PersistedLocationData,
    },
    ports::{
        AssetRepository, AssetRepositoryError, AssetRepositoryResult, LocationRepository,
        LocationRepositoryError, LocationRepositoryResult,
    },
};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by facility adapters.
pub type FacilityPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed location repository.
#[derive(Debug, Clone)]
pub struct PostgresLocationRepository {
    pool: FacilityPgPool,
}

impl PostgresLocationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: FacilityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> LocationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> LocationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(LocationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(LocationRepositoryError::persistence)?
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn store(&self, location: &Location) -> LocationRepositoryResult<()> {
        let location_id = location.id();
        let new_row = location_to_new_row(location);

        self.run_blocking(move |connection| {
            diesel::insert_into(locations::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        LocationRepositoryError::DuplicateLocation(location_id)
                    }
                    _ => LocationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, location: &Location) -> LocationRepositoryResult<()> {
        let location_id = location.id();
        let row = location_to_new_row(location);

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                locations::table.filter(locations::id.eq(location_id.into_inner())),
            )
            .set((
                locations::name.eq(row.name),
                locations::address.eq(row.address),
                locations::description.eq(row.description),
                locations::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(LocationRepositoryError::persistence)?;

            if affected == 0 {
                return Err(LocationRepositoryError::NotFound(location_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: LocationId) -> LocationRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(locations::table.filter(locations::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(LocationRepositoryError::persistence)?;

            if affected == 0 {
                return Err(LocationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: LocationId) -> LocationRepositoryResult<Option<Location>> {
        self.run_blocking(move |connection| {
            let row = locations::table
                .filter(locations::id.eq(id.into_inner()))
                .select(LocationRow::as_select())
                .first::<LocationRow>(connection)
                .optional()
                .map_err(LocationRepositoryError::persistence)?;
            Ok(row.map(row_to_location))
        })
        .await
    }

    async fn list_by_owner(&self, owner: UserId) -> LocationRepositoryResult<Vec<Location>> {
        self.run_blocking(move |connection| {
            let rows = locations::table
                .filter(locations::owner_id.eq(owner.into_inner()))
                .order(locations::created_at.asc())
                .select(LocationRow::as_select())
                .load::<LocationRow>(connection)
                .map_err(LocationRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_location).collect())
        })
        .await
    }
}

/// `PostgreSQL`-backed asset repository.
#[derive(Debug, Clone)]
pub struct PostgresAssetRepository {
    pool: FacilityPgPool,
}

impl PostgresAssetRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: FacilityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AssetRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AssetRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AssetRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AssetRepositoryError::persistence)?
    }
}

#[async_trait]
impl AssetRepository for PostgresAssetRepository {
    async fn store(&self, asset: &Asset) -> AssetRepositoryResult<()> {
        let asset_id = asset.id();
        let new_row = asset_to_new_row(asset);

        self.run_blocking(move |connection| {
            diesel::insert_into(assets::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AssetRepositoryError::DuplicateAsset(asset_id)
                    }
                    _ => AssetRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, asset: &Asset) -> AssetRepositoryResult<()> {
        let asset_id = asset.id();
        let row = asset_to_new_row(asset);

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(assets::table.filter(assets::id.eq(asset_id.into_inner())))
                    .set((
                        assets::name.eq(row.name),
                        assets::description.eq(row.description),
                        assets::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(AssetRepositoryError::persistence)?;

            if affected == 0 {
                return Err(AssetRepositoryError::NotFound(asset_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: AssetId) -> AssetRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(assets::table.filter(assets::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(AssetRepositoryError::persistence)?;

            if affected == 0 {
                return Err(AssetRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: AssetId) -> AssetRepositoryResult<Option<Asset>> {
        self.run_blocking(move |connection| {
            let row = assets::table
                .filter(assets::id.eq(id.into_inner()))
                .select(AssetRow::as_select())
                .first::<AssetRow>(connection)
                .optional()
                .map_err(AssetRepositoryError::persistence)?;
            Ok(row.map(row_to_asset))
        })
        .await
    }

    async fn list_by_location(&self, location: LocationId) -> AssetRepositoryResult<Vec<Asset>> {
        self.run_blocking(move |connection| {
            let rows = assets::table
                .filter(assets::location_id.eq(location.into_inner()))
                .order(assets::created_at.asc())
                .select(AssetRow::as_select())
                .load::<AssetRow>(connection)
                .map_err(AssetRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_asset).collect())
        })
        .await
    }
}

fn location_to_new_row(location: &Location) -> NewLocationRow {
    NewLocationRow {
        id: location.id().into_inner(),
        owner_id: location.owner().into_inner(),
        name: location.name().to_owned(),
        address: location.address().to_owned(),
        description: location.description().to_owned(),
        created_at: location.created_at(),
        updated_at: location.updated_at(),
    }
}

fn row_to_location(row: LocationRow) -> Location {
    Location::from_persisted(PersistedLocationData {
        id: LocationId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        name: row.name,
        address: row.address,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn asset_to_new_row(asset: &Asset) -> NewAssetRow {
    NewAssetRow {
        id: asset.id().into_inner(),
        location_id: asset.location_id().into_inner(),
        name: asset.name().to_owned(),
        description: asset.description().to_owned(),
        created_at: asset.created_at(),
        updated_at: asset.updated_at(),
    }
}

fn row_to_asset(row: AssetRow) -> Asset {
    Asset::from_persisted(PersistedAssetData {
        id: AssetId::from_uuid(row.id),
        location_id: LocationId::from_uuid(row.location_id),
        name: row.name,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
