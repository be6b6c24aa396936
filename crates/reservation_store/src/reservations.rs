use chrono::NaiveDate;
use diesel::prelude::*;

use crate::schema::reservations;
use crate::{ConnectionPool, Error};

/// Stored reservation row.
///
/// `id` is `None` until the row has been saved for the first time. `status`
/// is kept as the raw column text, interpreting it is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservationEntity {
    pub id: Option<i64>,
    pub user_id: i64,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

/// Storage capability for reservation rows.
///
/// Implementations must be `Send` and `Sync` as repositories are shared
/// across request handlers.
pub trait ReservationRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> Result<Option<ReservationEntity>, Error>;

    /// All rows, ordered by id.
    fn find_all(&self) -> Result<Vec<ReservationEntity>, Error>;

    /// Inserts the row when it has no id yet, otherwise replaces every column
    /// of the existing row.
    fn save(&self, entity: &ReservationEntity) -> Result<ReservationEntity, Error>;

    fn delete_by_id(&self, id: i64) -> Result<(), Error>;

    /// Overwrites every column of row `id` in place and returns the number of
    /// rows affected.
    fn update_all_fields(
        &self,
        id: i64,
        user_id: i64,
        room_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: &str,
    ) -> Result<usize, Error>;
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ReservationRow {
    id: i64,
    user_id: i64,
    room_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
}

impl From<ReservationRow> for ReservationEntity {
    fn from(row: ReservationRow) -> Self {
        Self {
            id: Some(row.id),
            user_id: row.user_id,
            room_id: row.room_id,
            start_date: row.start_date,
            end_date: row.end_date,
            status: row.status,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = reservations)]
struct ReservationValues<'a> {
    user_id: i64,
    room_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: &'a str,
}

impl<'a> From<&'a ReservationEntity> for ReservationValues<'a> {
    fn from(entity: &'a ReservationEntity) -> Self {
        Self {
            user_id: entity.user_id,
            room_id: entity.room_id,
            start_date: entity.start_date,
            end_date: entity.end_date,
            status: &entity.status,
        }
    }
}

#[derive(Clone)]
pub struct SqliteReservationRepository {
    pool: ConnectionPool,
}

impl SqliteReservationRepository {
    pub(crate) fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

impl ReservationRepository for SqliteReservationRepository {
    fn find_by_id(&self, id: i64) -> Result<Option<ReservationEntity>, Error> {
        let mut conn = self.pool.get()?;
        let row = reservations::table
            .find(id)
            .select(ReservationRow::as_select())
            .first::<ReservationRow>(&mut conn)
            .optional()?;
        Ok(row.map(ReservationEntity::from))
    }

    fn find_all(&self) -> Result<Vec<ReservationEntity>, Error> {
        let mut conn = self.pool.get()?;
        let rows = reservations::table
            .order(reservations::id.asc())
            .select(ReservationRow::as_select())
            .load::<ReservationRow>(&mut conn)?;
        Ok(rows.into_iter().map(ReservationEntity::from).collect())
    }

    fn save(&self, entity: &ReservationEntity) -> Result<ReservationEntity, Error> {
        let mut conn = self.pool.get()?;
        let values = ReservationValues::from(entity);
        let row = match entity.id {
            None => diesel::insert_into(reservations::table)
                .values(&values)
                .returning(ReservationRow::as_returning())
                .get_result::<ReservationRow>(&mut conn)?,
            Some(id) => diesel::update(reservations::table.find(id))
                .set(&values)
                .returning(ReservationRow::as_returning())
                .get_result::<ReservationRow>(&mut conn)
                .optional()?
                .ok_or(Error::MissingRow(id))?,
        };
        Ok(row.into())
    }

    fn delete_by_id(&self, id: i64) -> Result<(), Error> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, Error, _>(|conn| {
            diesel::delete(reservations::table.find(id)).execute(conn)?;
            Ok(())
        })
    }

    fn update_all_fields(
        &self,
        id: i64,
        user_id: i64,
        room_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: &str,
    ) -> Result<usize, Error> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, Error, _>(|conn| {
            Ok(diesel::update(reservations::table.find(id))
                .set((
                    reservations::user_id.eq(user_id),
                    reservations::room_id.eq(room_id),
                    reservations::start_date.eq(start_date),
                    reservations::end_date.eq(end_date),
                    reservations::status.eq(status),
                ))
                .execute(conn)?)
        })
    }
}
