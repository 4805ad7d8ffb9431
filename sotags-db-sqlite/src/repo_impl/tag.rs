use super::*;

// Number of tags that are inserted with a single statement.
// Each row binds 3 parameters and the number of parameters
// per statement is limited by SQLite.
const INSERT_CHUNK_SIZE: usize = 250;

impl<'a> TagRepo for DbReadOnly<'a> {
    fn all_tags(&self) -> Result<Vec<TagRecord>> {
        all_tags(&mut self.conn.borrow_mut())
    }

    fn replace_all_tags(&self, _tags: &[Tag]) -> Result<usize> {
        unreachable!();
    }
}

impl<'a> TagRepo for DbReadWrite<'a> {
    fn all_tags(&self) -> Result<Vec<TagRecord>> {
        all_tags(&mut self.conn.borrow_mut())
    }

    fn replace_all_tags(&self, tags: &[Tag]) -> Result<usize> {
        replace_all_tags(&mut self.conn.borrow_mut(), tags)
    }
}

impl<'a> TagRepo for DbConnection<'a> {
    fn all_tags(&self) -> Result<Vec<TagRecord>> {
        all_tags(&mut self.conn.borrow_mut())
    }

    fn replace_all_tags(&self, tags: &[Tag]) -> Result<usize> {
        replace_all_tags(&mut self.conn.borrow_mut(), tags)
    }
}

fn all_tags(conn: &mut SqliteConnection) -> Result<Vec<TagRecord>> {
    use schema::tags::dsl;
    dsl::tags
        .order_by(dsl::rowid)
        .load::<models::TagEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|entity| TagRecord::try_from(entity).map_err(repo::Error::Other))
        .collect()
}

fn replace_all_tags(conn: &mut SqliteConnection, tags: &[Tag]) -> Result<usize> {
    let new_tags = tags
        .iter()
        .map(models::NewTag::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let deleted = diesel::delete(schema::tags::table)
        .execute(conn)
        .map_err(from_diesel_err)?;
    log::debug!("Deleted {deleted} tags");
    let mut inserted = 0;
    for chunk in new_tags.chunks(INSERT_CHUNK_SIZE) {
        inserted += diesel::insert_into(schema::tags::table)
            .values(chunk)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    debug_assert_eq!(inserted, tags.len());
    Ok(inserted)
}
