#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use sotags_core::entities::*;

use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = tags)]
pub struct NewTag<'a> {
    pub name: &'a str,
    pub tag_count: i64,
    pub fetched_at: i64,
}

impl<'a> TryFrom<&'a Tag> for NewTag<'a> {
    type Error = anyhow::Error;
    fn try_from(from: &'a Tag) -> Result<Self, Self::Error> {
        let Tag {
            name,
            count,
            fetched_at,
        } = from;
        let tag_count = i64::try_from(*count)
            .map_err(|_| anyhow!("Count of tag '{name}' exceeds the storable range: {count}"))?;
        Ok(Self {
            name,
            tag_count,
            fetched_at: fetched_at.as_millis(),
        })
    }
}

#[derive(Queryable)]
pub struct TagEntity {
    pub rowid: i64,
    pub name: String,
    pub tag_count: i64,
    pub fetched_at: i64,
}

impl TryFrom<TagEntity> for TagRecord {
    type Error = anyhow::Error;
    fn try_from(from: TagEntity) -> Result<Self, Self::Error> {
        let TagEntity {
            rowid,
            name,
            tag_count,
            fetched_at,
        } = from;
        let count = TagCount::try_from(tag_count)
            .map_err(|_| anyhow!("Invalid count of tag '{name}': {tag_count}"))?;
        let fetched_at = Timestamp::try_from_millis(fetched_at)?;
        Ok(Self {
            id: rowid.into(),
            tag: Tag {
                name,
                count,
                fetched_at,
            },
        })
    }
}
