use diesel::dsl::{exists, select};
use diesel::prelude::*;

use crate::domain::product_tag::{
    NewProductTag as DomainNewProductTag, ProductTag as DomainProductTag,
};
use crate::domain::tag::{NewTag as DomainNewTag, Tag as DomainTag};
use crate::models::product_tag::{NewProductTag as DbNewProductTag, ProductTag as DbProductTag};
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TagReader, TagWriter};

impl TagReader for DieselRepository {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let tag = tags::table
            .filter(tags::id.eq(id))
            .first::<DbTag>(&mut conn)
            .optional()?;

        Ok(tag.map(DomainTag::from))
    }

    fn get_tag_by_name(&self, name: &str) -> RepositoryResult<Option<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let tag = tags::table
            .filter(tags::name.eq(name))
            .first::<DbTag>(&mut conn)
            .optional()?;

        Ok(tag.map(DomainTag::from))
    }

    fn get_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::tags;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;

        let tags = tags::table
            .filter(tags::id.eq_any(ids))
            .load::<DbTag>(&mut conn)?;

        Ok(tags.into_iter().map(DomainTag::from).collect())
    }

    fn list_tags(&self) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let tags = tags::table
            .order(tags::name.asc())
            .load::<DbTag>(&mut conn)?;

        Ok(tags.into_iter().map(DomainTag::from).collect())
    }

    fn is_tag_assigned(&self, product_id: i32, tag_id: i32) -> RepositoryResult<bool> {
        use crate::schema::product_tags;

        let mut conn = self.conn()?;

        let assigned = select(exists(
            product_tags::table
                .filter(product_tags::product_id.eq(product_id))
                .filter(product_tags::tag_id.eq(tag_id)),
        ))
        .get_result(&mut conn)?;

        Ok(assigned)
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &DomainNewTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let insertable = DbNewTag::from(new_tag);

        let created = diesel::insert_into(tags::table)
            .values(&insertable)
            .get_result::<DbTag>(&mut conn)?;

        Ok(created.into())
    }

    fn assign_tag(&self, assignment: &DomainNewProductTag) -> RepositoryResult<DomainProductTag> {
        use crate::schema::product_tags;

        let mut conn = self.conn()?;

        let insertable = DbNewProductTag::from(assignment);

        let created = diesel::insert_into(product_tags::table)
            .values(&insertable)
            .get_result::<DbProductTag>(&mut conn)?;

        Ok(created.into())
    }

    fn unassign_tag(&self, product_id: i32, tag_id: i32) -> RepositoryResult<()> {
        use crate::schema::product_tags;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            product_tags::table
                .filter(product_tags::product_id.eq(product_id))
                .filter(product_tags::tag_id.eq(tag_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
