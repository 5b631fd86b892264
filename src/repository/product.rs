use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::category::Category as DomainCategory,
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery, ProductSortBy,
        SortOrder, UpdateProduct as DomainUpdateProduct,
    },
    domain::tag::Tag as DomainTag,
    models::category::Category as DbCategory,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    models::product_tag::NewProductTag as DbNewProductTag,
    models::tag::Tag as DbTag,
    repository::{DieselRepository, ProductReader, ProductWriter},
    repository::errors::{RepositoryError, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        if let Some(db_product) = product {
            let domain = attach_single_product(&mut conn, db_product)?;
            Ok(Some(domain))
        } else {
            Ok(None)
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            count_query = count_query.filter(products::name.like(format!("%{term}%")));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            items = items.filter(products::name.like(format!("%{term}%")));
        }

        items = match (query.sort_by, query.sort_order) {
            (ProductSortBy::Name, SortOrder::Asc) => items.order(products::name.asc()),
            (ProductSortBy::Name, SortOrder::Desc) => items.order(products::name.desc()),
            (ProductSortBy::CreatedAt, SortOrder::Asc) => items.order(products::created_at.asc()),
            (ProductSortBy::CreatedAt, SortOrder::Desc) => items.order(products::created_at.desc()),
            (ProductSortBy::UpdatedAt, SortOrder::Asc) => items.order(products::updated_at.asc()),
            (ProductSortBy::UpdatedAt, SortOrder::Desc) => items.order(products::updated_at.desc()),
        };

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;
        let domain_products = attach_product_relations(&mut conn, db_products)?;

        Ok((total, domain_products))
    }

    fn list_products_by_tag(&self, tag_id: i32) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{product_tags, products};

        let mut conn = self.conn()?;
        let db_products = product_tags::table
            .inner_join(products::table)
            .filter(product_tags::tag_id.eq(tag_id))
            .order(products::created_at.desc())
            .select(products::all_columns)
            .load::<DbProduct>(&mut conn)?;

        attach_product_relations(&mut conn, db_products)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_tags, products, tags};

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            if !new_product.tag_ids.is_empty() {
                let known = tags::table
                    .filter(tags::id.eq_any(&new_product.tag_ids))
                    .count()
                    .get_result::<i64>(conn)? as usize;
                if known != new_product.tag_ids.len() {
                    return Err(RepositoryError::NotFound);
                }
            }

            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            if !new_product.tag_ids.is_empty() {
                let rows: Vec<DbNewProductTag> = new_product
                    .tag_ids
                    .iter()
                    .map(|tag_id| DbNewProductTag {
                        product_id: created.id,
                        tag_id: *tag_id,
                    })
                    .collect();
                diesel::insert_into(product_tags::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            attach_single_product(conn, created)
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_tags, products, tags};

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            if let Some(tag_ids) = updates.tag_ids.as_ref() {
                let known = tags::table
                    .filter(tags::id.eq_any(tag_ids))
                    .count()
                    .get_result::<i64>(conn)? as usize;
                if known != tag_ids.len() {
                    return Err(RepositoryError::NotFound);
                }

                diesel::delete(
                    product_tags::table.filter(product_tags::product_id.eq(product_id)),
                )
                .execute(conn)?;

                if !tag_ids.is_empty() {
                    let rows: Vec<DbNewProductTag> = tag_ids
                        .iter()
                        .map(|tag_id| DbNewProductTag {
                            product_id,
                            tag_id: *tag_id,
                        })
                        .collect();
                    diesel::insert_into(product_tags::table)
                        .values(&rows)
                        .execute(conn)?;
                }
            }

            attach_single_product(conn, updated)
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<DomainProduct> {
        use crate::schema::{favorites, product_tags, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let db_product = products::table
                .filter(products::id.eq(product_id))
                .first::<DbProduct>(conn)?;

            let domain = attach_single_product(conn, db_product)?;

            diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(favorites::table.filter(favorites::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(products::table.filter(products::id.eq(product_id))).execute(conn)?;

            Ok(domain)
        })
    }

    fn delete_products(&self, product_ids: &[i32]) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{favorites, product_tags, products};

        let mut conn = self.conn()?;

        conn.transaction::<Vec<DomainProduct>, RepositoryError, _>(|conn| {
            let db_products = products::table
                .filter(products::id.eq_any(product_ids))
                .load::<DbProduct>(conn)?;

            if db_products.is_empty() {
                return Ok(Vec::new());
            }

            let found_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
            let domain_products = attach_product_relations(conn, db_products)?;

            diesel::delete(
                product_tags::table.filter(product_tags::product_id.eq_any(&found_ids)),
            )
            .execute(conn)?;
            diesel::delete(favorites::table.filter(favorites::product_id.eq_any(&found_ids)))
                .execute(conn)?;
            diesel::delete(products::table.filter(products::id.eq_any(&found_ids)))
                .execute(conn)?;

            Ok(domain_products)
        })
    }
}

/// Convert database rows into domain products with their category and tags attached.
pub(super) fn attach_product_relations(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<DomainProduct>> {
    if db_products.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
    let category_ids: Vec<i32> = db_products
        .iter()
        .filter_map(|product| product.category_id)
        .collect();

    let categories = load_categories_by_ids(conn, &category_ids)?;
    let mut tag_map = load_tags_for_products(conn, &product_ids)?;

    let mut domain_products = Vec::with_capacity(db_products.len());
    for db_product in db_products {
        let mut domain: DomainProduct = db_product.into();
        domain.category = domain.category_id.and_then(|id| categories.get(&id).cloned());
        domain.tags = tag_map.remove(&domain.id).unwrap_or_default();
        domain_products.push(domain);
    }

    Ok(domain_products)
}

fn attach_single_product(
    conn: &mut SqliteConnection,
    db_product: DbProduct,
) -> RepositoryResult<DomainProduct> {
    let mut products = attach_product_relations(conn, vec![db_product])?;
    products.pop().ok_or(RepositoryError::NotFound)
}

fn load_categories_by_ids(
    conn: &mut SqliteConnection,
    category_ids: &[i32],
) -> RepositoryResult<HashMap<i32, DomainCategory>> {
    use crate::schema::categories;

    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = categories::table
        .filter(categories::id.eq_any(category_ids))
        .load::<DbCategory>(conn)?;

    Ok(rows.into_iter().map(|row| (row.id, row.into())).collect())
}

fn load_tags_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTag>>> {
    use crate::schema::{product_tags, tags};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_tags::table
        .inner_join(tags::table)
        .filter(product_tags::product_id.eq_any(product_ids))
        .order(product_tags::created_at.asc())
        .select((product_tags::product_id, tags::all_columns))
        .load::<(i32, DbTag)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (product_id, tag) in rows {
        map.entry(product_id).or_default().push(tag.into());
    }

    Ok(map)
}
