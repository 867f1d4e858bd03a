use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::property::{
        NewProperty as DomainNewProperty, Property as DomainProperty, PropertyListQuery,
        UpdatePricing as DomainUpdatePricing,
    },
    models::property::{
        NewProperty as DbNewProperty, NewPropertyExtra as DbNewPropertyExtra,
        Property as DbProperty, PropertyExtra as DbPropertyExtra,
        UpdatePricing as DbUpdatePricing,
    },
    repository::{DieselRepository, PropertyReader, PropertyWriter, RepositoryError, RepositoryResult},
};

impl PropertyReader for DieselRepository {
    fn get_property_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProperty>> {
        use crate::schema::properties;

        let mut conn = self.conn()?;
        let property = properties::table
            .filter(properties::id.eq(id))
            .first::<DbProperty>(&mut conn)
            .optional()?;

        let Some(property) = property else {
            return Ok(None);
        };

        let mut extras = load_extras_for_properties(&mut conn, &[property.id])?;
        let property_extras = extras.remove(&property.id).unwrap_or_default();

        Ok(Some(DomainProperty::from((property, property_extras))))
    }

    fn list_properties(
        &self,
        query: PropertyListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProperty>)> {
        use crate::schema::properties;

        let mut conn = self.conn()?;

        let PropertyListQuery {
            owner_id,
            published_only,
            search,
            pagination,
        } = query;

        let search_pattern = search.as_ref().map(|term| format!("%{}%", term));

        let mut count_query = properties::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(ref owner) = owner_id {
            count_query = count_query.filter(properties::owner_id.eq(owner.as_str()));
        }

        if published_only {
            count_query = count_query.filter(properties::is_published.eq(true));
        }

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                properties::title
                    .like(pattern.clone())
                    .or(properties::location.like(pattern.clone())),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = properties::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(ref owner) = owner_id {
            items = items.filter(properties::owner_id.eq(owner.as_str()));
        }

        if published_only {
            items = items.filter(properties::is_published.eq(true));
        }

        if let Some(ref pattern) = search_pattern {
            items = items.filter(
                properties::title
                    .like(pattern.clone())
                    .or(properties::location.like(pattern.clone())),
            );
        }

        items = items.order((properties::created_at.desc(), properties::id.desc()));

        if let Some(pagination) = pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let db_properties = items.load::<DbProperty>(&mut conn)?;
        if db_properties.is_empty() {
            return Ok((total, Vec::new()));
        }

        let property_ids: Vec<i32> = db_properties.iter().map(|property| property.id).collect();
        let mut extras_by_property = load_extras_for_properties(&mut conn, &property_ids)?;

        let properties = db_properties
            .into_iter()
            .map(|property| {
                let extras = extras_by_property.remove(&property.id).unwrap_or_default();
                DomainProperty::from((property, extras))
            })
            .collect();

        Ok((total, properties))
    }
}

impl PropertyWriter for DieselRepository {
    fn create_property(&self, new_property: &DomainNewProperty) -> RepositoryResult<DomainProperty> {
        use crate::schema::{properties, property_extras};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProperty, RepositoryError, _>(|conn| {
            let db_new = DbNewProperty::from(new_property);

            let created = diesel::insert_into(properties::table)
                .values(&db_new)
                .get_result::<DbProperty>(conn)?;

            let property_id = created.id;
            let payload = DbNewPropertyExtra::from_pricing(property_id, &new_property.pricing);
            if !payload.is_empty() {
                diesel::insert_into(property_extras::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let mut extras = load_extras_for_properties(conn, &[property_id])?;
            let extras = extras.remove(&property_id).unwrap_or_default();

            Ok(DomainProperty::from((created, extras)))
        })
    }

    fn update_pricing(
        &self,
        property_id: i32,
        updates: &DomainUpdatePricing,
    ) -> RepositoryResult<DomainProperty> {
        use crate::schema::{properties, property_extras};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProperty, RepositoryError, _>(|conn| {
            let db_updates = DbUpdatePricing::from(updates);

            let updated = diesel::update(properties::table.filter(properties::id.eq(property_id)))
                .set(&db_updates)
                .get_result::<DbProperty>(conn)?;

            diesel::delete(
                property_extras::table.filter(property_extras::property_id.eq(property_id)),
            )
            .execute(conn)?;

            let payload = DbNewPropertyExtra::from_pricing(property_id, &updates.pricing);
            if !payload.is_empty() {
                diesel::insert_into(property_extras::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let mut extras = load_extras_for_properties(conn, &[property_id])?;
            let extras = extras.remove(&property_id).unwrap_or_default();

            Ok(DomainProperty::from((updated, extras)))
        })
    }
}

fn load_extras_for_properties(
    conn: &mut SqliteConnection,
    property_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DbPropertyExtra>>> {
    use crate::schema::property_extras;

    if property_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = property_extras::table
        .filter(property_extras::property_id.eq_any(property_ids))
        .order((property_extras::position.asc(), property_extras::id.asc()))
        .load::<DbPropertyExtra>(conn)?;

    let mut map: HashMap<i32, Vec<DbPropertyExtra>> = HashMap::new();
    for row in rows {
        map.entry(row.property_id).or_default().push(row);
    }

    Ok(map)
}
