//! Warmpath Storage Layer
//!
//! Implements the GraphStore trait over SQLite.
//!
//! # Architecture
//!
//! - `persons` table: one row per person, list attributes as JSON text
//! - `relationships` table: one row per unordered pair and kind
//!
//! # Examples
//!
//! ```no_run
//! use warmpath_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for graph operations
//! ```

#![warn(missing_docs)]

use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use warmpath_domain::person::{Education, GreekLife, Hometown, Person, PersonId, SocialHandle};
use warmpath_domain::relationship::{EdgeMetadata, Relationship, RelationshipKind};
use warmpath_domain::traits::{GraphStore, Neighbor, PersonQuery};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Referenced person id absent from the store
    #[error("Person not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Current timestamp in seconds since Unix epoch
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// SQLite-based implementation of GraphStore
///
/// Provides persistent storage for persons and typed relationship edges.
/// Edges are stored once per unordered pair under the lexicographically
/// ordered `(lo_id, hi_id)` key, so traversal treats them as bidirectional.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance; concurrent writers on the same database file are
/// serialized by SQLite itself.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use warmpath_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("warmpath.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        // SQLite's built-in LOWER folds ASCII only; person names and
        // employers are not ASCII-only, and the rest of the system
        // normalizes with Rust's Unicode lowercase.
        conn.create_scalar_function(
            "unicode_lower",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let value: Option<String> = ctx.get(0)?;
                Ok(value.map(|v| v.to_lowercase()))
            },
        )?;

        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Whether a person row exists (tombstoned or not)
    fn person_exists(&self, id: &PersonId) -> Result<bool, StoreError> {
        let exists: Option<bool> = self
            .conn
            .query_row(
                "SELECT 1 FROM persons WHERE id = ?1",
                params![id.as_str()],
                |_| Ok(true),
            )
            .optional()?;
        Ok(exists.unwrap_or(false))
    }

    fn require_person(&self, id: &PersonId) -> Result<(), StoreError> {
        if self.person_exists(id)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    /// Serialize list attributes to JSON text for storage
    fn prior_employers_to_json(employers: &[String]) -> String {
        Value::from(employers.to_vec()).to_string()
    }

    fn education_to_json(records: &[Education]) -> String {
        let items: Vec<Value> = records
            .iter()
            .map(|e| {
                json!({
                    "school": e.school,
                    "degree": e.degree,
                    "year": e.year,
                })
            })
            .collect();
        Value::from(items).to_string()
    }

    fn social_handles_to_json(handles: &[SocialHandle]) -> String {
        let items: Vec<Value> = handles
            .iter()
            .map(|h| json!({ "platform": h.platform, "handle": h.handle }))
            .collect();
        Value::from(items).to_string()
    }

    fn family_refs_to_json(refs: &[PersonId]) -> String {
        let items: Vec<Value> = refs.iter().map(|r| Value::from(r.as_str())).collect();
        Value::from(items).to_string()
    }

    fn greek_life_to_json(greek: &GreekLife) -> String {
        json!({
            "organization": greek.organization,
            "chapter": greek.chapter,
            "role": greek.role,
        })
        .to_string()
    }

    fn hometowns_to_json(hometowns: &[Hometown]) -> String {
        let items: Vec<Value> = hometowns
            .iter()
            .map(|h| json!({ "city": h.city, "state": h.state, "country": h.country }))
            .collect();
        Value::from(items).to_string()
    }

    fn metadata_to_json(metadata: &EdgeMetadata) -> String {
        let map: serde_json::Map<String, Value> = metadata
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect();
        Value::Object(map).to_string()
    }

    fn parse_json(text: &str, what: &str) -> Result<Value, StoreError> {
        serde_json::from_str(text)
            .map_err(|e| StoreError::InvalidData(format!("bad {} JSON: {}", what, e)))
    }

    fn json_array(value: &Value, what: &str) -> Result<Vec<Value>, StoreError> {
        value
            .as_array()
            .cloned()
            .ok_or_else(|| StoreError::InvalidData(format!("{} is not a JSON array", what)))
    }

    fn json_str(value: &Value, key: &str) -> Result<String, StoreError> {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::InvalidData(format!("missing string field '{}'", key)))
    }

    fn json_opt_str(value: &Value, key: &str) -> Option<String> {
        value.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn education_from_json(text: &str) -> Result<Vec<Education>, StoreError> {
        let value = Self::parse_json(text, "education")?;
        Self::json_array(&value, "education")?
            .iter()
            .map(|item| {
                Ok(Education {
                    school: Self::json_str(item, "school")?,
                    degree: Self::json_opt_str(item, "degree"),
                    year: item.get("year").and_then(Value::as_i64).map(|y| y as i32),
                })
            })
            .collect()
    }

    fn social_handles_from_json(text: &str) -> Result<Vec<SocialHandle>, StoreError> {
        let value = Self::parse_json(text, "social_handles")?;
        Self::json_array(&value, "social_handles")?
            .iter()
            .map(|item| {
                Ok(SocialHandle {
                    platform: Self::json_str(item, "platform")?,
                    handle: Self::json_str(item, "handle")?,
                })
            })
            .collect()
    }

    fn prior_employers_from_json(text: &str) -> Result<Vec<String>, StoreError> {
        let value = Self::parse_json(text, "prior_employers")?;
        Self::json_array(&value, "prior_employers")?
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    StoreError::InvalidData("prior employer is not a string".to_string())
                })
            })
            .collect()
    }

    fn family_refs_from_json(text: &str) -> Result<Vec<PersonId>, StoreError> {
        let value = Self::parse_json(text, "family_refs")?;
        Self::json_array(&value, "family_refs")?
            .iter()
            .map(|item| {
                item.as_str().map(PersonId::new).ok_or_else(|| {
                    StoreError::InvalidData("family ref is not a string".to_string())
                })
            })
            .collect()
    }

    fn greek_life_from_json(text: &str) -> Result<GreekLife, StoreError> {
        let value = Self::parse_json(text, "greek_life")?;
        Ok(GreekLife {
            organization: Self::json_str(&value, "organization")?,
            chapter: Self::json_str(&value, "chapter")?,
            role: Self::json_opt_str(&value, "role"),
        })
    }

    fn hometowns_from_json(text: &str) -> Result<Vec<Hometown>, StoreError> {
        let value = Self::parse_json(text, "hometowns")?;
        Self::json_array(&value, "hometowns")?
            .iter()
            .map(|item| {
                Ok(Hometown {
                    city: Self::json_str(item, "city")?,
                    state: Self::json_str(item, "state")?,
                    country: Self::json_str(item, "country")?,
                })
            })
            .collect()
    }

    fn metadata_from_json(text: &str) -> Result<EdgeMetadata, StoreError> {
        let value = Self::parse_json(text, "metadata")?;
        let object = value
            .as_object()
            .ok_or_else(|| StoreError::InvalidData("metadata is not a JSON object".to_string()))?;
        let mut metadata = BTreeMap::new();
        for (k, v) in object {
            let v = v
                .as_str()
                .ok_or_else(|| StoreError::InvalidData(format!("metadata '{}' not a string", k)))?;
            metadata.insert(k.clone(), v.to_string());
        }
        Ok(metadata)
    }

    /// Map a persons row (column order as in `PERSON_COLUMNS`) to a Person
    fn row_to_person(row: &rusqlite::Row<'_>) -> Result<Person, rusqlite::Error> {
        let to_sql_err = |e: StoreError| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        };

        let id: String = row.get(0)?;
        let prior_employers: String = row.get(4)?;
        let education: String = row.get(5)?;
        let social_handles: String = row.get(6)?;
        let family_refs: String = row.get(7)?;
        let greek_life: Option<String> = row.get(8)?;
        let hometowns: String = row.get(9)?;
        let deleted: i64 = row.get(10)?;

        Ok(Person {
            id: PersonId::new(id),
            name: row.get(1)?,
            employer: row.get(2)?,
            title: row.get(3)?,
            prior_employers: Self::prior_employers_from_json(&prior_employers)
                .map_err(to_sql_err)?,
            education: Self::education_from_json(&education).map_err(to_sql_err)?,
            social_handles: Self::social_handles_from_json(&social_handles).map_err(to_sql_err)?,
            family_refs: Self::family_refs_from_json(&family_refs).map_err(to_sql_err)?,
            greek_life: greek_life
                .map(|g| Self::greek_life_from_json(&g))
                .transpose()
                .map_err(to_sql_err)?,
            hometowns: Self::hometowns_from_json(&hometowns).map_err(to_sql_err)?,
            deleted: deleted != 0,
        })
    }

    /// Map a relationships row to a Relationship
    fn row_to_relationship(row: &rusqlite::Row<'_>) -> Result<Relationship, rusqlite::Error> {
        let lo: String = row.get(0)?;
        let hi: String = row.get(1)?;
        let kind_str: String = row.get(2)?;
        let metadata: String = row.get(3)?;

        let kind = RelationshipKind::parse(&kind_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(e)),
            )
        })?;
        let metadata = Self::metadata_from_json(&metadata).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Relationship {
            from: PersonId::new(lo),
            to: PersonId::new(hi),
            kind,
            metadata,
            created_at: row.get::<_, i64>(4)? as u64,
            updated_at: row.get::<_, i64>(5)? as u64,
        })
    }
}

const PERSON_COLUMNS: &str = "id, name, employer, title, prior_employers, education, \
     social_handles, family_refs, greek_life, hometowns, deleted";

const RELATIONSHIP_COLUMNS: &str = "lo_id, hi_id, kind, metadata, created_at, updated_at";

impl GraphStore for SqliteStore {
    type Error = StoreError;

    fn upsert_person(&mut self, person: Person) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO persons (id, name, employer, title, prior_employers, education, \
             social_handles, family_refs, greek_life, hometowns, deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(id) DO UPDATE SET
             name = excluded.name, employer = excluded.employer, title = excluded.title,
             prior_employers = excluded.prior_employers, education = excluded.education,
             social_handles = excluded.social_handles, family_refs = excluded.family_refs,
             greek_life = excluded.greek_life, hometowns = excluded.hometowns,
             deleted = excluded.deleted",
            params![
                person.id.as_str(),
                &person.name,
                &person.employer,
                &person.title,
                Self::prior_employers_to_json(&person.prior_employers),
                Self::education_to_json(&person.education),
                Self::social_handles_to_json(&person.social_handles),
                Self::family_refs_to_json(&person.family_refs),
                person.greek_life.as_ref().map(Self::greek_life_to_json),
                Self::hometowns_to_json(&person.hometowns),
                person.deleted as i64,
            ],
        )?;
        Ok(())
    }

    fn get_person(&self, id: &PersonId) -> Result<Option<Person>, Self::Error> {
        let person = self
            .conn
            .query_row(
                &format!("SELECT {} FROM persons WHERE id = ?1", PERSON_COLUMNS),
                params![id.as_str()],
                Self::row_to_person,
            )
            .optional()?;
        Ok(person)
    }

    fn find_persons(&self, query: &PersonQuery) -> Result<Vec<Person>, Self::Error> {
        let mut sql = format!("SELECT {} FROM persons WHERE 1=1", PERSON_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(name) = &query.name_contains {
            sql.push_str(" AND unicode_lower(name) LIKE ?");
            params.push(Box::new(format!("%{}%", name.trim().to_lowercase())));
        }

        if let Some(employer) = &query.employer {
            sql.push_str(" AND unicode_lower(employer) = ?");
            params.push(Box::new(employer.trim().to_lowercase()));
        }

        if !query.include_deleted {
            sql.push_str(" AND deleted = 0");
        }

        sql.push_str(" ORDER BY id");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let persons = stmt
            .query_map(&param_refs[..], Self::row_to_person)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(persons)
    }

    fn tombstone_person(&mut self, id: &PersonId) -> Result<(), Self::Error> {
        let changed = self.conn.execute(
            "UPDATE persons SET deleted = 1 WHERE id = ?1",
            params![id.as_str()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn upsert_relationship(
        &mut self,
        from: &PersonId,
        to: &PersonId,
        kind: RelationshipKind,
        metadata: EdgeMetadata,
    ) -> Result<(), Self::Error> {
        self.require_person(from)?;
        self.require_person(to)?;

        let (lo, hi) = Relationship::canonical_pair(from.clone(), to.clone());
        let now = current_timestamp() as i64;

        // created_at is preserved on conflict; only metadata and
        // updated_at are refreshed.
        self.conn.execute(
            "INSERT INTO relationships (lo_id, hi_id, kind, metadata, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT(lo_id, hi_id, kind) DO UPDATE SET
             metadata = excluded.metadata, updated_at = excluded.updated_at",
            params![
                lo.as_str(),
                hi.as_str(),
                kind.as_str(),
                Self::metadata_to_json(&metadata),
                now,
            ],
        )?;
        Ok(())
    }

    fn remove_relationship(
        &mut self,
        from: &PersonId,
        to: &PersonId,
        kind: RelationshipKind,
    ) -> Result<(), Self::Error> {
        let (lo, hi) = Relationship::canonical_pair(from.clone(), to.clone());
        self.conn.execute(
            "DELETE FROM relationships WHERE lo_id = ?1 AND hi_id = ?2 AND kind = ?3",
            params![lo.as_str(), hi.as_str(), kind.as_str()],
        )?;
        Ok(())
    }

    fn neighbors(
        &self,
        id: &PersonId,
        kind_filter: Option<&[RelationshipKind]>,
    ) -> Result<Vec<Neighbor>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM relationships WHERE lo_id = ?1 OR hi_id = ?1",
            RELATIONSHIP_COLUMNS
        ))?;

        let edges = stmt
            .query_map(params![id.as_str()], Self::row_to_relationship)?
            .collect::<Result<Vec<_>, _>>()?;

        // Group edges by the opposite endpoint, deterministic order.
        let mut by_neighbor: BTreeMap<PersonId, Vec<Relationship>> = BTreeMap::new();
        for edge in edges {
            if let Some(kinds) = kind_filter {
                if !kinds.contains(&edge.kind) {
                    continue;
                }
            }
            let Some(other) = edge.other(id).cloned() else {
                continue;
            };
            by_neighbor.entry(other).or_default().push(edge);
        }

        let mut neighbors = Vec::with_capacity(by_neighbor.len());
        for (other_id, edges) in by_neighbor {
            let Some(person) = self.get_person(&other_id)? else {
                continue;
            };
            if person.deleted {
                continue;
            }
            neighbors.push(Neighbor { person, edges });
        }

        Ok(neighbors)
    }

    fn relationships_between(
        &self,
        a: &PersonId,
        b: &PersonId,
    ) -> Result<Vec<Relationship>, Self::Error> {
        let (lo, hi) = Relationship::canonical_pair(a.clone(), b.clone());

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM relationships WHERE lo_id = ?1 AND hi_id = ?2 ORDER BY kind",
            RELATIONSHIP_COLUMNS
        ))?;

        let edges = stmt
            .query_map(params![lo.as_str(), hi.as_str()], Self::row_to_relationship)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_json_roundtrip() {
        let mut metadata = EdgeMetadata::new();
        metadata.insert("shared_employer".to_string(), "acme".to_string());
        metadata.insert("note".to_string(), "ingested".to_string());

        let text = SqliteStore::metadata_to_json(&metadata);
        let parsed = SqliteStore::metadata_from_json(&text).unwrap();
        assert_eq!(parsed, metadata);
    }

    #[test]
    fn test_education_json_roundtrip() {
        let records = vec![
            Education {
                school: "State University".to_string(),
                degree: Some("BS".to_string()),
                year: Some(2015),
            },
            Education {
                school: "Night School".to_string(),
                degree: None,
                year: None,
            },
        ];

        let text = SqliteStore::education_to_json(&records);
        let parsed = SqliteStore::education_from_json(&text).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_malformed_json_is_invalid_data() {
        let result = SqliteStore::education_from_json("not json");
        assert!(matches!(result, Err(StoreError::InvalidData(_))));

        let result = SqliteStore::metadata_from_json("[1, 2]");
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }
}
