use sea_orm::DatabaseConnection;

/// Bind an open connection to a generated query façade.
///
/// The façade written by `dalgen` into the query directory implements
/// `From<DatabaseConnection>`, so `let q: query::Query = dalgen::bind(db);`
/// is all an application needs. No I/O happens here; the façade shares the
/// connection's own thread-safety.
pub fn bind<Q>(db: DatabaseConnection) -> Q
where
    Q: From<DatabaseConnection>,
{
    Q::from(db)
}
