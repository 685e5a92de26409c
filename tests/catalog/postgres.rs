use crate::helpers::harness::with_test_db;
use db_descriptor::catalog::EntityType;
use db_descriptor::extract::{ExtractOptions, Extractor};

#[tokio::test]
async fn test_describe_tables_and_columns() {
    with_test_db(async |db| {
        db.execute(
            "CREATE TABLE orders (
                id SERIAL PRIMARY KEY,
                total NUMERIC(10, 2) NOT NULL
            )",
        )
        .await;

        let session = db.session(&["public"]).await;
        let description = Extractor::new(session, ExtractOptions::default())
            .extract()
            .await
            .unwrap();

        assert_eq!(description.schemas().len(), 1);
        let orders = description.find_entity("public", "orders").unwrap();
        assert_eq!(orders.entity_type(), &EntityType::Table);
        assert_eq!(orders.comment(), "");

        let columns = orders.columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name(), "id");
        assert_eq!(columns[0].data_type(), "integer");
        assert!(columns[0].is_primary_key());
        assert_eq!(columns[1].name(), "total");
        assert_eq!(columns[1].data_type(), "numeric(10,2)");
        assert!(!columns[1].is_primary_key());
    })
    .await;
}

#[tokio::test]
async fn test_views_and_comments() {
    with_test_db(async |db| {
        db.execute("CREATE TABLE users (id SERIAL PRIMARY KEY, email TEXT)")
            .await;
        db.execute("CREATE VIEW active_users AS SELECT id, email FROM users WHERE email IS NOT NULL")
            .await;
        db.execute("COMMENT ON TABLE users IS 'Registered Users'").await;
        db.execute("COMMENT ON COLUMN users.email IS 'Login address'")
            .await;
        db.execute("COMMENT ON VIEW active_users IS 'Users with an email'")
            .await;

        let session = db.session(&["public"]).await;
        let description = Extractor::new(session, ExtractOptions::default())
            .extract()
            .await
            .unwrap();

        let users = description.find_entity("public", "users").unwrap();
        assert_eq!(users.comment(), "Registered Users");
        assert_eq!(users.find_column("email").unwrap().comment(), "Login address");
        assert_eq!(users.find_column("id").unwrap().comment(), "");

        let view = description.find_entity("public", "active_users").unwrap();
        assert_eq!(view.entity_type(), &EntityType::View);
        assert_eq!(view.comment(), "Users with an email");
        assert_eq!(view.columns().len(), 2);
        assert!(view.columns().iter().all(|c| !c.is_primary_key()));
    })
    .await;
}

#[tokio::test]
async fn test_quoted_identifiers_are_lowercased() {
    with_test_db(async |db| {
        db.execute("CREATE SCHEMA \"Sales\"").await;
        db.execute("CREATE TABLE \"Sales\".\"Customers\" (\"CustomerId\" INTEGER PRIMARY KEY)")
            .await;

        let session = db.session(&["Sales"]).await;
        let description = Extractor::new(session, ExtractOptions::default())
            .extract()
            .await
            .unwrap();

        let customers = description.find_entity("sales", "customers").unwrap();
        assert_eq!(customers.columns().len(), 1);
        assert_eq!(customers.columns()[0].name(), "customerid");
        assert!(customers.columns()[0].is_primary_key());
    })
    .await;
}

#[tokio::test]
async fn test_only_requested_schemas_are_described() {
    with_test_db(async |db| {
        db.execute("CREATE SCHEMA billing").await;
        db.execute("CREATE SCHEMA internal").await;
        db.execute("CREATE TABLE billing.invoices (id INTEGER)").await;
        db.execute("CREATE TABLE internal.secrets (id INTEGER)").await;
        db.execute("CREATE TABLE public.users (id INTEGER)").await;

        let session = db.session(&["billing", "public"]).await;
        let description = Extractor::new(session, ExtractOptions::default())
            .extract()
            .await
            .unwrap();

        let mut names: Vec<_> = description.schemas().iter().map(|s| s.name()).collect();
        names.sort();
        assert_eq!(names, vec!["billing", "public"]);
        assert!(description.find_schema("internal").is_none());
    })
    .await;
}

#[tokio::test]
async fn test_unknown_schema_yields_empty_description() {
    with_test_db(async |db| {
        db.execute("CREATE TABLE users (id INTEGER)").await;

        let session = db.session(&["does_not_exist"]).await;
        let description = Extractor::new(session, ExtractOptions::default())
            .extract()
            .await
            .unwrap();

        assert!(description.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_foreign_keys_and_relations() {
    with_test_db(async |db| {
        db.execute("CREATE TABLE customers (id SERIAL PRIMARY KEY)")
            .await;
        db.execute(
            "CREATE TABLE orders (
                id SERIAL PRIMARY KEY,
                customer_id INTEGER NOT NULL,
                CONSTRAINT orders_customer_fk FOREIGN KEY (customer_id) REFERENCES customers (id)
            )",
        )
        .await;

        let session = db.session(&["public"]).await;
        let options = ExtractOptions {
            relations: true,
            strict: true,
        };
        let description = Extractor::new(session, options).extract().await.unwrap();

        let orders = description.find_entity("public", "orders").unwrap();
        assert!(orders.find_column("customer_id").unwrap().is_foreign_key());
        assert!(!orders.find_column("id").unwrap().is_foreign_key());

        let relations: Vec<_> = description.relations().collect();
        assert_eq!(relations.len(), 1);
        let relation = relations[0];
        assert_eq!(relation.relation_name(), "orders_customer_fk");
        assert_eq!(relation.entity_key(), ("public", "orders"));
        assert_eq!(relation.column_name(), "customer_id");
        assert_eq!(relation.foreign_entity_key(), ("public", "customers"));
        assert_eq!(relation.foreign_column_name(), "id");
    })
    .await;
}

#[tokio::test]
async fn test_dropped_columns_are_not_described() {
    with_test_db(async |db| {
        db.execute("CREATE TABLE users (id INTEGER, legacy TEXT, email TEXT)")
            .await;
        db.execute("ALTER TABLE users DROP COLUMN legacy").await;

        let session = db.session(&["public"]).await;
        let description = Extractor::new(session, ExtractOptions::default())
            .extract()
            .await
            .unwrap();

        let users = description.find_entity("public", "users").unwrap();
        let names: Vec<_> = users.columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["id", "email"]);
    })
    .await;
}

#[tokio::test]
async fn test_composite_foreign_key_keeps_declared_column_order() {
    with_test_db(async |db| {
        db.execute(
            "CREATE TABLE stores (
                region_id INTEGER,
                id INTEGER,
                PRIMARY KEY (region_id, id)
            )",
        )
        .await;
        db.execute(
            "CREATE TABLE sales (
                store_id INTEGER,
                region_id INTEGER,
                CONSTRAINT sales_store_fk FOREIGN KEY (region_id, store_id)
                    REFERENCES stores (region_id, id)
            )",
        )
        .await;

        let session = db.session(&["public"]).await;
        let options = ExtractOptions {
            relations: true,
            strict: false,
        };
        let description = Extractor::new(session, options).extract().await.unwrap();

        let pairs: Vec<_> = description
            .relations()
            .map(|r| (r.column_name(), r.foreign_column_name()))
            .collect();
        assert_eq!(pairs, vec![("region_id", "region_id"), ("store_id", "id")]);
    })
    .await;
}
