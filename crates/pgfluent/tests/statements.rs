//! End-to-end rendering through the public API.

use chrono::NaiveDate;
use pgfluent::prelude::*;
use pgfluent::{BuildError, IntoOperand, Placeholder, create_sequence};
use serde_json::json;
use uuid::Uuid;

fn book_search() -> pgfluent::Select {
    select(["b.id", "b.title", "a.name"])
        .from(as_name("book").alias("b"))
        .left_join(as_name("author").alias("a"))
        .on("a.id", "=", "b.author_id")
        .where_("b.price", ">", as_constant(10))
        .and_group(condition("a.name", "=", as_string("Le Guin")).or("a.name", "=", as_string("Herbert")))
        .order_by(OrderBy::new("b.title").asc().nulls_last())
        .limit(20)
}

#[test]
fn literal_and_prepared_share_structure() {
    let q = book_search();
    assert_eq!(
        q.sql(),
        "SELECT b.id, b.title, a.name FROM book AS b LEFT JOIN author AS a ON a.id = b.author_id \
         WHERE b.price > 10 AND (a.name = 'Le Guin' OR a.name = 'Herbert') \
         ORDER BY b.title ASC NULLS LAST LIMIT 20"
    );

    let prepared = q.prepared();
    assert_eq!(
        prepared.sql,
        "SELECT b.id, b.title, a.name FROM book AS b LEFT JOIN author AS a ON a.id = b.author_id \
         WHERE b.price > ? AND (a.name = ? OR a.name = ?) \
         ORDER BY b.title ASC NULLS LAST LIMIT ?"
    );
    let placeholders = prepared.sql.matches('?').count();
    assert_eq!(placeholders, prepared.params.len());
    let values: Vec<String> = prepared.params.values().map(ToString::to_string).collect();
    assert_eq!(values, ["10", "'Le Guin'", "'Herbert'", "20"]);
}

#[test]
fn numbered_placeholders_follow_binding_order() {
    let prepared = book_search().prepared_with(&RenderOptions::numbered());
    assert!(prepared.sql.contains("b.price > $1"));
    assert!(prepared.sql.contains("(a.name = $2 OR a.name = $3)"));
    assert!(prepared.sql.ends_with("LIMIT $4"));

    let options = RenderOptions::new().with_placeholder(Placeholder::Question);
    assert_eq!(book_search().prepared_with(&options), book_search().prepared());
}

#[test]
fn nested_statements_continue_numbering() {
    let recent = select(["author_id"])
        .from("book")
        .where_("published", ">", as_constant(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()));
    let q = update("author")
        .set("active", true)
        .where_("id", "IN", as_sub_query(&recent))
        .and("country", "=", as_constant("NZ"));

    assert_eq!(
        q.sql(),
        "UPDATE author SET active = true WHERE id IN \
         (SELECT author_id FROM book WHERE published > '2020-01-01') AND country = 'NZ'"
    );
    let prepared = q.prepared_with(&RenderOptions::numbered());
    assert_eq!(
        prepared.sql,
        "UPDATE author SET active = $1 WHERE id IN \
         (SELECT author_id FROM book WHERE published > $2) AND country = $3"
    );
    assert_eq!(prepared.params.len(), 3);
}

#[test]
fn typed_values_render_as_quoted_literals() {
    let id = Uuid::nil();
    let q = insert_into("event")
        .columns(["id", "day", "payload", "note"])
        .values([
            id.into_operand(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().into_operand(),
            json!({"kind": "it's"}).into_operand(),
            None::<&str>.into_operand(),
        ]);
    assert_eq!(
        q.sql(),
        "INSERT INTO event (id, day, payload, note) VALUES \
         ('00000000-0000-0000-0000-000000000000', '2024-02-29', '{\"kind\":\"it''s\"}', NULL)"
    );

    let prepared = q.prepared();
    assert_eq!(prepared.params.len(), 4);
    assert_eq!(prepared.params.value(1), Some(&Value::Uuid(id)));
    assert_eq!(prepared.params.value(4), Some(&Value::Null));
}

#[test]
fn upsert_with_returning() {
    let q = insert_into("stock")
        .columns(["sku", "qty"])
        .values([as_constant("A-1"), as_constant(5)])
        .on_conflict_columns(["sku"])
        .do_update_set("qty", as_name("stock.qty + EXCLUDED.qty"))
        .returning(["qty"]);
    let prepared = q.prepared_with(&RenderOptions::numbered());
    assert_eq!(
        prepared.sql,
        "INSERT INTO stock (sku, qty) VALUES ($1, $2) ON CONFLICT (sku) \
         DO UPDATE SET qty = stock.qty + EXCLUDED.qty RETURNING qty"
    );
}

#[test]
fn delete_with_exists_and_between() {
    let orphans = select([1]).from("author").where_("author.id", "=", "book.author_id");
    let q = delete_from("book")
        .where_not_exists(&orphans)
        .or_group(between("price", as_constant(0), as_constant(1)))
        .returning(["id"]);
    assert_eq!(
        q.sql(),
        "DELETE FROM book WHERE NOT EXISTS (SELECT 1 FROM author WHERE author.id = book.author_id) \
         OR price BETWEEN 0 AND 1 RETURNING id"
    );
    assert_eq!(q.prepared().params.len(), 2);
}

#[test]
fn with_feeds_a_select() {
    let q = with("top", ["author_id", "total"])
        .as_query(
            select(["author_id", "count(*)"])
                .from("book")
                .group_by(["author_id"])
                .having("count(*)", ">=", as_constant(3)),
        )
        .select(["a.name", "top.total"])
        .from("top")
        .join(as_name("author").alias("a"))
        .on("a.id", "=", "top.author_id")
        .order_by(("top.total", "DESC"));
    assert_eq!(
        q.prepared().sql,
        "WITH top (author_id, total) AS (SELECT author_id, count(*) FROM book GROUP BY author_id \
         HAVING count(*) >= ?) SELECT a.name, top.total FROM top JOIN author AS a \
         ON a.id = top.author_id ORDER BY top.total DESC"
    );
}

#[test]
fn sequence_ddl_never_binds() {
    let q = create_sequence("invoice_no").start_with(1000).increment_by(1).cache(20);
    let prepared = q.prepared();
    assert_eq!(
        prepared.sql,
        "CREATE SEQUENCE invoice_no INCREMENT BY 1 START WITH 1000 CACHE 20"
    );
    assert!(prepared.params.is_empty());
}

#[test]
fn hand_built_tree_renders_strictly() {
    use pgfluent::ast::{NodeKind, Tree};

    let mut tree = Tree::new();
    tree.start_node(NodeKind::Select).add_leaf(as_name("now()"));
    assert_eq!(tree.render(), Err(BuildError::UnclosedNodes { open: 1 }));
    tree.end_node();
    assert_eq!(tree.render().as_deref(), Ok("SELECT now()"));
    assert!(tree.try_end_node().is_err());

    // A finished tree composes like any other statement.
    assert_eq!(select([1]).union(tree).sql(), "SELECT 1 UNION SELECT now()");
}

#[cfg(feature = "postgres")]
#[test]
fn params_ref_matches_binding_count() {
    let prepared = book_search().prepared_with(&RenderOptions::numbered());
    assert_eq!(prepared.params_ref().len(), 4);
}
