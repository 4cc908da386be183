//! Statement builder tests.

use crate::condition::{Filter, condition};
use crate::stmt::*;
use crate::token::{
    Value, as_constant, as_func, as_name, as_number, as_quoted_name, as_string,
    as_sub_query, cube, rollup, values,
};

// ==================== SELECT ====================

#[test]
fn test_select_mixed_columns() {
    let q = select([as_name("id"), as_number(2), as_number(0.4), as_name("name")]);
    assert_eq!(q.sql(), "SELECT id, 2, 0.4, name");
}

#[test]
fn test_f32_constant_renders_as_written() {
    let q = select(["id"]).from("book").where_("price", "=", as_number(0.1f32));
    assert_eq!(q.sql(), "SELECT id FROM book WHERE price = 0.1");
}

#[test]
fn test_select_function_alias() {
    let q = select([as_func("min", as_name("price")).alias("min")]);
    assert_eq!(q.sql(), "SELECT min(price) AS min");
}

#[test]
fn test_select_quantifiers() {
    assert_eq!(Select::new().all().sql(), "SELECT ALL");
    assert_eq!(select_distinct(["id"]).sql(), "SELECT DISTINCT id");
    assert_eq!(
        select_distinct_on(["price", "id"], ["id", "name"]).sql(),
        "SELECT DISTINCT ON (price, id) id, name"
    );
}

#[test]
fn test_select_from_variants() {
    assert_eq!(
        select(["*"]).from("book").from("author").sql(),
        "SELECT * FROM book, author"
    );
    assert_eq!(
        select(["*"]).from_items(["table1", "table2"]).sql(),
        "SELECT * FROM table1, table2"
    );
    assert_eq!(
        select(["*"]).from_only("book").from_only("authors").sql(),
        "SELECT * FROM ONLY book, ONLY authors"
    );
    assert_eq!(
        select(["*"]).from(as_quoted_name("book")).sql(),
        "SELECT * FROM \"book\""
    );
    assert_eq!(
        select(["*"])
            .from(FromItem::only("book").tablesample("BERNOULLI", 30).repeatable(15))
            .sql(),
        "SELECT * FROM ONLY book TABLESAMPLE BERNOULLI(30) REPEATABLE(15)"
    );
}

#[test]
fn test_select_from_values_and_sub_query() {
    let q = select(["x"]).from(values([[1, 2], [3, 4]]).alias_with_columns("point", ["x", "y"]));
    assert_eq!(q.sql(), "SELECT x FROM (VALUES(1, 2), (3, 4)) AS point(x, y)");

    let q = select(["sum"]).from(as_sub_query(&select(["max(sum)"])).alias("s"));
    assert_eq!(q.sql(), "SELECT sum FROM (SELECT max(sum)) AS s");
}

#[test]
fn test_joins() {
    let base = || select(["*"]).from("book");
    assert_eq!(
        base().join("author").on_bool(true).sql(),
        "SELECT * FROM book JOIN author ON (true)"
    );
    assert_eq!(
        base().inner_join("author").using(["id", "name"]).sql(),
        "SELECT * FROM book INNER JOIN author USING (id, name)"
    );
    assert_eq!(
        base()
            .left_join("author")
            .on("id", "=", "author_id")
            .and_exists(&select([1, 2]))
            .sql(),
        "SELECT * FROM book LEFT JOIN author ON id = author_id AND EXISTS (SELECT 1, 2)"
    );
    assert_eq!(
        base()
            .right_join("author")
            .on("id", "IN", as_sub_query(&select([1, 2])))
            .and_not("id", "IN", as_sub_query(&select([1, 2])))
            .sql(),
        "SELECT * FROM book RIGHT JOIN author ON id IN (SELECT 1, 2) AND NOT id IN (SELECT 1, 2)"
    );
    assert_eq!(
        base().full_join("author").on_exists(&select([1])).sql(),
        "SELECT * FROM book FULL JOIN author ON EXISTS (SELECT 1)"
    );
    assert_eq!(
        base().cross_join("author").natural_join("publisher").sql(),
        "SELECT * FROM book CROSS JOIN author NATURAL JOIN publisher"
    );
}

#[test]
fn test_where_after_join_switches_target() {
    let q = select(["*"])
        .from("book")
        .join("author")
        .on("book.author_id", "=", "author.id")
        .or("author.id", "IS", "NULL")
        .where_("book.id", ">", 1)
        .and("book.id", "<", 10);
    assert_eq!(
        q.sql(),
        "SELECT * FROM book JOIN author ON book.author_id = author.id OR author.id IS NULL \
         WHERE book.id > 1 AND book.id < 10"
    );
}

#[test]
fn test_where_groups() {
    let q = select(["*"])
        .from("t")
        .where_group(condition("name", "=", "timur").and("phone", "is", "null"))
        .or("id", "=", 1)
        .and_group(condition("id", "!=", 3).and("name", "is not", "max"));
    assert_eq!(
        q.sql(),
        "SELECT * FROM t WHERE (name = timur AND phone is null) OR id = 1 \
         AND (id != 3 AND name is not max)"
    );
}

#[test]
fn test_where_conditions_are_not_parenthesized() {
    let q = select(["*"])
        .from("t")
        .where_conditions(condition("a", "=", 1).or("b", "=", 2));
    assert_eq!(q.sql(), "SELECT * FROM t WHERE a = 1 OR b = 2");
}

#[test]
fn test_where_exists() {
    let q = select(["*"])
        .from("author")
        .where_not_exists(&select(["1"]).from("book").where_("book.author_id", "=", "author.id"));
    assert_eq!(
        q.sql(),
        "SELECT * FROM author WHERE NOT EXISTS (SELECT 1 FROM book WHERE book.author_id = author.id)"
    );
}

#[test]
fn test_group_by_and_having() {
    let q = select(["id", "name"])
        .from("book")
        .group_by([rollup(["id", "name"]), cube(["id", "name"])]);
    assert_eq!(
        q.sql(),
        "SELECT id, name FROM book GROUP BY ROLLUP(id, name), CUBE(id, name)"
    );

    let q = select(["author_id", "count(*)"])
        .from("book")
        .group_by(["author_id"])
        .having("count(*)", ">", 1)
        .or_not("sum(price)", "<", 100);
    assert_eq!(
        q.sql(),
        "SELECT author_id, count(*) FROM book GROUP BY author_id \
         HAVING count(*) > 1 OR NOT sum(price) < 100"
    );
}

#[test]
fn test_clause_order_is_fixed() {
    let q = select(["id"])
        .limit(3)
        .offset(3)
        .order_by(("name", "desc", "nulls last"))
        .having("count(*)", ">", 1)
        .group_by(["id"])
        .where_("id", ">", 0)
        .from("book");
    assert_eq!(
        q.sql(),
        "SELECT id FROM book WHERE id > 0 GROUP BY id HAVING count(*) > 1 \
         ORDER BY name desc nulls last LIMIT 3 OFFSET 3"
    );
}

#[test]
fn test_set_operations() {
    assert_eq!(
        select([1, 2]).union(select([2, 2])).sql(),
        "SELECT 1, 2 UNION SELECT 2, 2"
    );
    let cases = [
        (select([1]).union_all(select([2])), "UNION ALL"),
        (select([1]).union_distinct(select([2])), "UNION DISTINCT"),
        (select([1]).intersect(select([2])), "INTERSECT"),
        (select([1]).intersect_all(select([2])), "INTERSECT ALL"),
        (select([1]).intersect_distinct(select([2])), "INTERSECT DISTINCT"),
        (select([1]).except(select([2])), "EXCEPT"),
        (select([1]).except_all(select([2])), "EXCEPT ALL"),
        (select([1]).except_distinct(select([2])), "EXCEPT DISTINCT"),
    ];
    for (q, op) in cases {
        assert_eq!(q.sql(), format!("SELECT 1 {op} SELECT 2"));
    }
}

#[test]
fn test_set_operation_precedes_order_by() {
    let q = select(["id"])
        .from("book")
        .order_by(("id", "DESC"))
        .group_by([as_quoted_name("book.id")])
        .union(select([2, 2]));
    assert_eq!(
        q.sql(),
        "SELECT id FROM book GROUP BY \"book\".\"id\" UNION SELECT 2, 2 ORDER BY id DESC"
    );
}

#[test]
fn test_limit_and_offset_are_prepared() {
    let q = select(["*"])
        .from("book")
        .where_("id", "=", as_constant(5))
        .limit(10)
        .offset(20);
    assert_eq!(q.sql(), "SELECT * FROM book WHERE id = 5 LIMIT 10 OFFSET 20");
    let prepared = q.prepared();
    assert_eq!(prepared.sql, "SELECT * FROM book WHERE id = ? LIMIT ? OFFSET ?");
    let values: Vec<&Value> = prepared.params.values().collect();
    assert_eq!(values, [&Value::Int(5), &Value::Int(10), &Value::Int(20)]);

    assert_eq!(select(["*"]).from("t").limit_all().sql(), "SELECT * FROM t LIMIT ALL");
}

#[test]
fn test_locking() {
    let q = select(["*"]).from("book").for_update().lock_of(["book"]).skip_locked();
    assert_eq!(q.sql(), "SELECT * FROM book FOR UPDATE OF book SKIP LOCKED");
    let q = select(["*"]).from("book").for_share().nowait();
    assert_eq!(q.sql(), "SELECT * FROM book FOR SHARE NOWAIT");
    let q = select(["*"]).from("book").lock(Lock::KeyShare);
    assert_eq!(q.sql(), "SELECT * FROM book FOR KEY SHARE");
}

#[test]
fn test_display_matches_sql() {
    let q = select(["id"]).from("book");
    assert_eq!(q.to_string(), q.sql());
}

// ==================== INSERT ====================

#[test]
fn test_insert_default_values() {
    let q = insert_into("book").default_values().returning(["id", "name"]);
    assert_eq!(q.sql(), "INSERT INTO book DEFAULT VALUES RETURNING id, name");
    assert_eq!(
        insert_into("book").alias("b").default_values().sql(),
        "INSERT INTO book AS b DEFAULT VALUES"
    );
}

#[test]
fn test_insert_values_bind() {
    let q = insert_into("book").columns(["name"]).values(["Dune"]).returning(["*"]);
    assert_eq!(q.sql(), "INSERT INTO book (name) VALUES ('Dune') RETURNING *");
    let prepared = q.prepared();
    assert_eq!(prepared.sql, "INSERT INTO book (name) VALUES (?) RETURNING *");
    assert_eq!(prepared.params.value(1), Some(&Value::Text("Dune".into())));
}

#[test]
fn test_insert_multiple_rows() {
    let q = insert_into("book")
        .columns(["id", "name"])
        .values([as_constant(1), as_constant("a")])
        .values([as_constant(2), as_constant("b")]);
    assert_eq!(q.sql(), "INSERT INTO book (id, name) VALUES (1, 'a'), (2, 'b')");
    let prepared = q.prepared();
    assert_eq!(prepared.sql, "INSERT INTO book (id, name) VALUES (?, ?), (?, ?)");
    assert_eq!(prepared.params.len(), 4);
    assert_eq!(prepared.params.value(3), Some(&Value::Int(2)));
}

#[test]
fn test_insert_from_query() {
    let q = insert_into("archive")
        .columns(["id"])
        .query(select(["id"]).from("book"));
    assert_eq!(q.sql(), "INSERT INTO archive (id) SELECT id FROM book");
}

#[test]
fn test_insert_overriding() {
    let q = insert_into("t").columns(["id"]).overriding_system_value().values([1]);
    assert_eq!(q.sql(), "INSERT INTO t (id) OVERRIDING SYSTEM VALUE VALUES (1)");
    let q = insert_into("t").columns(["id"]).overriding_user_value().values([1]);
    assert_eq!(q.sql(), "INSERT INTO t (id) OVERRIDING USER VALUE VALUES (1)");
}

#[test]
fn test_insert_on_conflict() {
    let q = insert_into("book")
        .columns(["id", "name"])
        .values([as_constant(1), as_constant("x")])
        .on_conflict_columns(["id"])
        .do_update_set_excluded("name")
        .do_update_set("updated", as_name("now()"))
        .do_update_where("book.locked", "=", false);
    assert_eq!(
        q.sql(),
        "INSERT INTO book (id, name) VALUES (1, 'x') ON CONFLICT (id) \
         DO UPDATE SET name = EXCLUDED.name, updated = now() WHERE book.locked = false"
    );

    let q = insert_into("book").default_values().on_conflict().do_nothing();
    assert_eq!(q.sql(), "INSERT INTO book DEFAULT VALUES ON CONFLICT DO NOTHING");

    let q = insert_into("book")
        .default_values()
        .on_conflict_constraint("book_pkey")
        .do_nothing();
    assert_eq!(
        q.sql(),
        "INSERT INTO book DEFAULT VALUES ON CONFLICT ON CONSTRAINT book_pkey DO NOTHING"
    );
}

#[test]
fn test_insert_on_conflict_index_predicate() {
    let q = insert_into("book")
        .columns(["isbn"])
        .values(["x"])
        .on_conflict_columns(["isbn"])
        .do_update_where("deleted_at", "IS", "NULL")
        .do_nothing();
    assert_eq!(
        q.sql(),
        "INSERT INTO book (isbn) VALUES ('x') ON CONFLICT (isbn) WHERE deleted_at IS NULL DO NOTHING"
    );

    let q = insert_into("book")
        .default_values()
        .on_conflict_constraint("book_pkey")
        .do_update_where("a", "=", 1)
        .do_nothing();
    assert_eq!(
        q.sql(),
        "INSERT INTO book DEFAULT VALUES ON CONFLICT ON CONSTRAINT book_pkey DO NOTHING"
    );
}

#[test]
fn test_insert_on_conflict_update_binds_after_values() {
    let q = insert_into("counter")
        .columns(["id", "hits"])
        .values([1, 1])
        .on_conflict_columns(["id"])
        .do_update_set("hits", 5);
    let prepared = q.prepared();
    assert_eq!(
        prepared.sql,
        "INSERT INTO counter (id, hits) VALUES (?, ?) ON CONFLICT (id) DO UPDATE SET hits = ?"
    );
    assert_eq!(prepared.params.value(3), Some(&Value::Int(5)));
}

// ==================== UPDATE ====================

#[test]
fn test_update_only_binds_set() {
    let q = update_only("author").set("name", "test").returning(["id", "name"]);
    assert_eq!(q.sql(), "UPDATE ONLY author SET name = 'test' RETURNING id, name");
    let prepared = q.prepared();
    assert_eq!(prepared.sql, "UPDATE ONLY author SET name = ? RETURNING id, name");
    assert_eq!(prepared.params.len(), 1);
}

#[test]
fn test_update_from_where() {
    let q = update("book")
        .alias("b")
        .set("price", 10)
        .set("title", as_name("upper(title)"))
        .from("author")
        .where_("b.author_id", "=", "author.id")
        .and("author.name", "=", as_string("x"));
    assert_eq!(
        q.sql(),
        "UPDATE book AS b SET price = 10, title = upper(title) FROM author \
         WHERE b.author_id = author.id AND author.name = 'x'"
    );
    let prepared = q.prepared();
    assert_eq!(
        prepared.sql,
        "UPDATE book AS b SET price = ?, title = upper(title) FROM author \
         WHERE b.author_id = author.id AND author.name = ?"
    );
    assert_eq!(prepared.params.value(1), Some(&Value::Int(10)));
    assert_eq!(prepared.params.value(2), Some(&Value::Text("x".into())));
}

#[test]
fn test_update_row_assignments() {
    let q = update("t").set_row(["a", "b"], [1, 2]);
    assert_eq!(q.sql(), "UPDATE t SET (a, b) = (1, 2)");
    assert_eq!(q.prepared().sql, "UPDATE t SET (a, b) = (?, ?)");

    let q = update("t").set_sub_query(["a", "b"], &select(["x", "y"]).from("s"));
    assert_eq!(q.sql(), "UPDATE t SET (a, b) = (SELECT x, y FROM s)");
}

#[test]
fn test_update_where_current_of() {
    let q = update("t").set("a", 1).where_("ignored", "=", 1).where_current_of("cur");
    assert_eq!(q.sql(), "UPDATE t SET a = 1 WHERE CURRENT OF cur");
}

// ==================== DELETE ====================

#[test]
fn test_delete_basic() {
    assert_eq!(delete_from("book").sql(), "DELETE FROM book");
    assert_eq!(delete_from(as_quoted_name("book")).sql(), "DELETE FROM \"book\"");
    assert_eq!(delete_from_only("book").sql(), "DELETE FROM ONLY book");
}

#[test]
fn test_delete_using_where_returning() {
    let q = delete_from("book")
        .alias("b")
        .using(["author", "order"])
        .where_("b.id", "=", 1)
        .returning(["*"]);
    assert_eq!(
        q.sql(),
        "DELETE FROM book AS b USING author, order WHERE b.id = 1 RETURNING *"
    );
    let q = delete_from("book").returning([as_func("max", as_name("price")).alias("price")]);
    assert_eq!(q.sql(), "DELETE FROM book RETURNING max(price) AS price");
}

#[test]
fn test_delete_where_current_of() {
    assert_eq!(
        delete_from("book").where_current_of("c").sql(),
        "DELETE FROM book WHERE CURRENT OF c"
    );
}

// ==================== CREATE SEQUENCE ====================

#[test]
fn test_sequence_plain() {
    assert_eq!(create_sequence("serial").sql(), "CREATE SEQUENCE serial");
    assert_eq!(create_temp_sequence("serial").sql(), "CREATE TEMP SEQUENCE serial");
    assert_eq!(
        create_sequence_if_not_exists("serial").sql(),
        "CREATE SEQUENCE IF NOT EXISTS serial"
    );
}

#[test]
fn test_sequence_options_in_order() {
    let q = create_temp_sequence_if_not_exists("serial")
        .owned_by("book.id")
        .no_cycle()
        .cache(5)
        .start_with(10)
        .no_max_value()
        .min_value(1)
        .increment_by(2)
        .as_type("bigint");
    let expected = "CREATE TEMP SEQUENCE IF NOT EXISTS serial AS bigint INCREMENT BY 2 \
                    MINVALUE 1 NO MAXVALUE START WITH 10 CACHE 5 NO CYCLE OWNED BY book.id";
    assert_eq!(q.sql(), expected);
    let prepared = q.prepared();
    assert_eq!(prepared.sql, expected);
    assert!(prepared.params.is_empty());

    let q = create_sequence("s")
        .increment(1)
        .no_min_value()
        .max_value(100)
        .start(1)
        .cycle()
        .owned_by_none();
    assert_eq!(
        q.sql(),
        "CREATE SEQUENCE s INCREMENT 1 NO MINVALUE MAXVALUE 100 START 1 CYCLE OWNED BY NONE"
    );
}

// ==================== WITH ====================

fn with_update_and_insert() -> Delete {
    with("latest", ["id", "name"])
        .as_query(update_only("author").set("name", "test").returning(["id", "name"]))
        .with("newest", ["id", "name"])
        .as_query(insert_into("book").default_values().returning(["id", "name"]))
        .delete_from("book")
        .returning(["*"])
}

#[test]
fn test_with_literal() {
    assert_eq!(
        with_update_and_insert().sql(),
        "WITH latest (id, name) AS (UPDATE ONLY author SET name = 'test' RETURNING id, name), \
         newest (id, name) AS (INSERT INTO book DEFAULT VALUES RETURNING id, name) \
         DELETE FROM book RETURNING *"
    );
}

#[test]
fn test_with_prepared() {
    let prepared = with_update_and_insert().prepared();
    assert_eq!(
        prepared.sql,
        "WITH latest (id, name) AS (UPDATE ONLY author SET name = ? RETURNING id, name), \
         newest (id, name) AS (INSERT INTO book DEFAULT VALUES RETURNING id, name) \
         DELETE FROM book RETURNING *"
    );
    assert_eq!(prepared.params.len(), 1);
    assert_eq!(
        prepared.params.value(1).and_then(Value::as_str),
        Some("test")
    );
}

#[test]
fn test_with_recursive_select() {
    let q = with_recursive("t", ["n"])
        .as_query(
            select([1]).union_all(select(["n + 1"]).from("t").where_("n", "<", 100)),
        )
        .select(["sum(n)"])
        .from("t");
    assert_eq!(
        q.sql(),
        "WITH RECURSIVE t (n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM t WHERE n < 100) \
         SELECT sum(n) FROM t"
    );
}

#[test]
fn test_with_insert_and_update() {
    let w = || with("src", ["id"]).as_query(select(["id"]).from("staging"));
    assert_eq!(
        w().insert_into("book").columns(["id"]).query(select(["id"]).from("src")).sql(),
        "WITH src (id) AS (SELECT id FROM staging) INSERT INTO book (id) SELECT id FROM src"
    );
    assert_eq!(
        w().update("book").set("seen", true).where_("id", "IN", as_sub_query(&select(["id"]).from("src"))).sql(),
        "WITH src (id) AS (SELECT id FROM staging) UPDATE book SET seen = true \
         WHERE id IN (SELECT id FROM src)"
    );
}

// ==================== Rendering contract ====================

#[test]
fn test_statement_rendering_is_idempotent() {
    let q = select(["*"])
        .from("book")
        .where_("id", "=", as_constant(1))
        .and("name", "=", as_string("x"));
    assert_eq!(q.sql(), q.sql());
    assert_eq!(q.prepared(), q.prepared());
}

#[test]
fn test_tree_is_a_statement() {
    let tree = select([1]).tree();
    assert_eq!(select([0]).union(tree.clone()).sql(), "SELECT 0 UNION SELECT 1");
    assert_eq!(as_sub_query(&tree).name(), "(SELECT 1)");
}
