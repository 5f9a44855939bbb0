use super::*;
use crate::dialect::PostgresDialect;
use crate::error::{FilterError, FilterKind};
use crate::filter::{
    BooleanFilter, DateFilter, EnumFilter, EnumFilterMode, FilterEnum, FlagEnum, FlagsFilter,
    FullTextSearchFilter, IdFilter, NumericFilter, PaginationFilter, SearchFilter, StringFilter,
    TsQueryMode,
};
use crate::value::ValueType;
use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Active = 1,
    Banned = 2,
}

impl FilterEnum for Status {
    fn name(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Banned => "Banned",
        }
    }

    fn discriminant(&self) -> i32 {
        *self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Perm(i64);

impl FlagEnum for Perm {
    fn bits(&self) -> i64 {
        self.0
    }
}

/// Postgres without full-text search.
#[derive(Debug)]
struct PlainDialect;

impl SqlDialect for PlainDialect {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn cast_type(&self, ty: ValueType) -> Option<&'static str> {
        PostgresDialect.cast_type(ty)
    }

    fn membership(&self, column: &str, op: MembershipOp, param: &str, values: Value) -> Condition {
        PostgresDialect.membership(column, op, param, values)
    }

    fn string_membership(
        &self,
        column: &str,
        op: MembershipOp,
        param: &str,
        values: Vec<String>,
        case_sensitive: bool,
    ) -> Condition {
        PostgresDialect.string_membership(column, op, param, values, case_sensitive)
    }
}

fn users() -> FilterQuery {
    let mut q = FilterQuery::new("users", DialectKind::Postgres).unwrap();
    q.select_columns(["id"]).unwrap();
    q
}

fn where_clause(q: &FilterQuery) -> String {
    let sql = q.render().unwrap().sql;
    match sql.split_once(" WHERE ") {
        Some((_, rest)) => rest.to_string(),
        None => String::new(),
    }
}

// ==================== select ====================

#[test]
fn boolean_eq_renders_named_parameter() {
    let mut q = users();
    q.bind_boolean("is_active", Some(&BooleanFilter::new().eq(true)))
        .unwrap();
    let rendered = q.render().unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT users.id FROM users WHERE users.is_active = @users_is_active_eq_0"
    );
    assert_eq!(rendered.params.len(), 1);
    assert_eq!(
        rendered.params.get("users_is_active_eq_0"),
        Some(&Value::Bool(true))
    );
}

#[test]
fn json_path_column_is_cast() {
    let mut q = users();
    q.bind_boolean("profile->'is_active'", Some(&BooleanFilter::new().eq(true)))
        .unwrap();
    assert_eq!(
        q.render().unwrap().sql,
        "SELECT users.id FROM users WHERE (users.profile->'is_active')::boolean = @users_profile_is_active_eq_0"
    );
}

#[test]
fn render_requires_select() {
    let q = FilterQuery::new("users", DialectKind::Postgres).unwrap();
    assert!(matches!(q.render().unwrap_err(), FilterError::MissingSelect));
}

#[test]
fn select_is_set_once() {
    let mut q = FilterQuery::new("users", DialectKind::Postgres).unwrap();
    q.select_all().unwrap();
    assert!(matches!(
        q.select_count().unwrap_err(),
        FilterError::SelectAlreadySet
    ));
    assert!(matches!(
        q.select_columns(["id"]).unwrap_err(),
        FilterError::SelectAlreadySet
    ));
    assert!(matches!(
        q.select_all().unwrap_err(),
        FilterError::SelectAlreadySet
    ));
    assert_eq!(q.render().unwrap().sql, "SELECT users.* FROM users");
}

#[test]
fn select_columns_with_alias() {
    let mut q = FilterQuery::new("users", DialectKind::Postgres).unwrap();
    q.select_columns([
        SelectColumn::new("id"),
        SelectColumn::aliased("profile->>'name'", "display_name"),
    ])
    .unwrap();
    assert_eq!(
        q.render().unwrap().sql,
        "SELECT users.id, users.profile->>'name' AS display_name FROM users"
    );
}

#[test]
fn invalid_select_leaves_select_unset() {
    let mut q = FilterQuery::new("users", DialectKind::Postgres).unwrap();
    let err = q
        .select_columns([SelectColumn::aliased("id", "bad alias")])
        .unwrap_err();
    assert!(err.is_invalid_identifier());
    assert!(q.select_columns(Vec::<&str>::new()).is_err());
    q.select_count().unwrap();
    assert_eq!(q.render().unwrap().sql, "SELECT COUNT(*) FROM users");
}

#[test]
fn table_name_is_validated() {
    let err = FilterQuery::new("users; DROP TABLE users", DialectKind::Postgres).unwrap_err();
    assert!(err.is_invalid_identifier());
}

// ==================== bind ====================

#[test]
fn same_column_same_operator_gets_distinct_names() {
    let mut q = users();
    for n in 0..3 {
        q.bind_numeric("age", Some(&NumericFilter::new().eq(n))).unwrap();
    }
    let names: Vec<&str> = q.params().names().collect();
    assert_eq!(names, vec!["users_age_eq_0", "users_age_eq_1", "users_age_eq_2"]);
    assert_eq!(
        where_clause(&q),
        "users.age = @users_age_eq_0 AND users.age = @users_age_eq_1 AND users.age = @users_age_eq_2"
    );
}

#[test]
fn numeric_ranges_and_sets() {
    let mut q = users();
    q.bind_numeric(
        "age",
        Some(&NumericFilter::new().gte(18).lt(65).not_in([30, 40])),
    )
    .unwrap();
    assert_eq!(
        where_clause(&q),
        "users.age >= @users_age_gte_0 AND users.age < @users_age_lt_1 \
         AND users.age <> ALL(@users_age_notin_2)"
    );
    assert_eq!(
        q.params().get("users_age_notin_2"),
        Some(&Value::IntArray(vec![30, 40]))
    );
}

#[test]
fn numeric_decimal_and_float() {
    let mut q = users();
    q.bind_numeric("score", Some(&NumericFilter::new().gt(1.5f64)))
        .unwrap()
        .bind_numeric(
            "balance",
            Some(&NumericFilter::new().in_list([rust_decimal::Decimal::new(105, 1)])),
        )
        .unwrap();
    assert_eq!(
        q.params().get("users_score_gt_0"),
        Some(&Value::Double(1.5))
    );
    assert_eq!(
        q.params().get("users_balance_in_0"),
        Some(&Value::DecimalArray(vec![rust_decimal::Decimal::new(105, 1)]))
    );
}

#[test]
fn unsupported_numeric_representation_is_rejected() {
    let mut q = users();
    let err = q
        .bind_numeric("age", Some(&NumericFilter::<u32>::new().eq(1)))
        .unwrap_err();
    assert!(
        matches!(err, FilterError::UnsupportedType { ref type_name, ref column } if type_name == "u32" && column == "age")
    );

    let err = q
        .bind_numeric("age", Some(&NumericFilter::<u64>::new().in_list([1, 2])))
        .unwrap_err();
    assert!(matches!(err, FilterError::UnsupportedType { .. }));

    let err = q
        .bind_numeric("age", Some(&NumericFilter::<u8>::new().eq(1).neq(2)))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(q.condition_count(), 0);
}

#[test]
fn date_filters() {
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut q = users();
    q.bind_date("created_on", Some(&DateFilter::new().gte(day)))
        .unwrap()
        .bind_date("meta->>'joined'", Some(&DateFilter::new().lt(day)))
        .unwrap();
    assert_eq!(
        where_clause(&q),
        "users.created_on >= @users_created_on_gte_0 \
         AND (users.meta->>'joined')::date < @users_meta_joined_lt_0"
    );
    assert_eq!(
        q.params().get("users_created_on_gte_0"),
        Some(&Value::Date(day))
    );
}

#[test]
fn enum_modes() {
    let mut q = users();
    q.bind_enum(
        "status",
        Some(&EnumFilter::new(EnumFilterMode::ByName).eq(Status::Active)),
    )
    .unwrap()
    .bind_enum(
        "status_code",
        Some(&EnumFilter::new(EnumFilterMode::ByValue).in_list([Status::Active, Status::Banned])),
    )
    .unwrap()
    .bind_enum(
        "meta->>'status'",
        Some(&EnumFilter::new(EnumFilterMode::ByValueAsString).neq(Status::Banned)),
    )
    .unwrap();

    assert_eq!(
        where_clause(&q),
        "users.status = @users_status_eq_0 \
         AND users.status_code = ANY(@users_status_code_in_0) \
         AND (users.meta->>'status')::text <> @users_meta_status_neq_0"
    );
    let params = q.params();
    assert_eq!(
        params.get("users_status_eq_0"),
        Some(&Value::Text("Active".into()))
    );
    assert_eq!(
        params.get("users_status_code_in_0"),
        Some(&Value::IntArray(vec![1, 2]))
    );
    assert_eq!(
        params.get("users_meta_status_neq_0"),
        Some(&Value::Text("2".into()))
    );
}

#[test]
fn flag_filters() {
    let mut q = users();
    q.bind_flags(
        "perms",
        Some(&FlagsFilter::new().has_flag(Perm(4)).not_has_flag(Perm(1))),
    )
    .unwrap();
    assert_eq!(
        where_clause(&q),
        "(users.perms & @users_perms_hasflag_0) <> 0 AND (users.perms & @users_perms_nothasflag_1) = 0"
    );
    assert_eq!(
        q.params().get("users_perms_hasflag_0"),
        Some(&Value::BigInt(4))
    );
}

#[test]
fn overlapping_flags_bind_when_satisfiable() {
    let mut q = users();
    q.bind_flags(
        "perms",
        Some(&FlagsFilter::new().has_flag(Perm(0b011)).not_has_flag(Perm(0b010))),
    )
    .unwrap();
    assert_eq!(q.condition_count(), 2);

    let err = q
        .bind_flags(
            "perms",
            Some(&FlagsFilter::new().has_flag(Perm(0b010)).not_has_flag(Perm(0b011))),
        )
        .unwrap_err();
    assert_eq!(err.field_errors()[0].field, "has_flag/not_has_flag");
    assert_eq!(q.condition_count(), 2);
}

#[test]
fn id_filters() {
    let a = Uuid::from_u128(1);
    let b = Uuid::from_u128(2);
    let mut q = users();
    q.bind_id("id", Some(&IdFilter::new().in_list([a, b])))
        .unwrap()
        .bind_id("owner_id", Some(&IdFilter::new().neq(a)))
        .unwrap();
    assert_eq!(
        where_clause(&q),
        "users.id = ANY(@users_id_in_0) AND users.owner_id <> @users_owner_id_neq_0"
    );
    assert_eq!(
        q.params().get("users_id_in_0"),
        Some(&Value::UuidArray(vec![a, b]))
    );
}

#[test]
fn string_case_insensitive_by_default() {
    let mut q = users();
    q.bind_string(
        "name",
        Some(&StringFilter::new().eq("Alice").contains("Al_")),
    )
    .unwrap();
    assert_eq!(
        where_clause(&q),
        "LOWER(users.name) = @users_name_eq_0 AND users.name ILIKE @users_name_contains_1"
    );
    assert_eq!(
        q.params().get("users_name_eq_0"),
        Some(&Value::Text("alice".into()))
    );
    assert_eq!(
        q.params().get("users_name_contains_1"),
        Some(&Value::Text("%al\\_%".into()))
    );
}

#[test]
fn string_case_sensitive() {
    let mut q = users();
    q.bind_string(
        "code",
        Some(
            &StringFilter::new()
                .starts_with("AB")
                .in_list(["AB1", "AB2"])
                .case_sensitive(true),
        ),
    )
    .unwrap();
    assert_eq!(
        where_clause(&q),
        "users.code LIKE @users_code_startswith_0 AND users.code = ANY(@users_code_in_1)"
    );
    assert_eq!(
        q.params().get("users_code_in_1"),
        Some(&Value::TextArray(vec!["AB1".into(), "AB2".into()]))
    );
}

#[test]
fn null_checks_have_no_parameter() {
    let mut q = users();
    q.bind_date::<NaiveDate>("deleted_on", Some(&DateFilter::new().is_null(true)))
        .unwrap()
        .bind_string("email", Some(&StringFilter::new().is_null(false)))
        .unwrap();
    assert_eq!(
        where_clause(&q),
        "users.deleted_on IS NULL AND users.email IS NOT NULL"
    );
    assert!(q.params().is_empty());
}

#[test]
fn absent_filter_is_noop() {
    let mut q = users();
    q.bind_boolean("is_active", None)
        .unwrap()
        .bind_numeric::<i32>("age", None)
        .unwrap()
        .search(None, &["name"])
        .unwrap()
        .apply_paging(None, None)
        .unwrap();
    assert_eq!(q.render().unwrap().sql, "SELECT users.id FROM users");
}

#[test]
fn absent_filter_is_an_error_when_denied() {
    let config = QueryConfig::new().deny_null_filters();
    let mut q = FilterQuery::with_config("users", config).unwrap();
    let err = q.bind_boolean("is_active", None).unwrap_err();
    assert!(matches!(
        err,
        FilterError::MissingFilter { kind: FilterKind::Boolean, ref column, .. } if column == "is_active"
    ));
    assert!(q.search(None, &["name"]).is_err());
    assert!(q.apply_paging(None, None).is_err());
}

#[test]
fn identifier_errors_come_before_validation() {
    let mut q = users();
    let err = q
        .bind_boolean("is active", Some(&BooleanFilter::new().eq(true).neq(false)))
        .unwrap_err();
    assert!(err.is_invalid_identifier());
}

#[test]
fn failed_bind_leaves_state_untouched() {
    let mut q = users();
    let err = q
        .bind_numeric("age", Some(&NumericFilter::new().gt(5).lt(1)))
        .unwrap_err();
    assert_eq!(err.field_errors().len(), 1);
    assert_eq!(q.condition_count(), 0);
    assert!(q.params().is_empty());
}

// ==================== sort ====================

#[test]
fn order_by_follows_position_stably() {
    let mut q = users();
    q.bind_numeric("age", Some(&NumericFilter::new().gte(18).sort(Sort::desc(1))))
        .unwrap()
        .bind_string("name", Some(&StringFilter::new().sort(Sort::asc(0))))
        .unwrap()
        .bind_boolean("is_active", Some(&BooleanFilter::new().sort(Sort::asc(1))))
        .unwrap();
    assert_eq!(
        q.render().unwrap().sql,
        "SELECT users.id FROM users WHERE users.age >= @users_age_gte_0 \
         ORDER BY users.name ASC, users.age DESC, users.is_active ASC"
    );
}

#[test]
fn duplicate_sort_is_rejected_without_side_effects() {
    let mut q = users();
    q.bind_numeric("age", Some(&NumericFilter::new().gte(1).sort(Sort::asc(0))))
        .unwrap();
    let err = q
        .bind_numeric("age", Some(&NumericFilter::new().lt(5).sort(Sort::desc(1))))
        .unwrap_err();
    assert!(matches!(err, FilterError::DuplicateSort { ref column } if column == "users.age"));
    assert_eq!(q.condition_count(), 1);

    q.bind_numeric("age", Some(&NumericFilter::new().lt(5))).unwrap();
    assert!(q.params().contains("users_age_lt_1"));
}

#[test]
fn count_suppresses_order_by() {
    let mut q = FilterQuery::new("users", DialectKind::Postgres).unwrap();
    q.select_count()
        .unwrap()
        .bind_numeric("age", Some(&NumericFilter::new().gte(18).sort(Sort::asc(0))))
        .unwrap();
    assert_eq!(
        q.render().unwrap().sql,
        "SELECT COUNT(*) FROM users WHERE users.age >= @users_age_gte_0"
    );
}

// ==================== search ====================

#[test]
fn free_text_search_across_columns() {
    let mut q = users();
    q.search(Some(&SearchFilter::new("Bob")), &["name", "email"])
        .unwrap()
        .search(Some(&SearchFilter::new("x").case_sensitive(true)), &["bio"])
        .unwrap();
    assert_eq!(
        where_clause(&q),
        "(users.name ILIKE @_Search_0 OR users.email ILIKE @_Search_0) \
         AND (users.bio LIKE @_Search_1)"
    );
    assert_eq!(q.params().get("_Search_0"), Some(&Value::Text("%bob%".into())));
}

#[test]
fn search_requires_columns() {
    let mut q = users();
    let err = q.search(Some(&SearchFilter::new("Bob")), &[]).unwrap_err();
    assert_eq!(err.field_errors()[0].field, "columns");
    let err = q
        .search(Some(&SearchFilter::new("Bob")), &["name", "bad col"])
        .unwrap_err();
    assert!(err.is_invalid_identifier());
}

#[test]
fn full_text_search() {
    let mut q = FilterQuery::new("posts", DialectKind::Postgres).unwrap();
    q.select_all()
        .unwrap()
        .search_full_text(Some(&FullTextSearchFilter::new("rust")), &["title", "body"])
        .unwrap()
        .search_full_text(
            Some(
                &FullTextSearchFilter::new("\"async rust\" -java")
                    .config("simple")
                    .mode(TsQueryMode::WebSearch),
            ),
            &["title"],
        )
        .unwrap();
    assert_eq!(
        where_clause(&q),
        "to_tsvector('english', COALESCE(posts.title, '') || ' ' || COALESCE(posts.body, '')) \
         @@ plainto_tsquery('english', @_FullText_0) \
         AND to_tsvector('simple', COALESCE(posts.title, '')) \
         @@ websearch_to_tsquery('simple', @_FullText_1)"
    );
}

#[test]
fn full_text_uses_configured_default() {
    let config = QueryConfig::new().with_text_search_config("german");
    let mut q = FilterQuery::with_config("posts", config).unwrap();
    q.select_all()
        .unwrap()
        .search_full_text(Some(&FullTextSearchFilter::new("haus")), &["body"])
        .unwrap();
    assert!(where_clause(&q).starts_with("to_tsvector('german', "));
}

#[test]
fn full_text_requires_dialect_support() {
    let mut q = FilterQuery::with_dialect("posts", Arc::new(PlainDialect)).unwrap();
    q.select_all().unwrap();
    let err = q
        .search_full_text(Some(&FullTextSearchFilter::new("rust")), &["body"])
        .unwrap_err();
    assert!(matches!(err, FilterError::FullTextSearchUnsupported { ref dialect } if dialect == "plain"));
    assert!(err.is_state_error());

    q.search(Some(&SearchFilter::new("rust")), &["body"]).unwrap();
    let rendered = q.render().unwrap();
    assert!(rendered.sql.ends_with("WHERE (LOWER(posts.body) LIKE @_Search_0 ESCAPE '\\')"));

    let positional = rendered.to_positional().unwrap();
    assert!(positional.sql.ends_with("WHERE (LOWER(posts.body) LIKE $1 ESCAPE '\\')"));
    assert_eq!(positional.params, vec![Value::Text("%rust%".into())]);
}

// ==================== paging ====================

#[test]
fn paging_is_last_write_wins() {
    let mut q = users();
    q.apply_paging(Some(&PaginationFilter::new(10, 5)), None).unwrap();
    let rendered = q.render().unwrap();
    assert!(rendered.sql.ends_with(" LIMIT @_Limit OFFSET @_Offset"));
    assert_eq!(rendered.params.get(LIMIT_PARAM), Some(&Value::BigInt(10)));
    assert_eq!(rendered.params.get(OFFSET_PARAM), Some(&Value::BigInt(40)));

    q.apply_paging(Some(&PaginationFilter::new(20, 1)), None).unwrap();
    let rendered = q.render().unwrap();
    assert_eq!(rendered.sql.matches("LIMIT").count(), 1);
    assert_eq!(rendered.params.len(), 2);
    assert_eq!(rendered.params.get(LIMIT_PARAM), Some(&Value::BigInt(20)));
    assert_eq!(rendered.params.get(OFFSET_PARAM), Some(&Value::BigInt(0)));
}

#[test]
fn paging_limits() {
    let mut q = users();
    let err = q
        .apply_paging(Some(&PaginationFilter::new(500, 1)), Some(100))
        .unwrap_err();
    assert!(matches!(err, FilterError::Validation { kind: FilterKind::Pagination, .. }));

    let mut q = FilterQuery::with_config("users", QueryConfig::new().with_max_page_size(50)).unwrap();
    assert!(q.apply_paging(Some(&PaginationFilter::new(60, 1)), None).is_err());
    assert!(q.apply_paging(Some(&PaginationFilter::new(60, 1)), Some(100)).is_ok());
    assert!(q.apply_paging(Some(&PaginationFilter::new(5, 0)), None).is_err());
    assert_eq!(q.paging(), Some((60, 0)));
}

#[test]
fn overflowing_offset_is_rejected() {
    let mut q = users();
    q.apply_paging(Some(&PaginationFilter::new(10, 2)), None).unwrap();
    let err = q
        .apply_paging(Some(&PaginationFilter::new(1 << 40, 1 << 30)), None)
        .unwrap_err();
    assert_eq!(err.field_errors()[0].field, "page");
    assert_eq!(q.paging(), Some((10, 10)));
}

// ==================== render ====================

#[test]
fn render_is_repeatable() {
    let mut q = users();
    q.bind_boolean("is_active", Some(&BooleanFilter::new().eq(true)))
        .unwrap();
    assert_eq!(q.render().unwrap(), q.render().unwrap());
}

#[test]
fn clone_is_isolated() {
    let mut base = users();
    base.bind_boolean("is_active", Some(&BooleanFilter::new().eq(true)))
        .unwrap();
    let before = base.render().unwrap();

    let mut copy = base.clone();
    copy.bind_numeric("age", Some(&NumericFilter::new().gt(21)))
        .unwrap()
        .apply_paging(Some(&PaginationFilter::new(10, 1)), None)
        .unwrap();
    assert_eq!(base.render().unwrap(), before);
    assert_eq!(copy.render().unwrap().params.len(), 4);

    base.bind_numeric("age", Some(&NumericFilter::new().gt(30))).unwrap();
    assert_eq!(base.params().get("users_age_gt_0"), Some(&Value::Int(30)));
    assert_eq!(copy.params().get("users_age_gt_0"), Some(&Value::Int(21)));
    assert_eq!(base.render().unwrap().params.len(), 2);
}

#[test]
fn count_query_drops_order_and_paging() {
    let mut q = users();
    q.bind_numeric("age", Some(&NumericFilter::new().gte(18).sort(Sort::asc(0))))
        .unwrap()
        .apply_paging(Some(&PaginationFilter::new(10, 2)), None)
        .unwrap();
    let count = q.count_query().render().unwrap();
    assert_eq!(
        count.sql,
        "SELECT COUNT(*) FROM users WHERE users.age >= @users_age_gte_0"
    );
    assert_eq!(count.params.len(), 1);
    assert!(q.render().unwrap().sql.contains("ORDER BY users.age ASC"));
}

#[test]
fn positional_conversion() {
    let mut q = FilterQuery::new("posts", DialectKind::Postgres).unwrap();
    q.select_columns(["id"])
        .unwrap()
        .search(Some(&SearchFilter::new("Rust")), &["title", "body"])
        .unwrap()
        .search_full_text(Some(&FullTextSearchFilter::new("async")), &["title"])
        .unwrap()
        .apply_paging(Some(&PaginationFilter::new(10, 2)), None)
        .unwrap();
    let positional = q.render().unwrap().to_positional().unwrap();
    assert_eq!(
        positional.sql,
        "SELECT posts.id FROM posts WHERE (posts.title ILIKE $1 OR posts.body ILIKE $1) \
         AND to_tsvector('english', COALESCE(posts.title, '')) @@ plainto_tsquery('english', $2) \
         LIMIT $3 OFFSET $4"
    );
    assert_eq!(
        positional.params,
        vec![
            Value::Text("%rust%".into()),
            Value::Text("async".into()),
            Value::BigInt(10),
            Value::BigInt(10),
        ]
    );
    assert_eq!(positional.params_ref().len(), 4);
}

#[test]
fn positional_conversion_rejects_unknown_names() {
    let rendered = RenderedQuery {
        sql: "SELECT t.* FROM t WHERE t.a = @missing".to_string(),
        params: Params::new(),
    };
    assert!(matches!(
        rendered.to_positional().unwrap_err(),
        FilterError::UnknownParameter { ref name } if name == "missing"
    ));
}

#[test]
fn params_json() {
    let mut q = users();
    q.bind_string("name", Some(&StringFilter::new().in_list(["A", "b"])))
        .unwrap();
    assert_eq!(
        q.render().unwrap().params_json(),
        serde_json::json!({ "users_name_in_0": ["a", "b"] })
    );
}
