use compact_str::CompactString;
use tabulify_sql::{
    columns::{
        ColumnIdentifierExtractor, ColumnVec, ExtractorOptions, extract_column_identifiers,
        split_column_expressions, unique_column_names
    },
    lexer::parse_script
};

fn names(columns: &ColumnVec) -> Vec<&str> {
    columns.iter().map(|c| c.as_str()).collect()
}

fn collapsing() -> ColumnIdentifierExtractor {
    ColumnIdentifierExtractor::new(ExtractorOptions {
        function_name_as_identifier: true,
        ..Default::default()
    })
}

#[test]
fn test_plain_aliased_and_quoted() {
    let columns = extract_column_identifiers("select a, t.b as c, \"d e\" from t").unwrap();
    assert_eq!(names(&columns), ["a", "c", "d e"]);
}

#[test]
fn test_formula_identifier() {
    let columns = extract_column_identifiers("select avg(ss_quantity) from t").unwrap();
    assert_eq!(names(&columns), ["avg(ss_quantity)"]);

    let columns = collapsing().extract("select avg(ss_quantity) from t").unwrap();
    assert_eq!(names(&columns), ["avg"]);
}

#[test]
fn test_nested_from_does_not_end_select_list() {
    let query = "select case when (select count(*) from t2) > 0 then 1 else 0 end as flag from t";
    let columns = extract_column_identifiers(query).unwrap();
    assert_eq!(names(&columns), ["flag"]);
}

#[test]
fn test_scalar_subquery_column() {
    let query = "select (select max(a) from u) as top, b from t";
    let columns = extract_column_identifiers(query).unwrap();
    assert_eq!(names(&columns), ["top", "b"]);
}

#[test]
fn test_with_query() {
    let query = "with x as (select a, b from t)\nselect x.a, x.b total\nfrom x";
    let columns = extract_column_identifiers(query).unwrap();
    assert_eq!(names(&columns), ["a", "total"]);
}

#[test]
fn test_multiline_query() {
    let query = "SELECT\n\tID,\n\tName\nFROM users\nWHERE id > 1";
    let columns = extract_column_identifiers(query).unwrap();
    assert_eq!(names(&columns), ["id", "name"]);
}

#[test]
fn test_preserve_case() {
    let extractor = ColumnIdentifierExtractor::new(ExtractorOptions {
        lowercase_identifiers: false,
        ..Default::default()
    });
    let columns = extractor.extract("SELECT ID, Name, \"mixedCase\" FROM users").unwrap();
    assert_eq!(names(&columns), ["ID", "Name", "mixedCase"]);
}

#[test]
fn test_quoted_identifier_keeps_case() {
    let columns = extract_column_identifiers("select \"Order Id\", \"a, b\" from t").unwrap();
    assert_eq!(names(&columns), ["Order Id", "a, b"]);
}

#[test]
fn test_function_with_alias() {
    let columns = extract_column_identifiers("select count(*) as n, round(price, 2) from t").unwrap();
    assert_eq!(names(&columns), ["n", "round(price, 2)"]);

    let columns = collapsing()
        .extract("select count(*) as n, round(price, 2) from t")
        .unwrap();
    assert_eq!(names(&columns), ["n", "round"]);
}

#[test]
fn test_window_function_alias() {
    let query = "select a, rank() over (partition by a, b order by c) as r from t";
    let columns = extract_column_identifiers(query).unwrap();
    assert_eq!(names(&columns), ["a", "r"]);
}

#[test]
fn test_function_with_from_argument() {
    let query = "select extract(year from sold_at) as sold_year, amount from sales";
    let columns = extract_column_identifiers(query).unwrap();
    assert_eq!(names(&columns), ["sold_year", "amount"]);
}

#[test]
fn test_query_without_from() {
    let columns = extract_column_identifiers("select 1 as one, 2 two").unwrap();
    assert_eq!(names(&columns), ["one", "two"]);
}

#[test]
fn test_star() {
    let columns = extract_column_identifiers("select * from t").unwrap();
    assert_eq!(names(&columns), ["*"]);
}

#[test]
fn test_split_on_top_level_commas() {
    assert_eq!(split_column_expressions("a, 'x, y', b"), vec!["a", "'x, y'", "b"]);
    assert_eq!(
        split_column_expressions("round(a, 2), \"c, d\""),
        vec!["round(a, 2)", "\"c, d\""]
    );
}

#[test]
fn test_update_is_rejected() {
    assert!(extract_column_identifiers("update t set x=1").is_err());
}

#[test]
fn test_empty_query_is_rejected() {
    assert!(extract_column_identifiers("").is_err());
    assert!(extract_column_identifiers("   ").is_err());
}

#[test]
fn test_extract_statement() {
    let statements = parse_script("select a, b from t;\nupdate t set a = 1;\n").unwrap();
    let extractor = ColumnIdentifierExtractor::default();
    let columns = extractor.extract_statement(&statements[0]).unwrap();
    assert_eq!(names(&columns), ["a", "b"]);
    assert!(extractor.extract_statement(&statements[1]).is_err());
}

#[test]
fn test_unique_column_names() {
    let columns = collapsing()
        .extract("select avg(a), avg(b), sum(c), avg(d) from t")
        .unwrap();
    assert_eq!(names(&columns), ["avg", "avg", "sum", "avg"]);
    let unique = unique_column_names(&columns);
    assert_eq!(names(&unique), ["avg", "avg-1", "sum", "avg-3"]);
}

#[test]
fn test_unique_column_names_keep_distinct() {
    let columns: Vec<CompactString> = vec!["a".into(), "b".into()];
    assert_eq!(names(&unique_column_names(&columns)), ["a", "b"]);
}

#[test]
fn test_extractor_options() {
    assert_eq!(ColumnIdentifierExtractor::default().options(), ExtractorOptions::default());
    assert!(ExtractorOptions::default().lowercase_identifiers);
    assert!(!ExtractorOptions::default().function_name_as_identifier);
}

#[test]
fn test_parenthesis_in_literal() {
    let columns = extract_column_identifiers("select '(' as p, b from t").unwrap();
    assert_eq!(names(&columns), ["p", "b"]);

    let columns = extract_column_identifiers("select ':-)' as smiley, b from t").unwrap();
    assert_eq!(names(&columns), ["smiley", "b"]);
}

#[test]
fn test_parenthesis_in_quoted_identifier() {
    let columns = extract_column_identifiers("select \"a(b\", c from t").unwrap();
    assert_eq!(names(&columns), ["a(b", "c"]);

    let columns = extract_column_identifiers("select \"x(y\", z from t").unwrap();
    assert_eq!(names(&columns), ["x(y", "z"]);
}

#[test]
fn test_keywords_in_literal() {
    let query = "select 'picked from stock' as note, c from t";
    let columns = extract_column_identifiers(query).unwrap();
    assert_eq!(names(&columns), ["note", "c"]);

    let query = "select 'select' as kw, \"from\" from t";
    let columns = extract_column_identifiers(query).unwrap();
    assert_eq!(names(&columns), ["kw", "from"]);
}

#[test]
fn test_first_word_must_be_whole() {
    assert!(extract_column_identifiers("select1 from t").is_err());
    assert!(extract_column_identifiers("without x select 1").is_err());
    assert!(extract_column_identifiers("select*from t").is_ok());
}
