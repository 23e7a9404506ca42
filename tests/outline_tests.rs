use serde::{Deserialize, Serialize};
use serde_colson::{colson, from_value, outline, to_value, NonFinitePolicy, OutlineOptions, Value};

const DOCUMENT: &str = "\
:: Inventory export
:::
    store :: Main Street
    open :: True
    manager :: None
    rating :: 4.5
    items ::
        :::
            sku :: A-1
            qty :: 3
        :::
            sku :: \\007\\
            qty :: 0
    notes ::
        \\ indented note\\
        plain note
";

#[test]
fn test_reads_document() {
    let value = outline::from_str(DOCUMENT).unwrap();
    assert_eq!(
        value,
        colson!({
            "store": "Main Street",
            "open": true,
            "manager": null,
            "rating": 4.5,
            "items": [
                {"sku": "A-1", "qty": 3},
                {"sku": "007", "qty": 0}
            ],
            "notes": [" indented note", "plain note"]
        })
    );
}

#[test]
fn test_document_round_trip() {
    let value = outline::from_str(DOCUMENT).unwrap();
    let text = outline::to_string(&value).unwrap();
    assert_eq!(outline::from_str(&text).unwrap(), value);
    assert_eq!(outline::to_string(&outline::from_str(&text).unwrap()).unwrap(), text);
}

#[test]
fn test_writes_expected_lines() {
    let value = colson!({
        "name": "x",
        "list": [1, "2", [], {}],
        "empty": ""
    });
    let text = outline::to_string(&value).unwrap();
    assert_eq!(
        text,
        [
            ":::",
            "    name :: x",
            "    list ::",
            "        1",
            "        \\2\\",
            "        ::",
            "        :::",
            "    empty :: \\\\",
        ]
        .join("\n")
    );
}

#[test]
fn test_custom_tab_and_level() {
    let options = OutlineOptions::new().with_tab(2).with_level(2);
    let value = colson!([{"a": 1}]);
    let text = outline::to_string_with_options(&value, &options).unwrap();
    assert_eq!(text, "    ::\n      :::\n        a :: 1");
    assert_eq!(outline::from_str_with_options(&text, &options).unwrap(), value);
}

#[test]
fn test_tabs_count_as_indentation() {
    let options = OutlineOptions::new().with_tab(1);
    let value = outline::from_str_with_options("::\n\t1\n\t::\n\t\tTrue", &options).unwrap();
    assert_eq!(value, colson!([1, [true]]));
}

#[test]
fn test_non_finite_floats() {
    let value = colson!([(f64::INFINITY)]);
    assert!(outline::to_string(&value).unwrap_err().is_encoding());

    let options = OutlineOptions::new().with_non_finite(NonFinitePolicy::Nullify);
    assert_eq!(
        outline::to_string_with_options(&value, &options).unwrap(),
        "::\n    None"
    );
}

#[test]
fn test_error_lines_and_columns() {
    let err = outline::from_str(":::\n    a :: 1\n        b :: 2").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!((err.line(), err.column()), (Some(3), Some(9)));

    let err = outline::from_str("::\n    1\n:::").unwrap_err();
    assert_eq!(err.to_string(), "multiple root values at line 3, column 1");
}

#[test]
fn test_serde_types_through_outline() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Task {
        title: String,
        done: bool,
        estimate: Option<f64>,
        subtasks: Vec<String>,
    }

    let task = Task {
        title: "Write docs".to_string(),
        done: false,
        estimate: Some(1.5),
        subtasks: vec!["outline".to_string(), "True".to_string()],
    };

    let text = outline::to_string(&to_value(&task).unwrap()).unwrap();
    assert_eq!(
        text,
        ":::\n    title :: Write docs\n    done :: False\n    estimate :: 1.5\n    subtasks ::\n        outline\n        \\True\\"
    );

    let back: Task = from_value(outline::from_str(&text).unwrap()).unwrap();
    assert_eq!(back, task);
}

#[test]
fn test_empty_input() {
    for text in ["", "\n\n", ":: just a comment", "   \n:: another\n"] {
        let err = outline::from_str(text).unwrap_err();
        assert!(err.to_string().starts_with("there is nothing to parse"));
    }
    assert_eq!(outline::from_str("::").unwrap(), Value::Array(vec![]));
}

#[test]
fn test_keys_may_contain_separator() {
    let value = outline::from_str(":::\n    a::b :: c").unwrap();
    assert_eq!(value, colson!({"a::b": "c"}));

    let text = outline::to_string(&colson!({"a::b": "c"})).unwrap();
    assert_eq!(text, ":::\n    a::b :: c");
    assert_eq!(outline::from_str(&text).unwrap(), colson!({"a::b": "c"}));
}

#[test]
fn test_colon_runs_are_not_comments() {
    assert_eq!(
        outline::from_str("::\n    :::x").unwrap(),
        colson!([":::x"])
    );
    assert_eq!(
        outline::from_str("::\n    ::x\n    1").unwrap(),
        colson!([1])
    );
}
