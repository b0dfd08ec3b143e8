use crate::classify::*;

#[test]
fn dynamic_is_substring_test() {
    assert!(is_dynamic("{a}"));
    assert!(is_dynamic("}{"));
    assert!(is_dynamic("x { y } z"));
    assert!(!is_dynamic("{open"));
    assert!(!is_dynamic("close}"));
    assert!(!is_dynamic(""));
}

#[test]
fn extract_first_field() {
    assert_eq!(extract_field_name("{name}"), "name");
    assert_eq!(extract_field_name("a {first} b {second}"), "first");
    assert_eq!(extract_field_name("{}"), "{}");
    assert_eq!(extract_field_name("}{"), "}{");
    assert_eq!(extract_field_name("plain"), "plain");
}

#[test]
fn segments_alternate_in_order() {
    assert_eq!(
        parse_value_segments("{part1} static {part2}"),
        vec![
            Segment::Dynamic("part1"),
            Segment::Static(" static "),
            Segment::Dynamic("part2"),
        ]
    );
}

#[test]
fn segments_single_match_is_single_dynamic() {
    assert_eq!(parse_value_segments("{only}"), vec![Segment::Dynamic("only")]);
}

#[test]
fn segments_without_match_are_one_static() {
    assert_eq!(parse_value_segments("plain"), vec![Segment::Static("plain")]);
    assert_eq!(parse_value_segments("{}"), vec![Segment::Static("{}")]);
    assert_eq!(parse_value_segments(""), vec![Segment::Static("")]);
}

#[test]
fn segments_with_surrounding_literals() {
    assert_eq!(
        parse_value_segments("btn {kind}-lg"),
        vec![
            Segment::Static("btn "),
            Segment::Dynamic("kind"),
            Segment::Static("-lg"),
        ]
    );
}

#[test]
fn nested_open_brace_is_part_of_field() {
    assert_eq!(
        parse_value_segments("{{x}}"),
        vec![Segment::Dynamic("{x"), Segment::Static("}")]
    );
}

#[test]
fn text_segments_drop_blank_runs_but_keep_padding() {
    assert_eq!(
        text_segments("a{x}b{y}c"),
        vec![
            Segment::Static("a"),
            Segment::Dynamic("x"),
            Segment::Static("b"),
            Segment::Dynamic("y"),
            Segment::Static("c"),
        ]
    );
    assert_eq!(
        text_segments("  {x}  {y} done "),
        vec![
            Segment::Dynamic("x"),
            Segment::Dynamic("y"),
            Segment::Static(" done "),
        ]
    );
}

#[test]
fn unmatched_braces() {
    assert!(has_unmatched_brace("{}"));
    assert!(has_unmatched_brace("a { b"));
    assert!(has_unmatched_brace("{{x}}"));
    assert!(!has_unmatched_brace("{x} and {y}"));
    assert!(!has_unmatched_brace("plain"));
}

#[test]
fn event_names_and_handlers() {
    assert!(is_event_attribute("onclick"));
    assert!(!is_event_attribute("class"));
    assert_eq!(event_name("onclick"), "click");
    assert_eq!(handler_field("{eh__handleClick}"), "handleClick");
    assert_eq!(handler_field("{save}"), "save");
}

#[test]
fn event_takes_precedence() {
    assert_eq!(
        classify_attribute("onclick", "{eh__handleClick}"),
        AttrClass::Event {
            event: "click",
            handler: "handleClick"
        }
    );
}

#[test]
fn event_with_static_value_is_static_attr() {
    assert_eq!(
        classify_attribute("onclick", "go()"),
        AttrClass::Static {
            name: "onclick",
            value: "go()"
        }
    );
}

#[test]
fn attribute_precedence() {
    assert_eq!(
        classify_attribute("{n}", "{v}"),
        AttrClass::DynDyn {
            name_field: "n",
            value_field: "v"
        }
    );
    assert_eq!(
        classify_attribute("title", "{t}"),
        AttrClass::StaticDyn {
            name: "title",
            field: "t"
        }
    );
    assert_eq!(
        classify_attribute("class", "card {state}"),
        AttrClass::Parts {
            name: "class",
            segments: vec![Segment::Static("card "), Segment::Dynamic("state")],
        }
    );
    assert_eq!(
        classify_attribute("{n}", "x"),
        AttrClass::DynStatic {
            field: "n",
            value: "x"
        }
    );
    assert_eq!(
        classify_attribute("id", "main"),
        AttrClass::Static {
            name: "id",
            value: "main"
        }
    );
}

#[test]
fn malformed_value_falls_back_to_whole_string() {
    assert_eq!(
        classify_attribute("data", "}{"),
        AttrClass::StaticDyn {
            name: "data",
            field: "}{"
        }
    );
}
