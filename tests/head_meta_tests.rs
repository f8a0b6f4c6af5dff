mod common;

use common::{TestResult, attr, count, head_meta, init_logger, registry};
use headtags::{
    Doctype, HeadError, HeadMeta, Insertion, KeyedMeta, MetaItem, MetaType, Placement,
    RenderWarning,
};
use serde_json::{Map, Value, json};

fn modifiers(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn keyed(helper: &HeadMeta) -> Vec<KeyedMeta> {
    helper
        .metas()
        .filter_map(|(_, meta)| meta.as_keyed().cloned())
        .collect()
}

/// Suffix used by the name-based surface for a meta type.
fn suffix(meta_type: MetaType) -> &'static str {
    match meta_type {
        MetaType::Name => "Name",
        MetaType::HttpEquiv => "HttpEquiv",
        MetaType::Property => "Property",
        MetaType::Itemprop => "Itemprop",
    }
}

fn xhtml_helper() -> HeadMeta {
    let (helper, _) = head_meta(&registry(Doctype::Xhtml1Strict));
    helper
}

fn run_overload_append(doctype: Doctype, meta_type: MetaType) -> TestResult {
    let (mut helper, _) = head_meta(&registry(doctype));
    let method = format!("append{}", suffix(meta_type));
    let mut content = String::from("foo");
    for i in 0..3 {
        content.push_str(" foo");
        helper.call(&method, &[json!("keywords"), json!(content)])?;
        let items = keyed(&helper);
        assert_eq!(items.len(), i + 1);
        let item = &items[i];
        assert_eq!(item.meta_type(), meta_type);
        assert_eq!(item.key(), "keywords");
        assert_eq!(item.content(), content);
    }
    Ok(())
}

fn run_overload_prepend(doctype: Doctype, meta_type: MetaType) -> TestResult {
    let (mut helper, _) = head_meta(&registry(doctype));
    let method = format!("prepend{}", suffix(meta_type));
    let mut content = String::from("foo");
    for i in 0..3 {
        content.push_str(" foo");
        helper.call(&method, &[json!("keywords"), json!(content)])?;
        let items = keyed(&helper);
        assert_eq!(items.len(), i + 1);
        let first = &items[0];
        assert_eq!(first.meta_type(), meta_type);
        assert_eq!(first.key(), "keywords");
        assert_eq!(first.content(), content);
    }
    Ok(())
}

fn run_overload_set(doctype: Doctype, meta_type: MetaType) -> TestResult {
    let (mut helper, _) = head_meta(&registry(doctype));
    let append = format!("append{}", suffix(meta_type));
    let set = format!("set{}", suffix(meta_type));
    for _ in 0..3 {
        helper.call(&append, &[json!("keywords"), json!("foo")])?;
    }
    helper.call(&set, &[json!("keywords"), json!("foo bar")])?;
    let items = keyed(&helper);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].meta_type(), meta_type);
    assert_eq!(items[0].key(), "keywords");
    assert_eq!(items[0].content(), "foo bar");
    Ok(())
}

#[test]
fn test_non_meta_values_are_rejected() {
    init_logger();
    let mut helper = xhtml_helper();
    for insertion in [Insertion::Append, Insertion::Prepend, Insertion::Set, Insertion::At(1)] {
        let err = helper.insert_value(&json!("foo"), insertion).err().map(|e| e.to_string());
        let message = err.unwrap_or_default();
        assert!(
            message.starts_with(&format!("Invalid value passed to {}", insertion.operation())),
            "{}",
            message
        );
    }
}

#[test]
fn test_overloaded_name_and_http_equiv() -> TestResult {
    init_logger();
    for meta_type in [MetaType::Name, MetaType::HttpEquiv] {
        run_overload_append(Doctype::Xhtml1Strict, meta_type)?;
        run_overload_prepend(Doctype::Xhtml1Strict, meta_type)?;
        run_overload_set(Doctype::Xhtml1Strict, meta_type)?;
    }
    Ok(())
}

#[test]
fn test_overloaded_property_under_rdfa() -> TestResult {
    init_logger();
    run_overload_append(Doctype::Xhtml1Rdfa, MetaType::Property)?;
    run_overload_prepend(Doctype::Xhtml1Rdfa, MetaType::Property)?;
    run_overload_set(Doctype::Xhtml1Rdfa, MetaType::Property)
}

#[test]
fn test_overloaded_itemprop_under_html5() -> TestResult {
    init_logger();
    run_overload_append(Doctype::Html5, MetaType::Itemprop)?;
    run_overload_prepend(Doctype::Html5, MetaType::Itemprop)?;
    run_overload_set(Doctype::Html5, MetaType::Itemprop)
}

#[test]
fn test_overloading_with_too_few_arguments() {
    init_logger();
    let mut helper = xhtml_helper();
    let err = helper.call("setName", &[json!("foo")]).err();
    assert_eq!(
        err,
        Some(HeadError::Arity {
            kind: "Name",
            required: 2,
            provided: 1
        })
    );
}

#[test]
fn test_overloading_with_invalid_method_type() {
    init_logger();
    let mut helper = xhtml_helper();
    let err = helper.call("setFoo", &[json!("foo")]).err();
    assert!(matches!(err, Some(HeadError::UnknownOperation { .. })));
}

#[test]
fn test_modifiers_are_kept_and_filtered() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper.call(
        "setName",
        &[
            json!("keywords"),
            json!("foo bar"),
            json!({ "lang": "us_en", "scheme": "foo", "bogus": "unused" }),
        ],
    )?;
    let items = keyed(&helper);
    assert_eq!(items[0].modifier("lang"), Some("us_en"));
    assert_eq!(items[0].modifier("scheme"), Some("foo"));
    assert_eq!(items[0].modifier("bogus"), None);
    Ok(())
}

#[test]
fn test_to_html_returns_valid_markup() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper
        .call(
            "setName",
            &[
                json!("keywords"),
                json!("foo bar"),
                json!({ "lang": "us_en", "scheme": "foo", "bogus": "unused" }),
            ],
        )?
        .call("prependName", &[json!("title"), json!("boo bah")])?
        .call("appendHttpEquiv", &[json!("screen"), json!("projection")])?;

    let html = helper.to_html();
    assert_eq!(count(&html, "<meta "), 3);
    assert_eq!(count(&html, "/>"), 3);
    assert_eq!(count(&html, "name=\""), 2);
    assert_eq!(count(&html, "http-equiv=\""), 1);
    assert!(html.contains("http-equiv=\"screen\" content=\"projection\""));
    assert!(html.contains(&format!("name=\"keywords\" content=\"{}\"", attr("foo bar"))));
    assert!(html.contains("lang=\"us_en\""));
    assert!(html.contains("scheme=\"foo\""));
    assert!(!html.contains("bogus"));
    assert!(!html.contains("unused"));
    assert!(html.contains(&format!("name=\"title\" content=\"{}\"", attr("boo bah"))));
    Ok(())
}

#[test]
fn test_unknown_key_type_is_rejected_at_insertion() {
    init_logger();
    let mut helper = xhtml_helper();
    let err = helper
        .meta("some-content", "tag value", "not allowed key", None, Placement::Append)
        .err()
        .map(|e| e.to_string());
    assert_eq!(
        err,
        Some("Invalid value passed to append: Invalid type \"not allowed key\" provided for meta".to_string())
    );
    assert!(helper.is_empty());
}

#[test]
fn test_meta_entry_point_creates_name_items() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper.meta("foo", "keywords", "name", None, Placement::Append)?;
    let items = keyed(&helper);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content(), "foo");
    assert_eq!(items[0].meta_type(), MetaType::Name);
    assert_eq!(items[0].key(), "keywords");
    Ok(())
}

#[test]
fn test_offset_set_inserts_at_offset() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper.call("offsetSetName", &[json!(100), json!("keywords"), json!("foo")])?;
    assert_eq!(helper.len(), 1);
    let item = helper
        .stack()
        .get(100)
        .and_then(|item| item.as_meta())
        .and_then(MetaItem::as_keyed)
        .ok_or("missing key 100")?;
    assert_eq!(item.content(), "foo");
    assert_eq!(item.meta_type(), MetaType::Name);
    assert_eq!(item.key(), "keywords");
    Ok(())
}

#[test]
fn test_indentation_is_honored() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper.set_indent(4);
    helper
        .call("appendName", &[json!("keywords"), json!("foo bar")])?
        .call("appendName", &[json!("seo"), json!("baz bat")])?;
    assert_eq!(count(&helper.to_html(), "    <meta name="), 2);
    Ok(())
}

#[test]
fn test_markup_reflects_doctype() -> TestResult {
    init_logger();
    let (mut helper, _) = head_meta(&registry(Doctype::Html4Strict));
    helper.meta("some content", "foo", "name", None, Placement::Append)?;
    let html = helper.to_html();
    assert!(!html.contains("/>"));
    assert!(html.contains(&attr("some content")));
    assert!(html.contains("foo"));
    Ok(())
}

#[test]
fn test_set_name_does_not_clobber_other_entries() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper
        .call("setName", &[json!("keywords"), json!("foo")])?
        .call("appendHttpEquiv", &[json!("pragma"), json!("bar")])?
        .call("appendHttpEquiv", &[json!("Cache-control"), json!("baz")])?
        .call("setName", &[json!("keywords"), json!("bat")])?;
    assert_eq!(
        helper.to_html(),
        "<meta http-equiv=\"pragma\" content=\"bar\" />\n\
         <meta http-equiv=\"Cache-control\" content=\"baz\" />\n\
         <meta name=\"keywords\" content=\"bat\" />"
    );
    Ok(())
}

#[test]
fn test_set_name_only_replaces_the_same_key() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper
        .call("setName", &[json!("keywords"), json!("foo")])?
        .call("setName", &[json!("description"), json!("foo")])?
        .call("appendHttpEquiv", &[json!("pragma"), json!("baz")])?
        .call("appendHttpEquiv", &[json!("Cache-control"), json!("baz")])?
        .call("setName", &[json!("keywords"), json!("bar")])?;
    assert_eq!(
        helper.to_html(),
        "<meta name=\"description\" content=\"foo\" />\n\
         <meta http-equiv=\"pragma\" content=\"baz\" />\n\
         <meta http-equiv=\"Cache-control\" content=\"baz\" />\n\
         <meta name=\"keywords\" content=\"bar\" />"
    );
    Ok(())
}

#[test]
fn test_prepend_placement_goes_first() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper.call("setName", &[json!("keywords"), json!("foo")])?;
    helper.meta("some content", "bar", "name", Some(&Map::new()), Placement::Prepend)?;
    assert_eq!(
        helper.to_html(),
        format!(
            "<meta name=\"bar\" content=\"{}\" />\n<meta name=\"keywords\" content=\"foo\" />",
            attr("some content")
        )
    );
    Ok(())
}

#[test]
fn test_offset_set_keeps_key_order() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper
        .call("offsetSetName", &[json!(1), json!("keywords"), json!("foo")])?
        .call("offsetSetName", &[json!(10), json!("description"), json!("foo")])?
        .call("offsetSetHttpEquiv", &[json!(20), json!("pragma"), json!("baz")])?
        .call("offsetSetHttpEquiv", &[json!(5), json!("Cache-control"), json!("baz")])?;
    assert_eq!(
        helper.to_html(),
        "<meta name=\"keywords\" content=\"foo\" />\n\
         <meta http-equiv=\"Cache-control\" content=\"baz\" />\n\
         <meta name=\"description\" content=\"foo\" />\n\
         <meta http-equiv=\"pragma\" content=\"baz\" />"
    );
    Ok(())
}

#[test]
fn test_charset_requires_html5_at_insertion() {
    init_logger();
    let (mut helper, _) = head_meta(&registry(Doctype::Html4Strict));
    assert!(matches!(helper.set_charset("utf-8"), Err(HeadError::InvalidItem { .. })));

    let (mut helper, _) = head_meta(&registry(Doctype::Xhtml1Rdfa));
    let err = helper.set_charset("utf-8").err().map(|e| e.to_string()).unwrap_or_default();
    assert!(err.contains("XHTML* doctype has no attribute charset; please use appendHttpEquiv()"));
    assert!(helper.is_empty());
}

#[test]
fn test_charset_format_follows_doctype() -> TestResult {
    init_logger();
    let registry = registry(Doctype::Html5);
    let (mut helper, _) = head_meta(&registry);
    helper.set_charset("utf-8")?;
    assert_eq!(helper.to_html(), "<meta charset=\"utf-8\">");

    registry.set(Doctype::Xhtml5);
    assert_eq!(helper.to_html(), "<meta charset=\"utf-8\"/>");
    Ok(())
}

#[test]
fn test_charset_renders_before_everything_else() -> TestResult {
    init_logger();
    let (mut helper, _) = head_meta(&registry(Doctype::Html5));
    helper
        .call("setProperty", &[json!("description"), json!("foobar")])?
        .set_charset("utf-8")?;
    assert_eq!(
        helper.to_html(),
        "<meta charset=\"utf-8\">\n<meta property=\"description\" content=\"foobar\">"
    );
    Ok(())
}

#[test]
fn test_property_is_supported_with_rdfa_doctype() -> TestResult {
    init_logger();
    let (mut helper, _) = head_meta(&registry(Doctype::Xhtml1Rdfa));
    helper.meta("foo", "og:title", "property", None, Placement::Append)?;
    assert_eq!(
        helper.to_html(),
        format!("<meta property=\"{}\" content=\"foo\" />", attr("og:title"))
    );
    Ok(())
}

#[test]
fn test_property_is_not_supported_by_default_doctype() {
    init_logger();
    let mut helper = xhtml_helper();
    let err = helper
        .meta("foo", "og:title", "property", None, Placement::Append)
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default();
    assert!(err.contains("Invalid value passed"));
}

#[test]
fn test_itemprop_is_supported_with_html5_doctype() -> TestResult {
    init_logger();
    let (mut helper, _) = head_meta(&registry(Doctype::Html5));
    helper.meta("HeadMeta with Microdata", "description", "itemprop", None, Placement::Append)?;
    assert_eq!(
        helper.to_html(),
        format!(
            "<meta itemprop=\"description\" content=\"{}\">",
            attr("HeadMeta with Microdata")
        )
    );
    Ok(())
}

#[test]
fn test_itemprop_is_not_supported_by_default_doctype() {
    init_logger();
    let mut helper = xhtml_helper();
    let err = helper
        .meta("HeadMeta with Microdata", "description", "itemprop", None, Placement::Append)
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default();
    assert!(err.contains("Invalid value passed"));
}

#[test]
fn test_type_that_became_illegal_is_skipped_with_a_warning() -> TestResult {
    init_logger();
    let registry = registry(Doctype::Xhtml1Rdfa);
    let (mut helper, diagnostics) = head_meta(&registry);
    helper.meta("foo", "og:title", "property", None, Placement::Append)?;

    registry.set(Doctype::Xhtml1Strict);
    assert_eq!(helper.to_html(), "");
    assert_eq!(
        diagnostics.warnings(),
        vec![RenderWarning::IllegalMetaType {
            meta_type: "property".to_string(),
            doctype: Doctype::Xhtml1Strict
        }]
    );
    Ok(())
}

#[test]
fn test_render_failure_only_drops_the_offending_item() -> TestResult {
    init_logger();
    let registry = registry(Doctype::Html5);
    let (mut helper, diagnostics) = head_meta(&registry);
    helper
        .call("appendName", &[json!("keywords"), json!("foo")])?
        .call("appendItemprop", &[json!("description"), json!("bar")])?
        .call("appendHttpEquiv", &[json!("pragma"), json!("no-cache")])?
        .set_charset("utf-8")?;

    registry.set(Doctype::Html4Strict);
    assert_eq!(
        helper.to_html(),
        "<meta name=\"keywords\" content=\"foo\">\n<meta http-equiv=\"pragma\" content=\"no-cache\">"
    );
    let warnings = diagnostics.warnings();
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| matches!(w, RenderWarning::IllegalMetaType { .. })));
    assert_eq!(helper.len(), 4);
    Ok(())
}

#[test]
fn test_scheme_modifier_is_dropped_at_render_under_html5() -> TestResult {
    init_logger();
    let registry = registry(Doctype::Xhtml1Strict);
    let (mut helper, diagnostics) = head_meta(&registry);
    helper
        .call("appendName", &[json!("keywords"), json!("foo"), json!({ "scheme": "s" })])?
        .call("appendName", &[json!("author"), json!("bar")])?;
    registry.set(Doctype::Html5);
    assert_eq!(helper.to_html(), "<meta name=\"author\" content=\"bar\">");
    assert!(matches!(
        diagnostics.warnings().as_slice(),
        [RenderWarning::UnsupportedModifier { .. }]
    ));
    Ok(())
}

#[test]
fn test_conditional_modifier_wraps_the_tag() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper.call(
        "appendHttpEquiv",
        &[json!("foo"), json!("bar"), json!({ "conditional": "lt IE 7" })],
    )?;
    let html = helper.to_html();
    assert!(html.starts_with("<!--[if lt IE 7]>"));
    assert!(html.ends_with("<![endif]-->"));

    for condition in ["!IE", "! IE"] {
        let mut helper = xhtml_helper();
        helper.call(
            "appendHttpEquiv",
            &[
                json!("foo"),
                json!("bar"),
                Value::Object(modifiers(json!({ "conditional": condition }))),
            ],
        )?;
        let html = helper.to_html();
        assert!(html.contains(&format!("<!--[if {}]><!--><", condition)));
        assert!(html.contains("<!--<![endif]-->"));
    }
    Ok(())
}

#[test]
fn test_auto_escape_off_does_not_encode() -> TestResult {
    init_logger();
    let mut helper = xhtml_helper();
    helper
        .set_auto_escape(false)
        .call("appendHttpEquiv", &[json!("foo"), json!("bar=baz")])?;
    assert_eq!(helper.to_html(), "<meta http-equiv=\"foo\" content=\"bar=baz\" />");
    Ok(())
}

#[test]
fn test_typed_api_matches_name_based_api() -> TestResult {
    init_logger();
    let mut typed = xhtml_helper();
    typed.append(KeyedMeta::new(MetaType::Name, "keywords", "foo").with_modifier("lang", "en"))?;
    typed.prepend(KeyedMeta::new(MetaType::HttpEquiv, "pragma", "no-cache"))?;

    let mut named = xhtml_helper();
    named
        .call("appendName", &[json!("keywords"), json!("foo"), json!({ "lang": "en" })])?
        .call("prependHttpEquiv", &[json!("pragma"), json!("no-cache")])?;

    assert_eq!(typed.to_html(), named.to_html());
    Ok(())
}

#[test]
fn test_empty_key_or_content_is_rejected() {
    init_logger();
    let mut helper = xhtml_helper();

    let err = helper.call("appendName", &[json!(""), json!("x")]).err();
    assert!(matches!(err, Some(HeadError::InvalidItem { operation: "append", .. })));
    let err = helper.call("setHttpEquiv", &[json!("pragma"), json!("")]).err();
    assert!(matches!(err, Some(HeadError::InvalidItem { operation: "set", .. })));
    let err = helper.append(KeyedMeta::new(MetaType::Name, "", "foo")).err();
    assert!(matches!(err, Some(HeadError::InvalidItem { operation: "append", .. })));
    let err = helper.meta("", "keywords", "name", None, Placement::Prepend).err();
    assert!(matches!(err, Some(HeadError::InvalidItem { operation: "prepend", .. })));
    let record = json!({ "type": "name", "name": "", "content": "foo" });
    let err = helper.insert_value(&record, Insertion::Append).err();
    assert!(matches!(err, Some(HeadError::InvalidItem { operation: "append", .. })));

    assert!(helper.is_empty());
}
