//! Library API integration tests
use telegraph_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

#[test]
fn test_round_trip_scenario() {
    let nodes = html_to_nodes("<p>Hi <b>there</b></p>").expect("should convert");

    let expected = vec![Node::from(
        NodeElement::new("p")
            .with_child("Hi ")
            .with_child(NodeElement::new("b").with_child("there")),
    )];
    assert_eq!(nodes, expected);

    assert_eq!(
        nodes_to_json(&nodes).unwrap(),
        r#"[{"tag":"p","children":["Hi ",{"tag":"b","children":["there"]}]}]"#
    );
}

#[test]
fn test_pretty_printed_fixture() {
    let html = read_fixture("article_crlf.html");
    let expected = read_fixture("article_crlf.json");

    let json = html_to_json(&html, &ConvertConfig::default()).expect("should convert");
    assert_eq!(json, expected.trim_end());
}

#[test]
fn test_fixture_reencoding_is_stable() {
    let html = read_fixture("article_crlf.html");
    let first = html_to_json(&html, &ConvertConfig::default()).unwrap();
    let second = nodes_to_json(&json_to_nodes(&first).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unicode_fixture() {
    let html = read_fixture("unicode.html");
    let nodes = html_to_nodes(&html).expect("should convert");

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].text_content(), "Привет, мир · 你好 & «quotes»");
    assert_eq!(nodes[1].as_element().map(|e| e.tag.as_str()), Some("blockquote"));
    assert!(nodes[1].text_content().contains('🚀'));
}

#[test]
fn test_strict_conversion_rejects_line_breaks() {
    let html = read_fixture("unicode.html");
    let config = ConvertConfig { blank_text: BlankText::Reject };

    assert!(matches!(
        html_to_nodes_with_config(&html, &config),
        Err(TelegraphError::EmptyTag)
    ));
}

#[test]
fn test_page_response_content() {
    let body: serde_json::Value = serde_json::from_str(&read_fixture("page_response.json")).unwrap();
    let page: Page = serde_json::from_value(body["result"].clone()).expect("should decode page");

    assert_eq!(page.title, "Sample Page");
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].text_content(), "Hello, world!");

    let img = page.content[1].as_element().unwrap().children[0].as_element().unwrap();
    assert_eq!(img.attr("src"), Some("/file/6a5b15e7eb4d7329ca7af.jpg"));
    assert!(img.children.is_empty());
}

#[test]
fn test_create_page_params_from_fixture() {
    let html = read_fixture("article_crlf.html");
    let expected = read_fixture("article_crlf.json");

    let page = CreatePage::new("token", "Getting started", PageContent::Html(html));
    let params = page.params(&ConvertConfig::default()).unwrap();

    let content = params.iter().find(|(name, _)| *name == "content").map(|(_, v)| v.as_str());
    assert_eq!(content, Some(expected.trim_end()));
}

#[test]
fn test_sibling_count_matches_markup() {
    let html = "<p>1</p><p>2</p>three<br><h4>4</h4><aside>5</aside>";
    let nodes = html_to_nodes(html).unwrap();
    assert_eq!(nodes.len(), 6);
    assert_eq!(nodes[2], Node::text("three"));
}

#[test]
fn test_inline_siblings_keep_their_separator() {
    let nodes = html_to_nodes("<b>a</b> <b>b</b>").unwrap();
    assert_eq!(nodes.len(), 3);

    let json = html_to_json("<p><b>Hello</b> <i>world</i></p>", &ConvertConfig::default()).unwrap();
    assert_eq!(
        json,
        r#"[{"tag":"p","children":[{"tag":"b","children":["Hello"]}," ",{"tag":"i","children":["world"]}]}]"#
    );
}

#[cfg(feature = "client")]
#[test]
fn test_client_builder() {
    let config = ClientConfig::builder()
        .base_url("http://localhost:8080")
        .upload_url("http://localhost:8080/upload")
        .timeout(5)
        .convert(ConvertConfig { blank_text: BlankText::Reject })
        .build();

    assert_eq!(config.convert.blank_text, BlankText::Reject);
    assert!(Telegraph::with_config(config).is_ok());
}
