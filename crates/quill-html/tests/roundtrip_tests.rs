//! Property tests: serializing a parsed tree and parsing it again gives back
//! the same tree.

use pretty_assertions::assert_eq;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use quill_html::{
    AttributesMap, ElementData, Node, ParseOptions, parse, stringify, try_stringify,
};

const COMPONENT: &str = "my-widget";

fn options() -> ParseOptions {
    ParseOptions::new().with_component(COMPONENT)
}

fn pick<T: Copy>(g: &mut Gen, items: &[T]) -> T {
    *g.choose(items).unwrap()
}

/// A node sequence shaped like tree builder output: no empty text, no two
/// adjacent text nodes, no children under void nodes or components.
#[derive(Debug, Clone)]
struct Document(Vec<Node>);

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(arbitrary_nodes(g, 3))
    }
}

fn arbitrary_nodes(g: &mut Gen, depth: usize) -> Vec<Node> {
    let len = usize::arbitrary(g) % 4;
    let mut nodes: Vec<Node> = Vec::with_capacity(len);
    for _ in 0..len {
        let allow_text = !matches!(nodes.last(), Some(Node::Text { .. }));
        nodes.push(arbitrary_node(g, depth, allow_text));
    }
    nodes
}

fn arbitrary_node(g: &mut Gen, depth: usize, allow_text: bool) -> Node {
    let choices: &[u8] = if allow_text {
        &[0, 1, 2, 3, 4]
    } else {
        &[0, 1, 2, 3]
    };
    match pick(g, choices) {
        0 => {
            let children = if depth == 0 {
                Vec::new()
            } else {
                arbitrary_nodes(g, depth - 1)
            };
            let name = pick(g, &["div", "p", "span", "Section"]);
            Node::Element(ElementData::with_children(
                name,
                arbitrary_attrs(g),
                children,
            ))
        }
        1 => {
            let name = pick(g, &["img", "br", "hr", "input", "x-icon"]);
            Node::Element(ElementData::void(name, arbitrary_attrs(g)))
        }
        2 => {
            let mut data = ElementData::new(COMPONENT);
            data.attrs = arbitrary_attrs(g);
            data.void_element = bool::arbitrary(g);
            Node::Component(data)
        }
        3 => Node::Element(ElementData::new("ul")),
        _ => Node::text(pick(
            g,
            &["hello", " ", "a > b", "line\nbreak", "it's \"quoted\"", "x = 1"],
        )),
    }
}

fn arbitrary_attrs(g: &mut Gen) -> AttributesMap {
    let mut attrs = AttributesMap::new();
    for _ in 0..usize::arbitrary(g) % 3 {
        let key = pick(g, &["id", "class", "data-x", "hidden"]);
        let value = pick(
            g,
            &["", "a", "two words", "x/y", "it's", r#"say "hi""#, "1>0", "a=b"],
        );
        let _ = attrs.insert(key.to_string(), value.to_string());
    }
    attrs
}

/// Markup built from complete pieces, sometimes cut off by a final
/// unterminated tag, comment or declaration.
#[derive(Debug, Clone)]
struct Markup(String);

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        const PIECES: &[&str] = &[
            "<div>",
            "</div>",
            "<p class='a'>",
            "</p>",
            "</span>",
            "<br>",
            "<img src=x/>",
            "<my-widget k=v>",
            "</my-widget>",
            "<my-widget/>",
            "text",
            " ",
            "<!-- c -->",
            "a < b",
        ];
        const CUT_OFF: &[&str] = &["", "<b", "<a href='y", "</p", "<!-- x", "<!x", "<?pi"];
        let len = usize::arbitrary(g) % 12;
        let mut markup: String = (0..len).map(|_| pick(g, PIECES)).collect();
        markup.push_str(pick(g, CUT_OFF));
        Self(markup)
    }
}

#[quickcheck]
fn prop_builder_shaped_trees_round_trip(doc: Document) -> bool {
    parse(&stringify(&doc.0), &options()) == doc.0
}

#[quickcheck]
fn prop_parse_is_idempotent_after_one_stringify(markup: Markup) -> bool {
    let options = options();
    let first = parse(&markup.0, &options);
    let second = parse(&stringify(&first), &options);
    first == second
}

#[quickcheck]
fn prop_parsed_trees_pass_validation(markup: Markup) -> bool {
    try_stringify(&parse(&markup.0, &options())).is_ok()
}

#[test]
fn test_unquoted_value_with_both_quotes_round_trips() {
    let options = ParseOptions::default();
    let first = parse(r#"<a x=a"b'c>t</a>"#, &options);

    let attrs = first[0].attrs().unwrap();
    assert_eq!(attrs["x"], r#"a"b"#);
    assert_eq!(attrs["'c"], "");

    let html = try_stringify(&first).unwrap();
    assert_eq!(html, r#"<a x='a"b' 'c="">t</a>"#);
    assert_eq!(parse(&html, &options), first);
}

#[test]
fn test_unterminated_markup_in_element_round_trips() {
    let options = ParseOptions::default();
    for (source, trailing) in [
        ("<p>a<b", "<b"),
        ("<p>a<!-- x", "<!-- x"),
        ("<p>a<!x", "<!x"),
        ("<p>a<?x", "<?x"),
    ] {
        let first = parse(source, &options);
        assert_eq!(
            first,
            [
                Node::Element(ElementData::with_children(
                    "p",
                    AttributesMap::new(),
                    vec![Node::text("a")]
                )),
                Node::text(trailing),
            ]
        );
        let html = stringify(&first);
        assert_eq!(html, format!("<p>a</p>{trailing}"));
        assert_eq!(parse(&html, &options), first);
    }
}

#[test]
fn test_round_trip_keeps_single_quoted_value() {
    let options = ParseOptions::default();
    let first = parse(r#"<a title='say "hi"'>x</a>"#, &options);
    let html = stringify(&first);
    assert_eq!(html, r#"<a title='say "hi"'>x</a>"#);
    assert_eq!(parse(&html, &options), first);
}

#[test]
fn test_round_trip_closes_everything() {
    let options = ParseOptions::default();
    let first = parse("<div><p>a</span>b", &options);
    let html = stringify(&first);
    assert_eq!(html, "<div><p>ab</p></div>");
    assert_eq!(parse(&html, &options), first);
}
