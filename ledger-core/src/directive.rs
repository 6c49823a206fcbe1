use typed_builder::TypedBuilder;

use super::location::Location;

/// A partially parsed, unvalidated command block.
///
/// ```text
/// account Assets:Checking
///     alias checking
///     note Everyday spending
/// ```
///
/// The first word is the `keyword`, the rest of the first line the `argument`, and the
/// following indented lines are kept verbatim in `lines`. `anchor` is the index of the
/// transaction the directive is written in front of.
///
/// Equality compares content (keyword, argument and lines) only, so the same directive
/// found at different places in two files compares equal.
#[derive(Clone, Debug, TypedBuilder)]
pub struct Directive {
    #[builder(setter(into))]
    pub keyword: String,

    #[builder(default, setter(into))]
    pub argument: String,

    #[builder(default)]
    pub lines: Vec<String>,

    #[builder(default)]
    pub anchor: usize,

    #[builder(default)]
    pub location: Location,
}

impl PartialEq for Directive {
    fn eq(&self, other: &Self) -> bool {
        self.keyword == other.keyword && self.argument == other.argument && self.lines == other.lines
    }
}

impl Eq for Directive {}

#[test]
fn test_equality_ignores_position() {
    let a = Directive::builder()
        .keyword("account")
        .argument("Assets:Cash")
        .lines(vec!["alias cash".to_string()])
        .anchor(3)
        .location(Location::new(12, 1))
        .build();
    let mut b = a.clone();
    b.anchor = 0;
    b.location = Location::default();
    assert_eq!(a, b);
    b.lines.push("default".to_string());
    assert_ne!(a, b);
}
