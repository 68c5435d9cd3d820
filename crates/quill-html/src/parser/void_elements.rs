/// Elements that never have children or a closing tag, whether or not the
/// source self-closes them.
///
/// Names are stored lowercase. [`is_void_element`] compares them ignoring
/// ASCII case, so `<IMG>` and `<Br>` are void too, matching how closers are
/// paired with their opening tags. Component membership stays exact.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "menuitem",
    "meta", "param", "source", "track", "wbr",
];

/// Whether `name` is in [`VOID_ELEMENTS`], ignoring ASCII case.
///
/// ```
/// use quill_html::is_void_element;
///
/// assert!(is_void_element("br"));
/// assert!(is_void_element("BR"));
/// assert!(!is_void_element("brr"));
/// ```
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}
